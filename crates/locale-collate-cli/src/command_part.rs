use std::io::Write;

use locale_collate_core::Category;
use locale_collate_runtime::{LocaleDataProvider, PartCache};

use crate::error::CliAppError;
use crate::options::DataOptions;

#[derive(Debug, Clone)]
pub struct PartOptions {
    pub data: DataOptions,
    pub category: Category,
    pub name: String,
    pub min_lines: usize,
    pub max_lines: usize,
}

pub fn run_part(options: &PartOptions, out: &mut dyn Write) -> Result<(), CliAppError> {
    let config = options.data.config()?;
    write_part(&config.provider(), options, out)
}

pub fn write_part<P>(provider: &P, options: &PartOptions, out: &mut dyn Write) -> Result<(), CliAppError>
where
    P: LocaleDataProvider + ?Sized,
{
    let mut cache = PartCache::new(options.category, options.min_lines, options.max_lines);
    cache.load_locale_part(provider, &options.name)?;
    if !cache.using_locale() {
        writeln!(out, "{}: built-in rules", options.category)?;
        return Ok(());
    }
    for (index, field) in cache.fields().into_iter().enumerate() {
        match field {
            Some(bytes) => writeln!(out, "{index}\t{}", bytes.escape_ascii())?,
            None => writeln!(out, "{index}\t(unset)")?,
        }
    }
    Ok(())
}
