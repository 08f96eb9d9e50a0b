use std::io::Write;

use locale_collate_core::CollateTables;
use locale_collate_runtime::{LocaleDataProvider, RuntimeConfig};
use serde::Serialize;

use crate::error::CliAppError;
use crate::options::{DataOptions, load_context};

#[derive(Debug, Clone, Default)]
pub struct DumpOptions {
    pub data: DataOptions,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct TablesReport {
    encoding: String,
    format: &'static str,
    declared_chains: usize,
    substitute_nontrivial: bool,
    substitutions: Vec<SubstitutionReport>,
    chains: Vec<WeightReport>,
    chars: Vec<CharReport>,
}

#[derive(Debug, Serialize)]
struct SubstitutionReport {
    byte: u8,
    replacement: String,
}

#[derive(Debug, Serialize)]
struct WeightReport {
    text: String,
    primary: i32,
    secondary: i32,
}

#[derive(Debug, Serialize)]
struct CharReport {
    byte: u8,
    primary: i32,
    secondary: i32,
}

pub fn run_dump(options: &DumpOptions, out: &mut dyn Write) -> Result<(), CliAppError> {
    let config = options.data.config()?;
    let provider = config.provider();
    let encoding = options.data.encoding_or(&config).to_string();
    write_dump(&provider, &config, &encoding, options.json, out)
}

pub fn write_dump<P>(
    provider: &P,
    config: &RuntimeConfig,
    encoding: &str,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliAppError>
where
    P: LocaleDataProvider + ?Sized,
{
    let context = load_context(provider, config, encoding)?;
    let tables = match context.tables() {
        Some(tables) if !context.is_disabled() => tables,
        _ => return Err(CliAppError::Disabled(encoding.to_string())),
    };
    if json {
        let report = build_report(encoding, tables);
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        write!(out, "{tables}")?;
    }
    Ok(())
}

fn build_report(encoding: &str, tables: &CollateTables) -> TablesReport {
    let substitutions = (0..=u8::MAX)
        .filter_map(|byte| {
            let replacement = tables.substitution(byte);
            let identity = if byte == 0 {
                replacement.is_empty()
            } else {
                replacement == [byte]
            };
            (!identity).then(|| SubstitutionReport {
                byte,
                replacement: replacement.escape_ascii().to_string(),
            })
        })
        .collect();
    let chains = tables
        .chains()
        .iter()
        .map(|chain| WeightReport {
            text: chain.text.escape_ascii().to_string(),
            primary: chain.weights.primary,
            secondary: chain.weights.secondary,
        })
        .collect();
    let chars = (0..=u8::MAX)
        .map(|byte| {
            let weights = tables.char_priority(byte);
            CharReport {
                byte,
                primary: weights.primary,
                secondary: weights.secondary,
            }
        })
        .collect();
    TablesReport {
        encoding: encoding.to_string(),
        format: match tables.format() {
            locale_collate_core::TableFormat::Legacy => "1.0",
            locale_collate_core::TableFormat::Counted => "1.2",
        },
        declared_chains: tables.declared_chains(),
        substitute_nontrivial: tables.substitute_nontrivial(),
        substitutions,
        chains,
        chars,
    }
}
