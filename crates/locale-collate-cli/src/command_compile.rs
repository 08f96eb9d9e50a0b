use std::fs;
use std::io::Write;
use std::path::PathBuf;

use locale_collate_core::{CollateTables, shadowed_chains};
use tracing::{info, warn};

use crate::error::CliAppError;
use crate::table_source::TableSource;

#[derive(Debug, Clone)]
pub struct CompileOptions {
    pub source: PathBuf,
    pub out: PathBuf,
    pub legacy: bool,
}

pub fn run_compile(options: &CompileOptions, out: &mut dyn Write) -> Result<(), CliAppError> {
    let contents = fs::read_to_string(&options.source)?;
    let source = TableSource::parse(&contents)?;
    let bytes = compile_source(&source, options.legacy)?;
    fs::write(&options.out, &bytes)?;
    info!(path = %options.out.display(), size = bytes.len(), "wrote collation table");
    writeln!(
        out,
        "wrote {} ({} bytes, {} chains)",
        options.out.display(),
        bytes.len(),
        source.chains.len()
    )?;
    Ok(())
}

pub fn compile_source(source: &TableSource, legacy: bool) -> Result<Vec<u8>, CliAppError> {
    let builder = source.builder();
    let bytes = if legacy || source.legacy {
        builder.encode_legacy()?
    } else {
        builder.encode()?
    };
    let tables = CollateTables::decode(&bytes)?;
    for (earlier, later) in shadowed_chains(&tables) {
        warn!(
            earlier = %tables.chains()[earlier].text.escape_ascii(),
            later = %tables.chains()[later].text.escape_ascii(),
            "chain is shadowed by an earlier prefix; list longer chains first"
        );
    }
    Ok(bytes)
}
