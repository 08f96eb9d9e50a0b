use std::cmp::Ordering;
use std::io::Write;

use locale_collate_runtime::CollationContext;

use crate::error::CliAppError;
use crate::options::{DataOptions, load_context};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Lookup,
    Substitute,
    Compare,
    Key,
}

impl QueryKind {
    pub fn arity(self) -> usize {
        match self {
            QueryKind::Compare => 2,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QueryOptions {
    pub data: DataOptions,
    pub kind: QueryKind,
    pub inputs: Vec<String>,
}

pub fn run_query(options: &QueryOptions, out: &mut dyn Write) -> Result<(), CliAppError> {
    let config = options.data.config()?;
    let provider = config.provider();
    let encoding = options.data.encoding_or(&config);
    let context = load_context(&provider, &config, encoding)?;
    write_query(&context, options.kind, &options.inputs, out)
}

pub fn write_query(
    context: &CollationContext,
    kind: QueryKind,
    inputs: &[String],
    out: &mut dyn Write,
) -> Result<(), CliAppError> {
    if inputs.len() != kind.arity() {
        return Err(CliAppError::Usage(format!(
            "expected {} argument(s), got {}",
            kind.arity(),
            inputs.len()
        )));
    }
    let first = inputs[0].as_bytes();
    match kind {
        QueryKind::Lookup => {
            let mut rest = first;
            while !rest.is_empty() {
                let step = context.lookup(rest)?;
                let len = step.len.min(rest.len());
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    rest[..len].escape_ascii(),
                    len,
                    step.weights.primary,
                    step.weights.secondary
                )?;
                rest = &rest[len..];
            }
        }
        QueryKind::Substitute => {
            let expanded = if context.is_disabled() {
                first.to_vec()
            } else {
                context.substitute(Some(first))?
            };
            writeln!(out, "{}", expanded.escape_ascii())?;
        }
        QueryKind::Compare => {
            let symbol = match context.compare(first, inputs[1].as_bytes())? {
                Ordering::Less => "<",
                Ordering::Equal => "=",
                Ordering::Greater => ">",
            };
            writeln!(out, "{symbol}")?;
        }
        QueryKind::Key => {
            let key = context.sort_key(first)?;
            let rendered: Vec<String> = key.iter().map(i32::to_string).collect();
            writeln!(out, "{}", rendered.join(" "))?;
        }
    }
    Ok(())
}
