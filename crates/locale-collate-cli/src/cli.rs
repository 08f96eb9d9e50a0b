use std::io;
use std::path::PathBuf;

use locale_collate_core::Category;

use crate::command_compile::{CompileOptions, run_compile};
use crate::command_dump::{DumpOptions, run_dump};
use crate::command_part::{PartOptions, run_part};
use crate::command_query::{QueryKind, QueryOptions, run_query};
use crate::error::CliAppError;
use crate::options::{DataOptions, next_value, usage};

pub fn run() -> Result<(), CliAppError> {
    let mut args = std::env::args().skip(1);
    let command = args.next().ok_or_else(|| CliAppError::Usage(usage()))?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match command.as_str() {
        "dump" => run_dump(&parse_dump_options(args.collect())?, &mut out),
        "lookup" => run_query(&parse_query_options(QueryKind::Lookup, args.collect())?, &mut out),
        "substitute" => run_query(
            &parse_query_options(QueryKind::Substitute, args.collect())?,
            &mut out,
        ),
        "compare" => run_query(&parse_query_options(QueryKind::Compare, args.collect())?, &mut out),
        "key" => run_query(&parse_query_options(QueryKind::Key, args.collect())?, &mut out),
        "part" => run_part(&parse_part_options(args.collect())?, &mut out),
        "compile" => run_compile(&parse_compile_options(args.collect())?, &mut out),
        _ => Err(CliAppError::Usage(usage())),
    }
}

fn parse_dump_options(args: Vec<String>) -> Result<DumpOptions, CliAppError> {
    let mut options = DumpOptions::default();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if options.data.accept(&arg, &mut iter)? {
            continue;
        }
        match arg.as_str() {
            "--json" => options.json = true,
            _ => return Err(CliAppError::Usage(usage())),
        }
    }
    if options.data.encoding.is_none() {
        return Err(CliAppError::Usage(usage()));
    }
    Ok(options)
}

fn parse_query_options(kind: QueryKind, args: Vec<String>) -> Result<QueryOptions, CliAppError> {
    let mut data = DataOptions::default();
    let mut inputs = Vec::new();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if data.accept(&arg, &mut iter)? {
            continue;
        }
        match arg.as_str() {
            "--help" | "-h" => return Err(CliAppError::Usage(usage())),
            "--" => inputs.extend(iter.by_ref()),
            _ => inputs.push(arg),
        }
    }
    if inputs.len() != kind.arity() {
        return Err(CliAppError::Usage(usage()));
    }
    Ok(QueryOptions { data, kind, inputs })
}

fn parse_part_options(args: Vec<String>) -> Result<PartOptions, CliAppError> {
    let mut data = DataOptions::default();
    let mut category = None;
    let mut name = None;
    let mut min_lines = None;
    let mut max_lines = None;
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if data.accept(&arg, &mut iter)? {
            continue;
        }
        match arg.as_str() {
            "--category" => {
                let value = next_value("--category", &mut iter)?;
                category = Some(Category::from_file_name(&value).ok_or_else(|| {
                    CliAppError::Usage(format!("unknown category {value}\n\n{}", usage()))
                })?);
            }
            "--name" => name = Some(next_value("--name", &mut iter)?),
            "--min" => min_lines = Some(parse_count("--min", &mut iter)?),
            "--max" => max_lines = Some(parse_count("--max", &mut iter)?),
            _ => return Err(CliAppError::Usage(usage())),
        }
    }
    let (Some(category), Some(name), Some(min_lines), Some(max_lines)) =
        (category, name, min_lines, max_lines)
    else {
        return Err(CliAppError::Usage(usage()));
    };
    if min_lines > max_lines {
        return Err(CliAppError::Usage(format!("--min exceeds --max\n\n{}", usage())));
    }
    Ok(PartOptions {
        data,
        category,
        name,
        min_lines,
        max_lines,
    })
}

fn parse_compile_options(args: Vec<String>) -> Result<CompileOptions, CliAppError> {
    let mut source = None;
    let mut out = None;
    let mut legacy = false;
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--source" => source = Some(PathBuf::from(next_value("--source", &mut iter)?)),
            "--out" => out = Some(PathBuf::from(next_value("--out", &mut iter)?)),
            "--legacy" => legacy = true,
            _ => return Err(CliAppError::Usage(usage())),
        }
    }
    let source = source.ok_or_else(|| CliAppError::Usage(usage()))?;
    let out = out.ok_or_else(|| CliAppError::Usage(usage()))?;
    Ok(CompileOptions {
        source,
        out,
        legacy,
    })
}

fn parse_count(flag: &str, iter: &mut impl Iterator<Item = String>) -> Result<usize, CliAppError> {
    let value = next_value(flag, iter)?;
    value
        .parse()
        .map_err(|_| CliAppError::Usage(format!("{flag} expects a number, got {value}")))
}
