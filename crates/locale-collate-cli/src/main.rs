#![forbid(unsafe_code)]

mod cli;
mod command_compile;
mod command_dump;
mod command_part;
mod command_query;
mod error;
mod options;
mod table_source;

fn setup_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);
    tracing_subscriber::registry().with(filter).with(layer).init();
}

fn main() {
    setup_tracing();
    if let Err(err) = cli::run() {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}
