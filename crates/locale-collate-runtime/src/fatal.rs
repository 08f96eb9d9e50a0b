use std::fmt::Display;
use std::path::Path;

use tracing::error;

/// `sysexits.h` status for an operating system error such as memory exhaustion.
pub const EX_OSERR: i32 = 71;

/// Basename of `argv[0]`, used to prefix fatal diagnostics.
pub fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

pub fn fatal_message(program: &str, operation: &str, err: &dyn Display) -> String {
    format!("{program}: {operation}: {err}")
}

/// Reports an unrecoverable failure on stderr and exits with [`EX_OSERR`].
pub fn exit_with_error(operation: &str, err: &dyn Display) -> ! {
    let message = fatal_message(&program_name(), operation, err);
    error!(operation, error = %err, "fatal locale error");
    eprintln!("{message}");
    std::process::exit(EX_OSERR)
}

#[cfg(test)]
mod tests {
    use super::{fatal_message, program_name};
    use locale_collate_core::CoreError;

    #[test]
    fn formats_program_operation_and_error() {
        let err = CoreError::OutOfMemory("substitute");
        assert_eq!(
            fatal_message("sort", "substitute", &err),
            "sort: substitute: out of memory: substitute"
        );
    }

    #[test]
    fn program_name_is_never_empty() {
        assert!(!program_name().is_empty());
    }
}
