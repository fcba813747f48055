use std::fs;

use colored::Colorize;
use tracing_subscriber::EnvFilter;

use listinit::checker::Diagnostic;

/// Log filter comes from `LISTINIT_LOG` (e.g. `LISTINIT_LOG=debug`); warnings only otherwise.
pub(super) fn init_tracing() {
    let filter = EnvFilter::try_from_env("LISTINIT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub(super) fn read_file(path: &str) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("Cannot open file '{}': {}", path, e))
}

pub(super) fn write_file(path: &str, contents: &str) -> Result<(), String> {
    fs::write(path, contents).map_err(|e| format!("Cannot write file '{}': {}", path, e))
}

pub(super) fn print_diagnostics(file: &str, diagnostics: &[Diagnostic]) {
    for d in diagnostics {
        eprintln!("{}", format!("{}: {}", file, d).red());
    }
}
