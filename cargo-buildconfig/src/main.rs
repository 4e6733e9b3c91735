//! CLI entrypoint for `cargo-buildconfig`.

mod cli;
mod metadata;

use std::io::Write;
use std::process::ExitCode;

use cargo_buildconfig::error::BuildConfigError;
use cargo_buildconfig::generate;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::cli::Args;

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "buildconfig generation failed");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), BuildConfigError> {
    let args = Args::parse_cargo();

    let metadata = metadata::load_metadata(args.manifest_path.as_deref())?;
    let selection = metadata::select_package(&metadata, &args)?;
    let requests = metadata::resolve_requests(&selection, &args)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for request in &requests {
        let path = generate::generate(request)?;
        writeln!(out, "{path}").map_err(|io_err| BuildConfigError::Io {
            path: path.clone(),
            source: io_err,
        })?;
    }

    Ok(())
}

/// Installs a stderr subscriber filtered by `RUST_LOG`, defaulting to `warn`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}
