//! Entry point for the catalog compiler.
//!
//! Usage: `ymo-compiler [INPUT.po [OUTPUT.ymo]]`. Settings are read from
//! `.ymo-compiler.json` in the current directory; arguments override its paths.

use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use ymo_compiler::Error;
use ymo_compiler::config::ConfigManager;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(std::env::args_os().skip(1).map(PathBuf::from).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Loads settings, applies positional overrides, and compiles.
fn run(args: Vec<PathBuf>) -> Result<(), Error> {
    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(std::env::current_dir().ok())?;

    let mut settings = config_manager.get_settings().clone();
    let mut args = args.into_iter();
    if let Some(input) = args.next() {
        settings.input = input;
    }
    if let Some(output) = args.next() {
        settings.output = output;
    }
    if args.next().is_some() {
        tracing::warn!("Ignoring extra arguments; usage: ymo-compiler [INPUT.po [OUTPUT.ymo]]");
    }
    config_manager.update_settings(settings)?;

    let options = config_manager.get_settings().compile_options();
    ymo_compiler::compile_po_file(
        &config_manager.input_path(),
        &config_manager.output_path(),
        &options,
    )?;
    Ok(())
}
