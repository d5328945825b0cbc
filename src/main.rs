//! rfield CLI
//!
//! Prints receptive field reports for built-in or file-defined networks.

use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::debug;

use rfield::cli::{commands, Cli, Commands};
use rfield::Result;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG still wins over the flag
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    debug!("rfield v{}", env!("CARGO_PKG_VERSION"));

    match handle_command(cli.command.unwrap_or(Commands::All)) {
        Ok(output) => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error [{}]: {}", e.error_code(), e);
            for suggestion in e.recovery_suggestions() {
                eprintln!("  - {}", suggestion);
            }
            ExitCode::FAILURE
        }
    }
}

fn handle_command(cmd: Commands) -> Result<String> {
    match cmd {
        Commands::Show {
            architecture,
            options,
        } => commands::show(architecture, &options),
        Commands::File { path, options } => commands::trace_file(&path, &options),
        Commands::All => commands::all(),
    }
}
