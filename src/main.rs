//! Preflight CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use preflight::cli::{Cli, CommandDispatcher, Commands};
use preflight::report::{should_use_colors, ConsoleReporter, OutputMode, Reporter, Theme};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("preflight=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("preflight=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

/// Pick the output mode from the parsed arguments. JSON output owns
/// stdout, so it silences the progressive text entirely.
fn output_mode(cli: &Cli) -> OutputMode {
    let json = match &cli.command {
        Some(Commands::Check(args)) => args.json,
        Some(Commands::List(args)) => args.json,
        _ => false,
    };

    if json {
        OutputMode::Silent
    } else if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("preflight starting with args: {:?}", cli);

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let mode = output_mode(&cli);
    let theme = if should_use_colors() {
        Theme::new()
    } else {
        Theme::plain()
    };
    let mut reporter = ConsoleReporter::new(mode, theme);

    let working_dir = std::env::current_dir().unwrap_or_default();
    let dispatcher = CommandDispatcher::new(working_dir);

    match dispatcher.dispatch(&cli, &mut reporter) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            reporter.error(&format!("Error: {}", e));
            ExitCode::from(2)
        }
    }
}
