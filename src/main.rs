use clap::Parser;
use pennywise::args::{Args, Command, Common, TrackSubcommand};
use pennywise::commands::{self, ChartsDir};
use pennywise::console::StdConsole;
use pennywise::{Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().home().path();
    let mut console = StdConsole::stdio();

    let _: () = match args.command() {
        Command::Init => commands::init(home)?.print(),

        Command::Budget => {
            let config = Config::load(home)?;
            let charts = charts_dir(&config, args.common());
            commands::budget(&mut console, &charts)?.print()
        }

        Command::Track(track_args) => {
            let config = Config::load(home)?;
            match track_args.action() {
                None => commands::track(&config, &mut console)?.print(),
                Some(TrackSubcommand::Add(add_args)) => {
                    commands::add_expense(&config, add_args.clone())?.print()
                }
                Some(TrackSubcommand::View) => {
                    commands::view_expenses(&config, &mut console)?.print()
                }
                Some(TrackSubcommand::Summary) => {
                    commands::summarize_expenses(&config, &mut console)?.print()
                }
            }
        }

        Command::Sales => {
            let config = Config::load(home)?;
            let charts = charts_dir(&config, args.common());
            commands::sales(&config, &mut console, &charts)?.print()
        }
    };
    Ok(())
}

fn charts_dir(config: &Config, common: &Common) -> ChartsDir {
    if common.no_charts() {
        ChartsDir::disabled()
    } else {
        ChartsDir::new(config.charts_dir())
    }
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
