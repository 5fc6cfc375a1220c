use clap::Parser;
use expense_tracker::args::{Args, Command};
use expense_tracker::{commands, Config, Result};
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
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().expenses_home().path();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(home, init_args)?.print(),

        Command::Add(add_args) => commands::add(Config::load(home)?, add_args.clone())?.print(),

        Command::Delete(delete_args) => {
            commands::delete(Config::load(home)?, delete_args.clone())?.print()
        }

        Command::List(list_args) => {
            let out = commands::list(Config::load(home)?, list_args.clone())?;
            if let Some(listing) = out.structure() {
                println!("{listing}");
            }
            out.print()
        }

        Command::View(view_args) => {
            commands::view(Config::load(home)?, view_args.clone())?.print()
        }

        Command::Name(name_args) => {
            commands::name(Config::load(home)?, name_args.clone())?.print()
        }

        Command::Import(import_args) => {
            commands::import(Config::load(home)?, import_args.clone())?.print()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for the library and binary only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
