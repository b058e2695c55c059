use clap::Parser;
use finance_tracker::args::{AddSubcommand, Args, Command};
use finance_tracker::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().finance_home().path();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init => commands::init(home).await?.print(),

        Command::Summary => commands::summary(Config::load(home).await?)
            .await?
            .print(),

        Command::Transactions => commands::transactions(Config::load(home).await?)
            .await?
            .print(),

        Command::Goals => commands::goals(Config::load(home).await?).await?.print(),

        Command::Categories(categories_args) => {
            commands::categories(categories_args.clone()).print()
        }

        Command::Add(add_args) => {
            let config = Config::load(home).await?;
            match add_args.entity() {
                AddSubcommand::Transaction(args) => {
                    commands::add_transaction(config, args.clone())
                        .await?
                        .print()
                }
                AddSubcommand::Goal(args) => commands::add_goal(config, args.clone())
                    .await?
                    .print(),
            }
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
            // RUST_LOG does not exist; use default log level for this package only.
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
