use clap::Parser;
use expense_dashboard::args::{Args, Command, Common};
use expense_dashboard::{commands, Config, DataService, Result};
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
    let common = args.common();
    let format = common.format();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init(init_args) => {
            commands::init(common.home().path(), init_args.source()?)
                .await?
                .log()
        }

        Command::Sheets => commands::sheets(&connect(common).await?).print(format)?,

        Command::Years => commands::years(&connect(common).await?).print(format)?,

        Command::Months(months_args) => {
            commands::months(&connect(common).await?, months_args.year()).print(format)?
        }

        Command::Kpis(kpis_args) => {
            commands::kpis(&connect(common).await?, kpis_args.month(), kpis_args.year())
                .await
                .print(format)?
        }

        Command::Categories(sheet_args) => {
            commands::categories(&connect(common).await?, sheet_args.sheet())
                .await
                .print(format)?
        }

        Command::Allocation(sheet_args) => {
            commands::allocation(&connect(common).await?, sheet_args.sheet())
                .await
                .print(format)?
        }

        Command::Budget(sheet_args) => {
            commands::budget(&connect(common).await?, sheet_args.sheet())
                .await
                .print(format)?
        }

        Command::Transactions(sheet_args) => {
            commands::transactions(&connect(common).await?, sheet_args.sheet())
                .await
                .print(format)?
        }

        Command::Dashboard(dashboard_args) => commands::dashboard(
            &connect(common).await?,
            dashboard_args.year(),
            dashboard_args.month(),
        )
        .await
        .print(format)?,
    };
    Ok(())
}

/// Loads the configuration, applies any backend override, and connects to the data source.
/// Only a bad configuration is an error; a data source that cannot be read is reported by the
/// commands.
async fn connect(common: &Common) -> Result<DataService> {
    let mut config = Config::load(common.home().path()).await?;
    if let Some(backend) = common.backend() {
        debug!("Using the {backend} backend from the command line");
        config = config.with_backend(backend);
    }
    Ok(DataService::connect(&config).await)
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
            let library = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!(
                "{library}={level},{}={level}",
                env!("CARGO_CRATE_NAME")
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
