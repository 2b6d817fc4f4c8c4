use std::{error::Error, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use database::{DatabaseConnectionInfo, PgDatabase};
use ingest::Ingester;
use model::EntityKind;

#[derive(Debug, Parser)]
#[command(version, about = "Loads railcar csv datasets into the database")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replaces a dataset with the contents of `<data-dir>/<kind>.csv`.
    Ingest {
        /// One of locations, equipment, waybills, events.
        kind: EntityKind,

        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(why) => {
            log::error!("{}", why);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error + Send + Sync>> {
    match cli.command {
        Command::Ingest { kind, data_dir } => {
            let info = DatabaseConnectionInfo::from_env()
                .ok_or("database connection info missing from environment")?;
            let database = PgDatabase::connect(info).await?;
            let path = data_dir.join(format!("{}.csv", kind));

            let count = Ingester::new(database).ingest_kind(kind, &path).await?;
            log::info!("success... ingested {} rows", count);
            Ok(())
        }
    }
}
