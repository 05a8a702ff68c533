//! Command-line interface for sql-utils
//!
//! # Usage Examples
//!
//! ```bash
//! # Check the CLI is alive
//! sql-utils ping
//!
//! # Convert a CSV with a header row into INSERT statements
//! sql-utils csv-to-inserts \
//!   --path data.csv \
//!   --table-name people \
//!   --output people.sql
//!
//! # No header, explicit columns, 1000 rows per statement
//! sql-utils cti -p data.csv -t people -o people.sql \
//!   -H false -u false -c "name,age" -r 1000
//! ```

use clap::{Parser, Subcommand};
use sql_utils::convert::{self, CsvToInsertsOpts};
use tracing::info;

#[derive(Parser)]
#[command(name = "sql-utils")]
#[command(about = "Converts delimited text files into SQL INSERT statements")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the CLI is working as intended
    Ping,

    /// Convert the given CSV to INSERT statements
    #[command(visible_alias = "cti")]
    CsvToInserts(CsvToInsertsOpts),
}

#[tokio::main]
async fn main() {
    let code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            1
        }
    };
    if code != 0 {
        std::process::exit(code);
    }
}

async fn run() -> anyhow::Result<i32> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Ping) {
        Commands::Ping => {
            info!("Pong at {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
            Ok(0)
        }
        Commands::CsvToInserts(opts) => convert::run(&opts).await,
    }
}
