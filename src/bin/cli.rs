use clap::Parser;
use dealerdb::{dealership_demo, BatchRunner, ConnectionConfig, ConnectionOverrides, PostgresExecutor};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Car dealership database demo client.
///
/// Runs a fixed batch of SQL statements against the dealership schema:
/// writes run transactionally, reports print as fixed-width tables.
#[derive(Parser, Debug)]
#[command(name = "dealerdb", version)]
struct Cli {
    /// Database host
    #[arg(long, env = "DEALERDB_HOST")]
    host: Option<String>,

    /// Database port
    #[arg(long, env = "DEALERDB_PORT")]
    port: Option<u16>,

    /// Database name
    #[arg(long, env = "DEALERDB_DBNAME")]
    dbname: Option<String>,

    /// Database user
    #[arg(long, env = "DEALERDB_USER")]
    user: Option<String>,

    /// Database password
    #[arg(long, env = "DEALERDB_PASSWORD")]
    password: Option<String>,

    /// Path to a YAML config file (default: <config dir>/dealerdb/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> dealerdb::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let overrides = ConnectionOverrides {
        host: cli.host,
        port: cli.port,
        dbname: cli.dbname,
        user: cli.user,
        password: cli.password,
    };
    let config = ConnectionConfig::resolve(cli.config.as_deref(), overrides)?;

    println!("Car dealership database management\n");

    let runner = BatchRunner::new(PostgresExecutor::new(config));
    let report = runner.run(&dealership_demo()).await;

    // Individual failures are reported inline and never change the exit
    // status; only a bad configuration aborts before the batch starts.
    println!("\n{} succeeded, {} failed", report.succeeded(), report.failed());
    Ok(())
}
