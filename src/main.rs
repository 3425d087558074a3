use anyhow::Result;
use clap::Parser;

use ontoctl::cli::{run, Cli};
use ontoctl::utils::logger;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging is best-effort; a read-only HOME must not kill the command.
    if let Err(e) = logger::init_global_logger() {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    run(cli).await
}
