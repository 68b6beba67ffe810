//! catalyst-dashboard binary

use catalyst_cli::{load_env_file, logging, run, Cli};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_env_file(None)?;

    let cli = Cli::parse();
    logging::init(&cli.log_level);

    let output = run(cli).await?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
