use anyhow::Result;
use tripchat::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
