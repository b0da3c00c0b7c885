use anyhow::Result;
use verimail::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
