// BLOCKFIELD - animated grid of randomly colored blocks for the terminal
use anyhow::Result;
use blockfield::app::{self, Args};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    app::run(Args::parse()).await
}
