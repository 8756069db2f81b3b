//! hooksheet - searchable, collapsible cheat sheet in the terminal

use anyhow::Result;
use clap::Parser;
use hooksheet_tui::cli::{run, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    run(Cli::parse()).await
}
