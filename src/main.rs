//! `tickets`: book, list, and run event tickets from the console.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
