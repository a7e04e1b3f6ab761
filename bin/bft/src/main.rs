//! BFT operator tooling.
//!
//! Usage:
//!   bft extra-data encode --validator 0x..01 --validator 0x..02 --vote add:0x..09
//!   bft extra-data decode 0xf8..
//!   bft validate --chain headers.json --mode light

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod extra_data;
mod validate;

/// BFT extra-data and header validation tooling
#[derive(Debug, Parser)]
#[command(name = "bft", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Encode or decode header extra-data
    #[command(name = "extra-data", subcommand)]
    ExtraData(extra_data::Command),
    /// Validate a chain of headers
    Validate(validate::Command),
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    match Cli::parse().command {
        Command::ExtraData(command) => command.execute(),
        Command::Validate(command) => command.execute(),
    }
}
