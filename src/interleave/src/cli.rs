use clap::{Parser, Subcommand};

use crate::cmd::*;

mod args;

pub mod io;
pub use io::*;

pub const HYPHEN: &str = "-";

/// The CLI interface for the interleave application.
#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub struct Cli {
    /// The selected command.
    #[clap(subcommand)]
    pub command: InterleaveCommand,

    #[clap(flatten)]
    pub verbosity: args::Verbosity,
}

/// The top-level commands supported by interleave.
#[derive(Debug, Subcommand)]
pub enum InterleaveCommand {
    Check(check::Check),
    Run(run::Run),
}

impl Command for InterleaveCommand {
    fn handle(self) -> eyre::Result<()> {
        match self {
            Self::Check(check) => check.handle(),
            Self::Run(run) => run.handle(),
        }
    }
}
