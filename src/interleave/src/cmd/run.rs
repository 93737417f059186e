use clap::Args;
use eyre::Context;
use interleave_executor::Coordinator;

use super::Command;
use crate::cli::InputsOutputs;

/// Interleaves the characters of the input files, one per line.
///
/// Every round takes one character from each input that still has
/// some left, in the order the inputs were given. The run ends once
/// all inputs are exhausted.
#[derive(Debug, Args)]
pub struct Run {
    #[clap(flatten)]
    args: InputsOutputs,
}

impl Command for Run {
    fn handle(self) -> eyre::Result<()> {
        let (inputs, output) = self.args.evaluate()?;
        let count = inputs.len();

        let sink = output.create()?;
        let summary = Coordinator::new(sink)
            .run(inputs)
            .context("failed to interleave inputs")?;

        log::info!(
            "Wrote {} lines from {count} inputs in {} rounds",
            summary.lines,
            summary.rounds
        );

        Ok(())
    }
}
