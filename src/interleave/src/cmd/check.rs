use std::path::PathBuf;

use clap::Args;
use eyre::Context;
use interleave_io::{CharReader, Source};
use rayon::prelude::*;
use serde::Serialize;

use super::Command;
use crate::{cli::InputsOutputs, utils};

/// Validates the input files without interleaving them.
///
/// Writes a JSON report with the number of characters in every
/// input. Fails on the first input that does not hold exactly one
/// character per line.
#[derive(Debug, Args)]
pub struct Check {
    #[clap(flatten)]
    args: InputsOutputs,
}

/// The validation outcome for a single input file.
#[derive(Debug, Serialize)]
struct FileReport {
    path: PathBuf,
    characters: usize,
}

fn check_file(path: PathBuf) -> eyre::Result<FileReport> {
    let name = path.name();
    let reader = path
        .clone()
        .open()
        .with_context(|| format!("failed to open '{name}'"))?;

    let mut characters = 0;
    for c in CharReader::new(reader) {
        c.with_context(|| format!("'{name}' is malformed"))?;
        characters += 1;
    }

    log::debug!("'{name}' holds {characters} characters");
    Ok(FileReport { path, characters })
}

impl Command for Check {
    fn handle(self) -> eyre::Result<()> {
        let (inputs, output) = self.args.evaluate()?;

        let reports: Vec<FileReport> = inputs
            .into_par_iter()
            .map(check_file)
            .collect::<eyre::Result<_>>()?;

        let total: usize = reports.iter().map(|r| r.characters).sum();
        log::info!(
            "{} inputs hold {total} characters, at most {} rounds",
            reports.len(),
            reports.iter().map(|r| r.characters).max().unwrap_or(0)
        );

        utils::serialize_to_output_source(&output, &reports)
    }
}
