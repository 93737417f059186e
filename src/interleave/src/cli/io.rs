use std::{
    fs,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use clap::Args;
use eyre::Context;
use glob::glob;

use crate::cli::HYPHEN;

/// An output source to [`InputsOutputs`] machinery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputSource {
    /// The output will be written to stdout.
    Stdout,
    /// The output will be written to a single file.
    File(PathBuf),
}

impl OutputSource {
    /// Opens the output for writing.
    ///
    /// Files are created when missing and truncated otherwise.
    pub fn create(&self) -> eyre::Result<Writer> {
        match self {
            Self::Stdout => Ok(Writer::Stdout(io::stdout().lock())),
            Self::File(path) => {
                let file = fs::File::create(path)
                    .with_context(|| format!("failed to create '{}'", path.display()))?;
                Ok(Writer::File(BufWriter::new(file)))
            }
        }
    }
}

/// A writer over a compatible output source.
pub enum Writer {
    Stdout(io::StdoutLock<'static>),
    File(BufWriter<fs::File>),
}

impl Write for Writer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout(o) => o.write(buf),
            Self::File(o) => o.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Self::Stdout(o) => o.write_all(buf),
            Self::File(o) => o.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(o) => o.flush(),
            Self::File(o) => o.flush(),
        }
    }
}

/// Generalized command options for accepting an ordered list of
/// inputs and producing a single output.
#[derive(Debug, Args)]
pub struct InputsOutputs {
    /// Specifies the input files to process, in order.
    ///
    /// UNIX glob patterns are supported to specify many files. The
    /// matches of a pattern are taken in sorted order, while the
    /// patterns themselves keep the order they were given in.
    ///
    /// Every pattern must match at least one file.
    #[clap(required = true)]
    pub inputs: Vec<String>,

    /// An optional output file for the result.
    ///
    /// Defaults to "-" for printing output to stdout.
    #[clap(short, default_value = HYPHEN)]
    pub output: PathBuf,
}

impl InputsOutputs {
    /// Evaluates the supplied arguments into input paths and an
    /// output source.
    pub fn evaluate(self) -> eyre::Result<(Vec<PathBuf>, OutputSource)> {
        let inputs = self.input_paths()?;
        let output = self.output_source();

        Ok((inputs, output))
    }

    fn input_paths(&self) -> eyre::Result<Vec<PathBuf>> {
        let mut paths = Vec::with_capacity(self.inputs.len());
        for pattern in &self.inputs {
            // Even if it's just a path to a single file, evaluating it
            // as a glob pattern will work fine.
            let matched: Vec<PathBuf> = glob(pattern)
                .with_context(|| format!("invalid input pattern '{pattern}'"))?
                .collect::<Result<_, _>>()?;

            if matched.is_empty() {
                eyre::bail!("failed to find files matching '{pattern}'");
            }

            log::debug!("Pattern '{pattern}' matched {} files", matched.len());
            paths.extend(matched);
        }

        Ok(paths)
    }

    fn output_source(self) -> OutputSource {
        if self.output.as_os_str() == HYPHEN {
            OutputSource::Stdout
        } else {
            OutputSource::File(self.output)
        }
    }
}
