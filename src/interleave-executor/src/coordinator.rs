use std::io::Write;

use interleave_io::{CharWriter, Source};

use crate::{InterleaveError, ReaderChannel};

/// Statistics about a finished interleaving run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// The number of rounds which produced at least one line.
    pub rounds: usize,
    /// The total number of lines written.
    pub lines: usize,
    /// The number of characters taken from every input, in order.
    pub per_source: Vec<usize>,
}

/// Drives the round-robin exchange between reader channels and the
/// output.
///
/// All writing happens on the thread that calls [`Coordinator::run`].
pub struct Coordinator<W: Write> {
    sink: CharWriter<W>,
}

impl<W: Write> Coordinator<W> {
    /// Creates a coordinator which writes to `sink`.
    ///
    /// The sink is expected to be freshly opened; the coordinator
    /// never seeks or truncates it.
    pub fn new(sink: W) -> Self {
        Self {
            sink: CharWriter::new(sink),
        }
    }

    /// Interleaves all `sources` into the sink, one character per line.
    ///
    /// Every round asks each unfinished source for one character in
    /// the given order and writes it out before moving to the next
    /// source. The run ends after the first round in which no source
    /// produced a character.
    ///
    /// The first error stops the run. Output written until then stays
    /// in the sink; all reader threads are joined either way.
    pub fn run<S, I>(mut self, sources: I) -> Result<Summary, InterleaveError>
    where
        S: Source,
        I: IntoIterator<Item = S>,
    {
        let mut channels = sources
            .into_iter()
            .map(ReaderChannel::launch)
            .collect::<Result<Vec<_>, _>>()?;

        let mut rounds = 0;
        loop {
            let mut productive = false;

            for channel in &mut channels {
                if channel.is_finished() {
                    continue;
                }

                if let Some(c) = channel.request()? {
                    productive = true;
                    self.sink.write_char(c).map_err(InterleaveError::Write)?;
                }
            }

            if !productive {
                break;
            }

            rounds += 1;
            log::debug!("Finished round {rounds}");
        }

        let per_source = channels.iter().map(ReaderChannel::taken).collect();
        for channel in channels {
            channel.join()?;
        }

        let summary = Summary {
            rounds,
            lines: self.sink.lines(),
            per_source,
        };
        self.sink.finish().map_err(InterleaveError::Write)?;

        Ok(summary)
    }
}

/// Interleaves `sources` into `sink` with a fresh [`Coordinator`].
pub fn interleave<S, I, W>(sources: I, sink: W) -> Result<Summary, InterleaveError>
where
    S: Source,
    I: IntoIterator<Item = S>,
    W: Write,
{
    Coordinator::new(sink).run(sources)
}
