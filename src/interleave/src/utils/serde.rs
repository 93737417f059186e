use std::io::{self, IsTerminal, Write};

use serde::Serialize;

use crate::cli::OutputSource;

/// Serializes the given value to the respective output source.
///
/// This will produce valid JSON. If the output is a file or piped to
/// another application, a minified representation will be emitted.
///
/// Output to a terminal always gets pretty-printed.
pub fn serialize_to_output_source<T: Serialize>(
    out: &OutputSource,
    value: &T,
) -> eyre::Result<()> {
    let mut writer = out.create()?;

    if *out == OutputSource::Stdout && io::stdout().is_terminal() {
        serde_json::to_writer_pretty(&mut writer, value)?;
        writeln!(writer)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }

    writer.flush()?;
    Ok(())
}
