use std::{
    fs,
    io::{self, BufRead},
    path::PathBuf,
};

/// Something that can be opened for reading characters.
///
/// Sources are moved into the thread which reads them, so opening
/// happens on that thread and the reader never leaves it.
pub trait Source: Send + 'static {
    /// The reader produced when opening the source.
    type Reader: BufRead;

    /// A human-readable name for diagnostics.
    fn name(&self) -> String;

    /// Opens the source for reading.
    fn open(self) -> io::Result<Self::Reader>;
}

impl Source for PathBuf {
    type Reader = io::BufReader<fs::File>;

    fn name(&self) -> String {
        self.display().to_string()
    }

    fn open(self) -> io::Result<Self::Reader> {
        let file = fs::File::open(&self)?;
        log::debug!("Opened input file '{}'", self.display());

        Ok(io::BufReader::new(file))
    }
}

/// An in-memory source over a byte buffer.
#[derive(Clone, Debug)]
pub struct Memory {
    name: String,
    data: Vec<u8>,
}

impl Memory {
    /// Creates a named source from the given contents.
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

impl Source for Memory {
    type Reader = io::Cursor<Vec<u8>>;

    fn name(&self) -> String {
        self.name.clone()
    }

    fn open(self) -> io::Result<Self::Reader> {
        Ok(io::Cursor::new(self.data))
    }
}
