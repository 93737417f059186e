use std::{
    fs,
    io::{self, BufRead, Cursor, Read},
    path::PathBuf,
};

use interleave_executor::{interleave, Coordinator, InterleaveError, Summary};
use interleave_io::{Memory, ReadError, Source};
use tempfile::TempDir;

fn sources(contents: &[&str]) -> Vec<Memory> {
    contents
        .iter()
        .enumerate()
        .map(|(i, data)| Memory::new(format!("input-{i}"), *data))
        .collect()
}

fn run(contents: &[&str]) -> Result<(String, Summary), InterleaveError> {
    let mut out = Vec::new();
    let summary = interleave(sources(contents), &mut out)?;

    Ok((String::from_utf8(out).unwrap(), summary))
}

#[test]
fn unequal_lengths() -> Result<(), InterleaveError> {
    let (out, summary) = run(&["x\n", "y\nz\n", ""])?;

    assert_eq!(out, "x\ny\nz\n");
    assert_eq!(
        summary,
        Summary {
            rounds: 2,
            lines: 3,
            per_source: vec![1, 2, 0],
        }
    );

    Ok(())
}

#[test]
fn single_round() -> Result<(), InterleaveError> {
    let (out, summary) = run(&["a\n", "b\n", "c\n"])?;

    assert_eq!(out, "a\nb\nc\n");
    assert_eq!(summary.rounds, 1);

    Ok(())
}

#[test]
fn round_robin_order() -> Result<(), InterleaveError> {
    let (out, summary) = run(&["1\n2\n3\n4\n", "a\n", "", "x\ny\nz\n"])?;

    assert_eq!(out, "1\na\nx\n2\ny\n3\nz\n4\n");
    assert_eq!(summary.rounds, 4);
    assert_eq!(summary.lines, 8);
    assert_eq!(summary.per_source, [4, 1, 0, 3]);

    Ok(())
}

#[test]
fn no_sources() -> Result<(), InterleaveError> {
    let (out, summary) = run(&[])?;

    assert!(out.is_empty());
    assert_eq!(summary, Summary::default());

    Ok(())
}

#[test]
fn all_sources_empty() -> Result<(), InterleaveError> {
    let (out, summary) = run(&["", "", ""])?;

    assert!(out.is_empty());
    assert_eq!(summary.rounds, 0);
    assert_eq!(summary.per_source, [0, 0, 0]);

    Ok(())
}

#[test]
fn many_sources() -> Result<(), InterleaveError> {
    let contents: Vec<String> = (0..32)
        .map(|i| "k\n".repeat(i % 5))
        .collect();
    let contents: Vec<&str> = contents.iter().map(String::as_str).collect();

    let (out, summary) = run(&contents)?;

    let expected: usize = (0..32).map(|i| i % 5).sum();
    assert_eq!(out.lines().count(), expected);
    assert_eq!(summary.lines, expected);
    assert_eq!(summary.rounds, 4);

    Ok(())
}

#[test]
fn format_error_stops_output() {
    let mut out = Vec::new();
    let res = interleave(sources(&["a\nb\n", "xy\n", "c\n"]), &mut out);

    match res {
        Err(InterleaveError::Read {
            name,
            error: ReadError::Malformed { line: 1, found },
        }) => {
            assert_eq!(name, "input-1");
            assert_eq!(found, "xy");
        }
        other => panic!("expected a format error, got {other:?}"),
    }

    // Nothing after the failing source was written for that round.
    assert_eq!(out, b"a\n");
}

#[test]
fn files_on_disk() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    let mut paths = Vec::new();
    for (i, data) in ["x\r\n", "y\nz", ""].into_iter().enumerate() {
        let path = dir.path().join(format!("{i}.in"));
        fs::write(&path, data)?;
        paths.push(path);
    }

    let out_path = dir.path().join("out");
    let summary = Coordinator::new(fs::File::create(&out_path)?).run(paths.clone())?;
    assert_eq!(summary.lines, 3);
    assert_eq!(fs::read_to_string(&out_path)?, "x\ny\nz\n");

    // Running again over a fresh output yields the same bytes.
    let again = dir.path().join("again");
    Coordinator::new(fs::File::create(&again)?).run(paths)?;
    assert_eq!(fs::read(&out_path)?, fs::read(&again)?);

    Ok(())
}

#[test]
fn missing_input_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let present = dir.path().join("present.in");
    fs::write(&present, "p\n").unwrap();

    let mut out = Vec::new();
    let res = interleave(
        [present, PathBuf::from("tests/data/does-not-exist.in")],
        &mut out,
    );

    assert!(matches!(res, Err(InterleaveError::Open { .. })));
    assert!(out.is_empty());
}

/// A source which panics once reading reaches a given position.
struct Tripwire {
    name: &'static str,
    inner: Cursor<&'static [u8]>,
    trip_at: u64,
}

impl Tripwire {
    fn new(name: &'static str, data: &'static str, trip_at: u64) -> Self {
        Self {
            name,
            inner: Cursor::new(data.as_bytes()),
            trip_at,
        }
    }
}

impl Read for Tripwire {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl BufRead for Tripwire {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.inner.position() >= self.trip_at {
            panic!("input went away");
        }
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt);
    }
}

impl Source for Tripwire {
    type Reader = Self;

    fn name(&self) -> String {
        self.name.into()
    }

    fn open(self) -> io::Result<Self::Reader> {
        if self.trip_at == 0 {
            panic!("cannot open this source");
        }
        Ok(self)
    }
}

#[test]
fn reader_panic_ends_the_run() {
    let mut out = Vec::new();
    let res = interleave(
        [
            Tripwire::new("first", "a\nb\n", u64::MAX),
            Tripwire::new("second", "x\ny\n", 2),
            Tripwire::new("third", "1\n2\n", u64::MAX),
        ],
        &mut out,
    );

    match res {
        Err(InterleaveError::ReaderPanicked { name }) => assert_eq!(name, "second"),
        other => panic!("expected a reader panic, got {other:?}"),
    }
    assert_eq!(out, b"a\nx\n1\nb\n");
}

#[test]
fn reader_panic_while_opening() {
    let mut out = Vec::new();
    let res = interleave(
        [
            Tripwire::new("first", "a\n", u64::MAX),
            Tripwire::new("second", "x\n", 0),
        ],
        &mut out,
    );

    assert!(matches!(
        res,
        Err(InterleaveError::ReaderPanicked { name }) if name == "second"
    ));
    assert!(out.is_empty());
}

#[test]
fn trailing_whitespace_in_inputs() -> Result<(), InterleaveError> {
    let (out, summary) = run(&["a \n\t\nb\t\r\n", "x\n \n"])?;

    assert_eq!(out, "a\nx\nb\n");
    assert_eq!(summary.per_source, [2, 1]);

    Ok(())
}
