//! Round-robin interleaving of characters from many inputs.
//!
//! # Design
//!
//! Every input gets a dedicated reader thread which owns the opened
//! source for its whole lifetime. The calling thread acts as the
//! coordinator: it asks each reader for one character at a time, in
//! input order, and writes every character it gets back to a single
//! output before asking the next reader.
//!
//! Readers and the coordinator talk through a [`ReaderChannel`], a
//! single-slot handshake guarded by a mutex with one condition
//! variable per direction. At most one character is in flight per
//! channel, and because every exchange passes through the lock, the
//! output is fully determined by the input contents regardless of
//! how the OS schedules the threads.
//!
//! Inputs of unequal length are drained naturally: an exhausted
//! reader reports so once, after which the coordinator skips it. The
//! run ends with the first round in which no reader produced a
//! character.

#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod channel;
pub use channel::*;

mod coordinator;
pub use coordinator::*;

mod error;
pub use error::*;
