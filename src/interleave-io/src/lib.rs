//! Line-oriented I/O primitives for interleave.
//!
//! Inputs and outputs share one format: every line holds exactly one
//! character, followed by a line terminator. This crate provides the
//! reading and writing side of that format along with the [`Source`]
//! abstraction for things a reader thread can open.

#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod reader;
pub use reader::*;

mod source;
pub use source::*;

mod writer;
pub use writer::*;
