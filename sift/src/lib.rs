//! Sift library for the `richlog` project.
//!
//! This crate provides the pieces used by the `sift` binary:
//! - The `reader` module produces log lines on a channel, either in one pass
//!   over a file or by following it for newly appended lines.
//! - The `extract` module consumes lines from that channel, feeds every one
//!   of them to a `richlog::Reassembler` in file order and lands each
//!   completed item in an output directory, with extensions and summaries
//!   decided by the payload-conversion registry.
//! - The `error` module defines error types used across the library.
//!
//! The reader thread only produces text lines; the reassembler lives on the
//! consuming side of the channel, so all codec state stays on one thread.

pub mod error;
pub mod extract;
pub mod reader;
