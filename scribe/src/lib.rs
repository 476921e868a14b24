//! Scribe library for the `richlog` project.
//!
//! This crate provides the pieces used by the `scribe` binary:
//! - The `commands` module contains CLI subcommands and wiring to embed
//!   payloads (files, config documents, command transcripts) into a log
//!   stream, and to generate a self-contained demo log.
//! - The `sink` module writes wire lines to stdout or appends them to a log
//!   file, optionally behind a timestamp prefix the way real log frameworks
//!   emit them.
//! - The `error` module defines error types used across the library.
//!
//! The library exposes a small `CommandHandler` trait which CLI types
//! implement to perform their respective operation when invoked by the CLI
//! entrypoint.
//!
//! Design notes:
//! - Ownership is preferred for command handlers: `handle(self)` consumes the
//!   command struct so implementations can move resources (paths, buffers)
//!   without cloning.
//! - All encoding goes through the `richlog` crate; scribe only decides what
//!   to embed and where the lines land.

pub mod commands;
pub mod error;
pub mod sink;

/// A thin abstraction implemented by CLI command structs to execute work.
///
/// Implementors should perform whatever IO or processing the command
/// represents inside `handle`. The method takes ownership of `self` so
/// implementors can move owned fields (file paths, configuration) without
/// requiring extra cloning.
pub trait CommandHandler {
    /// Execute the command, consuming the implementor.
    fn handle(self) -> crate::error::Result<()>;
}
