//! Scribe binary entrypoint.
//!
//! Parses CLI arguments and dispatches to command handlers in the `scribe`
//! crate. The binary is intentionally a thin wrapper: argument parsing and
//! dispatch happen here, while the real work (file reading, encoding, log
//! writing) is performed by the command implementations found in
//! `scribe::commands`.
//!
//! Examples
//!
//! Embed a file into an application log as hex fragments of 500 characters:
//!
//! $ scribe embed file -f report.pdf --type file --chunk-size 500 --log app.log
//!
//! The command above will:
//! 1. Read `report.pdf`.
//! 2. Hex-encode its bytes and split them into 500-character chunks.
//! 3. Append one `RICHLOG:` line per chunk to `app.log`.
//!
//! Embed a JSON configuration document, emitting the lines to stdout with
//! timestamp prefixes so they blend into surrounding log output:
//!
//! $ scribe embed config -f settings.json --timestamps
//!
//! Generate a self-contained demo log carrying a config document, a BMP
//! image and a shell transcript interleaved with ordinary log lines:
//!
//! $ scribe generate --output sample.log
//!
//! See `scribe::commands::base::Cli` and `scribe::commands::embed` for more
//! configuration options and available subcommands.

use clap::Parser;

fn main() -> scribe::error::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command-line arguments and execute the selected operation.
    scribe::commands::base::Cli::parse().handle()
}
