/*!
Embedding subcommands for the scribe CLI.

This module contains concrete command implementations for embedding payloads
into a log stream. Three payload shapes are supported:

- File: embed an arbitrary file's bytes under a caller-chosen type tag.
- Config: embed a JSON configuration document (validated and canonicalized
  before encoding).
- Command: embed a command transcript read from a file or stdin.

Each command type implements `CommandHandler` and performs its work when
`handle()` is invoked by the top-level CLI dispatch.
*/

use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use richlog::{encode, encode_command, encode_config, EncodeOptions, Payload};

use crate::sink::LineSink;
use crate::CommandHandler;

/// Options shared by every embedding subcommand.
#[derive(Debug, Clone, Args)]
pub struct EmitArgs {
    /// Maximum hex characters per wire line
    #[arg(
        long = "chunk-size",
        required = false,
        default_value_t = richlog::DEFAULT_CHUNK_SIZE as u32,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    chunk_size: u32,

    /// Correlation id to use instead of generating one
    #[arg(long = "uuid", required = false)]
    uuid: Option<String>,

    /// Log file to append the wire lines to (stdout when omitted)
    #[arg(long = "log", required = false)]
    log: Option<String>,

    /// Prefix each emitted line with a wall-clock timestamp
    #[arg(long = "timestamps", default_value_t = false)]
    timestamps: bool,
}

impl EmitArgs {
    fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            chunk_size: self.chunk_size as usize,
            uuid: self.uuid.clone(),
        }
    }

    fn emit(&self, lines: Vec<String>) -> crate::error::Result<()> {
        LineSink::resolve(self.log.as_deref()).write_lines(&lines, self.timestamps)
    }
}

/// File embedding subcommand arguments.
///
/// The command reads the file's raw bytes and embeds them under the given
/// type tag; the bytes are never inspected or re-encoded beyond hex.
#[derive(Debug, Clone, Args)]
#[command(name = "file")]
pub struct FileEmbedSubCommand {
    /// File to embed
    #[arg(short = 'f', long = "src-file", required = true)]
    file_path: PathBuf,

    /// Type tag carried on every wire line of this payload
    #[arg(long = "type", default_value = "file")]
    type_tag: String,

    #[command(flatten)]
    emit: EmitArgs,
}

impl CommandHandler for FileEmbedSubCommand {
    /// Execute the file embedding flow.
    ///
    /// 1. Read the file's bytes.
    /// 2. Encode them into wire lines under `--type`.
    /// 3. Hand the lines to the configured sink.
    fn handle(self) -> crate::error::Result<()> {
        log::info!("Reading file {}", self.file_path.display());
        let file_bytes = std::fs::read(&self.file_path)?;
        let lines = encode(
            &self.type_tag,
            Payload::Bytes(&file_bytes),
            &self.emit.encode_options(),
        )?;
        self.emit.emit(lines)
    }
}

/// Config embedding subcommand arguments.
#[derive(Debug, Clone, Args)]
#[command(name = "config")]
pub struct ConfigEmbedSubCommand {
    /// JSON configuration document to embed
    #[arg(short = 'f', long = "src-file", required = true)]
    file_path: PathBuf,

    #[command(flatten)]
    emit: EmitArgs,
}

impl CommandHandler for ConfigEmbedSubCommand {
    /// Execute the config embedding flow.
    ///
    /// The document must parse as JSON; it is re-serialized to its canonical
    /// compact form before encoding, so equivalent documents embed to
    /// identical payload bytes.
    fn handle(self) -> crate::error::Result<()> {
        log::info!("Reading config {}", self.file_path.display());
        let config_text = std::fs::read_to_string(&self.file_path)?;
        let config_value: serde_json::Value = serde_json::from_str(&config_text)?;
        let canonical = serde_json::to_string(&config_value)?;
        let lines = encode_config(&canonical, &self.emit.encode_options())?;
        self.emit.emit(lines)
    }
}

/// Command transcript embedding subcommand arguments.
#[derive(Debug, Clone, Args)]
#[command(name = "command")]
pub struct CommandEmbedSubCommand {
    /// Transcript file to embed (stdin when omitted)
    #[arg(short = 'f', long = "src-file", required = false)]
    file_path: Option<PathBuf>,

    #[command(flatten)]
    emit: EmitArgs,
}

impl CommandHandler for CommandEmbedSubCommand {
    /// Execute the transcript embedding flow, reading the transcript from
    /// the given file or, when omitted, from stdin until EOF.
    fn handle(self) -> crate::error::Result<()> {
        let transcript = match &self.file_path {
            Some(path) => {
                log::info!("Reading transcript {}", path.display());
                std::fs::read_to_string(path)?
            }
            None => {
                log::info!("Reading transcript from stdin");
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                buffer
            }
        };
        let lines = encode_command(&transcript, &self.emit.encode_options())?;
        self.emit.emit(lines)
    }
}

/// Wrapper struct for the `embed` subcommand family.
///
/// This struct delegates to a chosen `EmbedType` subcommand parsed via
/// `clap`. It implements `CommandHandler` to perform the dispatch.
#[derive(Debug, Args)]
pub struct EmbedSubCommandArgs {
    #[command(subcommand)]
    embed_type: EmbedType,
}

impl CommandHandler for EmbedSubCommandArgs {
    /// Execute the selected embedding variant.
    fn handle(self) -> crate::error::Result<()> {
        match self.embed_type {
            EmbedType::File(file_subcmd) => file_subcmd.handle(),
            EmbedType::Config(config_subcmd) => config_subcmd.handle(),
            EmbedType::Command(command_subcmd) => command_subcmd.handle(),
        }
    }
}

/// Supported embedding payload shapes.
///
/// Each enum variant wraps the concrete argument struct for that shape.
#[derive(Debug, Subcommand)]
pub enum EmbedType {
    File(FileEmbedSubCommand),
    Config(ConfigEmbedSubCommand),
    Command(CommandEmbedSubCommand),
}
