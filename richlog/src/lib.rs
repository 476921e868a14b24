//! Core library for the `richlog` project.
//!
//! Arbitrary payloads (text, binary blobs, structured config) are embedded
//! inside ordinary line-oriented text logs as a sequence of tagged,
//! hex-encoded fragments, and later losslessly reconstructed from those lines
//! regardless of interleaving with unrelated log output.
//!
//! This crate provides the pieces shared by the `scribe` and `sift` binaries:
//! - The `wire` module defines the one-line wire grammar
//!   (`RICHLOG:type,uuid,index,total,hexChunk`) used by both directions.
//! - The `encoder` module splits a payload into ordered hex chunks and
//!   renders each as one wire line.
//! - The `reassembler` module ingests log lines one at a time, buffers
//!   fragments per correlation id and emits completed items.
//! - The `plugins` module maps completed items to presentable forms through
//!   a caller-owned registry.
//! - The `hexcodec` module holds the hex/byte helpers shared by all of the
//!   above, and the `error` module the error types.
//!
//! Design notes:
//! - Encoding is a pure function of its inputs plus uuid randomness; all
//!   reassembly state lives inside a [`Reassembler`] value owned by the
//!   caller. There is no global state anywhere in the crate.
//! - Chunks of one correlation id may arrive in any order and interleaved
//!   with chunks of other ids; completion triggers on the last missing chunk.
//! - Per-line problems in a log stream are reported through the `log` crate
//!   and never abort ingestion.

pub mod encoder;
pub mod error;
pub mod hexcodec;
pub mod plugins;
pub mod reassembler;
pub mod wire;

pub use encoder::{
    encode, encode_command, encode_config, encode_image, generate_uuid, EncodeOptions, Payload,
    DEFAULT_CHUNK_SIZE,
};
pub use error::{Result, RichLogError};
pub use plugins::{PayloadKind, PluginInfo, PluginRegistry, RenderedPayload};
pub use reassembler::{CompletedItem, Reassembler};
pub use wire::WireLine;
