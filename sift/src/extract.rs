//! Extraction loop: log lines in, reconstructed payload files out.
//!
//! Every line received from the reader is fed to one `Reassembler` in file
//! order. Whenever an item completes, its reconstructed bytes are written to
//! the output directory as `<uuid>.<extension>`, where the extension comes
//! from the payload-conversion registry (refined by container sniffing for
//! images) and falls back to `bin` for unknown types. Writing is lossless;
//! the registry only contributes presentation metadata and a one-line
//! summary for the log.

use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use richlog::{CompletedItem, PluginRegistry, Reassembler, WireLine};

use crate::error::Result;

/// Options for one extraction run.
#[derive(Debug)]
pub struct ExtractOptions {
    /// Directory where completed items land; created when missing.
    pub output_dir: PathBuf,
    /// When set, only items with these type tags are written out.
    pub types: Option<Vec<String>>,
}

/// Counters describing one finished extraction run.
#[derive(Debug, Default)]
pub struct ExtractionSummary {
    /// Total lines received from the reader.
    pub lines_scanned: u64,
    /// Lines that matched the wire grammar.
    pub wire_lines: u64,
    /// Items that completed during the run.
    pub items_completed: u64,
    /// Completed items actually written out (after type filtering).
    pub items_extracted: u64,
    /// Uuids whose fragment buffers never completed.
    pub pending_uuids: Vec<String>,
}

/// Drain the line channel, reassembling and landing completed items.
///
/// Runs until the sending side hangs up, then reports what happened.
/// Incomplete buffers at the end of the run are recorded in the summary;
/// they are an expected outcome of truncated logs, not an error.
pub fn process_lines(
    rx: Receiver<String>,
    registry: &PluginRegistry,
    options: &ExtractOptions,
) -> Result<ExtractionSummary> {
    if !options.output_dir.exists() {
        log::info!(
            "Output directory not found. Creating at {}",
            options.output_dir.display()
        );
        std::fs::create_dir_all(&options.output_dir)?;
    }

    let mut reassembler = Reassembler::new();
    let mut summary = ExtractionSummary::default();

    while let Ok(line) = rx.recv() {
        summary.lines_scanned += 1;
        if WireLine::recognize(&line).is_some() {
            summary.wire_lines += 1;
        }

        let Some(item) = reassembler.ingest(&line) else {
            continue;
        };
        summary.items_completed += 1;

        if !type_selected(options, &item.type_tag) {
            log::debug!(
                "Skipping {} item {} (type not selected)",
                item.type_tag,
                item.uuid
            );
            continue;
        }

        write_item(registry, options, &item)?;
        summary.items_extracted += 1;
    }

    summary.pending_uuids = reassembler
        .pending_uuids()
        .into_iter()
        .map(str::to_string)
        .collect();

    Ok(summary)
}

fn type_selected(options: &ExtractOptions, type_tag: &str) -> bool {
    match &options.types {
        Some(types) => types.iter().any(|selected| selected == type_tag),
        None => true,
    }
}

/// Land one completed item in the output directory.
fn write_item(
    registry: &PluginRegistry,
    options: &ExtractOptions,
    item: &CompletedItem,
) -> Result<()> {
    let extension = match registry.extension_for(item) {
        Some(extension) => extension,
        None => {
            log::warn!(
                "No handler registered for type \"{}\"; writing item {} as raw bytes",
                item.type_tag,
                item.uuid
            );
            "bin".to_string()
        }
    };

    let item_path = options
        .output_dir
        .join(format!("{}.{}", item.uuid, extension));
    std::fs::write(&item_path, &item.raw_bytes)?;

    match registry.convert(item) {
        Some(rendered) => log::info!(
            "Extracted {} item {} to {} ({})",
            item.type_tag,
            item.uuid,
            item_path.display(),
            rendered.summary()
        ),
        None => log::info!(
            "Extracted {} item {} to {} ({} bytes)",
            item.type_tag,
            item.uuid,
            item_path.display(),
            item.raw_bytes.len()
        ),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use richlog::{encode, EncodeOptions, Payload};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sift-extract-{}-{}", std::process::id(), name));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    fn send_lines(lines: Vec<String>) -> Receiver<String> {
        let (tx, rx) = std::sync::mpsc::channel();
        for line in lines {
            tx.send(line).unwrap();
        }
        rx
    }

    fn encode_with_uuid(type_tag: &str, payload: &[u8], uuid: &str) -> Vec<String> {
        encode(
            type_tag,
            Payload::Bytes(payload),
            &EncodeOptions {
                chunk_size: 8,
                uuid: Some(uuid.to_string()),
            },
        )
        .unwrap()
    }

    #[test]
    fn lands_completed_items_with_registry_extensions() {
        let output_dir = scratch_dir("lands");
        let mut lines = vec!["ordinary log line".to_string()];
        lines.extend(encode_with_uuid("command", b"echo hi", "00000001"));
        lines.extend(encode_with_uuid("mystery", b"\x00\x01", "00000002"));

        let options = ExtractOptions {
            output_dir: output_dir.clone(),
            types: None,
        };
        let summary = process_lines(
            send_lines(lines),
            &PluginRegistry::with_builtins(),
            &options,
        )
        .unwrap();

        assert_eq!(summary.lines_scanned, 4);
        assert_eq!(summary.wire_lines, 3);
        assert_eq!(summary.items_completed, 2);
        assert_eq!(summary.items_extracted, 2);
        assert!(summary.pending_uuids.is_empty());

        assert_eq!(
            std::fs::read(output_dir.join("00000001.txt")).unwrap(),
            b"echo hi"
        );
        assert_eq!(
            std::fs::read(output_dir.join("00000002.bin")).unwrap(),
            vec![0x00, 0x01]
        );

        std::fs::remove_dir_all(output_dir).unwrap();
    }

    #[test]
    fn type_filter_skips_unselected_items() {
        let output_dir = scratch_dir("filter");
        let mut lines = encode_with_uuid("command", b"echo hi", "00000003");
        lines.extend(encode_with_uuid("config", b"{}", "00000004"));

        let options = ExtractOptions {
            output_dir: output_dir.clone(),
            types: Some(vec!["config".to_string()]),
        };
        let summary = process_lines(
            send_lines(lines),
            &PluginRegistry::with_builtins(),
            &options,
        )
        .unwrap();

        assert_eq!(summary.items_completed, 2);
        assert_eq!(summary.items_extracted, 1);
        assert!(!output_dir.join("00000003.txt").exists());
        assert!(output_dir.join("00000004.json").exists());

        std::fs::remove_dir_all(output_dir).unwrap();
    }

    #[test]
    fn truncated_payloads_are_reported_as_pending() {
        let output_dir = scratch_dir("pending");
        let mut lines = encode_with_uuid("command", b"a long enough payload", "00000005");
        lines.pop();

        let options = ExtractOptions {
            output_dir: output_dir.clone(),
            types: None,
        };
        let summary = process_lines(
            send_lines(lines),
            &PluginRegistry::with_builtins(),
            &options,
        )
        .unwrap();

        assert_eq!(summary.items_completed, 0);
        assert_eq!(summary.pending_uuids, vec!["00000005".to_string()]);

        let _ = std::fs::remove_dir_all(output_dir);
    }
}
