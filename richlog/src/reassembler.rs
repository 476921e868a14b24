//! Stateful reassembly of wire lines back into complete payloads.
//!
//! A [`Reassembler`] consumes a log stream one line at a time. Lines matching
//! the wire grammar are buffered per correlation id; everything else is
//! ignored. The moment the last missing chunk of some uuid arrives, the
//! fragment buffer is assembled, dropped from the live set and folded into an
//! immutable completed item that the caller receives synchronously.
//!
//! ## Processing flow
//!
//! - A uuid already in the terminal store is never reopened; stray duplicate
//!   final chunks are no-ops.
//! - The first line seen for a uuid fixes that uuid's `type` and `total`;
//!   later lines disagreeing on either are dropped with a warning and the
//!   buffer is left untouched.
//! - Chunks are keyed by index, so out-of-order arrival within one uuid is
//!   handled naturally, and a duplicate index is ignored (first-seen wins,
//!   which models log duplication safely).
//! - Assembly concatenates chunk hex in ascending index order 1..=total,
//!   re-verifying that every index is present, then decodes the combined hex
//!   string into raw bytes. Assembly failures are reported to the log sink
//!   and leave the buffer live; they never propagate to the `ingest` caller,
//!   because a log stream is expected to contain corrupted lines.
//!
//! ## Resource ownership
//!
//! Fragment buffers are freed the instant they complete. The completed store
//! grows for the reassembler's lifetime; a long-lived instance processing
//! many large payloads should evict old items through
//! [`Reassembler::remove_completed`]. Ingestion is a synchronous computation
//! with no interior locking, so a shared instance requires the caller to
//! serialize `ingest` calls.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::error::{Result, RichLogError};
use crate::hexcodec;
use crate::wire::WireLine;

/// A fully reassembled payload for one correlation id.
///
/// `raw_bytes` is the hex-decoded concatenation of all chunks in index order
/// and reproduces the originally encoded payload byte for byte. How those
/// bytes are interpreted is the consumer's decision; the reassembler never
/// branches on `type_tag`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedItem {
    /// Payload classification tag, as carried on the wire.
    pub type_tag: String,
    /// Correlation id shared by the chunks that formed this item.
    pub uuid: String,
    /// The reconstructed payload.
    pub raw_bytes: Vec<u8>,
}

/// Transient per-uuid accumulator of received chunks.
#[derive(Debug)]
struct FragmentBuffer {
    type_tag: String,
    total: u32,
    chunks: BTreeMap<u32, String>,
    received: u32,
}

impl FragmentBuffer {
    fn new(type_tag: String, total: u32) -> Self {
        Self {
            type_tag,
            total,
            chunks: BTreeMap::new(),
            received: 0,
        }
    }

    /// Record a chunk, returning false when the index was already present.
    fn record(&mut self, index: u32, hex_chunk: String) -> bool {
        if self.chunks.contains_key(&index) {
            return false;
        }
        self.chunks.insert(index, hex_chunk);
        self.received += 1;
        true
    }

    fn is_complete(&self) -> bool {
        self.received == self.total
    }

    /// Concatenate all chunks in index order and decode the combined hex.
    ///
    /// The per-index presence check should be structurally impossible to fail
    /// given the bookkeeping in `record`, but assembly re-verifies it rather
    /// than ever producing truncated data.
    fn assemble(&self, uuid: &str) -> Result<Vec<u8>> {
        let mut combined = String::with_capacity(
            self.chunks.values().map(String::len).sum(),
        );
        for index in 1..=self.total {
            match self.chunks.get(&index) {
                Some(hex_chunk) => combined.push_str(hex_chunk),
                None => return Err(RichLogError::missing_chunk(uuid, index)),
            }
        }
        hexcodec::hex_to_bytes(&combined)
    }
}

/// Per-session reassembly engine over a line-oriented log stream.
#[derive(Debug, Default)]
pub struct Reassembler {
    /// Live, incomplete fragment buffers keyed by uuid.
    fragments: HashMap<String, FragmentBuffer>,
    /// Terminal store of completed items keyed by uuid.
    completed: HashMap<String, Arc<CompletedItem>>,
}

impl Reassembler {
    /// Create an empty reassembler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one log line, in file order.
    ///
    /// Returns the completed item when this line supplied the last missing
    /// chunk of its uuid, and `None` in every other case: ordinary log text,
    /// an intermediate chunk, a dropped conflicting line, a duplicate, or a
    /// failed assembly. Per-line problems are reported to the log sink and
    /// never abort ingestion of subsequent lines.
    pub fn ingest(&mut self, line: &str) -> Option<Arc<CompletedItem>> {
        let wire = WireLine::recognize(line)?;

        // Complete is terminal for a uuid; late duplicates never reopen it.
        if self.completed.contains_key(&wire.uuid) {
            return None;
        }

        let buffer = self
            .fragments
            .entry(wire.uuid.clone())
            .or_insert_with(|| FragmentBuffer::new(wire.type_tag.clone(), wire.total));

        if buffer.type_tag != wire.type_tag {
            log::warn!(
                "{}",
                RichLogError::type_mismatch(&wire.uuid, &buffer.type_tag, &wire.type_tag)
            );
            return None;
        }
        if buffer.total != wire.total {
            log::warn!(
                "{}",
                RichLogError::total_mismatch(&wire.uuid, buffer.total, wire.total)
            );
            return None;
        }

        if !buffer.record(wire.index, wire.hex_chunk) {
            return None;
        }
        if !buffer.is_complete() {
            return None;
        }

        let assembled = buffer.assemble(&wire.uuid);
        match assembled {
            Ok(raw_bytes) => {
                self.fragments.remove(&wire.uuid);
                let item = Arc::new(CompletedItem {
                    type_tag: wire.type_tag,
                    uuid: wire.uuid.clone(),
                    raw_bytes,
                });
                self.completed.insert(wire.uuid, Arc::clone(&item));
                Some(item)
            }
            Err(err) => {
                // Buffer stays live: reporting beats silently truncated data.
                log::error!("Assembly failed for uuid {}: {}", wire.uuid, err);
                None
            }
        }
    }

    /// Look up the completed item for `uuid`, if any.
    pub fn completed_item(&self, uuid: &str) -> Option<Arc<CompletedItem>> {
        self.completed.get(uuid).cloned()
    }

    /// All completed items carrying `type_tag`.
    pub fn completed_items_by_type(&self, type_tag: &str) -> Vec<Arc<CompletedItem>> {
        self.completed
            .values()
            .filter(|item| item.type_tag == type_tag)
            .cloned()
            .collect()
    }

    /// Iterate over every completed item.
    pub fn completed_items(&self) -> impl Iterator<Item = &Arc<CompletedItem>> {
        self.completed.values()
    }

    /// Number of live, incomplete fragment buffers.
    pub fn pending_len(&self) -> usize {
        self.fragments.len()
    }

    /// Uuids of live, incomplete fragment buffers.
    pub fn pending_uuids(&self) -> Vec<&str> {
        self.fragments.keys().map(String::as_str).collect()
    }

    /// Number of retained completed items.
    pub fn completed_len(&self) -> usize {
        self.completed.len()
    }

    /// Evict one completed item; the eviction policy belongs to the owner.
    pub fn remove_completed(&mut self, uuid: &str) -> Option<Arc<CompletedItem>> {
        self.completed.remove(uuid)
    }

    /// Drop the live fragment buffer for `uuid`, if any.
    ///
    /// This is the recovery hook for a buffer that can no longer complete,
    /// for example after a malformed-hex assembly failure.
    pub fn discard_fragments(&mut self, uuid: &str) -> bool {
        self.fragments.remove(uuid).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{encode, EncodeOptions, Payload};

    fn options(chunk_size: usize, uuid: &str) -> EncodeOptions {
        EncodeOptions {
            chunk_size,
            uuid: Some(uuid.to_string()),
        }
    }

    fn feed_all(reassembler: &mut Reassembler, lines: &[String]) -> Vec<Arc<CompletedItem>> {
        lines
            .iter()
            .filter_map(|line| reassembler.ingest(line))
            .collect()
    }

    #[test]
    fn reassembles_the_reference_scenario() {
        let mut reassembler = Reassembler::new();
        assert!(reassembler
            .ingest("RICHLOG:command,deadbeef,1,2,68")
            .is_none());
        let item = reassembler
            .ingest("RICHLOG:command,deadbeef,2,2,69")
            .unwrap();
        assert_eq!(item.type_tag, "command");
        assert_eq!(item.uuid, "deadbeef");
        assert_eq!(item.raw_bytes, b"hi");
        assert_eq!(reassembler.pending_len(), 0);
    }

    #[test]
    fn reverse_index_order_still_completes() {
        let mut reassembler = Reassembler::new();
        assert!(reassembler
            .ingest("RICHLOG:command,deadbeef,2,2,69")
            .is_none());
        let item = reassembler
            .ingest("RICHLOG:command,deadbeef,1,2,68")
            .unwrap();
        assert_eq!(item.raw_bytes, b"hi");
    }

    #[test]
    fn ignores_interleaved_ordinary_log_lines() {
        let mut reassembler = Reassembler::new();
        assert!(reassembler.ingest("[10:00:01] service started").is_none());
        reassembler.ingest("RICHLOG:command,deadbeef,1,2,68");
        assert!(reassembler.ingest("[10:00:02] heartbeat ok").is_none());
        let item = reassembler
            .ingest("[10:00:03] RICHLOG:command,deadbeef,2,2,69")
            .unwrap();
        assert_eq!(item.raw_bytes, b"hi");
    }

    #[test]
    fn interleaved_uuids_complete_independently() {
        let first = encode("a", "payload one", &options(4, "00000001")).unwrap();
        let second = encode("b", "payload two", &options(6, "00000002")).unwrap();

        let mut interleaved = Vec::new();
        let mut left = first.iter();
        let mut right = second.iter();
        loop {
            match (left.next(), right.next()) {
                (None, None) => break,
                (line_a, line_b) => {
                    interleaved.extend(line_a.cloned());
                    interleaved.extend(line_b.cloned());
                }
            }
        }

        let mut reassembler = Reassembler::new();
        let completed = feed_all(&mut reassembler, &interleaved);
        assert_eq!(completed.len(), 2);
        assert_eq!(
            reassembler.completed_item("00000001").unwrap().raw_bytes,
            b"payload one"
        );
        assert_eq!(
            reassembler.completed_item("00000002").unwrap().raw_bytes,
            b"payload two"
        );
    }

    #[test]
    fn duplicate_lines_are_idempotent() {
        let mut reassembler = Reassembler::new();
        reassembler.ingest("RICHLOG:t,cafe0001,1,3,aa");
        reassembler.ingest("RICHLOG:t,cafe0001,1,3,aa");
        reassembler.ingest("RICHLOG:t,cafe0001,1,3,bb");
        assert!(reassembler.ingest("RICHLOG:t,cafe0001,2,3,bb").is_none());
        // Two distinct indices recorded out of three; still incomplete.
        assert_eq!(reassembler.pending_len(), 1);
        let item = reassembler.ingest("RICHLOG:t,cafe0001,3,3,cc").unwrap();
        // First-seen wins for index 1.
        assert_eq!(item.raw_bytes, vec![0xaa, 0xbb, 0xcc]);
    }

    #[test]
    fn conflicting_type_is_dropped_and_buffer_unaffected() {
        let mut reassembler = Reassembler::new();
        reassembler.ingest("RICHLOG:A,feed0001,1,3,aa");
        assert!(reassembler.ingest("RICHLOG:B,feed0001,1,3,ab").is_none());
        assert!(reassembler.ingest("RICHLOG:B,feed0001,2,3,ab").is_none());
        reassembler.ingest("RICHLOG:A,feed0001,2,3,bb");
        let item = reassembler.ingest("RICHLOG:A,feed0001,3,3,cc").unwrap();
        assert_eq!(item.type_tag, "A");
        assert_eq!(item.raw_bytes, vec![0xaa, 0xbb, 0xcc]);
    }

    #[test]
    fn conflicting_total_is_dropped_and_buffer_unaffected() {
        let mut reassembler = Reassembler::new();
        reassembler.ingest("RICHLOG:t,feed0002,1,2,aa");
        assert!(reassembler.ingest("RICHLOG:t,feed0002,2,3,bb").is_none());
        let item = reassembler.ingest("RICHLOG:t,feed0002,2,2,bb").unwrap();
        assert_eq!(item.raw_bytes, vec![0xaa, 0xbb]);
    }

    #[test]
    fn completed_uuid_is_terminal() {
        let mut reassembler = Reassembler::new();
        reassembler.ingest("RICHLOG:t,0000cafe,1,1,68");
        // A stray duplicate final chunk must not reopen the item, and a
        // conflicting line must not shadow it either.
        assert!(reassembler.ingest("RICHLOG:t,0000cafe,1,1,68").is_none());
        assert!(reassembler.ingest("RICHLOG:other,0000cafe,1,1,ff").is_none());
        assert_eq!(reassembler.pending_len(), 0);
        assert_eq!(
            reassembler.completed_item("0000cafe").unwrap().raw_bytes,
            b"h"
        );
    }

    #[test]
    fn empty_payload_completes_immediately() {
        let mut reassembler = Reassembler::new();
        let item = reassembler.ingest("RICHLOG:config,00000000,1,1,").unwrap();
        assert!(item.raw_bytes.is_empty());
        assert_eq!(reassembler.completed_len(), 1);
    }

    #[test]
    fn odd_length_assembly_reports_and_keeps_buffer() {
        let mut reassembler = Reassembler::new();
        // 3 hex characters total: undecodable, never silently truncated.
        assert!(reassembler.ingest("RICHLOG:t,0bad0bad,1,2,ab").is_none());
        assert!(reassembler.ingest("RICHLOG:t,0bad0bad,2,2,c").is_none());
        assert_eq!(reassembler.completed_len(), 0);
        assert_eq!(reassembler.pending_len(), 1);
        // The owner can discard the poisoned buffer explicitly.
        assert!(reassembler.discard_fragments("0bad0bad"));
        assert_eq!(reassembler.pending_len(), 0);
    }

    #[test]
    fn lookup_accessors_are_pure() {
        let mut reassembler = Reassembler::new();
        assert!(reassembler.completed_item("missing").is_none());
        assert!(reassembler.completed_items_by_type("config").is_empty());

        for lines in [
            encode("config", "{}", &options(1000, "00000001")).unwrap(),
            encode("config", "[]", &options(1000, "00000002")).unwrap(),
            encode("command", "ls", &options(1000, "00000003")).unwrap(),
        ] {
            feed_all(&mut reassembler, &lines);
        }

        assert_eq!(reassembler.completed_len(), 3);
        assert_eq!(reassembler.completed_items().count(), 3);
        assert_eq!(reassembler.completed_items_by_type("config").len(), 2);
        assert_eq!(reassembler.completed_items_by_type("command").len(), 1);
        assert!(reassembler.completed_items_by_type("image").is_empty());

        assert!(reassembler.remove_completed("00000001").is_some());
        assert_eq!(reassembler.completed_len(), 2);
        assert!(reassembler.completed_item("00000001").is_none());
    }

    #[test]
    fn mixed_case_wire_hex_decodes_to_the_same_bytes() {
        let mut reassembler = Reassembler::new();
        let item = reassembler.ingest("RICHLOG:t,00000010,1,1,DEADbeef").unwrap();
        assert_eq!(item.raw_bytes, vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn encoded_payload_round_trips() {
        let payload = Payload::Bytes(&[0u8, 1, 2, 253, 254, 255]);
        let lines = encode("blob", payload, &options(3, "0000abcd")).unwrap();
        let mut reassembler = Reassembler::new();
        let item = feed_all(&mut reassembler, &lines).pop().unwrap();
        assert_eq!(item.raw_bytes, vec![0u8, 1, 2, 253, 254, 255]);
    }
}
