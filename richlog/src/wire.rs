//! Wire line grammar shared by the encoder and the reassembler.
//!
//! One payload chunk travels as one line of text:
//!
//! ```text
//! RICHLOG:<type>,<uuid>,<index>,<total>,<hexChunk>
//! ```
//!
//! - `type` and `uuid` are runs of one or more characters excluding commas.
//! - `index` and `total` are decimal integers with `1 <= index <= total`.
//! - `hexChunk` is zero or more hex digits; a well-formed payload chunk has
//!   even length. Input is case-insensitive, output is lowercase.
//!
//! The `RICHLOG:` marker may appear anywhere in the line because log
//! frameworks usually prefix timestamps and level tags. Matching starts at
//! the first occurrence of the marker; the hex field is the longest run of
//! hex digits after the fourth comma and any trailing non-hex text is
//! ignored. Lines that do not satisfy the grammar are simply not wire lines,
//! never a panic.

/// Marker that opens the wire form of one chunk.
pub const WIRE_MARKER: &str = "RICHLOG:";

/// One parsed wire line: the atomic transport unit for a single chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireLine {
    /// Payload classification tag, opaque to the codec.
    pub type_tag: String,
    /// Correlation id grouping all chunks of one payload.
    pub uuid: String,
    /// 1-based position of this chunk.
    pub index: u32,
    /// Chunk count for this uuid.
    pub total: u32,
    /// Hex payload data, possibly empty.
    pub hex_chunk: String,
}

impl WireLine {
    /// Match `line` against the wire grammar.
    ///
    /// Returns `None` for ordinary log text, for lines whose `index`/`total`
    /// fields are not decimal integers satisfying `1 <= index <= total`, and
    /// for lines with an empty `type` or `uuid` field.
    pub fn recognize(line: &str) -> Option<Self> {
        let start = line.find(WIRE_MARKER)?;
        let mut fields = line[start + WIRE_MARKER.len()..].splitn(5, ',');

        let type_tag = fields.next()?;
        let uuid = fields.next()?;
        let index = parse_wire_integer(fields.next()?)?;
        let total = parse_wire_integer(fields.next()?)?;
        let tail = fields.next()?;

        if type_tag.is_empty() || uuid.is_empty() || index > total {
            return None;
        }

        let hex_end = tail
            .find(|c: char| !c.is_ascii_hexdigit())
            .unwrap_or(tail.len());

        Some(Self {
            type_tag: type_tag.to_string(),
            uuid: uuid.to_string(),
            index,
            total,
            hex_chunk: tail[..hex_end].to_string(),
        })
    }
}

impl std::fmt::Display for WireLine {
    /// Render the canonical wire form: `RICHLOG:type,uuid,index,total,hexChunk`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{},{},{},{},{}",
            WIRE_MARKER, self.type_tag, self.uuid, self.index, self.total, self.hex_chunk
        )
    }
}

/// Parse a strictly-decimal, nonzero wire integer field.
fn parse_wire_integer(field: &str) -> Option<u32> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse::<u32>().ok().filter(|value| *value > 0)
}
