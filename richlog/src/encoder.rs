use crate::error::{Result, RichLogError};
use crate::hexcodec;
use crate::wire::WireLine;

/// Default maximum number of hex characters per wire line payload field.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// A payload handed to the encoder.
///
/// The encoder accepts exactly two payload shapes: UTF-8 text and raw bytes.
/// Text payloads are hex-encoded from their UTF-8 byte representation, so the
/// two variants only differ in how the caller happens to hold the data.
#[derive(Debug, Clone, Copy)]
pub enum Payload<'a> {
    /// A UTF-8 text payload, encoded from its UTF-8 bytes.
    Text(&'a str),
    /// A raw byte payload.
    Bytes(&'a [u8]),
}

impl Payload<'_> {
    /// Convert the payload to its lowercase hex representation.
    fn to_hex(self) -> String {
        match self {
            Payload::Text(text) => hexcodec::text_to_hex(text),
            Payload::Bytes(bytes) => hexcodec::bytes_to_hex(bytes),
        }
    }
}

impl<'a> From<&'a str> for Payload<'a> {
    fn from(value: &'a str) -> Self {
        Payload::Text(value)
    }
}

impl<'a> From<&'a [u8]> for Payload<'a> {
    fn from(value: &'a [u8]) -> Self {
        Payload::Bytes(value)
    }
}

/// Options controlling one encoding operation.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Maximum hex-character length of one wire line's payload field.
    pub chunk_size: usize,
    /// Caller-supplied correlation id; auto-generated when absent.
    pub uuid: Option<String>,
}

impl Default for EncodeOptions {
    /// Default options: 1000 hex characters per chunk, auto-generated uuid.
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            uuid: None,
        }
    }
}

/// Generate a fresh correlation id.
///
/// # Returns
/// An 8-character lowercase hex string derived from 4 random bytes. The id is
/// unique enough to avoid collision within one log's lifetime; it makes no
/// global uniqueness promise beyond its 32 bits of randomness.
pub fn generate_uuid() -> String {
    let random_bytes: [u8; 4] = urandom::new().random_bytes();
    hex::encode(random_bytes)
}

/// Encode a payload into an ordered sequence of wire-format log lines.
///
/// The payload is hex-encoded (two lowercase hex digits per byte), the hex
/// string is split into consecutive chunks of at most `chunk_size` characters
/// and each chunk is rendered as one `RICHLOG:` line. An empty payload still
/// emits exactly one line carrying an empty hex field, so the receiving side
/// can complete a zero-length item. Concatenating the payload fields of the
/// returned lines in order reproduces the hex string exactly.
///
/// # Arguments
/// * `type_tag` - Payload classification tag; must be non-empty and free of
///   commas and line breaks.
/// * `payload` - The data to embed, as text or raw bytes.
/// * `options` - Chunk size and optional caller-supplied uuid.
///
/// # Returns
/// The wire lines, in chunk index order 1..=total.
pub fn encode<'a>(
    type_tag: &str,
    payload: impl Into<Payload<'a>>,
    options: &EncodeOptions,
) -> Result<Vec<String>> {
    wire_safe_field("type", type_tag)?;
    if options.chunk_size == 0 {
        return Err(RichLogError::validation_error(
            "chunk size must be greater than zero",
        ));
    }

    let uuid = match &options.uuid {
        Some(uuid) => {
            wire_safe_field("uuid", uuid)?;
            uuid.clone()
        }
        None => generate_uuid(),
    };

    let hex_data = payload.into().to_hex();
    let total_chunks = hex_data.len().div_ceil(options.chunk_size).max(1);
    let total = u32::try_from(total_chunks).map_err(|_| {
        RichLogError::validation_error("payload exceeds the wire chunk-count width")
    })?;

    // Hex data is pure ASCII, so byte offsets are character offsets.
    let lines = (0..total_chunks)
        .map(|chunk_number| {
            let start = chunk_number * options.chunk_size;
            let end = (start + options.chunk_size).min(hex_data.len());
            WireLine {
                type_tag: type_tag.to_string(),
                uuid: uuid.clone(),
                index: chunk_number as u32 + 1,
                total,
                hex_chunk: hex_data[start..end].to_string(),
            }
            .to_string()
        })
        .collect();

    Ok(lines)
}

/// Encode a pre-serialized JSON configuration document.
///
/// Serialization is the caller's job; this wrapper only presets the `config`
/// type tag.
///
/// # Arguments
/// * `config_json` - The serialized configuration text.
/// * `options` - Encoding options, see [`encode`].
///
/// # Returns
/// The wire lines for the configuration payload.
pub fn encode_config(config_json: &str, options: &EncodeOptions) -> Result<Vec<String>> {
    encode("config", Payload::Text(config_json), options)
}

/// Encode image bytes under the `image` type tag.
///
/// # Arguments
/// * `image_bytes` - The image file content.
/// * `options` - Encoding options, see [`encode`].
///
/// # Returns
/// The wire lines for the image payload.
pub fn encode_image(image_bytes: &[u8], options: &EncodeOptions) -> Result<Vec<String>> {
    encode("image", Payload::Bytes(image_bytes), options)
}

/// Encode a command transcript under the `command` type tag.
///
/// # Arguments
/// * `command_output` - The captured command output text.
/// * `options` - Encoding options, see [`encode`].
///
/// # Returns
/// The wire lines for the command payload.
pub fn encode_command(command_output: &str, options: &EncodeOptions) -> Result<Vec<String>> {
    encode("command", Payload::Text(command_output), options)
}

/// Reject field values that would corrupt the comma-delimited wire grammar.
fn wire_safe_field(field_name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(RichLogError::validation_error(&format!(
            "{} must not be empty",
            field_name
        )));
    }
    if value.contains(',') || value.contains('\n') || value.contains('\r') {
        return Err(RichLogError::validation_error(&format!(
            "{} must not contain commas or line breaks",
            field_name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_uuid(chunk_size: usize, uuid: &str) -> EncodeOptions {
        EncodeOptions {
            chunk_size,
            uuid: Some(uuid.to_string()),
        }
    }

    #[test]
    fn encodes_the_reference_scenario() {
        let lines = encode("command", "hi", &with_uuid(2, "deadbeef")).unwrap();
        assert_eq!(
            lines,
            vec![
                "RICHLOG:command,deadbeef,1,2,68",
                "RICHLOG:command,deadbeef,2,2,69",
            ]
        );
    }

    #[test]
    fn exact_multiple_of_chunk_size_produces_exactly_k_chunks() {
        // "hi" is 4 hex characters.
        let lines = encode("t", "hi", &with_uuid(2, "cafe0001")).unwrap();
        assert_eq!(lines.len(), 2);

        let lines = encode("t", "hi", &with_uuid(4, "cafe0001")).unwrap();
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn one_extra_hex_character_adds_a_chunk() {
        // Three bytes are 6 hex characters: exactly two chunks of 3.
        let payload: &[u8] = &[1, 2, 3];
        let lines = encode("t", payload, &with_uuid(3, "cafe0001")).unwrap();
        assert_eq!(lines.len(), 2);

        // Four bytes are 8 hex characters: two full chunks plus a short one.
        let payload: &[u8] = &[1, 2, 3, 4];
        let lines = encode("t", payload, &with_uuid(3, "cafe0001")).unwrap();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].ends_with(",04"));
    }

    #[test]
    fn empty_payload_emits_one_empty_chunk() {
        let lines = encode("config", "", &with_uuid(1000, "cafe0001")).unwrap();
        assert_eq!(lines, vec!["RICHLOG:config,cafe0001,1,1,"]);
    }

    #[test]
    fn generated_uuid_is_eight_lowercase_hex_characters() {
        let uuid = generate_uuid();
        assert_eq!(uuid.len(), 8);
        assert!(uuid
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn omitted_uuid_is_generated_per_call() {
        let options = EncodeOptions {
            chunk_size: 1000,
            uuid: None,
        };
        let first = encode("t", "x", &options).unwrap();
        let second = encode("t", "x", &options).unwrap();
        let uuid_of = |line: &str| line.split(',').nth(1).unwrap().to_string();
        assert_ne!(uuid_of(&first[0]), uuid_of(&second[0]));
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        assert!(encode("t", "hi", &with_uuid(0, "cafe0001")).is_err());
    }

    #[test]
    fn wire_breaking_fields_are_rejected() {
        let options = EncodeOptions::default();
        assert!(encode("", "hi", &options).is_err());
        assert!(encode("a,b", "hi", &options).is_err());
        assert!(encode("t", "hi", &with_uuid(2, "bad,uuid")).is_err());
        assert!(encode("t", "hi", &with_uuid(2, "bad\nuuid")).is_err());
    }

    #[test]
    fn binary_payloads_hex_encode_lowercase() {
        let payload: &[u8] = &[0xde, 0xad, 0xbe, 0xef];
        let lines = encode("image", payload, &with_uuid(1000, "cafe0001")).unwrap();
        assert_eq!(lines, vec!["RICHLOG:image,cafe0001,1,1,deadbeef"]);
    }

    #[test]
    fn type_presets_tag_their_payloads() {
        let options = with_uuid(1000, "cafe0001");
        assert!(encode_config("{}", &options).unwrap()[0].starts_with("RICHLOG:config,"));
        assert!(encode_image(&[0u8], &options).unwrap()[0].starts_with("RICHLOG:image,"));
        assert!(encode_command("ls", &options).unwrap()[0].starts_with("RICHLOG:command,"));
    }
}
