//! Error types and conversions shared across the richlog crate.
//!
//! This module defines structured error kinds for the two failure surfaces of
//! the codec and provides conversions from common low-level errors into the
//! `RichLogError` enum so they can be propagated in a unified way.
//!
//! ## Failure surfaces
//!
//! **Encoding** is a single request-response operation, so its failures are
//! returned synchronously to the caller:
//!
//! - `ValidationError`: a zero chunk size, an empty or comma/newline-bearing
//!   `type`/`uuid` field (either would corrupt the wire grammar), or a chunk
//!   count that does not fit the u32 wire width.
//!
//! **Reassembly** consumes a log stream that may contain corrupted or
//! conflicting lines, so its failures are local to one line or one assembly
//! attempt and are reported to the log sink instead of propagating:
//!
//! - `TypeMismatch` / `TotalMismatch`: a later chunk for a known uuid
//!   disagrees with the first-seen metadata; the line is dropped.
//! - `MissingChunk`: an expected index has no recorded data at assembly time;
//!   the buffer is left live.
//! - `MalformedHex`: odd-length or non-hex payload data where even-length hex
//!   is expected; never silently truncated or zero-padded.
//! - `ConverterError`: decoded bytes could not be converted onward (for
//!   example to UTF-8 text).
//!
//! Lines that simply do not match the wire grammar are not errors at all and
//! are expressed as `None` by the recognizer.

/// Result alias using the crate's `RichLogError` as the error type.
pub type Result<T> = std::result::Result<T, RichLogError>;

/// Container describing a type-tag disagreement for one uuid.
#[derive(Debug)]
pub struct TypeMismatchStruct {
    uuid: String,
    expected: String,
    found: String,
}

impl TypeMismatchStruct {
    /// Create a new `TypeMismatchStruct` from the first-seen and offending tags.
    pub fn new(uuid: &str, expected: &str, found: &str) -> Self {
        Self {
            uuid: uuid.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

/// Container describing a chunk-count disagreement for one uuid.
#[derive(Debug)]
pub struct TotalMismatchStruct {
    uuid: String,
    expected: u32,
    found: u32,
}

impl TotalMismatchStruct {
    /// Create a new `TotalMismatchStruct` from the first-seen and offending totals.
    pub fn new(uuid: &str, expected: u32, found: u32) -> Self {
        Self {
            uuid: uuid.to_string(),
            expected,
            found,
        }
    }
}

/// Container describing a chunk index that was expected but never recorded.
#[derive(Debug)]
pub struct MissingChunkStruct {
    uuid: String,
    index: u32,
}

impl MissingChunkStruct {
    /// Create a new `MissingChunkStruct` for the absent index.
    pub fn new(uuid: &str, index: u32) -> Self {
        Self {
            uuid: uuid.to_string(),
            index,
        }
    }
}

/// Container describing hex payload data that could not be decoded.
#[derive(Debug)]
pub struct MalformedHexStruct {
    msg: String,
}

impl MalformedHexStruct {
    /// Create a new `MalformedHexStruct` with the underlying decoder message.
    pub fn new(msg: String) -> Self {
        Self { msg }
    }
}

/// Container describing a conversion error and its origin.
///
/// `from` indicates the conversion attempted (for example "utf8") and `msg`
/// is the underlying error message.
#[derive(Debug)]
pub struct ConverterErrorStruct {
    from: String,
    msg: String,
}

impl ConverterErrorStruct {
    /// Create a new `ConverterErrorStruct` with the originating converter name and message.
    pub fn new(from: &str, msg: String) -> Self {
        Self {
            from: from.to_string(),
            msg,
        }
    }
}

/// Container describing an encoder-side input validation failure.
#[derive(Debug)]
pub struct ValidationErrorStruct {
    msg: String,
}

/// Unified error enum for the richlog codec.
#[derive(Debug)]
pub enum RichLogError {
    TypeMismatch(TypeMismatchStruct),
    TotalMismatch(TotalMismatchStruct),
    MissingChunk(MissingChunkStruct),
    MalformedHex(MalformedHexStruct),
    ConverterError(ConverterErrorStruct),
    ValidationError(ValidationErrorStruct),
}

impl RichLogError {
    /// Create a new validation error.
    ///
    /// # Arguments
    /// * `msg` - The error message.
    ///
    /// # Returns
    /// A `RichLogError` instance representing an encoder input validation error.
    pub fn validation_error(msg: &str) -> Self {
        RichLogError::ValidationError(ValidationErrorStruct {
            msg: msg.to_string(),
        })
    }

    /// Create a new type mismatch error for `uuid`.
    pub fn type_mismatch(uuid: &str, expected: &str, found: &str) -> Self {
        RichLogError::TypeMismatch(TypeMismatchStruct::new(uuid, expected, found))
    }

    /// Create a new total mismatch error for `uuid`.
    pub fn total_mismatch(uuid: &str, expected: u32, found: u32) -> Self {
        RichLogError::TotalMismatch(TotalMismatchStruct::new(uuid, expected, found))
    }

    /// Create a new missing chunk error for `uuid`.
    pub fn missing_chunk(uuid: &str, index: u32) -> Self {
        RichLogError::MissingChunk(MissingChunkStruct::new(uuid, index))
    }
}

impl std::fmt::Display for RichLogError {
    /// Format a human-readable description for the error.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeMismatch(mismatch) => write!(
                f,
                "Inconsistent type for uuid {}: first seen \"{}\", got \"{}\"",
                mismatch.uuid, mismatch.expected, mismatch.found
            ),
            Self::TotalMismatch(mismatch) => write!(
                f,
                "Inconsistent chunk total for uuid {}: first seen {}, got {}",
                mismatch.uuid, mismatch.expected, mismatch.found
            ),
            Self::MissingChunk(missing) => write!(
                f,
                "Missing chunk {} for uuid {}",
                missing.index, missing.uuid
            ),
            Self::MalformedHex(malformed) => {
                write!(f, "Error decoding hex. Msg: {}", malformed.msg)
            }
            Self::ConverterError(converter_error) => write!(
                f,
                "Error converting {}. Msg: {}",
                converter_error.from, converter_error.msg
            ),
            Self::ValidationError(validation_err) => {
                write!(f, "Validation Error: {}", validation_err.msg)
            }
        }
    }
}

impl std::error::Error for RichLogError {}

/// Convert a hex decoding error into the codec error type.
impl From<hex::FromHexError> for RichLogError {
    fn from(value: hex::FromHexError) -> Self {
        Self::MalformedHex(MalformedHexStruct::new(format!("{}", value)))
    }
}

/// Convert a UTF-8 conversion error into the codec error type.
impl From<std::string::FromUtf8Error> for RichLogError {
    fn from(value: std::string::FromUtf8Error) -> Self {
        Self::ConverterError(ConverterErrorStruct::new("utf8", format!("{}", value)))
    }
}
