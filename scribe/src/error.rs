pub type Result<T> = std::result::Result<T, ScribeError>;

/// Struct to represent IO errors.
#[derive(Debug)]
pub struct IoErrorStruct {
    /// The type of IO error.
    error_type: String,

    /// The error message.
    msg: String,
}

/// Struct to represent validation errors.
#[derive(Debug)]
pub struct ValidationErrorStruct {
    /// The error message.
    msg: String,
}

/// Enum to represent different types of scribe errors.
#[derive(Debug)]
pub enum ScribeError {
    IoError(IoErrorStruct),
    ValidationError(ValidationErrorStruct),
    CodecError(richlog::RichLogError),
}

impl ScribeError {
    /// Create a new validation error.
    ///
    /// # Arguments
    /// * `msg` - The error message.
    ///
    /// # Returns
    /// A `ScribeError` instance representing a validation error.
    pub fn validation_error(msg: &str) -> Self {
        ScribeError::ValidationError(ValidationErrorStruct {
            msg: msg.to_string(),
        })
    }
}

impl std::fmt::Display for ScribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScribeError::IoError(io_err) => {
                write!(f, "IO {} Error: {}", io_err.error_type, io_err.msg)
            }
            ScribeError::ValidationError(validation_err) => {
                write!(f, "Validation Error: {}", validation_err.msg)
            }
            ScribeError::CodecError(codec_err) => {
                write!(f, "Codec Error: {}", codec_err)
            }
        }
    }
}

impl std::error::Error for ScribeError {}

impl From<std::io::Error> for ScribeError {
    fn from(error: std::io::Error) -> Self {
        ScribeError::IoError(IoErrorStruct {
            error_type: error.kind().to_string(),
            msg: error.to_string(),
        })
    }
}

impl From<richlog::RichLogError> for ScribeError {
    fn from(error: richlog::RichLogError) -> Self {
        ScribeError::CodecError(error)
    }
}

impl From<serde_json::Error> for ScribeError {
    fn from(error: serde_json::Error) -> Self {
        ScribeError::ValidationError(ValidationErrorStruct {
            msg: error.to_string(),
        })
    }
}
