pub type Result<T> = std::result::Result<T, SiftError>;

/// Struct to represent IO errors.
#[derive(Debug)]
pub struct IoErrorStruct {
    /// The type of IO error.
    error_type: String,

    /// The error message.
    msg: String,
}

/// Enum to represent different types of sift errors.
#[derive(Debug)]
pub enum SiftError {
    IoError(IoErrorStruct),
    CodecError(richlog::RichLogError),
}

impl std::fmt::Display for SiftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SiftError::IoError(io_err) => {
                write!(f, "IO {} Error: {}", io_err.error_type, io_err.msg)
            }
            SiftError::CodecError(codec_err) => {
                write!(f, "Codec Error: {}", codec_err)
            }
        }
    }
}

impl std::error::Error for SiftError {}

impl From<std::io::Error> for SiftError {
    fn from(error: std::io::Error) -> Self {
        SiftError::IoError(IoErrorStruct {
            error_type: error.kind().to_string(),
            msg: error.to_string(),
        })
    }
}

impl From<richlog::RichLogError> for SiftError {
    fn from(error: richlog::RichLogError) -> Self {
        SiftError::CodecError(error)
    }
}
