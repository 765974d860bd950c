use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid VNI data: {0}")]
    InvalidFormat(String),
    #[error("unexpected end of input: wanted {wanted} bytes, {remaining} remaining")]
    UnexpectedEndOfInput { wanted: usize, remaining: usize },
    #[error("{0} not supported")]
    UnsupportedFeature(&'static str),
    #[error("invalid text: {0}")]
    Text(#[from] std::str::Utf8Error),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<parsing::Error> for DecodeError {
    fn from(err: parsing::Error) -> Self {
        match err {
            parsing::Error::UnexpectedEndOfInput { wanted, remaining } => {
                Self::UnexpectedEndOfInput { wanted, remaining }
            }
            parsing::Error::MagicCheckFailed => Self::InvalidFormat("missing VPIN header".into()),
            parsing::Error::InterpretStrFailed(err) => Self::Text(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;

/// Converts a signed on-disk byte length into a buffer size.
pub(crate) fn byte_len(len: i16, what: &str) -> Result<usize> {
    usize::try_from(len).map_err(|_| DecodeError::InvalidFormat(format!("negative {what} length {len}")))
}

/// Converts a signed on-disk element count; negative counts mean no elements.
pub(crate) fn count(n: i16) -> usize {
    usize::try_from(n).unwrap_or(0)
}
