use super::Error;

/// Error when a row stream cannot be turned back into objects.
///
/// The rows are well formed but disagree with the select shape: a
/// discriminator with no matching type, a NULL in a non-nullable column, or
/// several rows for a singular navigation.
#[derive(Debug)]
pub(super) struct DecodeError {
    message: Box<str>,
}

impl std::error::Error for DecodeError {}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "decode error: {}", self.message)
    }
}

impl Error {
    /// Creates a decode error.
    pub fn decode(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Decode(DecodeError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a decode error.
    pub fn is_decode(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Decode(_))
    }
}
