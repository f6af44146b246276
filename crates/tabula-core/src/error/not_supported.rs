use super::Error;

/// Error when a mapping combination is valid but not implemented.
#[derive(Debug)]
pub(super) struct NotSupportedError {
    message: Box<str>,
}

impl std::error::Error for NotSupportedError {}

impl core::fmt::Display for NotSupportedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "not supported: {}", self.message)
    }
}

impl Error {
    /// Creates a not-supported error.
    ///
    /// Use this for gaps in what the mapper can express, such as nested
    /// primitive collections. Mistakes in user configuration are
    /// [`Error::configuration`] errors instead.
    pub fn not_supported(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::NotSupported(NotSupportedError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a not-supported error.
    pub fn is_not_supported(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::NotSupported(_))
    }
}
