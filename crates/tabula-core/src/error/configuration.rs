use super::Error;

/// Error when the mapping configuration, or a request made against it, is
/// invalid.
///
/// This occurs when:
/// - A filter, include, or update path names a property the type does not have
/// - Two properties or columns end up with the same name
/// - A type has no identity property
/// - A navigation property points at a type that was never configured
///
/// These errors are raised while the schema or a plan is being built, before
/// any statement reaches the database.
#[derive(Debug)]
pub(super) struct ConfigurationError {
    message: Box<str>,
}

impl std::error::Error for ConfigurationError {}

impl core::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "configuration error: {}", self.message)
    }
}

impl Error {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Configuration(ConfigurationError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Configuration(_))
    }
}
