use super::Value;

/// A navigation target that was not loaded.
///
/// Only the identity of the target is known. An included navigation is
/// materialized as a full [`Instance`](super::Instance) instead, so callers can
/// tell "not loaded" apart from "loaded".
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    /// Name of the declared target type
    pub ty: String,

    /// Identity value of the target
    pub id: Box<Value>,
}

impl Reference {
    pub fn new(ty: impl Into<String>, id: impl Into<Value>) -> Reference {
        Reference {
            ty: ty.into(),
            id: Box::new(id.into()),
        }
    }
}
