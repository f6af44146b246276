use super::Value;
use crate::{Error, Result};

use indexmap::IndexMap;

/// A dynamically typed object: the concrete type name plus its loaded
/// property values.
///
/// A property that was not loaded is absent. A property that was loaded and
/// holds nothing is present with [`Value::Null`] or an empty list.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    /// Concrete type of the object
    pub ty: String,

    /// Property values, in the order they were set
    pub fields: IndexMap<String, Value>,
}

impl Instance {
    pub fn new(ty: impl Into<String>) -> Instance {
        Instance {
            ty: ty.into(),
            fields: IndexMap::new(),
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Instance {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns the property value, failing if it was never set.
    pub fn expect_field(&self, name: &str) -> Result<&Value> {
        self.fields.get(name).ok_or_else(|| {
            Error::configuration(format!(
                "instance of `{}` has no value for `{}`",
                self.ty, name
            ))
        })
    }

    pub fn take(&mut self, name: &str) -> Option<Value> {
        self.fields.shift_remove(name)
    }
}
