use super::{Instance, Reference, Type};
use crate::{Error, Result};

use uuid::Uuid;

/// A runtime value: a property, a column, or a parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    I32(i32),
    I64(i64),
    F64(f64),
    String(String),
    Uuid(Uuid),
    Bytes(Vec<u8>),

    /// A primitive list, or a collection of instances
    List(Vec<Value>),

    /// A loaded object
    Instance(Box<Instance>),

    /// An object that was not loaded; only its identity is known
    Reference(Reference),
}

impl Value {
    pub fn list(items: impl IntoIterator<Item = impl Into<Value>>) -> Value {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The scalar type of this value, if it is a non-null scalar.
    pub fn ty(&self) -> Option<Type> {
        Some(match self {
            Value::Bool(_) => Type::Bool,
            Value::I32(_) => Type::I32,
            Value::I64(_) => Type::I64,
            Value::F64(_) => Type::F64,
            Value::String(_) => Type::String,
            Value::Uuid(_) => Type::Uuid,
            Value::Bytes(_) => Type::Bytes,
            _ => return None,
        })
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::List(_) => "List",
            Value::Instance(_) => "Instance",
            Value::Reference(_) => "Reference",
            scalar => scalar.ty().map(|ty| ty.name()).unwrap_or("Unknown"),
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Value::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Value::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Converts a nullable value, mapping `Null` to `None`.
    pub fn into_option<T>(self) -> Result<Option<T>>
    where
        T: TryFrom<Value, Error = Error>,
    {
        match self {
            Value::Null => Ok(None),
            value => T::try_from(value).map(Some),
        }
    }

    /// Converts a list value item by item.
    pub fn into_list<T>(self) -> Result<Vec<T>>
    where
        T: TryFrom<Value, Error = Error>,
    {
        match self {
            Value::List(items) => items.into_iter().map(T::try_from).collect(),
            value => Err(Error::type_conversion(value, "List")),
        }
    }

    pub fn into_instance(self) -> Result<Instance> {
        match self {
            Value::Instance(instance) => Ok(*instance),
            value => Err(Error::type_conversion(value, "Instance")),
        }
    }
}

macro_rules! impl_scalar {
    (
        $(
            $variant:ident($ty:ty) $name:literal
        )*
    ) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }

            impl TryFrom<Value> for $ty {
                type Error = Error;

                fn try_from(value: Value) -> Result<Self> {
                    match value {
                        Value::$variant(value) => Ok(value),
                        value => Err(Error::type_conversion(value, $name)),
                    }
                }
            }
        )*
    };
}

impl_scalar! {
    Bool(bool) "bool"
    I32(i32) "i32"
    I64(i64) "i64"
    F64(f64) "f64"
    String(String) "String"
    Uuid(Uuid) "Uuid"
    Bytes(Vec<u8>) "Vec<u8>"
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Instance> for Value {
    fn from(value: Instance) -> Self {
        Value::Instance(Box::new(value))
    }
}

impl From<Reference> for Value {
    fn from(value: Reference) -> Self {
        Value::Reference(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Value::Null,
        }
    }
}
