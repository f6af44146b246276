use crate::stmt;

/// The semantic type of a declared property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyTy {
    /// A single scalar value
    Scalar(stmt::Type),

    /// A single reference to another configured type, by name
    Reference(String),

    /// A collection. `List(Scalar)` is a primitive list and `List(Reference)`
    /// a collection of another configured type.
    List(Box<PropertyTy>),
}

impl PropertyTy {
    pub fn reference(target: impl Into<String>) -> PropertyTy {
        PropertyTy::Reference(target.into())
    }

    pub fn list(item: PropertyTy) -> PropertyTy {
        PropertyTy::List(Box::new(item))
    }

    pub fn as_scalar(&self) -> Option<stmt::Type> {
        match self {
            PropertyTy::Scalar(ty) => Some(*ty),
            _ => None,
        }
    }
}

impl From<stmt::Type> for PropertyTy {
    fn from(value: stmt::Type) -> Self {
        PropertyTy::Scalar(value)
    }
}
