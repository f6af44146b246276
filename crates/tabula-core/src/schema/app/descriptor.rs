use super::PropertyTy;
use crate::{schema::db, stmt};

/// Describes one mapped application type: its name, its parent, and the
/// properties it declares itself. Inherited properties are not repeated.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    pub name: String,

    /// Name of the parent type, `None` for the root of a hierarchy
    pub parent: Option<String>,

    pub properties: Vec<PropertyDescriptor>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub name: String,
    pub ty: PropertyTy,
    pub nullable: bool,

    /// Storage type override for scalar columns
    pub storage_ty: Option<db::Type>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>) -> TypeDescriptor {
        TypeDescriptor {
            name: name.into(),
            parent: None,
            properties: vec![],
        }
    }

    pub fn extends(mut self, parent: impl Into<String>) -> TypeDescriptor {
        self.parent = Some(parent.into());
        self
    }

    pub fn property(mut self, property: PropertyDescriptor) -> TypeDescriptor {
        self.properties.push(property);
        self
    }

    pub fn scalar(self, name: impl Into<String>, ty: stmt::Type) -> TypeDescriptor {
        self.property(PropertyDescriptor::new(name, PropertyTy::Scalar(ty)))
    }

    pub fn reference(self, name: impl Into<String>, target: impl Into<String>) -> TypeDescriptor {
        self.property(PropertyDescriptor::new(name, PropertyTy::reference(target)))
    }

    /// Declares a primitive list property.
    pub fn list(self, name: impl Into<String>, item: stmt::Type) -> TypeDescriptor {
        self.property(PropertyDescriptor::new(
            name,
            PropertyTy::list(PropertyTy::Scalar(item)),
        ))
    }

    /// Declares a collection of another configured type.
    pub fn collection(self, name: impl Into<String>, target: impl Into<String>) -> TypeDescriptor {
        self.property(PropertyDescriptor::new(
            name,
            PropertyTy::list(PropertyTy::reference(target)),
        ))
    }

    pub fn find(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|property| property.name == name)
    }
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<String>, ty: impl Into<PropertyTy>) -> PropertyDescriptor {
        PropertyDescriptor {
            name: name.into(),
            ty: ty.into(),
            nullable: false,
            storage_ty: None,
        }
    }

    pub fn nullable(mut self) -> PropertyDescriptor {
        self.nullable = true;
        self
    }

    pub fn storage_ty(mut self, ty: db::Type) -> PropertyDescriptor {
        self.storage_ty = Some(ty);
        self
    }
}
