use super::TypeId;
use crate::{
    schema::db::{ColumnId, TableId},
    stmt,
};

/// A mapped property.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,

    /// Type that declares the property; descendants inherit it unchanged
    pub declared_by: TypeId,

    /// Table holding the property's column, or the side table of a primitive
    /// list
    pub table: TableId,

    /// Column holding the value. `None` for primitive lists, whose elements
    /// live in the side table.
    pub column: Option<ColumnId>,

    pub nullable: bool,

    pub kind: PropertyKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    Scalar(stmt::Type),
    Navigation(Navigation),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    pub host: Host,
    pub target: NavigationTarget,

    /// True for collections
    pub many: bool,
}

/// Which side of a relation stores the foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    /// The column lives on the referencing type's table
    Parent,

    /// The column lives on the target's table, or on a primitive list table
    Child,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavigationTarget {
    Type(TypeId),
    Primitive(stmt::Type),
}

impl Property {
    pub fn is_scalar(&self) -> bool {
        matches!(self.kind, PropertyKind::Scalar(_))
    }

    pub fn navigation(&self) -> Option<&Navigation> {
        match &self.kind {
            PropertyKind::Navigation(navigation) => Some(navigation),
            PropertyKind::Scalar(_) => None,
        }
    }

    pub fn is_primitive_list(&self) -> bool {
        matches!(
            self.navigation(),
            Some(Navigation {
                target: NavigationTarget::Primitive(_),
                ..
            })
        )
    }

    /// Target type of an entity navigation.
    pub fn target_type(&self) -> Option<TypeId> {
        match self.navigation()?.target {
            NavigationTarget::Type(target) => Some(target),
            NavigationTarget::Primitive(_) => None,
        }
    }
}
