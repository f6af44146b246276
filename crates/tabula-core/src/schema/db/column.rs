use super::{TableId, Type};
use crate::{schema::TypeId, stmt};

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Uniquely identifies the column in the schema.
    pub id: ColumnId,

    /// The name of the column in the database.
    pub name: String,

    /// The column type, from Tabula's point of view.
    pub ty: stmt::Type,

    /// The database storage type of the column.
    pub storage_ty: Type,

    /// Whether or not the column is nullable
    pub nullable: bool,

    /// What the column stores
    pub role: ColumnRole,
}

/// What a column stores. Every call site switches over this closed set.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnRole {
    /// The identity of the row's object. Always column 0 of an entity table.
    Identity,

    /// The hierarchy discriminator. Only on the root table of a hierarchy with
    /// more than one member, always column 1.
    Discriminator,

    /// A scalar property
    Property(String),

    /// A parent-hosted navigation: the identity of the referenced object
    Reference(String),

    /// A child-hosted navigation: the identity of the object whose collection
    /// this row belongs to
    ForeignKey { owner: TypeId, property: String },

    /// Primitive list table: identity of the owning object
    ParentId,

    /// Primitive list table: the element
    Value,

    /// Primitive list table: zero-based element position
    Index,
}

#[derive(PartialEq, Eq, Clone, Copy, Hash)]
pub struct ColumnId {
    pub table: TableId,
    pub index: usize,
}

impl ColumnRole {
    /// Name of the mapped property, for property and reference columns.
    pub fn property(&self) -> Option<&str> {
        match self {
            ColumnRole::Property(name) | ColumnRole::Reference(name) => Some(name),
            _ => None,
        }
    }
}

impl From<&Column> for ColumnId {
    fn from(value: &Column) -> Self {
        value.id
    }
}

impl fmt::Debug for ColumnId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ColumnId({}/{})", self.table.0, self.index)
    }
}
