use super::{Hierarchy, Property};
use crate::schema::db::TableId;

use indexmap::IndexMap;
use std::{fmt, sync::Arc};

/// The resolved mapping of one configured type.
#[derive(Debug, Clone)]
pub struct TypeMapping {
    /// Uniquely identifies the type within the schema
    pub id: TypeId,

    pub name: String,

    pub parent: Option<TypeId>,

    /// Direct descendants, in configuration order
    pub children: Vec<TypeId>,

    /// Root of the type's hierarchy (the type itself for a root)
    pub root: TypeId,

    /// Name of the identity property
    pub identity: String,

    /// 1-based position of the type in its hierarchy
    pub discriminator: i32,

    /// Entity table holding the columns this type declares
    pub table: TableId,

    /// Entity tables of the inheritance chain, root first, ending with
    /// `table`
    pub tables: Vec<TableId>,

    /// Primitive list tables, inherited ones first
    pub list_tables: Vec<TableId>,

    /// Every mapped property except the identity, inherited ones first
    pub properties: IndexMap<String, Property>,

    /// The inheritance tree the type belongs to, shared by all its members
    pub hierarchy: Arc<Hierarchy>,
}

/// Uniquely identifies a type in the schema
#[derive(PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct TypeId(pub usize);

impl TypeMapping {
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Properties this type declares itself.
    pub fn declared_properties(&self) -> impl Iterator<Item = &Property> + '_ {
        self.properties
            .values()
            .filter(move |property| property.declared_by == self.id)
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TypeId({})", self.0)
    }
}
