pub mod app;

mod builder;
pub use builder::Builder;

mod config;
pub use config::{MappingConfig, TypeConfig};

pub mod db;
use db::{Column, ColumnId, Table, TableId};

pub mod mapping;
pub use mapping::{
    Hierarchy, Host, Navigation, NavigationTarget, Property, PropertyKind, TypeId, TypeMapping,
};

use crate::{Error, Result};

use indexmap::IndexMap;

/// The resolved mapping of a set of types onto tables.
///
/// Built once by [`Builder`] and read-only afterwards.
#[derive(Debug)]
pub struct Schema {
    types: Vec<TypeMapping>,
    type_lookup: IndexMap<String, TypeId>,
    tables: Vec<Table>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub(crate) fn new(types: Vec<TypeMapping>, tables: Vec<Table>) -> Schema {
        let type_lookup = types.iter().map(|ty| (ty.name.clone(), ty.id)).collect();

        Schema {
            types,
            type_lookup,
            tables,
        }
    }

    /// Looks up a configured type by name.
    pub fn ty(&self, name: &str) -> Result<&TypeMapping> {
        self.type_lookup
            .get(name)
            .map(|id| &self.types[id.0])
            .ok_or_else(|| Error::configuration(format!("type `{name}` is not configured")))
    }

    pub fn ty_by_id(&self, id: TypeId) -> &TypeMapping {
        &self.types[id.0]
    }

    pub fn types(&self) -> impl ExactSizeIterator<Item = &TypeMapping> + '_ {
        self.types.iter()
    }

    pub fn table(&self, id: TableId) -> &Table {
        &self.tables[id.0]
    }

    pub fn tables(&self) -> impl ExactSizeIterator<Item = &Table> + '_ {
        self.tables.iter()
    }

    pub fn column(&self, id: ColumnId) -> &Column {
        &self.tables[id.table.0].columns[id.index]
    }

    /// Looks up a property of a type, inherited ones included.
    pub fn property(&self, ty: TypeId, name: &str) -> Result<&Property> {
        let mapping = self.ty_by_id(ty);

        mapping.property(name).ok_or_else(|| {
            Error::configuration(format!(
                "type `{}` has no property `{}`",
                mapping.name, name
            ))
        })
    }

    /// The inheritance tree `ty` belongs to.
    pub fn hierarchy_of(&self, ty: TypeId) -> &Hierarchy {
        &self.types[ty.0].hierarchy
    }

    /// The identity column of a type's own entity table.
    pub fn identity_column(&self, ty: TypeId) -> &Column {
        &self.table(self.ty_by_id(ty).table).columns[0]
    }

    /// Whether `ty` is `ancestor` or one of its descendants.
    pub fn is_same_or_descendant(&self, ty: TypeId, ancestor: TypeId) -> bool {
        let mut current = Some(ty);

        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.types[id.0].parent;
        }

        false
    }

    /// Searches the descendants of `ty` breadth-first for types that have
    /// `property`, stopping at the first depth where any does.
    pub fn descendants_with(&self, ty: TypeId, property: &str) -> Vec<TypeId> {
        let mut level = self.types[ty.0].children.clone();

        while !level.is_empty() {
            let found: Vec<_> = level
                .iter()
                .copied()
                .filter(|id| self.types[id.0].property(property).is_some())
                .collect();

            if !found.is_empty() {
                return found;
            }

            level = level
                .iter()
                .flat_map(|id| self.types[id.0].children.iter().copied())
                .collect();
        }

        vec![]
    }
}
