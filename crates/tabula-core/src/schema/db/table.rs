use super::{Column, ColumnId, ColumnRole, Type};
use crate::{schema::TypeId, stmt, Error, Result};

use std::fmt;

/// A database table
#[derive(Debug, Clone)]
pub struct Table {
    /// Uniquely identifies a table
    pub id: TableId,

    /// Name of the table
    pub name: String,

    /// The table's columns, in physical order
    pub columns: Vec<Column>,

    pub kind: TableKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableKind {
    /// Stores the columns one type declares. Column 0 is the identity.
    Entity { owner: TypeId },

    /// Side table holding the elements of one primitive list property
    PrimitiveList {
        owner: TypeId,
        property: String,
        maintain_order: bool,
    },
}

/// Uniquely identifies a table
#[derive(PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct TableId(pub usize);

impl Table {
    pub(crate) fn new(id: TableId, name: String, kind: TableKind) -> Self {
        Self {
            id,
            name,
            columns: vec![],
            kind,
        }
    }

    pub fn column(&self, id: impl Into<ColumnId>) -> &Column {
        &self.columns[id.into().index]
    }

    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn is_entity(&self) -> bool {
        matches!(self.kind, TableKind::Entity { .. })
    }

    pub fn owner(&self) -> TypeId {
        match self.kind {
            TableKind::Entity { owner } | TableKind::PrimitiveList { owner, .. } => owner,
        }
    }

    /// The identity column of an entity table.
    pub fn identity(&self) -> Option<&Column> {
        self.columns
            .first()
            .filter(|column| column.role == ColumnRole::Identity)
    }

    pub fn discriminator(&self) -> Option<&Column> {
        self.columns
            .get(1)
            .filter(|column| column.role == ColumnRole::Discriminator)
    }

    /// The first column with the given role.
    pub fn column_with_role(&self, role: &ColumnRole) -> Option<&Column> {
        self.columns.iter().find(|column| column.role == *role)
    }

    pub fn maintains_order(&self) -> bool {
        matches!(
            self.kind,
            TableKind::PrimitiveList {
                maintain_order: true,
                ..
            }
        )
    }

    pub(crate) fn push_column(
        &mut self,
        name: impl Into<String>,
        ty: stmt::Type,
        storage_ty: Type,
        nullable: bool,
        role: ColumnRole,
    ) -> Result<ColumnId> {
        let name = name.into();

        if self.column_by_name(&name).is_some() {
            return Err(Error::configuration(format!(
                "duplicate column `{}` in table `{}`",
                name, self.name
            )));
        }

        let id = ColumnId {
            table: self.id,
            index: self.columns.len(),
        };

        self.columns.push(Column {
            id,
            name,
            ty,
            storage_ty,
            nullable,
            role,
        });

        Ok(id)
    }
}

impl fmt::Debug for TableId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TableId({})", self.0)
    }
}
