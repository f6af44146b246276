use super::{BuildSchema, TypeState};
use crate::{
    schema::{
        app::PropertyDescriptor,
        db::{self, ColumnRole, Table, TableId, TableKind},
        TypeId,
    },
    stmt, Error, Result,
};

use indexmap::IndexMap;

impl BuildSchema<'_> {
    /// Creates one entity table per configured type, holding the identity
    /// column and, on polymorphic roots, the discriminator.
    pub(super) fn build_entity_tables(&mut self) -> Result<()> {
        let identities: Vec<String> = self
            .entries
            .iter()
            .map(|entry| {
                entry
                    .identity
                    .clone()
                    .unwrap_or_else(|| self.config.default_identity.clone())
            })
            .collect();

        for (index, entry) in self.entries.iter().enumerate() {
            let id = TypeId(index);
            let root = self.roots[index];
            let identity = &identities[index];

            if identities[root.0] != *identity {
                return Err(Error::configuration(format!(
                    "type `{}` uses identity `{}` but its root `{}` uses `{}`",
                    entry.name(),
                    identity,
                    self.entries[root.0].name(),
                    identities[root.0]
                )));
            }

            let descriptor = self.find_inherited(id, identity).ok_or_else(|| {
                Error::configuration(format!(
                    "type `{}` has no identity property `{}`",
                    entry.name(),
                    identity
                ))
            })?;

            let ty = descriptor.ty.as_scalar().ok_or_else(|| {
                Error::configuration(format!(
                    "identity `{}` of type `{}` is not a scalar",
                    identity,
                    entry.name()
                ))
            })?;

            let table_id = TableId(self.tables.len());
            let mut table = Table::new(
                table_id,
                entry.name().to_string(),
                TableKind::Entity { owner: id },
            );

            table.push_column(
                identity.clone(),
                ty,
                db::Type::from_app(ty, descriptor.storage_ty.as_ref()),
                false,
                ColumnRole::Identity,
            )?;

            if root == id && self.hierarchy_size(root) > 1 {
                table.push_column(
                    self.config.default_discriminator.clone(),
                    stmt::Type::I32,
                    db::Type::Int,
                    false,
                    ColumnRole::Discriminator,
                )?;
            }

            self.tables.push(table);
            self.types.push(TypeState {
                name: entry.name().to_string(),
                identity: identity.clone(),
                table: table_id,
                properties: IndexMap::new(),
                list_tables: vec![],
            });
        }

        Ok(())
    }

    /// Finds a property declared by the type or its nearest ancestor that
    /// declares it.
    fn find_inherited(&self, ty: TypeId, name: &str) -> Option<&PropertyDescriptor> {
        let mut current = Some(ty);

        while let Some(id) = current {
            if let Some(property) = self.entries[id.0].descriptor.find(name) {
                return Some(property);
            }
            current = self.parents[id.0];
        }

        None
    }
}
