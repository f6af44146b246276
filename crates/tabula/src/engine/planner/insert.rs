use super::Planner;
use crate::engine::{Binding, BindingSource, PartKind, UpdatePart, UpdatePlan};

use tabula_core::{
    err,
    schema::db::{ColumnRole, TableId},
    Result,
};
use tabula_sql::stmt::{Insert, Placeholder};

impl Planner<'_> {
    /// Compiles the statements that insert one object of `ty`.
    ///
    /// One INSERT per entity table of the inheritance chain, root first,
    /// followed by one repeatable INSERT per primitive list.
    pub fn insert(&self, ty: &str) -> Result<UpdatePlan> {
        let mapping = self.schema.ty(ty)?;
        let mut parts = vec![];

        for &table in &mapping.tables {
            parts.push(self.insert_entity(table, mapping.discriminator)?);
        }

        for &table in &mapping.list_tables {
            parts.push(self.insert_list_element(table)?);
        }

        for part in &parts {
            log::debug!("planned insert for `{ty}`: {}", part.sql);
        }

        Ok(UpdatePlan { parts })
    }

    fn insert_entity(&self, table: TableId, discriminator: i32) -> Result<UpdatePart> {
        let table = self.schema.table(table);

        let mut insert = Insert {
            table: table.name.clone(),
            columns: vec![],
            values: vec![],
        };
        let mut bindings = vec![];

        for column in &table.columns {
            let source = match &column.role {
                ColumnRole::Identity => BindingSource::Identity,
                ColumnRole::Discriminator => BindingSource::Discriminator(discriminator),
                ColumnRole::Property(name) => BindingSource::Property(name.clone()),
                ColumnRole::Reference(name) => BindingSource::Reference(name.clone()),
                ColumnRole::ForeignKey { owner, property } => BindingSource::HostIdentity {
                    owner: self.schema.ty_by_id(*owner).name.clone(),
                    property: property.clone(),
                },
                ColumnRole::ParentId | ColumnRole::Value | ColumnRole::Index => {
                    return Err(err!(
                        "entity table `{}` has list column `{}`",
                        table.name,
                        column.name
                    ));
                }
            };

            let param = Placeholder(insert.values.len());
            insert.columns.push(column.name.clone());
            insert.values.push(param);
            bindings.push(Binding::new(param.name(), source));
        }

        Ok(UpdatePart {
            sql: self.serialize(insert),
            table: table.id,
            kind: PartKind::Entity,
            bindings,
        })
    }

    /// `INSERT INTO [Owner_Prop] ([ParentId], [Value], [Index]) VALUES(...)`,
    /// executed once per element.
    pub(super) fn insert_list_element(&self, table: TableId) -> Result<UpdatePart> {
        let table = self.schema.table(table);

        let mut insert = Insert {
            table: table.name.clone(),
            columns: vec![],
            values: vec![],
        };
        let mut bindings = vec![];

        for column in &table.columns {
            let source = match column.role {
                ColumnRole::ParentId => BindingSource::ListParent,
                ColumnRole::Value => BindingSource::ListValue,
                ColumnRole::Index => BindingSource::ListIndex,
                _ => {
                    return Err(err!(
                        "list table `{}` has entity column `{}`",
                        table.name,
                        column.name
                    ));
                }
            };

            let param = Placeholder(insert.values.len());
            insert.columns.push(column.name.clone());
            insert.values.push(param);
            bindings.push(Binding::new(param.name(), source));
        }

        Ok(UpdatePart {
            sql: self.serialize(insert),
            table: table.id,
            kind: PartKind::ListInsert,
            bindings,
        })
    }
}
