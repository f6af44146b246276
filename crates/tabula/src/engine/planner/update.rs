use super::{Aliases, Planner};
use crate::engine::{Binding, BindingSource, PartKind, UpdatePart, UpdatePlan};

use indexmap::IndexMap;
use tabula_core::{
    schema::{db::TableId, NavigationTarget, PropertyKind},
    Error, Result,
};
use tabula_sql::stmt::{ColumnRef, Delete, Expr, Placeholder, TableRef, Update};

impl Planner<'_> {
    /// Compiles the statements that write `properties` of an existing object
    /// of `ty`.
    ///
    /// Columns are grouped into one UPDATE per entity table, in chain order.
    /// Each primitive list is replaced: a DELETE of every element, then the
    /// per-element INSERT.
    pub fn update<I>(&self, ty: &str, properties: I) -> Result<UpdatePlan>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mapping = self.schema.ty(ty)?;

        let mut assignments: IndexMap<TableId, Vec<(String, BindingSource)>> = IndexMap::new();
        let mut lists: Vec<TableId> = vec![];
        let mut seen: Vec<String> = vec![];

        for name in properties {
            let name = name.as_ref();

            if name == mapping.identity {
                return Err(Error::configuration(format!(
                    "identity `{ty}.{name}` cannot be updated"
                )));
            }

            if seen.iter().any(|seen| seen == name) {
                return Err(Error::configuration(format!(
                    "`{ty}.{name}` is listed more than once"
                )));
            }
            seen.push(name.to_string());

            let property = self.schema.property(mapping.id, name)?;

            let source = match &property.kind {
                PropertyKind::Scalar(_) => BindingSource::Property(name.to_string()),
                PropertyKind::Navigation(navigation) => match navigation.target {
                    NavigationTarget::Primitive(_) => {
                        lists.push(property.table);
                        continue;
                    }
                    NavigationTarget::Type(_) if !navigation.many => {
                        BindingSource::Reference(name.to_string())
                    }
                    NavigationTarget::Type(target) => {
                        return Err(Error::configuration(format!(
                            "`{ty}.{name}` is stored on `{}` and does not map to a column of `{ty}`",
                            self.schema.ty_by_id(target).name
                        )));
                    }
                },
            };

            let column = property
                .column
                .map(|column| self.schema.column(column).name.clone())
                .ok_or_else(|| {
                    Error::configuration(format!("`{ty}.{name}` does not map to a column"))
                })?;

            assignments
                .entry(property.table)
                .or_default()
                .push((column, source));
        }

        let mut aliases = Aliases::default();
        let mut parts = vec![];

        for table in &mapping.tables {
            if let Some(columns) = assignments.swap_remove(table) {
                parts.push(self.update_entity(*table, columns, &mut aliases));
            }
        }

        for table in lists {
            parts.push(self.delete_list(table, &mut aliases));
            parts.push(self.insert_list_element(table)?);
        }

        for part in &parts {
            log::debug!("planned update for `{ty}`: {}", part.sql);
        }

        Ok(UpdatePlan { parts })
    }

    fn update_entity(
        &self,
        table: TableId,
        columns: Vec<(String, BindingSource)>,
        aliases: &mut Aliases,
    ) -> UpdatePart {
        let table = self.schema.table(table);
        let alias = aliases.next("M");

        let mut assignments = vec![];
        let mut bindings = vec![];

        for (column, source) in columns {
            let param = Placeholder(assignments.len());
            assignments.push((column, param));
            bindings.push(Binding::new(param.name(), source));
        }

        let identity = Placeholder(assignments.len());
        bindings.push(Binding::new(identity.name(), BindingSource::Identity));

        let update = Update {
            table: TableRef::new(&table.name, &alias),
            assignments,
            filter: Expr::eq(ColumnRef::new(&alias, &table.columns[0].name), identity),
        };

        UpdatePart {
            sql: self.serialize(update),
            table: table.id,
            kind: PartKind::Entity,
            bindings,
        }
    }

    fn delete_list(&self, table: TableId, aliases: &mut Aliases) -> UpdatePart {
        let table = self.schema.table(table);
        let alias = aliases.next("S");
        let param = Placeholder(0);

        let delete = Delete {
            table: TableRef::new(&table.name, &alias),
            filter: Expr::eq(ColumnRef::new(&alias, "ParentId"), param),
        };

        UpdatePart {
            sql: self.serialize(delete),
            table: table.id,
            kind: PartKind::ListDelete,
            bindings: vec![Binding::new(param.name(), BindingSource::ListParent)],
        }
    }
}
