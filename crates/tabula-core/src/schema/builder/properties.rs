use super::BuildSchema;
use crate::{
    schema::{
        app::{PropertyDescriptor, PropertyTy},
        db::{self, Column, ColumnRole, Table, TableId, TableKind},
        mapping::{Host, Navigation, NavigationTarget, Property, PropertyKind},
        TypeConfig, TypeId,
    },
    stmt, Error, Result,
};

impl BuildSchema<'_> {
    /// Resolves the selected properties of every type, in configuration
    /// order.
    pub(super) fn build_properties(&mut self) -> Result<()> {
        let entries = self.entries;

        for (index, entry) in entries.iter().enumerate() {
            let id = TypeId(index);

            for descriptor in self.selected_properties(id, entry)? {
                if self.types[index].properties.contains_key(&descriptor.name) {
                    return Err(Error::configuration(format!(
                        "type `{}` declares `{}` more than once",
                        entry.name(),
                        descriptor.name
                    )));
                }

                let property = self.build_property(id, entry, descriptor)?;
                self.types[index]
                    .properties
                    .insert(descriptor.name.clone(), property);
            }

            for name in entry.list_order.keys() {
                let is_list = self.types[index]
                    .properties
                    .get(name)
                    .is_some_and(Property::is_primitive_list);

                if !is_list {
                    return Err(Error::configuration(format!(
                        "list order set for `{}.{}`, which is not a mapped primitive list",
                        entry.name(),
                        name
                    )));
                }
            }
        }

        Ok(())
    }

    fn selected_properties<'e>(
        &self,
        id: TypeId,
        entry: &'e TypeConfig,
    ) -> Result<Vec<&'e PropertyDescriptor>> {
        let identity = &self.types[id.0].identity;
        let descriptor = &entry.descriptor;

        match &entry.properties {
            None => Ok(descriptor
                .properties
                .iter()
                .filter(|property| property.name != *identity)
                .collect()),
            Some(names) => names
                .iter()
                .filter(|name| *name != identity)
                .map(|name| {
                    descriptor.find(name).ok_or_else(|| {
                        Error::configuration(format!(
                            "type `{}` does not declare property `{}`",
                            entry.name(),
                            name
                        ))
                    })
                })
                .collect(),
        }
    }

    fn build_property(
        &mut self,
        owner: TypeId,
        entry: &TypeConfig,
        descriptor: &PropertyDescriptor,
    ) -> Result<Property> {
        let table = self.types[owner.0].table;
        let name = &descriptor.name;

        match &descriptor.ty {
            PropertyTy::Scalar(ty) => {
                let column = self.tables[table.0].push_column(
                    name.clone(),
                    *ty,
                    db::Type::from_app(*ty, descriptor.storage_ty.as_ref()),
                    descriptor.nullable,
                    ColumnRole::Property(name.clone()),
                )?;

                Ok(Property {
                    name: name.clone(),
                    declared_by: owner,
                    table,
                    column: Some(column),
                    nullable: descriptor.nullable,
                    kind: PropertyKind::Scalar(*ty),
                })
            }
            PropertyTy::Reference(target) => {
                let target = self.navigation_target(entry, name, target)?;
                let identity = self.identity_column(target).clone();

                let column = self.tables[table.0].push_column(
                    name.clone(),
                    identity.ty,
                    identity.storage_ty,
                    true,
                    ColumnRole::Reference(name.clone()),
                )?;

                Ok(Property {
                    name: name.clone(),
                    declared_by: owner,
                    table,
                    column: Some(column),
                    nullable: true,
                    kind: PropertyKind::Navigation(Navigation {
                        host: Host::Parent,
                        target: NavigationTarget::Type(target),
                        many: false,
                    }),
                })
            }
            PropertyTy::List(item) => match &**item {
                PropertyTy::Scalar(ty) => self.build_primitive_list(owner, entry, descriptor, *ty),
                PropertyTy::Reference(target) => {
                    let target = self.navigation_target(entry, name, target)?;
                    let identity = self.identity_column(owner).clone();
                    let target_table = self.types[target.0].table;

                    let column = self.tables[target_table.0].push_column(
                        format!("{}_{}", entry.name(), name),
                        identity.ty,
                        identity.storage_ty,
                        true,
                        ColumnRole::ForeignKey {
                            owner,
                            property: name.clone(),
                        },
                    )?;

                    Ok(Property {
                        name: name.clone(),
                        declared_by: owner,
                        table: target_table,
                        column: Some(column),
                        nullable: true,
                        kind: PropertyKind::Navigation(Navigation {
                            host: Host::Child,
                            target: NavigationTarget::Type(target),
                            many: true,
                        }),
                    })
                }
                PropertyTy::List(_) => Err(Error::not_supported(format!(
                    "nested collection `{}.{}`",
                    entry.name(),
                    name
                ))),
            },
        }
    }

    fn build_primitive_list(
        &mut self,
        owner: TypeId,
        entry: &TypeConfig,
        descriptor: &PropertyDescriptor,
        ty: stmt::Type,
    ) -> Result<Property> {
        let name = &descriptor.name;
        let maintain_order = entry
            .list_order
            .get(name)
            .copied()
            .unwrap_or(self.config.maintain_order);

        let owner_table = self.types[owner.0].table;
        let identity = self.identity_column(owner).clone();

        let id = TableId(self.tables.len());
        let mut table = Table::new(
            id,
            format!("{}_{}", self.tables[owner_table.0].name, name),
            TableKind::PrimitiveList {
                owner,
                property: name.clone(),
                maintain_order,
            },
        );

        table.push_column(
            "ParentId",
            identity.ty,
            identity.storage_ty,
            false,
            ColumnRole::ParentId,
        )?;
        table.push_column(
            "Value",
            ty,
            db::Type::from_app(ty, descriptor.storage_ty.as_ref()),
            false,
            ColumnRole::Value,
        )?;
        if maintain_order {
            table.push_column(
                "Index",
                stmt::Type::I64,
                db::Type::BigInt,
                false,
                ColumnRole::Index,
            )?;
        }

        self.tables.push(table);
        self.types[owner.0].list_tables.push(id);

        Ok(Property {
            name: name.clone(),
            declared_by: owner,
            table: id,
            column: None,
            nullable: false,
            kind: PropertyKind::Navigation(Navigation {
                host: Host::Child,
                target: NavigationTarget::Primitive(ty),
                many: true,
            }),
        })
    }

    fn navigation_target(
        &self,
        entry: &TypeConfig,
        property: &str,
        target: &str,
    ) -> Result<TypeId> {
        self.lookup(target).map_err(|_| {
            Error::configuration(format!(
                "`{}.{}` refers to type `{}`, which is not configured",
                entry.name(),
                property,
                target
            ))
        })
    }

    fn identity_column(&self, ty: TypeId) -> &Column {
        &self.tables[self.types[ty.0].table.0].columns[0]
    }
}
