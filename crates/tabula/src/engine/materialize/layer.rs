use tabula_core::{
    driver::Cursor,
    err,
    schema::{db::ColumnRole, db::TableId, TypeId},
    stmt::{self, Instance, Reference, Value},
    Error, Result, Schema,
};

/// Decoding instructions for one type or sub-type segment.
#[derive(Debug)]
pub(super) struct Layer {
    pub(super) ty: TypeId,

    /// Ordinal of the identity of the segment's first table; the grouping key
    pub(super) key: usize,
    pub(super) key_ty: stmt::Type,

    /// Name of the identity property
    pub(super) identity: String,

    construct: Construct,
    fillers: Vec<Filler>,

    /// How objects of this layer attach to the enclosing object. `None` for
    /// the root layer.
    pub(super) collect: Option<Collect>,
}

#[derive(Debug)]
pub(super) struct Collect {
    pub(super) property: String,
    pub(super) many: bool,
}

#[derive(Debug)]
enum Construct {
    Concrete(String),

    /// Dispatch on the discriminator at `ordinal`. `members[d - 1]` is the
    /// type for discriminator `d`, `None` when that type is not the
    /// segment's type or one of its descendants.
    Polymorphic {
        ordinal: usize,
        segment_ty: String,
        members: Vec<Option<String>>,
    },
}

/// Copies one column into the instance.
#[derive(Debug)]
enum Filler {
    Scalar {
        ordinal: usize,
        property: String,
        ty: stmt::Type,
        nullable: bool,
    },

    /// A parent-hosted navigation, stored as an unloaded reference
    Reference {
        ordinal: usize,
        property: String,
        target: String,
        ty: stmt::Type,
    },
}

/// Decoding instructions for an included primitive list.
#[derive(Debug, Clone)]
pub(super) struct Expansion {
    pub(super) property: String,
    pub(super) parent: usize,
    pub(super) value: usize,
    pub(super) value_ty: stmt::Type,

    /// Ordinal of the `Index` column when the list keeps its order
    pub(super) index: Option<usize>,
}

impl Layer {
    pub(super) fn compile(
        schema: &Schema,
        ty: TypeId,
        tables: &[TableId],
        offset: &mut usize,
        collect: Option<Collect>,
    ) -> Result<Layer> {
        let mapping = schema.ty_by_id(ty);

        let Some(&first) = tables.first() else {
            return Err(err!("segment for `{}` has no tables", mapping.name));
        };

        let key = *offset;
        let key_ty = schema
            .table(first)
            .identity()
            .map(|column| column.ty)
            .ok_or_else(|| err!("table `{}` has no identity", schema.table(first).name))?;

        let mut construct = Construct::Concrete(mapping.name.clone());
        let mut fillers = vec![];

        for &table in tables {
            let table = schema.table(table);

            for (index, column) in table.columns.iter().enumerate() {
                let ordinal = *offset + index;

                match &column.role {
                    ColumnRole::Identity if table.id == first => fillers.push(Filler::Scalar {
                        ordinal,
                        property: mapping.identity.clone(),
                        ty: column.ty,
                        nullable: false,
                    }),
                    ColumnRole::Discriminator if mapping.hierarchy.is_polymorphic() => {
                        construct = Construct::Polymorphic {
                            ordinal,
                            segment_ty: mapping.name.clone(),
                            members: schema
                                .hierarchy_of(ty)
                                .members
                                .iter()
                                .map(|member| {
                                    schema
                                        .is_same_or_descendant(*member, ty)
                                        .then(|| schema.ty_by_id(*member).name.clone())
                                })
                                .collect(),
                        };
                    }
                    ColumnRole::Property(name) => fillers.push(Filler::Scalar {
                        ordinal,
                        property: name.clone(),
                        ty: column.ty,
                        nullable: column.nullable,
                    }),
                    ColumnRole::Reference(name) => {
                        let target = schema
                            .property(table.owner(), name)?
                            .target_type()
                            .ok_or_else(|| err!("`{name}` is not an entity reference"))?;

                        fillers.push(Filler::Reference {
                            ordinal,
                            property: name.clone(),
                            target: schema.ty_by_id(target).name.clone(),
                            ty: column.ty,
                        });
                    }
                    // Inherited identities repeat the key; foreign keys of
                    // child-hosted collections belong to the owner.
                    ColumnRole::Identity
                    | ColumnRole::Discriminator
                    | ColumnRole::ForeignKey { .. } => {}
                    ColumnRole::ParentId | ColumnRole::Value | ColumnRole::Index => {
                        return Err(err!(
                            "list table `{}` in an object segment",
                            table.name
                        ));
                    }
                }
            }

            *offset += table.columns.len();
        }

        if mapping.hierarchy.is_polymorphic() && matches!(construct, Construct::Concrete(_)) {
            return Err(err!(
                "segment for `{}` does not select its discriminator",
                mapping.name
            ));
        }

        Ok(Layer {
            ty,
            key,
            key_ty,
            identity: mapping.identity.clone(),
            construct,
            fillers,
            collect,
        })
    }

    /// Creates the instance of the concrete type the current row holds.
    pub(super) fn construct(&self, cursor: &dyn Cursor) -> Result<Instance> {
        match &self.construct {
            Construct::Concrete(name) => Ok(Instance::new(name)),
            Construct::Polymorphic {
                ordinal,
                segment_ty,
                members,
            } => {
                if cursor.is_null(*ordinal)? {
                    return Err(Error::decode(format!(
                        "NULL discriminator for `{segment_ty}`"
                    )));
                }

                let discriminator = cursor.get_i32(*ordinal)?;

                usize::try_from(discriminator)
                    .ok()
                    .and_then(|value| value.checked_sub(1))
                    .and_then(|index| members.get(index))
                    .and_then(Option::as_ref)
                    .map(Instance::new)
                    .ok_or_else(|| {
                        Error::decode(format!(
                            "discriminator {discriminator} does not name a `{segment_ty}`"
                        ))
                    })
            }
        }
    }

    /// Copies the layer's columns of the current row into `instance`.
    pub(super) fn fill(&self, cursor: &dyn Cursor, instance: &mut Instance) -> Result<()> {
        for filler in &self.fillers {
            match filler {
                Filler::Scalar {
                    ordinal,
                    property,
                    ty,
                    nullable,
                } => {
                    let value = cursor.get(*ordinal, *ty)?;

                    if value.is_null() && !nullable {
                        return Err(Error::decode(format!(
                            "NULL in non-nullable `{}.{}`",
                            instance.ty, property
                        )));
                    }

                    instance.set(property.clone(), value);
                }
                Filler::Reference {
                    ordinal,
                    property,
                    target,
                    ty,
                } => {
                    let value = match cursor.get(*ordinal, *ty)? {
                        Value::Null => Value::Null,
                        id => Value::Reference(Reference::new(target, id)),
                    };

                    instance.set(property.clone(), value);
                }
            }
        }

        Ok(())
    }
}

impl Expansion {
    pub(super) fn compile(
        schema: &Schema,
        table: TableId,
        property: &str,
        maintain_order: bool,
        offset: &mut usize,
    ) -> Result<Expansion> {
        let table = schema.table(table);

        let ordinal = |role: ColumnRole| {
            table
                .columns
                .iter()
                .position(|column| column.role == role)
                .map(|index| *offset + index)
        };

        let parent = ordinal(ColumnRole::ParentId);
        let value = ordinal(ColumnRole::Value);
        let index = ordinal(ColumnRole::Index);

        let (Some(parent), Some(value)) = (parent, value) else {
            return Err(err!("`{}` is not a primitive list table", table.name));
        };

        if maintain_order && index.is_none() {
            return Err(err!("`{}` has no Index column", table.name));
        }

        let expansion = Expansion {
            property: property.to_string(),
            parent,
            value,
            value_ty: table.columns[value - *offset].ty,
            index: index.filter(|_| maintain_order),
        };

        *offset += table.columns.len();

        Ok(expansion)
    }
}
