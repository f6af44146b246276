mod linking;
mod properties;
mod tables;

use super::{
    db::{Table, TableId},
    mapping::{Property, TypeId, TypeMapping},
    MappingConfig, Schema, TypeConfig,
};
use crate::{Error, Result};

use indexmap::IndexMap;

#[derive(Debug, Default)]
pub struct Builder {
    config: MappingConfig,
    types: Vec<TypeConfig>,
}

/// Used to track state during the build process
struct BuildSchema<'a> {
    config: &'a MappingConfig,

    entries: &'a [TypeConfig],

    /// Maps type names to identifiers. A type's id is its configuration
    /// position, and so is the id of its entity table.
    type_lookup: IndexMap<&'a str, TypeId>,

    /// Resolved parent of each type
    parents: Vec<Option<TypeId>>,

    /// Root of each type's hierarchy
    roots: Vec<TypeId>,

    /// Tables as they are built
    tables: Vec<Table>,

    /// Per-type state filled by the table and property passes
    types: Vec<TypeState>,
}

/// What the sequential passes know about a type before hierarchy linking.
#[derive(Debug)]
struct TypeState {
    name: String,
    identity: String,
    table: TableId,

    /// Declared properties, in mapping order
    properties: IndexMap<String, Property>,

    /// Declared primitive list tables
    list_tables: Vec<TableId>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&mut self, config: MappingConfig) -> &mut Self {
        self.config = config;
        self
    }

    pub fn register(&mut self, ty: impl Into<TypeConfig>) -> &mut Self {
        self.types.push(ty.into());
        self
    }

    pub fn build(&self) -> Result<Schema> {
        let mut builder = BuildSchema {
            config: &self.config,
            entries: &self.types,
            type_lookup: IndexMap::new(),
            parents: vec![],
            roots: vec![],
            tables: vec![],
            types: vec![],
        };

        builder.index_types()?;

        // Tables for every type exist before any property is resolved: a
        // child-hosted collection adds its column to the target's table.
        builder.build_entity_tables()?;
        builder.build_properties()?;
        builder.verify_table_names()?;

        let linked = builder.link_hierarchies()?;

        let mut types: Vec<_> = builder
            .types
            .into_iter()
            .zip(linked)
            .enumerate()
            .map(|(index, (state, linked))| TypeMapping {
                id: TypeId(index),
                name: state.name,
                parent: builder.parents[index],
                children: vec![],
                root: builder.roots[index],
                identity: state.identity,
                discriminator: linked.discriminator,
                table: state.table,
                tables: linked.tables,
                list_tables: linked.list_tables,
                properties: linked.properties,
                hierarchy: linked.hierarchy,
            })
            .collect();

        for index in 0..types.len() {
            if let Some(parent) = types[index].parent {
                types[parent.0].children.push(TypeId(index));
            }
        }

        let schema = Schema::new(types, builder.tables);

        for ty in schema.types() {
            log::debug!(
                "mapped type `{}`: {} entity tables, {} list tables, discriminator {}/{}",
                ty.name,
                ty.tables.len(),
                ty.list_tables.len(),
                ty.discriminator,
                ty.hierarchy.len(),
            );
        }

        Ok(schema)
    }
}

impl<'a> BuildSchema<'a> {
    fn index_types(&mut self) -> Result<()> {
        for (index, entry) in self.entries.iter().enumerate() {
            if self
                .type_lookup
                .insert(entry.name(), TypeId(index))
                .is_some()
            {
                return Err(Error::configuration(format!(
                    "type `{}` is configured more than once",
                    entry.name()
                )));
            }
        }

        for entry in self.entries {
            let parent = match &entry.descriptor.parent {
                Some(parent) => Some(self.lookup(parent).map_err(|_| {
                    Error::configuration(format!(
                        "parent `{}` of type `{}` is not configured",
                        parent,
                        entry.name()
                    ))
                })?),
                None => None,
            };
            self.parents.push(parent);
        }

        for index in 0..self.entries.len() {
            let mut current = TypeId(index);
            let mut steps = 0;

            while let Some(parent) = self.parents[current.0] {
                steps += 1;
                if steps > self.entries.len() {
                    return Err(Error::configuration(format!(
                        "type `{}` is part of an inheritance cycle",
                        self.entries[index].name()
                    )));
                }
                current = parent;
            }

            self.roots.push(current);
        }

        Ok(())
    }

    fn lookup(&self, name: &str) -> Result<TypeId> {
        self.type_lookup
            .get(name)
            .copied()
            .ok_or_else(|| Error::configuration(format!("type `{name}` is not configured")))
    }

    /// Number of configured types in the hierarchy rooted at `root`.
    fn hierarchy_size(&self, root: TypeId) -> usize {
        self.roots.iter().filter(|r| **r == root).count()
    }

    fn verify_table_names(&self) -> Result<()> {
        let mut seen = IndexMap::new();

        for table in &self.tables {
            if let Some(previous) = seen.insert(table.name.as_str(), table.id) {
                return Err(Error::configuration(format!(
                    "table name `{}` is used by both {:?} and {:?}",
                    table.name, previous, table.id
                )));
            }
        }

        Ok(())
    }
}
