use super::{BuildSchema, TypeState};
use crate::{
    err,
    schema::{db::TableId, mapping::Hierarchy, Property, TypeId},
    Error, Result,
};

use indexmap::IndexMap;
use std::{collections::VecDeque, sync::Arc, thread};

/// Inheritance-resolved view of one type.
pub(super) struct Linked {
    pub(super) tables: Vec<TableId>,
    pub(super) list_tables: Vec<TableId>,
    pub(super) properties: IndexMap<String, Property>,
    pub(super) discriminator: i32,
    pub(super) hierarchy: Arc<Hierarchy>,
}

impl BuildSchema<'_> {
    /// Walks every hierarchy breadth-first from its root, giving each member
    /// its ancestors' tables and properties and its discriminator.
    ///
    /// Trees share nothing, so each one may be linked on its own thread.
    pub(super) fn link_hierarchies(&self) -> Result<Vec<Linked>> {
        let mut children = vec![vec![]; self.types.len()];
        let mut roots = vec![];

        for (index, parent) in self.parents.iter().enumerate() {
            match parent {
                Some(parent) => children[parent.0].push(TypeId(index)),
                None => roots.push(TypeId(index)),
            }
        }

        let children = &children;
        let types = &self.types[..];

        let trees: Vec<Result<Vec<(TypeId, Linked)>>> =
            if self.config.parallel_linking && roots.len() > 1 {
                thread::scope(|scope| {
                    let workers: Vec<_> = roots
                        .iter()
                        .map(|root| scope.spawn(move || link_tree(*root, children, types)))
                        .collect();

                    workers
                        .into_iter()
                        .map(|worker| {
                            worker
                                .join()
                                .unwrap_or_else(|_| Err(err!("hierarchy linking worker panicked")))
                        })
                        .collect()
                })
            } else {
                roots
                    .iter()
                    .map(|root| link_tree(*root, children, types))
                    .collect()
            };

        log::debug!("linked {} hierarchies", roots.len());

        let mut linked: Vec<Option<Linked>> = (0..self.types.len()).map(|_| None).collect();
        for tree in trees {
            for (id, member) in tree? {
                linked[id.0] = Some(member);
            }
        }

        linked
            .into_iter()
            .enumerate()
            .map(|(index, member)| {
                member.ok_or_else(|| err!("type `{}` was not linked", self.types[index].name))
            })
            .collect()
    }
}

fn link_tree(
    root: TypeId,
    children: &[Vec<TypeId>],
    types: &[TypeState],
) -> Result<Vec<(TypeId, Linked)>> {
    struct Partial {
        tables: Vec<TableId>,
        list_tables: Vec<TableId>,
        properties: IndexMap<String, Property>,
    }

    let root_state = &types[root.0];
    let mut partial = IndexMap::new();
    partial.insert(
        root,
        Partial {
            tables: vec![root_state.table],
            list_tables: root_state.list_tables.clone(),
            properties: root_state.properties.clone(),
        },
    );

    let mut queue = VecDeque::from([root]);

    while let Some(parent) = queue.pop_front() {
        for child in &children[parent.0] {
            let state = &types[child.0];
            let inherited = &partial[&parent];

            let mut tables = inherited.tables.clone();
            tables.push(state.table);

            let mut list_tables = inherited.list_tables.clone();
            list_tables.extend(&state.list_tables);

            let mut properties = inherited.properties.clone();
            for (name, property) in &state.properties {
                if let Some(existing) = properties.get(name) {
                    return Err(Error::configuration(format!(
                        "`{}.{}` collides with the property inherited from `{}`",
                        state.name, name, types[existing.declared_by.0].name
                    )));
                }
                properties.insert(name.clone(), property.clone());
            }

            partial.insert(
                *child,
                Partial {
                    tables,
                    list_tables,
                    properties,
                },
            );
            queue.push_back(*child);
        }
    }

    // Insertion order is breadth-first order
    let hierarchy = Arc::new(Hierarchy {
        members: partial.keys().copied().collect(),
    });

    Ok(partial
        .into_iter()
        .enumerate()
        .map(|(position, (id, member))| {
            (
                id,
                Linked {
                    tables: member.tables,
                    list_tables: member.list_tables,
                    properties: member.properties,
                    discriminator: position as i32 + 1,
                    hierarchy: hierarchy.clone(),
                },
            )
        })
        .collect())
}
