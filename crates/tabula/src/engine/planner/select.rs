use super::{path, Aliases, Planner, Step};
use crate::engine::{QueryParam, QueryPlan, SelectShape, Segment};

use tabula_core::{
    err,
    schema::{db::TableId, Navigation, NavigationTarget, Property, PropertyKind, TypeId},
    Error, Result, Schema,
};
use tabula_sql::stmt::{ColumnRef, Expr, Join, JoinKind, Placeholder, Select, TableRef};

/// Builds one SELECT. Created fresh for every [`Planner::query`] call.
struct SelectBuilder<'a> {
    schema: &'a Schema,
    aliases: Aliases,
    select: Select,
    shape: SelectShape,
    params: Vec<QueryParam>,

    /// The queried object
    root: Scope,

    /// Include chain built so far, one entry per path step
    included: Vec<Included>,

    /// Whether a filter join may match several rows per object
    fans_out: bool,
}

/// The tables joined for one object of the statement.
#[derive(Debug, Clone)]
struct Scope {
    /// Type whose tables are joined
    ty: TypeId,

    /// Alias of the first table joined for the object
    anchor: String,

    /// Identity column name, shared by every entity table of a hierarchy
    identity: String,

    tables: Vec<(TableId, String)>,

    /// Alias context when the object sits beneath a descendant branch
    branch: Option<String>,
}

#[derive(Debug)]
struct Included {
    step: Step,

    /// `None` once the chain reached a primitive list
    scope: Option<Scope>,
}

impl Planner<'_> {
    /// Compiles a SELECT for `ty`.
    ///
    /// Each filter path gets one parameter, in order. Include paths are
    /// eagerly loaded through LEFT OUTER joins and described by the returned
    /// plan's shape.
    pub fn query<F, I>(&self, ty: &str, filters: F, includes: I) -> Result<QueryPlan>
    where
        F: IntoIterator,
        F::Item: AsRef<str>,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut builder = SelectBuilder::new(self.schema, self.schema.ty(ty)?.id);

        for path in includes {
            builder.include(path.as_ref())?;
        }

        for path in filters {
            builder.filter(path.as_ref())?;
        }

        builder.check_expansion()?;

        let sql = self.serialize(builder.select);
        log::debug!("planned query for `{ty}`: {sql}");

        Ok(QueryPlan {
            sql,
            shape: builder.shape,
            params: builder.params,
        })
    }
}

impl<'a> SelectBuilder<'a> {
    fn new(schema: &'a Schema, ty: TypeId) -> SelectBuilder<'a> {
        let mapping = schema.ty_by_id(ty);
        let mut aliases = Aliases::default();

        let root_table = schema.table(mapping.tables[0]);
        let anchor = aliases.next("M");
        let identity = schema.identity_column(ty).name.clone();

        let mut builder = SelectBuilder {
            schema,
            aliases,
            select: Select::new(TableRef::new(&root_table.name, &anchor)),
            shape: SelectShape::new(Segment::Type {
                ty,
                tables: mapping.tables.clone(),
            }),
            params: vec![],
            root: Scope {
                ty,
                anchor: anchor.clone(),
                identity,
                tables: vec![(mapping.tables[0], anchor)],
                branch: None,
            },
            included: vec![],
            fans_out: false,
        };

        for &table in &mapping.tables[1..] {
            let lhs = builder.root.identity_ref();
            let rhs = builder.root.identity.clone();
            let alias = builder.join(JoinKind::Inner, table, lhs, &rhs, "T", true);
            builder.root.tables.push((table, alias));
        }

        builder
    }

    fn include(&mut self, path: &str) -> Result<()> {
        for (index, step) in path::parse(path)?.into_iter().enumerate() {
            if let Some(existing) = self.included.get(index) {
                if existing.step == step {
                    continue;
                }

                return Err(Error::not_supported(format!(
                    "include `{path}` branches away from `{}`; sibling includes are not supported",
                    self.included_path()
                )));
            }

            let scope = match self.included.last() {
                None => self.root.clone(),
                Some(Included {
                    scope: Some(scope), ..
                }) => scope.clone(),
                Some(Included { scope: None, .. }) => {
                    return Err(Error::not_supported(format!(
                        "include `{path}` continues past primitive list `{}`",
                        self.included_path()
                    )));
                }
            };

            let next = self.include_step(&scope, &step, path)?;
            self.included.push(Included { step, scope: next });
        }

        Ok(())
    }

    /// An unordered list has no column telling its rows apart, so repeated
    /// rows from a fanning-out filter cannot be folded back into it.
    fn check_expansion(&self) -> Result<()> {
        if !self.fans_out {
            return Ok(());
        }

        for segment in &self.shape.segments {
            if let Segment::Expansion {
                property,
                maintain_order: false,
                ..
            } = segment
            {
                return Err(Error::not_supported(format!(
                    "unordered list `{property}` cannot be included together with a \
                     filter through a collection"
                )));
            }
        }

        Ok(())
    }

    fn included_path(&self) -> String {
        self.included
            .iter()
            .map(|included| match &included.step.cast {
                Some(cast) => format!("{}[{}]", included.step.name, cast),
                None => included.step.name.clone(),
            })
            .collect::<Vec<_>>()
            .join(".")
    }

    fn include_step(&mut self, scope: &Scope, step: &Step, path: &str) -> Result<Option<Scope>> {
        let mapping = self.schema.ty_by_id(scope.ty);
        let property = mapping.property(&step.name).ok_or_else(|| {
            Error::configuration(format!(
                "`{path}`: type `{}` has no property `{}` to include",
                mapping.name, step.name
            ))
        })?;

        let navigation = match &property.kind {
            PropertyKind::Navigation(navigation) => navigation,
            PropertyKind::Scalar(_) => {
                return Err(Error::configuration(format!(
                    "`{path}`: `{}.{}` is not a navigation and cannot be included",
                    mapping.name, step.name
                )));
            }
        };

        match navigation.target {
            NavigationTarget::Primitive(_) => {
                step.no_cast(path)?;

                let table = self.schema.table(property.table);
                self.join(
                    JoinKind::LeftOuter,
                    property.table,
                    scope.identity_ref(),
                    "ParentId",
                    "S",
                    true,
                );

                self.shape.segments.push(Segment::Expansion {
                    table: property.table,
                    collecting_ty: scope.ty,
                    property: property.name.clone(),
                    maintain_order: table.maintains_order(),
                });

                Ok(None)
            }
            NavigationTarget::Type(target) => {
                let concrete = self.cast_target(target, step, path)?;
                let next = self.join_navigation(
                    scope,
                    property,
                    navigation,
                    target,
                    concrete,
                    JoinKind::LeftOuter,
                    "S",
                    true,
                )?;

                self.shape.segments.push(Segment::SubType {
                    ty: concrete,
                    tables: next.tables.iter().map(|(table, _)| *table).collect(),
                    collecting_ty: scope.ty,
                    property: property.name.clone(),
                    many: navigation.many,
                });

                Ok(Some(next))
            }
        }
    }

    fn filter(&mut self, path: &str) -> Result<()> {
        let steps = path::parse(path)?;
        let root = self.root.clone();

        let mut columns = vec![];
        self.filter_steps(&root, &steps, path, &mut columns)?;

        let param = Placeholder(self.params.len());
        self.params.push(QueryParam {
            name: param.name(),
            path: path.to_string(),
        });

        let operands = columns
            .into_iter()
            .map(|column| Expr::eq(column, param))
            .collect();
        self.select.filter.push(Expr::or(operands));

        Ok(())
    }

    /// Resolves the first step against `scope`, joining as needed, and
    /// collects the column(s) the filter value is compared with.
    fn filter_steps(
        &mut self,
        scope: &Scope,
        steps: &[Step],
        path: &str,
        out: &mut Vec<ColumnRef>,
    ) -> Result<()> {
        let Some((step, rest)) = steps.split_first() else {
            return Err(Error::configuration(format!("invalid path `{path}`")));
        };

        let mapping = self.schema.ty_by_id(scope.ty);

        if step.name == mapping.identity {
            step.no_cast(path)?;

            if !rest.is_empty() {
                return Err(Error::configuration(format!(
                    "`{path}`: cannot navigate past identity `{}.{}`",
                    mapping.name, step.name
                )));
            }

            out.push(scope.identity_ref());
            return Ok(());
        }

        if let Some(property) = mapping.property(&step.name) {
            return self.filter_property(scope, property, step, rest, path, out);
        }

        let descendants = self.schema.descendants_with(scope.ty, &step.name);

        if descendants.is_empty() {
            return Err(Error::configuration(format!(
                "`{path}`: neither `{}` nor its descendants have a property `{}`",
                mapping.name, step.name
            )));
        }

        for (index, descendant) in descendants.into_iter().enumerate() {
            let context = format!("{}B{}T", scope.anchor, index + 1);
            let branch = self.branch(scope, descendant, context);
            let property = self.schema.property(descendant, &step.name)?;

            self.filter_property(&branch, property, step, rest, path, out)?;
        }

        Ok(())
    }

    fn filter_property(
        &mut self,
        scope: &Scope,
        property: &Property,
        step: &Step,
        rest: &[Step],
        path: &str,
        out: &mut Vec<ColumnRef>,
    ) -> Result<()> {
        let owner = &self.schema.ty_by_id(scope.ty).name;

        let navigation = match &property.kind {
            PropertyKind::Scalar(_) => {
                step.no_cast(path)?;

                if !rest.is_empty() {
                    return Err(Error::configuration(format!(
                        "`{path}`: cannot navigate past scalar `{owner}.{}`",
                        property.name
                    )));
                }

                out.push(self.property_column(scope, property)?);
                return Ok(());
            }
            PropertyKind::Navigation(navigation) => navigation,
        };

        match navigation.target {
            NavigationTarget::Primitive(_) => {
                step.no_cast(path)?;

                if !rest.is_empty() {
                    return Err(Error::configuration(format!(
                        "`{path}`: cannot filter past primitive list `{owner}.{}`",
                        property.name
                    )));
                }

                self.fans_out = true;

                let context = scope.hop_context();
                let alias = self.join(
                    scope.join_kind(),
                    property.table,
                    scope.identity_ref(),
                    "ParentId",
                    &context,
                    false,
                );

                out.push(ColumnRef::new(alias, "Value"));
                Ok(())
            }
            NavigationTarget::Type(target) => {
                if rest.is_empty() {
                    if navigation.many {
                        return Err(Error::configuration(format!(
                            "`{path}`: collection `{owner}.{}` cannot be compared with a value",
                            property.name
                        )));
                    }

                    step.no_cast(path)?;
                    out.push(self.property_column(scope, property)?);
                    return Ok(());
                }

                self.fans_out |= navigation.many;

                let concrete = self.cast_target(target, step, path)?;
                let context = scope.hop_context();
                let next = self.join_navigation(
                    scope,
                    property,
                    navigation,
                    target,
                    concrete,
                    scope.join_kind(),
                    &context,
                    false,
                )?;

                self.filter_steps(&next, rest, path, out)
            }
        }
    }

    /// Extends `scope` down to a descendant type for one branch of a
    /// nearest-descendant search.
    fn branch(&mut self, scope: &Scope, descendant: TypeId, context: String) -> Scope {
        let mut branch = Scope {
            ty: descendant,
            branch: Some(context.clone()),
            ..scope.clone()
        };

        for &table in &self.schema.ty_by_id(descendant).tables {
            if branch.alias(table).is_some() {
                continue;
            }

            let lhs = branch.identity_ref();
            let rhs = branch.identity.clone();
            let alias = self.join(JoinKind::LeftOuter, table, lhs, &rhs, &context, false);
            branch.tables.push((table, alias));
        }

        branch
    }

    /// Joins the target of an entity navigation and returns its scope.
    ///
    /// The first table joined is the one the relation's column connects to:
    /// the target's root table for a parent-hosted reference, or the table
    /// carrying the foreign key for a child-hosted collection. The rest of
    /// the target's chain follows with `kind`, then any tables a cast adds
    /// with INNER joins.
    #[allow(clippy::too_many_arguments)]
    fn join_navigation(
        &mut self,
        scope: &Scope,
        property: &Property,
        navigation: &Navigation,
        target: TypeId,
        concrete: TypeId,
        kind: JoinKind,
        context: &str,
        project: bool,
    ) -> Result<Scope> {
        let column = property
            .column
            .map(|column| self.schema.column(column).name.clone())
            .ok_or_else(|| err!("navigation `{}` has no column", property.name))?;
        let identity = self.schema.identity_column(target).name.clone();
        let target_tables = &self.schema.ty_by_id(target).tables;

        let (first, lhs, rhs) = if navigation.many {
            (property.table, scope.identity_ref(), column)
        } else {
            let alias = scope.table_alias(property.table)?;
            (
                target_tables[0],
                ColumnRef::new(alias, column),
                identity.clone(),
            )
        };

        let anchor = self.join(kind, first, lhs, &rhs, context, project);
        let mut next = Scope {
            ty: concrete,
            anchor: anchor.clone(),
            identity,
            tables: vec![(first, anchor)],
            branch: scope.branch.clone(),
        };

        let chain = target_tables
            .iter()
            .map(|table| (*table, kind))
            .chain(
                self.schema
                    .ty_by_id(concrete)
                    .tables
                    .iter()
                    .map(|table| (*table, JoinKind::Inner)),
            )
            .collect::<Vec<_>>();

        for (table, kind) in chain {
            if next.alias(table).is_some() {
                continue;
            }

            let lhs = next.identity_ref();
            let rhs = next.identity.clone();
            let alias = self.join(kind, table, lhs, &rhs, context, project);
            next.tables.push((table, alias));
        }

        Ok(next)
    }

    fn cast_target(&self, target: TypeId, step: &Step, path: &str) -> Result<TypeId> {
        let Some(cast) = &step.cast else {
            return Ok(target);
        };

        let concrete = self.schema.ty(cast)?;

        if !self.schema.is_same_or_descendant(concrete.id, target) {
            return Err(Error::configuration(format!(
                "`{path}`: cast `[{cast}]` is not a `{}`",
                self.schema.ty_by_id(target).name
            )));
        }

        Ok(concrete.id)
    }

    fn property_column(&self, scope: &Scope, property: &Property) -> Result<ColumnRef> {
        let column = property
            .column
            .map(|column| self.schema.column(column))
            .ok_or_else(|| err!("property `{}` has no column", property.name))?;

        Ok(ColumnRef::new(
            scope.table_alias(property.table)?,
            &column.name,
        ))
    }

    /// Appends a join and returns the alias allocated for it.
    fn join(
        &mut self,
        kind: JoinKind,
        table: TableId,
        lhs: ColumnRef,
        rhs: &str,
        context: &str,
        project: bool,
    ) -> String {
        let alias = self.aliases.next(context);

        self.select.joins.push(Join {
            kind,
            table: TableRef::new(&self.schema.table(table).name, &alias),
            lhs,
            rhs: ColumnRef::new(&alias, rhs),
        });

        if project {
            self.select.projection.push(alias.clone());
        }

        alias
    }
}

impl Scope {
    fn alias(&self, table: TableId) -> Option<&str> {
        self.tables
            .iter()
            .find(|(id, _)| *id == table)
            .map(|(_, alias)| &alias[..])
    }

    fn table_alias(&self, table: TableId) -> Result<&str> {
        self.alias(table)
            .ok_or_else(|| err!("{table:?} is not joined for {:?}", self.ty))
    }

    fn identity_ref(&self) -> ColumnRef {
        ColumnRef::new(&self.anchor, &self.identity)
    }

    /// Context for the next navigation hop out of this object.
    fn hop_context(&self) -> String {
        match &self.branch {
            Some(branch) => branch.clone(),
            None => format!("{}B0T", self.anchor),
        }
    }

    fn join_kind(&self) -> JoinKind {
        if self.branch.is_some() {
            JoinKind::LeftOuter
        } else {
            JoinKind::Inner
        }
    }
}
