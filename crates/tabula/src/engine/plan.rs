use super::SelectShape;

use tabula_core::schema::db::TableId;

/// A compiled SELECT.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    /// Statement text
    pub sql: String,

    /// How to decode the rows the statement returns
    pub shape: SelectShape,

    /// One parameter per filter path, in filter order
    pub params: Vec<QueryParam>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryParam {
    /// Placeholder name, `@p0`, `@p1`, ...
    pub name: String,

    /// The filter path the parameter is compared against
    pub path: String,
}

/// A compiled INSERT or UPDATE: statements to run in order.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePlan {
    pub parts: Vec<UpdatePart>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePart {
    pub sql: String,

    /// Physical table the statement targets
    pub table: TableId,

    pub kind: PartKind,

    /// Parameter bindings, in placeholder order
    pub bindings: Vec<Binding>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    /// INSERT or UPDATE of one entity table row
    Entity,

    /// Removes every element of a primitive list for one owner
    ListDelete,

    /// Inserts one primitive list element; runs once per element
    ListInsert,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// Placeholder name
    pub param: String,

    pub source: BindingSource,
}

/// Where a parameter's value comes from when a part is executed.
#[derive(Debug, Clone, PartialEq)]
pub enum BindingSource {
    /// The object's identity
    Identity,

    /// The type's discriminator, a literal
    Discriminator(i32),

    /// A scalar property
    Property(String),

    /// Identity of the object a parent-hosted navigation points at
    Reference(String),

    /// Identity of the object whose child-hosted collection holds this one
    HostIdentity { owner: String, property: String },

    /// Primitive list element: the owner's identity
    ListParent,

    /// Primitive list element: the value
    ListValue,

    /// Primitive list element: its zero-based position
    ListIndex,
}

impl UpdatePlan {
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Statement texts, in execution order.
    pub fn sql(&self) -> impl Iterator<Item = &str> + '_ {
        self.parts.iter().map(|part| &part.sql[..])
    }
}

impl Binding {
    pub(crate) fn new(param: String, source: BindingSource) -> Binding {
        Binding { param, source }
    }
}
