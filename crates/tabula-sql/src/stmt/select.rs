use super::{ColumnRef, Expr, Statement, TableRef};

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    /// Aliases whose columns are returned, as `[alias].*`
    pub projection: Vec<String>,

    pub from: TableRef,

    pub joins: Vec<Join>,

    /// AND-combined predicates
    pub filter: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub kind: JoinKind,
    pub table: TableRef,
    pub lhs: ColumnRef,
    pub rhs: ColumnRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    LeftOuter,
}

impl Select {
    pub fn new(from: TableRef) -> Select {
        Select {
            projection: vec![from.alias.clone()],
            from,
            joins: vec![],
            filter: vec![],
        }
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Statement::Select(value)
    }
}
