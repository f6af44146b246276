/// An aliased column: `[alias].[column]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
    pub alias: String,
    pub column: String,
}

/// A positional parameter, rendered as `@p{n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder(pub usize);

/// Predicates the planner produces. Only equality against a parameter is
/// supported, optionally OR-combined.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Eq(ColumnRef, Placeholder),
    Or(Vec<Expr>),
}

impl ColumnRef {
    pub fn new(alias: impl Into<String>, column: impl Into<String>) -> ColumnRef {
        ColumnRef {
            alias: alias.into(),
            column: column.into(),
        }
    }
}

impl Placeholder {
    pub fn name(&self) -> String {
        format!("@p{}", self.0)
    }
}

impl Expr {
    pub fn eq(column: ColumnRef, param: Placeholder) -> Expr {
        Expr::Eq(column, param)
    }

    /// OR-combines the operands, collapsing a single operand to itself.
    pub fn or(mut operands: Vec<Expr>) -> Expr {
        if operands.len() == 1 {
            operands.remove(0)
        } else {
            Expr::Or(operands)
        }
    }
}
