use super::{Expr, Statement, TableRef};

/// `DELETE FROM [alias] FROM [table] AS [alias] WHERE ...`
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub table: TableRef,
    pub filter: Expr,
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Statement::Delete(value)
    }
}
