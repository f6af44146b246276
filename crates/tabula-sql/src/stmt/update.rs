use super::{Expr, Placeholder, Statement, TableRef};

/// `UPDATE [alias] SET ... FROM [table] AS [alias] WHERE ...`
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: TableRef,
    pub assignments: Vec<(String, Placeholder)>,
    pub filter: Expr,
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Statement::Update(value)
    }
}
