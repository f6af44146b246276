mod column_def;
pub use column_def::ColumnDef;

mod create_table;
pub use create_table::CreateTable;

mod delete;
pub use delete::Delete;

mod expr;
pub use expr::{ColumnRef, Expr, Placeholder};

mod insert;
pub use insert::Insert;

mod select;
pub use select::{Join, JoinKind, Select};

mod table_ref;
pub use table_ref::TableRef;

mod update;
pub use update::Update;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateTable(CreateTable),
    Delete(Delete),
    Insert(Insert),
    Select(Select),
    Update(Update),
}
