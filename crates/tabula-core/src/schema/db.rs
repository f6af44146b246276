mod column;
pub use column::{Column, ColumnId, ColumnRole};

mod table;
pub use table::{Table, TableId, TableKind};

mod ty;
pub use ty::Type;
