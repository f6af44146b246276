use super::{Formatter, Ident, ToSql};

use crate::stmt::ColumnDef;

impl ToSql for &ColumnDef {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let name = Ident(&self.name);
        let ty = &self.ty;
        let not_null = if self.not_null { " NOT NULL" } else { "" };
        let primary_key = if self.primary_key { " PRIMARY KEY" } else { "" };

        fmt!(f, name " " ty not_null primary_key)
    }
}
