use super::{Formatter, Ident, Period, ToSql};

use crate::stmt::{ColumnRef, Expr, Placeholder};

use std::fmt::Write;

impl ToSql for &ColumnRef {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let parts = Period([Ident(&self.alias), Ident(&self.column)]);
        fmt!(f, parts);
    }
}

impl ToSql for Placeholder {
    fn to_sql(self, f: &mut Formatter<'_>) {
        // Writing to a String cannot fail
        let _ = write!(f.dst, "@p{}", self.0);
    }
}

impl ToSql for &Expr {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            Expr::Eq(column, param) => {
                let param = *param;
                fmt!(f, column " = " param)
            }
            Expr::Or(operands) => {
                let mut s = "(";
                for operand in operands {
                    fmt!(f, s operand);
                    s = " OR ";
                }
                fmt!(f, ")");
            }
        }
    }
}
