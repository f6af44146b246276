use super::{Comma, Formatter, Ident, Period, ToSql};

use crate::stmt::{
    self, ColumnRef, CreateTable, Delete, Insert, Join, JoinKind, Select, TableRef, Update,
};

impl ToSql for &stmt::Statement {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            stmt::Statement::CreateTable(stmt) => stmt.to_sql(f),
            stmt::Statement::Delete(stmt) => stmt.to_sql(f),
            stmt::Statement::Insert(stmt) => stmt.to_sql(f),
            stmt::Statement::Select(stmt) => stmt.to_sql(f),
            stmt::Statement::Update(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &TableRef {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, Ident(&self.name) " AS " Ident(&self.alias));
    }
}

/// `[alias].*`
struct AllColumns<'a>(&'a str);

impl ToSql for AllColumns<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, Period([Ident(self.0)]) ".*");
    }
}

impl ToSql for &Join {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let kind = match self.kind {
            JoinKind::Inner => " INNER JOIN ",
            JoinKind::LeftOuter => " LEFT OUTER JOIN ",
        };

        let table = &self.table;
        let lhs = &self.lhs;
        let rhs = &self.rhs;

        fmt!(f, kind table " ON " lhs " = " rhs);
    }
}

impl ToSql for &Select {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let projection = Comma(self.projection.iter().map(|alias| AllColumns(alias)));

        let from = &self.from;

        fmt!(f, "SELECT " projection " FROM " from);

        for join in &self.joins {
            fmt!(f, join);
        }

        let mut s = " WHERE ";
        for expr in &self.filter {
            fmt!(f, s expr);
            s = " AND ";
        }
    }
}

impl ToSql for &Insert {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let columns = Comma(self.columns.iter().map(Ident));
        let values = Comma(self.values.iter().copied());

        fmt!(f, "INSERT INTO " Ident(&self.table) " (" columns ") VALUES(" values ")");
    }
}

struct Assignment<'a>(&'a str, &'a str, stmt::Placeholder);

impl ToSql for Assignment<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let column = ColumnRef::new(self.0, self.1);
        let param = self.2;

        fmt!(f, &column " = " param);
    }
}

impl ToSql for &Update {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let alias = &self.table.alias;
        let assignments = Comma(
            self.assignments
                .iter()
                .map(|(column, param)| Assignment(alias, column, *param)),
        );

        let table = &self.table;
        let filter = &self.filter;

        fmt!(f, "UPDATE " Ident(alias) " SET " assignments " FROM " table " WHERE " filter);
    }
}

impl ToSql for &Delete {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let table = &self.table;
        let filter = &self.filter;

        fmt!(f, "DELETE FROM " Ident(&table.alias) " FROM " table " WHERE " filter);
    }
}

impl ToSql for &CreateTable {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let columns = Comma(&self.columns);

        fmt!(f, "CREATE TABLE " Ident(&self.name) " (" columns ")");
    }
}
