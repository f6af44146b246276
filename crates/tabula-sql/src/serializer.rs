#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Period};

mod ident;
use ident::Ident;

// Fragment serializers
mod column_def;
mod expr;
mod statement;
mod ty;

use crate::stmt::Statement;

/// Serializes statements to the bracket-quoted reference dialect.
#[derive(Debug, Default)]
pub struct Serializer {}

struct Formatter<'a> {
    /// Where to write the serialized SQL
    dst: &'a mut String,
}

impl Serializer {
    pub fn new() -> Serializer {
        Serializer {}
    }

    pub fn serialize(&self, stmt: &Statement) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter { dst: &mut ret };
        stmt.to_sql(&mut fmt);

        if matches!(stmt, Statement::CreateTable(_)) {
            ret.push(';');
        }

        ret
    }
}
