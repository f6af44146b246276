mod alias;
use alias::Aliases;

mod create_table;
mod insert;

mod path;
use path::Step;

mod select;
mod update;

use tabula_core::Schema;
use tabula_sql::{Serializer, Statement};

/// Compiles requests against a schema into SQL plans.
///
/// The planner itself holds no state between calls. Every plan is built with
/// its own alias and parameter counters, so identical requests always produce
/// identical statement text.
#[derive(Debug)]
pub struct Planner<'a> {
    schema: &'a Schema,
    serializer: Serializer,
}

impl<'a> Planner<'a> {
    pub fn new(schema: &'a Schema) -> Planner<'a> {
        Planner {
            schema,
            serializer: Serializer::new(),
        }
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    fn serialize(&self, stmt: impl Into<Statement>) -> String {
        self.serializer.serialize(&stmt.into())
    }
}
