mod cursor;
pub use cursor::{Cursor, ValuesCursor};

pub mod operation;
pub use operation::{Operation, Sql};

mod response;
pub use response::Response;

use crate::async_trait;

use std::fmt::Debug;

/// Opens connections to a database.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    async fn connect(&self) -> crate::Result<Box<dyn Connection>>;
}

/// Executes literal SQL statements.
///
/// This is the statement executor the engine drives: it receives the text
/// produced by the planner plus named parameter values, and answers with a
/// row cursor for queries or an affected-row count for everything else.
#[async_trait]
pub trait Connection: Debug + Send + 'static {
    async fn exec(&mut self, operation: Operation) -> crate::Result<Response>;
}
