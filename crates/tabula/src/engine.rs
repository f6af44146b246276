//! Plan building, row materialization, and the write path.
//!
//! The planner compiles requests against a [`Schema`](tabula_core::Schema)
//! into literal SQL plus the metadata needed to bind parameters and decode
//! rows. Nothing here talks to a database: [`Db`](crate::Db) executes the
//! plans and feeds the resulting cursors to the [`Materializer`].

mod materialize;
pub use materialize::Materializer;

mod plan;
pub use plan::{Binding, BindingSource, PartKind, QueryParam, QueryPlan, UpdatePart, UpdatePlan};

mod planner;
pub use planner::Planner;

mod shape;
pub use shape::{SelectShape, Segment};

pub(crate) mod write;
