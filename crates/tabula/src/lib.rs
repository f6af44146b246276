pub mod db;
pub use db::Db;

pub mod engine;
pub use engine::{Materializer, Planner, QueryPlan, SelectShape, UpdatePlan};

mod model;
pub use model::{Field, Model};

mod query;
pub use query::Query;

pub use tabula_core::{
    driver,
    schema::{self, MappingConfig, TypeConfig},
    stmt::{self, Instance, Reference, Value},
    Error, Result, Schema,
};
