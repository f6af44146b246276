mod builder;
pub use builder::Builder;

use crate::{engine::write, Materializer, Model, Planner, Query};

use tabula_core::{
    driver::{Connection, Operation, Sql},
    stmt::{Instance, Value},
    Error, Result, Schema,
};

use std::sync::Arc;

/// A connected database handle.
///
/// Every call plans its statements against the shared, immutable schema and
/// runs them on the handle's connection, in order. Multi-statement writes are
/// not wrapped in a transaction.
#[derive(Debug)]
pub struct Db {
    schema: Arc<Schema>,
    connection: Box<dyn Connection>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Creates the tables of every configured type, in configuration order.
    pub async fn create_tables(&mut self) -> Result<()> {
        let planner = Planner::new(&self.schema);
        let mut statements = vec![];

        for ty in self.schema.types() {
            statements.push(planner.create_table(&ty.name)?);
        }

        for sql in statements {
            for statement in sql.lines() {
                self.execute(Sql::new(statement)).await?;
            }
        }

        Ok(())
    }

    /// Inserts an object together with the primitive lists, referenced
    /// instances, and collection items it holds.
    pub async fn insert(&mut self, instance: &Instance) -> Result<()> {
        for sql in write::insert(&self.schema, instance)? {
            self.execute(sql).await?;
        }

        Ok(())
    }

    /// Writes `properties` of an existing object. Primitive lists are
    /// replaced wholesale.
    pub async fn update(&mut self, instance: &Instance, properties: &[&str]) -> Result<()> {
        for sql in write::update(&self.schema, instance, properties)? {
            self.execute(sql).await?;
        }

        Ok(())
    }

    /// Runs a query and returns the lazily materialized objects.
    pub async fn query(&mut self, query: Query) -> Result<Materializer> {
        let planner = Planner::new(&self.schema);
        let filters = query.filters().iter().map(|(path, _)| path);
        let plan = planner.query(query.ty(), filters, query.includes())?;

        let mut sql = Sql::new(plan.sql);
        for (param, (_, value)) in plan.params.into_iter().zip(query.filters()) {
            sql.params.push((param.name, value.clone()));
        }

        log::debug!("exec query: {}", sql.text);
        let cursor = self
            .connection
            .exec(Operation::Query(sql))
            .await?
            .into_rows()?;

        Materializer::new(&self.schema, &plan.shape, cursor)
    }

    /// Loads the object of type `M` with the given identity.
    pub async fn get<M: Model>(&mut self, id: impl Into<Value>) -> Result<Option<M>> {
        let identity = self.schema.ty(M::NAME)?.identity.clone();
        let mut objects = self.query(Query::new(M::NAME).filter(identity, id)).await?;

        let Some(instance) = objects.next().transpose()? else {
            return Ok(None);
        };

        if objects.next().is_some() {
            return Err(Error::decode(format!(
                "more than one `{}` has the same identity",
                M::NAME
            )));
        }

        M::load(instance).map(Some)
    }

    /// Loads every object of type `M`.
    pub async fn all<M: Model>(&mut self) -> Result<Vec<M>> {
        self.query(Query::new(M::NAME))
            .await?
            .map(|instance| M::load(instance?))
            .collect()
    }

    /// Inserts a model.
    pub async fn create<M: Model>(&mut self, model: &M) -> Result<()> {
        self.insert(&model.to_instance()).await
    }

    async fn execute(&mut self, sql: Sql) -> Result<u64> {
        log::debug!("exec: {}", sql.text);
        self.connection
            .exec(Operation::Execute(sql))
            .await?
            .into_count()
    }
}
