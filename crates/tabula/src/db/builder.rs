use super::Db;
use crate::Model;

use tabula_core::{
    driver::Driver,
    schema::{self, MappingConfig, TypeConfig},
    Result, Schema,
};

use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Builder {
    /// Global mapping defaults
    config: MappingConfig,

    /// Configured types, in registration order
    types: Vec<TypeConfig>,
}

impl Builder {
    pub fn register<M: Model>(&mut self) -> &mut Self {
        self.types.push(M::type_config());
        self
    }

    /// Registers a type described without a [`Model`] implementation.
    pub fn register_type(&mut self, ty: impl Into<TypeConfig>) -> &mut Self {
        self.types.push(ty.into());
        self
    }

    pub fn config(&mut self, config: MappingConfig) -> &mut Self {
        self.config = config;
        self
    }

    pub fn build_schema(&self) -> Result<Schema> {
        let mut builder = schema::Builder::new();
        builder.config(self.config.clone());

        for ty in &self.types {
            builder.register(ty.clone());
        }

        builder.build()
    }

    pub async fn build(&mut self, driver: impl Driver) -> Result<Db> {
        let schema = self.build_schema()?;
        let connection = driver.connect().await?;

        Ok(Db {
            schema: Arc::new(schema),
            connection,
        })
    }
}
