
pub use exec_log::ExecLog;


pub use logging_driver::{DriverOp, LoggingDriver};

pub use store::MemoryDriver;

use std::sync::{Arc, Mutex};
use tabula::Db;

/// Per-test database: a fresh in-memory store behind a logging driver.
pub struct DbTest {
    driver: MemoryDriver,
    ops_log: Arc<Mutex<Vec<DriverOp>>>,
}

impl DbTest {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        Self {
            driver: MemoryDriver::new(),
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Try to setup a database with models, returns Result for error handling
    pub async fn try_setup_db(&mut self, mut builder: tabula::db::Builder) -> tabula::Result<Db> {
        // Always wrap with logging
        let logging_driver = LoggingDriver::new(Box::new(self.driver.clone()));
        self.ops_log = logging_driver.ops_log_handle();

        let mut db = builder.build(logging_driver).await?;
        db.create_tables().await?;

        Ok(db)
    }

    /// Setup a database with models, always with logging enabled
    pub async fn setup_db(&mut self, builder: tabula::db::Builder) -> Db {
        self.try_setup_db(builder).await.unwrap()
    }

    /// Operations executed since setup
    pub fn log(&self) -> ExecLog {
        ExecLog::new(self.ops_log.clone())
    }

    /// The store behind the database, for inspecting raw rows
    pub fn driver(&self) -> &MemoryDriver {
        &self.driver
    }
}

impl Default for DbTest {
    fn default() -> Self {
        Self::new()
    }
}
