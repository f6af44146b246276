use super::Cursor;
use crate::{Error, Result};

#[derive(Debug)]
pub enum Response {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Operation result, as a forward-only row cursor
    Rows(Box<dyn Cursor>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Response::Count(count)
    }

    pub fn rows(cursor: impl Cursor + 'static) -> Self {
        Response::Rows(Box::new(cursor))
    }

    pub fn is_count(&self) -> bool {
        matches!(self, Response::Count(_))
    }

    pub fn into_count(self) -> Result<u64> {
        match self {
            Response::Count(count) => Ok(count),
            Response::Rows(_) => Err(Error::decode("expected a row count, got rows")),
        }
    }

    pub fn into_rows(self) -> Result<Box<dyn Cursor>> {
        match self {
            Response::Rows(cursor) => Ok(cursor),
            Response::Count(_) => Err(Error::decode("expected rows, got a row count")),
        }
    }
}
