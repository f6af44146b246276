use crate::{
    stmt::{Type, Value},
    Error, Result,
};

use std::collections::VecDeque;
use uuid::Uuid;

/// A forward-only row cursor.
///
/// `advance` moves to the next row and reports whether one is available. The
/// getters read a column of the current row by ordinal and fail on a NULL or
/// a column of another type; callers check `is_null` first.
pub trait Cursor: std::fmt::Debug + Send {
    fn advance(&mut self) -> Result<bool>;

    fn is_null(&self, ordinal: usize) -> Result<bool>;

    fn get_bool(&self, ordinal: usize) -> Result<bool>;

    fn get_i32(&self, ordinal: usize) -> Result<i32>;

    fn get_i64(&self, ordinal: usize) -> Result<i64>;

    fn get_f64(&self, ordinal: usize) -> Result<f64>;

    fn get_string(&self, ordinal: usize) -> Result<String>;

    fn get_uuid(&self, ordinal: usize) -> Result<Uuid>;

    fn get_bytes(&self, ordinal: usize) -> Result<Vec<u8>>;

    /// Reads a column as a [`Value`] of the given type, mapping NULL to
    /// [`Value::Null`].
    fn get(&self, ordinal: usize, ty: Type) -> Result<Value> {
        if self.is_null(ordinal)? {
            return Ok(Value::Null);
        }

        Ok(match ty {
            Type::Bool => Value::Bool(self.get_bool(ordinal)?),
            Type::I32 => Value::I32(self.get_i32(ordinal)?),
            Type::I64 => Value::I64(self.get_i64(ordinal)?),
            Type::F64 => Value::F64(self.get_f64(ordinal)?),
            Type::String => Value::String(self.get_string(ordinal)?),
            Type::Uuid => Value::Uuid(self.get_uuid(ordinal)?),
            Type::Bytes => Value::Bytes(self.get_bytes(ordinal)?),
        })
    }
}

/// A cursor over rows already held in memory.
#[derive(Debug, Default)]
pub struct ValuesCursor {
    rows: VecDeque<Vec<Value>>,
    current: Option<Vec<Value>>,
}

impl ValuesCursor {
    pub fn new(rows: impl IntoIterator<Item = Vec<Value>>) -> ValuesCursor {
        ValuesCursor {
            rows: rows.into_iter().collect(),
            current: None,
        }
    }

    fn column(&self, ordinal: usize) -> Result<&Value> {
        let row = self
            .current
            .as_ref()
            .ok_or_else(|| Error::decode("cursor is not positioned on a row"))?;

        row.get(ordinal).ok_or_else(|| {
            Error::decode(format!(
                "ordinal {ordinal} out of range for a row of {} columns",
                row.len()
            ))
        })
    }

    fn typed<T>(&self, ordinal: usize) -> Result<T>
    where
        T: TryFrom<Value, Error = Error>,
    {
        T::try_from(self.column(ordinal)?.clone())
    }
}

impl Cursor for ValuesCursor {
    fn advance(&mut self) -> Result<bool> {
        self.current = self.rows.pop_front();
        Ok(self.current.is_some())
    }

    fn is_null(&self, ordinal: usize) -> Result<bool> {
        Ok(self.column(ordinal)?.is_null())
    }

    fn get_bool(&self, ordinal: usize) -> Result<bool> {
        self.typed(ordinal)
    }

    fn get_i32(&self, ordinal: usize) -> Result<i32> {
        self.typed(ordinal)
    }

    fn get_i64(&self, ordinal: usize) -> Result<i64> {
        self.typed(ordinal)
    }

    fn get_f64(&self, ordinal: usize) -> Result<f64> {
        self.typed(ordinal)
    }

    fn get_string(&self, ordinal: usize) -> Result<String> {
        self.typed(ordinal)
    }

    fn get_uuid(&self, ordinal: usize) -> Result<Uuid> {
        self.typed(ordinal)
    }

    fn get_bytes(&self, ordinal: usize) -> Result<Vec<u8>> {
        self.typed(ordinal)
    }
}
