use super::{Formatter, ToSql};

use tabula_core::schema::db;

use std::fmt::Write;

impl ToSql for &db::Type {
    fn to_sql(self, f: &mut Formatter<'_>) {
        // Writing to a String cannot fail
        let _ = match self {
            db::Type::Int => write!(f.dst, "INT"),
            db::Type::BigInt => write!(f.dst, "BIGINT"),
            db::Type::Bit => write!(f.dst, "BIT"),
            db::Type::Float => write!(f.dst, "FLOAT"),
            db::Type::NVarChar(None) => write!(f.dst, "NVARCHAR(MAX)"),
            db::Type::NVarChar(Some(len)) => write!(f.dst, "NVARCHAR({len})"),
            db::Type::UniqueIdentifier => write!(f.dst, "UNIQUEIDENTIFIER"),
            db::Type::VarBinary(None) => write!(f.dst, "VARBINARY(MAX)"),
            db::Type::VarBinary(Some(len)) => write!(f.dst, "VARBINARY({len})"),
            db::Type::Decimal(precision, scale) => {
                write!(f.dst, "DECIMAL({precision}, {scale})")
            }
        };
    }
}
