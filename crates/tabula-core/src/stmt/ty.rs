/// Scalar types a mapped property, column, or parameter can have.
///
/// This is the application-side view of a value. How a column stores it in
/// the database is described by [`db::Type`](crate::schema::db::Type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Bool,
    I32,
    I64,
    F64,
    String,
    Uuid,
    Bytes,
}

impl Type {
    pub fn name(&self) -> &'static str {
        match self {
            Type::Bool => "Bool",
            Type::I32 => "I32",
            Type::I64 => "I64",
            Type::F64 => "F64",
            Type::String => "String",
            Type::Uuid => "Uuid",
            Type::Bytes => "Bytes",
        }
    }
}
