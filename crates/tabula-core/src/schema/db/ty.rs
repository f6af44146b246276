use crate::stmt;

/// Database storage types, as they appear in `CREATE TABLE` statements.
///
/// Each column stores both its application type ([`stmt::Type`]) and its
/// storage type. When a property carries no storage hint the storage type is
/// derived with [`Type::from_app`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// 32-bit signed integer
    Int,

    /// 64-bit signed integer
    BigInt,

    /// Boolean flag
    Bit,

    /// Double precision floating point
    Float,

    /// Unicode text; `None` is unbounded
    NVarChar(Option<u32>),

    /// 128-bit unique identifier
    UniqueIdentifier,

    /// Binary data; `None` is unbounded
    VarBinary(Option<u32>),

    /// Fixed precision and scale
    Decimal(u8, u8),
}

impl Type {
    /// Maps an application-level type to a storage type, honoring an explicit
    /// hint when one is given.
    pub fn from_app(ty: stmt::Type, hint: Option<&Type>) -> Type {
        if let Some(hint) = hint {
            return hint.clone();
        }

        match ty {
            stmt::Type::Bool => Type::Bit,
            stmt::Type::I32 => Type::Int,
            stmt::Type::I64 => Type::BigInt,
            stmt::Type::F64 => Type::Float,
            stmt::Type::String => Type::NVarChar(None),
            stmt::Type::Uuid => Type::UniqueIdentifier,
            stmt::Type::Bytes => Type::VarBinary(None),
        }
    }
}
