use tabula_core::schema::{db::TableId, TypeId};

/// How to decode the flattened rows of a SELECT back into objects.
///
/// The first segment is always [`Segment::Type`]. Each following
/// [`Segment::SubType`] is nested under the segment before it, and an
/// [`Segment::Expansion`], when present, is last.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectShape {
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// The queried objects
    Type {
        ty: TypeId,

        /// Tables projected for the object, in projection order
        tables: Vec<TableId>,
    },

    /// An included navigation target
    SubType {
        ty: TypeId,
        tables: Vec<TableId>,

        /// Type of the object holding the navigation
        collecting_ty: TypeId,

        /// Property the decoded objects are assigned to
        property: String,

        /// Whether the property is a collection
        many: bool,
    },

    /// An included primitive list
    Expansion {
        table: TableId,
        collecting_ty: TypeId,
        property: String,
        maintain_order: bool,
    },
}

impl SelectShape {
    pub(crate) fn new(root: Segment) -> SelectShape {
        SelectShape {
            segments: vec![root],
        }
    }

    /// Projected tables, in the order their columns appear in a row.
    pub fn tables(&self) -> impl Iterator<Item = TableId> + '_ {
        self.segments.iter().flat_map(|segment| segment.tables())
    }
}

impl Segment {
    pub fn tables(&self) -> Vec<TableId> {
        match self {
            Segment::Type { tables, .. } | Segment::SubType { tables, .. } => tables.clone(),
            Segment::Expansion { table, .. } => vec![*table],
        }
    }

    /// The decoded object type; `None` for an expansion.
    pub fn ty(&self) -> Option<TypeId> {
        match self {
            Segment::Type { ty, .. } | Segment::SubType { ty, .. } => Some(*ty),
            Segment::Expansion { .. } => None,
        }
    }

    pub fn is_expansion(&self) -> bool {
        matches!(self, Segment::Expansion { .. })
    }
}
