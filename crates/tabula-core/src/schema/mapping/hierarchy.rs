use super::TypeId;

/// Members of one inheritance tree, root first in breadth-first order.
///
/// A member's discriminator is its position plus one.
#[derive(Debug, Clone, PartialEq)]
pub struct Hierarchy {
    pub members: Vec<TypeId>,
}

impl Hierarchy {
    pub fn root(&self) -> TypeId {
        self.members[0]
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether rows of this hierarchy carry a discriminator column.
    pub fn is_polymorphic(&self) -> bool {
        self.members.len() > 1
    }

    /// Finds the member with the given discriminator value.
    pub fn member(&self, discriminator: i32) -> Option<TypeId> {
        let index = usize::try_from(discriminator).ok()?.checked_sub(1)?;
        self.members.get(index).copied()
    }
}
