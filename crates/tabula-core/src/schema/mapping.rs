mod hierarchy;
pub use hierarchy::Hierarchy;

mod property;
pub use property::{Host, Navigation, NavigationTarget, Property, PropertyKind};

mod type_mapping;
pub use type_mapping::{TypeId, TypeMapping};
