mod descriptor;
pub use descriptor::{PropertyDescriptor, TypeDescriptor};

mod ty;
pub use ty::PropertyTy;
