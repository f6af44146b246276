mod instance;
pub use instance::Instance;

mod reference;
pub use reference::Reference;

mod ty;
pub use ty::Type;

mod value;
pub use value::Value;
