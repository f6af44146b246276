use tabula_core::{
    schema::{app::TypeDescriptor, TypeConfig},
    stmt::{Instance, Value},
    Error, Result,
};

/// A Rust type mapped by Tabula.
///
/// Instead of discovering properties at runtime, a model lists them once in
/// a static accessor table. Loading and saving walk that table.
pub trait Model: Default + Sized + 'static {
    /// Name of the mapped type
    const NAME: &'static str;

    /// The declared properties of the type.
    fn descriptor() -> TypeDescriptor;

    /// Mapping choices for the type. Override to pick an identity property, a
    /// property subset, or list order policies.
    fn type_config() -> TypeConfig {
        TypeConfig::new(Self::descriptor())
    }

    /// Accessor pairs, one per mapped property including the identity.
    fn fields() -> &'static [Field<Self>];

    /// Builds a model from a materialized instance. Properties the instance
    /// does not carry keep their default.
    fn load(mut instance: Instance) -> Result<Self> {
        if instance.ty != Self::NAME {
            return Err(Error::type_conversion(instance.into(), Self::NAME));
        }

        let mut model = Self::default();

        for field in Self::fields() {
            if let Some(value) = instance.take(field.name) {
                (field.set)(&mut model, value)?;
            }
        }

        Ok(model)
    }

    fn to_instance(&self) -> Instance {
        let mut instance = Instance::new(Self::NAME);

        for field in Self::fields() {
            instance.set(field.name, (field.get)(self));
        }

        instance
    }
}

/// Reads and writes one property of a model.
pub struct Field<M> {
    pub name: &'static str,
    pub get: fn(&M) -> Value,
    pub set: fn(&mut M, Value) -> Result<()>,
}

impl<M> std::fmt::Debug for Field<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field").field("name", &self.name).finish()
    }
}
