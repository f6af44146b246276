use super::app::TypeDescriptor;

use indexmap::IndexMap;

/// Global defaults applied while building a schema.
#[derive(Debug, Clone)]
pub struct MappingConfig {
    /// Identity property used when a type does not name one
    pub default_identity: String,

    /// Name of the discriminator column on polymorphic root tables
    pub default_discriminator: String,

    /// Whether primitive lists keep their order unless a property says
    /// otherwise
    pub maintain_order: bool,

    /// Link independent hierarchies on separate threads
    pub parallel_linking: bool,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            default_identity: "Id".to_string(),
            default_discriminator: "_dscr".to_string(),
            maintain_order: true,
            parallel_linking: true,
        }
    }
}

impl MappingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_identity(mut self, name: impl Into<String>) -> Self {
        self.default_identity = name.into();
        self
    }

    pub fn default_discriminator(mut self, name: impl Into<String>) -> Self {
        self.default_discriminator = name.into();
        self
    }

    pub fn maintain_order(mut self, maintain_order: bool) -> Self {
        self.maintain_order = maintain_order;
        self
    }

    pub fn parallel_linking(mut self, parallel_linking: bool) -> Self {
        self.parallel_linking = parallel_linking;
        self
    }
}

/// One configured type: its descriptor plus per-type mapping choices.
#[derive(Debug, Clone)]
pub struct TypeConfig {
    pub descriptor: TypeDescriptor,

    /// Identity property; falls back to [`MappingConfig::default_identity`]
    pub identity: Option<String>,

    /// Subset of declared properties to map; `None` maps all of them
    pub properties: Option<Vec<String>>,

    /// Per-property list order policy
    pub list_order: IndexMap<String, bool>,
}

impl TypeConfig {
    pub fn new(descriptor: TypeDescriptor) -> Self {
        Self {
            descriptor,
            identity: None,
            properties: None,
            list_order: IndexMap::new(),
        }
    }

    pub fn identity(mut self, name: impl Into<String>) -> Self {
        self.identity = Some(name.into());
        self
    }

    pub fn properties<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn maintain_order(mut self, property: impl Into<String>, maintain_order: bool) -> Self {
        self.list_order.insert(property.into(), maintain_order);
        self
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }
}

impl From<TypeDescriptor> for TypeConfig {
    fn from(value: TypeDescriptor) -> Self {
        TypeConfig::new(value)
    }
}
