/// A table in a FROM or JOIN clause: `[name] AS [alias]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRef {
    pub name: String,
    pub alias: String,
}

impl TableRef {
    pub fn new(name: impl Into<String>, alias: impl Into<String>) -> TableRef {
        TableRef {
            name: name.into(),
            alias: alias.into(),
        }
    }
}
