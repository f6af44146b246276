use tabula_core::stmt::Value;

/// A query against one configured type.
///
/// ```
/// # use tabula::Query;
/// let query = Query::new("Order")
///     .filter("Customer.Name", "Ada")
///     .include("Lines");
/// assert_eq!(query.filters().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    ty: String,

    /// Equality filters: a path and the value it must match
    filters: Vec<(String, Value)>,

    /// Navigation paths to load eagerly
    includes: Vec<String>,
}

impl Query {
    pub fn new(ty: impl Into<String>) -> Query {
        Query {
            ty: ty.into(),
            filters: vec![],
            includes: vec![],
        }
    }

    /// Requires the property at `path` to equal `value`. Filters are
    /// AND-combined.
    pub fn filter(mut self, path: impl Into<String>, value: impl Into<Value>) -> Query {
        self.filters.push((path.into(), value.into()));
        self
    }

    pub fn include(mut self, path: impl Into<String>) -> Query {
        self.includes.push(path.into());
        self
    }

    pub fn ty(&self) -> &str {
        &self.ty
    }

    pub fn filters(&self) -> &[(String, Value)] {
        &self.filters
    }

    pub fn includes(&self) -> &[String] {
        &self.includes
    }
}
