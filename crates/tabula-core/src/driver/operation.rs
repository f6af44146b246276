use crate::stmt::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// A statement that returns rows
    Query(Sql),

    /// A statement that returns an affected-row count
    Execute(Sql),
}

/// Statement text plus its bound parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Sql {
    pub text: String,

    /// Parameter name (`@p0`, ...) and value, in placeholder order
    pub params: Vec<(String, Value)>,
}

impl Operation {
    pub fn sql(&self) -> &Sql {
        match self {
            Operation::Query(sql) | Operation::Execute(sql) => sql,
        }
    }

    pub fn is_query(&self) -> bool {
        matches!(self, Operation::Query(_))
    }
}

impl Sql {
    pub fn new(text: impl Into<String>) -> Sql {
        Sql {
            text: text.into(),
            params: vec![],
        }
    }

    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, value)| value)
    }
}

impl From<Sql> for Operation {
    fn from(value: Sql) -> Self {
        Operation::Execute(value)
    }
}
