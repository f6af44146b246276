use tabula_core::{Error, Result};

/// One segment of a filter or include path: a property name, optionally
/// followed by a cast, as in `Child[ChildDerived]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Step {
    pub(super) name: String,
    pub(super) cast: Option<String>,
}

impl Step {
    /// Fails if the step carries a cast; used where the property is not an
    /// entity navigation.
    pub(super) fn no_cast(&self, path: &str) -> Result<()> {
        match &self.cast {
            Some(cast) => Err(Error::configuration(format!(
                "`{path}`: cast `[{cast}]` on `{}`, which does not navigate to an entity",
                self.name
            ))),
            None => Ok(()),
        }
    }
}

/// Splits a dot-separated path into steps.
pub(super) fn parse(path: &str) -> Result<Vec<Step>> {
    path.split('.').map(|segment| parse_step(path, segment)).collect()
}

fn parse_step(path: &str, segment: &str) -> Result<Step> {
    let invalid = || Error::configuration(format!("invalid path `{path}`"));

    let (name, cast) = match segment.split_once('[') {
        Some((name, rest)) => {
            let cast = rest.strip_suffix(']').ok_or_else(invalid)?;

            if cast.is_empty() || cast.contains(['[', ']']) {
                return Err(invalid());
            }

            (name, Some(cast.to_string()))
        }
        None => (segment, None),
    };

    if name.is_empty() || name.contains(']') {
        return Err(invalid());
    }

    Ok(Step {
        name: name.to_string(),
        cast,
    })
}
