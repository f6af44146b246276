use indexmap::IndexMap;

/// Table alias allocation for one plan.
///
/// Each context (`M`, `T`, `S`, or a branch prefix such as `M1B2T`) has its
/// own counter starting at 1.
#[derive(Debug, Default)]
pub(super) struct Aliases {
    counters: IndexMap<String, usize>,
}

impl Aliases {
    pub(super) fn next(&mut self, context: &str) -> String {
        let counter = self.counters.entry(context.to_string()).or_insert(0);
        *counter += 1;
        format!("{context}{counter}")
    }
}
