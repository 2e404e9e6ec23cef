use crate::models::AggregateTable;

/// Key counts from folding one chunk's partials into the running table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Keys seen for the first time
    pub inserted: usize,
    /// Keys already present, i.e. station-days spanning a chunk boundary
    pub combined: usize,
}

/// Fold `partial` into `global`.
///
/// `partial` must come from input that arrived after everything already in
/// `global`; equal first/last timestamps are resolved in arrival order.
/// Min and max combine directly, first and last by their carried timestamps.
pub fn merge(global: &mut AggregateTable, partial: AggregateTable) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();

    for (key, aggregate) in partial {
        if global.upsert(key, aggregate) {
            outcome.combined += 1;
        } else {
            outcome.inserted += 1;
        }
    }

    outcome
}
