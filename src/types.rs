//! Public types for the dicomdex API.

use serde::Serialize;

/// Result of one import pass over a path list.
///
/// `processed` counts files whose insert was invoked (≤ `total` when the pass
/// was cancelled). The `new_*` counters aggregate the gateway's per-insert
/// [`InsertOutcome`](crate::store::InsertOutcome) notifications; they are
/// observational and carry no control-flow weight.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ImportSummary {
    /// Number of paths handed to the pass.
    pub total: usize,
    /// Number of insert invocations actually made.
    pub processed: usize,
    /// True when the pass stopped on a cancellation request rather than
    /// exhausting the list. Partial work is kept either way.
    pub canceled: bool,
    pub new_patients: usize,
    pub new_studies: usize,
    pub new_series: usize,
    pub new_instances: usize,
}

impl ImportSummary {
    /// Fold one gateway outcome into the aggregate counters.
    pub(crate) fn absorb(&mut self, outcome: crate::store::InsertOutcome) {
        self.new_patients += usize::from(outcome.new_patient);
        self.new_studies += usize::from(outcome.new_study);
        self.new_series += usize::from(outcome.new_series);
        self.new_instances += usize::from(outcome.new_instance);
    }
}
