use std::collections::HashSet;
use tracing::warn;

use super::column_states::SortState;

/// Check sort states coming from outside (config, saved layouts) before they
/// are applied: every column must exist and appear at most once.
pub fn are_valid_sort_states(states: &[SortState], column_count: usize) -> bool {
    if let Some(state) = states.iter().find(|s| s.column >= column_count) {
        warn!(target: "column_sorting", "Column {} is out of range (column count {})", state.column, column_count);
        return false;
    }

    has_unique_columns(states)
}

/// True when no column is listed twice
pub fn has_unique_columns(states: &[SortState]) -> bool {
    let mut seen = HashSet::with_capacity(states.len());
    for state in states {
        if !seen.insert(state.column) {
            warn!(target: "column_sorting", "Column {} appears more than once in sort states", state.column);
            return false;
        }
    }
    true
}
