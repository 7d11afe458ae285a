use crate::debug::debug_trace::{DebugSection, DebugTrace, Priority};
use crate::sorting::ColumnStatesManager;

/// Debug trace implementation for ColumnStatesManager
pub struct ColumnStatesDebugProvider<'a> {
    manager: &'a ColumnStatesManager,
}

impl<'a> ColumnStatesDebugProvider<'a> {
    pub fn new(manager: &'a ColumnStatesManager) -> Self {
        Self { manager }
    }

    fn sort_state_section(&self) -> DebugSection {
        let section = DebugSection::new("SORT STATE", Priority::SORT_STATE);
        if self.manager.is_destroyed() {
            return section.line("Manager destroyed, storage released");
        }

        let mut section = section
            .field("Sorted Columns", self.manager.get_number_of_sorted_columns())
            .line("Queue (priority order):");

        // Storage view (physical) next to what callers see (visual)
        for (physical, entry) in self.manager.entries_by_priority() {
            section.push_line(format!(
                "  P[{:2}] DT[{:3}] {} {}",
                entry.priority,
                physical,
                entry.sort_order,
                entry.sort_order.indicator()
            ));
        }

        let states = self.manager.get_sort_states();
        section = section.field("Visible Sort States", states.len());
        for state in &states {
            section.push_line(format!("  V[{:3}] {}", state.column, state.sort_order));
        }
        section
    }

    fn properties_section(&self) -> DebugSection {
        let props = self.manager.get_all_columns_properties();
        DebugSection::new("COLUMN SORTING PROPERTIES", Priority::PROPERTIES)
            .field("sort_empty_cells", props.sort_empty_cells)
            .field("indicator", props.indicator)
            .field("header_action", props.header_action)
            .field(
                "compare_function_factory",
                if props.has_compare_function_factory() {
                    "custom"
                } else {
                    "not configured"
                },
            )
    }
}

impl DebugTrace for ColumnStatesDebugProvider<'_> {
    fn name(&self) -> &str {
        "ColumnStates"
    }

    fn debug_sections(&self) -> Vec<DebugSection> {
        if self.manager.is_destroyed() {
            return vec![self.sort_state_section()];
        }
        vec![self.sort_state_section(), self.properties_section()]
    }

    fn debug_summary(&self) -> Option<String> {
        if self.manager.is_destroyed() {
            return Some("Sort: destroyed".to_string());
        }
        let states = self.manager.get_sort_states();
        if states.is_empty() {
            return Some("Sort: none".to_string());
        }
        let parts: Vec<String> = states
            .iter()
            .map(|s| format!("{}{}", s.column, s.sort_order.indicator()))
            .collect();
        Some(format!("Sort: {}", parts.join(", ")))
    }
}
