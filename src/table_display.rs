use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use crate::index::ColumnTranslator;
use crate::sorting::ColumnStatesManager;

/// Render the sort queue as a table: one row per sorted, displayed column
pub fn format_sort_states(
    manager: &ColumnStatesManager,
    translator: &dyn ColumnTranslator,
    column_names: &[String],
) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let headers: Vec<Cell> = ["Priority", "Visual", "Physical", "Column", "Order"]
        .iter()
        .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
        .collect();
    table.set_header(headers);

    for (queue_pos, state) in manager.get_sort_states().iter().enumerate() {
        let physical = translator.to_physical_column(state.column);
        let name = physical
            .and_then(|p| column_names.get(p))
            .map(|s| s.as_str())
            .unwrap_or("unknown");
        table.add_row(vec![
            queue_pos.to_string(),
            state.column.to_string(),
            physical.map(|p| p.to_string()).unwrap_or_default(),
            name.to_string(),
            format!("{} {}", state.sort_order, state.sort_order.indicator()),
        ]);
    }

    table.to_string()
}
