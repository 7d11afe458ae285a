//! Column sort state: which columns are sorted, how, and in what priority.

pub mod column_states;
pub mod properties;
pub mod sort_order;
pub mod validation;

pub use column_states::{ColumnStatesManager, SortEntry, SortState, SORT_STATES_MAP_NAME};
pub use properties::{
    ColumnMeta, ColumnSortingProperties, ColumnSortingSettings, Comparator,
    CompareFunctionFactory,
};
pub use sort_order::SortOrder;
pub use validation::{are_valid_sort_states, has_unique_columns};
