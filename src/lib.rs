pub mod config;
pub mod debug;
pub mod index;
pub mod logging;
pub mod sorting;
pub mod table_display;

pub use index::{ColumnIndexHost, IndexMapper, PhysicalIndexToValueMap};
pub use sorting::{
    ColumnSortingProperties, ColumnSortingSettings, ColumnStatesManager, SortOrder, SortState,
};
