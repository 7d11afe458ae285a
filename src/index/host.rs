//! Interfaces the grid host provides to column-level state components.

use super::index_map::SharedIndexMap;

/// Translates between the displayed (visual) column order and stable
/// (physical) column identity.
pub trait ColumnTranslator {
    /// Physical index of the column rendered at `visual_column`
    fn to_physical_column(&self, visual_column: usize) -> Option<usize>;

    /// Visual position of a physical column, `None` if it is not displayed
    fn to_visual_column(&self, physical_column: usize) -> Option<usize>;
}

/// Keeps registered index maps aligned with structural column changes.
pub trait IndexMapRegistry {
    /// Register a map under `name`, replacing any map with the same name
    fn register_map(&self, name: &str, map: SharedIndexMap);

    /// Drop the map registered under `name`, if any
    fn unregister_map(&self, name: &str);

    /// The map currently registered under `name`
    fn registered_map(&self, name: &str) -> Option<SharedIndexMap>;
}

/// Everything a column state component needs from its host
pub trait ColumnIndexHost: ColumnTranslator + IndexMapRegistry {}

impl<T: ColumnTranslator + IndexMapRegistry + ?Sized> ColumnIndexHost for T {}
