use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace, warn};

use super::properties::{ColumnSortingProperties, ColumnSortingSettings};
use super::sort_order::SortOrder;
use super::validation::has_unique_columns;
use crate::index::host::{ColumnIndexHost, ColumnTranslator, IndexMapRegistry};
use crate::index::index_map::{PhysicalIndexToValueMap, SharedIndexMap};

/// Name the sort states map is registered under with the host
pub const SORT_STATES_MAP_NAME: &str = "columnSortingStates";

/// What is stored per physical column while it is sorted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortEntry {
    pub sort_order: SortOrder,
    /// Lower values are applied first in a multi-column sort
    pub priority: usize,
}

/// Sort state of one column as seen by callers (visual column index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortState {
    pub column: usize,
    pub sort_order: SortOrder,
}

impl SortState {
    pub fn new(column: usize, sort_order: SortOrder) -> Self {
        Self { column, sort_order }
    }
}

type SortStatesMap = Rc<RefCell<PhysicalIndexToValueMap<SortEntry>>>;

/// Keeps track of which columns are sorted, in which direction and with
/// which priority.
///
/// Callers talk in visual column indexes; entries are stored by physical
/// index in a map registered with the host, so they follow their column when
/// the grid moves, hides, inserts or removes columns.
pub struct ColumnStatesManager {
    host: Rc<dyn ColumnIndexHost>,

    /// `None` once the manager has been destroyed
    sorted_column_map: Option<SortStatesMap>,

    properties: ColumnSortingProperties,
}

impl ColumnStatesManager {
    /// Create a manager with default column properties and register its
    /// storage with the host
    pub fn new(host: Rc<dyn ColumnIndexHost>) -> Self {
        let map: SortStatesMap = Rc::new(RefCell::new(PhysicalIndexToValueMap::new()));
        host.register_map(SORT_STATES_MAP_NAME, map.clone());
        debug!(target: "column_sorting", "Registered sort states map '{}'", SORT_STATES_MAP_NAME);

        Self {
            host,
            sorted_column_map: Some(map),
            properties: ColumnSortingProperties::default(),
        }
    }

    /// Create a manager and apply `settings` on top of the defaults
    pub fn with_settings(host: Rc<dyn ColumnIndexHost>, settings: &ColumnSortingSettings) -> Self {
        let mut manager = Self::new(host);
        manager.update_all_columns_properties(settings);
        manager
    }

    /// Overwrite the column properties present in `settings`
    pub fn update_all_columns_properties(&mut self, settings: &ColumnSortingSettings) {
        self.properties.merge(settings);
        trace!(target: "column_sorting", "Column properties now {:?}", self.properties);
    }

    /// Same as [`Self::update_all_columns_properties`] for loosely typed
    /// settings. Anything other than a JSON object is ignored.
    pub fn update_all_columns_properties_from_value(&mut self, settings: &Value) {
        match ColumnSortingSettings::from_value(settings) {
            Some(settings) => self.update_all_columns_properties(&settings),
            None => trace!(target: "column_sorting", "Ignoring non-object column settings"),
        }
    }

    /// Properties applied to every column
    pub fn get_all_columns_properties(&self) -> ColumnSortingProperties {
        self.properties.clone()
    }

    pub fn get_sort_order_of_column(&self, column: usize) -> Option<SortOrder> {
        self.entry_of_column(column).map(|entry| entry.sort_order)
    }

    pub fn is_column_sorted(&self, column: usize) -> bool {
        self.entry_of_column(column).is_some()
    }

    /// Physical indexes of sorted columns in priority order
    pub fn get_sorted_columns(&self) -> Vec<usize> {
        self.entries_by_priority()
            .into_iter()
            .map(|(physical, _)| physical)
            .collect()
    }

    /// Position of a column in the sort queue, `None` when it is not sorted
    pub fn get_index_of_column_in_sort_queue(&self, column: usize) -> Option<usize> {
        let physical = self.host.to_physical_column(column)?;
        self.get_sorted_columns()
            .iter()
            .position(|&sorted| sorted == physical)
    }

    pub fn get_number_of_sorted_columns(&self) -> usize {
        match &self.sorted_column_map {
            Some(map) => map.borrow().iter_filled().count(),
            None => 0,
        }
    }

    pub fn is_list_of_sorted_columns_empty(&self) -> bool {
        self.get_number_of_sorted_columns() == 0
    }

    pub fn get_column_sort_state(&self, column: usize) -> Option<SortState> {
        self.entry_of_column(column)
            .map(|entry| SortState::new(column, entry.sort_order))
    }

    /// Sort states in priority order, with visual column indexes.
    ///
    /// Sorted columns that are not displayed (hidden) are left out but keep
    /// their stored state. Empty after [`Self::destroy`].
    pub fn get_sort_states(&self) -> Vec<SortState> {
        self.entries_by_priority()
            .into_iter()
            .filter_map(|(physical, entry)| match self.host.to_visual_column(physical) {
                Some(column) => Some(SortState::new(column, entry.sort_order)),
                None => {
                    trace!(target: "column_sorting", "Sorted physical column {} is not displayed", physical);
                    None
                }
            })
            .collect()
    }

    /// Replace the whole sort state. Input order is priority order.
    ///
    /// When a column is listed more than once the last occurrence wins and
    /// takes that position in the queue; priorities stay dense.
    pub fn set_sort_states(&mut self, states: &[SortState]) {
        let Some(map) = &self.sorted_column_map else {
            warn!(target: "column_sorting", "set_sort_states called on a destroyed manager");
            return;
        };

        let mut queue: Vec<(usize, SortOrder)> = Vec::with_capacity(states.len());
        for state in states {
            let Some(physical) = self.host.to_physical_column(state.column) else {
                warn!(target: "column_sorting", "Skipping sort state for unknown column {}", state.column);
                continue;
            };
            if let Some(pos) = queue.iter().position(|&(p, _)| p == physical) {
                warn!(target: "column_sorting", "Column {} listed twice, keeping the later sort state", state.column);
                queue.remove(pos);
            }
            queue.push((physical, state.sort_order));
        }

        let mut map = map.borrow_mut();
        map.clear();

        let mut priority = 0;
        for (physical, sort_order) in queue {
            let entry = SortEntry {
                sort_order,
                priority,
            };
            if map.set_value_at_index(physical, Some(entry)) {
                priority += 1;
            } else {
                warn!(target: "column_sorting", "No storage slot for physical column {}", physical);
            }
        }

        debug!(target: "column_sorting", "Sort states set: {} column(s) sorted", priority);
    }

    /// Drop every sort state
    pub fn clear_sort_states(&mut self) {
        self.set_sort_states(&[]);
    }

    /// Apply an initial sort (from configuration) if it is consistent with
    /// the current columns. Returns whether it was applied.
    pub fn apply_initial_config(&mut self, states: &[SortState]) -> bool {
        let translatable = states
            .iter()
            .all(|state| self.host.to_physical_column(state.column).is_some());
        if !translatable || !has_unique_columns(states) {
            warn!(target: "column_sorting", "Initial sort {:?} does not match the grid, ignoring", states);
            return false;
        }

        self.set_sort_states(states);
        true
    }

    /// Unregister the storage from the host and release it.
    ///
    /// The reserved name is only unregistered while it still points at this
    /// manager's map; a newer manager on the same host keeps its registration.
    pub fn destroy(&mut self) {
        let Some(map) = self.sorted_column_map.take() else {
            return;
        };

        let own: SharedIndexMap = map;
        let still_registered = self
            .host
            .registered_map(SORT_STATES_MAP_NAME)
            .is_some_and(|registered| Rc::ptr_eq(&registered, &own));
        if still_registered {
            self.host.unregister_map(SORT_STATES_MAP_NAME);
        } else {
            debug!(target: "column_sorting", "Sort states map '{}' owned by another manager, leaving it registered", SORT_STATES_MAP_NAME);
        }
        debug!(target: "column_sorting", "Column states manager destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.sorted_column_map.is_none()
    }

    /// Raw stored entries as `(physical, entry)` ordered by priority
    pub fn entries_by_priority(&self) -> Vec<(usize, SortEntry)> {
        let Some(map) = &self.sorted_column_map else {
            return Vec::new();
        };

        let mut entries: Vec<(usize, SortEntry)> = map
            .borrow()
            .iter_filled()
            .map(|(physical, entry)| (physical, *entry))
            .collect();
        entries.sort_by_key(|(_, entry)| entry.priority);
        entries
    }

    fn entry_of_column(&self, column: usize) -> Option<SortEntry> {
        let Some(map) = &self.sorted_column_map else {
            warn!(target: "column_sorting", "Column {} queried on a destroyed manager", column);
            return None;
        };
        let physical = self.host.to_physical_column(column)?;
        map.borrow().get_value_at_index(physical).copied()
    }
}

impl fmt::Debug for ColumnStatesManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnStatesManager")
            .field("entries", &self.entries_by_priority())
            .field("destroyed", &self.is_destroyed())
            .field("properties", &self.properties)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::index_mapper::IndexMapper;

    fn manager_with(columns: usize) -> (Rc<IndexMapper>, ColumnStatesManager) {
        let mapper = Rc::new(IndexMapper::new(columns));
        let manager = ColumnStatesManager::new(mapper.clone());
        (mapper, manager)
    }

    #[test]
    fn test_new_registers_map() {
        let (mapper, manager) = manager_with(4);
        assert!(mapper.has_map(SORT_STATES_MAP_NAME));
        assert!(manager.is_list_of_sorted_columns_empty());
        assert_eq!(manager.get_number_of_sorted_columns(), 0);
        assert!(manager.get_sort_states().is_empty());
    }

    #[test]
    fn test_priority_follows_input_order() {
        let (_mapper, mut manager) = manager_with(5);
        manager.set_sort_states(&[
            SortState::new(3, SortOrder::Descending),
            SortState::new(0, SortOrder::Ascending),
        ]);

        let entries = manager.entries_by_priority();
        assert_eq!(
            entries,
            vec![
                (
                    3,
                    SortEntry {
                        sort_order: SortOrder::Descending,
                        priority: 0
                    }
                ),
                (
                    0,
                    SortEntry {
                        sort_order: SortOrder::Ascending,
                        priority: 1
                    }
                ),
            ]
        );
    }

    #[test]
    fn test_repeated_column_keeps_last_state() {
        let (_mapper, mut manager) = manager_with(3);
        manager.set_sort_states(&[
            SortState::new(1, SortOrder::Ascending),
            SortState::new(1, SortOrder::Descending),
        ]);
        assert_eq!(
            manager.entries_by_priority(),
            vec![(
                1,
                SortEntry {
                    sort_order: SortOrder::Descending,
                    priority: 0
                }
            )]
        );
        assert_eq!(manager.get_number_of_sorted_columns(), 1);

        manager.set_sort_states(&[
            SortState::new(0, SortOrder::Ascending),
            SortState::new(1, SortOrder::Ascending),
            SortState::new(0, SortOrder::Descending),
        ]);
        let priorities: Vec<(usize, SortOrder, usize)> = manager
            .entries_by_priority()
            .into_iter()
            .map(|(physical, entry)| (physical, entry.sort_order, entry.priority))
            .collect();
        assert_eq!(
            priorities,
            vec![(1, SortOrder::Ascending, 0), (0, SortOrder::Descending, 1)]
        );
        assert_eq!(
            manager.get_sort_states(),
            vec![
                SortState::new(1, SortOrder::Ascending),
                SortState::new(0, SortOrder::Descending),
            ]
        );
    }

    #[test]
    fn test_unknown_columns_are_skipped() {
        let (_mapper, mut manager) = manager_with(2);
        manager.set_sort_states(&[
            SortState::new(7, SortOrder::Ascending),
            SortState::new(1, SortOrder::Descending),
        ]);
        assert_eq!(
            manager.get_sort_states(),
            vec![SortState::new(1, SortOrder::Descending)]
        );
        assert_eq!(manager.entries_by_priority()[0].1.priority, 0);
    }

    #[test]
    fn test_apply_initial_config() {
        let (_mapper, mut manager) = manager_with(3);
        assert!(!manager.apply_initial_config(&[SortState::new(5, SortOrder::Ascending)]));
        assert!(!manager.apply_initial_config(&[
            SortState::new(1, SortOrder::Ascending),
            SortState::new(1, SortOrder::Descending),
        ]));
        assert!(manager.is_list_of_sorted_columns_empty());

        assert!(manager.apply_initial_config(&[SortState::new(2, SortOrder::Ascending)]));
        assert!(manager.is_column_sorted(2));
    }

    #[test]
    fn test_destroy_unregisters() {
        let (mapper, mut manager) = manager_with(3);
        manager.set_sort_states(&[SortState::new(0, SortOrder::Ascending)]);
        manager.destroy();

        assert!(manager.is_destroyed());
        assert!(!mapper.has_map(SORT_STATES_MAP_NAME));
        assert!(manager.get_sort_states().is_empty());
        assert!(manager.get_sorted_columns().is_empty());
        assert_eq!(manager.get_sort_order_of_column(0), None);
        assert!(!manager.is_column_sorted(0));

        // Mutations are ignored, a second destroy is harmless
        manager.set_sort_states(&[SortState::new(1, SortOrder::Ascending)]);
        manager.destroy();
        assert!(manager.get_sort_states().is_empty());
    }

    #[test]
    fn test_properties_from_value() {
        let (_mapper, mut manager) = manager_with(1);
        manager.update_all_columns_properties_from_value(&serde_json::json!("not an object"));
        assert!(manager.get_all_columns_properties().indicator);

        manager.update_all_columns_properties_from_value(&serde_json::json!({"indicator": false}));
        assert!(!manager.get_all_columns_properties().indicator);
    }
}
