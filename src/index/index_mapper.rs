use anyhow::{ensure, Result};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, trace};

use super::host::{ColumnTranslator, IndexMapRegistry};
use super::index_map::SharedIndexMap;

/// Column layout: display order of every physical column plus hidden flags
#[derive(Debug, Clone)]
struct ColumnLayout {
    /// Physical indexes in display order, hidden columns included
    order: Vec<usize>,

    /// Hidden flag per physical index
    hidden: Vec<bool>,

    /// Physical indexes that are displayed, in display order (derived)
    visible_columns: Vec<usize>,
}

impl ColumnLayout {
    fn new(column_count: usize) -> Self {
        let mut layout = Self {
            order: (0..column_count).collect(),
            hidden: vec![false; column_count],
            visible_columns: Vec::new(),
        };
        layout.rebuild_visible();
        layout
    }

    fn rebuild_visible(&mut self) {
        self.visible_columns = self
            .order
            .iter()
            .copied()
            .filter(|&physical| !self.hidden[physical])
            .collect();
    }
}

/// Reference grid host: translates visual ↔ physical column indexes and keeps
/// registered index maps aligned when columns are inserted or removed.
///
/// Moving and hiding columns only changes the visual order, so registered
/// maps are left untouched by those operations.
pub struct IndexMapper {
    layout: RefCell<ColumnLayout>,
    maps: RefCell<Vec<(String, SharedIndexMap)>>,
}

impl IndexMapper {
    /// Create a mapper for `column_count` columns in their natural order
    pub fn new(column_count: usize) -> Self {
        Self {
            layout: RefCell::new(ColumnLayout::new(column_count)),
            maps: RefCell::new(Vec::new()),
        }
    }

    /// Number of physical columns, hidden ones included
    pub fn column_count(&self) -> usize {
        self.layout.borrow().order.len()
    }

    /// Number of displayed columns
    pub fn visible_column_count(&self) -> usize {
        self.layout.borrow().visible_columns.len()
    }

    /// Physical indexes of displayed columns, in display order
    pub fn visible_column_indices(&self) -> Vec<usize> {
        self.layout.borrow().visible_columns.clone()
    }

    /// Physical indexes of all columns in display order, hidden ones included
    pub fn column_order(&self) -> Vec<usize> {
        self.layout.borrow().order.clone()
    }

    pub fn is_column_hidden(&self, physical_column: usize) -> bool {
        self.layout
            .borrow()
            .hidden
            .get(physical_column)
            .copied()
            .unwrap_or(false)
    }

    /// Move the column displayed at `from` so that it is displayed at `to`
    pub fn move_column(&self, from: usize, to: usize) -> bool {
        let mut layout = self.layout.borrow_mut();
        let len = layout.visible_columns.len();
        if from >= len || to >= len {
            return false;
        }
        if from == to {
            return true;
        }

        let moved = layout.visible_columns[from];
        let anchor = layout.visible_columns[to];
        layout.order.retain(|&physical| physical != moved);
        let anchor_pos = match layout.order.iter().position(|&p| p == anchor) {
            Some(pos) => pos,
            None => return false,
        };
        let insert_at = if from < to { anchor_pos + 1 } else { anchor_pos };
        layout.order.insert(insert_at, moved);
        layout.rebuild_visible();

        debug!(target: "index_mapper", "Moved physical column {} from visual {} to {}", moved, from, to);
        true
    }

    /// Replace the display order. `order` must be a permutation of all
    /// physical indexes, hidden columns included.
    pub fn set_column_order(&self, order: Vec<usize>) -> Result<()> {
        let mut layout = self.layout.borrow_mut();
        let count = layout.order.len();
        ensure!(
            order.len() == count,
            "Column order has {} entries, expected {}",
            order.len(),
            count
        );

        let mut seen = vec![false; count];
        for &physical in &order {
            ensure!(physical < count, "Column index {} out of bounds", physical);
            ensure!(!seen[physical], "Column index {} listed twice", physical);
            seen[physical] = true;
        }

        layout.order = order;
        layout.rebuild_visible();
        debug!(target: "index_mapper", "Column order set to {:?}", layout.order);
        Ok(())
    }

    /// Hide the column displayed at `visual_column`
    pub fn hide_column(&self, visual_column: usize) -> bool {
        let mut layout = self.layout.borrow_mut();
        let Some(&physical) = layout.visible_columns.get(visual_column) else {
            return false;
        };
        layout.hidden[physical] = true;
        layout.rebuild_visible();
        debug!(target: "index_mapper", "Hid physical column {} (visual {})", physical, visual_column);
        true
    }

    /// Show a previously hidden physical column at its place in the order
    pub fn show_column(&self, physical_column: usize) -> bool {
        let mut layout = self.layout.borrow_mut();
        if layout.hidden.get(physical_column) != Some(&true) {
            return false;
        }
        layout.hidden[physical_column] = false;
        layout.rebuild_visible();
        debug!(target: "index_mapper", "Showed physical column {}", physical_column);
        true
    }

    /// Insert `count` columns so the first one is displayed at `visual_at`.
    ///
    /// New physical indexes start at the physical index currently displayed
    /// at `visual_at` (or at the end); existing indexes at or above it shift.
    pub fn insert_columns(&self, visual_at: usize, count: usize) {
        if count == 0 {
            return;
        }

        let first = {
            let mut layout = self.layout.borrow_mut();
            let column_count = layout.order.len();
            let anchor = layout.visible_columns.get(visual_at).copied();
            let first = anchor.unwrap_or(column_count);

            for physical in layout.order.iter_mut() {
                if *physical >= first {
                    *physical += count;
                }
            }
            let at = first.min(layout.hidden.len());
            let tail = layout.hidden.split_off(at);
            layout.hidden.extend(std::iter::repeat(false).take(count));
            layout.hidden.extend(tail);

            let insert_pos = match anchor {
                Some(anchor) => layout
                    .order
                    .iter()
                    .position(|&p| p == anchor + count)
                    .unwrap_or(layout.order.len()),
                None => layout.order.len(),
            };
            let tail = layout.order.split_off(insert_pos);
            layout.order.extend(first..first + count);
            layout.order.extend(tail);
            layout.rebuild_visible();
            first
        };

        debug!(target: "index_mapper", "Inserted {} column(s) at physical {} (visual {})", count, first, visual_at);
        for (name, map) in self.maps.borrow().iter() {
            trace!(target: "index_mapper", "Realigning map '{}' after insert", name);
            map.borrow_mut().insert(first, count);
        }
    }

    /// Remove the columns displayed at the given visual positions
    pub fn remove_columns(&self, visual_columns: &[usize]) {
        let removed = {
            let mut layout = self.layout.borrow_mut();
            let mut removed: Vec<usize> = visual_columns
                .iter()
                .filter_map(|&visual| layout.visible_columns.get(visual).copied())
                .collect();
            removed.sort_unstable();
            removed.dedup();
            if removed.is_empty() {
                return;
            }

            layout.order.retain(|p| removed.binary_search(p).is_err());
            for physical in layout.order.iter_mut() {
                let shift = removed.partition_point(|&r| r < *physical);
                *physical -= shift;
            }
            let mut idx = 0;
            layout.hidden.retain(|_| {
                let keep = removed.binary_search(&idx).is_err();
                idx += 1;
                keep
            });
            layout.rebuild_visible();
            removed
        };

        debug!(target: "index_mapper", "Removed physical columns {:?}", removed);
        for (name, map) in self.maps.borrow().iter() {
            trace!(target: "index_mapper", "Realigning map '{}' after remove", name);
            map.borrow_mut().remove(&removed);
        }
    }

    /// Whether a map is registered under `name`
    pub fn has_map(&self, name: &str) -> bool {
        self.maps.borrow().iter().any(|(n, _)| n == name)
    }

    /// Number of registered maps
    pub fn map_count(&self) -> usize {
        self.maps.borrow().len()
    }

    /// Names of registered maps, in registration order
    pub fn registered_map_names(&self) -> Vec<String> {
        self.maps.borrow().iter().map(|(n, _)| n.clone()).collect()
    }
}

impl ColumnTranslator for IndexMapper {
    fn to_physical_column(&self, visual_column: usize) -> Option<usize> {
        self.layout
            .borrow()
            .visible_columns
            .get(visual_column)
            .copied()
    }

    fn to_visual_column(&self, physical_column: usize) -> Option<usize> {
        self.layout
            .borrow()
            .visible_columns
            .iter()
            .position(|&p| p == physical_column)
    }
}

impl IndexMapRegistry for IndexMapper {
    fn register_map(&self, name: &str, map: SharedIndexMap) {
        map.borrow_mut().init(self.column_count());

        let mut maps = self.maps.borrow_mut();
        maps.retain(|(n, _)| n != name);
        maps.push((name.to_string(), map));
        debug!(target: "index_mapper", "Registered index map '{}'", name);
    }

    fn unregister_map(&self, name: &str) {
        let mut maps = self.maps.borrow_mut();
        let before = maps.len();
        maps.retain(|(n, _)| n != name);
        if maps.len() != before {
            debug!(target: "index_mapper", "Unregistered index map '{}'", name);
        }
    }

    fn registered_map(&self, name: &str) -> Option<SharedIndexMap> {
        self.maps
            .borrow()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, map)| Rc::clone(map))
    }
}

impl std::fmt::Debug for IndexMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexMapper")
            .field("layout", &*self.layout.borrow())
            .field("maps", &self.registered_map_names())
            .finish()
    }
}
