use std::cell::RefCell;
use std::rc::Rc;

/// A container keyed by physical column index that a registry keeps aligned
/// with the grid's columns when they are inserted or removed.
pub trait IndexMap {
    /// Reset the map to `length` empty slots
    fn init(&mut self, length: usize);

    /// Open `count` empty slots starting at physical index `first`
    fn insert(&mut self, first: usize, count: usize);

    /// Drop the slots at the given physical indexes, closing the gaps
    fn remove(&mut self, removed: &[usize]);

    /// Number of slots (one per physical column)
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shared handle used by registries to reach a registered map
pub type SharedIndexMap = Rc<RefCell<dyn IndexMap>>;

/// Sparse physical-index-keyed storage: one optional value per column
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalIndexToValueMap<T> {
    values: Vec<Option<T>>,
}

impl<T> PhysicalIndexToValueMap<T> {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Create a map with `length` empty slots
    pub fn with_length(length: usize) -> Self {
        let mut values = Vec::with_capacity(length);
        values.resize_with(length, || None);
        Self { values }
    }

    /// Value stored for a physical index, `None` when empty or out of range
    pub fn get_value_at_index(&self, physical_index: usize) -> Option<&T> {
        self.values.get(physical_index).and_then(Option::as_ref)
    }

    /// Store (or empty, with `None`) the slot for a physical index.
    /// Returns false when the index has no slot.
    pub fn set_value_at_index(&mut self, physical_index: usize, value: Option<T>) -> bool {
        match self.values.get_mut(physical_index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// All slots in physical-index order
    pub fn get_values(&self) -> &[Option<T>] {
        &self.values
    }

    /// Iterate non-empty slots as `(physical_index, value)`
    pub fn iter_filled(&self) -> impl Iterator<Item = (usize, &T)> {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(idx, value)| value.as_ref().map(|v| (idx, v)))
    }

    /// Empty every slot, keeping one slot per column
    pub fn clear(&mut self) {
        self.values.iter_mut().for_each(|slot| *slot = None);
    }
}

impl<T> Default for PhysicalIndexToValueMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IndexMap for PhysicalIndexToValueMap<T> {
    fn init(&mut self, length: usize) {
        self.values.clear();
        self.values.resize_with(length, || None);
    }

    fn insert(&mut self, first: usize, count: usize) {
        let at = first.min(self.values.len());
        let tail = self.values.split_off(at);
        self.values
            .extend(std::iter::repeat_with(|| None).take(count));
        self.values.extend(tail);
    }

    fn remove(&mut self, removed: &[usize]) {
        let mut idx = 0;
        self.values.retain(|_| {
            let keep = !removed.contains(&idx);
            idx += 1;
            keep
        });
    }

    fn len(&self) -> usize {
        self.values.len()
    }
}
