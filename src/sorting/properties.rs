use serde::Deserialize;
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use super::sort_order::SortOrder;

/// Compares two cell values of one column
pub type Comparator = Box<dyn Fn(&Value, &Value) -> Ordering>;

/// Builds the comparator used for a column sorted in a given direction
pub type CompareFunctionFactory = Rc<dyn Fn(SortOrder, &ColumnMeta) -> Comparator>;

/// Column description handed to a [`CompareFunctionFactory`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMeta {
    pub physical_column: usize,
    pub visual_column: Option<usize>,
    pub name: String,
}

impl ColumnMeta {
    pub fn new(physical_column: usize, name: impl Into<String>) -> Self {
        Self {
            physical_column,
            visual_column: None,
            name: name.into(),
        }
    }

    pub fn with_visual_column(mut self, visual_column: usize) -> Self {
        self.visual_column = Some(visual_column);
        self
    }
}

/// Sorting behaviour applied to every column unless a column overrides it
#[derive(Clone)]
pub struct ColumnSortingProperties {
    /// Whether empty cells take part in sorting instead of staying at the end
    pub sort_empty_cells: bool,

    /// Show the sort direction indicator in the header
    pub indicator: bool,

    /// Clicking the header changes the sort
    pub header_action: bool,

    /// Only present when explicitly configured
    pub compare_function_factory: Option<CompareFunctionFactory>,
}

impl Default for ColumnSortingProperties {
    fn default() -> Self {
        Self {
            sort_empty_cells: false,
            indicator: true,
            header_action: true,
            compare_function_factory: None,
        }
    }
}

impl ColumnSortingProperties {
    /// Overwrite the fields present in `settings`
    pub fn merge(&mut self, settings: &ColumnSortingSettings) {
        if let Some(sort_empty_cells) = settings.sort_empty_cells {
            self.sort_empty_cells = sort_empty_cells;
        }
        if let Some(indicator) = settings.indicator {
            self.indicator = indicator;
        }
        if let Some(header_action) = settings.header_action {
            self.header_action = header_action;
        }
        if let Some(factory) = &settings.compare_function_factory {
            self.compare_function_factory = factory.clone();
        }
    }

    /// Properties of a single column: these defaults with its overrides applied
    pub fn with_overrides(&self, overrides: &ColumnSortingSettings) -> Self {
        let mut merged = self.clone();
        merged.merge(overrides);
        merged
    }

    /// Comparator for a column, if a factory has been configured
    pub fn comparator_for(&self, sort_order: SortOrder, meta: &ColumnMeta) -> Option<Comparator> {
        self.compare_function_factory
            .as_ref()
            .map(|factory| factory(sort_order, meta))
    }

    pub fn has_compare_function_factory(&self) -> bool {
        self.compare_function_factory.is_some()
    }
}

impl fmt::Debug for ColumnSortingProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("ColumnSortingProperties");
        s.field("sort_empty_cells", &self.sort_empty_cells)
            .field("indicator", &self.indicator)
            .field("header_action", &self.header_action);
        if self.compare_function_factory.is_some() {
            s.field("compare_function_factory", &"<fn>");
        }
        s.finish()
    }
}

/// Partial update for [`ColumnSortingProperties`]; absent fields are left alone
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ColumnSortingSettings {
    pub sort_empty_cells: Option<bool>,
    pub indicator: Option<bool>,
    pub header_action: Option<bool>,
    /// `Some(None)` removes a previously configured factory
    #[serde(skip)]
    pub compare_function_factory: Option<Option<CompareFunctionFactory>>,
}

impl ColumnSortingSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sort_empty_cells(mut self, value: bool) -> Self {
        self.sort_empty_cells = Some(value);
        self
    }

    pub fn indicator(mut self, value: bool) -> Self {
        self.indicator = Some(value);
        self
    }

    pub fn header_action(mut self, value: bool) -> Self {
        self.header_action = Some(value);
        self
    }

    pub fn compare_function_factory(mut self, factory: CompareFunctionFactory) -> Self {
        self.compare_function_factory = Some(Some(factory));
        self
    }

    /// Go back to the default comparison for every column
    pub fn clear_compare_function_factory(mut self) -> Self {
        self.compare_function_factory = Some(None);
        self
    }

    /// Read settings from a loosely typed JSON object.
    ///
    /// Returns `None` for anything that is not an object. Keys are accepted in
    /// camelCase or snake_case; unknown keys and values of the wrong type are
    /// skipped. A `null` compare function factory clears the configured one.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let flag = |camel: &str, snake: &str| {
            obj.get(camel)
                .or_else(|| obj.get(snake))
                .and_then(Value::as_bool)
        };

        let clears_factory = obj
            .get("compareFunctionFactory")
            .or_else(|| obj.get("compare_function_factory"))
            .is_some_and(Value::is_null);

        Some(Self {
            sort_empty_cells: flag("sortEmptyCells", "sort_empty_cells"),
            indicator: flag("indicator", "indicator"),
            header_action: flag("headerAction", "header_action"),
            compare_function_factory: clears_factory.then_some(None),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.sort_empty_cells.is_none()
            && self.indicator.is_none()
            && self.header_action.is_none()
            && self.compare_function_factory.is_none()
    }
}

impl fmt::Debug for ColumnSortingSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSortingSettings")
            .field("sort_empty_cells", &self.sort_empty_cells)
            .field("indicator", &self.indicator)
            .field("header_action", &self.header_action)
            .field(
                "compare_function_factory",
                &self
                    .compare_function_factory
                    .as_ref()
                    .map(|factory| factory.as_ref().map(|_| "<fn>")),
            )
            .finish()
    }
}
