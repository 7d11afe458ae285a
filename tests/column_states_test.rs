// Sort state queries and mutation through the visual-index API

use column_sorting::index::IndexMapper;
use column_sorting::sorting::{
    ColumnMeta, ColumnSortingSettings, ColumnStatesManager, Comparator, CompareFunctionFactory,
    SortOrder, SortState,
};
use serde_json::{json, Value};
use std::rc::Rc;

fn create_manager(columns: usize) -> (Rc<IndexMapper>, ColumnStatesManager) {
    let mapper = Rc::new(IndexMapper::new(columns));
    let manager = ColumnStatesManager::new(mapper.clone());
    (mapper, manager)
}

#[test]
fn test_set_then_get_returns_same_states() {
    let (_mapper, mut manager) = create_manager(6);
    let states = vec![
        SortState::new(4, SortOrder::Ascending),
        SortState::new(1, SortOrder::Descending),
        SortState::new(5, SortOrder::Descending),
        SortState::new(0, SortOrder::Ascending),
    ];

    manager.set_sort_states(&states);

    assert_eq!(manager.get_sort_states(), states);
}

#[test]
fn test_priority_ordering() {
    let (_mapper, mut manager) = create_manager(5);
    let (a, b, c) = (3, 0, 2);
    manager.set_sort_states(&[
        SortState::new(a, SortOrder::Descending),
        SortState::new(b, SortOrder::Ascending),
        SortState::new(c, SortOrder::Descending),
    ]);

    assert_eq!(manager.get_index_of_column_in_sort_queue(b), Some(1));
    assert_eq!(manager.get_index_of_column_in_sort_queue(a), Some(0));
    assert_eq!(manager.get_index_of_column_in_sort_queue(c), Some(2));
    assert_eq!(manager.get_index_of_column_in_sort_queue(1), None);
    assert_eq!(manager.get_sorted_columns(), vec![a, b, c]);
}

#[test]
fn test_emptiness_before_and_after_clear() {
    let (_mapper, mut manager) = create_manager(3);
    assert!(manager.is_list_of_sorted_columns_empty());
    assert_eq!(manager.get_number_of_sorted_columns(), 0);

    manager.set_sort_states(&[SortState::new(1, SortOrder::Ascending)]);
    assert!(!manager.is_list_of_sorted_columns_empty());
    assert_eq!(manager.get_number_of_sorted_columns(), 1);

    manager.set_sort_states(&[]);
    assert!(manager.is_list_of_sorted_columns_empty());
    assert_eq!(manager.get_number_of_sorted_columns(), 0);

    manager.set_sort_states(&[SortState::new(2, SortOrder::Descending)]);
    manager.clear_sort_states();
    assert!(manager.is_list_of_sorted_columns_empty());
}

#[test]
fn test_set_replaces_previous_state() {
    let (_mapper, mut manager) = create_manager(4);
    manager.set_sort_states(&[
        SortState::new(0, SortOrder::Ascending),
        SortState::new(1, SortOrder::Ascending),
    ]);
    manager.set_sort_states(&[SortState::new(3, SortOrder::Descending)]);

    assert!(!manager.is_column_sorted(0));
    assert!(!manager.is_column_sorted(1));
    assert_eq!(
        manager.get_sort_states(),
        vec![SortState::new(3, SortOrder::Descending)]
    );
}

#[test]
fn test_point_queries_agree() {
    let (_mapper, mut manager) = create_manager(5);
    manager.set_sort_states(&[
        SortState::new(2, SortOrder::Descending),
        SortState::new(4, SortOrder::Ascending),
    ]);

    for column in 0..6 {
        let sorted = manager.is_column_sorted(column);
        assert_eq!(sorted, manager.get_column_sort_state(column).is_some());
        assert_eq!(sorted, manager.get_sort_order_of_column(column).is_some());
    }

    assert_eq!(
        manager.get_column_sort_state(2),
        Some(SortState::new(2, SortOrder::Descending))
    );
    assert_eq!(
        manager.get_sort_order_of_column(4),
        Some(SortOrder::Ascending)
    );
    assert_eq!(manager.get_column_sort_state(0), None);
}

#[test]
fn test_identity_translation_columns_match() {
    let (_mapper, mut manager) = create_manager(4);
    manager.set_sort_states(&[
        SortState::new(3, SortOrder::Ascending),
        SortState::new(1, SortOrder::Descending),
    ]);

    let visual: Vec<usize> = manager.get_sort_states().iter().map(|s| s.column).collect();
    assert_eq!(manager.get_sorted_columns(), visual);
}

#[test]
fn test_visual_columns_translate_to_physical_storage() {
    let (mapper, mut manager) = create_manager(4);
    mapper.set_column_order(vec![3, 2, 1, 0]).unwrap();

    manager.set_sort_states(&[
        SortState::new(0, SortOrder::Ascending),
        SortState::new(3, SortOrder::Descending),
    ]);

    // Visual 0 is physical 3, visual 3 is physical 0
    assert_eq!(manager.get_sorted_columns(), vec![3, 0]);
    assert_eq!(
        manager.get_sort_states(),
        vec![
            SortState::new(0, SortOrder::Ascending),
            SortState::new(3, SortOrder::Descending),
        ]
    );
}

#[test]
fn test_property_defaults() {
    let (_mapper, manager) = create_manager(2);
    let props = manager.get_all_columns_properties();
    assert!(!props.sort_empty_cells);
    assert!(props.indicator);
    assert!(props.header_action);
    assert!(props.compare_function_factory.is_none());
}

#[test]
fn test_compare_function_factory_appears_once_set() {
    let (_mapper, mut manager) = create_manager(2);
    let factory: CompareFunctionFactory =
        Rc::new(|order: SortOrder, _meta: &ColumnMeta| -> Comparator {
            Box::new(move |a: &Value, b: &Value| {
                let cmp = a.to_string().cmp(&b.to_string());
                if order.is_ascending() {
                    cmp
                } else {
                    cmp.reverse()
                }
            })
        });

    manager.update_all_columns_properties(
        &ColumnSortingSettings::new().compare_function_factory(factory.clone()),
    );

    let props = manager.get_all_columns_properties();
    let stored = props.compare_function_factory.clone().unwrap();
    assert!(Rc::ptr_eq(&stored, &factory));
    // Other defaults untouched
    assert!(props.indicator);

    let meta = ColumnMeta::new(1, "name").with_visual_column(1);
    let compare = props.comparator_for(SortOrder::Descending, &meta).unwrap();
    assert_eq!(
        compare(&json!("a"), &json!("b")),
        std::cmp::Ordering::Greater
    );
}

#[test]
fn test_update_properties_ignores_malformed_input() {
    let (_mapper, mut manager) = create_manager(2);
    manager.update_all_columns_properties_from_value(&json!(null));
    manager.update_all_columns_properties_from_value(&json!([1, 2, 3]));
    manager.update_all_columns_properties_from_value(&json!({"unrelated": true}));

    let props = manager.get_all_columns_properties();
    assert!(!props.sort_empty_cells);
    assert!(props.indicator);
    assert!(props.header_action);

    manager.update_all_columns_properties_from_value(&json!({
        "sortEmptyCells": true,
        "headerAction": false
    }));
    let props = manager.get_all_columns_properties();
    assert!(props.sort_empty_cells);
    assert!(!props.header_action);
    assert!(props.indicator);
}

#[test]
fn test_with_settings() {
    let mapper = Rc::new(IndexMapper::new(2));
    let manager =
        ColumnStatesManager::with_settings(mapper, &ColumnSortingSettings::new().indicator(false));
    assert!(!manager.get_all_columns_properties().indicator);
}

#[test]
fn test_destroy_empties_aggregate_queries() {
    let (mapper, mut manager) = create_manager(3);
    manager.set_sort_states(&[SortState::new(1, SortOrder::Descending)]);
    manager.destroy();

    assert!(manager.get_sort_states().is_empty());
    assert_eq!(mapper.map_count(), 0);
}

#[test]
fn test_sort_states_serialize() {
    let states = vec![
        SortState::new(1, SortOrder::Descending),
        SortState::new(0, SortOrder::Ascending),
    ];
    let json = serde_json::to_value(&states).unwrap();
    assert_eq!(
        json,
        json!([
            {"column": 1, "sort_order": "desc"},
            {"column": 0, "sort_order": "asc"}
        ])
    );
    let parsed: Vec<SortState> = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, states);
}

#[test]
fn test_compare_function_factory_can_be_cleared() {
    let (_mapper, mut manager) = create_manager(2);
    let factory: CompareFunctionFactory =
        Rc::new(|_order: SortOrder, _meta: &ColumnMeta| -> Comparator {
            Box::new(|a: &Value, b: &Value| a.to_string().cmp(&b.to_string()))
        });

    manager.update_all_columns_properties(
        &ColumnSortingSettings::new().compare_function_factory(factory),
    );
    assert!(manager
        .get_all_columns_properties()
        .has_compare_function_factory());

    manager.update_all_columns_properties(
        &ColumnSortingSettings::new().clear_compare_function_factory(),
    );
    let props = manager.get_all_columns_properties();
    assert!(props.compare_function_factory.is_none());
    assert!(props.indicator);

    // Loosely typed settings can clear it with an explicit null too
    manager.update_all_columns_properties(
        &ColumnSortingSettings::new().compare_function_factory(Rc::new(
            |_order: SortOrder, _meta: &ColumnMeta| -> Comparator {
                Box::new(|_: &Value, _: &Value| std::cmp::Ordering::Equal)
            },
        )),
    );
    manager.update_all_columns_properties_from_value(&json!({ "compareFunctionFactory": null }));
    assert!(manager
        .get_all_columns_properties()
        .compare_function_factory
        .is_none());
}
