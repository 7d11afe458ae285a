use column_sorting::index::IndexMapper;
use column_sorting::sorting::{ColumnStatesManager, SortOrder, SortState};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::rc::Rc;

fn create_sorted_grid(columns: usize, sorted: usize) -> (Rc<IndexMapper>, ColumnStatesManager) {
    let mapper = Rc::new(IndexMapper::new(columns));
    let mut manager = ColumnStatesManager::new(mapper.clone());

    // Spread sorted columns across the grid, alternating direction
    let step = (columns / sorted.max(1)).max(1);
    let states: Vec<SortState> = (0..sorted)
        .map(|i| {
            let order = if i % 2 == 0 {
                SortOrder::Ascending
            } else {
                SortOrder::Descending
            };
            SortState::new((i * step) % columns, order)
        })
        .collect();
    manager.set_sort_states(&states);

    // Reverse the display order so every lookup goes through translation
    mapper
        .set_column_order((0..columns).rev().collect())
        .unwrap();

    (mapper, manager)
}

fn benchmark_get_sort_states(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_sort_states");

    for &(columns, sorted) in &[(100, 3), (1_000, 10), (10_000, 50)] {
        let (_mapper, manager) = create_sorted_grid(columns, sorted);
        group.bench_function(format!("{}_cols_{}_sorted", columns, sorted), |b| {
            b.iter(|| black_box(manager.get_sort_states()))
        });
    }

    group.finish();
}

fn benchmark_set_sort_states(c: &mut Criterion) {
    let (_mapper, mut manager) = create_sorted_grid(1_000, 0);
    let states: Vec<SortState> = (0..20)
        .map(|i| SortState::new(i * 7, SortOrder::Ascending))
        .collect();

    c.bench_function("set_sort_states_1k_cols", |b| {
        b.iter(|| manager.set_sort_states(black_box(&states)))
    });
}

fn benchmark_remove_columns(c: &mut Criterion) {
    c.bench_function("remove_column_realign_1k", |b| {
        b.iter_with_setup(
            || create_sorted_grid(1_000, 10),
            |(mapper, manager)| {
                mapper.remove_columns(&[0, 500]);
                black_box(manager.get_number_of_sorted_columns())
            },
        )
    });
}

criterion_group!(
    benches,
    benchmark_get_sort_states,
    benchmark_set_sort_states,
    benchmark_remove_columns
);
criterion_main!(benches);
