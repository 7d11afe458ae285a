// Sort State Debug Binary - exercises column sort state in isolation
// Run with: cargo run --bin sort_state_debug [path/to/config.toml]
//   --generate-config  write a commented default config to the user config dir
//   --user-config      load (or create) the config in the user config dir
//   --save-config      store the final sort state as the user config's initial sort

use anyhow::Result;
use std::path::PathBuf;
use std::rc::Rc;

use column_sorting::config::Config;
use column_sorting::debug::{generate_debug_report, ColumnStatesDebugProvider, IndexMapperDebugProvider};
use column_sorting::logging::init_tracing;
use column_sorting::sorting::{are_valid_sort_states, ColumnStatesManager, SortOrder, SortState};
use column_sorting::table_display::format_sort_states;
use column_sorting::{trace_column_change, trace_sort_states, IndexMapper};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--generate-config") {
        let path = Config::get_config_path()?;
        if let Err(e) = Config::write_default_with_comments(&path) {
            eprintln!("Error writing config file: {:#}", e);
            std::process::exit(1);
        }
        println!("Configuration file created at: {:?}", path);
        return Ok(());
    }

    let config = if args.iter().any(|a| a == "--user-config") {
        Config::load()?
    } else {
        match args.iter().find(|a| !a.starts_with("--")) {
            Some(path) => Config::load_from(&PathBuf::from(path))?,
            None => Config::default(),
        }
    };
    let save_config = args.iter().any(|a| a == "--save-config");
    let log_buffer = init_tracing(&config.logging);

    let mut names: Vec<String> = ["id", "name", "amount", "category", "active"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mapper = Rc::new(IndexMapper::new(names.len()));
    let mut manager =
        ColumnStatesManager::with_settings(mapper.clone(), &config.column_sorting.to_settings());

    println!("=== Sort State Debug ===\n");

    if !config.column_sorting.initial_config.is_empty() {
        let applied = manager.apply_initial_config(&config.column_sorting.initial_config);
        println!("Initial sort from config applied: {}", applied);
    }

    // Test 1: multi-column sort
    println!("Test 1: Multi-column sort");
    println!("─────────────────────────");
    let states = vec![
        SortState::new(3, SortOrder::Ascending),
        SortState::new(2, SortOrder::Descending),
    ];
    if are_valid_sort_states(&states, mapper.visible_column_count()) {
        manager.set_sort_states(&states);
    }
    trace_sort_states!(manager);
    println!("{}\n", format_sort_states(&manager, &*mapper, &names));

    // Test 2: move columns, storage keeps physical identity
    println!("Test 2: Move 'category' to the front");
    println!("────────────────────────────────────");
    mapper.move_column(3, 0);
    trace_column_change!("move", mapper.visible_column_indices());
    println!("  Sorted columns (physical): {:?}", manager.get_sorted_columns());
    println!("{}\n", format_sort_states(&manager, &*mapper, &names));

    // Test 3: hide and remove
    println!("Test 3: Hide 'amount', remove 'id'");
    println!("──────────────────────────────────");
    mapper.hide_column(3);
    println!("  Visible sort states: {:?}", manager.get_sort_states());
    println!("  Stored sorted columns: {}", manager.get_number_of_sorted_columns());
    mapper.show_column(2);

    let id_visual = 1;
    mapper.remove_columns(&[id_visual]);
    names.remove(0);
    trace_column_change!("remove", names);
    println!("{}\n", format_sort_states(&manager, &*mapper, &names));

    // Test 4: header click toggling on the first visible column
    println!("Test 4: Header clicks on visual column 0");
    println!("────────────────────────────────────────");
    for _ in 0..3 {
        let next = SortOrder::next(manager.get_sort_order_of_column(0));
        let mut states: Vec<SortState> = manager
            .get_sort_states()
            .into_iter()
            .filter(|s| s.column != 0)
            .collect();
        if let Some(order) = next {
            states.insert(0, SortState::new(0, order));
        }
        manager.set_sort_states(&states);
        println!(
            "  click → {:?}, queue position {:?}",
            manager.get_sort_order_of_column(0),
            manager.get_index_of_column_in_sort_queue(0)
        );
    }

    println!();
    let manager_debug = ColumnStatesDebugProvider::new(&manager);
    let mapper_debug = IndexMapperDebugProvider::new(&mapper);
    println!("{}", generate_debug_report(&[&mapper_debug, &manager_debug]));

    if save_config {
        let mut saved = config.clone();
        saved.column_sorting.initial_config = manager.get_sort_states();
        saved.save()?;
        println!("Sort state saved to {:?}", Config::get_config_path()?);
    }

    manager.destroy();
    println!("\nAfter destroy: {:?}", manager.get_sort_states());

    println!("\n--- Recent log lines ---");
    for entry in log_buffer.get_recent(20) {
        println!("{}", entry.format_for_display());
    }

    Ok(())
}
