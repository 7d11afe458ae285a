pub mod column_states_debug;
pub mod debug_trace;
pub mod index_mapper_debug;

pub use column_states_debug::ColumnStatesDebugProvider;
pub use debug_trace::{generate_debug_report, DebugEntry, DebugSection, DebugTrace, Priority};
pub use index_mapper_debug::IndexMapperDebugProvider;
