//! Physical-index keyed storage and the host interfaces that keep it aligned
//! with the grid's columns.

pub mod host;
pub mod index_map;
pub mod index_mapper;

pub use host::{ColumnIndexHost, ColumnTranslator, IndexMapRegistry};
pub use index_map::{IndexMap, PhysicalIndexToValueMap, SharedIndexMap};
pub use index_mapper::IndexMapper;
