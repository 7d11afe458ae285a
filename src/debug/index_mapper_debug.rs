use crate::debug::debug_trace::{DebugSection, DebugTrace, Priority};
use crate::index::{ColumnTranslator, IndexMapper};

/// Debug trace implementation for IndexMapper
pub struct IndexMapperDebugProvider<'a> {
    mapper: &'a IndexMapper,
}

impl<'a> IndexMapperDebugProvider<'a> {
    pub fn new(mapper: &'a IndexMapper) -> Self {
        Self { mapper }
    }
}

impl DebugTrace for IndexMapperDebugProvider<'_> {
    fn name(&self) -> &str {
        "IndexMapper"
    }

    fn debug_sections(&self) -> Vec<DebugSection> {
        let hidden: Vec<usize> = (0..self.mapper.column_count())
            .filter(|&p| self.mapper.is_column_hidden(p))
            .collect();
        let hidden = if hidden.is_empty() {
            "None".to_string()
        } else {
            format!("{:?}", hidden)
        };

        let mut section = DebugSection::new("COLUMN LAYOUT", Priority::COLUMN_LAYOUT)
            .field("Physical Columns", self.mapper.column_count())
            .field("Visible Columns", self.mapper.visible_column_count())
            .field("Hidden Columns", hidden)
            .field(
                "Registered Maps",
                format!("{:?}", self.mapper.registered_map_names()),
            )
            .line("Visual → Physical:");

        for visual in 0..self.mapper.visible_column_count() {
            if let Some(physical) = self.mapper.to_physical_column(visual) {
                section.push_line(format!("  V[{:3}] → DT[{:3}]", visual, physical));
            }
        }

        vec![section]
    }

    fn debug_summary(&self) -> Option<String> {
        Some(format!(
            "Columns: {} visible of {}",
            self.mapper.visible_column_count(),
            self.mapper.column_count()
        ))
    }
}
