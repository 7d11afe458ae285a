use std::fmt;

/// One item of a debug section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebugEntry {
    /// Named value, rendered as `name: value`
    Field { name: String, value: String },
    /// Free-form line, rendered as is
    Line(String),
}

/// Titled group of entries describing part of a component's state
#[derive(Debug, Clone)]
pub struct DebugSection {
    pub title: String,
    /// Lower values appear first in a report
    pub priority: u32,
    pub entries: Vec<DebugEntry>,
}

impl DebugSection {
    pub fn new(title: impl Into<String>, priority: u32) -> Self {
        Self {
            title: title.into(),
            priority,
            entries: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.entries.push(DebugEntry::Field {
            name: name.into(),
            value: value.to_string(),
        });
        self
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.entries.push(DebugEntry::Line(line.into()));
        self
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.entries.push(DebugEntry::Line(line.into()));
    }

    /// Value of the first field called `name`
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.entries.iter().find_map(|entry| match entry {
            DebugEntry::Field { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|entry| match entry {
            DebugEntry::Line(line) => Some(line.as_str()),
            DebugEntry::Field { .. } => None,
        })
    }
}

impl fmt::Display for DebugSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n========== {} ==========", self.title)?;
        for entry in &self.entries {
            match entry {
                DebugEntry::Field { name, value } => writeln!(f, "{}: {}", name, value)?,
                DebugEntry::Line(line) => writeln!(f, "{}", line)?,
            }
        }
        Ok(())
    }
}

/// Components that can describe their state for debugging
pub trait DebugTrace {
    fn name(&self) -> &str;

    fn debug_sections(&self) -> Vec<DebugSection>;

    /// Optional one-line summary
    fn debug_summary(&self) -> Option<String> {
        None
    }
}

/// Section priorities
#[allow(non_snake_case)]
pub mod Priority {
    pub const COLUMN_LAYOUT: u32 = 100;
    pub const SORT_STATE: u32 = 200;
    pub const PROPERTIES: u32 = 300;
}

/// One report for several providers: their summaries first, then every
/// section ordered by priority
pub fn generate_debug_report(providers: &[&dyn DebugTrace]) -> String {
    let mut report = String::new();

    let summaries: Vec<String> = providers
        .iter()
        .filter_map(|provider| {
            provider
                .debug_summary()
                .map(|summary| format!("[{}] {}", provider.name(), summary))
        })
        .collect();
    if !summaries.is_empty() {
        report.push_str("========== SUMMARY ==========\n");
        for summary in summaries {
            report.push_str(&summary);
            report.push('\n');
        }
    }

    let mut sections: Vec<DebugSection> = providers
        .iter()
        .flat_map(|provider| provider.debug_sections())
        .collect();
    sections.sort_by_key(|s| s.priority);
    for section in &sections {
        report.push_str(&section.to_string());
    }

    report
}
