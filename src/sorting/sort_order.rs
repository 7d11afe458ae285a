use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction a column is sorted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

impl SortOrder {
    /// Order that follows `current` when a header is clicked:
    /// unsorted → ascending → descending → unsorted
    pub fn next(current: Option<SortOrder>) -> Option<SortOrder> {
        match current {
            None => Some(SortOrder::Ascending),
            Some(SortOrder::Ascending) => Some(SortOrder::Descending),
            Some(SortOrder::Descending) => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }

    /// Indicator glyph shown next to a sorted header
    pub fn indicator(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "↑",
            SortOrder::Descending => "↓",
        }
    }

    pub fn is_ascending(&self) -> bool {
        matches!(self, SortOrder::Ascending)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            other => Err(anyhow::anyhow!("Unknown sort order '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_cycles() {
        assert_eq!(SortOrder::next(None), Some(SortOrder::Ascending));
        assert_eq!(
            SortOrder::next(Some(SortOrder::Ascending)),
            Some(SortOrder::Descending)
        );
        assert_eq!(SortOrder::next(Some(SortOrder::Descending)), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Ascending);
        assert_eq!(" DESC ".parse::<SortOrder>().unwrap(), SortOrder::Descending);
        assert_eq!(
            "Ascending".parse::<SortOrder>().unwrap(),
            SortOrder::Ascending
        );
        assert!("sideways".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&SortOrder::Descending).unwrap();
        assert_eq!(json, "\"desc\"");
        let parsed: SortOrder = serde_json::from_str("\"ascending\"").unwrap();
        assert_eq!(parsed, SortOrder::Ascending);
        assert_eq!(SortOrder::Ascending.to_string(), "asc");
    }
}
