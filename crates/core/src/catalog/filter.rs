use std::fmt;

use crate::models::{GameKind, GameRecord};

/// Category selection on the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterTag {
    /// Every record.
    #[default]
    All,
    /// Android store downloads.
    Android,
    /// Records typed `Unique`.
    Unique,
}

impl FilterTag {
    /// Tags in filter bar order.
    pub const TAGS: [FilterTag; 3] = [FilterTag::All, FilterTag::Android, FilterTag::Unique];

    /// Parse a tag name; anything unrecognised shows everything.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw {
            "android" => FilterTag::Android,
            "unique" => FilterTag::Unique,
            _ => FilterTag::All,
        }
    }

    /// Canonical tag name.
    pub fn as_str(self) -> &'static str {
        match self {
            FilterTag::All => "all",
            FilterTag::Android => "android",
            FilterTag::Unique => "unique",
        }
    }

    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            FilterTag::All => "All Games",
            FilterTag::Android => "Mobile",
            FilterTag::Unique => "Unique",
        }
    }

    /// Whether `record` belongs to this category.
    pub fn matches(self, record: &GameRecord) -> bool {
        match self {
            FilterTag::All => true,
            FilterTag::Android => record.kind == GameKind::Android,
            FilterTag::Unique => record.kind == GameKind::Unique,
        }
    }

    /// Next tag in bar order, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::TAGS.iter().position(|tag| *tag == self).unwrap_or(0);
        Self::TAGS[(idx + 1) % Self::TAGS.len()]
    }

    /// Previous tag in bar order, wrapping around.
    pub fn prev(self) -> Self {
        let idx = Self::TAGS.iter().position(|tag| *tag == self).unwrap_or(0);
        Self::TAGS[(idx + Self::TAGS.len() - 1) % Self::TAGS.len()]
    }
}

impl From<&str> for FilterTag {
    fn from(value: &str) -> Self {
        FilterTag::parse_lenient(value)
    }
}

impl fmt::Display for FilterTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subset of `records` matching `filter`, in source order.
pub fn visible(records: &[GameRecord], filter: FilterTag) -> Vec<&GameRecord> {
    records
        .iter()
        .filter(|record| filter.matches(record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, kind: &str) -> GameRecord {
        GameRecord {
            id: id.to_string(),
            title: id.to_uppercase(),
            description: String::new(),
            long_description: None,
            thumbnail: String::new(),
            url: format!("/games/{id}.html"),
            kind: GameKind::from(kind),
            is_new: false,
            author: None,
            last_updated: None,
            instructions: None,
            controls: None,
            features: None,
        }
    }

    fn ids(records: Vec<&GameRecord>) -> Vec<&str> {
        records.into_iter().map(|record| record.id.as_str()).collect()
    }

    fn catalog() -> Vec<GameRecord> {
        vec![
            record("a", "html"),
            record("b", "android"),
            record("c", "Unique"),
            record("d", "Android"),
            record("e", "android"),
            record("f", "unique"),
        ]
    }

    #[test]
    fn all_is_identity() {
        let records = catalog();
        assert_eq!(
            ids(visible(&records, FilterTag::All)),
            ["a", "b", "c", "d", "e", "f"]
        );
    }

    #[test]
    fn android_matches_exact_type_in_order() {
        let records = catalog();
        assert_eq!(ids(visible(&records, FilterTag::Android)), ["b", "e"]);
    }

    #[test]
    fn unique_matches_exact_case_only() {
        let records = catalog();
        assert_eq!(ids(visible(&records, FilterTag::Unique)), ["c"]);
    }

    #[test]
    fn unrecognised_filter_names_show_everything() {
        let records = catalog();
        for raw in ["", "html", "Android", "mobile", "UNIQUE"] {
            assert_eq!(FilterTag::parse_lenient(raw), FilterTag::All);
            assert_eq!(visible(&records, FilterTag::from(raw)).len(), records.len());
        }
        assert_eq!(FilterTag::parse_lenient("android"), FilterTag::Android);
        assert_eq!(FilterTag::parse_lenient("unique"), FilterTag::Unique);
    }

    #[test]
    fn cycling_wraps_both_ways() {
        assert_eq!(FilterTag::All.next(), FilterTag::Android);
        assert_eq!(FilterTag::Unique.next(), FilterTag::All);
        assert_eq!(FilterTag::All.prev(), FilterTag::Unique);
    }
}
