use std::sync::Arc;

use super::{cache::Catalog, filter::FilterTag};
use crate::models::GameRecord;

/// Loaded catalog plus the active filter selection.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    records: Catalog,
    filter: FilterTag,
    visible: Vec<usize>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new(Arc::from(Vec::new()))
    }
}

impl CatalogStore {
    /// Wrap a loaded catalog with the `all` filter active.
    pub fn new(records: Catalog) -> Self {
        let mut store = Self {
            records,
            filter: FilterTag::All,
            visible: Vec::new(),
        };
        store.recompute();
        store
    }

    /// Replace the records, keeping the active filter.
    pub fn set_records(&mut self, records: Catalog) {
        self.records = records;
        self.recompute();
    }

    /// Every loaded record in source order.
    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    /// Active filter.
    pub fn filter(&self) -> FilterTag {
        self.filter
    }

    /// Change the filter; returns `false` when it was already active.
    pub fn set_filter(&mut self, filter: FilterTag) -> bool {
        if self.filter == filter {
            return false;
        }
        self.filter = filter;
        self.recompute();
        true
    }

    /// Records passing the active filter, in source order.
    pub fn visible(&self) -> impl Iterator<Item = &GameRecord> + '_ {
        self.visible.iter().map(move |idx| &self.records[*idx])
    }

    /// Number of records passing the filter.
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Record at position `index` of the visible subset.
    pub fn visible_at(&self, index: usize) -> Option<&GameRecord> {
        self.visible
            .get(index)
            .and_then(|idx| self.records.get(*idx))
    }

    /// Look up a record by id regardless of the filter.
    pub fn find(&self, id: &str) -> Option<&GameRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Total number of loaded records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn recompute(&mut self) {
        self.visible = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| self.filter.matches(record))
            .map(|(idx, _)| idx)
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> Catalog {
        let records: Vec<GameRecord> = serde_json::from_value(json!([
            { "id": "a", "title": "A", "url": "/games/a.html", "type": "html" },
            { "id": "b", "title": "B", "url": "https://play/b", "type": "android" },
            { "id": "c", "title": "C", "url": "https://play/c", "type": "Unique" }
        ]))
        .expect("valid catalog");
        Arc::from(records)
    }

    #[test]
    fn filter_change_recomputes_visible_subset() {
        let mut store = CatalogStore::new(catalog());
        assert_eq!(store.visible_len(), 3);

        assert!(store.set_filter(FilterTag::Android));
        let titles: Vec<_> = store.visible().map(|record| record.title.as_str()).collect();
        assert_eq!(titles, ["B"]);
        assert_eq!(store.visible_at(0).map(|r| r.id.as_str()), Some("b"));
        assert!(store.visible_at(1).is_none());

        assert!(!store.set_filter(FilterTag::Android));
        assert!(store.set_filter(FilterTag::All));
        assert_eq!(store.visible_len(), 3);
    }

    #[test]
    fn lookup_ignores_filter() {
        let mut store = CatalogStore::new(catalog());
        store.set_filter(FilterTag::Unique);
        assert_eq!(store.find("a").map(|r| r.title.as_str()), Some("A"));
        assert!(store.find("zzz").is_none());
    }

    #[test]
    fn replacing_records_keeps_filter() {
        let mut store = CatalogStore::default();
        assert!(store.is_empty());
        store.set_filter(FilterTag::Unique);
        store.set_records(catalog());
        assert_eq!(store.len(), 3);
        assert_eq!(store.visible_len(), 1);
        assert_eq!(store.filter(), FilterTag::Unique);
    }
}
