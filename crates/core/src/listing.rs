//! Listing view model: filtered cards that navigate to the player.

use tracing::error;

use crate::{
    catalog::{Catalog, CatalogError, CatalogStore, FilterTag},
    models::GameRecord,
    router::Route,
};

/// Load progress of the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStatus {
    /// Catalog request in flight.
    Loading,
    /// Catalog available.
    Ready,
    /// Catalog request failed; the grid stays empty.
    Empty,
}

/// Presentation of one catalog record on the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameCard<'a> {
    /// Catalog id.
    pub id: &'a str,
    /// Display name.
    pub title: &'a str,
    /// Short description; clamped to two lines when drawn.
    pub description: &'a str,
    /// Preview image.
    pub thumbnail: &'a str,
    /// Type badge text.
    pub badge: &'static str,
    /// Show the NEW badge.
    pub is_new: bool,
    /// "Instant Play" or "Store Download".
    pub play_label: &'static str,
}

impl<'a> From<&'a GameRecord> for GameCard<'a> {
    fn from(record: &'a GameRecord) -> Self {
        Self {
            id: &record.id,
            title: &record.title,
            description: &record.description,
            thumbnail: &record.thumbnail,
            badge: record.badge_label(),
            is_new: record.is_new,
            play_label: record.play_label(),
        }
    }
}

impl GameCard<'_> {
    /// Where activating this card leads.
    pub fn route(&self) -> Route {
        Route::player(self.id)
    }
}

/// Listing view state.
#[derive(Debug, Clone)]
pub struct ListingView {
    store: CatalogStore,
    status: ListingStatus,
}

impl Default for ListingView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingView {
    /// Mount in the loading state.
    pub fn new() -> Self {
        Self {
            store: CatalogStore::default(),
            status: ListingStatus::Loading,
        }
    }

    /// Load progress.
    pub fn status(&self) -> ListingStatus {
        self.status
    }

    /// Underlying store.
    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Accept the loaded catalog.
    pub fn on_loaded(&mut self, catalog: Catalog) {
        self.store.set_records(catalog);
        self.status = ListingStatus::Ready;
    }

    /// Record a failed load; the listing stays empty.
    pub fn on_failed(&mut self, err: &CatalogError) {
        error!(%err, "Failed to load games");
        self.status = ListingStatus::Empty;
    }

    /// Active filter.
    pub fn filter(&self) -> FilterTag {
        self.store.filter()
    }

    /// Select a filter tag.
    pub fn set_filter(&mut self, filter: FilterTag) -> bool {
        self.store.set_filter(filter)
    }

    /// Cards for the visible records in source order.
    pub fn cards(&self) -> Vec<GameCard<'_>> {
        self.store.visible().map(GameCard::from).collect()
    }

    /// Number of visible cards.
    pub fn len(&self) -> usize {
        self.store.visible_len()
    }

    /// Whether no card is visible.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Activate the card at `index`, yielding the player route for it.
    pub fn activate(&self, index: usize) -> Option<Route> {
        self.store
            .visible_at(index)
            .map(|record| Route::player(record.id.as_str()))
    }
}
