//! Player view: resolves one game and describes what to render for it.

use tracing::{error, warn};

use crate::{
    catalog::CatalogError,
    fullscreen::{DisplayCapability, FullscreenChange, FullscreenMachine, FullscreenState},
    models::GameRecord,
    router::Route,
};

/// Resolution state of the player.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerState {
    /// Waiting for the catalog.
    Loading,
    /// The game was found.
    Found(GameRecord),
    /// The id is not in the catalog.
    NotFound,
}

/// What occupies the play area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaySurface<'a> {
    /// The game page embedded in a focusable frame.
    Embedded {
        /// Page to embed.
        url: &'a str,
        /// Frame title.
        title: &'a str,
    },
    /// Call-to-action linking out to a store.
    Download {
        /// Store link, opened in a new browsing context.
        url: &'a str,
        /// Game title.
        title: &'a str,
        /// Short description.
        description: &'a str,
        /// Artwork.
        thumbnail: &'a str,
    },
}

impl PlaySurface<'_> {
    /// Whether this surface offers a fullscreen toggle.
    pub fn offers_fullscreen(&self) -> bool {
        matches!(self, PlaySurface::Embedded { .. })
    }

    /// Link the surface points at.
    pub fn url(&self) -> &str {
        match self {
            PlaySurface::Embedded { url, .. } | PlaySurface::Download { url, .. } => url,
        }
    }
}

/// Descriptive content shown below the play surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoPanel<'a> {
    /// Section heading.
    pub heading: String,
    /// Long description, or the short one.
    pub description: &'a str,
    /// Author credit.
    pub author: &'a str,
    /// Last-updated label.
    pub last_updated: &'a str,
    /// Platform line.
    pub platform: &'static str,
    /// How-to-play text.
    pub instructions: &'a str,
    /// Controls, when provided.
    pub controls: Option<&'a str>,
    /// Feature bullets.
    pub features: Vec<&'a str>,
}

impl<'a> InfoPanel<'a> {
    fn for_record(record: &'a GameRecord) -> Self {
        Self {
            heading: format!("About {}", record.title),
            description: record.long_description(),
            author: record.author(),
            last_updated: record.last_updated(),
            platform: record.platform_label(),
            instructions: record.instructions(),
            controls: record.controls(),
            features: record.features(),
        }
    }
}

/// Player view for one route id.
#[derive(Debug, Clone)]
pub struct PlayerView {
    id: String,
    state: PlayerState,
    fullscreen: FullscreenMachine,
}

impl PlayerView {
    /// Mount for `id` in the loading state.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: PlayerState::Loading,
            fullscreen: FullscreenMachine::new(),
        }
    }

    /// Requested game id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Resolution state.
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Resolved record, if any.
    pub fn game(&self) -> Option<&GameRecord> {
        match &self.state {
            PlayerState::Found(record) => Some(record),
            _ => None,
        }
    }

    /// Look the id up in a fully loaded catalog.
    ///
    /// Runs once; later calls are ignored. Returns the redirect to follow
    /// when the id is unknown.
    pub fn resolve(&mut self, records: &[GameRecord]) -> Option<Route> {
        if self.state != PlayerState::Loading {
            return None;
        }
        match records.iter().find(|record| record.id == self.id) {
            Some(record) => {
                self.state = PlayerState::Found(record.clone());
                None
            }
            None => {
                warn!(id = %self.id, "Game not found");
                self.state = PlayerState::NotFound;
                Some(Route::Listing)
            }
        }
    }

    /// Handle a catalog failure while loading: log it and leave for the listing.
    pub fn fail(&mut self, err: &CatalogError) -> Option<Route> {
        if self.state != PlayerState::Loading {
            return None;
        }
        error!(id = %self.id, %err, "Failed to load games");
        self.state = PlayerState::NotFound;
        Some(Route::Listing)
    }

    /// Surface to render, once the game is resolved.
    pub fn surface(&self) -> Option<PlaySurface<'_>> {
        let record = self.game()?;
        Some(if record.kind.is_embeddable() {
            PlaySurface::Embedded {
                url: &record.url,
                title: &record.title,
            }
        } else {
            PlaySurface::Download {
                url: &record.url,
                title: &record.title,
                description: &record.description,
                thumbnail: &record.thumbnail,
            }
        })
    }

    /// Details panel; hidden while fullscreen.
    pub fn info_panel(&self) -> Option<InfoPanel<'_>> {
        if self.fullscreen.is_fullscreen() {
            return None;
        }
        self.game().map(InfoPanel::for_record)
    }

    /// Whether the header bar is shown.
    pub fn shows_header(&self) -> bool {
        self.game().is_some() && !self.fullscreen.is_fullscreen()
    }

    /// Whether a fullscreen toggle is offered.
    pub fn offers_fullscreen(&self) -> bool {
        self.surface()
            .map(|surface| surface.offers_fullscreen())
            .unwrap_or(false)
    }

    /// Fullscreen machine.
    pub fn fullscreen(&self) -> &FullscreenMachine {
        &self.fullscreen
    }

    /// Toggle fullscreen. Returns `None` when the surface offers no toggle.
    pub fn toggle_fullscreen(
        &mut self,
        display: &mut dyn DisplayCapability,
    ) -> Option<FullscreenState> {
        if !self.offers_fullscreen() {
            return None;
        }
        Some(self.fullscreen.toggle(display))
    }

    /// Apply a platform fullscreen notification.
    pub fn on_fullscreen_change(&mut self, change: FullscreenChange) -> bool {
        self.fullscreen.on_platform_change(change)
    }
}
