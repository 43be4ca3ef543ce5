#![warn(clippy::all, missing_docs)]

//! Core domain logic for the game hub.
//!
//! This crate hosts the catalog model, loading and caching, filtering,
//! routing, and the listing/player view models used by the terminal UI
//! and any future frontends.

pub mod catalog;
pub mod config;
pub mod fullscreen;
pub mod launcher;
pub mod listing;
pub mod models;
pub mod player;
pub mod router;

pub use catalog::{Catalog, CatalogCache, CatalogError, CatalogLoader, CatalogSource, FilterTag};
pub use crate::config::AppConfig;
pub use fullscreen::{
    BestEffort, DisplayCapability, DisplayError, FullscreenChange, FullscreenMachine,
    FullscreenState, Orientation,
};
pub use launcher::{LaunchError, Launcher};
pub use listing::{GameCard, ListingStatus, ListingView};
pub use models::{GameKind, GameRecord};
pub use player::{InfoPanel, PlaySurface, PlayerState, PlayerView};
pub use router::{Route, Router};
