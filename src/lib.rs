//! Musiclist - Search the iTunes catalog for music tracks
//!
//! This library provides the search, decode and artwork pipeline behind a song
//! list and a search-results grid, with every UI-visible change funnelled
//! through a single primary context.

/// Orchestration of both surfaces and configuration
pub mod browser;
/// Client modules for the iTunes search API and artwork downloads
pub mod clients;
/// Primary execution context
pub mod context;
/// Record sequences, layouts and reusable cells
pub mod presentation;

pub use browser::{Browser, BrowserState, Config, ConfigBuilder, SurfaceKind};
pub use context::{MainHandle, PrimaryContext};
