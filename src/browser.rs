use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};

use crate::clients::{
    ArtworkLoader, ItunesClient, MusicSearch,
    entities::MusicRecord,
    errors::{Error, Result},
    itunes::DEFAULT_TIMEOUT,
};
use crate::context::MainHandle;
use crate::presentation::{
    RowLayout, SearchTicket, Surface,
    layout::{GRID_COLUMNS, GRID_SPACING, LIST_ROW_HEIGHT},
    slot::FetchTicket,
};

pub const DEFAULT_TERM: &str = "jazz";
pub const DEFAULT_VISIBLE: usize = 8;

// Configuration for the Browser struct
pub struct Config {
    pub search: ItunesClient,
    pub artwork: ArtworkLoader,
    pub default_term: String,
    pub list_layout: RowLayout,
    pub grid_layout: RowLayout,
    pub visible: usize,
}

impl Config {
    /// Fresh primary-context state shaped by this configuration.
    pub fn state(&self) -> BrowserState {
        BrowserState::new(self.list_layout, self.grid_layout, self.visible)
    }
}

#[derive(Default)]
pub struct ConfigBuilder {
    search: Option<ItunesClient>,
    artwork: Option<ArtworkLoader>,
    default_term: Option<String>,
    row_height: Option<f32>,
    columns: Option<u16>,
    spacing: Option<f32>,
    visible: Option<usize>,
    timeout: Option<Duration>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn search(mut self, search: ItunesClient) -> Self {
        self.search = Some(search);
        self
    }

    #[must_use]
    pub fn artwork(mut self, artwork: ArtworkLoader) -> Self {
        self.artwork = Some(artwork);
        self
    }

    #[must_use]
    pub fn default_term(mut self, term: impl Into<String>) -> Self {
        self.default_term = Some(term.into());
        self
    }

    #[must_use]
    pub fn row_height(mut self, height: f32) -> Self {
        self.row_height = Some(height);
        self
    }

    #[must_use]
    pub fn columns(mut self, columns: u16) -> Self {
        self.columns = Some(columns);
        self
    }

    #[must_use]
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = Some(spacing);
        self
    }

    #[must_use]
    pub fn visible(mut self, visible: usize) -> Self {
        self.visible = Some(visible);
        self
    }

    /// Request timeout for clients the builder creates itself.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<Config> {
        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(Error::Configuration("request timeout must be positive".into()));
        }
        let search = match self.search {
            Some(s) => s,
            None => ItunesClient::from_env(timeout)?,
        };
        let artwork = match self.artwork {
            Some(a) => a,
            None => ArtworkLoader::with_timeout(timeout)?,
        };
        let default_term = match self.default_term {
            Some(t) => t,
            None => default_term_from(std::env::var("MUSICLIST_DEFAULT_TERM"))?,
        };
        let height = self.row_height.unwrap_or(LIST_ROW_HEIGHT);
        if !height.is_finite() || height <= 0.0 {
            return Err(Error::Configuration(format!(
                "row height must be positive, got {height}"
            )));
        }
        let grid_layout = RowLayout::grid(
            self.columns.unwrap_or(GRID_COLUMNS),
            self.spacing.unwrap_or(GRID_SPACING),
        )?;

        Ok(Config {
            search,
            artwork,
            default_term,
            list_layout: RowLayout::Fixed { height },
            grid_layout,
            visible: self.visible.unwrap_or(DEFAULT_VISIBLE),
        })
    }
}

// Resolve the MUSICLIST_DEFAULT_TERM lookup into the startup term
fn default_term_from(var: std::result::Result<String, std::env::VarError>) -> Result<String> {
    match var {
        Ok(term) if !term.trim().is_empty() => Ok(term),
        Ok(_) | Err(std::env::VarError::NotPresent) => Ok(DEFAULT_TERM.to_string()),
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Song list filled by the startup search.
    List,
    /// Search-results grid following the search bar.
    Grid,
}

/// Everything the UI reads. Lives inside the primary context.
#[derive(Debug)]
pub struct BrowserState {
    pub list: Surface,
    pub grid: Surface,
    dirty: bool,
}

impl BrowserState {
    pub fn new(list_layout: RowLayout, grid_layout: RowLayout, visible: usize) -> Self {
        BrowserState {
            list: Surface::new(list_layout, visible),
            grid: Surface::new(grid_layout, visible),
            dirty: false,
        }
    }

    pub fn surface(&self, kind: SurfaceKind) -> &Surface {
        match kind {
            SurfaceKind::List => &self.list,
            SurfaceKind::Grid => &self.grid,
        }
    }

    pub fn surface_mut(&mut self, kind: SurfaceKind) -> &mut Surface {
        match kind {
            SurfaceKind::List => &mut self.list,
            SurfaceKind::Grid => &mut self.grid,
        }
    }

    /// Whether anything changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

// Drives searches and artwork loads for both surfaces
pub struct Browser<C> {
    search: Arc<C>,
    artwork: ArtworkLoader,
    handle: MainHandle<BrowserState>,
}

impl<C> Clone for Browser<C> {
    fn clone(&self) -> Self {
        Browser {
            search: Arc::clone(&self.search),
            artwork: self.artwork.clone(),
            handle: self.handle.clone(),
        }
    }
}

impl<C: MusicSearch> Browser<C> {
    pub fn new(search: C, artwork: ArtworkLoader, handle: MainHandle<BrowserState>) -> Self {
        Browser {
            search: Arc::new(search),
            artwork,
            handle,
        }
    }

    /// Run the startup search that fills the song list.
    pub fn start(&self, state: &mut BrowserState, term: &str) -> SearchTicket {
        info!("Loading song list for {term:?} ...");
        self.search(state, SurfaceKind::List, term)
    }

    /// Search `term` for `kind`. Must be called on the primary context.
    ///
    /// Results replace the surface's records when they arrive, unless a newer
    /// search for that surface was started in the meantime.
    pub fn search(&self, state: &mut BrowserState, kind: SurfaceKind, term: &str) -> SearchTicket {
        let surface = state.surface_mut(kind);
        if kind == SurfaceKind::Grid {
            surface.records_mut().clear();
            surface.reload();
            state.dirty = true;
        }
        let ticket = state.surface_mut(kind).records_mut().begin_search(term);

        let browser = self.clone();
        let term = term.to_owned();
        tokio::spawn(async move {
            let result = browser.search.search(&term).await;
            let dispatcher = browser.clone();
            browser.handle.dispatch(move |state| {
                dispatcher.apply(state, kind, ticket, &term, result);
            });
        });
        ticket
    }

    fn apply(
        &self,
        state: &mut BrowserState,
        kind: SurfaceKind,
        ticket: SearchTicket,
        term: &str,
        result: Result<Vec<MusicRecord>>,
    ) {
        let surface = state.surface_mut(kind);
        match result {
            Ok(records) => {
                let found = records.len();
                if !surface.records_mut().complete(ticket, records) {
                    return;
                }
                info!("{kind:?}: {found} results for {term:?}");
                let tickets = surface.reload();
                self.load_artwork(kind, tickets);
            }
            Err(e) => {
                warn!("{kind:?}: search for {term:?} failed: {e}");
                if !surface.records_mut().fail(ticket, e.to_string()) {
                    return;
                }
            }
        }
        state.dirty = true;
    }

    /// Show rows starting at `first_row` in `kind`'s cells. Primary context only.
    pub fn scroll(&self, state: &mut BrowserState, kind: SurfaceKind, first_row: usize) {
        let tickets = state.surface_mut(kind).show_from(first_row);
        self.load_artwork(kind, tickets);
        state.dirty = true;
    }

    fn load_artwork(&self, kind: SurfaceKind, tickets: Vec<(usize, FetchTicket)>) {
        for (cell, ticket) in tickets {
            debug!("{kind:?}: cell {cell} loading {}", ticket.url());
            self.artwork.request(&self.handle, ticket, move |state| {
                state.dirty = true;
                state
                    .surface_mut(kind)
                    .cell_mut(cell)
                    .map(|c| &mut c.artwork)
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = ConfigBuilder::new()
            .search(ItunesClient::default())
            .default_term("jazz")
            .build()
            .unwrap();

        assert_eq!(config.default_term, "jazz");
        assert_eq!(config.list_layout, RowLayout::list());
        assert_eq!(config.grid_layout, RowLayout::grid(3, 1.0).unwrap());
        assert_eq!(config.visible, DEFAULT_VISIBLE);
        assert_eq!(config.search.base_url(), crate::clients::itunes::DEFAULT_SEARCH_URL);
    }

    #[test]
    fn test_builder_rejects_bad_layout() {
        let result = ConfigBuilder::new()
            .search(ItunesClient::default())
            .default_term("jazz")
            .columns(0)
            .build();
        assert!(matches!(result, Err(Error::Configuration(_))));

        let result = ConfigBuilder::new()
            .search(ItunesClient::default())
            .default_term("jazz")
            .row_height(0.0)
            .build();
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_builder_rejects_zero_timeout() {
        let result = ConfigBuilder::new()
            .search(ItunesClient::default())
            .default_term("jazz")
            .timeout(Duration::ZERO)
            .build();
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_default_term_from_env() {
        assert_eq!(default_term_from(Ok("bossa nova".into())).unwrap(), "bossa nova");
        assert_eq!(
            default_term_from(Err(std::env::VarError::NotPresent)).unwrap(),
            DEFAULT_TERM
        );
        assert_eq!(default_term_from(Ok("  ".into())).unwrap(), DEFAULT_TERM);

        let not_unicode = Err(std::env::VarError::NotUnicode("\u{fffd}".into()));
        assert!(matches!(default_term_from(not_unicode), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_state_surfaces_are_independent() {
        let config = ConfigBuilder::new()
            .search(ItunesClient::default())
            .default_term("jazz")
            .visible(2)
            .build()
            .unwrap();
        let mut state = config.state();

        state.list.records_mut().replace(vec![Default::default()]);
        assert_eq!(state.surface(SurfaceKind::List).records().count(), 1);
        assert_eq!(state.surface(SurfaceKind::Grid).records().count(), 0);
        assert_eq!(state.grid.cells().len(), 2);
        assert!(!state.take_dirty());
    }
}
