// TUI application state
//
// The event loop is the only owner of App. Network work is requested by
// pushing LoadRequests onto `pending`; the loop spawns them and feeds the
// results back through `apply_loaded`. Listing state, including the overlay
// and its scroll lock, lives inside `listing` and is dropped when the user
// leaves the events view.

use super::components::toast::Toast;
use super::input::InputHandler;
use super::modal::Modal;
use super::overlay::Overlay;
use super::scroll::{PageScroll, ScrollState};
use crate::config::Config;
use crate::filter::{filter_indices, FilterId};
use crate::loader::{LoadRequest, Loaded, Listing, Route};
use crate::logging::LogBuffer;
use crate::model::{Category, Event};
use crate::theme::Theme;
use chrono::Locale;
use crossterm::event::KeyCode;
use std::time::Instant;

/// Screens the TUI can display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Category catalog used as navigation
    #[default]
    Home,
    /// Event listing for one route
    Events,
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Events => "Events",
        }
    }
}

/// Progress of a background load
#[derive(Debug, Default)]
pub enum LoadState<T> {
    #[default]
    Loading,
    Ready(T),
    Failed,
}

impl<T> LoadState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Home view: the category catalog
#[derive(Debug, Default)]
pub struct CatalogState {
    pub generation: u64,
    pub load: LoadState<Vec<Category>>,
    /// Row under the cursor; row 0 is "All Events"
    pub selected: usize,
}

impl CatalogState {
    /// Number of selectable rows (All Events + categories with an id)
    pub fn row_count(&self) -> usize {
        1 + self.selectable().count()
    }

    /// Categories that can be opened, in catalog order
    pub fn selectable(&self) -> impl Iterator<Item = &Category> {
        self.load
            .ready()
            .into_iter()
            .flatten()
            .filter(|c| c.id.as_deref().is_some_and(|id| !id.is_empty()))
    }

    /// Route for the row under the cursor
    pub fn selected_route(&self) -> Route {
        match self.selected.checked_sub(1) {
            None => Route::All,
            Some(idx) => self
                .selectable()
                .nth(idx)
                .and_then(|c| c.id.clone())
                .map(Route::Category)
                .unwrap_or_default(),
        }
    }
}

/// Events view for one route
#[derive(Debug)]
pub struct ListingState {
    pub route: Route,
    pub generation: u64,
    pub load: LoadState<Listing>,
    pub filter: FilterId,
    /// Indices into the loaded events that pass the filter, in order
    pub visible: Vec<usize>,
    /// Position within `visible`
    pub selected: usize,
    pub page: PageScroll,
    pub overlay: Option<Overlay>,
}

impl ListingState {
    fn loading(route: Route, generation: u64) -> Self {
        Self {
            route,
            generation,
            load: LoadState::Loading,
            filter: FilterId::All,
            visible: Vec::new(),
            selected: 0,
            page: PageScroll::default(),
            overlay: None,
        }
    }

    pub fn events(&self) -> &[Event] {
        self.load.ready().map(|l| l.events.as_slice()).unwrap_or(&[])
    }

    /// Recompute the filtered view from the full collection
    fn refilter(&mut self) {
        self.visible = filter_indices(self.events(), &self.filter);
        self.selected = 0;
        self.page.state.scroll_to_top();
    }

    pub fn set_filter(&mut self, filter: FilterId) {
        tracing::debug!("Filter set to {}", filter);
        self.filter = filter;
        self.refilter();
    }

    /// Move the filter selection by `delta` chips (wrapping)
    pub fn cycle_filter(&mut self, delta: isize) {
        let Some(listing) = self.load.ready() else {
            return;
        };
        let options = &listing.filter_options;
        if options.is_empty() {
            return;
        }
        let current = options
            .iter()
            .position(|o| o.id == self.filter)
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(options.len() as isize) as usize;
        let filter = options[next].id.clone();
        self.set_filter(filter);
    }

    pub fn selected_event_index(&self) -> Option<usize> {
        self.visible.get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.visible.len() {
            self.selected += 1;
            self.page.state.reveal(self.selected);
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.page.state.reveal(self.selected);
        }
    }

    /// Open the overlay on the highlighted event
    pub fn open_overlay(&mut self) {
        let Some(idx) = self.selected_event_index() else {
            return;
        };
        self.overlay = None;
        let overlay = self
            .events()
            .get(idx)
            .map(|event| Overlay::open(idx, event, &self.page));
        self.overlay = overlay;
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    /// Event shown in the overlay, if open
    pub fn overlay_event(&self) -> Option<&Event> {
        let overlay = self.overlay.as_ref()?;
        self.events().get(overlay.event_index)
    }
}

/// Main application state for the TUI
pub struct App {
    pub view: View,
    pub home: CatalogState,
    pub listing: Option<ListingState>,

    /// Loads the event loop should spawn
    pub pending: Vec<LoadRequest>,
    next_generation: u64,

    pub modal: Option<Modal>,
    pub toast: Option<Toast>,
    pub should_quit: bool,

    pub theme: Theme,
    pub locale: Locale,
    pub api_url: String,

    pub log_buffer: LogBuffer,
    pub logs_scroll: ScrollState,

    input_handler: InputHandler,
    pub start_time: Instant,
    animation_frame: usize,
}

impl App {
    pub fn with_config(config: &Config, log_buffer: LogBuffer) -> Self {
        let mut app = Self {
            view: View::Home,
            home: CatalogState::default(),
            listing: None,
            pending: Vec::new(),
            next_generation: 0,
            modal: None,
            toast: None,
            should_quit: false,
            theme: Theme::by_name(&config.theme),
            locale: config.chrono_locale(),
            api_url: config.api_url.clone(),
            log_buffer,
            logs_scroll: ScrollState::following(),
            input_handler: InputHandler::with_default_config(),
            start_time: Instant::now(),
            animation_frame: 0,
        };
        app.load_catalog();
        app
    }

    fn bump_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    /// (Re)load the home catalog
    pub fn load_catalog(&mut self) {
        let generation = self.bump_generation();
        self.home.generation = generation;
        self.home.load = LoadState::Loading;
        self.pending.push(LoadRequest::Catalog { generation });
    }

    /// Enter the events view for `route`; any previous listing is dropped
    pub fn open_listing(&mut self, route: Route) {
        let generation = self.bump_generation();
        tracing::info!("Loading events for {:?}", route);
        self.listing = Some(ListingState::loading(route.clone(), generation));
        self.pending.push(LoadRequest::Listing { generation, route });
        self.view = View::Events;
    }

    pub fn go_home(&mut self) {
        self.listing = None;
        self.view = View::Home;
    }

    /// Retry the current view's load (`r`)
    pub fn reload(&mut self) {
        match self.view {
            View::Home => self.load_catalog(),
            View::Events => {
                let route = self
                    .listing
                    .as_ref()
                    .map(|l| l.route.clone())
                    .unwrap_or_default();
                self.open_listing(route);
            }
        }
    }

    /// Take a load result; results for a superseded generation are dropped
    pub fn apply_loaded(&mut self, loaded: Loaded) {
        match loaded {
            Loaded::Catalog { generation, result } => {
                if generation != self.home.generation {
                    tracing::debug!("Ignoring stale catalog load (gen {})", generation);
                    return;
                }
                self.home.load = match result {
                    Ok(categories) => LoadState::Ready(categories),
                    Err(_) => LoadState::Failed,
                };
                self.home.selected = self.home.selected.min(self.home.row_count() - 1);
            }
            Loaded::Listing { generation, result } => {
                let Some(listing) = self
                    .listing
                    .as_mut()
                    .filter(|l| l.generation == generation)
                else {
                    tracing::debug!("Ignoring stale listing load (gen {})", generation);
                    return;
                };
                match result {
                    Ok(data) => {
                        listing.load = LoadState::Ready(data);
                        listing.refilter();
                    }
                    Err(_) => listing.load = LoadState::Failed,
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Misc UI state
    // ─────────────────────────────────────────────────────────────────────────

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    /// Whether a key press should trigger its action (debounce/repeat)
    pub fn handle_key_press(&mut self, key: KeyCode) -> bool {
        self.input_handler.handle_key_press(key)
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        self.input_handler.handle_key_release(key);
    }

    /// True while the current view waits on the network
    pub fn is_loading(&self) -> bool {
        match self.view {
            View::Home => matches!(self.home.load, LoadState::Loading),
            View::Events => self
                .listing
                .as_ref()
                .is_some_and(|l| matches!(l.load, LoadState::Loading)),
        }
    }

    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    pub fn spinner_char(&self) -> char {
        const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
        FRAMES[self.animation_frame % FRAMES.len()]
    }

    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use serde_json::json;

    fn app() -> App {
        App::with_config(&Config::default(), LogBuffer::new())
    }

    fn listing(route: Route) -> Listing {
        let categories: Vec<Category> = serde_json::from_value(json!([
            { "_id": "c1", "name": "Technical" },
            { "_id": "c2", "name": "Cultural" }
        ]))
        .unwrap();
        let events: Vec<Event> = serde_json::from_value(json!([
            { "_id": "e1", "category": "c1", "images": ["a", "b", "c"] },
            { "_id": "e2", "category": { "_id": "c2", "name": "Cultural" } }
        ]))
        .unwrap();
        Listing::new(route, categories, events)
    }

    fn deliver_listing(app: &mut App) {
        let generation = app.listing.as_ref().unwrap().generation;
        let route = app.listing.as_ref().unwrap().route.clone();
        app.apply_loaded(Loaded::Listing {
            generation,
            result: Ok(listing(route)),
        });
    }

    #[test]
    fn test_starts_on_home_with_catalog_request() {
        let app = app();
        assert_eq!(app.view, View::Home);
        assert!(matches!(app.pending.as_slice(), [LoadRequest::Catalog { .. }]));
    }

    #[test]
    fn test_route_change_issues_one_request_and_drops_stale() {
        let mut app = app();
        app.pending.clear();

        app.open_listing(Route::All);
        let stale = app.listing.as_ref().unwrap().generation;
        app.open_listing(Route::Category("c1".into()));
        assert_eq!(app.pending.len(), 2);

        // Result for the first route arrives late
        app.apply_loaded(Loaded::Listing {
            generation: stale,
            result: Ok(listing(Route::All)),
        });
        let current = app.listing.as_ref().unwrap();
        assert!(matches!(current.load, LoadState::Loading));
        assert_eq!(current.route, Route::Category("c1".into()));

        deliver_listing(&mut app);
        assert!(app.listing.as_ref().unwrap().load.ready().is_some());
    }

    #[test]
    fn test_failed_load_and_retry() {
        let mut app = app();
        app.open_listing(Route::All);
        let generation = app.listing.as_ref().unwrap().generation;
        app.apply_loaded(Loaded::Listing {
            generation,
            result: Err(ApiError::Status {
                status: 500,
                message: String::new(),
            }),
        });
        assert!(matches!(app.listing.as_ref().unwrap().load, LoadState::Failed));

        app.pending.clear();
        app.reload();
        assert_eq!(app.pending.len(), 1);
        assert!(matches!(app.listing.as_ref().unwrap().load, LoadState::Loading));
    }

    #[test]
    fn test_filter_cycle() {
        let mut app = app();
        app.open_listing(Route::All);
        deliver_listing(&mut app);

        let listing = app.listing.as_mut().unwrap();
        assert_eq!(listing.visible, vec![0, 1]);

        listing.cycle_filter(1);
        assert_eq!(listing.filter, FilterId::parse("c1"));
        assert_eq!(listing.visible, vec![0]);

        listing.cycle_filter(-2);
        assert_eq!(listing.filter, FilterId::parse("c2"));
        assert_eq!(listing.visible, vec![1]);
    }

    #[test]
    fn test_navigating_home_releases_scroll_lock() {
        let mut app = app();
        app.open_listing(Route::All);
        deliver_listing(&mut app);

        let listing = app.listing.as_mut().unwrap();
        listing.open_overlay();
        assert_eq!(listing.overlay.as_ref().unwrap().images.len(), 3);

        // The overlay's guard still points at the page taken out here
        let page = std::mem::take(&mut listing.page);
        assert!(!page.is_enabled());

        app.go_home();
        assert!(app.listing.is_none());
        assert!(page.is_enabled());
    }

    #[test]
    fn test_reload_releases_scroll_lock() {
        let mut app = app();
        app.open_listing(Route::All);
        deliver_listing(&mut app);

        let listing = app.listing.as_mut().unwrap();
        listing.open_overlay();
        let page = std::mem::take(&mut listing.page);

        app.reload();
        assert!(page.is_enabled());
        assert!(app.listing.as_ref().unwrap().overlay.is_none());
    }

    #[test]
    fn test_reopening_overlay_keeps_page_locked() {
        let mut app = app();
        app.open_listing(Route::All);
        deliver_listing(&mut app);

        let listing = app.listing.as_mut().unwrap();
        listing.open_overlay();
        listing.overlay.as_mut().unwrap().select_image(2);
        listing.select_next();
        listing.open_overlay();

        let overlay = listing.overlay.as_ref().unwrap();
        assert_eq!(overlay.event_index, 1);
        assert_eq!(overlay.selected_image(), 0);
        assert!(!listing.page.is_enabled());

        listing.close_overlay();
        assert!(listing.page.is_enabled());
    }

    #[test]
    fn test_home_rows_map_to_routes() {
        let mut app = app();
        let generation = app.home.generation;
        app.apply_loaded(Loaded::Catalog {
            generation,
            result: Ok(serde_json::from_value(json!([
                { "name": "No id" },
                { "_id": "c1", "name": "Technical" }
            ]))
            .unwrap()),
        });

        assert_eq!(app.home.row_count(), 2);
        assert_eq!(app.home.selected_route(), Route::All);
        app.home.selected = 1;
        assert_eq!(app.home.selected_route(), Route::Category("c1".into()));
    }
}
