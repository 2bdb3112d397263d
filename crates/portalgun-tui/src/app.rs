//! Application state management for Portalgun.
//!
//! This module contains the core `App` struct that owns all UI state, the
//! loaded locations, the current selection, and background task coordination.
//!
//! Network work runs in spawned Tokio tasks. Each task owns only its inputs
//! and reports back through an MPSC channel; the main loop drains that channel
//! once per tick, so every result is applied on the UI task in completion
//! order.

use std::sync::Arc;

use anyhow::Result;
use rand::seq::SliceRandom;
use rand::Rng;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use portalgun_core::{
    fetch_all_locations, fetch_residents, filter_locations, ApiClient, Character, Config,
    ImageCache, Location, LocationStats, Portrait,
};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
/// One resident fetch can be followed by up to 20 portrait results.
const CHANNEL_BUFFER_SIZE: usize = 64;

/// Number of rows to scroll on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

/// Shown when random pick or statistics are requested before the first load
pub const NOTHING_LOADED_WARNING: &str = "No locations loaded yet. Please wait for the load to finish.";

// ============================================================================
// UI State Types
// ============================================================================

/// Current UI focus area (list panel or detail panel)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Detail,
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Searching,
    ShowingHelp,
    ShowingStats,
    ShowingWarning,
    ConfirmingQuit,
    Quitting,
}

/// Portrait slot on a resident card
#[derive(Debug, Clone)]
pub enum PortraitSlot {
    Loading,
    Ready(Arc<Portrait>),
    /// Fetch failed or the character has no image
    Missing,
}

#[derive(Debug, Clone)]
pub struct ResidentCard {
    pub character: Character,
    pub portrait: PortraitSlot,
}

/// What the resident gallery is showing
#[derive(Debug, Clone)]
pub enum ResidentsView {
    /// Nothing selected yet
    Empty,
    /// The selected location has no resident references
    NoResidents,
    Loading { location_id: i64 },
    /// Every resident fetch failed
    Failed { location_id: i64 },
    Loaded { location_id: i64, cards: Vec<ResidentCard> },
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Results sent from background tasks back to the UI loop.
///
/// Every spawned task sends exactly one of these, success or not.
#[derive(Debug)]
pub enum TaskResult {
    /// All location pages gathered (possibly truncated by a failed page)
    Locations(Vec<Location>),
    /// Residents for one selection request
    Residents {
        request: u64,
        location_id: i64,
        characters: Vec<Character>,
    },
    /// Portrait lookup finished for one character
    Portrait {
        character_id: i64,
        portrait: Option<Arc<Portrait>>,
    },
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    // Core services
    pub config: Config,
    pub api: ApiClient,
    pub images: ImageCache,

    // UI State
    pub state: AppState,
    pub focus: Focus,
    pub search_query: String,
    /// Cursor row within the filtered list
    pub location_selection: usize,
    /// First visible resident card
    pub detail_scroll: usize,

    // Loaded data
    pub locations: Vec<Location>,
    pub locations_loaded: bool,
    pub selected_location_id: Option<i64>,
    pub residents: ResidentsView,

    // Dialog contents
    pub stats_lines: Vec<String>,
    pub warning_message: Option<String>,

    // Background task channel
    task_rx: mpsc::Receiver<TaskResult>,
    task_tx: mpsc::Sender<TaskResult>,
    /// Tasks spawned whose result has not been processed yet
    pending_tasks: usize,
    /// Id of the latest resident request; older results are dropped
    resident_request: u64,

    // Status message
    pub status_message: Option<String>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Result<Self> {
        debug!(api = %config.api_base_url, timeout = ?config.request_timeout, "App::new()");
        let api = ApiClient::new(&config)?;
        let (task_tx, task_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Ok(Self {
            config,
            api,
            images: ImageCache::new(),

            state: AppState::Normal,
            focus: Focus::List,
            search_query: String::new(),
            location_selection: 0,
            detail_scroll: 0,

            locations: Vec::new(),
            locations_loaded: false,
            selected_location_id: None,
            residents: ResidentsView::Empty,

            stats_lines: Vec::new(),
            warning_message: None,

            task_rx,
            task_tx,
            pending_tasks: 0,
            resident_request: 0,

            status_message: None,
        })
    }

    /// True while any background task has not reported back
    pub fn is_busy(&self) -> bool {
        self.pending_tasks > 0
    }

    pub fn pending_tasks(&self) -> usize {
        self.pending_tasks
    }

    // =========================================================================
    // Background Tasks
    // =========================================================================

    /// Helper to send task results, logging any channel errors
    async fn send_result(tx: &mpsc::Sender<TaskResult>, result: TaskResult) {
        if let Err(e) = tx.send(result).await {
            error!(error = %e, "Failed to send task result - channel closed");
        }
    }

    /// Spawn the initial paginated location load
    pub fn load_locations_background(&mut self) {
        info!("Starting background location load");

        let api = self.api.clone();
        let tx = self.task_tx.clone();
        self.pending_tasks += 1;

        tokio::spawn(async move {
            let locations = fetch_all_locations(&api).await;
            Self::send_result(&tx, TaskResult::Locations(locations)).await;
        });

        self.status_message = Some("Loading dimensions...".to_string());
    }

    /// Spawn the resident fetch for one location
    fn fetch_residents_background(&mut self, location: &Location) {
        self.resident_request += 1;
        let request = self.resident_request;
        let location_id = location.id;
        let urls = location.residents.clone();
        let api = self.api.clone();
        let tx = self.task_tx.clone();
        self.pending_tasks += 1;

        debug!(request, location_id, residents = urls.len(), "Spawning resident fetch");

        tokio::spawn(async move {
            let characters = fetch_residents(&urls, |url| {
                let api = api.clone();
                async move { api.fetch_character(&url).await }
            })
            .await;

            Self::send_result(
                &tx,
                TaskResult::Residents {
                    request,
                    location_id,
                    characters,
                },
            )
            .await;
        });
    }

    /// Spawn one portrait fetch per card that is still waiting for its image
    fn fetch_portraits_background(&mut self) {
        let ResidentsView::Loaded { ref cards, .. } = self.residents else {
            return;
        };

        let wanted: Vec<(i64, String)> = cards
            .iter()
            .filter(|card| matches!(card.portrait, PortraitSlot::Loading))
            .map(|card| (card.character.id, card.character.image.clone()))
            .collect();

        for (character_id, url) in wanted {
            let images = self.images.clone();
            let api = self.api.clone();
            let tx = self.task_tx.clone();
            self.pending_tasks += 1;

            tokio::spawn(async move {
                let portrait = images
                    .get_or_fetch(character_id, &url, |url| async move {
                        api.fetch_image(&url).await
                    })
                    .await;
                Self::send_result(&tx, TaskResult::Portrait { character_id, portrait }).await;
            });
        }
    }

    /// Check for completed background tasks and process results
    pub fn check_background_tasks(&mut self) {
        // Collect all pending results first to avoid borrow conflicts
        let mut results = Vec::new();
        while let Ok(result) = self.task_rx.try_recv() {
            results.push(result);
        }

        for result in results {
            self.pending_tasks = self.pending_tasks.saturating_sub(1);
            self.process_task_result(result);
        }
    }

    /// Apply a single background result to the UI state
    fn process_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::Locations(data) => {
                info!(count = data.len(), "Locations received");
                self.status_message = Some(format!("{} locations loaded", data.len()));
                self.locations = data;
                self.locations_loaded = true;
                self.clamp_selection();
            }
            TaskResult::Residents {
                request,
                location_id,
                characters,
            } => {
                if request != self.resident_request || self.gallery_location_id() != Some(location_id) {
                    debug!(request, current = self.resident_request, location_id, "Dropping stale resident result");
                    return;
                }

                if characters.is_empty() {
                    self.residents = ResidentsView::Failed { location_id };
                    return;
                }

                let cards = characters
                    .into_iter()
                    .map(|character| {
                        let portrait = if !character.has_image() {
                            PortraitSlot::Missing
                        } else if let Some(hit) = self.images.get(character.id) {
                            PortraitSlot::Ready(hit)
                        } else {
                            PortraitSlot::Loading
                        };
                        ResidentCard { character, portrait }
                    })
                    .collect();

                self.residents = ResidentsView::Loaded { location_id, cards };
                self.fetch_portraits_background();
            }
            TaskResult::Portrait {
                character_id,
                portrait,
            } => {
                let ResidentsView::Loaded { ref mut cards, .. } = self.residents else {
                    debug!(character_id, "Portrait arrived with no cards shown");
                    return;
                };

                let mut matched = 0;
                for card in cards.iter_mut().filter(|c| c.character.id == character_id) {
                    matched += 1;
                    match portrait {
                        Some(ref p) => card.portrait = PortraitSlot::Ready(Arc::clone(p)),
                        // A failure never hides a portrait the card already shows
                        None => {
                            if matches!(card.portrait, PortraitSlot::Loading) {
                                card.portrait = PortraitSlot::Missing;
                            }
                        }
                    }
                }

                if matched == 0 {
                    debug!(character_id, "Portrait arrived for a card that is gone");
                }
            }
        }
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Locations matching the current search query, in load order
    pub fn filtered_locations(&self) -> Vec<&Location> {
        filter_locations(&self.locations, &self.search_query)
    }

    /// Called after every change to the search query
    pub fn on_search_changed(&mut self) {
        self.location_selection = 0;
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
        self.location_selection = 0;
    }

    fn clamp_selection(&mut self) {
        let len = self.filtered_locations().len();
        self.location_selection = self.location_selection.min(len.saturating_sub(1));
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn location_under_cursor(&self) -> Option<&Location> {
        self.filtered_locations().get(self.location_selection).copied()
    }

    pub fn selected_location(&self) -> Option<&Location> {
        let id = self.selected_location_id?;
        self.locations.iter().find(|loc| loc.id == id)
    }

    /// Select the row under the cursor
    pub fn select_location_under_cursor(&mut self) {
        if let Some(id) = self.location_under_cursor().map(|loc| loc.id) {
            self.select_location(id);
        }
    }

    /// Show a location and start loading its residents
    pub fn select_location(&mut self, location_id: i64) {
        let Some(location) = self.locations.iter().find(|loc| loc.id == location_id).cloned() else {
            debug!(location_id, "Selected location not found");
            return;
        };

        info!(location_id, name = %location.name, "Location selected");
        self.selected_location_id = Some(location_id);
        self.detail_scroll = 0;

        if !location.has_residents() {
            // Invalidate any in-flight request for the previous selection
            self.resident_request += 1;
            self.residents = ResidentsView::NoResidents;
            return;
        }

        self.residents = ResidentsView::Loading { location_id };
        self.fetch_residents_background(&location);
    }

    /// Pick a random location from the full collection and select it
    pub fn pick_random_location(&mut self) {
        self.pick_random_location_with(&mut rand::thread_rng());
    }

    pub fn pick_random_location_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let Some(id) = self.locations.choose(rng).map(|loc| loc.id) else {
            self.show_warning(NOTHING_LOADED_WARNING);
            return;
        };

        // Make sure the pick is visible in the list
        if !self.filtered_locations().iter().any(|loc| loc.id == id) {
            self.search_query.clear();
        }
        if let Some(index) = self.filtered_locations().iter().position(|loc| loc.id == id) {
            self.location_selection = index;
        }

        self.select_location(id);
    }

    // =========================================================================
    // Resident gallery
    // =========================================================================

    /// Location the gallery is loading or showing, if any
    pub fn gallery_location_id(&self) -> Option<i64> {
        match self.residents {
            ResidentsView::Loading { location_id }
            | ResidentsView::Failed { location_id }
            | ResidentsView::Loaded { location_id, .. } => Some(location_id),
            ResidentsView::Empty | ResidentsView::NoResidents => None,
        }
    }

    pub fn resident_cards(&self) -> &[ResidentCard] {
        match self.residents {
            ResidentsView::Loaded { ref cards, .. } => cards,
            _ => &[],
        }
    }

    pub fn scroll_cards(&mut self, delta: isize) {
        let max = self.resident_cards().len().saturating_sub(1);
        self.detail_scroll = self.detail_scroll.saturating_add_signed(delta).min(max);
    }

    // =========================================================================
    // Dialogs
    // =========================================================================

    pub fn show_warning(&mut self, message: &str) {
        self.warning_message = Some(message.to_string());
        self.state = AppState::ShowingWarning;
    }

    /// Open the statistics dialog, or warn if nothing is loaded
    pub fn show_stats(&mut self) {
        match LocationStats::compute(&self.locations) {
            Some(stats) => {
                self.stats_lines = stats.summary_lines();
                self.state = AppState::ShowingStats;
            }
            None => self.show_warning(NOTHING_LOADED_WARNING),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
