//! Debounced place search, last query wins.
//!
//! Keystrokes reschedule a single debounce timer. When it fires, the latest
//! text is sent to the [`Geocoder`] on the async runtime and the response
//! comes back over a channel drained by [`PlaceSearch::poll`]. Every call to
//! [`PlaceSearch::search`] starts a new generation; responses from older
//! generations are discarded.

use crate::core::config::SearchConfig;
use crate::prelude::Arc;
use crate::runtime::{self, AsyncHandle};
use crate::search::{debounce::Debouncer, geocoding::SearchResult};
use crate::traits::Geocoder;
use crossbeam_channel::{Receiver, Sender};

#[derive(Debug)]
enum SearchMessage {
    DebounceElapsed { ticket: u64, text: String },
    Completed { generation: u64, results: Vec<SearchResult> },
}

pub struct PlaceSearch {
    geocoder: Arc<dyn Geocoder>,
    query: String,
    results: Vec<SearchResult>,
    loading: bool,
    panel_open: bool,
    keyboard_visible: bool,
    /// Text of the last non-blank search that completed
    last_completed: Option<String>,
    generation: u64,
    debounce_ticket: u64,
    debouncer: Debouncer,
    in_flight: Option<Box<dyn AsyncHandle>>,
    tx: Sender<SearchMessage>,
    rx: Receiver<SearchMessage>,
}

impl PlaceSearch {
    pub fn new(geocoder: Arc<dyn Geocoder>, config: &SearchConfig) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            geocoder,
            query: String::new(),
            results: Vec::new(),
            loading: false,
            panel_open: false,
            keyboard_visible: false,
            last_completed: None,
            generation: 0,
            debounce_ticket: 0,
            debouncer: Debouncer::new(config.debounce()),
            in_flight: None,
            tx,
            rx,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    /// The dropdown shows while open and loading or holding results
    pub fn is_panel_visible(&self) -> bool {
        self.panel_open && (self.loading || !self.results.is_empty())
    }

    /// A finished non-blank search found nothing
    pub fn shows_empty_state(&self) -> bool {
        self.panel_open && !self.loading && self.results.is_empty() && self.last_completed.is_some()
    }

    /// Results, the spinner row or the empty-state text are on screen
    pub fn shows_dropdown(&self) -> bool {
        self.is_panel_visible() || self.shows_empty_state()
    }

    pub fn is_keyboard_visible(&self) -> bool {
        self.keyboard_visible
    }

    pub fn is_debounce_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Text input changed: open the panel and restart the debounce timer
    pub fn on_query_changed(&mut self, text: impl Into<String>) {
        self.query = text.into();
        self.panel_open = true;
        self.keyboard_visible = true;

        self.debounce_ticket += 1;
        let ticket = self.debounce_ticket;
        let text = self.query.clone();
        let tx = self.tx.clone();
        self.debouncer.schedule(move || {
            let _ = tx.send(SearchMessage::DebounceElapsed { ticket, text });
        });
    }

    /// Return key: search now, skipping the pending timer
    pub fn submit_query(&mut self) {
        self.cancel_debounce();
        let query = self.query.clone();
        self.search(&query);
    }

    /// Issues one geocoding request; blank text clears the list without one
    pub fn search(&mut self, text: &str) {
        self.generation += 1;
        if let Some(previous) = self.in_flight.take() {
            previous.cancel();
        }

        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.results.clear();
            self.loading = false;
            self.last_completed = None;
            return;
        }

        self.loading = true;
        let generation = self.generation;
        let query = trimmed.to_string();
        let geocoder = Arc::clone(&self.geocoder);
        let tx = self.tx.clone();
        log::debug!("Search #{} for {:?}", generation, query);

        self.in_flight = Some(runtime::spawn(async move {
            let results = match geocoder.forward(&query).await {
                Ok(results) => results,
                Err(e) => {
                    log::warn!("Geocoding failed for {:?}: {}", query, e);
                    Vec::new()
                }
            };
            let _ = tx.send(SearchMessage::Completed {
                generation,
                results,
            });
        }));
        self.last_completed = None;
    }

    /// Applies timer firings and responses; returns true when state changed
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(message) = self.rx.try_recv() {
            match message {
                SearchMessage::DebounceElapsed { ticket, text } => {
                    if ticket != self.debounce_ticket {
                        log::trace!("Ignoring superseded debounce #{}", ticket);
                        continue;
                    }
                    self.search(&text);
                    changed = true;
                }
                SearchMessage::Completed {
                    generation,
                    results,
                } => {
                    if generation != self.generation {
                        log::debug!(
                            "Discarding stale search #{} (current #{})",
                            generation,
                            self.generation
                        );
                        continue;
                    }
                    log::debug!("Search #{} returned {} results", generation, results.len());
                    self.results = results;
                    self.loading = false;
                    self.in_flight = None;
                    self.last_completed = Some(self.query.trim().to_string());
                    changed = true;
                }
            }
        }
        changed
    }

    /// Closes the panel, writes the short label back and hides the keyboard
    pub fn select_result(&mut self, index: usize) -> Option<SearchResult> {
        let result = self.results.get(index)?.clone();
        self.cancel_debounce();
        self.panel_open = false;
        self.query = result.text.clone();
        self.dismiss_keyboard();
        log::info!("Selected place {} ({})", result.place_name, result.coordinate);
        Some(result)
    }

    /// Input focused: reopen the panel
    pub fn focus_input(&mut self) {
        self.panel_open = true;
        self.keyboard_visible = true;
    }

    pub fn close_panel(&mut self) {
        self.panel_open = false;
    }

    pub fn dismiss_keyboard(&mut self) {
        self.keyboard_visible = false;
    }

    fn cancel_debounce(&mut self) {
        self.debounce_ticket += 1;
        self.debouncer.cancel();
    }
}

impl std::fmt::Debug for PlaceSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaceSearch")
            .field("query", &self.query)
            .field("results", &self.results.len())
            .field("loading", &self.loading)
            .field("panel_open", &self.panel_open)
            .field("generation", &self.generation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::Coordinate;
    use crate::Result;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Echoes the query back as a single result after a configurable delay
    #[derive(Default)]
    struct EchoGeocoder {
        calls: Mutex<Vec<String>>,
        latency_ms: Mutex<Vec<u64>>,
    }

    #[async_trait]
    impl Geocoder for EchoGeocoder {
        async fn forward(&self, query: &str) -> Result<Vec<SearchResult>> {
            self.calls.lock().unwrap().push(query.to_string());
            let latency = self.latency_ms.lock().unwrap().pop().unwrap_or(0);
            if latency > 0 {
                tokio::time::sleep(Duration::from_millis(latency)).await;
            }
            Ok(vec![SearchResult::new(
                format!("place.{query}"),
                format!("{query}, ישראל"),
                query,
                Coordinate::new(34.78, 32.08),
            )])
        }
    }

    async fn settle(search: &mut PlaceSearch, millis: u64) {
        tokio::time::sleep(Duration::from_millis(millis)).await;
        for _ in 0..5 {
            tokio::task::yield_now().await;
            search.poll();
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_search_skips_network() {
        let geocoder = Arc::new(EchoGeocoder::default());
        let mut search = PlaceSearch::new(geocoder.clone(), &SearchConfig::default());

        search.search("   ");
        assert!(search.results().is_empty());
        assert!(!search.is_loading());

        settle(&mut search, 10).await;
        assert!(geocoder.calls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_wraps_request() {
        let geocoder = Arc::new(EchoGeocoder::default());
        let mut search = PlaceSearch::new(geocoder.clone(), &SearchConfig::default());

        search.on_query_changed("חיפה");
        search.search("חיפה");
        assert!(search.is_loading());
        assert!(search.is_panel_visible());

        settle(&mut search, 10).await;
        assert!(!search.is_loading());
        assert_eq!(search.results().len(), 1);
        assert_eq!(search.results()[0].text, "חיפה");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_is_discarded() {
        let geocoder = Arc::new(EchoGeocoder::default());
        // Popped in reverse: the second request answers fast, the first slowly
        geocoder.latency_ms.lock().unwrap().extend([10, 500]);
        let mut search = PlaceSearch::new(geocoder.clone(), &SearchConfig::default());

        search.search("ירושלים");
        tokio::task::yield_now().await;
        search.search("באר שבע");

        settle(&mut search, 600).await;
        assert_eq!(search.results().len(), 1);
        assert_eq!(search.results()[0].text, "באר שבע");
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_result_closes_panel() {
        let geocoder = Arc::new(EchoGeocoder::default());
        let mut search = PlaceSearch::new(geocoder, &SearchConfig::default());

        search.on_query_changed("עכו");
        settle(&mut search, 400).await;
        assert!(search.is_panel_visible());

        let selected = search.select_result(0).unwrap();
        assert_eq!(selected.text, "עכו");
        assert_eq!(search.query(), "עכו");
        assert!(!search.is_panel_open());
        assert!(!search.is_keyboard_visible());
        assert!(search.select_result(5).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_skips_debounce() {
        let geocoder = Arc::new(EchoGeocoder::default());
        let mut search = PlaceSearch::new(geocoder.clone(), &SearchConfig::default());

        search.on_query_changed("צפת");
        search.submit_query();
        assert!(!search.is_debounce_pending());

        settle(&mut search, 1_000).await;
        assert_eq!(*geocoder.calls.lock().unwrap(), vec!["צפת".to_string()]);
    }
}
