//! Application state management for the neowatch dashboard
//!
//! This module contains the dashboard state, handling keyboard input, data
//! loading through the proxy, and client-side sorting of the object table.

use std::cmp::Ordering;

use chrono::{DateTime, Duration, Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};

use crate::cli::StartupConfig;
use crate::client::NeoClient;
use crate::data::{NeoItem, SortKey};

/// Direction of the table sort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Arrow shown next to the active column header
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// Main application struct managing state and data
pub struct App {
    /// Date whose objects are shown
    pub date: NaiveDate,
    /// Objects from the last successful fetch, `None` before the first one or after an error
    pub items: Option<Vec<NeoItem>>,
    /// A fetch is in flight
    pub loading: bool,
    /// Message of the last failed fetch
    pub error: Option<String>,
    /// Column the table is sorted by
    pub sort_by: SortKey,
    /// Direction of the sort
    pub sort_dir: SortDirection,
    /// Index of the highlighted row in the sorted table
    pub selected_index: usize,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag indicating a fetch has been requested
    pub refresh_requested: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Timestamp of last completed fetch
    pub last_refresh: Option<DateTime<Local>>,
    /// Proxy client
    client: NeoClient,
}

impl App {
    /// Creates a new App for `date`, with a fetch already requested
    pub fn new(client: NeoClient, date: NaiveDate) -> Self {
        Self {
            date,
            items: None,
            loading: false,
            error: None,
            sort_by: SortKey::MissDistanceKm,
            sort_dir: SortDirection::Ascending,
            selected_index: 0,
            should_quit: false,
            refresh_requested: true,
            show_help: false,
            last_refresh: None,
            client,
        }
    }

    /// Creates a new App instance from command-line startup settings
    pub fn with_startup_config(config: StartupConfig) -> Self {
        let date = config.date.unwrap_or_else(today);
        Self::new(NeoClient::new(config.server_url), date)
    }

    /// The selected date as `YYYY-MM-DD`
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Consumes a pending fetch request, marking the app as loading
    ///
    /// Returns true if the caller should now call [`App::load`].
    pub fn take_refresh_request(&mut self) -> bool {
        if !self.refresh_requested {
            return false;
        }
        self.refresh_requested = false;
        self.loading = true;
        self.error = None;
        true
    }

    /// Fetches the objects for the selected date
    ///
    /// On failure the error message is kept verbatim for the banner and the
    /// table is cleared.
    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;

        match self.client.fetch_neo(&self.date_string()).await {
            Ok(response) => self.items = Some(response.objects),
            Err(err) => {
                self.error = Some(err.to_string());
                self.items = None;
            }
        }

        self.loading = false;
        self.last_refresh = Some(Local::now());
        self.clamp_selection();
    }

    /// Selects a sort column the way a header click does
    ///
    /// The active column flips direction; another column becomes active ascending.
    pub fn on_sort(&mut self, key: SortKey) {
        if key == self.sort_by {
            self.sort_dir = self.sort_dir.toggled();
        } else {
            self.sort_by = key;
            self.sort_dir = SortDirection::Ascending;
        }
    }

    /// Returns the items ordered by the active column
    ///
    /// The sort is stable, so equal values keep their fetch order. Values are
    /// compared with `f64::total_cmp`: `-0.0` orders before `0.0` and NaN
    /// orders after +infinity.
    pub fn sorted_items(&self) -> Vec<&NeoItem> {
        let Some(items) = &self.items else {
            return Vec::new();
        };

        let mut sorted: Vec<&NeoItem> = items.iter().collect();
        sorted.sort_by(|a, b| {
            let cmp = compare_values(a.value(self.sort_by), b.value(self.sort_by));
            match self.sort_dir {
                SortDirection::Ascending => cmp,
                SortDirection::Descending => cmp.reverse(),
            }
        });
        sorted
    }

    /// Number of rows currently displayable
    pub fn item_count(&self) -> usize {
        self.items.as_ref().map_or(0, Vec::len)
    }

    /// Moves the selected date and requests a fetch
    pub fn shift_date(&mut self, days: i64) {
        if let Some(date) = self.date.checked_add_signed(Duration::days(days)) {
            self.set_date(date);
        }
    }

    /// Sets the selected date and requests a fetch if it changed
    pub fn set_date(&mut self, date: NaiveDate) {
        if date != self.date {
            self.date = date;
            self.selected_index = 0;
            self.refresh_requested = true;
        }
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `q` / `Esc`: Quit (Esc closes help first)
    /// - `Left`/`h`, `Right`/`l`: Previous / next day
    /// - `t`: Jump to today
    /// - `r`: Refresh
    /// - `1`/`2`/`3`: Sort by size / closest approach / velocity
    /// - `Up`/`k`, `Down`/`j`: Move row selection
    /// - `?`: Toggle help
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Handle help overlay - intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.shift_date(-1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.shift_date(1);
            }
            KeyCode::Char('t') => {
                self.set_date(today());
            }
            KeyCode::Char('r') => {
                self.refresh_requested = true;
            }
            KeyCode::Char('1') => {
                self.on_sort(SortKey::SizeMeters);
            }
            KeyCode::Char('2') => {
                self.on_sort(SortKey::MissDistanceKm);
            }
            KeyCode::Char('3') => {
                self.on_sort(SortKey::RelativeVelocityKps);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection_up();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection_down();
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            _ => {}
        }
    }

    /// Moves the selection up in the table, wrapping to bottom if at top
    fn move_selection_up(&mut self) {
        let count = self.item_count();
        if count == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = count - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Moves the selection down in the table, wrapping to top if at bottom
    fn move_selection_down(&mut self) {
        let count = self.item_count();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
    }

    fn clamp_selection(&mut self) {
        let count = self.item_count();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
    }
}

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn compare_values(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    /// Helper to create a KeyEvent for testing
    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn item(id: &str, size: f64, distance: f64, velocity: f64) -> NeoItem {
        NeoItem {
            id: id.to_string(),
            name: format!("({})", id),
            size_meters: size,
            miss_distance_km: distance,
            relative_velocity_kps: velocity,
        }
    }

    fn test_app() -> App {
        let mut app = App::new(
            NeoClient::default(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        app.refresh_requested = false;
        app.items = Some(vec![
            item("a", 300.0, 7_000_000.0, 5.0),
            item("b", 50.0, f64::INFINITY, 0.0),
            item("c", 120.0, 400_000.0, 21.3),
            item("d", 50.0, 2_500_000.0, 12.0),
        ]);
        app
    }

    fn sorted_ids(app: &App) -> Vec<String> {
        app.sorted_items().iter().map(|i| i.id.clone()).collect()
    }

    #[test]
    fn test_initial_state() {
        let app = App::new(NeoClient::default(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!(app.refresh_requested, "First fetch should be requested");
        assert!(app.items.is_none());
        assert!(!app.loading);
        assert!(app.error.is_none());
        assert_eq!(app.sort_by, SortKey::MissDistanceKm);
        assert_eq!(app.sort_dir, SortDirection::Ascending);
        assert_eq!(app.date_string(), "2024-01-01");
    }

    #[test]
    fn test_startup_config_defaults_to_today() {
        let app = App::with_startup_config(StartupConfig::default());
        assert_eq!(app.date, today());
    }

    #[test]
    fn test_default_sort_is_closest_approach_ascending() {
        let app = test_app();
        assert_eq!(sorted_ids(&app), vec!["c", "d", "a", "b"]);
    }

    #[test]
    fn test_sorting_does_not_reorder_items() {
        let app = test_app();
        let _ = app.sorted_items();
        let ids: Vec<_> = app.items.as_ref().unwrap().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_same_column_flips_direction() {
        let mut app = test_app();

        app.handle_key(key_event(KeyCode::Char('2')));

        assert_eq!(app.sort_dir, SortDirection::Descending);
        assert_eq!(sorted_ids(&app), vec!["b", "a", "d", "c"]);
    }

    #[test]
    fn test_double_flip_restores_order() {
        let mut app = test_app();
        app.handle_key(key_event(KeyCode::Char('3')));
        let before = sorted_ids(&app);

        app.handle_key(key_event(KeyCode::Char('3')));
        app.handle_key(key_event(KeyCode::Char('3')));

        assert_eq!(sorted_ids(&app), before);
    }

    #[test]
    fn test_other_column_resets_to_ascending() {
        let mut app = test_app();
        app.handle_key(key_event(KeyCode::Char('2')));
        assert_eq!(app.sort_dir, SortDirection::Descending);

        app.handle_key(key_event(KeyCode::Char('3')));

        assert_eq!(app.sort_by, SortKey::RelativeVelocityKps);
        assert_eq!(app.sort_dir, SortDirection::Ascending);
        assert_eq!(sorted_ids(&app), vec!["b", "a", "d", "c"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_values() {
        let mut app = test_app();
        app.handle_key(key_event(KeyCode::Char('1')));
        assert_eq!(sorted_ids(&app), vec!["b", "d", "c", "a"]);

        app.handle_key(key_event(KeyCode::Char('1')));
        assert_eq!(sorted_ids(&app), vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn test_total_order_places_negative_zero_and_nan() {
        let mut app = test_app();
        app.items = Some(vec![
            item("nan", f64::NAN, 0.0, 0.0),
            item("inf", f64::INFINITY, 0.0, 0.0),
            item("pos-zero", 0.0, 0.0, 0.0),
            item("neg-zero", -0.0, 0.0, 0.0),
        ]);
        app.handle_key(key_event(KeyCode::Char('1')));

        assert_eq!(sorted_ids(&app), vec!["neg-zero", "pos-zero", "inf", "nan"]);
    }

    #[test]
    fn test_sorted_items_empty_without_data() {
        let mut app = test_app();
        app.items = None;
        assert!(app.sorted_items().is_empty());
    }

    #[test]
    fn test_left_and_right_change_date_and_request_fetch() {
        let mut app = test_app();

        app.handle_key(key_event(KeyCode::Left));
        assert_eq!(app.date_string(), "2023-12-31");
        assert!(app.refresh_requested);

        app.refresh_requested = false;
        app.handle_key(key_event(KeyCode::Char('l')));
        app.handle_key(key_event(KeyCode::Right));
        assert_eq!(app.date_string(), "2024-01-02");
        assert!(app.refresh_requested);
    }

    #[test]
    fn test_setting_same_date_does_not_request_fetch() {
        let mut app = test_app();
        app.set_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!(!app.refresh_requested);
    }

    #[test]
    fn test_t_jumps_to_today() {
        let mut app = test_app();
        app.handle_key(key_event(KeyCode::Char('t')));
        assert_eq!(app.date, today());
    }

    #[test]
    fn test_r_requests_refresh() {
        let mut app = test_app();
        app.handle_key(key_event(KeyCode::Char('r')));
        assert!(app.refresh_requested);
    }

    #[test]
    fn test_take_refresh_request_marks_loading() {
        let mut app = test_app();
        app.error = Some("old".to_string());
        assert!(!app.take_refresh_request());

        app.refresh_requested = true;
        assert!(app.take_refresh_request());
        assert!(app.loading);
        assert!(app.error.is_none());
        assert!(!app.refresh_requested);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = test_app();

        app.handle_key(key_event(KeyCode::Up));
        assert_eq!(app.selected_index, 3, "Should wrap to bottom");

        app.handle_key(key_event(KeyCode::Char('j')));
        assert_eq!(app.selected_index, 0, "Should wrap to top");

        app.handle_key(key_event(KeyCode::Down));
        assert_eq!(app.selected_index, 1);
    }

    #[test]
    fn test_navigation_without_items_is_noop() {
        let mut app = test_app();
        app.items = Some(Vec::new());
        app.handle_key(key_event(KeyCode::Down));
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_q_and_esc_quit() {
        let mut app = test_app();
        app.handle_key(key_event(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = test_app();
        app.handle_key(key_event(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_overlay_intercepts_keys() {
        let mut app = test_app();
        app.handle_key(key_event(KeyCode::Char('?')));
        assert!(app.show_help);

        app.handle_key(key_event(KeyCode::Char('1')));
        assert_eq!(app.sort_by, SortKey::MissDistanceKm, "Keys are ignored under help");

        app.handle_key(key_event(KeyCode::Esc));
        assert!(!app.show_help);
        assert!(!app.should_quit, "Esc closes help without quitting");
    }

    #[tokio::test]
    async fn test_load_failure_sets_error_and_clears_items() {
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let mut app = test_app();
        app.client = NeoClient::new(server.uri());
        app.load().await;

        assert_eq!(app.error.as_deref(), Some("Failed to fetch NEOs: 500 boom"));
        assert!(app.items.is_none());
        assert!(!app.loading);
        assert!(app.last_refresh.is_some());
    }

    #[tokio::test]
    async fn test_load_success_replaces_items() {
        use wiremock::matchers::{method, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("date", "2024-01-01"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"date":"2024-01-01","objects":[{"id":"x","name":"Test Rock","sizeMeters":0,"missDistanceKm":null,"relativeVelocityKps":0}]}"#,
            ))
            .mount(&server)
            .await;

        let mut app = test_app();
        app.selected_index = 3;
        app.client = NeoClient::new(server.uri());
        app.load().await;

        assert!(app.error.is_none());
        assert_eq!(app.item_count(), 1);
        assert_eq!(app.selected_index, 0, "Selection is clamped to the new rows");
    }
}
