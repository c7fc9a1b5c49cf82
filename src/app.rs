//! Application state management for the currency converter
//!
//! This module contains the main application state, handling keyboard input,
//! rate load results, the currency picker and the debounced amount field.

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

use crate::config::{Preferences, DEFAULT_DEBOUNCE_MS};
use crate::convert::{convert, exchange_rate, parse_amount, sanitize_amount_input};
use crate::data::{all_currencies, search_currencies, Currency, LoadedRates, RateSnapshot};
use crate::debounce::Debouncer;
use crate::refresh::RefreshMessage;

/// Shown when rates came from the cache because the API was unreachable
pub const OFFLINE_NOTICE: &str = "Offline: using cached data";

/// Shown when rates could not be loaded at all
pub const LOAD_FAILED: &str = "Failed to load exchange rates";

/// Shown when the selected pair has no rate in the current snapshot
pub const INVALID_CURRENCY: &str = "Invalid currency";

/// Progress of loading exchange rates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet
    Idle,
    /// A load is in flight
    Loading,
    /// Rates are available (live or cached)
    Ready,
    /// The last load failed with nothing to fall back on
    Error,
}

/// Which side of the pair a picker edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    From,
    To,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::From => "From",
            Side::To => "To",
        }
    }
}

/// State of the open currency picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Side being edited
    pub side: Side,
    /// Search text typed into the picker
    pub query: String,
    /// Index of the highlighted entry within the filtered list
    pub highlighted: usize,
}

impl Selector {
    /// Opens a picker with the current code highlighted
    pub fn open(side: Side, current: &str) -> Self {
        let highlighted = all_currencies()
            .iter()
            .position(|currency| currency.code == current)
            .unwrap_or(0);
        Self {
            side,
            query: String::new(),
            highlighted,
        }
    }

    /// Currencies matching the search text
    pub fn matches(&self) -> Vec<&'static Currency> {
        search_currencies(&self.query)
    }

    pub fn highlighted_currency(&self) -> Option<&'static Currency> {
        self.matches().get(self.highlighted).copied()
    }

    fn move_up(&mut self) {
        let count = self.matches().len();
        if count == 0 {
            return;
        }
        self.highlighted = if self.highlighted == 0 {
            count - 1
        } else {
            self.highlighted - 1
        };
    }

    fn move_down(&mut self) {
        let count = self.matches().len();
        if count == 0 {
            return;
        }
        self.highlighted = (self.highlighted + 1) % count;
    }

    fn set_query(&mut self, query: String) {
        self.query = query;
        self.highlighted = 0;
    }
}

/// Main application struct managing state and data
pub struct App {
    /// Progress of the current or last rate load
    pub load_state: LoadState,
    /// Amount text as typed
    pub amount: String,
    /// Amount text after the debounce delay; drives the result
    pub debounced_amount: String,
    /// Source currency code
    pub from: String,
    /// Target currency code
    pub to: String,
    /// Converted amount, `None` shows the placeholder
    pub result: Option<f64>,
    /// Load failure or offline notice
    pub error: Option<String>,
    /// Why the current pair could not be converted
    pub conversion_error: Option<String>,
    /// The rate snapshot in use
    pub snapshot: Option<RateSnapshot>,
    /// Fetch time of the snapshot in use
    pub last_updated: Option<DateTime<Utc>>,
    /// Whether the last load reached the API
    pub is_online: bool,
    /// Open currency picker, if any
    pub selector: Option<Selector>,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag indicating a refresh has been requested
    refresh_requested: bool,
    /// Flag indicating preferences changed since last saved
    preferences_dirty: bool,
    /// Pending amount edits
    amount_debouncer: Debouncer<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(
            Preferences::default(),
            Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        )
    }
}

impl App {
    /// Creates a new App starting from saved preferences
    pub fn new(preferences: Preferences, debounce: Duration) -> Self {
        Self {
            load_state: LoadState::Idle,
            debounced_amount: preferences.amount.clone(),
            amount: preferences.amount,
            from: preferences.from,
            to: preferences.to,
            result: None,
            error: None,
            conversion_error: None,
            snapshot: None,
            last_updated: None,
            is_online: true,
            selector: None,
            show_help: false,
            should_quit: false,
            refresh_requested: false,
            preferences_dirty: false,
            amount_debouncer: Debouncer::new(debounce),
        }
    }

    /// Current amount and pair, for persisting
    pub fn preferences(&self) -> Preferences {
        Preferences {
            amount: self.amount.clone(),
            from: self.from.clone(),
            to: self.to.clone(),
        }
    }

    /// Returns and clears the "preferences changed" flag
    pub fn take_preferences_dirty(&mut self) -> bool {
        std::mem::take(&mut self.preferences_dirty)
    }

    /// Returns and clears the "refresh requested" flag
    pub fn take_refresh_request(&mut self) -> bool {
        std::mem::take(&mut self.refresh_requested)
    }

    /// Requests a reload unless one is already running
    pub fn request_refresh(&mut self) {
        if self.load_state != LoadState::Loading {
            self.refresh_requested = true;
        }
    }

    /// Shows a fresh cached snapshot before the first load completes
    pub fn apply_cached_snapshot(&mut self, snapshot: RateSnapshot) {
        self.last_updated = Some(snapshot.timestamp);
        self.snapshot = Some(snapshot);
        self.recompute();
    }

    /// Applies a message from the background refresh task
    pub fn apply_refresh_message(&mut self, message: RefreshMessage) {
        match message {
            RefreshMessage::RefreshStarted => {
                self.load_state = LoadState::Loading;
            }
            RefreshMessage::RatesLoaded(loaded) => self.apply_loaded(loaded),
            RefreshMessage::RefreshFailed(_) => self.apply_failure(),
        }
    }

    /// Installs freshly loaded rates, live or cached fallback
    pub fn apply_loaded(&mut self, loaded: LoadedRates) {
        let offline = loaded.is_offline();
        self.is_online = !offline;
        self.error = if offline {
            Some(OFFLINE_NOTICE.to_string())
        } else {
            None
        };
        self.last_updated = Some(loaded.snapshot.timestamp);
        self.snapshot = Some(loaded.snapshot);
        self.load_state = LoadState::Ready;
        self.recompute();
    }

    /// Records a load that failed with no cached fallback
    pub fn apply_failure(&mut self) {
        self.is_online = false;
        self.error = Some(LOAD_FAILED.to_string());
        self.load_state = LoadState::Error;
        self.recompute();
    }

    /// Releases a debounced amount edit once its delay has passed
    pub fn tick(&mut self, now: Instant) {
        if let Some(amount) = self.amount_debouncer.poll(now) {
            self.debounced_amount = amount;
            self.recompute();
        }
    }

    /// Replaces the amount text if it is a valid partial number
    ///
    /// Returns whether the edit was accepted.
    pub fn set_amount(&mut self, candidate: &str, now: Instant) -> bool {
        let Some(amount) = sanitize_amount_input(candidate) else {
            return false;
        };
        if amount != self.amount {
            self.amount = amount;
            self.amount_debouncer.schedule(self.amount.clone(), now);
            self.preferences_dirty = true;
        }
        true
    }

    /// Exchanges the source and target currencies
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
        self.preferences_dirty = true;
        self.recompute();
    }

    /// Sets one side of the pair and closes the picker
    pub fn select_currency(&mut self, side: Side, code: &str) {
        match side {
            Side::From => self.from = code.to_string(),
            Side::To => self.to = code.to_string(),
        }
        self.selector = None;
        self.preferences_dirty = true;
        self.recompute();
    }

    pub fn open_selector(&mut self, side: Side) {
        let current = match side {
            Side::From => &self.from,
            Side::To => &self.to,
        };
        self.selector = Some(Selector::open(side, current));
    }

    pub fn close_selector(&mut self) {
        self.selector = None;
    }

    /// Value of one unit of `from` in `to`, if the snapshot has both
    pub fn exchange_rate(&self) -> Option<f64> {
        let snapshot = self.snapshot.as_ref()?;
        exchange_rate(&self.from, &self.to, &snapshot.rates).ok()
    }

    /// Value of one unit of `to` in `from`
    pub fn inverse_rate(&self) -> Option<f64> {
        let snapshot = self.snapshot.as_ref()?;
        exchange_rate(&self.to, &self.from, &snapshot.rates).ok()
    }

    /// Recomputes the result from the debounced amount, pair and snapshot
    fn recompute(&mut self) {
        self.result = None;
        self.conversion_error = None;

        let Some(ref snapshot) = self.snapshot else {
            return;
        };
        let Some(amount) = parse_amount(&self.debounced_amount) else {
            return;
        };

        match convert(amount, &self.from, &self.to, &snapshot.rates) {
            Ok(value) => self.result = Some(value),
            Err(_) => self.conversion_error = Some(INVALID_CURRENCY.to_string()),
        }
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `0`-`9`, `.`, `,`: Edit the amount
    /// - `Backspace`: Delete the last amount character
    /// - `f` / `t`: Open the From / To currency picker
    /// - `s`: Swap currencies
    /// - `r`: Refresh rates
    /// - `?`: Toggle help
    /// - `q` or `Esc`: Quit (Esc closes the picker or help when open)
    /// - `Ctrl-C`: Quit from anywhere
    pub fn handle_key(&mut self, key_event: KeyEvent, now: Instant) {
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            self.should_quit = true;
            return;
        }

        // Help overlay intercepts all keys when shown
        if self.show_help {
            if matches!(
                key_event.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return;
        }

        if self.selector.is_some() {
            self.handle_selector_key(key_event);
            return;
        }

        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == ',' => {
                let candidate = format!("{}{}", self.amount, c);
                self.set_amount(&candidate, now);
            }
            KeyCode::Backspace => {
                let mut candidate = self.amount.clone();
                candidate.pop();
                self.set_amount(&candidate, now);
            }
            KeyCode::Char('f') => self.open_selector(Side::From),
            KeyCode::Char('t') => self.open_selector(Side::To),
            KeyCode::Char('s') => self.swap(),
            KeyCode::Char('r') => self.request_refresh(),
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            _ => {}
        }
    }

    fn handle_selector_key(&mut self, key_event: KeyEvent) {
        let Some(selector) = self.selector.as_mut() else {
            return;
        };

        match key_event.code {
            KeyCode::Esc => self.close_selector(),
            KeyCode::Enter => {
                let choice = selector
                    .highlighted_currency()
                    .map(|currency| (selector.side, currency.code));
                if let Some((side, code)) = choice {
                    self.select_currency(side, code);
                }
            }
            KeyCode::Up => selector.move_up(),
            KeyCode::Down => selector.move_down(),
            KeyCode::Backspace => {
                let mut query = selector.query.clone();
                query.pop();
                selector.set_query(query);
            }
            KeyCode::Char(c) => {
                let query = format!("{}{}", selector.query, c);
                selector.set_query(query);
            }
            _ => {}
        }
    }
}
