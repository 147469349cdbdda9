//! Zinema: a Zellij plugin for searching movies and keeping favourites.
//!
//! Zinema talks to two remote collaborators through Zellij's non-blocking
//! `web_request` host call: an OMDb-style search API for paginated movie
//! lookups, and a small REST backend that persists the user's favourites.
//! Results are browsed in a horizontal card carousel; favourites live in
//! a second view and can be toggled from either one.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  - Key mapping, web_request dispatch                │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, favourites store                 │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                              │
//! ┌───────────────┐             ┌───────────────┐
//! │ UI Layer      │             │ API Clients   │
//! │ (ui/)         │             │ (api/)        │
//! │ - Rendering   │             │ - OMDb search │
//! │ - Theming     │             │ - Favourites  │
//! └───────────────┘             └───────────────┘
//!         │                              │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Movie model, errors (domain/)                    │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - OpenTelemetry tracing (observability/)           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! All I/O happens at the shim boundary. The application layer consumes
//! events and emits [`Action`]s; the API clients build requests and
//! parse responses as pure functions. This keeps the entire pipeline
//! from key press to state change unit-testable without Zellij.
//!
//! # Configuration
//!
//! ```kdl
//! // ~/.config/zellij/layouts/default.kdl
//! pane {
//!     plugin location="file:/path/to/zinema.wasm" {
//!         api_key "your-omdb-key"
//!         favourites_url "http://localhost:3000/api/favourite"
//!         default_query "avengers"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, build `AppState`,
//!    request the `WebAccess` permission, subscribe to events
//! 2. **Started**: once permissions are granted, fetch the default
//!    query's first page and the favourites collection
//! 3. **Update**: map keys and completed web requests to events,
//!    delegate to [`handle_event`], execute returned actions
//! 4. **Render**: compute the view model and paint the frame

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use api::ApiConfig;
pub use app::{handle_event, Action, AppState, Event, InputMode, ViewMode};
pub use domain::{Movie, Result, ZinemaError};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Values come from the plugin block in a KDL layout and arrive as a
/// string map during plugin load.
#[derive(Debug, Clone)]
pub struct Config {
    /// OMDb API key. Searches fail upstream without one.
    pub api_key: String,

    /// Base URL of the movie search endpoint.
    pub search_url: String,

    /// Base URL of the favourites collection (no trailing slash).
    pub favourites_url: String,

    /// Query fetched on startup and used when an empty query is submitted.
    pub default_query: String,

    /// Built-in theme name. Ignored if `theme_file` is set.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`,
    /// `catppuccin-frappe`, `catppuccin-macchiato`.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over
    /// `theme_name`. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Tracing level for OpenTelemetry spans. Default: `"info"`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let api = ApiConfig::default();
        Self {
            api_key: api.api_key,
            search_url: api.search_url,
            favourites_url: api.favourites_url,
            default_query: api.default_query,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Missing keys fall back to defaults; there is no hard failure
    /// path here since the plugin should come up even half-configured
    /// (a missing API key surfaces later as a search error banner).
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        Self {
            api_key: config
                .get("api_key")
                .cloned()
                .unwrap_or(defaults.api_key),
            search_url: config
                .get("search_url")
                .cloned()
                .unwrap_or(defaults.search_url),
            favourites_url: config
                .get("favourites_url")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.favourites_url),
            default_query: config
                .get("default_query")
                .cloned()
                .filter(|q| !q.trim().is_empty())
                .unwrap_or(defaults.default_query),
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// Extracts the endpoint configuration carried into `AppState`.
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            api_key: self.api_key.clone(),
            search_url: self.search_url.clone(),
            favourites_url: self.favourites_url.clone(),
            default_query: self.default_query.clone(),
        }
    }
}

/// Builds the initial application state from configuration.
///
/// Resolves the theme (file, then name, then default, each falling back
/// on failure rather than refusing to start) and seeds the state with
/// the endpoint configuration. The initial fetches are issued later by
/// the [`Event::Started`] event once permissions are granted.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing zinema plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(
                Theme::default,
                |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                        Theme::default()
                    })
                },
            )
        },
        |theme_file| {
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(config.api_config(), theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_parses_all_known_keys() {
        let mut map = BTreeMap::new();
        map.insert("api_key".to_string(), "k123".to_string());
        map.insert(
            "favourites_url".to_string(),
            "http://backend:3000/api/favourite/".to_string(),
        );
        map.insert("default_query".to_string(), "batman".to_string());
        map.insert("theme".to_string(), "catppuccin-latte".to_string());
        map.insert("trace_level".to_string(), "debug".to_string());

        let config = Config::from_zellij(&map);
        assert_eq!(config.api_key, "k123");
        // Trailing slash is stripped so delete URLs join cleanly.
        assert_eq!(config.favourites_url, "http://backend:3000/api/favourite");
        assert_eq!(config.default_query, "batman");
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config.search_url, "https://www.omdbapi.com/");
        assert_eq!(config.default_query, "avengers");
        assert!(config.theme_name.is_none());
    }

    #[test]
    fn blank_default_query_is_rejected() {
        let mut map = BTreeMap::new();
        map.insert("default_query".to_string(), "   ".to_string());
        let config = Config::from_zellij(&map);
        assert_eq!(config.default_query, "avengers");
    }

    #[test]
    fn initialize_seeds_state_with_endpoints() {
        let mut map = BTreeMap::new();
        map.insert("api_key".to_string(), "k123".to_string());
        let state = initialize(&Config::from_zellij(&map));

        assert_eq!(state.api.api_key, "k123");
        assert_eq!(state.query, "avengers");
        assert_eq!(state.view_mode, ViewMode::Search);
        assert!(state.movies.is_empty());
    }

    #[test]
    fn unknown_theme_name_falls_back_to_default() {
        let config = Config {
            theme_name: Some("no-such-theme".to_string()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.theme.name, "catppuccin-mocha");
    }
}
