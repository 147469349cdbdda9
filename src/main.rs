//! Zellij plugin wrapper and entry point.
//!
//! The thin integration layer between the Zinema library and the Zellij
//! plugin runtime. It maps raw key presses to library events based on
//! the current view and input mode, forwards completed `web_request`
//! calls back as responses, and executes the actions the handler
//! returns.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, create `AppState`,
//!    request the `WebAccess` permission, subscribe to events
//! 2. **Permissions granted**: dispatch `Started`, which issues the
//!    initial search and favourites fetches
//! 3. **Update**: translate Zellij events, delegate to `handle_event`,
//!    execute actions
//! 4. **Render**: store the viewport dimensions and paint the frame
//!
//! # Keybindings
//!
//! Search view:
//! - `h`/`Left`, `l`/`Right`: move the card cursor
//! - `<`/`H`, `>`/`L`: scroll the strip without moving the cursor
//! - `p`/`n`: previous/next result page
//! - `Enter`/`Space`: toggle the selected movie's favourite status
//! - `/`: edit the query
//!
//! Favourites view:
//! - `k`/`Up`, `j`/`Down`: move the row cursor
//! - `x`/`Delete`: remove the selected favourite
//!
//! Both views:
//! - `Tab`: switch views (`1`: search, `2`: favourites)
//! - `Esc`: dismiss the error banner
//! - `q`: close the plugin
//!
//! While editing the query, keys type into the query bar; `Enter`
//! submits and `Esc` cancels.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use zinema::api::{RequestTag, Verb};
use zinema::{handle_event, Action, Config, Event, InputMode, ViewMode};

register_plugin!(State);

/// Plugin state wrapper around the library's `AppState`.
struct State {
    app: zinema::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: zinema::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// # Permissions
    ///
    /// Requests `WebAccess` only; both remote APIs are reached through
    /// the `web_request` host call.
    ///
    /// # Subscriptions
    ///
    /// - `Key`: keyboard input
    /// - `WebRequestResult`: completed web requests
    /// - `PermissionRequestResult`: gate for the initial fetches
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zinema::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!("plugin loading started");
        self.app = zinema::initialize(&config);
        tracing::debug!("app state initialized");

        request_permission(&[PermissionType::WebAccess]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// Translates them to library events, delegates to `handle_event`,
    /// and executes resulting actions. Returns `true` if the UI should
    /// re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match RequestTag::from_context(&context) {
                    Some(tag) => {
                        tracing::debug!(status = status, tag = ?tag, "web request completed");
                        Event::HttpResponse { tag, status, body }
                    }
                    None => {
                        tracing::debug!("ignoring web request result without our context");
                        return false;
                    }
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => {
                    tracing::debug!("permissions granted - issuing initial fetches");
                    Event::Started
                }
                PermissionStatus::Denied => {
                    tracing::warn!("web access denied - plugin cannot fetch movies");
                    return false;
                }
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled"
                );
                for action in actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Renders the plugin UI.
    ///
    /// Stores the viewport dimensions first so selection and scroll
    /// clamping in the handler see the real terminal size.
    fn render(&mut self, rows: usize, cols: usize) {
        self.app.rows = rows;
        self.app.cols = cols;
        zinema::ui::render(&self.app);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    ///
    /// Query editing mode captures everything first; otherwise the
    /// mapping depends on which view is visible.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if self.app.input_mode == InputMode::EditQuery {
            return Some(match key.bare_key {
                BareKey::Enter => Event::SubmitQuery,
                BareKey::Esc => Event::Escape,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) if key.has_no_modifiers() || key.has_modifiers(&[KeyModifier::Shift]) => {
                    Event::Char(c)
                }
                _ => return None,
            });
        }

        Some(match key.bare_key {
            BareKey::Tab => match self.app.view_mode {
                ViewMode::Search => Event::ShowFavourites,
                ViewMode::Favourites => Event::ShowSearch,
            },
            BareKey::Char('1') => Event::ShowSearch,
            BareKey::Char('2') => Event::ShowFavourites,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Esc => Event::Escape,

            BareKey::Left | BareKey::Char('h') => Event::SelectLeft,
            BareKey::Right | BareKey::Char('l') => Event::SelectRight,
            BareKey::Char('<') | BareKey::Char('H') => Event::ScrollLeft,
            BareKey::Char('>') | BareKey::Char('L') => Event::ScrollRight,
            BareKey::Char('n') => Event::NextPage,
            BareKey::Char('p') => Event::PrevPage,
            BareKey::Char('/') => Event::EditQuery,
            BareKey::Enter | BareKey::Char(' ') if self.app.view_mode == ViewMode::Search => {
                Event::ToggleFavourite
            }

            BareKey::Up | BareKey::Char('k') => Event::SelectUp,
            BareKey::Down | BareKey::Char('j') => Event::SelectDown,
            BareKey::Char('x') | BareKey::Delete => Event::RemoveFavourite,

            _ => return None,
        })
    }

    /// Executes an action returned from event handling.
    ///
    /// # Actions
    ///
    /// - `CloseFocus`: hide the plugin pane
    /// - `Http`: dispatch through the `web_request` host call, with the
    ///   correlation tag encoded into the request context
    fn execute_action(action: Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Http(request) => {
                tracing::debug!(url = %request.url, verb = ?request.verb, "dispatching web request");
                let verb = match request.verb {
                    Verb::Get => HttpVerb::Get,
                    Verb::Post => HttpVerb::Post,
                    Verb::Delete => HttpVerb::Delete,
                };
                let context = request.tag.to_context();
                web_request(request.url, verb, request.headers, request.body, context);
            }
        }
    }
}
