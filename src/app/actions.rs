//! Side effects returned by the event handler.

use crate::api::ApiRequest;

/// An action for the plugin shim to execute against the Zellij host.
///
/// The handler never calls the host directly; it returns actions so that
/// every side effect is visible to tests as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hide the plugin pane.
    CloseFocus,
    /// Dispatch a request through the `web_request` host call.
    Http(ApiRequest),
}
