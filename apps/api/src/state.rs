use std::sync::Arc;

use crate::interview::session::SessionStore;
use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// All live interview sessions. Constructed at process start; the idle
    /// sweeper in `main` evicts stale entries.
    pub sessions: Arc<SessionStore>,
    /// Completion backend behind a trait so tests run against a scripted client.
    pub llm: Arc<dyn CompletionClient>,
}
