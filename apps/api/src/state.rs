use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::Completion;
use crate::render::PageConfig;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    /// Completion backend. `None` when no API key is configured.
    pub llm: Option<Arc<dyn Completion>>,
    /// Page geometry and fonts for the cover-letter PDF.
    pub page_config: PageConfig,
}

impl AppState {
    pub fn has_api_key(&self) -> bool {
        self.llm.is_some()
    }
}
