//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::ContentRepository;
use crate::geo::Gazetteer;
use crate::services::LayoutSettings;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for dataset storage
    pub repository: Arc<dyn ContentRepository>,
    pub gazetteer: Arc<Gazetteer>,
    pub layout: Arc<LayoutSettings>,
}

impl AppState {
    /// Create a new application state with the built-in gazetteer and
    /// default layout settings.
    pub fn new(repository: Arc<dyn ContentRepository>) -> Self {
        Self {
            repository,
            gazetteer: Arc::new(Gazetteer::builtin()),
            layout: Arc::new(LayoutSettings::default()),
        }
    }

    pub fn with_gazetteer(mut self, gazetteer: Gazetteer) -> Self {
        self.gazetteer = Arc::new(gazetteer);
        self
    }

    pub fn with_layout(mut self, layout: LayoutSettings) -> Self {
        self.layout = Arc::new(layout);
        self
    }
}
