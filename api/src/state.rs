//! Application state

use std::sync::Arc;

use report_card_core::adapter::ReportRepository;
use report_card_core::backend::BackendClient;

use crate::config::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Report storage
    pub repository: Arc<dyn ReportRepository>,
    /// Optional Supabase client
    pub backend: Option<Arc<BackendClient>>,
    /// Configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        repository: Arc<dyn ReportRepository>,
        backend: Option<BackendClient>,
        config: &AppConfig,
    ) -> Self {
        Self {
            repository,
            backend: backend.map(Arc::new),
            config: Arc::new(config.clone()),
        }
    }
}
