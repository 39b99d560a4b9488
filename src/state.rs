//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::LinkRepository;

/// Link service over whichever store backend was configured at startup.
pub type DynLinkService = LinkService<dyn LinkRepository>;

/// Application state cloned into each request.
///
/// Holds no data of its own; the store behind the service owns every record.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<DynLinkService>,
}

impl AppState {
    /// Builds the state around an already constructed store.
    pub fn new(repository: Arc<dyn LinkRepository>) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(repository)),
        }
    }
}
