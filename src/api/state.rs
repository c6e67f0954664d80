//! Application state for the Absence Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::service::AbsenceService;
use crate::store::AbsenceStore;

/// Shared application state.
///
/// Holds the absence service, which in turn owns the record store and the
/// loaded statutory configuration.
#[derive(Clone)]
pub struct AppState {
    service: AbsenceService,
}

impl AppState {
    /// Creates application state over a record store and configuration.
    pub fn new(store: Arc<dyn AbsenceStore>, config: ConfigLoader) -> Self {
        Self {
            service: AbsenceService::new(store, Arc::new(config)),
        }
    }

    /// Creates application state from an existing service.
    pub fn from_service(service: AbsenceService) -> Self {
        Self { service }
    }

    /// Returns the absence service.
    pub fn service(&self) -> &AbsenceService {
        &self.service
    }
}
