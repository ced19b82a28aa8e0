//! Shared application state for all routes.

use crate::store::AppointmentStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL in production, in-memory in tests.
    pub store: Arc<dyn AppointmentStore>,
}

impl AppState {
    pub fn new<S>(store: S) -> Self
    where
        S: AppointmentStore + 'static,
    {
        AppState {
            store: Arc::new(store),
        }
    }
}
