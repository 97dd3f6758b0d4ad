use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, info};

use crate::libraries::proximity::ProximitySearch;
use crate::models::ProximityResult;
use crate::services::acquisition::{acquire_within, LocationSource};
use crate::services::catalog::Catalog;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("A search is already running. Please wait for it to finish.")]
    AlreadyRunning,
}

/// Runs the search flow for user sessions: acquire a location, rank, return.
///
/// At most one search per session id is in flight at a time.
pub struct SearchSession {
    catalog: Arc<Catalog>,
    search: ProximitySearch,
    location_timeout: Duration,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl SearchSession {
    pub fn new(catalog: Arc<Catalog>, search: ProximitySearch, location_timeout: Duration) -> Self {
        Self {
            catalog,
            search,
            location_timeout,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn is_running(&self, session_id: &str) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(session_id)
    }

    /// Search for the `k` points nearest to whatever `source` reports.
    ///
    /// Fails only when the same session already has a search outstanding.
    pub async fn search<S>(
        &self,
        session_id: &str,
        source: &S,
        k: usize,
    ) -> Result<ProximityResult, SearchError>
    where
        S: LocationSource + ?Sized,
    {
        let _guard = InFlight::begin(&self.in_flight, session_id)?;

        let acquired = acquire_within(source, self.location_timeout).await;
        let result = self.search.nearest_acquired(&acquired, &self.catalog, k);

        info!(
            "Search for {} returned {} points (fallback: {})",
            session_id,
            result.len(),
            result.used_fallback_reference
        );

        Ok(result)
    }
}

/// Marks a session busy until dropped
struct InFlight {
    sessions: Arc<Mutex<HashSet<String>>>,
    session_id: String,
}

impl InFlight {
    fn begin(sessions: &Arc<Mutex<HashSet<String>>>, session_id: &str) -> Result<Self, SearchError> {
        let inserted = sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(session_id.to_string());

        if !inserted {
            debug!("Ignoring search for {}: one is already running", session_id);
            return Err(SearchError::AlreadyRunning);
        }

        Ok(Self {
            sessions: Arc::clone(sessions),
            session_id: session_id.to_string(),
        })
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.session_id);
    }
}
