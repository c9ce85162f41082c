use crate::{
    error::{ApiError, LoadState, Result},
    models::{Meal, SearchFilters},
    services::filter_engine::FilterEngine,
};
use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex,
};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Runs searches for one caller so that only the newest one is surfaced.
///
/// Submitting a search cancels the one still in flight. The cancelled
/// submission returns [`ApiError::Superseded`] and never publishes its
/// outcome.
pub struct SearchCoordinator {
    engine: FilterEngine,
    generation: AtomicU64,
    inflight: Mutex<CancellationToken>,
    state: watch::Sender<LoadState<Vec<Meal>>>,
}

impl SearchCoordinator {
    pub fn new(engine: FilterEngine) -> Self {
        let (state, _) = watch::channel(LoadState::Success(Vec::new()));
        Self {
            engine,
            generation: AtomicU64::new(0),
            inflight: Mutex::new(CancellationToken::new()),
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadState<Vec<Meal>>> {
        self.state.subscribe()
    }

    pub fn current(&self) -> LoadState<Vec<Meal>> {
        self.state.borrow().clone()
    }

    pub async fn submit(&self, query: &str, filters: &SearchFilters) -> Result<Vec<Meal>> {
        let (generation, token) = self.begin();

        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!("Search #{} for '{}' superseded", generation, query);
                return Err(ApiError::Superseded);
            }
            outcome = self.engine.search(query, filters) => outcome,
        };

        if !self.publish(generation, &outcome) {
            return Err(ApiError::Superseded);
        }
        outcome
    }

    fn begin(&self) -> (u64, CancellationToken) {
        let token = CancellationToken::new();
        let mut inflight = self
            .inflight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        inflight.cancel();
        *inflight = token.clone();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        // Under the lock, so an older submission cannot overwrite a newer outcome
        self.state.send_replace(LoadState::Loading);
        (generation, token)
    }

    /// Publish the outcome if `generation` is still the newest submission
    fn publish(&self, generation: u64, outcome: &Result<Vec<Meal>>) -> bool {
        // Hold the lock so a concurrent `begin` cannot slip in between check and send
        let _inflight = self
            .inflight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        let state = match outcome {
            Ok(meals) => LoadState::Success(meals.clone()),
            Err(e) => LoadState::Error(e.to_string()),
        };
        self.state.send_replace(state);
        true
    }
}

type SessionMap = Arc<Mutex<HashMap<String, Arc<SearchCoordinator>>>>;

/// Coordinators keyed by an opaque client session id.
///
/// A session only lives while a search for it is in flight, so the map is
/// bounded by the number of concurrent requests rather than by the number of
/// ids clients have ever sent.
#[derive(Clone)]
pub struct SearchSessions {
    engine: FilterEngine,
    sessions: SessionMap,
}

/// Evicts a session's coordinator once the last in-flight search releases it
struct SessionLease {
    sessions: SessionMap,
    session_id: String,
}

impl Drop for SessionLease {
    fn drop(&mut self) {
        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let idle = sessions
            .get(&self.session_id)
            .is_some_and(|coordinator| Arc::strong_count(coordinator) == 1);
        if idle {
            sessions.remove(&self.session_id);
            debug!("Session '{}' idle, evicted", self.session_id);
        }
    }
}

impl SearchSessions {
    pub fn new(engine: FilterEngine) -> Self {
        Self {
            engine,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn engine(&self) -> &FilterEngine {
        &self.engine
    }

    pub fn coordinator(&self, session_id: &str) -> Arc<SearchCoordinator> {
        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(SearchCoordinator::new(self.engine.clone())))
            .clone()
    }

    /// Number of sessions with a search in flight or a handle held elsewhere
    pub fn active_sessions(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Run a search, with latest-wins semantics when a session id is given
    pub async fn search(
        &self,
        session_id: Option<&str>,
        query: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<Meal>> {
        match session_id {
            Some(id) => {
                // Declared first so it drops after the coordinator handle
                let _lease = SessionLease {
                    sessions: self.sessions.clone(),
                    session_id: id.to_string(),
                };
                let coordinator = self.coordinator(id);
                coordinator.submit(query, filters).await
            }
            None => self.engine.search(query, filters).await,
        }
    }
}
