use std::sync::Arc;

use shared::{domain::SearchResult, error::SearchError};
use tokio::{sync::broadcast, task::JoinHandle};
use tracing::debug;

use crate::{backend::SearchBackend, controller::FetchRequest};

#[derive(Debug, Clone)]
pub enum SearchEvent {
    Completed {
        generation: u64,
        outcome: Result<Vec<SearchResult>, SearchError>,
    },
}

/// Runs fetch requests on the current tokio runtime, one at a time.
///
/// Dispatching a request aborts the task of the previous one, so a
/// superseded request normally never reports. A request that finished
/// just before being aborted may still report; the generation carried by
/// [`SearchEvent::Completed`] lets the controller discard it.
pub struct SearchDispatcher {
    backend: Arc<dyn SearchBackend>,
    inflight: Option<(u64, JoinHandle<()>)>,
    events: broadcast::Sender<SearchEvent>,
}

impl SearchDispatcher {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            backend,
            inflight: None,
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SearchEvent> {
        self.events.subscribe()
    }

    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, request: FetchRequest) {
        self.cancel();

        let backend = Arc::clone(&self.backend);
        let events = self.events.clone();
        let generation = request.generation;
        let handle = tokio::spawn(async move {
            let outcome = backend.search(&request.query, request.mode).await;
            let _ = events.send(SearchEvent::Completed {
                generation: request.generation,
                outcome,
            });
        });
        self.inflight = Some((generation, handle));
    }

    pub fn cancel(&mut self) {
        if let Some((generation, handle)) = self.inflight.take() {
            if !handle.is_finished() {
                debug!(generation, "aborting superseded search");
                handle.abort();
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.inflight
            .as_ref()
            .is_some_and(|(_, handle)| !handle.is_finished())
    }
}

impl Drop for SearchDispatcher {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
#[path = "tests/dispatcher_tests.rs"]
mod tests;
