//! Debounced, last-submitted-wins query delivery.
//!
//! A single actor task owns the one pending-timer slot:
//!
//! - **Idle**: no timer armed.
//! - **Pending**: a timer is armed for the latest submission. A new
//!   submission cancels and replaces it.
//!
//! When the timer fires the search is spawned. Each submission bumps a
//! generation counter, and a finished search is delivered only if no newer
//! submission arrived meanwhile. Superseded searches are allowed to finish;
//! their results are dropped.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use carefind_core::{AppConfig, FacilityRecord, Suggestion};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::Instant;

use crate::error::SearchError;

/// One search submission: the text, the result budget, and the facility
/// snapshot current at submission time.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub limit: usize,
    pub facilities: Arc<[FacilityRecord]>,
}

impl SearchRequest {
    #[must_use]
    pub fn new(query: impl Into<String>, limit: usize, facilities: Arc<[FacilityRecord]>) -> Self {
        Self {
            query: query.into(),
            limit,
            facilities,
        }
    }

    /// A request using `config.suggestion_limit` as the budget.
    #[must_use]
    pub fn with_default_limit(
        query: impl Into<String>,
        config: &AppConfig,
        facilities: Arc<[FacilityRecord]>,
    ) -> Self {
        Self::new(query, config.suggestion_limit, facilities)
    }
}

/// Anything the scheduler can run a request against.
pub trait SuggestionSource: Send + Sync + 'static {
    fn suggest(
        &self,
        request: &SearchRequest,
    ) -> impl Future<Output = Result<Vec<Suggestion>, SearchError>> + Send;
}

/// A search result that survived debouncing and staleness checks.
#[derive(Debug)]
pub struct Delivery {
    pub generation: u64,
    pub query: String,
    pub result: Result<Vec<Suggestion>, SearchError>,
}

/// Handle to a running debounce actor. Dropping it stops the actor.
#[derive(Debug, Clone)]
pub struct QueryScheduler {
    commands: mpsc::UnboundedSender<SearchRequest>,
}

impl QueryScheduler {
    /// Spawn the actor on the current tokio runtime.
    ///
    /// Returns the submission handle and the receiver of delivered results.
    #[must_use]
    pub fn spawn<S: SuggestionSource>(
        source: Arc<S>,
        delay: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<Delivery>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (delivery_tx, delivery_rx) = mpsc::unbounded_channel();

        let actor = Actor {
            source,
            delay,
            commands: command_rx,
            deliveries: delivery_tx,
            generation: 0,
        };
        tokio::spawn(actor.run());

        (
            Self {
                commands: command_tx,
            },
            delivery_rx,
        )
    }

    /// [`QueryScheduler::spawn`] with `config.debounce_ms` as the delay.
    #[must_use]
    pub fn from_config<S: SuggestionSource>(
        source: Arc<S>,
        config: &AppConfig,
    ) -> (Self, mpsc::UnboundedReceiver<Delivery>) {
        Self::spawn(source, Duration::from_millis(config.debounce_ms))
    }

    /// Submit a query, replacing any pending one.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::SchedulerClosed`] if the actor has stopped.
    pub fn submit(&self, request: SearchRequest) -> Result<(), SearchError> {
        self.commands
            .send(request)
            .map_err(|_| SearchError::SchedulerClosed)
    }
}

struct Pending {
    generation: u64,
    deadline: Instant,
    request: SearchRequest,
}

type Finished = (u64, String, Result<Vec<Suggestion>, SearchError>);

struct Actor<S> {
    source: Arc<S>,
    delay: Duration,
    commands: mpsc::UnboundedReceiver<SearchRequest>,
    deliveries: mpsc::UnboundedSender<Delivery>,
    generation: u64,
}

impl<S: SuggestionSource> Actor<S> {
    async fn run(mut self) {
        // `None` is Idle, `Some` is Pending.
        let mut pending: Option<Pending> = None;
        let mut in_flight: JoinSet<Finished> = JoinSet::new();

        loop {
            let deadline = pending.as_ref().map(|p| p.deadline);

            tokio::select! {
                command = self.commands.recv() => {
                    let Some(request) = command else { break };
                    self.generation += 1;
                    if let Some(replaced) = pending.as_ref() {
                        tracing::trace!(
                            replaced = %replaced.request.query,
                            query = %request.query,
                            "re-arming debounce timer"
                        );
                    }
                    pending = Some(Pending {
                        generation: self.generation,
                        deadline: Instant::now() + self.delay,
                        request,
                    });
                }
                () = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(Pending { generation, request, .. }) = pending.take() {
                        tracing::debug!(generation, query = %request.query, "debounce elapsed; searching");
                        let source = Arc::clone(&self.source);
                        in_flight.spawn(async move {
                            let result = source.suggest(&request).await;
                            (generation, request.query, result)
                        });
                    }
                }
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    match joined {
                        Ok((generation, query, result)) if generation == self.generation => {
                            let delivery = Delivery { generation, query, result };
                            if self.deliveries.send(delivery).is_err() {
                                break;
                            }
                        }
                        Ok((generation, query, _)) => {
                            tracing::debug!(
                                generation,
                                latest = self.generation,
                                query,
                                "discarding superseded search result"
                            );
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "search task failed");
                        }
                    }
                }
            }
        }

        tracing::debug!("query scheduler stopped");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use carefind_core::{Coordinates, PlaceRecord};

    use super::*;

    const DEBOUNCE: Duration = Duration::from_millis(300);

    /// Records every query it runs; queries starting with `slow` take 10 s.
    #[derive(Default)]
    struct RecordingSource {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingSource {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("lock").clone()
        }
    }

    impl SuggestionSource for RecordingSource {
        fn suggest(
            &self,
            request: &SearchRequest,
        ) -> impl Future<Output = Result<Vec<Suggestion>, SearchError>> + Send {
            self.calls
                .lock()
                .expect("lock")
                .push(request.query.clone());
            let query = request.query.clone();
            async move {
                if query.starts_with("slow") {
                    tokio::time::sleep(Duration::from_secs(10)).await;
                }
                let place = PlaceRecord {
                    name: query,
                    region: "Region".to_string(),
                    country: "Country".to_string(),
                };
                Ok(vec![Suggestion::from_place(
                    &place,
                    carefind_core::Confidence::High,
                )])
            }
        }
    }

    fn request(query: &str) -> SearchRequest {
        SearchRequest::new(query, 5, Arc::from(Vec::new()))
    }

    async fn assert_silent(rx: &mut mpsc::UnboundedReceiver<Delivery>, for_secs: u64) {
        let next = tokio::time::timeout(Duration::from_secs(for_secs), rx.recv()).await;
        assert!(next.is_err(), "unexpected delivery: {next:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn burst_within_window_delivers_only_last_query() {
        let source = Arc::new(RecordingSource::default());
        let (scheduler, mut rx) = QueryScheduler::spawn(Arc::clone(&source), DEBOUNCE);

        for q in ["v", "va", "vap"] {
            scheduler.submit(request(q)).expect("actor running");
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        let delivery = rx.recv().await.expect("one delivery");
        assert_eq!(delivery.query, "vap");
        assert_eq!(delivery.generation, 3);
        let suggestions = delivery.result.expect("search ok");
        assert_eq!(suggestions[0].name, "vap");

        assert_silent(&mut rx, 5).await;
        assert_eq!(source.calls(), ["vap"]);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_in_flight_result_is_discarded() {
        let source = Arc::new(RecordingSource::default());
        let (scheduler, mut rx) = QueryScheduler::spawn(Arc::clone(&source), DEBOUNCE);

        scheduler.submit(request("slow query")).expect("actor running");
        // Past the debounce window: the slow search is now in flight.
        tokio::time::sleep(Duration::from_millis(400)).await;
        scheduler.submit(request("fast query")).expect("actor running");

        let delivery = rx.recv().await.expect("fresh delivery");
        assert_eq!(delivery.query, "fast query");

        // The slow search completes at ~10.3 s and must not be delivered.
        assert_silent(&mut rx, 20).await;
        assert_eq!(source.calls(), ["slow query", "fast query"]);
    }

    #[tokio::test(start_paused = true)]
    async fn spaced_submissions_each_deliver() {
        let source = Arc::new(RecordingSource::default());
        let (scheduler, mut rx) = QueryScheduler::spawn(Arc::clone(&source), DEBOUNCE);

        scheduler.submit(request("pune")).expect("actor running");
        assert_eq!(rx.recv().await.expect("first").query, "pune");

        scheduler.submit(request("delhi")).expect("actor running");
        let second = rx.recv().await.expect("second");
        assert_eq!(second.query, "delhi");
        assert_eq!(second.generation, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_runs_before_the_delay_elapses() {
        let source = Arc::new(RecordingSource::default());
        let (scheduler, mut rx) = QueryScheduler::spawn(Arc::clone(&source), DEBOUNCE);

        scheduler.submit(request("mumbai")).expect("actor running");
        let early = tokio::time::timeout(Duration::from_millis(250), rx.recv()).await;
        assert!(early.is_err());
        assert!(source.calls().is_empty());

        assert_eq!(rx.recv().await.expect("delivered").query, "mumbai");
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_stops_actor() {
        let source = Arc::new(RecordingSource::default());
        let (scheduler, mut rx) = QueryScheduler::spawn(source, DEBOUNCE);
        drop(scheduler);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn carries_facility_snapshot_to_source() {
        struct SnapshotSize;
        impl SuggestionSource for SnapshotSize {
            fn suggest(
                &self,
                request: &SearchRequest,
            ) -> impl Future<Output = Result<Vec<Suggestion>, SearchError>> + Send {
                let size = request.facilities.len();
                async move { Err(SearchError::InvalidInput(format!("size={size}"))) }
            }
        }

        let facility = FacilityRecord {
            id: "node/1".to_string(),
            name: "Care".to_string(),
            facility_type: "hospital".to_string(),
            specialties: String::new(),
            city: String::new(),
            coordinates: Coordinates::new(1.0, 1.0),
            rating: None,
            distance_meters: None,
            address: None,
            phone: None,
            website: None,
            emergency: false,
        };
        let (scheduler, mut rx) = QueryScheduler::spawn(Arc::new(SnapshotSize), DEBOUNCE);
        scheduler
            .submit(SearchRequest::new("care", 3, Arc::from(vec![facility])))
            .expect("actor running");

        let delivery = rx.recv().await.expect("delivered");
        assert!(
            matches!(delivery.result, Err(SearchError::InvalidInput(ref m)) if m == "size=1"),
            "errors are delivered as-is"
        );
    }
}
