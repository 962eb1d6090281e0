use std::{
    num::NonZeroU32,
    sync::{Arc, Weak},
};

use shared::domain::{AnalysisRequest, AnalysisResponse, CommentSentiment, SentimentLabel};
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{
    error::FetchError,
    pagination::PaginationState,
    service::AnalysisService,
    tally::SentimentTally,
};

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Everything the view reads, replaced as a single value on each successful
/// fetch so items, labels and totals always come from the same response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisSnapshot {
    pub url: Option<String>,
    pub video_id: Option<String>,
    pub items: Vec<CommentSentiment>,
    pub labels: Vec<SentimentLabel>,
    pub pagination: PaginationState,
}

impl AnalysisSnapshot {
    fn empty(limit: NonZeroU32) -> Self {
        Self {
            url: None,
            video_id: None,
            items: Vec::new(),
            labels: Vec::new(),
            pagination: PaginationState::new(limit),
        }
    }

    pub fn tally(&self) -> SentimentTally {
        SentimentTally::from_labels(&self.labels)
    }

    pub fn total_pages(&self) -> u32 {
        self.pagination.total_pages()
    }

    pub fn has_result(&self) -> bool {
        self.url.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTag {
    pub seq: u64,
    pub url: String,
    pub page: u32,
}

impl RequestTag {
    fn request(&self, limit: NonZeroU32) -> AnalysisRequest {
        AnalysisRequest {
            url: self.url.clone(),
            page: self.page,
            limit: limit.get(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyUrl,
    Busy,
    NothingLoaded,
    AtBoundary,
    Disposed,
}

#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Applied(Arc<AnalysisSnapshot>),
    Failed(FetchError),
    Discarded(RequestTag),
    Skipped(SkipReason),
}

#[derive(Debug, Clone)]
pub enum CoordinatorEvent {
    LoadingChanged(bool),
    SnapshotUpdated(Arc<AnalysisSnapshot>),
    FetchFailed(FetchError),
    ResponseDiscarded { page: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Next,
    Previous,
}

enum Settle {
    Done(FetchOutcome),
    // The requested page lies past the reported total; fetch this tag instead.
    Refetch(RequestTag),
}

enum Trigger {
    Submit(String),
    Navigate(Direction),
    Page { url: String, page: i64 },
}

pub struct AnalysisCoordinator {
    service: Arc<dyn AnalysisService>,
    limit: NonZeroU32,
    inner: Mutex<CoordinatorState>,
    events: broadcast::Sender<CoordinatorEvent>,
}

struct CoordinatorState {
    snapshot: Arc<AnalysisSnapshot>,
    next_seq: u64,
    // Set while the most recently issued request is outstanding.
    latest: Option<RequestTag>,
    last_error: Option<FetchError>,
    disposed: bool,
}

impl AnalysisCoordinator {
    pub fn new(service: Arc<dyn AnalysisService>, limit: NonZeroU32) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            service,
            limit,
            inner: Mutex::new(CoordinatorState {
                snapshot: Arc::new(AnalysisSnapshot::empty(limit)),
                next_seq: 0,
                latest: None,
                last_error: None,
                disposed: false,
            }),
            events,
        })
    }

    pub fn limit(&self) -> NonZeroU32 {
        self.limit
    }

    pub async fn snapshot(&self) -> Arc<AnalysisSnapshot> {
        Arc::clone(&self.inner.lock().await.snapshot)
    }

    pub async fn phase(&self) -> Phase {
        if self.inner.lock().await.latest.is_some() {
            Phase::Loading
        } else {
            Phase::Idle
        }
    }

    pub async fn is_loading(&self) -> bool {
        self.phase().await == Phase::Loading
    }

    pub async fn last_error(&self) -> Option<FetchError> {
        self.inner.lock().await.last_error.clone()
    }

    pub async fn pending_request(&self) -> Option<AnalysisRequest> {
        let guard = self.inner.lock().await;
        guard.latest.as_ref().map(|tag| tag.request(self.limit))
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<CoordinatorEvent> {
        self.events.subscribe()
    }

    pub async fn submit(&self, url: &str) -> FetchOutcome {
        self.run(Trigger::Submit(url.to_string())).await
    }

    pub async fn next(&self) -> FetchOutcome {
        self.run(Trigger::Navigate(Direction::Next)).await
    }

    pub async fn previous(&self) -> FetchOutcome {
        self.run(Trigger::Navigate(Direction::Previous)).await
    }

    /// Programmatic page fetch. Unlike the user triggers it does not wait for
    /// an outstanding request; the older response is discarded on arrival.
    pub async fn request_page(&self, url: &str, page: i64) -> FetchOutcome {
        self.run(Trigger::Page {
            url: url.to_string(),
            page,
        })
        .await
    }

    pub fn spawn_submit(self: &Arc<Self>, url: impl Into<String>) -> JoinHandle<FetchOutcome> {
        self.spawn_trigger(Trigger::Submit(url.into()))
    }

    pub fn spawn_next(self: &Arc<Self>) -> JoinHandle<FetchOutcome> {
        self.spawn_trigger(Trigger::Navigate(Direction::Next))
    }

    pub fn spawn_previous(self: &Arc<Self>) -> JoinHandle<FetchOutcome> {
        self.spawn_trigger(Trigger::Navigate(Direction::Previous))
    }

    pub async fn dispose(&self) {
        let mut guard = self.inner.lock().await;
        guard.disposed = true;
        if guard.latest.take().is_some() {
            self.emit(CoordinatorEvent::LoadingChanged(false));
        }
        drop(guard);
        info!("analysis: coordinator disposed");
    }

    async fn run(&self, trigger: Trigger) -> FetchOutcome {
        let mut tag = match self.begin(trigger).await {
            Ok(tag) => tag,
            Err(reason) => return FetchOutcome::Skipped(reason),
        };
        loop {
            let result = self.service.analyze(&tag.request(self.limit)).await;
            match self.finish(tag, result).await {
                Settle::Done(outcome) => return outcome,
                Settle::Refetch(retry) => tag = retry,
            }
        }
    }

    fn spawn_trigger(self: &Arc<Self>, trigger: Trigger) -> JoinHandle<FetchOutcome> {
        let weak = Arc::downgrade(self);
        let service = Arc::clone(&self.service);
        let limit = self.limit;
        tokio::spawn(async move {
            let mut tag = {
                let Some(coordinator) = weak.upgrade() else {
                    return FetchOutcome::Skipped(SkipReason::Disposed);
                };
                let begun = coordinator.begin(trigger).await;
                match begun {
                    Ok(tag) => tag,
                    Err(reason) => return FetchOutcome::Skipped(reason),
                }
            };
            loop {
                // Only the weak handle survives the network await.
                let result = service.analyze(&tag.request(limit)).await;
                match settle_detached(&weak, tag, result).await {
                    Settle::Done(outcome) => return outcome,
                    Settle::Refetch(retry) => tag = retry,
                }
            }
        })
    }

    async fn begin(&self, trigger: Trigger) -> Result<RequestTag, SkipReason> {
        let mut guard = self.inner.lock().await;
        if guard.disposed {
            return Err(SkipReason::Disposed);
        }

        let (url, page) = match trigger {
            Trigger::Submit(url) => {
                if url.is_empty() {
                    debug!("analysis: ignoring submit with empty url");
                    return Err(SkipReason::EmptyUrl);
                }
                if guard.latest.is_some() {
                    return Err(SkipReason::Busy);
                }
                (url, 1)
            }
            Trigger::Navigate(direction) => {
                if guard.latest.is_some() {
                    return Err(SkipReason::Busy);
                }
                let snapshot = &guard.snapshot;
                let Some(url) = snapshot.url.clone() else {
                    return Err(SkipReason::NothingLoaded);
                };
                let target = match direction {
                    Direction::Next => snapshot.pagination.next_page(),
                    Direction::Previous => snapshot.pagination.previous_page(),
                };
                let Some(page) = target else {
                    debug!(
                        page = snapshot.pagination.page(),
                        ?direction,
                        "analysis: navigation at boundary"
                    );
                    return Err(SkipReason::AtBoundary);
                };
                (url, page)
            }
            Trigger::Page { url, page } => {
                if url.is_empty() {
                    return Err(SkipReason::EmptyUrl);
                }
                // Totals are only known for the url currently displayed.
                let page = if guard.snapshot.url.as_deref() == Some(url.as_str()) {
                    guard.snapshot.pagination.clamp_page(page)
                } else {
                    1
                };
                (url, page)
            }
        };

        let tag = RequestTag {
            seq: guard.next_seq,
            url,
            page,
        };
        guard.next_seq += 1;
        let superseded = guard.latest.replace(tag.clone());
        if superseded.is_none() {
            self.emit(CoordinatorEvent::LoadingChanged(true));
        }
        drop(guard);

        info!(
            seq = tag.seq,
            page = tag.page,
            limit = self.limit.get(),
            "analysis: request issued"
        );
        if let Some(previous) = superseded {
            debug!(
                seq = previous.seq,
                page = previous.page,
                "analysis: outstanding request superseded"
            );
        }
        Ok(tag)
    }

    async fn finish(
        &self,
        tag: RequestTag,
        result: Result<AnalysisResponse, FetchError>,
    ) -> Settle {
        let mut guard = self.inner.lock().await;
        if guard.disposed {
            debug!(seq = tag.seq, "analysis: response after disposal dropped");
            return Settle::Done(FetchOutcome::Discarded(tag));
        }
        if guard.latest.as_ref() != Some(&tag) {
            self.emit(CoordinatorEvent::ResponseDiscarded { page: tag.page });
            drop(guard);
            warn!(
                seq = tag.seq,
                page = tag.page,
                "analysis: discarding response for superseded request"
            );
            return Settle::Done(FetchOutcome::Discarded(tag));
        }

        match result {
            Ok(response) => {
                let pagination = guard
                    .snapshot
                    .pagination
                    .settled(tag.page, response.total_count);
                if pagination.page() < tag.page {
                    // Items belong to tag.page; never pair them with the clamped page.
                    let retry = RequestTag {
                        seq: guard.next_seq,
                        url: tag.url.clone(),
                        page: pagination.page(),
                    };
                    guard.next_seq += 1;
                    guard.latest = Some(retry.clone());
                    drop(guard);

                    info!(
                        seq = retry.seq,
                        requested = tag.page,
                        page = retry.page,
                        total_count = response.total_count,
                        "analysis: requested page past the end, fetching last page"
                    );
                    return Settle::Refetch(retry);
                }

                let snapshot = Arc::new(AnalysisSnapshot {
                    url: Some(tag.url),
                    video_id: response.video_id,
                    items: response.items,
                    labels: response.all_labels,
                    pagination,
                });
                guard.latest = None;
                guard.snapshot = Arc::clone(&snapshot);
                guard.last_error = None;
                self.emit(CoordinatorEvent::SnapshotUpdated(Arc::clone(&snapshot)));
                self.emit(CoordinatorEvent::LoadingChanged(false));
                drop(guard);

                info!(
                    seq = tag.seq,
                    page = pagination.page(),
                    total_count = pagination.total_count(),
                    total_pages = pagination.total_pages(),
                    "analysis: page applied"
                );
                Settle::Done(FetchOutcome::Applied(snapshot))
            }
            Err(err) => {
                guard.latest = None;
                guard.last_error = Some(err.clone());
                self.emit(CoordinatorEvent::FetchFailed(err.clone()));
                self.emit(CoordinatorEvent::LoadingChanged(false));
                drop(guard);

                warn!(seq = tag.seq, page = tag.page, error = %err, "analysis: fetch failed");
                Settle::Done(FetchOutcome::Failed(err))
            }
        }
    }

    // Called with `inner` held so subscribers see events in state order.
    fn emit(&self, event: CoordinatorEvent) {
        let _ = self.events.send(event);
    }
}

async fn settle_detached(
    coordinator: &Weak<AnalysisCoordinator>,
    tag: RequestTag,
    result: Result<AnalysisResponse, FetchError>,
) -> Settle {
    match coordinator.upgrade() {
        Some(coordinator) => coordinator.finish(tag, result).await,
        None => {
            debug!(seq = tag.seq, "analysis: coordinator dropped before response");
            Settle::Done(FetchOutcome::Discarded(tag))
        }
    }
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;
