use super::domain::{RawActivity, ScoredActivity};
use super::error::ScoreboardError;
use super::policy::ScoringPolicy;
use crate::source::ActivitySource;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Multi-consumer end of the summary queue. Each clone competes for items, and
/// every summary goes to exactly one worker.
#[derive(Debug, Clone)]
pub(crate) struct SummaryQueue {
    receiver: async_channel::Receiver<RawActivity>,
}

impl SummaryQueue {
    pub(crate) fn new(receiver: async_channel::Receiver<RawActivity>) -> Self {
        Self { receiver }
    }

    /// Next summary, or `None` once the producer is done and the queue drained.
    pub(crate) async fn next(&self) -> Option<RawActivity> {
        self.receiver.recv().await.ok()
    }
}

pub(crate) struct DetailWorker<S: ?Sized> {
    pub(crate) index: usize,
    pub(crate) source: Arc<S>,
    pub(crate) policy: Arc<ScoringPolicy>,
    pub(crate) queue: SummaryQueue,
    pub(crate) results: mpsc::Sender<ScoredActivity>,
    pub(crate) cancel: CancellationToken,
}

impl<S> DetailWorker<S>
where
    S: ActivitySource + ?Sized,
{
    pub(crate) async fn run(self) -> Result<(), ScoreboardError> {
        let mut fetched = 0usize;

        loop {
            let next = tokio::select! {
                _ = self.cancel.cancelled() => return Ok(()),
                next = self.queue.next() => next,
            };
            let Some(summary) = next else {
                break;
            };

            // Activities outside every week never reach the scoreboard, so
            // skip the detail round-trip.
            let Some(week) = self.policy.classify_week(&summary) else {
                debug!(id = %summary.id, name = %summary.name, "outside challenge weeks");
                continue;
            };

            info!(worker = self.index, id = %summary.id, name = %summary.name, "query");
            let fetched_detail = tokio::select! {
                _ = self.cancel.cancelled() => return Ok(()),
                detail = self.source.activity(summary.id) => detail,
            };
            let detail = fetched_detail.map_err(|source| ScoreboardError::DetailFetch {
                id: summary.id,
                source,
            })?;

            let scored = self.policy.scored(&detail, week);
            tokio::select! {
                _ = self.cancel.cancelled() => return Ok(()),
                sent = self.results.send(scored) => {
                    if sent.is_err() {
                        return Ok(());
                    }
                }
            }
            fetched += 1;
        }

        debug!(worker = self.index, fetched, "worker drained");
        Ok(())
    }
}

pub(crate) async fn collect(mut results: mpsc::Receiver<ScoredActivity>) -> Vec<ScoredActivity> {
    let mut scored = Vec::new();
    while let Some(activity) = results.recv().await {
        scored.push(activity);
    }
    scored
}
