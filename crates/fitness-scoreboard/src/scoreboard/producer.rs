use super::domain::RawActivity;
use super::error::ScoreboardError;
use crate::source::{ActivitySource, DateRange};
use futures::StreamExt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Streams listing summaries into the worker queue. Dropping `queue` on
/// return is what tells the workers no more work is coming.
pub(crate) async fn produce<S>(
    source: Arc<S>,
    range: DateRange,
    limit: usize,
    queue: async_channel::Sender<RawActivity>,
    cancel: CancellationToken,
) -> Result<(), ScoreboardError>
where
    S: ActivitySource + ?Sized,
{
    let mut listing = source.activities(range, limit);
    let mut produced = 0usize;

    loop {
        let next = tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            next = listing.next() => next,
        };

        let summary = match next {
            Some(Ok(summary)) => summary,
            Some(Err(err)) => return Err(ScoreboardError::UpstreamItem(err)),
            None => {
                debug!(produced, "activity listing exhausted");
                return Ok(());
            }
        };

        tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            sent = queue.send(summary) => {
                if sent.is_err() {
                    return Ok(());
                }
            }
        }
        produced += 1;
    }
}
