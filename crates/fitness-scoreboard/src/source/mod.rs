//! Capability contract for the remote activity service.

mod memory;

pub use memory::InMemoryActivitySource;

use crate::scoreboard::{ActivityId, RawActivity};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use futures::stream::BoxStream;

/// Listing filter: activities started after `after` and before `before`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub after: DateTime<Utc>,
    pub before: DateTime<Utc>,
}

impl DateRange {
    /// Spans `start..end` widened by one day on each side for timezone skew.
    pub fn with_slack(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            after: start - Duration::days(1),
            before: end + Duration::days(1),
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.after < at && at < self.before
    }
}

/// Remote activity service as seen by the scoreboard pipeline.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Lazily lists summaries in `range`, at most `limit` of them. The stream
    /// ends after the first error element.
    fn activities(
        &self,
        range: DateRange,
        limit: usize,
    ) -> BoxStream<'_, Result<RawActivity, SourceError>>;

    /// Fetches the full detail record for one activity.
    async fn activity(&self, id: ActivityId) -> Result<RawActivity, SourceError>;
}

/// Failure reported by an [`ActivitySource`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("activity source transport failed: {0}")]
    Transport(String),
    #[error("activity source returned status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("activity source rate limit exceeded")]
    RateLimited,
    #[error("activity source payload could not be decoded: {0}")]
    Decode(String),
}
