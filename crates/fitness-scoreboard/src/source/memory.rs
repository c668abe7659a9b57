use super::{ActivitySource, DateRange, SourceError};
use crate::scoreboard::{ActivityId, RawActivity};
use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Fixture-backed source for tests and offline scoreboard runs.
#[derive(Debug, Default, Clone)]
pub struct InMemoryActivitySource {
    activities: Vec<RawActivity>,
    details: HashMap<ActivityId, RawActivity>,
    failing_details: HashSet<ActivityId>,
    listing_failure_after: Option<usize>,
    hang_listing: bool,
    detail_delay: Option<Duration>,
    detail_requests: Arc<AtomicUsize>,
}

impl InMemoryActivitySource {
    /// Listing order follows `activities`; each entry doubles as its own detail.
    pub fn new(activities: Vec<RawActivity>) -> Self {
        Self {
            activities,
            ..Self::default()
        }
    }

    /// Parses a JSON array of activities.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let activities: Vec<RawActivity> = serde_json::from_str(raw)?;
        Ok(Self::new(activities))
    }

    /// Serves `detail` for its id instead of the listing entry.
    pub fn with_detail(mut self, detail: RawActivity) -> Self {
        self.details.insert(detail.id, detail);
        self
    }

    pub fn failing_detail(mut self, id: ActivityId) -> Self {
        self.failing_details.insert(id);
        self
    }

    /// Yields `count` summaries, then a transport error.
    pub fn failing_listing_after(mut self, count: usize) -> Self {
        self.listing_failure_after = Some(count);
        self
    }

    /// Listing never yields and never ends.
    pub fn hanging(mut self) -> Self {
        self.hang_listing = true;
        self
    }

    pub fn with_detail_delay(mut self, delay: Duration) -> Self {
        self.detail_delay = Some(delay);
        self
    }

    /// Number of detail fetches issued so far.
    pub fn detail_requests(&self) -> usize {
        self.detail_requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ActivitySource for InMemoryActivitySource {
    fn activities(
        &self,
        range: DateRange,
        limit: usize,
    ) -> BoxStream<'_, Result<RawActivity, SourceError>> {
        if self.hang_listing {
            return stream::pending().boxed();
        }

        let mut items: Vec<Result<RawActivity, SourceError>> = self
            .activities
            .iter()
            .filter(|activity| range.contains(activity.start_date))
            .take(limit)
            .cloned()
            .map(Ok)
            .collect();

        if let Some(count) = self.listing_failure_after {
            items.truncate(count);
            items.push(Err(SourceError::Transport(
                "listing interrupted".to_string(),
            )));
        }

        stream::iter(items).boxed()
    }

    async fn activity(&self, id: ActivityId) -> Result<RawActivity, SourceError> {
        self.detail_requests.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.detail_delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing_details.contains(&id) {
            return Err(SourceError::Status {
                status: 500,
                message: format!("activity {id} unavailable"),
            });
        }

        self.details
            .get(&id)
            .or_else(|| self.activities.iter().find(|activity| activity.id == id))
            .cloned()
            .ok_or_else(|| SourceError::Status {
                status: 404,
                message: format!("activity {id} not found"),
            })
    }
}
