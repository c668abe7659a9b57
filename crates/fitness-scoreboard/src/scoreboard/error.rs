use super::domain::ActivityId;
use crate::source::SourceError;
use std::time::Duration;

/// Terminal failure of a scoreboard run. No partial scoreboard accompanies it.
#[derive(Debug, thiserror::Error)]
pub enum ScoreboardError {
    #[error("activity listing failed: {0}")]
    UpstreamItem(#[source] SourceError),
    #[error("failed to fetch activity {id}: {source}")]
    DetailFetch {
        id: ActivityId,
        #[source]
        source: SourceError,
    },
    #[error("scoreboard deadline of {}s exceeded", .0.as_secs_f64())]
    DeadlineExceeded(Duration),
    #[error("scoreboard computation cancelled")]
    Cancelled,
    #[error("scoreboard worker failed: {0}")]
    Worker(String),
    #[error("scoreboard pipeline has already run")]
    AlreadyRan,
}

impl ScoreboardError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ScoreboardError::DeadlineExceeded(_))
    }
}
