use super::aggregate::aggregate;
use super::domain::{ScoredActivity, Scoreboard};
use super::error::ScoreboardError;
use super::policy::ScoringPolicy;
use super::pool::{self, DetailWorker, SummaryQueue};
use super::producer;
use crate::config::ChallengeConfig;
use crate::source::{ActivitySource, DateRange};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Tuning knobs for one scoreboard run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Number of parallel detail fetchers.
    pub concurrency: usize,
    /// Budget for the whole run, listing included.
    pub deadline: Duration,
    /// Upper bound on summaries requested from the listing.
    pub page_limit: usize,
    /// Capacity of each inter-stage queue.
    pub queue_capacity: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            concurrency: 25,
            deadline: Duration::from_secs(120),
            page_limit: 100,
            queue_capacity: 100,
        }
    }
}

/// Lifecycle of a [`ScoreboardPipeline`]. Terminal states are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Running,
    Completed,
    Failed,
    Cancelled,
}

/// Single-use orchestrator wiring producer, detail workers, and collector
/// under one deadline with first-error-wins cancellation.
pub struct ScoreboardPipeline<S: ?Sized> {
    policy: Arc<ScoringPolicy>,
    source: Arc<S>,
    settings: PipelineSettings,
    parent: Option<CancellationToken>,
    state: PipelineState,
}

impl<S> ScoreboardPipeline<S>
where
    S: ActivitySource + ?Sized + 'static,
{
    pub fn new(config: ChallengeConfig, source: Arc<S>) -> Self {
        Self {
            policy: Arc::new(ScoringPolicy::new(config)),
            source,
            settings: PipelineSettings::default(),
            parent: None,
            state: PipelineState::Idle,
        }
    }

    pub fn with_settings(mut self, settings: PipelineSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Cancelling `token` aborts the run with [`ScoreboardError::Cancelled`].
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.parent = Some(token);
        self
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub async fn run(&mut self) -> Result<Scoreboard, ScoreboardError> {
        if self.state != PipelineState::Idle {
            return Err(ScoreboardError::AlreadyRan);
        }

        self.transition(PipelineState::Running);
        let result = self.execute().await;
        let terminal = match &result {
            Ok(_) => PipelineState::Completed,
            Err(ScoreboardError::DeadlineExceeded(_) | ScoreboardError::Cancelled) => {
                PipelineState::Cancelled
            }
            Err(_) => PipelineState::Failed,
        };
        self.transition(terminal);
        result
    }

    fn transition(&mut self, next: PipelineState) {
        debug!(from = ?self.state, to = ?next, "scoreboard pipeline transition");
        self.state = next;
    }

    async fn execute(&self) -> Result<Scoreboard, ScoreboardError> {
        let Some((start, end)) = self.policy.config().span() else {
            return Ok(Scoreboard::default());
        };
        let range = DateRange::with_slack(start, end);

        let cancel = match &self.parent {
            Some(parent) => parent.child_token(),
            None => CancellationToken::new(),
        };
        let _stop_on_exit = cancel.clone().drop_guard();

        let width = self.settings.concurrency.max(1);
        let capacity = self.settings.queue_capacity.max(1);
        let deadline = self.settings.deadline;
        info!(
            after = %range.after,
            before = %range.before,
            concurrency = width,
            deadline_secs = deadline.as_secs(),
            "computing scoreboard"
        );

        let (summary_tx, summary_rx) = async_channel::bounded(capacity);
        let (scored_tx, scored_rx) = mpsc::channel(capacity);
        let queue = SummaryQueue::new(summary_rx);

        let mut participants = JoinSet::new();
        participants.spawn(producer::produce(
            Arc::clone(&self.source),
            range,
            self.settings.page_limit,
            summary_tx,
            cancel.clone(),
        ));
        for index in 0..width {
            let worker = DetailWorker {
                index,
                source: Arc::clone(&self.source),
                policy: Arc::clone(&self.policy),
                queue: queue.clone(),
                results: scored_tx.clone(),
                cancel: cancel.clone(),
            };
            participants.spawn(worker.run());
        }
        drop(scored_tx);
        drop(queue);
        let collector = tokio::spawn(pool::collect(scored_rx));

        let run = async {
            while let Some(joined) = participants.join_next().await {
                let outcome = joined.map_err(|err| ScoreboardError::Worker(err.to_string()));
                if let Err(err) = outcome.and_then(|result| result) {
                    warn!(error = %err, "scoreboard run failed");
                    cancel.cancel();
                    return Err(err);
                }
            }
            collector
                .await
                .map_err(|err| ScoreboardError::Worker(err.to_string()))
        };

        let scored: Vec<ScoredActivity> = match tokio::time::timeout(deadline, run).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(deadline_secs = deadline.as_secs(), "scoreboard deadline exceeded");
                cancel.cancel();
                return Err(ScoreboardError::DeadlineExceeded(deadline));
            }
        };

        if cancel.is_cancelled() {
            return Err(ScoreboardError::Cancelled);
        }

        info!(activities = scored.len(), "scoreboard computed");
        Ok(aggregate(scored))
    }
}

/// Computes the scoreboard for `config` from `source` with default settings.
pub async fn compute_scoreboard<S>(
    config: ChallengeConfig,
    source: Arc<S>,
) -> Result<Scoreboard, ScoreboardError>
where
    S: ActivitySource + ?Sized + 'static,
{
    ScoreboardPipeline::new(config, source).run().await
}
