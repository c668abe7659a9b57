//! Weekly scoreboard computation: scoring rules, aggregation, and the
//! concurrent fetch-classify-aggregate pipeline.

mod aggregate;
pub mod domain;
mod error;
mod pipeline;
mod policy;
mod pool;
mod producer;

#[cfg(test)]
mod tests;

pub use aggregate::aggregate;
pub use domain::{ActivityId, RawActivity, ScoredActivity, Scoreboard, WeekSummary};
pub use error::ScoreboardError;
pub use pipeline::{compute_scoreboard, PipelineSettings, PipelineState, ScoreboardPipeline};
pub use policy::ScoringPolicy;
