pub mod config;
pub mod error;
pub mod scoreboard;
pub mod source;
pub mod strava;
pub mod telemetry;
