use crate::server;
use clap::{ArgGroup, Args, Parser, Subcommand};
use fitness_scoreboard::config::{AppConfig, ChallengeConfig};
use fitness_scoreboard::error::AppError;
use fitness_scoreboard::scoreboard::{Scoreboard, ScoreboardPipeline};
use fitness_scoreboard::source::{ActivitySource, InMemoryActivitySource};
use fitness_scoreboard::strava::{
    refresh_access_token, StravaClient, StravaCredentials, DEFAULT_TOKEN_URL,
};
use fitness_scoreboard::telemetry;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "fitness",
    about = "Serve or compute the weekly fitness challenge scoreboard",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Compute the scoreboard once and print it as JSON
    Scoreboard(ScoreboardArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["credentials", "activities"])
))]
pub(crate) struct ScoreboardArgs {
    /// Challenge rules JSON (defaults to FITNESS_CONFIG or the built-in challenge)
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    /// Strava credentials JSON with client_id, client_secret and refresh_token
    #[arg(long)]
    pub(crate) credentials: Option<PathBuf>,
    /// Offline JSON array of activities to score instead of querying Strava
    #[arg(long)]
    pub(crate) activities: Option<PathBuf>,
    /// Print the scoreboard on a single line
    #[arg(long)]
    pub(crate) compact: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Scoreboard(args) => run_scoreboard(args).await,
    }
}

async fn run_scoreboard(args: ScoreboardArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let challenge = match &args.config {
        Some(path) => ChallengeConfig::from_path(path)?,
        None => config.challenge()?,
    };
    let source = open_source(&args, &config).await?;

    let board = ScoreboardPipeline::new(challenge, source)
        .with_settings(config.pipeline.clone())
        .run()
        .await?
        .sorted();
    info!(weeks = board.weeks.len(), score = board.total_score(), "scoreboard computed");

    println!("{}", render(&board, args.compact)?);
    Ok(())
}

async fn open_source(
    args: &ScoreboardArgs,
    config: &AppConfig,
) -> Result<Arc<dyn ActivitySource>, AppError> {
    if let Some(path) = &args.activities {
        return Ok(Arc::new(load_activities(path).await?));
    }

    let path = args.credentials.as_deref().ok_or(AppError::Unauthorized)?;
    let raw = tokio::fs::read_to_string(path).await?;
    let credentials = StravaCredentials::from_json(&raw)?;

    let http = reqwest::Client::new();
    let token = refresh_access_token(&http, DEFAULT_TOKEN_URL, &credentials).await?;
    Ok(Arc::new(StravaClient::with_http(
        http,
        config.strava.api_url.clone(),
        token.access_token,
    )))
}

async fn load_activities(path: &Path) -> Result<InMemoryActivitySource, AppError> {
    let raw = tokio::fs::read_to_string(path).await?;
    let source = InMemoryActivitySource::from_json(&raw)?;
    info!(path = %path.display(), "loaded offline activities");
    Ok(source)
}

fn render(board: &Scoreboard, compact: bool) -> Result<String, AppError> {
    let rendered = if compact {
        serde_json::to_string(board)?
    } else {
        serde_json::to_string_pretty(board)?
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use fitness_scoreboard::scoreboard::{ActivityId, ScoredActivity, WeekSummary};

    fn sample_board() -> Scoreboard {
        Scoreboard {
            weeks: vec![WeekSummary {
                week: 1,
                score: 135,
                calories: 500,
                activities: vec![ScoredActivity {
                    id: ActivityId(1),
                    activity_type: "Run".to_string(),
                    name: "Tempo run".to_string(),
                    week: 1,
                    score: 135,
                    calories: 500,
                }],
            }],
        }
    }

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["fitness"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn serve_accepts_host_and_port_overrides() {
        let cli = Cli::try_parse_from(["fitness", "serve", "--host", "0.0.0.0", "--port", "8080"])
            .expect("parses");
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.host.as_deref(), Some("0.0.0.0"));
                assert_eq!(args.port, Some(8080));
            }
            other => panic!("expected serve, got {other:?}"),
        }
    }

    #[test]
    fn scoreboard_requires_an_input() {
        let err = Cli::try_parse_from(["fitness", "scoreboard"]).expect_err("input required");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn scoreboard_inputs_are_exclusive() {
        let err = Cli::try_parse_from([
            "fitness",
            "scoreboard",
            "--credentials",
            "creds.json",
            "--activities",
            "activities.json",
        ])
        .expect_err("inputs conflict");
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn scoreboard_parses_offline_run() {
        let cli = Cli::try_parse_from([
            "fitness",
            "scoreboard",
            "--config",
            "challenge.json",
            "--activities",
            "activities.json",
            "--compact",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Scoreboard(args)) => {
                assert_eq!(args.config, Some(PathBuf::from("challenge.json")));
                assert_eq!(args.activities, Some(PathBuf::from("activities.json")));
                assert!(args.credentials.is_none());
                assert!(args.compact);
            }
            other => panic!("expected scoreboard, got {other:?}"),
        }
    }

    #[test]
    fn renders_indented_or_compact_json() {
        let board = sample_board();

        let compact = render(&board, true).expect("renders");
        assert!(!compact.contains('\n'));
        assert!(compact.starts_with("[{"));

        let pretty = render(&board, false).expect("renders");
        assert!(pretty.contains("\n  {"));
        let parsed: Scoreboard = serde_json::from_str(&pretty).expect("parses back");
        assert_eq!(parsed, board);
    }
}
