mod cli;
mod infra;
mod routes;
mod server;

use fitness_scoreboard::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
