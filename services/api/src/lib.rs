mod cli;
mod infra;
mod routes;
mod score;
mod server;

use hiring_ai::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
