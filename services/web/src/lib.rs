mod cli;
mod infra;
mod listing;
mod routes;
mod server;

use senate_directory::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
