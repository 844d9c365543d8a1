use std::process::ExitCode;

use dotenvy::dotenv;
use ping_echo_api::{
    config::AppConfig,
    errors::server_error::ServerError,
    server::{bind, build_app, serve, shutdown_signal},
    telemetry,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", ServerError::from(err));
            return ExitCode::FAILURE;
        }
    };

    let _telemetry = match telemetry::init(&config) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Server stopped with an error.");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> Result<(), ServerError> {
    let listener = bind(config.listen_addr()).await?;
    info!(addr = %config.listen_addr(), "Starting server.");

    serve(listener, build_app(config), shutdown_signal()).await?;

    info!("Server stopped.");
    Ok(())
}
