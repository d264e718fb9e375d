//! FastTrack JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{OpenApi, swagger_ui::SwaggerUi},
    prelude::*,
    serve_static::StaticDir,
    trailing_slash::remove_slash,
};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use fasttrack_app::context::AppContext;

use crate::{config::ServerConfig, state::State};

mod config;
mod extensions;
mod healthcheck;
mod packages;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// FastTrack JSON API Server entry point
///
/// # Panics
///
/// Panics if the server fails to bind or serve requests
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.log_level)),
        )
        .init();

    if config.database.has_server_options() {
        debug!("DB_HOST/DB_USER/DB_PASSWORD/DB_NAME are ignored by the sqlite backend");
    }

    if config.security.jwt_secret.is_some() {
        debug!("JWT secret configured; no route enforces authentication yet");
    }

    let addr = config.socket_addr();
    let database_path = config.database.path();

    info!("Starting server on {addr} (database: {database_path})");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    // Schema bootstrap or connection failure aborts startup.
    let app = match AppContext::from_database_path(database_path).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(router::app_router());

    let doc = OpenApi::new("FastTrack API", "0.1.0").merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"))
        .push(
            Router::with_path("{**path}")
                .get(StaticDir::new(["public"]).defaults("index.html")),
        );

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;
}
