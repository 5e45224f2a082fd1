use std::{io, net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::Error;

use axum_server::Handle;

use clap::Parser as _;

use cardstore_server::{
    app::AppState,
    cli::{Args, run_command},
    config::Config,
    routes,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt::fmt()
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    // load config
    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from("./cardstore.toml"));
    let config = Config::load(config_path)?;

    // Execute command if it exists
    if let Some(command) = args.command {
        return run_command(&command, &config.server).await;
    }

    if !config.server.validation.is_strict() {
        tracing::warn!("lenient validation: cards may be stored with missing fields");
    }

    let state = AppState::new(config.server).await;
    let addr: SocketAddr = ([0, 0, 0, 0], state.port).into();

    let router = routes::router(state);

    let handle = Handle::new();
    tokio::spawn(shutdown_on_ctrl_c(handle.clone()));

    // Serve HTTP
    tracing::info!("listening on {} (http)", addr);

    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .map_err(From::from)
}

async fn shutdown_on_ctrl_c(handle: Handle) {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutting down");
        handle.graceful_shutdown(Some(Duration::from_secs(10)));
    }
}
