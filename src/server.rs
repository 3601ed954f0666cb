use crate::{routes, state::App, utils::types::Port};
use log::{error, info};
use std::{
    io,
    net::{IpAddr, SocketAddr},
    sync::Arc,
};
use tokio::{net::TcpListener, signal};

/// Starts the HTTP server serving the leaderboard page, runs until
/// the server fails or a shutdown signal is received
///
/// `host` The address to bind to
/// `port` The port to bind to
/// `app`  The shared application state
pub async fn start_server(host: IpAddr, port: Port, app: Arc<App>) -> io::Result<()> {
    let addr = SocketAddr::new(host, port);
    let listener = match TcpListener::bind(addr).await {
        Ok(value) => value,
        Err(err) => {
            error!("Failed to bind HTTP server on {}: {:?}", addr, err);
            return Err(err);
        }
    };

    info!("Starting HTTP Server on {addr}");

    axum::serve(listener, routes::router(app))
        .with_graceful_shutdown(async {
            if let Err(err) = signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {err}");
            }
        })
        .await
}
