mod config;
mod leaderboard;
mod logging;
mod render;
mod routes;
mod server;
mod state;
mod utils;

use crate::{
    config::{load_config, VERSION},
    leaderboard::{client::ScoresClient, Leaderboard},
    state::App,
};
use log::{error, info};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = load_config();

    if let Err(err) = logging::setup(&config) {
        eprintln!("Failed to setup logging: {err}");
    }

    info!("Starting Leaderboard View v{}", VERSION);

    let client = match ScoresClient::new(&config) {
        Ok(value) => value,
        Err(err) => {
            error!("{err}");
            return;
        }
    };
    info!("Using leaderboard {}", client.url());

    let leaderboard = Leaderboard::new(client);

    // One-shot rendering into a file rather than serving the page
    if let Some(output) = &config.output {
        match leaderboard.write_page(&config.title, output).await {
            Ok(rows) => info!("Rendered {rows} leaderboard rows to {}", output.display()),
            Err(err) => error!("Failed to write page to {}: {err}", output.display()),
        }
        return;
    }

    let app = Arc::new(App {
        leaderboard,
        title: config.title,
    });
    if let Err(err) = server::start_server(config.host, config.port, app).await {
        error!("HTTP server stopped: {err}");
    }
}
