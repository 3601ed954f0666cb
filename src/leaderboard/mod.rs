//! Module for fetching the leaderboard and rendering it into a
//! table body

use self::{client::ScoresClient, models::LeaderboardEntry};
use crate::render::{render_page, TableBody, TableRow};
use chrono::{DateTime, Utc};
use log::{debug, error};
use std::{io, path::Path};

pub mod client;
pub mod models;

/// Rows rendered by a single page load
pub struct LoadedTable {
    pub body: TableBody,
    /// When the rows were fetched, [None] if the fetch failed
    pub updated: Option<DateTime<Utc>>,
}

impl LoadedTable {
    /// Renders the full page for the loaded rows
    pub fn render(&self, title: &str) -> String {
        render_page(title, &self.body, self.updated)
    }
}

/// Fetch-and-render unit for a single leaderboard. Holds no rows
/// itself, every load renders into its own table body
pub struct Leaderboard {
    client: ScoresClient,
}

impl Leaderboard {
    pub fn new(client: ScoresClient) -> Self {
        Self { client }
    }

    /// Performs one page load: fetches the scores and renders them
    /// into a fresh table body
    pub async fn load(&self) -> LoadedTable {
        let mut body = TableBody::default();
        let updated = self.refresh(&mut body).await;
        LoadedTable { body, updated }
    }

    /// Fetches the current scores and renders them into `body`. The
    /// existing rows are always cleared first, a failure is logged and
    /// leaves the body empty. Returns the update time on success
    pub async fn refresh(&self, body: &mut TableBody) -> Option<DateTime<Utc>> {
        body.clear();
        match self.client.fetch_scores().await {
            Ok(scores) => {
                populate(body, &scores.results);
                debug!("Rendered {} leaderboard rows", body.len());
                Some(Utc::now())
            }
            Err(err) => {
                error!("Error fetching leaderboard: {}", err);
                None
            }
        }
    }

    /// Performs one page load and writes the rendered page to `output`,
    /// returning the number of rendered rows
    pub async fn write_page(&self, title: &str, output: &Path) -> io::Result<usize> {
        let table = self.load().await;
        tokio::fs::write(output, table.render(title)).await?;
        Ok(table.body.len())
    }
}

/// Replaces the rows of `body` with one row per entry in the order
/// the entries are provided
pub fn populate(body: &mut TableBody, entries: &[LeaderboardEntry]) {
    body.clear();
    for entry in entries {
        body.append(TableRow::from(entry));
    }
}
