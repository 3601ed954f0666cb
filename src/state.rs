use crate::leaderboard::Leaderboard;

/// State shared between the HTTP routes
pub struct App {
    /// The leaderboard to load on every page request
    pub leaderboard: Leaderboard,
    /// Heading to use for the rendered page
    pub title: String,
}
