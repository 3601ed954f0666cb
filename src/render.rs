//! HTML rendering of the leaderboard table

use crate::leaderboard::models::LeaderboardEntry;
use chrono::{DateTime, Utc};
use indoc::formatdoc;
use std::{borrow::Cow, fmt::Write};

/// Element ID of the table body the rows are rendered into
pub const LEADERBOARD_BODY_ID: &str = "leaderboardBody";

/// A single table row made up of the rank, player name and score
/// cells. Cell values are plain text
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub rank: String,
    pub player_name: String,
    pub score: String,
}

impl From<&LeaderboardEntry> for TableRow {
    fn from(entry: &LeaderboardEntry) -> Self {
        Self {
            rank: entry.rank.to_string(),
            player_name: entry.player_name.clone(),
            score: format_score(entry.score),
        }
    }
}

impl TableRow {
    fn cells(&self) -> [&str; 3] {
        [&self.rank, &self.player_name, &self.score]
    }
}

/// Container for the rows of the leaderboard table body
#[derive(Debug, Default)]
pub struct TableBody {
    rows: Vec<TableRow>,
}

impl TableBody {
    /// Removes all the rendered rows
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Appends a row to the end of the table body
    pub fn append(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the `tbody` element with all of its rows
    pub fn to_html(&self) -> String {
        let mut out = format!("<tbody id=\"{LEADERBOARD_BODY_ID}\">\n");
        for row in &self.rows {
            out.push_str("  <tr>");
            for cell in row.cells() {
                // Writing to a String cannot fail
                let _ = write!(out, "<td>{}</td>", escape_text(cell));
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</tbody>");
        out
    }
}

/// Formats a score the way JavaScript converts numbers to text:
/// plain decimals between 1e-6 and 1e21, exponent notation with an
/// explicit sign outside of that range
pub fn format_score(value: f64) -> String {
    if value == 0.0 {
        // Also covers negative zero
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }

    value.to_string()
}

/// Escapes text so that it can be placed within an element
/// as text content
pub fn escape_text(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 16);
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            ch => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Renders the complete leaderboard page
///
/// `title`   The page heading
/// `body`    The table body to include
/// `updated` When the rows were last successfully fetched
pub fn render_page(title: &str, body: &TableBody, updated: Option<DateTime<Utc>>) -> String {
    let title = escape_text(title);
    let updated = match updated {
        Some(value) => format!("Last updated {}", value.format("%Y-%m-%d %H:%M:%S UTC")),
        None => "Scores unavailable".to_string(),
    };
    let body = body.to_html();

    formatdoc! {r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
        <meta charset="utf-8">
        <title>{title}</title>
        </head>
        <body>
        <h1>{title}</h1>
        <table>
        <thead>
          <tr><th>Rank</th><th>Player</th><th>Score</th></tr>
        </thead>
        {body}
        </table>
        <p class="updated">{updated}</p>
        </body>
        </html>
    "#}
}
