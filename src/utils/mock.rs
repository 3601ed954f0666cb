//! Local stand-in for the leaderboards API used by tests

use crate::config::{Config, CredentialsConfig, LeaderboardConfig};
use axum::{
    extract::{Request, State},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, StatusCode,
    },
    response::{IntoResponse, Response},
    Router,
};
use log::{LevelFilter, Log, Metadata, Record};
use serde_json::json;
use std::{
    collections::VecDeque,
    net::SocketAddr,
    sync::{Arc, Mutex},
};
use tokio::net::TcpListener;

/// Response the mock upstream will produce for a request
#[derive(Clone)]
pub struct MockResponse {
    status: StatusCode,
    body: String,
}

impl MockResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }
}

/// Details captured from a request made to the mock upstream
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Default)]
struct MockState {
    /// Responses still to be handed out, the last one repeats
    responses: VecDeque<MockResponse>,
    requests: Vec<RecordedRequest>,
}

type SharedState = Arc<Mutex<MockState>>;

pub struct MockUpstream {
    addr: SocketAddr,
    state: SharedState,
}

impl MockUpstream {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Config pointing at this upstream with test credentials
    pub fn config(&self) -> Config {
        Config {
            leaderboard: LeaderboardConfig {
                base_url: self.base_url(),
                project_id: "project".to_string(),
                environment_id: "env".to_string(),
                leaderboard_id: "Board".to_string(),
            },
            credentials: CredentialsConfig {
                key_id: Some("Aladdin".to_string()),
                secret_key: Some("open sesame".to_string()),
            },
            ..Default::default()
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }
}

/// Starts a mock upstream on a random local port which replies with
/// the provided responses in order
pub async fn start(responses: Vec<MockResponse>) -> MockUpstream {
    install_logger();

    let state: SharedState = Arc::new(Mutex::new(MockState {
        responses: responses.into(),
        requests: Vec::new(),
    }));

    let router = Router::new().fallback(handle).with_state(state.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    MockUpstream { addr, state }
}

async fn handle(State(state): State<SharedState>, req: Request) -> Response {
    let header = |name: HeaderName| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    let recorded = RecordedRequest {
        path: req.uri().path().to_string(),
        authorization: header(AUTHORIZATION),
        content_type: header(CONTENT_TYPE),
    };

    let response = {
        let mut state = state.lock().unwrap();
        state.requests.push(recorded);
        if state.responses.len() > 1 {
            state.responses.pop_front()
        } else {
            state.responses.front().cloned()
        }
    };

    match response {
        Some(MockResponse { status, body }) => (status, body).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Creates a scores response body with entries ranked in the
/// provided order
pub fn scores_body(entries: &[(&str, f64)]) -> String {
    let results: Vec<_> = entries
        .iter()
        .enumerate()
        .map(|(rank, (name, score))| {
            json!({
                "playerId": format!("player-{rank}"),
                "playerName": name,
                "rank": rank,
                "score": score,
            })
        })
        .collect();

    json!({
        "offset": 0,
        "limit": 10,
        "total": entries.len(),
        "results": results,
    })
    .to_string()
}

/// Log lines recorded from every test in the process, formatted
/// as `LEVEL message`
static LOGS: Mutex<Vec<String>> = Mutex::new(Vec::new());

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let line = format!("{} {}", record.level(), record.args());
        LOGS.lock().unwrap().push(line);
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Installs the capturing logger, only the first call has any effect
pub fn install_logger() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

/// Snapshot of the captured log lines
pub fn captured_logs() -> Vec<String> {
    LOGS.lock().unwrap().clone()
}
