use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;

use points_board::models::{LeaderboardPage, Pagination, RankedEntry, Statistics};

const PAGE_LIMIT: u64 = 10;

/// Scripted behavior of the mock leaderboard API, shared with the test body
/// so failures can be toggled and requests inspected mid-scenario.
#[derive(Default)]
pub struct MockState {
    pub entries: Vec<RankedEntry>,
    pub total_users: u64,
    pub total_supplied: f64,
    pub total_borrowed: f64,
    pub total_assets: u64,
    pub fail_leaderboard: bool,
    pub fail_statistics: bool,
    pub malformed_leaderboard: bool,
    pub requests: Vec<String>,
}

pub struct MockApi {
    pub state: Arc<Mutex<MockState>>,
    base_url: String,
}

impl MockApi {
    pub async fn spawn(state: MockState) -> Self {
        let shared = Arc::new(Mutex::new(state));
        let app = Router::new()
            .route("/leaderboard/", get(leaderboard_handler))
            .route("/leaderboard/statistics", get(statistics_handler))
            .with_state(Arc::clone(&shared));

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock api");
        let addr = listener.local_addr().expect("mock api addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock api server");
        });

        Self {
            state: shared,
            base_url: format!("http://{addr}"),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Path + query of every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().expect("mock state").requests.clone()
    }
}

pub fn entry(address: &str, points: f64) -> RankedEntry {
    RankedEntry {
        address: address.to_string(),
        points,
        total_supplied: points * 40.0,
        total_borrowed: points * 12.0,
    }
}

/// `count` synthetic ranked entries with descending points.
pub fn ranked_entries(count: usize) -> Vec<RankedEntry> {
    (0..count)
        .map(|index| {
            entry(
                &format!("0x{:040x}", index + 1),
                (count - index) as f64 * 100.0,
            )
        })
        .collect()
}

// The period only matters for the request log, which records the raw query.
#[derive(Deserialize)]
struct LeaderboardParams {
    #[serde(default)]
    page: Option<u64>,
    #[serde(default)]
    limit: Option<u64>,
}

async fn leaderboard_handler(
    State(state): State<Arc<Mutex<MockState>>>,
    uri: Uri,
    Query(params): Query<LeaderboardParams>,
) -> Response {
    let mut state = state.lock().expect("mock state");
    state.requests.push(uri.to_string());

    if state.fail_leaderboard {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    if state.malformed_leaderboard {
        return (StatusCode::OK, "this is not json").into_response();
    }

    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(PAGE_LIMIT).max(1);
    let total = state.entries.len() as u64;
    let total_pages = total.div_ceil(limit);

    let start = ((page - 1) * limit) as usize;
    let end = (start + limit as usize).min(state.entries.len());
    let data = if start < state.entries.len() {
        state.entries[start..end].to_vec()
    } else {
        Vec::new()
    };

    Json(LeaderboardPage {
        data,
        pagination: Pagination {
            page,
            limit,
            total,
            prev_page: page.checked_sub(1).filter(|p| *p >= 1),
            next_page: (page < total_pages).then_some(page + 1),
            total_pages,
        },
    })
    .into_response()
}

#[derive(Deserialize)]
struct StatisticsParams {
    #[serde(default)]
    period: Option<String>,
}

async fn statistics_handler(
    State(state): State<Arc<Mutex<MockState>>>,
    uri: Uri,
    Query(params): Query<StatisticsParams>,
) -> Response {
    let mut state = state.lock().expect("mock state");
    state.requests.push(uri.to_string());

    if state.fail_statistics {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }

    Json(Statistics {
        period: params.period.unwrap_or_else(|| "all".to_string()),
        total_users: state.total_users,
        total_supplied: state.total_supplied,
        total_borrowed: state.total_borrowed,
        total_assets: state.total_assets,
    })
    .into_response()
}
