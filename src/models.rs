use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One participant's row as served by the leaderboard endpoint. Rows are
/// replaced wholesale on every successful fetch and never mutated in place.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RankedEntry {
    pub address: String,
    pub points: f64,
    pub total_supplied: f64,
    pub total_borrowed: f64,
}

/// Server-side pagination block. `prev_page`/`next_page` are hints the view
/// does not rely on; some deployments omit them.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    #[serde(default)]
    pub prev_page: Option<u64>,
    #[serde(default)]
    pub next_page: Option<u64>,
    pub total_pages: u64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct LeaderboardPage {
    pub data: Vec<RankedEntry>,
    pub pagination: Pagination,
}

/// Aggregate counters for one time window. Fetched independently from the
/// ranked list and allowed to be stale relative to it.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Statistics {
    pub period: String,
    pub total_users: u64,
    pub total_supplied: f64,
    pub total_borrowed: f64,
    pub total_assets: u64,
}

/// Time range over which ranking points are aggregated. Sent to the remote API
/// as a query parameter; does not change the shape of a row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Today,
    Week,
    Month,
    Year,
    #[default]
    All,
}

impl TimeWindow {
    /// Tab order in the dashboard.
    pub const ALL: [TimeWindow; 5] = [
        TimeWindow::Today,
        TimeWindow::Week,
        TimeWindow::Month,
        TimeWindow::Year,
        TimeWindow::All,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TimeWindow::Today => "today",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::Year => "year",
            TimeWindow::All => "all",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::Today => "Today",
            TimeWindow::Week => "This Week",
            TimeWindow::Month => "This Month",
            TimeWindow::Year => "This Year",
            TimeWindow::All => "All Time",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "today" => Ok(TimeWindow::Today),
            "week" => Ok(TimeWindow::Week),
            "month" => Ok(TimeWindow::Month),
            "year" => Ok(TimeWindow::Year),
            "all" => Ok(TimeWindow::All),
            other => Err(format!("unknown time window: {other}")),
        }
    }
}
