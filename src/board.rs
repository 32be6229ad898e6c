use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::constants::ITEMS_PER_PAGE;
use crate::debounce::Debounce;
use crate::models::{LeaderboardPage, Pagination, RankedEntry, Statistics, TimeWindow};

pub const FETCH_ERROR_MESSAGE: &str = "Failed to load leaderboard data";

/// The parameters a request was issued for. Responses echo their tag back and
/// the board drops any response whose tag is no longer the in-flight one, so
/// an out-of-order response can never overwrite newer state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestTag {
    pub seq: u64,
    pub window: TimeWindow,
    pub page: u64,
}

/// Fetches the runtime must execute on the injected API client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    FetchPage(RequestTag),
    FetchStatistics(RequestTag),
}

/// Completed fetches, fed back into [`Board::apply`].
#[derive(Clone, Debug)]
pub enum Event {
    PageLoaded {
        tag: RequestTag,
        result: Option<LeaderboardPage>,
    },
    StatisticsLoaded {
        tag: RequestTag,
        result: Option<Statistics>,
    },
}

/// Everything the table and its chrome need for one frame, derived purely
/// from board state. When a search is active the row set, totals, and page
/// count come from filtering the currently loaded server page client-side.
pub struct BoardView<'a> {
    pub rows: Vec<&'a RankedEntry>,
    pub total_items: u64,
    pub total_pages: u64,
    pub start_item: u64,
    pub end_item: u64,
    pub searching: bool,
}

impl BoardView<'_> {
    /// Positional rank of the row at `index` within the current page.
    pub fn rank(&self, index: usize) -> u64 {
        self.start_item + index as u64
    }
}

/// Owner of all leaderboard UI state. The board performs no I/O: user intents
/// and the tick go in, [`Command`]s come out, and the runtime feeds fetch
/// results back through [`Board::apply`].
pub struct Board {
    window: TimeWindow,
    page: u64,
    search_input: String,
    search: Debounce<String>,
    rows: Vec<RankedEntry>,
    statistics: Option<Statistics>,
    pagination: Option<Pagination>,
    loading: bool,
    transitioning: bool,
    error: Option<String>,
    seq: u64,
    inflight_page: Option<RequestTag>,
    inflight_stats: Option<RequestTag>,
}

impl Board {
    /// Initial mount: one ranked-page fetch and one statistics fetch,
    /// issued concurrently for the default window.
    pub fn new(debounce_delay: Duration) -> (Self, Vec<Command>) {
        let mut board = Self {
            window: TimeWindow::default(),
            page: 1,
            search_input: String::new(),
            search: Debounce::new(String::new(), debounce_delay),
            rows: Vec::new(),
            statistics: None,
            pagination: None,
            loading: false,
            transitioning: false,
            error: None,
            seq: 0,
            inflight_page: None,
            inflight_stats: None,
        };
        let commands = vec![board.issue_statistics_fetch(), board.issue_page_fetch()];
        (board, commands)
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn statistics(&self) -> Option<&Statistics> {
        self.statistics.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Switch the active time window. Ignored while a previous window change
    /// is still settling; otherwise resets to page 1 and refetches statistics
    /// first, the ranked page following once the statistics response lands.
    pub fn select_window(&mut self, window: TimeWindow) -> Vec<Command> {
        if self.transitioning {
            debug!(%window, "window change ignored; transition in progress");
            return Vec::new();
        }
        if window == self.window {
            return Vec::new();
        }
        self.window = window;
        self.page = 1;
        self.transitioning = true;
        vec![self.issue_statistics_fetch()]
    }

    /// Advance one page. With a search active this moves through the locally
    /// filtered set and never fetches.
    pub fn next_page(&mut self) -> Vec<Command> {
        let view = self.view();
        let (searching, total_pages) = (view.searching, view.total_pages);
        if searching {
            if self.page < total_pages {
                self.page += 1;
            }
            return Vec::new();
        }
        if self.loading || self.transitioning || self.page >= total_pages {
            return Vec::new();
        }
        self.page += 1;
        vec![self.issue_page_fetch()]
    }

    /// Go back one page; same guards as [`Board::next_page`].
    pub fn prev_page(&mut self) -> Vec<Command> {
        if self.page <= 1 {
            return Vec::new();
        }
        if self.view().searching {
            self.page -= 1;
            return Vec::new();
        }
        if self.loading || self.transitioning {
            return Vec::new();
        }
        self.page -= 1;
        vec![self.issue_page_fetch()]
    }

    /// Raw search input: updates immediately for input responsiveness and
    /// resets to page 1; only the debounced value changes what is rendered.
    pub fn set_search_input(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        self.search_input = text.clone();
        self.page = 1;
        self.search.set(text, now);
    }

    /// Advance the debounce clock. A settled non-empty query switches the view
    /// to client-side filtering without any fetch; a settled cleared query
    /// returns to server pagination and refetches the current page.
    pub fn tick(&mut self, now: Instant) -> Vec<Command> {
        let settled = self.search.poll(now).cloned();
        match settled {
            Some(query) if query.trim().is_empty() => vec![self.issue_page_fetch()],
            _ => Vec::new(),
        }
    }

    /// Apply a completed fetch. Responses with stale tags are discarded.
    pub fn apply(&mut self, event: Event) -> Vec<Command> {
        match event {
            Event::StatisticsLoaded { tag, result } => {
                if self.inflight_stats != Some(tag) {
                    debug!(?tag, "stale statistics response discarded");
                    return Vec::new();
                }
                self.inflight_stats = None;
                match result {
                    Some(statistics) => self.statistics = Some(statistics),
                    // Degrades to placeholder stat values; the table is not blocked.
                    None => warn!(window = %tag.window, "statistics unavailable"),
                }
                if self.transitioning {
                    return vec![self.issue_page_fetch()];
                }
                Vec::new()
            }
            Event::PageLoaded { tag, result } => {
                if self.inflight_page != Some(tag) {
                    debug!(?tag, "stale page response discarded");
                    return Vec::new();
                }
                self.inflight_page = None;
                self.loading = false;
                self.transitioning = false;
                match result {
                    Some(page) => {
                        self.rows = page.data;
                        self.pagination = Some(page.pagination);
                        self.error = None;
                    }
                    None => {
                        // Previous rows are kept; the display layer decides
                        // whether the error block replaces them.
                        self.error = Some(FETCH_ERROR_MESSAGE.to_string());
                    }
                }
                Vec::new()
            }
        }
    }

    /// Derived view over the current state; pure, no side effects.
    pub fn view(&self) -> BoardView<'_> {
        let query = self.search.settled().trim().to_lowercase();
        if query.is_empty() {
            let total_items = self.pagination.as_ref().map_or(0, |p| p.total);
            let total_pages = self.pagination.as_ref().map_or(1, |p| p.total_pages.max(1));
            return self.view_of(self.rows.iter().collect(), total_items, total_pages, false);
        }

        let rows: Vec<&RankedEntry> = self
            .rows
            .iter()
            .filter(|entry| entry.address.to_lowercase().contains(&query))
            .collect();
        let total_items = rows.len() as u64;
        let total_pages = total_items.div_ceil(ITEMS_PER_PAGE);
        self.view_of(rows, total_items, total_pages, true)
    }

    fn view_of<'a>(
        &self,
        rows: Vec<&'a RankedEntry>,
        total_items: u64,
        total_pages: u64,
        searching: bool,
    ) -> BoardView<'a> {
        let start_item = (self.page - 1) * ITEMS_PER_PAGE + 1;
        let end_item = (self.page * ITEMS_PER_PAGE).min(total_items);
        BoardView {
            rows,
            total_items,
            total_pages,
            start_item,
            end_item,
            searching,
        }
    }

    fn issue_page_fetch(&mut self) -> Command {
        self.loading = true;
        self.error = None;
        let tag = self.next_tag();
        self.inflight_page = Some(tag);
        Command::FetchPage(tag)
    }

    fn issue_statistics_fetch(&mut self) -> Command {
        let tag = self.next_tag();
        self.inflight_stats = Some(tag);
        Command::FetchStatistics(tag)
    }

    fn next_tag(&mut self) -> RequestTag {
        self.seq += 1;
        RequestTag {
            seq: self.seq,
            window: self.window,
            page: self.page,
        }
    }
}
