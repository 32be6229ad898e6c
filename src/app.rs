use std::io;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event as InputEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use points_board::api::ApiClient;
use points_board::board::{Board, Command, Event};
use points_board::config::Config;
use points_board::constants::COPY_FEEDBACK_MS;
use points_board::format::is_valid_address;
use points_board::models::TimeWindow;

use crate::ui;

pub(crate) struct App {
    pub(crate) board: Board,
    pub(crate) selected: usize,
    pub(crate) search_focused: bool,
    pub(crate) copied: Option<(String, Instant)>,
    explorer_base_url: String,
    should_quit: bool,
}

impl App {
    fn new(board: Board, explorer_base_url: String) -> Self {
        Self {
            board,
            selected: 0,
            search_focused: false,
            copied: None,
            explorer_base_url,
            should_quit: false,
        }
    }

    /// Address the indicator is shown for, if the copy is still fresh.
    pub(crate) fn copied_address(&self) -> Option<&str> {
        self.copied.as_ref().map(|(address, _)| address.as_str())
    }

    fn handle_input(&mut self, input: InputEvent) -> Vec<Command> {
        let InputEvent::Key(key) = input else {
            return Vec::new();
        };
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Vec::new();
        }
        if self.search_focused {
            self.handle_search_key(key);
            return Vec::new();
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                Vec::new()
            }
            KeyCode::Char('/') => {
                self.search_focused = true;
                Vec::new()
            }
            KeyCode::Tab => self.cycle_window(1),
            KeyCode::BackTab => self.cycle_window(-1),
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.select_window(TimeWindow::ALL[index])
            }
            KeyCode::Left | KeyCode::Char('h') => {
                let commands = self.board.prev_page();
                self.selected = 0;
                commands
            }
            KeyCode::Right | KeyCode::Char('l') => {
                let commands = self.board.next_page();
                self.selected = 0;
                commands
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                Vec::new()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected += 1;
                self.clamp_selection();
                Vec::new()
            }
            KeyCode::Char('c') => {
                self.copy_selected_address();
                Vec::new()
            }
            KeyCode::Char('o') | KeyCode::Enter => {
                self.open_selected_in_explorer();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let now = Instant::now();
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.search_focused = false,
            KeyCode::Backspace => {
                let mut text = self.board.search_input().to_string();
                text.pop();
                self.board.set_search_input(text, now);
            }
            KeyCode::Char(c) => {
                let mut text = self.board.search_input().to_string();
                text.push(c);
                self.board.set_search_input(text, now);
            }
            _ => {}
        }
    }

    fn cycle_window(&mut self, step: isize) -> Vec<Command> {
        let windows = TimeWindow::ALL;
        let current = windows
            .iter()
            .position(|w| *w == self.board.window())
            .unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(windows.len() as isize) as usize;
        self.select_window(windows[next])
    }

    fn select_window(&mut self, window: TimeWindow) -> Vec<Command> {
        let commands = self.board.select_window(window);
        self.selected = 0;
        commands
    }

    fn selected_address(&self) -> Option<String> {
        let view = self.board.view();
        view.rows.get(self.selected).map(|row| row.address.clone())
    }

    fn copy_selected_address(&mut self) {
        let Some(address) = self.selected_address() else {
            return;
        };
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(&address)) {
            Ok(()) => {
                self.copied = Some((
                    address,
                    Instant::now() + Duration::from_millis(COPY_FEEDBACK_MS),
                ));
            }
            Err(err) => warn!(?err, "failed to copy address"),
        }
    }

    fn open_selected_in_explorer(&self) {
        let Some(address) = self.selected_address() else {
            return;
        };
        if !is_valid_address(&address) {
            debug!(%address, "explorer action skipped for invalid address");
            return;
        }
        let url = format!("{}{}", self.explorer_base_url, address);
        if let Err(err) = open::that_detached(&url) {
            warn!(?err, %url, "failed to open block explorer");
        }
    }

    fn on_tick(&mut self, now: Instant) -> Vec<Command> {
        if let Some((_, deadline)) = &self.copied {
            if now >= *deadline {
                self.copied = None;
            }
        }
        self.board.tick(now)
    }

    fn clamp_selection(&mut self) {
        let len = self.board.view().rows.len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

pub(crate) async fn run(config: Config, api: ApiClient) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<InputEvent>();

    // crossterm reads block, so a dedicated thread forwards input into the
    // async loop.
    thread::spawn(move || loop {
        match event::read() {
            Ok(input) => {
                if input_tx.send(input).is_err() {
                    break;
                }
            }
            Err(err) => {
                warn!(?err, "input read failed");
                break;
            }
        }
    });

    let (board, commands) = Board::new(config.debounce_delay);
    let mut app = App::new(board, config.explorer_base_url.clone());
    dispatch(&api, &event_tx, commands);

    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(io::stdout(), EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("failed to build terminal")?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

    let mut tick = tokio::time::interval(config.tick_interval);
    let result = loop {
        if let Err(err) = terminal.draw(|frame| ui::draw(frame, &app)) {
            break Err(err).context("failed to draw frame");
        }

        tokio::select! {
            _ = tick.tick() => {
                let commands = app.on_tick(Instant::now());
                dispatch(&api, &event_tx, commands);
            }
            Some(input) = input_rx.recv() => {
                let commands = app.handle_input(input);
                dispatch(&api, &event_tx, commands);
            }
            Some(event) = event_rx.recv() => {
                let commands = app.board.apply(event);
                app.clamp_selection();
                dispatch(&api, &event_tx, commands);
            }
        }

        if app.should_quit {
            break Ok(());
        }
    };

    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to restore cursor")?;

    result
}

/// Execute board commands against the API client, feeding tagged results back
/// into the event loop. At most one ranked-page and one statistics fetch are
/// live at a time; a superseded response is discarded by tag on arrival.
fn dispatch(api: &ApiClient, tx: &mpsc::UnboundedSender<Event>, commands: Vec<Command>) {
    for command in commands {
        let api = api.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let event = match command {
                Command::FetchPage(tag) => Event::PageLoaded {
                    tag,
                    result: api.fetch_page(tag.page, tag.window).await,
                },
                Command::FetchStatistics(tag) => Event::StatisticsLoaded {
                    tag,
                    result: api.fetch_statistics(tag.window).await,
                },
            };
            let _ = tx.send(event);
        });
    }
}
