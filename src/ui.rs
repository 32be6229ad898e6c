use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Tabs};
use ratatui::Frame;

use points_board::constants::ITEMS_PER_PAGE;
use points_board::format::{
    avatar_text, format_address, format_currency, format_number, format_stat_currency,
};
use points_board::models::TimeWindow;

use crate::app::App;

const SKELETON_CELL: &str = "▓▓▓▓▓▓▓▓";

pub(crate) fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(3), // tabs + search
            Constraint::Length(4), // stat cards
            Constraint::Min(8),   // table / error
            Constraint::Length(2), // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0]);
    draw_tabs(frame, app, chunks[1]);
    draw_stats(frame, app, chunks[2]);
    if let Some(error) = app.board.error() {
        draw_error(frame, error, chunks[3]);
    } else if app.board.is_loading() || app.board.is_transitioning() {
        draw_skeleton(frame, chunks[3]);
    } else {
        draw_table(frame, app, chunks[3]);
    }
    draw_footer(frame, app, chunks[4]);
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            "Leaderboard",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Track the top performers in the protocol and see how you compare.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(text), area);
}

fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(40)])
        .split(area);

    let titles: Vec<Line> = TimeWindow::ALL
        .iter()
        .map(|window| Line::from(window.label()))
        .collect();
    let selected = TimeWindow::ALL
        .iter()
        .position(|w| *w == app.board.window())
        .unwrap_or(0);
    let style = if app.board.is_transitioning() {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .select(selected)
        .style(style)
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, chunks[0]);

    let (cursor, border) = if app.search_focused {
        ("█", Style::default().fg(Color::Cyan))
    } else {
        ("", Style::default().fg(Color::DarkGray))
    };
    let search = Paragraph::new(Line::from(vec![
        Span::styled("⌕ ", Style::default().fg(Color::DarkGray)),
        Span::raw(app.board.search_input()),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Search by address "),
    );
    frame.render_widget(search, chunks[1]);
}

fn draw_stats(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let statistics = app.board.statistics();
    let pending = app.board.is_transitioning();
    let values = [
        (
            "Total Users",
            statistics.map(|s| format_number(s.total_users as f64)),
        ),
        (
            "Total Supplied",
            statistics.map(|s| format_stat_currency(s.total_supplied)),
        ),
        (
            "Total Borrowed",
            statistics.map(|s| format_stat_currency(s.total_borrowed)),
        ),
        ("Reserves", statistics.map(|s| s.total_assets.to_string())),
    ];

    for (chunk, (title, value)) in chunks.iter().zip(values) {
        let text = if pending {
            Span::styled(SKELETON_CELL, Style::default().fg(Color::DarkGray))
        } else {
            // Absent statistics degrade to a zero placeholder, never an error.
            Span::styled(
                value.unwrap_or_else(|| "0".to_string()),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
        };
        let card = Paragraph::new(Line::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {title} ")),
        );
        frame.render_widget(card, *chunk);
    }
}

fn rank_style(rank: u64) -> Style {
    match rank {
        1 => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        2 => Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
        3 => Style::default().fg(Color::Rgb(205, 127, 50)).add_modifier(Modifier::BOLD),
        _ => Style::default().fg(Color::DarkGray),
    }
}

fn table_header() -> Row<'static> {
    Row::new(vec![
        Cell::from("Rank"),
        Cell::from("User"),
        Cell::from("Total Borrowed"),
        Cell::from("Total Supplied"),
        Cell::from("Points"),
        Cell::from(""),
    ])
    .style(
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::BOLD),
    )
    .bottom_margin(1)
}

fn table_widths() -> [Constraint; 6] {
    [
        Constraint::Length(6),
        Constraint::Min(24),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(14),
        Constraint::Length(10),
    ]
}

fn draw_table(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.board.view();

    if view.rows.is_empty() {
        let message = if view.searching {
            "No matching addresses found"
        } else {
            "No users found"
        };
        let empty = Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let copied = app.copied_address();
    let rows: Vec<Row> = view
        .rows
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let rank = view.rank(index);
            let marker = if copied == Some(entry.address.as_str()) {
                Cell::from(Span::styled("✓ copied", Style::default().fg(Color::Green)))
            } else {
                Cell::from("")
            };
            Row::new(vec![
                Cell::from(Span::styled(format!("#{rank}"), rank_style(rank))),
                Cell::from(Line::from(vec![
                    Span::styled(
                        format!("[{}] ", avatar_text(&entry.address)),
                        Style::default().fg(Color::Magenta),
                    ),
                    Span::raw(format_address(&entry.address)),
                ])),
                Cell::from(format_currency(entry.total_borrowed)),
                Cell::from(format_currency(entry.total_supplied)),
                Cell::from(format!("{} pts", format_number(entry.points))),
                marker,
            ])
        })
        .collect();

    let table = Table::new(rows, table_widths())
        .header(table_header())
        .block(Block::default().borders(Borders::ALL))
        .row_highlight_style(
            Style::default()
                .bg(Color::Rgb(30, 30, 46))
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn draw_skeleton(frame: &mut Frame, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let rows: Vec<Row> = (0..ITEMS_PER_PAGE)
        .map(|_| {
            Row::new(vec![
                Cell::from(Span::styled("▓▓", dim)),
                Cell::from(Span::styled(SKELETON_CELL, dim)),
                Cell::from(Span::styled(SKELETON_CELL, dim)),
                Cell::from(Span::styled(SKELETON_CELL, dim)),
                Cell::from(Span::styled(SKELETON_CELL, dim)),
                Cell::from(""),
            ])
        })
        .collect();

    let table = Table::new(rows, table_widths())
        .header(table_header())
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(table, area);
}

fn draw_error(frame: &mut Frame, error: &str, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            "Failed to load data",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(error, Style::default().fg(Color::Red))),
    ];
    let block = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(block, area);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.board.view();
    let start = if view.rows.is_empty() { 0 } else { view.start_item };
    let shown = format!(
        "Showing {start} to {} of {} users",
        view.end_item, view.total_items
    );
    let pages = format!("page {} of {}", app.board.page(), view.total_pages);

    let hint_key = Style::default().fg(Color::Yellow);
    let dim = Style::default().fg(Color::DarkGray);
    let lines = vec![
        Line::from(vec![
            Span::styled(shown, dim),
            Span::raw("  •  "),
            Span::styled(pages, dim),
        ]),
        Line::from(vec![
            Span::styled("Tab", hint_key),
            Span::styled(" window  ", dim),
            Span::styled("←/→", hint_key),
            Span::styled(" page  ", dim),
            Span::styled("↑/↓", hint_key),
            Span::styled(" row  ", dim),
            Span::styled("/", hint_key),
            Span::styled(" search  ", dim),
            Span::styled("c", hint_key),
            Span::styled(" copy  ", dim),
            Span::styled("o", hint_key),
            Span::styled(" explorer  ", dim),
            Span::styled("q", hint_key),
            Span::styled(" quit", dim),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}
