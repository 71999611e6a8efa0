use anyhow::Result;
use chrono::{Datelike, Local};
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame, Terminal,
};
use std::{io, time::Duration};

use crate::app::{AppState, InputMode};
use crate::config::APP_NAME;
use crate::ui::handlers::handle_key_event;
use crate::utils::{display_width, index_to_col_name};

const ROW_HEADER_WIDTH: u16 = 5;
const CELL_WIDTH: u16 = 3;

pub fn run_app(mut app_state: AppState) -> Result<()> {
    let mut terminal = setup_terminal()?;

    // Main event loop
    while !app_state.should_quit {
        terminal.draw(|f| ui(f, &mut app_state))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key_event(&mut app_state, key);
                }
            }
        }
    }

    restore_terminal(&mut terminal)?;

    Ok(())
}

/// Setup the terminal for the application
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

fn ui(f: &mut Frame, app_state: &mut AppState) {
    let area = f.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Title bar
            Constraint::Min(5),     // Grid
            Constraint::Length(10), // Notes and notifications
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_title(f, app_state, chunks[0]);

    // Header row plus top and bottom borders
    app_state.visible_rows = (chunks[1].height as usize).saturating_sub(3).max(1);
    app_state.handle_scrolling();
    draw_grid(f, app_state, chunks[1]);

    draw_info_panel(f, app_state, chunks[2]);
    draw_status_bar(f, app_state, chunks[3]);

    match app_state.input_mode {
        InputMode::Help => draw_help_popup(f, app_state, area),
        InputMode::ConfirmClear => draw_confirm_popup(f, area),
        _ => {}
    }
}

fn draw_title(f: &mut Frame, app_state: &AppState, area: Rect) {
    let modified = if app_state.is_modified { " [+]" } else { "" };
    let title = format!(
        " {}{} - {} rows  © {} ",
        APP_NAME,
        modified,
        app_state.row_count(),
        Local::now().year()
    );

    let title_widget =
        Paragraph::new(title).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(title_widget, area);
}

fn draw_grid(f: &mut Frame, app_state: &AppState, area: Rect) {
    let col_count = app_state.col_count();
    let start_row = app_state.start_row;
    let end_row = (start_row + app_state.visible_rows).min(app_state.row_count());

    let mut constraints = Vec::with_capacity(col_count + 1);
    constraints.push(Constraint::Length(ROW_HEADER_WIDTH));
    constraints.extend((0..col_count).map(|_| Constraint::Length(CELL_WIDTH)));

    let (table_block, header_style) = if matches!(app_state.input_mode, InputMode::Normal) {
        (
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::LightCyan)),
            Style::default().bg(Color::DarkGray).fg(Color::Gray),
        )
    } else {
        // Dim the grid while another panel has focus
        (
            Block::default().borders(Borders::ALL),
            Style::default().fg(Color::DarkGray),
        )
    };

    let mut header_cells = Vec::with_capacity(col_count + 1);
    header_cells.push(Cell::from("").style(header_style));
    header_cells.extend((0..col_count).map(|col| {
        Cell::from(format!(" {}", index_to_col_name(col))).style(header_style)
    }));
    let header = Row::new(header_cells).height(1);

    let rows = (start_row..end_row).map(|row| {
        let mut cells = Vec::with_capacity(col_count + 1);
        cells.push(Cell::from((row + 1).to_string()).style(header_style));

        for col in 0..col_count {
            let content = app_state.get_cell_content(row, col);
            let text = if content.is_empty() {
                " ·".to_string()
            } else {
                format!(" {content}")
            };

            let style = if app_state.selected_cell == (row, col) {
                Style::default().bg(Color::White).fg(Color::Black)
            } else {
                Style::default()
            };

            cells.push(Cell::from(text).style(style));
        }

        Row::new(cells)
    });

    let table = Table::new(std::iter::once(header).chain(rows))
        .block(table_block)
        .widths(&constraints);

    f.render_widget(table, area);

    // Below the header row, inside the border; skipped when the grid is too short
    if app_state.row_count() == 0 && area.height >= 4 {
        let inner = Rect {
            x: area.x + 1,
            y: area.y + 2,
            width: area.width.saturating_sub(2),
            height: 1,
        }
        .intersection(area);
        let empty = Paragraph::new("No rows. Press Ctrl+n or :ar to add one.")
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(empty, inner);
    }
}

fn draw_info_panel(f: &mut Frame, app_state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Notes
            Constraint::Percentage(40), // Notifications
        ])
        .split(area);

    match app_state.input_mode {
        InputMode::Notes => {
            let title = Line::from(vec![
                Span::raw(" Notes - "),
                Span::styled(
                    "EDITING",
                    Style::default()
                        .fg(Color::LightBlue)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
            ]);

            let edit_block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::LightCyan))
                .title(title);

            let inner_area = edit_block.inner(chunks[0]);
            let padded_area = Rect {
                x: inner_area.x + 1,
                y: inner_area.y,
                width: inner_area.width.saturating_sub(2),
                height: inner_area.height,
            };

            f.render_widget(edit_block, chunks[0]);
            f.render_widget(app_state.text_area.widget(), padded_area);
        }
        _ => {
            let notes_block = Block::default().borders(Borders::ALL).title(" Notes ");
            let notes = Paragraph::new(app_state.manager.grid().notes().to_string())
                .block(notes_block)
                .wrap(Wrap { trim: false });

            f.render_widget(notes, chunks[0]);
        }
    }

    let notification_block = Block::default()
        .borders(Borders::ALL)
        .title(" Notifications ");

    // Show only the most recent notifications that fit
    let notification_height = notification_block.inner(chunks[1]).height as usize;
    let start_idx = app_state
        .notification_messages
        .len()
        .saturating_sub(notification_height);
    let notifications_text = app_state.notification_messages[start_idx..].join("\n");

    let notification_paragraph = Paragraph::new(notifications_text)
        .block(notification_block)
        .wrap(Wrap { trim: false });

    f.render_widget(notification_paragraph, chunks[1]);
}

fn draw_status_bar(f: &mut Frame, app_state: &AppState, area: Rect) {
    let line = match app_state.input_mode {
        InputMode::Normal => Line::from(format!(
            " {} | A-Z=type arrows/Tab=move Ctrl+s=save Ctrl+n/d=add/remove row Ctrl+e=notes :=command F1=help",
            app_state.selected_reference()
        )),
        InputMode::Notes => Line::from(Span::styled(
            "Press Esc to finish editing notes",
            Style::default().fg(Color::DarkGray),
        )),
        InputMode::Command => Line::from(vec![
            Span::raw(":"),
            Span::styled(
                app_state.input_buffer.clone(),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        InputMode::ConfirmClear => Line::from("Clear the sheet? (y/N)"),
        InputMode::Help => Line::from(""),
    };

    let status_widget = Paragraph::new(line).alignment(Alignment::Left);
    f.render_widget(status_widget, area);
}

/// A rectangle of the given size centered in `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    )
}

fn draw_confirm_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered(area, 44, 5);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Clear sheet ")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightRed));

    let text = "Clear the sheet? This cannot be undone.\n\n[y] yes   [any other key] no";
    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    f.render_widget(paragraph, popup_area);
}

fn draw_help_popup(f: &mut Frame, app_state: &mut AppState, area: Rect) {
    let line_count = app_state.help_text.lines().count();
    let max_line_width = app_state
        .help_text
        .lines()
        .map(|line| display_width(line) as u16)
        .max()
        .unwrap_or(40);

    // +2 for borders, +4 for borders and padding
    let popup_area = centered(area, max_line_width + 4, line_count as u16 + 2);
    f.render_widget(Clear, popup_area);

    let visible_lines = popup_area.height.saturating_sub(2) as usize;
    app_state.help_visible_lines = visible_lines;

    let max_scroll = line_count.saturating_sub(visible_lines);
    app_state.help_scroll = app_state.help_scroll.min(max_scroll);

    let mut title = " [ESC/Enter to close] ".to_string();
    if max_scroll > 0 {
        let scroll_indicator = if app_state.help_scroll == 0 {
            " [↓ or j to scroll] "
        } else if app_state.help_scroll >= max_scroll {
            " [↑ or k to scroll] "
        } else {
            " [↑↓ or j/k to scroll] "
        };
        title.push_str(scroll_indicator);
    }

    let help_block = Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightCyan))
        .style(Style::default().bg(Color::Blue).fg(Color::White));

    let help_paragraph = Paragraph::new(app_state.help_text.clone())
        .block(help_block)
        .wrap(Wrap { trim: false })
        .scroll((app_state.help_scroll as u16, 0));

    f.render_widget(help_paragraph, popup_area);
}
