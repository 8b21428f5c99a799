// src/picker/view.rs
// =============================================================================
// Draws the picker with ratatui and runs its event loop on crossterm.
//
// Layout, top to bottom:
//   query line      "> query" plus a match counter
//   list            one row per matching repo, toggled rows marked
//   help line       the key bindings
//   status line     result of the last c-o
//
// The terminal is put back into its normal state even when the loop fails.
// =============================================================================

use super::state::{PickerAction, PickerState};
use super::{open_repo_page, MatchMode, Selection};
use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::{Frame, Terminal};
use std::io;
use tracing::{debug, warn};

const HELP: &str =
    "sel: tab/c-space | sel/unsel all: c-a/c-r | exact match: c-e | open gh url: c-o | enter: confirm | esc: quit";

// Marker colour for toggled rows
const MARKED: Color = Color::Rgb(161, 221, 134);

/// Outcome of the last open-in-browser request, shown under the help line.
#[derive(Debug, Clone)]
enum Status {
    Opened(String),
    Failed(String),
}

/// Takes over the terminal until the user confirms or cancels.
pub fn run(state: &mut PickerState) -> Result<Selection> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to initialize terminal")?;

    let result = event_loop(&mut terminal, state);

    disable_raw_mode().ok();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut PickerState,
) -> Result<Selection> {
    let mut status = None;
    loop {
        terminal.draw(|frame| render(frame, state, status.as_ref()))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };

        match state.handle_key(key) {
            PickerAction::Continue => {}
            PickerAction::Open(id) => {
                status = Some(match open_repo_page(&id) {
                    Ok(url) => {
                        debug!(%url, "opened in browser");
                        Status::Opened(url)
                    }
                    Err(e) => {
                        warn!(%id, error = %e, "failed to open browser");
                        Status::Failed(format!("Error opening {id}: {e}"))
                    }
                });
            }
            PickerAction::Done(selection) => return Ok(selection),
        }
    }
}

fn render(frame: &mut Frame<'_>, state: &PickerState, status: Option<&Status>) {
    let title = match state.mode() {
        MatchMode::Fuzzy => " STAR LISTS ".to_string(),
        MatchMode::Exact => " STAR LISTS E ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(frame.size());
    frame.render_widget(block, frame.size());

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    render_query(frame, layout[0], state);
    render_list(frame, layout[1], state);

    let help = Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, layout[2]);

    let status_line = match status {
        Some(Status::Opened(url)) => {
            Line::styled(format!("Opened {url}"), Style::default().fg(Color::Green))
        }
        Some(Status::Failed(text)) => Line::styled(text.clone(), Style::default().fg(Color::Red)),
        None => Line::default(),
    };
    frame.render_widget(Paragraph::new(status_line), layout[3]);
}

fn render_query(frame: &mut Frame<'_>, area: Rect, state: &PickerState) {
    let line = Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Yellow)),
        Span::styled(
            state.query().to_string(),
            Style::default().fg(Color::Rgb(229, 161, 255)),
        ),
        Span::styled(
            format!(
                "  {}/{} ({} selected)",
                state.visible_len(),
                state.total(),
                state.selected_count()
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &PickerState) {
    if state.visible_len() == 0 {
        let placeholder = Paragraph::new("No repos match").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        );
        frame.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = state
        .visible()
        .map(|(choice, selected)| {
            let marker = if selected {
                Span::styled("◉ ", Style::default().fg(MARKED))
            } else {
                Span::raw("○ ")
            };
            ListItem::new(Line::from(vec![
                marker,
                Span::styled(choice.label(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(
                    choice.repo.description.clone(),
                    Style::default().fg(Color::Gray),
                ),
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(state.cursor()));

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("❯ ");

    frame.render_stateful_widget(list, area, &mut list_state);
}
