//! Play command implementation - Interactive TUI.

// Board geometry is computed in u16 terminal cells
#![allow(clippy::cast_possible_truncation)]

use super::{CliError, RulesArgs};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use merge1024::game::{RandomSource, SeededRandom};
use merge1024::store::{BestScoreStore, JsonFileStore, MemoryStore};
use merge1024::{Coord, Direction, GameSession, GameStatus};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;

/// Width of one rendered cell, in columns.
const CELL_WIDTH: usize = 6;

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the rules are invalid or the TUI fails.
pub(crate) fn execute(
    rules: &RulesArgs,
    seed: Option<u64>,
    best: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = rules.resolve()?;
    let rng = SeededRandom::new(super::seed_or_now(seed));

    match best {
        Some(path) => run_tui(GameSession::new(config, rng, JsonFileStore::new(path))?),
        None => run_tui(GameSession::new(config, rng, MemoryStore::default())?),
    }
}

/// App state for the TUI.
struct App<R, S> {
    session: GameSession<R, S>,
    last_gain: u64,
}

impl<R: RandomSource, S: BestScoreStore> App<R, S> {
    fn handle_move(&mut self, direction: Direction) {
        let outcome = self.session.apply_move(direction);
        if outcome.accepted {
            self.last_gain = outcome.score_delta;
        }
    }

    fn new_game(&mut self) {
        self.session.new_game();
        self.last_gain = 0;
    }
}

fn key_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Right => Some(Direction::Right),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Char(c) => c.to_string().parse().ok(),
        _ => None,
    }
}

fn run_tui<R: RandomSource, S: BestScoreStore>(
    session: GameSession<R, S>,
) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let mut app = App {
        session,
        last_gain: 0,
    };
    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

fn event_loop<R: RandomSource, S: BestScoreStore>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App<R, S>,
) -> Result<(), CliError> {
    loop {
        terminal
            .draw(|f| ui(f, app))
            .map_err(|e| CliError::new(e.to_string()))?;

        if event::poll(Duration::from_millis(100)).map_err(|e| CliError::new(e.to_string()))?
            && let Event::Key(key) = event::read().map_err(|e| CliError::new(e.to_string()))?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('n') => app.new_game(),
                KeyCode::Char('c') => {
                    app.session.keep_playing();
                }
                code => {
                    if let Some(direction) = key_direction(code) {
                        app.handle_move(direction);
                    }
                }
            }
        }
    }
}

fn ui<R: RandomSource, S: BestScoreStore>(f: &mut Frame, app: &App<R, S>) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(6),    // Board
        Constraint::Length(3), // Footer
    ])
    .split(f.area());

    render_header(f, chunks[0], app);
    render_board(f, chunks[1], app);
    render_footer(f, chunks[2], app);
}

fn render_header<R: RandomSource, S: BestScoreStore>(f: &mut Frame, area: Rect, app: &App<R, S>) {
    let session = &app.session;
    let gain = if app.last_gain > 0 {
        format!(" (+{})", app.last_gain)
    } else {
        String::new()
    };
    let title = format!(
        " merge{} | Score: {}{gain} | Best: {} | Moves: {} ",
        session.config().win_value,
        session.score(),
        session.best(),
        session.moves()
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_board<R: RandomSource, S: BestScoreStore>(f: &mut Frame, area: Rect, app: &App<R, S>) {
    let grid = app.session.grid();
    let size = grid.size();

    let mut lines: Vec<Line> = Vec::with_capacity(size * 2 + 2);
    for row in 0..size {
        let spans: Vec<Span> = (0..size)
            .map(|col| {
                let value = grid.at(Coord::new(row, col)).map_or(0, |tile| tile.value);
                let text = if value == 0 {
                    format!("{:^CELL_WIDTH$}", "·")
                } else {
                    format!("{value:^CELL_WIDTH$}")
                };
                Span::styled(text, tile_style(value))
            })
            .collect();
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    if let Some(banner) = status_banner(app.session.status()) {
        lines.push(Line::from(Span::styled(
            banner,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
    }

    let width = (size * CELL_WIDTH + 2) as u16;
    let board_area = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        width: width.min(area.width),
        ..area
    };

    let board = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Board "));

    f.render_widget(board, board_area);
}

fn status_banner(status: GameStatus) -> Option<&'static str> {
    match status {
        GameStatus::Won => Some("You win! [c] keep playing  [n] new game"),
        GameStatus::Lost => Some("Game over. [n] new game"),
        GameStatus::Playing | GameStatus::WonContinuing => None,
    }
}

fn tile_style(value: u32) -> Style {
    let (fg, bg) = match value {
        0 => (Color::DarkGray, Color::Reset),
        2 => (Color::Black, Color::Gray),
        4 => (Color::Black, Color::White),
        8 => (Color::Black, Color::LightYellow),
        16 => (Color::Black, Color::Yellow),
        32 => (Color::White, Color::LightRed),
        64 => (Color::White, Color::Red),
        128 => (Color::Black, Color::LightGreen),
        256 => (Color::White, Color::Green),
        512 => (Color::White, Color::LightBlue),
        1024 => (Color::White, Color::Blue),
        _ => (Color::White, Color::Magenta),
    };
    Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD)
}

fn render_footer<R: RandomSource, S: BestScoreStore>(f: &mut Frame, area: Rect, app: &App<R, S>) {
    let controls = match app.session.status() {
        GameStatus::Won => " [c] Keep playing  [n] New game  [q] Quit ",
        GameStatus::Lost => " [n] New game  [q] Quit ",
        GameStatus::Playing | GameStatus::WonContinuing => {
            " [←↑→↓ / hjkl / wasd] Move  [n] New game  [q] Quit "
        }
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(key_direction(KeyCode::Up), Some(Direction::Up));
        assert_eq!(key_direction(KeyCode::Char('h')), Some(Direction::Left));
        assert_eq!(key_direction(KeyCode::Char('s')), Some(Direction::Down));
        assert_eq!(key_direction(KeyCode::Char('x')), None);
        assert_eq!(key_direction(KeyCode::Char('u')), None);
        assert_eq!(key_direction(KeyCode::Char('r')), None);
        assert_eq!(key_direction(KeyCode::Enter), None);
    }

    #[test]
    fn test_banner_only_when_stopped() {
        assert!(status_banner(GameStatus::Won).is_some());
        assert!(status_banner(GameStatus::Lost).is_some());
        assert!(status_banner(GameStatus::Playing).is_none());
    }
}
