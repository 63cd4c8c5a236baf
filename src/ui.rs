//! Terminal UI rendering with ratatui

use crate::game::{GameSnapshot, GameState};
use crate::tetromino::TetrominoType;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const EMPTY: &str = "  ";
const BLOCK: &str = "██";

/// Width of the stats panel next to the board
const PANEL_WIDTH: u16 = 18;

/// Render the whole game screen from a snapshot
pub fn render_game(frame: &mut Frame, snapshot: &GameSnapshot) {
    let area = frame.area();
    let grid = snapshot.composited();
    let cols = grid.first().map_or(0, Vec::len) as u16;
    let rows = grid.len() as u16;

    // Each cell is two characters wide, plus borders
    let board_width = cols * 2 + 2;
    let board_height = rows + 2;
    let game_area = center_rect(area, board_width + PANEL_WIDTH, board_height);

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Length(PANEL_WIDTH)])
        .split(game_area);

    render_board(frame, layout[0], &grid);
    render_stats(frame, layout[1], snapshot);

    match snapshot.state {
        GameState::NotStarted => render_overlay(frame, area, "BLOCKFALL", "Enter / Esc to start"),
        GameState::Paused => render_overlay(frame, area, "PAUSED", "Esc to resume"),
        GameState::Over => render_overlay(frame, area, "GAME OVER", "R to restart"),
        GameState::Running => {}
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn render_board(frame: &mut Frame, area: Rect, grid: &[Vec<u8>]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = grid
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|&value| match TetrominoType::from_cell(value) {
                    Some(kind) => Span::styled(BLOCK, Style::default().fg(kind.color())),
                    None => Span::raw(EMPTY),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render stats panel
fn render_stats(frame: &mut Frame, area: Rect, snapshot: &GameSnapshot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label = |text: &'static str| Line::from(Span::styled(text, Style::default().fg(Color::Gray)));

    let lines = vec![
        label("SCORE"),
        Line::from(Span::styled(
            snapshot.score.to_string(),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::raw(""),
        label("LINES"),
        Line::from(Span::styled(
            snapshot.lines.to_string(),
            Style::default().fg(Color::Green),
        )),
        Line::raw(""),
        label("← →  move"),
        label("↓    drop"),
        label("Spc  rotate"),
        label("Tab  hard drop"),
        label("Esc  pause"),
        label("Q    quit"),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render an overlay (for start/pause/game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_width = 24u16;
    let popup_height = 5u16;
    let popup_area = center_rect(area, popup_width, popup_height);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title, Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle, Style::default().fg(Color::Gray)),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
