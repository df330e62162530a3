use std::time::Duration;

use crossterm::style::Color;
use crossterm::Result;

use crate::game::{RunState, SnakeGame};
use crate::term::TermManager;

// Each logical cell is two character columns wide so the board reads
// roughly square in a terminal.
const CELL: &str = "██";
const GRID_DOT: &str = "· ";

const BOARD_LEFT: u16 = 1;
const BOARD_TOP: u16 = 2;

/// Repaints the whole frame from the current state plus the wall clock.
/// Read-only: the clock only drives the food pulse.
pub fn draw(term: &mut TermManager, game: &SnakeGame, clock: Duration) -> Result<()> {
    let n = game.state().board().dimension() as u16;

    draw_scoreboard(term, game)?;
    draw_border(term, n)?;
    draw_grid(term, n)?;
    draw_snake(term, game)?;
    draw_food(term, game, clock)?;
    draw_overlay(term, game, n)?;
    term.flush()
}

fn draw_scoreboard(term: &mut TermManager, game: &SnakeGame) -> Result<()> {
    let line = format!(
        "Score: {:<6} High score: {:<6}",
        game.state().score(),
        game.high_score()
    );
    term.print_at(BOARD_LEFT, 0, &line, Color::White)
}

fn draw_border(term: &mut TermManager, n: u16) -> Result<()> {
    let horizontal = format!("+{}+", "-".repeat(n as usize * 2));
    term.print_at(0, BOARD_TOP - 1, &horizontal, Color::Grey)?;
    term.print_at(0, BOARD_TOP + n, &horizontal, Color::Grey)?;

    for y in 0..n {
        term.print_at(0, BOARD_TOP + y, "|", Color::Grey)?;
        term.print_at(1 + n * 2, BOARD_TOP + y, "|", Color::Grey)?;
    }

    Ok(())
}

fn draw_grid(term: &mut TermManager, n: u16) -> Result<()> {
    let row = GRID_DOT.repeat(n as usize);
    for y in 0..n {
        term.print_at(BOARD_LEFT, BOARD_TOP + y, &row, Color::DarkGrey)?;
    }
    Ok(())
}

fn draw_snake(term: &mut TermManager, game: &SnakeGame) -> Result<()> {
    for (i, cell) in game.state().snake().cells().enumerate() {
        let color = if i == 0 { Color::Green } else { Color::DarkGreen };
        let (col, row) = cell_origin(*cell);
        term.print_at(col, row, CELL, color)?;
    }
    Ok(())
}

fn draw_food(term: &mut TermManager, game: &SnakeGame, clock: Duration) -> Result<()> {
    let (col, row) = cell_origin(game.state().food());
    term.print_at(col, row, food_glyph(clock.as_millis() as f64), Color::Red)
}

fn draw_overlay(term: &mut TermManager, game: &SnakeGame, n: u16) -> Result<()> {
    let lines: Vec<String> = match game.run_state() {
        RunState::Running => return Ok(()),
        RunState::Idle => vec!["Snake Game".into(), "Press SPACE to start!".into()],
        RunState::Paused => vec!["Game Paused".into(), "Press SPACE to resume".into()],
        RunState::Over => {
            let title = if game.is_new_high_score() { "New High Score!" } else { "Game Over" };
            vec![
                title.into(),
                format!("Score: {}", game.state().score()),
                "Press SPACE to play again".into(),
            ]
        }
    };

    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 4;
    let height = lines.len() as u16 + 2;
    let x0 = BOARD_LEFT + (n * 2).saturating_sub(width as u16) / 2;
    let y0 = BOARD_TOP + n.saturating_sub(height) / 2;

    let blank = " ".repeat(width);
    term.print_at(x0, y0, &blank, Color::White)?;
    for (i, line) in lines.iter().enumerate() {
        let padded = format!("{: ^1$}", line, width);
        term.print_at(x0, y0 + 1 + i as u16, &padded, Color::White)?;
    }
    term.print_at(x0, y0 + height - 1, &blank, Color::White)?;

    Ok(())
}

fn cell_origin(cell: crate::Cell) -> (u16, u16) {
    (BOARD_LEFT + cell.0 as u16 * 2, BOARD_TOP + cell.1 as u16)
}

/// Continuous sine pulse for the food, mapped to glyph shades since a
/// terminal cell can't scale. Cosmetic only; collisions always use the
/// logical cell.
fn food_glyph(clock_ms: f64) -> &'static str {
    let pulse = 0.8 + 0.2 * (clock_ms * 0.01).sin();
    if pulse > 0.93 {
        "██"
    } else if pulse > 0.8 {
        "▓▓"
    } else {
        "▒▒"
    }
}
