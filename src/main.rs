mod board;
mod game;
mod input;
mod render;
mod scores;
mod snake;
mod state;
mod term;

use std::fs::File;
use std::thread::sleep;
use std::time::{Duration, Instant};

use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog::{Config, WriteLogger};

use board::Board;
use game::SnakeGame;
use input::Command;
use scores::HighScoreStore;
use term::TermManager;

pub type GridInt = i16;
pub type Cell = (GridInt, GridInt);
pub type Vector = (GridInt, GridInt);

// The logical drawing surface: 400 units square at 20 units per cell
// gives a 20x20 grid.
const SURFACE_SIZE: u16 = 400;
const CELL_SIZE: u16 = 20;

const FRAME_INTERVAL_MS: u64 = 5;
const LOG_FILE: &str = "gridsnake.log";

fn main() -> crossterm::Result<()> {
    // The alternate screen belongs to the game, so logs go to a file
    if let Ok(file) = File::create(LOG_FILE) {
        let _ = WriteLogger::init(LevelFilter::Info, Config::default(), file);
    }
    info!("starting gridsnake");

    let board = Board::new(SURFACE_SIZE, CELL_SIZE);
    let mut game = SnakeGame::new(board, Some(HighScoreStore::new()), StdRng::from_entropy());
    let mut term = TermManager::new();

    term.setup()?;
    let res = run(&mut game, &mut term);
    term.restore()?;
    res
}

fn run(game: &mut SnakeGame, term: &mut TermManager) -> crossterm::Result<()> {
    // Wall clock driving the food pulse animation, nothing else
    let clock = Instant::now();

    term.clear()?;

    loop {
        sleep(Duration::from_millis(FRAME_INTERVAL_MS));

        let now = Instant::now();
        for key_ev in term.poll_key_events()? {
            match input::map_key(&key_ev) {
                Some(Command::Quit) => return Ok(()),
                Some(cmd) => game.handle(cmd, now),
                None => {}
            }
        }

        game.poll(now);
        render::draw(term, game, clock.elapsed())?;
    }
}
