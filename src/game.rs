use std::cmp::max;
use std::time::{Duration, Instant};

use log::info;
use rand::rngs::StdRng;

use crate::board::Board;
use crate::input::Command;
use crate::scores::HighScoreStore;
use crate::state::{GameState, StepOutcome};

const BASE_TICK_MS: i64 = 100;
const MIN_TICK_MS: i64 = 50;
const SPEEDUP_PER_POINT_MS: i64 = 2;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RunState {
    Idle,
    Running,
    Paused,
    Over,
}

/// Tick cadence: speeds up with the score, floored at 50ms.
pub fn tick_delay(score: u32) -> Duration {
    Duration::from_millis(max(BASE_TICK_MS - SPEEDUP_PER_POINT_MS * score as i64, MIN_TICK_MS) as u64)
}

/// A cancellable tick source. The controller arms it while the game runs and
/// drops the deadline whenever the game leaves the Running state, so a tick
/// scheduled before a pause or a crash never fires.
pub struct Ticker {
    deadline: Option<Instant>,
}

impl Ticker {
    pub fn new() -> Self {
        Ticker { deadline: None }
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn due(&self, now: Instant) -> bool {
        matches!(self.deadline, Some(deadline) if now >= deadline)
    }
}

/// The game loop controller: owns the run-state machine, the live game state,
/// the tick source and the high-score record. Everything mutable lives here
/// and is only ever touched from the single event loop.
pub struct SnakeGame {
    state: GameState,
    run_state: RunState,
    ticker: Ticker,
    rng: StdRng,
    high_score: u32,
    store: Option<HighScoreStore>,
}

impl SnakeGame {
    pub fn new(board: Board, store: Option<HighScoreStore>, mut rng: StdRng) -> Self {
        let high_score = store.as_ref().map_or(0, |s| s.load());
        let state = GameState::new(board, &mut rng);
        SnakeGame {
            state,
            run_state: RunState::Idle,
            ticker: Ticker::new(),
            rng,
            high_score,
            store,
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// True right after the current run set a new record.
    pub fn is_new_high_score(&self) -> bool {
        self.state.score() > 0 && self.state.score() == self.high_score
    }

    pub fn handle(&mut self, cmd: Command, now: Instant) {
        match cmd {
            Command::Primary => match self.run_state {
                RunState::Idle => self.start(now),
                RunState::Running | RunState::Paused => self.toggle_pause(now),
                RunState::Over => self.reset(),
            },
            Command::Turn(dir) => {
                // Directional input only counts mid-game
                if self.run_state == RunState::Running {
                    self.state.request_direction(dir);
                }
            }
            Command::Quit => {}
        }
    }

    /// Fires a tick if the scheduled deadline has passed.
    pub fn poll(&mut self, now: Instant) {
        if self.ticker.due(now) {
            self.tick(now);
        }
    }

    pub fn start(&mut self, now: Instant) {
        if self.run_state != RunState::Idle {
            return;
        }
        self.run_state = RunState::Running;
        self.ticker.schedule(now, tick_delay(self.state.score()));
        info!("game started");
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        match self.run_state {
            RunState::Running => {
                self.run_state = RunState::Paused;
                self.ticker.cancel();
            }
            RunState::Paused => {
                self.run_state = RunState::Running;
                self.ticker.schedule(now, tick_delay(self.state.score()));
            }
            _ => {}
        }
    }

    /// Full reset back to Idle: fresh snake, food and score. The high score
    /// record is kept. Accepted in any state.
    pub fn reset(&mut self) {
        let board = *self.state.board();
        self.state = GameState::new(board, &mut self.rng);
        self.run_state = RunState::Idle;
        self.ticker.cancel();
    }

    /// One simulation tick. No-ops unless Running, which makes a stale
    /// deadline harmless.
    pub fn tick(&mut self, now: Instant) {
        if self.run_state != RunState::Running {
            return;
        }

        match self.state.step(&mut self.rng) {
            Ok(outcome) => {
                if outcome == StepOutcome::Ate && self.state.score() > self.high_score {
                    self.high_score = self.state.score();
                    if let Some(store) = &self.store {
                        store.save(self.high_score);
                    }
                }
                self.ticker.schedule(now, tick_delay(self.state.score()));
            }
            Err(collision) => {
                self.run_state = RunState::Over;
                self.ticker.cancel();
                info!("game over ({:?}), final score {}", collision, self.state.score());
            }
        }
    }
}
