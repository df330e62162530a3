use rand::Rng;

use crate::board::Board;
use crate::snake::{Direction, Snake};
use crate::{Cell, GridInt, Vector};

pub const FOOD_POINTS: u32 = 10;

const STILL: Vector = (0, 0);

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Collision {
    Wall,
    SelfHit,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StepOutcome {
    /// No movement vector yet, the snake stays put.
    Still,
    Moved,
    Ate,
}

/// The canonical live game state: snake, food, score and the movement
/// vectors. `pending` is what the player last asked for, `applied` is what
/// the last committed step actually moved with; the no-reverse rule filters
/// against `applied` so double-taps between ticks can't turn the snake back
/// into its neck.
pub struct GameState {
    board: Board,
    snake: Snake,
    food: Cell,
    score: u32,
    pending: Vector,
    applied: Vector,
}

impl GameState {
    pub fn new(board: Board, rng: &mut impl Rng) -> Self {
        let snake = Snake::new(board.center());
        let food = spawn_food(&snake, board.dimension(), rng);
        GameState { board, snake, food, score: 0, pending: STILL, applied: STILL }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    #[cfg(test)]
    pub fn pending_vector(&self) -> Vector {
        self.pending
    }

    #[cfg(test)]
    pub fn set_food(&mut self, cell: Cell) {
        self.food = cell;
    }

    /// Records the player's requested direction. Requests that would reverse
    /// the last applied vector are dropped; anything else overwrites the
    /// pending vector, even if a previous request hasn't been applied yet.
    pub fn request_direction(&mut self, dir: Direction) {
        let v = dir.vector();
        if v == opposite(self.applied) {
            return;
        }
        self.pending = v;
    }

    /// Advances the game by one tick. On collision the state is left frozen
    /// at the moment of impact and the caller ends the game.
    pub fn step(&mut self, rng: &mut impl Rng) -> Result<StepOutcome, Collision> {
        if self.pending == STILL {
            return Ok(StepOutcome::Still);
        }

        let v = self.pending;
        let head = self.snake.head();
        let next = (head.0 + v.0, head.1 + v.1);

        if !self.board.is_in_bounds(next) {
            return Err(Collision::Wall);
        }
        // Checked against the whole pre-move body: stepping onto the cell the
        // tail is about to vacate still counts as a self hit.
        if self.snake.contains(next) {
            return Err(Collision::SelfHit);
        }

        self.applied = v;
        self.snake.push_head(next);

        if next == self.food {
            self.score += FOOD_POINTS;
            self.food = spawn_food(&self.snake, self.board.dimension(), rng);
            Ok(StepOutcome::Ate)
        } else {
            self.snake.pop_tail();
            Ok(StepOutcome::Moved)
        }
    }
}

fn opposite(v: Vector) -> Vector {
    (-v.0, -v.1)
}

/// Rejection sampling: draw uniform cells until one misses the snake. The
/// board is never anywhere near full, so this terminates quickly in practice.
fn spawn_food(snake: &Snake, n: GridInt, rng: &mut impl Rng) -> Cell {
    loop {
        let cell = (rng.gen_range(0..n), rng.gen_range(0..n));
        if !snake.contains(cell) {
            return cell;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn state_with(snake: Snake, food: Cell) -> GameState {
        GameState {
            board: Board::new(400, 20),
            snake,
            food,
            score: 0,
            pending: STILL,
            applied: STILL,
        }
    }

    #[test]
    fn still_before_first_input() {
        let mut state = state_with(Snake::new((10, 10)), (0, 0));
        assert_eq!(state.step(&mut rng()), Ok(StepOutcome::Still));
        assert_eq!(state.snake().head(), (10, 10));
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn first_tick_moves_right() {
        let mut state = state_with(Snake::new((10, 10)), (0, 0));
        state.request_direction(Direction::Right);
        assert_eq!(state.step(&mut rng()), Ok(StepOutcome::Moved));
        assert_eq!(state.snake().head(), (11, 10));
        assert_eq!(state.snake().len(), 1);
        // Food untouched by a plain move
        assert_eq!(state.food(), (0, 0));
    }

    #[test]
    fn right_edge_is_a_wall() {
        let mut state = state_with(Snake::new((19, 10)), (0, 0));
        state.request_direction(Direction::Right);
        assert_eq!(state.step(&mut rng()), Err(Collision::Wall));
        // State frozen at the moment of impact
        assert_eq!(state.snake().head(), (19, 10));
    }

    #[test]
    fn reversing_the_applied_vector_is_ignored() {
        let mut state = state_with(Snake::from_body(vec![(5, 5), (4, 5)]), (0, 0));
        state.request_direction(Direction::Right);
        state.step(&mut rng()).unwrap();
        assert_eq!(state.snake().head(), (6, 5));

        state.request_direction(Direction::Left);
        assert_eq!(state.pending_vector(), (1, 0));
        state.step(&mut rng()).unwrap();
        assert_eq!(state.snake().head(), (7, 5));
    }

    #[test]
    fn double_tap_between_ticks_still_filters_against_applied() {
        let mut state = state_with(Snake::from_body(vec![(5, 5), (4, 5)]), (0, 0));
        state.request_direction(Direction::Right);
        state.step(&mut rng()).unwrap();

        // Up is fine, but Left is still the reverse of the committed Right
        state.request_direction(Direction::Up);
        state.request_direction(Direction::Left);
        assert_eq!(state.pending_vector(), (0, -1));
    }

    #[test]
    fn perpendicular_request_overwrites_pending() {
        let mut state = state_with(Snake::new((10, 10)), (0, 0));
        state.request_direction(Direction::Right);
        state.step(&mut rng()).unwrap();

        state.request_direction(Direction::Down);
        state.request_direction(Direction::Up);
        assert_eq!(state.pending_vector(), (0, -1));
    }

    #[test]
    fn eating_grows_and_scores() {
        let mut state = state_with(Snake::new((10, 10)), (11, 10));
        state.request_direction(Direction::Right);
        assert_eq!(state.step(&mut rng()), Ok(StepOutcome::Ate));
        assert_eq!(state.snake().len(), 2);
        assert_eq!(state.score(), 10);
        // Respawned food never lands on the snake
        assert!(!state.snake().contains(state.food()));
    }

    #[test]
    fn running_into_the_body_is_a_self_hit() {
        // Body curls under the head; stepping down lands on a mid-body cell
        let snake = Snake::from_body(vec![(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)]);
        let mut state = state_with(snake, (0, 0));
        state.request_direction(Direction::Down);
        assert_eq!(state.step(&mut rng()), Err(Collision::SelfHit));
    }

    #[test]
    fn moving_onto_the_vacating_tail_counts_as_self_hit() {
        // The tail cell would be free after the move, but the check runs
        // against the pre-move body. Intended behavior, not a bug.
        let snake = Snake::from_body(vec![(5, 5), (4, 5), (4, 6), (5, 6)]);
        let mut state = state_with(snake, (0, 0));
        state.request_direction(Direction::Down);
        assert_eq!(state.step(&mut rng()), Err(Collision::SelfHit));
    }

    #[test]
    fn food_respawn_avoids_snake_across_many_draws() {
        let snake = Snake::from_body(vec![(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)]);
        let mut rng = rng();
        for _ in 0..200 {
            let food = spawn_food(&snake, 3, &mut rng);
            assert!(!snake.contains(food));
        }
    }

    #[test]
    fn body_never_overlaps_during_a_long_seeded_walk() {
        let mut rng = rng();
        let mut state = GameState::new(Board::new(400, 20), &mut rng);
        let dirs = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

        for i in 0..500 {
            state.request_direction(dirs[(i * 7 + i / 3) % 4]);
            match state.step(&mut rng) {
                Ok(_) => {
                    let cells: Vec<Cell> = state.snake().cells().copied().collect();
                    for (a, cell_a) in cells.iter().enumerate() {
                        for cell_b in &cells[a + 1..] {
                            assert_ne!(cell_a, cell_b);
                        }
                    }
                    assert_eq!(state.score() % 10, 0);
                }
                Err(_) => break,
            }
        }
    }
}
