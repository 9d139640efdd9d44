use super::{
    action::Direction,
    config::{FoodPlacement, GameConfig},
    error::ConfigError,
    state::{CollisionType, GameState, Phase, Position, Snake},
};
use rand::{rngs::StdRng, seq::IteratorRandom, Rng, SeedableRng};
use tracing::{debug, info, trace};

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision: Option<CollisionType>,
    /// The game was already over, nothing happened
    pub halted: bool,
}

impl TickResult {
    fn moved(ate_food: bool) -> Self {
        Self {
            ate_food,
            collision: None,
            halted: false,
        }
    }

    fn collided(collision: CollisionType) -> Self {
        Self {
            ate_food: false,
            collision: Some(collision),
            halted: false,
        }
    }

    fn halted() -> Self {
        Self {
            ate_food: false,
            collision: None,
            halted: true,
        }
    }

    /// True when this tick moved the game from running to over
    pub fn ended_game(&self) -> bool {
        self.collision.is_some()
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build the initial state of a fresh game
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(
            self.config.initial_snake.clone(),
            self.config.initial_direction,
        );
        let food = self.place_food(&snake);

        GameState::new(snake, food, self.config.grid_width, self.config.grid_height)
    }

    /// Advance the game by one cell
    pub fn tick(&mut self, state: &mut GameState) -> TickResult {
        if state.is_game_over() {
            return TickResult::halted();
        }

        let new_head = state.snake.next_head();

        if let Some(collision) = self.check_collision(state, new_head) {
            state.phase = Phase::GameOver;
            info!(
                ?collision,
                score = state.score,
                steps = state.steps,
                x = new_head.x,
                y = new_head.y,
                "Game over"
            );
            return TickResult::collided(collision);
        }

        let ate_food = new_head == state.food;
        state.snake.advance_to(new_head, ate_food);
        state.steps += 1;

        if ate_food {
            state.score += 1;
            state.food = self.place_food(&state.snake);
            debug!(
                score = state.score,
                length = state.snake.len(),
                food_x = state.food.x,
                food_y = state.food.y,
                "Food eaten"
            );
        } else {
            trace!(x = new_head.x, y = new_head.y, "Snake moved");
        }

        TickResult::moved(ate_food)
    }

    /// Change the direction of the next tick.
    ///
    /// Reversals are rejected against both the pending direction and the
    /// direction of the last tick, so two quick turns cannot fold the snake
    /// onto its neck. Returns whether the direction changed.
    pub fn steer(&self, state: &mut GameState, direction: Direction) -> bool {
        if state.is_game_over() {
            return false;
        }

        let snake = &mut state.snake;
        if direction == snake.direction
            || direction.is_opposite(snake.direction)
            || direction.is_opposite(snake.heading)
        {
            return false;
        }

        snake.direction = direction;
        true
    }

    /// Start a new game if the current one is over
    pub fn restart(&mut self, state: &mut GameState) -> bool {
        if state.is_running() {
            return false;
        }

        let previous_score = state.score;
        *state = self.reset();
        info!(previous_score, "Game restarted");
        true
    }

    /// Pick a cell for the next piece of food
    pub fn place_food(&mut self, snake: &Snake) -> Position {
        match self.config.food_placement {
            FoodPlacement::Anywhere => self.random_cell(),
            FoodPlacement::AvoidSnake => {
                let (width, height) = (self.config.grid_width, self.config.grid_height);
                let free = (0..height)
                    .flat_map(|y| (0..width).map(move |x| Position::new(x as i32, y as i32)))
                    .filter(|pos| !snake.occupies(*pos))
                    .choose(&mut self.rng);

                // A full grid leaves nowhere free, fall back to overlapping
                free.unwrap_or_else(|| self.random_cell())
            }
        }
    }

    fn random_cell(&mut self) -> Position {
        let x = self.rng.gen_range(0..self.config.grid_width) as i32;
        let y = self.rng.gen_range(0..self.config.grid_height) as i32;
        Position::new(x, y)
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        // The tail still counts: it has not moved out of the way yet
        if state.snake.occupies(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }
}
