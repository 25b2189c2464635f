use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, trace, warn};

use super::{
    action::{Action, Direction, Turn},
    config::{GameConfig, GridGeometry},
    error::GameError,
    events::{EventBus, GameEvent},
    food::place_food,
    scheduler::{FrameHandle, FrameScheduler},
    state::{Coordinate, GameState, Snake},
};

/// Direction every round starts with
pub const INITIAL_DIRECTION: Direction = Direction::Left;

/// Information about a processed tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickInfo {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Whether the head ran into the body, ending the round
    pub bitten: bool,
}

/// The game engine: one snake, one food cell, and the frame-gated tick loop.
///
/// The engine draws nothing. Hosts read [`Game::segments`] and [`Game::food`] to render,
/// feed steering through [`Game::change_direction`] / [`Game::turn_snake`], and deliver
/// frames requested through the injected [`FrameScheduler`] to [`Game::on_frame`].
pub struct Game<S: FrameScheduler> {
    geometry: GridGeometry,
    tick_interval: Duration,
    state: GameState,
    snake: Snake,
    food: Option<Coordinate>,
    /// Direction applied on the last processed tick
    snake_direction: Direction,
    /// Direction the next tick will commit
    selected_direction: Direction,
    frame: Option<FrameHandle>,
    last_tick: Duration,
    scheduler: S,
    events: EventBus,
    rng: StdRng,
}

impl<S: FrameScheduler> Game<S> {
    /// Create a stopped game. The first round begins with [`Game::start`].
    pub fn new(config: &GameConfig, scheduler: S) -> Result<Self, GameError> {
        let geometry = config.geometry()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        debug!(
            max_x = geometry.max_x,
            max_y = geometry.max_y,
            initial_length = geometry.initial_length,
            "Game created"
        );

        Ok(Self {
            geometry,
            tick_interval: config.tick_interval(),
            state: GameState::Stopped,
            snake: Snake::from_geometry(&geometry),
            food: None,
            snake_direction: INITIAL_DIRECTION,
            selected_direction: INITIAL_DIRECTION,
            frame: None,
            last_tick: Duration::ZERO,
            scheduler,
            events: EventBus::new(),
            rng,
        })
    }

    /// Begin a fresh round. Does nothing while a round is running.
    ///
    /// Fails with [`GameError::EmptyBoard`] if the new snake leaves no room for food; the
    /// game then stays stopped.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.state == GameState::Started {
            return Ok(());
        }

        self.snake_direction = INITIAL_DIRECTION;
        self.selected_direction = INITIAL_DIRECTION;
        self.snake = Snake::from_geometry(&self.geometry);
        self.food = None;

        let food = place_food(self.snake.segments(), &self.geometry, &mut self.rng).map_err(
            |err| {
                warn!(%err, "Cannot start round");
                err
            },
        )?;
        self.food = Some(food);
        debug!(x = food.x, y = food.y, "Food placed");

        self.change_state(GameState::Started);
        info!(length = self.snake.len(), "Round started");

        self.last_tick = Duration::ZERO;
        self.frame = Some(self.scheduler.request_frame());
        Ok(())
    }

    /// End the round and cancel the pending frame. Idempotent.
    pub fn stop(&mut self) {
        if let Some(handle) = self.frame.take() {
            self.scheduler.cancel_frame(handle);
        }

        if self.state == GameState::Stopped {
            return;
        }

        self.change_state(GameState::Stopped);
        info!(length = self.snake.len(), "Round stopped");
    }

    /// Select an absolute direction for the next tick. 180-degree reversals of the
    /// committed direction are ignored.
    pub fn change_direction(&mut self, direction: Direction) {
        if self.snake_direction.is_opposite(direction) {
            trace!(?direction, "Ignoring reversal");
            return;
        }
        self.selected_direction = direction;
    }

    /// Select the committed direction rotated by a quarter turn
    pub fn turn_snake(&mut self, turn: Turn) {
        self.selected_direction = self.snake_direction.rotate(turn);
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Move(direction) => self.change_direction(direction),
            Action::Turn(turn) => self.turn_snake(turn),
        }
    }

    /// Deliver a requested frame.
    ///
    /// `timestamp` is the host's monotonic frame time. A tick runs only once more than the
    /// tick interval has passed since the last processed one; otherwise the frame is
    /// re-requested and `Ok(None)` returned. Frames arriving while stopped are dropped.
    pub fn on_frame(&mut self, timestamp: Duration) -> Result<Option<TickInfo>, GameError> {
        if self.state != GameState::Started {
            return Ok(None);
        }
        // the pending request is the one being served
        self.frame = None;

        let mut info = None;
        if timestamp.saturating_sub(self.last_tick) > self.tick_interval {
            self.last_tick = timestamp;
            let tick = self.tick()?;
            info = Some(tick);

            if tick.bitten {
                return Ok(info);
            }
        }

        self.frame = Some(self.scheduler.request_frame());
        Ok(info)
    }

    fn tick(&mut self) -> Result<TickInfo, GameError> {
        self.snake_direction = self.selected_direction;
        self.snake.move_to(self.snake_direction);
        trace!(direction = ?self.snake_direction, head = ?self.snake.head(), "Tick");

        let ate_food = self.is_food_eaten();
        if ate_food {
            self.events.emit(GameEvent::FoodEaten);
            self.snake.grow();
            debug!(length = self.snake.len(), "Food eaten");

            match place_food(self.snake.segments(), &self.geometry, &mut self.rng) {
                Ok(food) => {
                    debug!(x = food.x, y = food.y, "Food placed");
                    self.food = Some(food);
                }
                Err(err) => {
                    warn!(%err, "Board is full, ending round");
                    self.food = None;
                    self.stop();
                    return Err(err);
                }
            }
        }

        let bitten = self.snake.is_bitten();
        if bitten {
            info!(head = ?self.snake.head(), "Snake bit itself");
            self.stop();
        }

        Ok(TickInfo { ate_food, bitten })
    }

    fn is_food_eaten(&self) -> bool {
        match (self.food, self.snake.head()) {
            (Some(food), Some(head)) => food == head,
            _ => false,
        }
    }

    fn change_state(&mut self, state: GameState) {
        self.state = state;
        self.events.emit(GameEvent::StateChanged(state));
    }

    /// Receive state-changed and food-eaten notifications, in emission order
    pub fn subscribe(&mut self) -> UnboundedReceiver<GameEvent> {
        self.events.subscribe()
    }

    /// Segments, head first
    pub fn segments(&self) -> &[Coordinate] {
        self.snake.segments()
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Coordinate> {
        self.food
    }

    pub fn segment_size(&self) -> u32 {
        self.geometry.segment_size
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Direction applied on the last processed tick
    pub fn direction(&self) -> Direction {
        self.snake_direction
    }

    pub fn selected_direction(&self) -> Direction {
        self.selected_direction
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
