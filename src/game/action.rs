use serde::{Deserialize, Serialize};

/// Direction the snake can move
///
/// The four directions form a rotation ring `Left -> Up -> Right -> Down -> Left`.
/// Rotation is spelled out per variant so the ring never depends on discriminant order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// One step forward on the ring
    pub fn clockwise(&self) -> Direction {
        match self {
            Direction::Left => Direction::Up,
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
        }
    }

    /// One step backward on the ring
    pub fn counter_clockwise(&self) -> Direction {
        match self {
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
            Direction::Up => Direction::Left,
        }
    }

    pub fn rotate(&self, turn: Turn) -> Direction {
        match turn {
            Turn::Left => self.counter_clockwise(),
            Turn::Right => self.clockwise(),
        }
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Relative steering, as seen from the snake's head
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    Left,
    Right,
}

/// Steering command fed into the game by an input adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Head towards an absolute direction
    Move(Direction),
    /// Rotate the committed direction by a quarter turn
    Turn(Turn),
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Move(direction)
    }
}

impl From<Turn> for Action {
    fn from(turn: Turn) -> Self {
        Action::Turn(turn)
    }
}
