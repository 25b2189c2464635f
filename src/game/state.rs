use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::config::GridGeometry;

/// A cell on the game grid, in segment units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Step one cell in a direction, wrapping around the grid edges
    pub fn stepped(&self, direction: Direction, max_x: i32, max_y: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: (self.x + dx).rem_euclid(max_x),
            y: (self.y + dy).rem_euclid(max_y),
        }
    }
}

/// The snake in the game
///
/// Segments are stored head first. The grid is a torus: leaving one edge re-enters on the
/// opposite one, so every segment always lies in `[0, max_x) x [0, max_y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    segments: Vec<Coordinate>,
    /// Where the tail was before the latest move; `grow` appends it back
    previous_tail: Option<Coordinate>,
    max_x: i32,
    max_y: i32,
}

impl Snake {
    /// Lay out `length` segments on the middle row, horizontally centered, head on the left
    pub fn new(max_x: i32, max_y: i32, length: usize) -> Self {
        let start_x = (max_x - length as i32) / 2;
        let row = max_y / 2;
        let segments = (0..length as i32)
            .map(|i| Coordinate::new(start_x + i, row))
            .collect();

        Self {
            segments,
            previous_tail: None,
            max_x,
            max_y,
        }
    }

    pub fn from_geometry(geometry: &GridGeometry) -> Self {
        Self::new(geometry.max_x, geometry.max_y, geometry.initial_length)
    }

    /// Build a snake from explicit segments, head first
    pub fn from_segments(segments: Vec<Coordinate>, max_x: i32, max_y: i32) -> Self {
        Self {
            segments,
            previous_tail: None,
            max_x,
            max_y,
        }
    }

    /// Advance one cell: each segment takes its predecessor's place, then the head steps
    pub fn move_to(&mut self, direction: Direction) {
        let Some(&tail) = self.segments.last() else {
            return;
        };
        self.previous_tail = Some(tail);

        let len = self.segments.len();
        self.segments.copy_within(0..len - 1, 1);
        self.segments[0] = self.segments[0].stepped(direction, self.max_x, self.max_y);
    }

    /// Append the pre-move tail. Does nothing before the first move.
    pub fn grow(&mut self) {
        if let Some(tail) = self.previous_tail {
            self.segments.push(tail);
        }
    }

    /// Segments, head first
    pub fn segments(&self) -> &[Coordinate] {
        &self.segments
    }

    /// Get the head position
    pub fn head(&self) -> Option<Coordinate> {
        self.segments.first().copied()
    }

    pub fn tail(&self) -> Option<Coordinate> {
        self.segments.last().copied()
    }

    /// True when the head shares a cell with any other segment
    pub fn is_bitten(&self) -> bool {
        match self.segments.split_first() {
            Some((head, body)) => body.contains(head),
            None => false,
        }
    }

    pub fn contains(&self, cell: Coordinate) -> bool {
        self.segments.contains(&cell)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Lifecycle of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Stopped,
    Started,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_step_wraps() {
        let origin = Coordinate::new(0, 0);
        assert_eq!(origin.stepped(Direction::Left, 10, 8), Coordinate::new(9, 0));
        assert_eq!(origin.stepped(Direction::Up, 10, 8), Coordinate::new(0, 7));

        let corner = Coordinate::new(9, 7);
        assert_eq!(corner.stepped(Direction::Right, 10, 8), Coordinate::new(0, 7));
        assert_eq!(corner.stepped(Direction::Down, 10, 8), Coordinate::new(9, 0));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(10, 10, 2);
        assert_eq!(
            snake.segments(),
            &[Coordinate::new(4, 5), Coordinate::new(5, 5)]
        );

        let snake = Snake::new(11, 20, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Some(Coordinate::new(4, 10)));
        assert_eq!(snake.tail(), Some(Coordinate::new(6, 10)));
    }

    #[test]
    fn test_snake_movement_shifts_segments() {
        let mut snake = Snake::new(10, 10, 3);
        let before = snake.segments().to_vec();

        snake.move_to(Direction::Up);

        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Some(before[0].stepped(Direction::Up, 10, 10)));
        assert_eq!(&snake.segments()[1..], &before[..2]);
    }

    #[test]
    fn test_move_wraps_every_edge() {
        let cases = [
            (Coordinate::new(0, 4), Direction::Left, Coordinate::new(9, 4)),
            (Coordinate::new(9, 4), Direction::Right, Coordinate::new(0, 4)),
            (Coordinate::new(3, 0), Direction::Up, Coordinate::new(3, 5)),
            (Coordinate::new(3, 5), Direction::Down, Coordinate::new(3, 0)),
        ];

        for (start, direction, expected) in cases {
            let mut snake = Snake::from_segments(vec![start], 10, 6);
            snake.move_to(direction);
            assert_eq!(snake.head(), Some(expected), "{direction:?} from {start:?}");
        }
    }

    #[test]
    fn test_grow_appends_previous_tail() {
        let mut snake = Snake::new(10, 10, 2);
        let tail = snake.tail().unwrap();

        snake.move_to(Direction::Left);
        snake.grow();

        assert_eq!(snake.len(), 3);
        assert_eq!(snake.tail(), Some(tail));
        assert_eq!(
            snake.segments(),
            &[
                Coordinate::new(3, 5),
                Coordinate::new(4, 5),
                Coordinate::new(5, 5)
            ]
        );
    }

    #[test]
    fn test_grow_before_move_is_noop() {
        let mut snake = Snake::new(10, 10, 2);
        snake.grow();
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn test_bite_detection() {
        // head at (5,5) lands on the body
        let snake = Snake::from_segments(
            vec![
                Coordinate::new(5, 5),
                Coordinate::new(5, 6),
                Coordinate::new(6, 6),
                Coordinate::new(6, 5),
                Coordinate::new(5, 5),
            ],
            10,
            10,
        );
        assert!(snake.is_bitten());

        let snake = Snake::new(10, 10, 4);
        assert!(!snake.is_bitten());
    }

    #[test]
    fn test_default_state_is_stopped() {
        assert_eq!(GameState::default(), GameState::Stopped);
    }
}
