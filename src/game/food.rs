use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use super::config::GridGeometry;
use super::error::GameError;
use super::state::Coordinate;

/// Pick a free cell uniformly at random.
///
/// Every cell of the grid not listed in `occupied` is a candidate. Fails with
/// [`GameError::EmptyBoard`] once the snake covers the whole grid.
pub fn place_food<R: Rng + ?Sized>(
    occupied: &[Coordinate],
    geometry: &GridGeometry,
    rng: &mut R,
) -> Result<Coordinate, GameError> {
    let taken: HashSet<Coordinate> = occupied.iter().copied().collect();

    let candidates: Vec<Coordinate> = (0..geometry.max_x)
        .flat_map(|x| (0..geometry.max_y).map(move |y| Coordinate::new(x, y)))
        .filter(|cell| !taken.contains(cell))
        .collect();

    candidates
        .choose(rng)
        .copied()
        .ok_or(GameError::EmptyBoard {
            width: geometry.max_x,
            height: geometry.max_y,
        })
}
