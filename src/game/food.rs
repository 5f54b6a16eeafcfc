use rand::Rng;

use super::grid::{Cell, Grid};
use super::particle::ParticleBurst;
use crate::error::GameError;

/// Points awarded for a normal food item
pub const FOOD_POINTS: u32 = 10;

/// Single-cell pickup together with the particles of past pickups
#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    position: Cell,
    burst: ParticleBurst,
}

impl Food {
    /// Spawn at a random free cell. `occupied` rejects cells the caller
    /// considers taken (the snake).
    pub fn spawn<R, F>(grid: &Grid, rng: &mut R, occupied: F) -> Result<Self, GameError>
    where
        R: Rng,
        F: Fn(Cell) -> bool,
    {
        let position = grid.sample_origin(rng, 1, |cell| !occupied(cell))?;
        Ok(Self {
            position,
            burst: ParticleBurst::new(),
        })
    }

    /// Food at a fixed cell
    pub fn at(position: Cell) -> Self {
        Self {
            position,
            burst: ParticleBurst::new(),
        }
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// Move to a new random free cell outside the exclusion zones
    pub fn respawn<R, F>(&mut self, grid: &Grid, rng: &mut R, occupied: F) -> Result<(), GameError>
    where
        R: Rng,
        F: Fn(Cell) -> bool,
    {
        self.position = grid.sample_origin(rng, 1, |cell| !occupied(cell))?;
        Ok(())
    }

    /// Burst particles from the eaten cell. Must be followed by `respawn`.
    pub fn consume<R: Rng>(&mut self, grid: &Grid, rng: &mut R) -> u32 {
        let (cx, cy) = self.position.center(grid.cell_size());
        self.burst.emit(cx, cy, rng);
        FOOD_POINTS
    }

    pub fn burst(&self) -> &ParticleBurst {
        &self.burst
    }

    pub fn update_particles(&mut self) {
        self.burst.update();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::particle::BURST_SIZE;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_spawn_avoids_exclusions_and_occupied() {
        let grid = Grid::standard();
        let mut rng = StdRng::seed_from_u64(5);
        let taken = Cell::new(400, 300);

        for _ in 0..200 {
            let food = Food::spawn(&grid, &mut rng, |cell| cell == taken).unwrap();
            let rect = grid.cell_rect(food.position());
            assert!(!grid.hits_exclusion(&rect));
            assert_ne!(food.position(), taken);
            assert_eq!(food.position().x % grid.cell_size(), 0);
            assert_eq!(food.position().y % grid.cell_size(), 0);
        }
    }

    #[test]
    fn test_consume_bursts_at_cell_center() {
        let grid = Grid::standard();
        let mut rng = StdRng::seed_from_u64(9);
        let mut food = Food::at(Cell::new(200, 200));

        let points = food.consume(&grid, &mut rng);
        food.respawn(&grid, &mut rng, |_| false).unwrap();

        assert_eq!(points, FOOD_POINTS);
        assert_eq!(food.burst().len(), BURST_SIZE);
        assert!(food.burst().particles().iter().all(|p| p.x == 210.0 && p.y == 210.0));
    }
}
