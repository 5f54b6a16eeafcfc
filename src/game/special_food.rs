use std::time::Duration;

use rand::Rng;
use rand::seq::IndexedRandom;

use super::grid::{Grid, Rect};
use super::particle::ParticleBurst;
use crate::error::GameError;

/// Points awarded for the special food
pub const SPECIAL_POINTS: u32 = 20;
/// Delay between a despawn and the next spawn
pub const SPECIAL_COOLDOWN: Duration = Duration::from_millis(4000);
/// Width of the footprint in cells
const FOOTPRINT_CELLS: i32 = 2;
/// Candidate speeds per axis, in pixels per tick
const SPEEDS: [f32; 4] = [-5.0, -4.0, 4.0, 5.0];

/// A two-cell pickup that drifts across the board and bounces off the
/// edges and the exclusion zones.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialFood {
    x: f32,
    y: f32,
    dx: f32,
    dy: f32,
}

impl SpecialFood {
    pub fn spawn<R: Rng>(grid: &Grid, rng: &mut R) -> Result<Self, GameError> {
        let origin = grid.sample_origin(rng, FOOTPRINT_CELLS, |_| true)?;
        // SPEEDS is non-empty, so choose never returns None.
        let dx = SPEEDS.choose(rng).copied().unwrap_or(SPEEDS[0]);
        let dy = SPEEDS.choose(rng).copied().unwrap_or(SPEEDS[0]);
        Ok(Self {
            x: origin.x as f32,
            y: origin.y as f32,
            dx,
            dy,
        })
    }

    /// Special food at a fixed origin and velocity
    pub fn with_motion(x: f32, y: f32, dx: f32, dy: f32) -> Self {
        Self { x, y, dx, dy }
    }

    pub fn origin(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn velocity(&self) -> (f32, f32) {
        (self.dx, self.dy)
    }

    pub fn footprint(&self, grid: &Grid) -> Rect {
        let cell = grid.cell_size() as f32;
        Rect::new(self.x, self.y, cell * FOOTPRINT_CELLS as f32, cell)
    }

    fn max_x(grid: &Grid) -> f32 {
        (grid.width() - FOOTPRINT_CELLS * grid.cell_size()) as f32
    }

    fn max_y(grid: &Grid) -> f32 {
        (grid.height() - grid.cell_size()) as f32
    }

    /// Footprint inside the board and clear of every exclusion zone
    pub fn fits(&self, grid: &Grid) -> bool {
        (0.0..=Self::max_x(grid)).contains(&self.x)
            && (0.0..=Self::max_y(grid)).contains(&self.y)
            && !grid.hits_exclusion(&self.footprint(grid))
    }

    /// Integrate one tick. Crossing an edge reflects that axis; landing on an
    /// exclusion zone reflects both axes and steps back. If the escape step
    /// still does not fit, the food stays at its last valid origin.
    pub fn update(&mut self, grid: &Grid) {
        let (prev_x, prev_y) = (self.x, self.y);

        self.x += self.dx;
        self.y += self.dy;
        if self.x < 0.0 || self.x > Self::max_x(grid) {
            self.dx = -self.dx;
            self.x += self.dx;
        }
        if self.y < 0.0 || self.y > Self::max_y(grid) {
            self.dy = -self.dy;
            self.y += self.dy;
        }

        if grid.hits_exclusion(&self.footprint(grid)) {
            self.dx = -self.dx;
            self.dy = -self.dy;
            self.x += self.dx;
            self.y += self.dy;
        }

        if !self.fits(grid) {
            self.x = prev_x;
            self.y = prev_y;
        }
    }

    /// Centre of the footprint
    pub fn center(&self, grid: &Grid) -> (f32, f32) {
        let cell = grid.cell_size() as f32;
        (self.x + cell, self.y + cell / 2.0)
    }
}

/// Special food lifecycle: absent (cooling down since a timestamp) or active
#[derive(Debug, Clone, PartialEq)]
pub enum SpecialFoodState {
    Absent { since: Duration },
    Active(SpecialFood),
}

/// Owns the special food, its cooldown and the particles of the last pickup
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialFoodSlot {
    state: SpecialFoodState,
    burst: ParticleBurst,
}

impl SpecialFoodSlot {
    /// Empty slot whose cooldown started at `now`
    pub fn new(now: Duration) -> Self {
        Self {
            state: SpecialFoodState::Absent { since: now },
            burst: ParticleBurst::new(),
        }
    }

    pub fn state(&self) -> &SpecialFoodState {
        &self.state
    }

    pub fn active(&self) -> Option<&SpecialFood> {
        match &self.state {
            SpecialFoodState::Active(food) => Some(food),
            SpecialFoodState::Absent { .. } => None,
        }
    }

    pub fn burst(&self) -> &ParticleBurst {
        &self.burst
    }

    /// Restart the cooldown clock without spawning
    pub fn reset_cooldown(&mut self, now: Duration) {
        if let SpecialFoodState::Absent { since } = &mut self.state {
            *since = now;
        }
    }

    /// Spawn if absent and the cooldown has elapsed. Returns true on spawn.
    pub fn maybe_spawn<R: Rng>(&mut self, now: Duration, grid: &Grid, rng: &mut R) -> Result<bool, GameError> {
        match self.state {
            SpecialFoodState::Absent { since } if now.saturating_sub(since) >= SPECIAL_COOLDOWN => {
                self.state = SpecialFoodState::Active(SpecialFood::spawn(grid, rng)?);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Place a specific special food, replacing whatever is there
    pub fn activate(&mut self, food: SpecialFood) {
        self.state = SpecialFoodState::Active(food);
    }

    /// Eat the special food if `head` overlaps its footprint. Bursts
    /// particles, despawns and restarts the cooldown. Returns the points.
    pub fn try_consume<R: Rng>(&mut self, head: &Rect, now: Duration, grid: &Grid, rng: &mut R) -> Option<u32> {
        let food = self.active()?;
        if !food.footprint(grid).overlaps(head) {
            return None;
        }

        let (cx, cy) = food.center(grid);
        self.burst.emit(cx, cy, rng);
        self.state = SpecialFoodState::Absent { since: now };
        Some(SPECIAL_POINTS)
    }

    /// Move the active food and age the particles
    pub fn update(&mut self, grid: &Grid) {
        if let SpecialFoodState::Active(food) = &mut self.state {
            food.update(grid);
        }
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
    fn test_spawn_fits_and_has_fast_velocity() {
        let grid = Grid::standard();
        let mut rng = StdRng::seed_from_u64(21);

        for _ in 0..200 {
            let food = SpecialFood::spawn(&grid, &mut rng).unwrap();
            assert!(food.fits(&grid));
            let (dx, dy) = food.velocity();
            assert!(SPEEDS.contains(&dx));
            assert!(SPEEDS.contains(&dy));
        }
    }

    #[test]
    fn test_bounces_off_right_edge() {
        let grid = Grid::standard();
        let mut food = SpecialFood::with_motion(758.0, 300.0, 5.0, 4.0);
        food.update(&grid);

        assert_eq!(food.velocity(), (-5.0, 4.0));
        assert_eq!(food.origin(), (758.0, 304.0));
        assert!(food.fits(&grid));
    }

    #[test]
    fn test_bounces_off_top_edge() {
        let grid = Grid::standard();
        let mut food = SpecialFood::with_motion(400.0, 2.0, 4.0, -5.0);
        food.update(&grid);

        assert_eq!(food.velocity(), (4.0, 5.0));
        assert_eq!(food.origin(), (404.0, 2.0));
    }

    #[test]
    fn test_escapes_exclusion_zone() {
        let grid = Grid::standard();
        // Moving left into the score readout (0..150 x 0..50).
        let mut food = SpecialFood::with_motion(152.0, 30.0, -5.0, 4.0);
        food.update(&grid);

        assert_eq!(food.velocity(), (5.0, -4.0));
        assert!(food.fits(&grid));
    }

    #[test]
    fn test_footprint_never_enters_exclusions() {
        let grid = Grid::standard();
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut food = SpecialFood::spawn(&grid, &mut rng).unwrap();
            for _ in 0..500 {
                food.update(&grid);
                assert!(food.fits(&grid), "seed {seed}: {:?}", food);
            }
        }
    }

    #[test]
    fn test_cooldown_gates_spawn() {
        let grid = Grid::standard();
        let mut rng = StdRng::seed_from_u64(2);
        let mut slot = SpecialFoodSlot::new(Duration::from_secs(10));

        assert!(!slot.maybe_spawn(Duration::from_millis(13_999), &grid, &mut rng).unwrap());
        assert!(slot.active().is_none());
        assert!(slot.maybe_spawn(Duration::from_millis(14_000), &grid, &mut rng).unwrap());
        assert!(slot.active().is_some());
        // Already active: nothing changes.
        assert!(!slot.maybe_spawn(Duration::from_secs(60), &grid, &mut rng).unwrap());
    }

    #[test]
    fn test_consume_despawns_and_restarts_cooldown() {
        let grid = Grid::standard();
        let mut rng = StdRng::seed_from_u64(4);
        let mut slot = SpecialFoodSlot::new(Duration::ZERO);
        slot.activate(SpecialFood::with_motion(400.0, 300.0, 4.0, 4.0));

        let miss = Rect::new(360.0, 300.0, 20.0, 20.0);
        assert_eq!(slot.try_consume(&miss, Duration::from_secs(5), &grid, &mut rng), None);

        let head = Rect::new(420.0, 300.0, 20.0, 20.0);
        let eaten_at = Duration::from_secs(5);
        assert_eq!(slot.try_consume(&head, eaten_at, &grid, &mut rng), Some(SPECIAL_POINTS));
        assert_eq!(slot.state(), &SpecialFoodState::Absent { since: eaten_at });
        assert_eq!(slot.burst().len(), BURST_SIZE);
        assert!(slot.burst().particles().iter().all(|p| p.x == 420.0 && p.y == 310.0));

        assert!(!slot.maybe_spawn(Duration::from_millis(8_999), &grid, &mut rng).unwrap());
        assert!(slot.maybe_spawn(Duration::from_millis(9_000), &grid, &mut rng).unwrap());
    }
}
