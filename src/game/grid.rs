use rand::Rng;

use crate::error::GameError;

/// Playfield width in pixels
pub const SCREEN_WIDTH: i32 = 800;
/// Playfield height in pixels
pub const SCREEN_HEIGHT: i32 = 600;
/// Size of one grid cell in pixels
pub const CELL_SIZE: i32 = 20;

/// Upper bound on rejection-sampling draws before giving up
pub const MAX_SPAWN_ATTEMPTS: u32 = 10_000;

/// A grid-aligned position in pixels. Both coordinates are multiples of the
/// cell size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move by a delta expressed in pixels
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Pixel centre of the cell
    pub fn center(&self, cell_size: i32) -> (f32, f32) {
        let half = cell_size as f32 / 2.0;
        (self.x as f32 + half, self.y as f32 + half)
    }
}

/// Axis-aligned rectangle in pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square covering a single cell
    pub fn from_cell(cell: Cell, cell_size: i32) -> Self {
        Self::new(
            cell.x as f32,
            cell.y as f32,
            cell_size as f32,
            cell_size as f32,
        )
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap test: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

/// The fixed playfield: its size, cell size and the screen regions that
/// food must never occupy.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: i32,
    height: i32,
    cell_size: i32,
    pause_rect: Rect,
    score_rect: Rect,
}

impl Default for Grid {
    fn default() -> Self {
        Self::standard()
    }
}

impl Grid {
    /// The 800x600 board with 20px cells used by the game
    pub fn standard() -> Self {
        Self::new(
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
            CELL_SIZE,
            Rect::new((SCREEN_WIDTH - 60) as f32, 20.0, 40.0, 40.0),
            Rect::new(0.0, 0.0, 150.0, 50.0),
        )
    }

    pub fn new(width: i32, height: i32, cell_size: i32, pause_rect: Rect, score_rect: Rect) -> Self {
        Self {
            width,
            height,
            cell_size,
            pause_rect,
            score_rect,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Region of the on-screen pause control
    pub fn pause_rect(&self) -> Rect {
        self.pause_rect
    }

    /// Region of the score readout
    pub fn score_rect(&self) -> Rect {
        self.score_rect
    }

    pub fn exclusions(&self) -> [Rect; 2] {
        [self.pause_rect, self.score_rect]
    }

    /// True if the rectangle intersects any exclusion zone
    pub fn hits_exclusion(&self, rect: &Rect) -> bool {
        self.exclusions().iter().any(|zone| zone.overlaps(rect))
    }

    /// Cell-aligned centre of the board
    pub fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    pub fn cell_rect(&self, cell: Cell) -> Rect {
        Rect::from_cell(cell, self.cell_size)
    }

    /// Draw cell-aligned origins for a `cols_wide` x 1 footprint until one is
    /// accepted. The footprint always lies inside the board and never touches
    /// an exclusion zone; `accept` can reject further candidates.
    pub fn sample_origin<R, F>(&self, rng: &mut R, cols_wide: i32, mut accept: F) -> Result<Cell, GameError>
    where
        R: Rng,
        F: FnMut(Cell) -> bool,
    {
        let footprint_w = cols_wide * self.cell_size;
        let columns = (self.width - footprint_w) / self.cell_size + 1;
        let rows = (self.height - self.cell_size) / self.cell_size + 1;
        if columns <= 0 || rows <= 0 {
            return Err(GameError::NoFreeCell { attempts: 0 });
        }

        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let origin = Cell::new(
                rng.random_range(0..columns) * self.cell_size,
                rng.random_range(0..rows) * self.cell_size,
            );
            let footprint = Rect::new(
                origin.x as f32,
                origin.y as f32,
                footprint_w as f32,
                self.cell_size as f32,
            );
            if !self.hits_exclusion(&footprint) && accept(origin) {
                return Ok(origin);
            }
        }

        Err(GameError::NoFreeCell {
            attempts: MAX_SPAWN_ATTEMPTS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_rect_overlap_is_strict() {
        let a = Rect::new(0.0, 0.0, 20.0, 20.0);
        let touching = Rect::new(20.0, 0.0, 20.0, 20.0);
        let inside = Rect::new(10.0, 10.0, 20.0, 20.0);

        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::standard();

        assert!(grid.in_bounds(Cell::new(0, 0)));
        assert!(grid.in_bounds(Cell::new(780, 580)));
        assert!(!grid.in_bounds(Cell::new(800, 0)));
        assert!(!grid.in_bounds(Cell::new(0, 600)));
        assert!(!grid.in_bounds(Cell::new(-20, 0)));
    }

    #[test]
    fn test_center_is_cell_aligned() {
        let grid = Grid::standard();
        let center = grid.center();

        assert_eq!(center, Cell::new(400, 300));
        assert_eq!(center.x % CELL_SIZE, 0);
        assert_eq!(center.y % CELL_SIZE, 0);
    }

    #[test]
    fn test_samples_avoid_exclusions() {
        let grid = Grid::standard();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let cell = grid.sample_origin(&mut rng, 1, |_| true).unwrap();
            assert!(grid.in_bounds(cell));
            assert!(!grid.hits_exclusion(&grid.cell_rect(cell)));
        }
    }

    #[test]
    fn test_sampling_gives_up_on_crowded_grid() {
        // The score readout covers the whole board.
        let grid = Grid::new(
            40,
            40,
            20,
            Rect::new(100.0, 100.0, 10.0, 10.0),
            Rect::new(0.0, 0.0, 40.0, 40.0),
        );
        let mut rng = StdRng::seed_from_u64(1);

        let result = grid.sample_origin(&mut rng, 1, |_| true);
        assert_eq!(
            result,
            Err(GameError::NoFreeCell {
                attempts: MAX_SPAWN_ATTEMPTS
            })
        );
    }
}
