use super::direction::Direction;
use super::grid::{Cell, Rect};
use super::particle::Particle;

/// Draw calls a session emits for one frame, in painter's order.
///
/// The window shell implements this with macroquad; tests record the calls.
pub trait Canvas {
    fn background(&mut self);
    fn food(&mut self, cell: Cell);
    fn special_food(&mut self, footprint: Rect);
    fn particle(&mut self, particle: &Particle);
    fn snake_head(&mut self, cell: Cell, facing: Direction);
    fn snake_segment(&mut self, cell: Cell);
    fn score(&mut self, score: u32, area: Rect);
    fn pause_icon(&mut self, area: Rect);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Background,
    Food(Cell),
    SpecialFood(Rect),
    Particle,
    SnakeHead(Cell, Direction),
    SnakeSegment(Cell),
    Score(u32),
    PauseIcon,
}

/// Canvas that remembers what it was asked to draw
#[derive(Debug, Default, Clone)]
pub struct DrawLog {
    pub calls: Vec<DrawCall>,
}

impl Canvas for DrawLog {
    fn background(&mut self) {
        self.calls.push(DrawCall::Background);
    }

    fn food(&mut self, cell: Cell) {
        self.calls.push(DrawCall::Food(cell));
    }

    fn special_food(&mut self, footprint: Rect) {
        self.calls.push(DrawCall::SpecialFood(footprint));
    }

    fn particle(&mut self, _particle: &Particle) {
        self.calls.push(DrawCall::Particle);
    }

    fn snake_head(&mut self, cell: Cell, facing: Direction) {
        self.calls.push(DrawCall::SnakeHead(cell, facing));
    }

    fn snake_segment(&mut self, cell: Cell) {
        self.calls.push(DrawCall::SnakeSegment(cell));
    }

    fn score(&mut self, score: u32, _area: Rect) {
        self.calls.push(DrawCall::Score(score));
    }

    fn pause_icon(&mut self, _area: Rect) {
        self.calls.push(DrawCall::PauseIcon);
    }
}
