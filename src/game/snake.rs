use super::direction::Direction;
use super::grid::Cell;

/// The player's snake: a head cell plus the trail of cells it has left
/// behind, most recent first.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    head: Cell,
    body: Vec<Cell>,
    direction: Direction,
    next_direction: Direction,
    grow: bool,
    step: i32,
}

impl Snake {
    /// A bodiless snake at `head`, moving `direction`, stepping `step` pixels
    pub fn new(head: Cell, direction: Direction, step: i32) -> Self {
        Self {
            head,
            body: Vec::new(),
            direction,
            next_direction: direction,
            grow: false,
            step,
        }
    }

    pub fn head(&self) -> Cell {
        self.head
    }

    /// Body segments, excluding the head
    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn buffered_direction(&self) -> Direction {
        self.next_direction
    }

    pub fn is_growing(&self) -> bool {
        self.grow
    }

    /// Queue a turn for the next move. A reversal of the current direction is
    /// ignored.
    pub fn buffer_direction(&mut self, direction: Direction) {
        if !self.direction.is_opposite(direction) {
            self.next_direction = direction;
        }
    }

    /// Keep the tail on the next move
    pub fn mark_grow(&mut self) {
        self.grow = true;
    }

    /// Move one cell: commit the buffered turn, leave the old head behind as
    /// the first body segment, drop the tail unless growing, then step.
    pub fn advance(&mut self) {
        if !self.direction.is_opposite(self.next_direction) {
            self.direction = self.next_direction;
        }

        self.body.insert(0, self.head);
        if self.grow {
            self.grow = false;
        } else {
            self.body.pop();
        }

        let (dx, dy) = self.direction.delta();
        self.head = self.head.moved_by(dx * self.step, dy * self.step);
    }

    /// True if `cell` is any body segment (the head is not included)
    pub fn collides_with_body(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// True if `cell` is the head or a body segment
    pub fn occupies(&self, cell: Cell) -> bool {
        self.head == cell || self.collides_with_body(cell)
    }

    /// Number of body segments
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake_at_origin() -> Snake {
        Snake::new(Cell::new(100, 100), Direction::Right, 20)
    }

    #[test]
    fn test_advance_moves_one_cell() {
        let mut snake = snake_at_origin();
        snake.advance();

        assert_eq!(snake.head(), Cell::new(120, 100));
        assert!(snake.is_empty());
    }

    #[test]
    fn test_grow_keeps_tail_once() {
        let mut snake = snake_at_origin();
        snake.mark_grow();
        snake.mark_grow();
        snake.advance();

        assert_eq!(snake.len(), 1);
        assert_eq!(snake.body(), &[Cell::new(100, 100)]);
        assert!(!snake.is_growing());

        snake.advance();
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.body(), &[Cell::new(120, 100)]);
    }

    #[test]
    fn test_body_follows_head_trail() {
        let mut snake = snake_at_origin();
        snake.mark_grow();
        snake.advance();
        snake.mark_grow();
        snake.buffer_direction(Direction::Down);
        snake.advance();

        // The buffered turn is committed before the step.
        assert_eq!(snake.head(), Cell::new(120, 120));
        assert_eq!(snake.direction(), Direction::Down);
        assert_eq!(snake.body(), &[Cell::new(120, 100), Cell::new(100, 100)]);
    }

    #[test]
    fn test_reversal_is_ignored() {
        let mut snake = snake_at_origin();
        snake.buffer_direction(Direction::Right);
        snake.buffer_direction(Direction::Left);
        snake.advance();

        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.head(), Cell::new(120, 100));
    }

    #[test]
    fn test_reversal_checked_against_current_direction() {
        let mut snake = snake_at_origin();
        // Up is buffered but not committed; Left is still a reversal of Right.
        snake.buffer_direction(Direction::Up);
        snake.buffer_direction(Direction::Left);

        assert_eq!(snake.buffered_direction(), Direction::Up);
        snake.advance();
        assert_eq!(snake.direction(), Direction::Up);
    }

    #[test]
    fn test_occupancy() {
        let mut snake = snake_at_origin();
        snake.mark_grow();
        snake.advance();

        assert!(snake.occupies(Cell::new(120, 100)));
        assert!(snake.occupies(Cell::new(100, 100)));
        assert!(!snake.collides_with_body(Cell::new(120, 100)));
        assert!(!snake.occupies(Cell::new(0, 0)));
    }
}
