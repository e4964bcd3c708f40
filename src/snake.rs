use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent};

use crate::grid::{Bounds, Position};
use Direction::*;

pub const INITIAL_SCORE: u32 = 1;
pub const INITIAL_HIGH_SCORE: u32 = 1;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// Maps the steering keys, WASD in either case or arrows.
    pub fn from_key(key: &KeyEvent) -> Option<Direction> {
        match key.code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Up),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Left),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Down),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Right),
            _ => None,
        }
    }

    pub fn delta(&self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!((self, other), (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right))
    }
}

/// The player's snake. Segments are stored head first; growth is appended
/// at the tail.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    last_direction: Direction,
    score: u32,
    high_score: u32,
    growth_queue: VecDeque<Position>,
}

impl Snake {
    pub fn new(bounds: Bounds, length: u32) -> Self {
        let mut snake = Snake {
            body: VecDeque::new(),
            direction: Right,
            last_direction: Right,
            score: INITIAL_SCORE,
            high_score: INITIAL_HIGH_SCORE,
            growth_queue: VecDeque::new(),
        };
        snake.reset(bounds, length);
        snake
    }

    /// Builds a snake from explicit segments, head first. Returns `None` for
    /// an empty body.
    pub fn from_segments(segments: &[Position], direction: Direction) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }

        Some(Snake {
            body: segments.iter().copied().collect(),
            direction,
            last_direction: direction,
            score: INITIAL_SCORE,
            high_score: INITIAL_HIGH_SCORE,
            growth_queue: VecDeque::new(),
        })
    }

    /// Lays out `length` segments from the center of the grid towards the
    /// left, facing right. The high score survives; the length is clamped so
    /// the whole body fits.
    pub fn reset(&mut self, bounds: Bounds, length: u32) {
        let center = bounds.center();
        let length = length.clamp(1, (center.x + 1) as u32) as i32;
        let (dx, dy) = Right.delta();

        self.body = (0..length).map(|i| center.moved_by((-dx * i, -dy * i))).collect();
        self.direction = Right;
        self.last_direction = Right;
        self.score = INITIAL_SCORE;
        self.growth_queue.clear();
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn last_direction(&self) -> Direction {
        self.last_direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Raises the high score to at least `high_score`. Used to carry a
    /// record over into a new world.
    pub fn carry_high_score(&mut self, high_score: u32) {
        self.high_score = self.high_score.max(high_score);
    }

    pub fn pending_growth(&self) -> usize {
        self.growth_queue.len()
    }

    /// Turns the snake unless the request would reverse it. Returns whether
    /// the direction actually changed.
    pub fn request_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction == self.direction || new_direction.is_opposite(self.direction) {
            return false;
        }

        self.last_direction = self.direction;
        self.direction = new_direction;
        true
    }

    /// Follow-the-leader step: every segment takes its head-ward neighbour's
    /// cell and the head advances one cell. Returns the cell the tail left.
    pub fn advance(&mut self) -> Position {
        let new_head = self.head().moved_by(self.direction.delta());
        self.body.push_front(new_head);
        // body is never empty, so there is always a tail to pop
        self.body.pop_back().unwrap_or(new_head)
    }

    /// True if the head shares a cell with any other segment.
    pub fn head_collides(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&segment| segment == head)
    }

    /// Scores an apple and queues `growth` new segments at `tail`.
    pub fn feed(&mut self, growth: u32, tail: Position) {
        self.score += growth;
        self.high_score = self.high_score.max(self.score);
        self.growth_queue.extend((0..growth).map(|_| tail));
    }

    /// Appends the oldest queued segment, if any, to the tail.
    pub fn apply_growth(&mut self) -> bool {
        match self.growth_queue.pop_front() {
            Some(segment) => {
                self.body.push_back(segment);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_new_snake_centered_facing_right() {
        let snake = Snake::new(Bounds::new(10, 10), 3);
        let body: Vec<_> = snake.segments().copied().collect();
        assert_eq!(body, vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)]);
        assert_eq!(snake.direction(), Right);
        assert_eq!(snake.score(), 1);
        assert_eq!(snake.high_score(), 1);
        assert_eq!(snake.pending_growth(), 0);
    }

    #[test]
    fn test_initial_length_clamped_to_grid() {
        let snake = Snake::new(Bounds::new(6, 3), 20);
        assert_eq!(snake.len(), 4);
        assert!(snake.segments().all(|p| Bounds::new(6, 3).contains(*p)));

        let snake = Snake::new(Bounds::new(6, 3), 0);
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_reversal_rejected() {
        let mut snake = Snake::new(Bounds::new(10, 10), 1);
        assert!(!snake.request_direction(Left));
        assert_eq!(snake.direction(), Right);
        assert!(!snake.request_direction(Right));

        assert!(snake.request_direction(Up));
        assert_eq!(snake.direction(), Up);
        assert_eq!(snake.last_direction(), Right);
        assert!(!snake.request_direction(Down));

        let mut snake = Snake::new(Bounds::new(10, 10), 1);
        assert!(snake.request_direction(Down));
    }

    #[test]
    fn test_keys_map_to_directions() {
        assert_eq!(Direction::from_key(&key(KeyCode::Char('w'))), Some(Up));
        assert_eq!(Direction::from_key(&key(KeyCode::Char('A'))), Some(Left));
        assert_eq!(Direction::from_key(&key(KeyCode::Down)), Some(Down));
        assert_eq!(Direction::from_key(&key(KeyCode::Char('d'))), Some(Right));
        assert_eq!(Direction::from_key(&key(KeyCode::Char('q'))), None);
    }

    #[test]
    fn test_advance_follows_the_leader() {
        let mut snake = Snake::new(Bounds::new(10, 10), 3);
        let vacated = snake.advance();

        assert_eq!(vacated, Position::new(3, 5));
        let body: Vec<_> = snake.segments().copied().collect();
        assert_eq!(body, vec![Position::new(6, 5), Position::new(5, 5), Position::new(4, 5)]);

        snake.request_direction(Down);
        snake.advance();
        let body: Vec<_> = snake.segments().copied().collect();
        assert_eq!(body, vec![Position::new(6, 6), Position::new(6, 5), Position::new(5, 5)]);
    }

    #[test]
    fn test_feed_queues_growth_one_segment_at_a_time() {
        let mut snake = Snake::new(Bounds::new(10, 10), 1);
        let vacated = snake.advance();
        snake.feed(2, vacated);

        assert_eq!(snake.score(), 3);
        assert_eq!(snake.high_score(), 3);
        assert_eq!(snake.pending_growth(), 2);

        assert!(snake.apply_growth());
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.pending_growth(), 1);
    }

    #[test]
    fn test_reset_keeps_high_score() {
        let mut snake = Snake::new(Bounds::new(10, 10), 2);
        snake.feed(4, Position::new(0, 0));
        snake.request_direction(Up);
        snake.reset(Bounds::new(10, 10), 2);

        assert_eq!(snake.score(), 1);
        assert_eq!(snake.high_score(), 5);
        assert_eq!(snake.direction(), Right);
        assert_eq!(snake.pending_growth(), 0);
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn test_head_collides() {
        let snake = Snake::from_segments(
            &[Position::new(5, 5), Position::new(6, 5), Position::new(5, 5)],
            Up,
        )
        .unwrap();
        assert!(snake.head_collides());

        let snake = Snake::from_segments(&[Position::new(5, 5), Position::new(6, 5)], Up).unwrap();
        assert!(!snake.head_collides());
        assert!(Snake::from_segments(&[], Up).is_none());
    }
}
