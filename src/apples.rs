use log::debug;
use rand::Rng;

use crate::grid::{Bounds, Position};
use crate::snake::Snake;

pub const MIN_APPLES: usize = 1;
/// Random samples tried per placement before giving up.
pub const PLACEMENT_ATTEMPTS: usize = 100;

/// Apples on the field plus the number the world tries to keep there.
#[derive(Debug, Clone)]
pub struct AppleManager {
    positions: Vec<Position>,
    target: usize,
}

impl AppleManager {
    pub fn new(bounds: Bounds, density: u32) -> Self {
        AppleManager { positions: vec![], target: Self::compute_initial_count(bounds, density) }
    }

    /// Starts from a fixed set of apples, keeping the count at its size.
    pub fn with_apples(positions: Vec<Position>) -> Self {
        let target = positions.len().max(MIN_APPLES);
        AppleManager { positions, target }
    }

    pub fn compute_initial_count(bounds: Bounds, density: u32) -> usize {
        let area = bounds.area() as usize;
        (area / density.max(1) as usize).max(MIN_APPLES)
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }

    /// Clears the field and places up to `target` apples around `snake`.
    pub fn reset<R: Rng>(&mut self, rng: &mut R, bounds: Bounds, snake: &Snake, spacing: u32) {
        self.positions.clear();
        for _ in 0..self.target {
            self.place_one(rng, bounds, snake, spacing);
        }
    }

    /// Samples random cells until one is at least `spacing` away, on some
    /// axis, from every snake segment and every apple. Occupied cells are
    /// always rejected, even with a spacing of zero. Gives up quietly after
    /// `PLACEMENT_ATTEMPTS` samples.
    pub fn place_one<R: Rng>(
        &mut self,
        rng: &mut R,
        bounds: Bounds,
        snake: &Snake,
        spacing: u32,
    ) -> Option<Position> {
        let spacing = (spacing as i32).max(1);

        for _ in 0..PLACEMENT_ATTEMPTS {
            let candidate = Position::new(
                rng.gen_range(0..bounds.width()),
                rng.gen_range(0..bounds.height()),
            );

            let crowded = snake
                .segments()
                .chain(self.positions.iter())
                .any(|&occupied| occupied.within_spacing(candidate, spacing));

            if !crowded {
                self.positions.push(candidate);
                return Some(candidate);
            }
        }

        debug!("no room for an apple after {} attempts", PLACEMENT_ATTEMPTS);
        None
    }

    pub fn remove_at(&mut self, pos: Position) -> bool {
        let before = self.positions.len();
        self.positions.retain(|&apple| apple != pos);
        self.positions.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction;
    use rand::{rngs::StdRng, SeedableRng};

    fn lone_snake(x: i32, y: i32) -> Snake {
        Snake::from_segments(&[Position::new(x, y)], Direction::Right).unwrap()
    }

    #[test]
    fn test_compute_initial_count() {
        assert_eq!(AppleManager::compute_initial_count(Bounds::new(40, 20), 100), 8);
        assert_eq!(AppleManager::compute_initial_count(Bounds::new(5, 5), 100), 1);
        assert_eq!(AppleManager::compute_initial_count(Bounds::new(10, 10), 0), 100);
    }

    #[test]
    fn test_placement_respects_spacing() {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = Bounds::new(30, 30);
        let snake = lone_snake(15, 15);
        let mut apples = AppleManager::new(bounds, 100);

        for _ in 0..5 {
            apples.place_one(&mut rng, bounds, &snake, 3);
        }

        let placed = apples.positions();
        assert!(!placed.is_empty());
        for (i, apple) in placed.iter().enumerate() {
            assert!(bounds.contains(*apple));
            assert!(!apple.within_spacing(snake.head(), 3));
            for other in &placed[i + 1..] {
                assert!(!apple.within_spacing(*other, 3));
            }
        }
    }

    #[test]
    fn test_placement_gives_up_when_crowded() {
        let mut rng = StdRng::seed_from_u64(1);
        let bounds = Bounds::new(3, 3);
        let snake = lone_snake(1, 1);
        let mut apples = AppleManager::with_apples(vec![]);

        assert_eq!(apples.place_one(&mut rng, bounds, &snake, 3), None);
        assert!(apples.is_empty());
    }

    #[test]
    fn test_zero_spacing_never_stacks() {
        let mut rng = StdRng::seed_from_u64(5);
        let bounds = Bounds::new(3, 3);
        let snake = lone_snake(1, 1);
        let mut apples = AppleManager::with_apples(vec![]);

        for _ in 0..8 {
            apples.place_one(&mut rng, bounds, &snake, 0);
        }

        let placed = apples.positions();
        assert!(placed.len() >= 7);
        for (i, apple) in placed.iter().enumerate() {
            assert_ne!(*apple, snake.head());
            assert!(!placed[i + 1..].contains(apple));
        }

        apples.place_one(&mut rng, bounds, &snake, 0);
        apples.place_one(&mut rng, bounds, &snake, 0);
        assert!(apples.len() <= 8);
    }

    #[test]
    fn test_reset_fills_to_target() {
        let mut rng = StdRng::seed_from_u64(3);
        let bounds = Bounds::new(40, 20);
        let snake = lone_snake(20, 10);
        let mut apples = AppleManager::new(bounds, 200);

        apples.reset(&mut rng, bounds, &snake, 1);
        assert_eq!(apples.target(), 4);
        assert_eq!(apples.len(), 4);

        apples.reset(&mut rng, bounds, &snake, 1);
        assert_eq!(apples.len(), 4);
    }

    #[test]
    fn test_remove_at() {
        let mut apples = AppleManager::with_apples(vec![Position::new(1, 1), Position::new(4, 4)]);
        assert!(apples.remove_at(Position::new(1, 1)));
        assert!(!apples.remove_at(Position::new(1, 1)));
        assert!(!apples.contains(Position::new(1, 1)));
        assert_eq!(apples.len(), 1);
        assert_eq!(apples.target(), 2);
    }
}
