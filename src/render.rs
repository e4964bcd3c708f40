use std::io;

use crossterm::style::Color;
use rand::Rng;

use crate::grid::{Bounds, Cell, Grid};

/// Terminal columns per grid cell.
pub const CHAR_WIDTH: u16 = 2;
/// Rows taken by the score header and the bottom border.
pub const GRID_HEIGHT_OFFSET: u16 = 4;
/// Cells given up to the side borders.
pub const GRID_WIDTH_OFFSET: u16 = 2;

/// Read-only view of the world handed to a renderer after each tick.
pub struct Frame<'a> {
    pub grid: &'a Grid,
    pub score: u32,
    pub high_score: u32,
}

/// Anything that can show a frame. Must not feed back into the world.
pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>) -> io::Result<()>;
}

/// Grid size that fits a terminal of `cols` x `rows` with its frame.
pub fn bounds_for_terminal(cols: u16, rows: u16) -> Bounds {
    let width = (cols / CHAR_WIDTH) as i32 - GRID_WIDTH_OFFSET as i32;
    let height = rows as i32 - GRID_HEIGHT_OFFSET as i32;
    Bounds::new(width, height)
}

const RAINBOW: [Color; 6] = [
    Color::AnsiValue(196), // red
    Color::AnsiValue(214), // orange
    Color::AnsiValue(226), // yellow
    Color::AnsiValue(46),  // green
    Color::AnsiValue(33),  // blue
    Color::AnsiValue(129), // purple
];

const TRANS_BLUE: Color = Color::AnsiValue(45);
const TRANS_PINK: Color = Color::AnsiValue(213);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Classic,
    Pride,
}

impl Theme {
    pub fn from_flag(pride: bool) -> Self {
        if pride { Theme::Pride } else { Theme::Classic }
    }

    /// Foreground colour for an occupied cell in column `x`; `None` for
    /// empty cells, which are drawn with the shade pattern instead.
    pub fn cell_color<R: Rng>(&self, cell: Cell, x: usize, rng: &mut R) -> Option<Color> {
        match (self, cell) {
            (_, Cell::Empty) => None,
            (Theme::Classic, Cell::Apple) => Some(Color::Red),
            (Theme::Classic, Cell::Head) => Some(Color::Green),
            (Theme::Classic, Cell::Body) => Some(Color::DarkGreen),
            (Theme::Pride, Cell::Apple) => {
                Some(if rng.gen_bool(0.5) { TRANS_BLUE } else { TRANS_PINK })
            }
            (Theme::Pride, Cell::Head | Cell::Body) => Some(RAINBOW[(x / 2) % RAINBOW.len()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_bounds_for_terminal() {
        assert_eq!(bounds_for_terminal(80, 24), Bounds::new(38, 20));
        assert_eq!(bounds_for_terminal(81, 24), Bounds::new(38, 20));
        assert_eq!(bounds_for_terminal(3, 2), Bounds::new(1, 1));
    }

    #[test]
    fn test_classic_palette() {
        let mut rng = StdRng::seed_from_u64(0);
        let theme = Theme::from_flag(false);
        assert_eq!(theme, Theme::Classic);
        assert_eq!(theme.cell_color(Cell::Empty, 0, &mut rng), None);
        assert_eq!(theme.cell_color(Cell::Apple, 0, &mut rng), Some(Color::Red));
        assert_eq!(theme.cell_color(Cell::Head, 3, &mut rng), Some(Color::Green));
    }

    #[test]
    fn test_pride_rainbow_stripes_by_column() {
        let mut rng = StdRng::seed_from_u64(0);
        let theme = Theme::from_flag(true);
        let first = theme.cell_color(Cell::Body, 0, &mut rng);
        assert_eq!(first, theme.cell_color(Cell::Head, 1, &mut rng));
        assert_ne!(first, theme.cell_color(Cell::Body, 2, &mut rng));
        assert_eq!(first, theme.cell_color(Cell::Body, 12, &mut rng));
    }

    #[test]
    fn test_pride_apples_are_blue_or_pink() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..20 {
            let color = Theme::Pride.cell_color(Cell::Apple, 0, &mut rng);
            assert!(color == Some(TRANS_BLUE) || color == Some(TRANS_PINK));
        }
    }
}
