/// A cell coordinate on the playing field. Signed so a head that steps off
/// the edge is still representable until the bounds check catches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn moved_by(&self, (dx, dy): (i32, i32)) -> Self {
        Position { x: self.x + dx, y: self.y + dy }
    }

    /// True if `other` falls inside the square exclusion zone of half-size
    /// `spacing` around this cell. A spacing of zero never conflicts, so
    /// callers that must keep cells distinct clamp it to one.
    pub fn within_spacing(&self, other: Position, spacing: i32) -> bool {
        (self.x - other.x).abs() < spacing && (self.y - other.y).abs() < spacing
    }
}

/// Playing field dimensions, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    width: i32,
    height: i32,
}

impl Bounds {
    /// Both dimensions are clamped to at least one cell.
    pub fn new(width: i32, height: i32) -> Self {
        Bounds { width: width.max(1), height: height.max(1) }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn area(&self) -> i32 {
        self.width * self.height
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Body,
    Head,
    Apple,
}

/// Row-major occupancy map derived from the snake and apples. It is only a
/// rendering cache; the world rebuilds it after every tick.
#[derive(Debug, Clone)]
pub struct Grid {
    bounds: Bounds,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(bounds: Bounds) -> Self {
        Grid { bounds, cells: vec![Cell::Empty; bounds.area() as usize] }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn cell(&self, pos: Position) -> Cell {
        self.index(pos).map_or(Cell::Empty, |i| self.cells[i])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.bounds.width as usize)
    }

    /// Clears the map and stamps apples, then the body, then the head on top.
    pub fn rebuild<'a>(
        &mut self,
        snake: impl IntoIterator<Item = &'a Position>,
        apples: impl IntoIterator<Item = &'a Position>,
    ) {
        self.cells.iter_mut().for_each(|c| *c = Cell::Empty);

        for &apple in apples {
            self.set(apple, Cell::Apple);
        }

        let mut segments = snake.into_iter();
        let head = segments.next().copied();
        for &segment in segments {
            self.set(segment, Cell::Body);
        }
        if let Some(head) = head {
            self.set(head, Cell::Head);
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn set(&mut self, pos: Position, cell: Cell) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = cell;
        }
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.bounds.contains(pos) {
            Some((pos.y * self.bounds.width + pos.x) as usize)
        } else {
            None
        }
    }
}
