use std::io::{self, Stdout, Write, stdout};
use std::time::Duration;

use crossterm::{cursor, execute, queue, terminal};
use crossterm::event::{Event, KeyEvent, KeyEventKind, poll, read};
use crossterm::style::{Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

use crate::grid::{Bounds, Cell};
use crate::render::{bounds_for_terminal, CHAR_WIDTH, Frame, Renderer, Theme};
use crate::scheduler::InputSource;

const FULL_SHADE: char = '█';
const MEDIUM_SHADE: char = '▒';

/// Owns stdout while the game runs: raw mode, the alternate screen, input
/// polling and frame drawing.
pub struct TermManager {
    width: u16,
    stdout: Stdout,
    theme: Theme,
    drawn: Option<Bounds>,
}

impl TermManager {
    pub fn new() -> io::Result<Self> {
        let (width, _) = terminal::size()?;
        Ok(TermManager { width, stdout: stdout(), theme: Theme::Classic, drawn: None })
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
    }

    pub fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Re-reads the terminal size; the grid that fits it.
    pub fn grid_bounds(&mut self) -> io::Result<Bounds> {
        let (width, height) = terminal::size()?;
        self.width = width;
        Ok(bounds_for_terminal(width, height))
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    /// Blocks until a key is pressed. Resize events update the cached size.
    pub fn read_key_blocking(&mut self) -> io::Result<KeyEvent> {
        loop {
            match read()? {
                Event::Key(ev) if ev.kind == KeyEventKind::Press => return Ok(ev),
                Event::Resize(w, _) => self.width = w,
                _ => {}
            }
        }
    }

    pub fn clear(&mut self) -> io::Result<()> {
        self.drawn = None;
        execute!(self.stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))
    }

    /// Writes `lines` from the top-left corner, clearing the screen first.
    pub fn show_lines(&mut self, lines: &[String]) -> io::Result<()> {
        self.clear()?;
        for (y, line) in lines.iter().enumerate() {
            queue!(self.stdout, cursor::MoveTo(0, y as u16), Print(line))?;
        }
        self.flush()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn bar(&self) -> String {
        FULL_SHADE.to_string().repeat(self.width as usize)
    }

    fn score_line(&self, score: u32, high_score: u32) -> String {
        let border = FULL_SHADE.to_string().repeat(CHAR_WIDTH as usize);
        let text = format!("{border}Score: {score}{border}High Score: {high_score}");
        let fill = (self.width as usize).saturating_sub(text.chars().count());
        format!("{text}{}", FULL_SHADE.to_string().repeat(fill))
    }
}

impl InputSource for TermManager {
    fn poll_event(&mut self) -> io::Result<Option<Event>> {
        if poll(Duration::ZERO)? {
            return read().map(Some);
        }
        Ok(None)
    }
}

impl Renderer for TermManager {
    fn render(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        let bounds = frame.grid.bounds();
        if self.drawn != Some(bounds) {
            self.width = terminal::size()?.0;
            self.clear()?;
            self.drawn = Some(bounds);
        }

        let mut rng = rand::thread_rng();
        let bar = self.bar();
        let side = FULL_SHADE.to_string().repeat(CHAR_WIDTH as usize);
        let cell_width = CHAR_WIDTH as usize;
        let right_fill = (self.width as usize)
            .saturating_sub(cell_width + bounds.width() as usize * cell_width);

        queue!(self.stdout, cursor::MoveTo(0, 0), Print(&bar))?;
        let score_line = self.score_line(frame.score, frame.high_score);
        queue!(self.stdout, cursor::MoveTo(0, 1), Print(score_line))?;
        queue!(self.stdout, cursor::MoveTo(0, 2), Print(&bar))?;

        let mut y = 3;
        for row in frame.grid.rows() {
            queue!(self.stdout, cursor::MoveTo(0, y), Print(&side))?;

            for (x, &cell) in row.iter().enumerate() {
                let glyph = if cell == Cell::Empty { MEDIUM_SHADE } else { FULL_SHADE };
                let pair = glyph.to_string().repeat(cell_width);

                match self.theme.cell_color(cell, x, &mut rng) {
                    Some(color) => queue!(
                        self.stdout,
                        SetForegroundColor(color),
                        Print(pair),
                        ResetColor
                    )?,
                    None => queue!(self.stdout, Print(pair))?,
                }
            }

            queue!(self.stdout, Print(FULL_SHADE.to_string().repeat(right_fill)))?;
            y += 1;
        }

        queue!(self.stdout, cursor::MoveTo(0, y), Print(&bar))?;
        self.flush()
    }
}
