use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event, KeyCode, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, stdout, Write};
use std::time::Duration;

/// Terminal surface the canvas is shown on.
///
/// Drawing goes to a back buffer; `present` writes only the cells that
/// changed since the previous frame.
pub struct Terminal {
    width: u16,
    height: u16,
    back: Vec<Vec<Cell>>,
    front: Vec<Vec<Cell>>,
    alternate_screen: bool,
}

/// A single cell in the terminal buffer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
}

impl Default for Cell {
    fn default() -> Self {
        Self { ch: ' ', fg: None }
    }
}

fn blank(width: u16, height: u16) -> Vec<Vec<Cell>> {
    vec![vec![Cell::default(); width as usize]; height as usize]
}

impl Terminal {
    /// Take over the real terminal: raw mode, alternate screen, hidden cursor
    pub fn new(alternate_screen: bool) -> io::Result<Self> {
        let (width, height) = size()?;

        if alternate_screen {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Hide)?;
        }

        let mut term = Self::with_size(width, height);
        term.alternate_screen = alternate_screen;
        Ok(term)
    }

    /// An off-screen buffer of a fixed size, for printing
    pub fn with_size(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            back: blank(width, height),
            // forces the first present to draw every cell
            front: Vec::new(),
            alternate_screen: false,
        }
    }

    /// Get terminal dimensions
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.back = blank(width, height);
        self.front.clear();
    }

    /// Clear the back buffer
    pub fn clear(&mut self) {
        for row in &mut self.back {
            row.fill(Cell::default());
        }
    }

    /// Clear the actual terminal
    pub fn clear_screen(&mut self) -> io::Result<()> {
        execute!(stdout(), Clear(ClearType::All))?;
        self.front.clear();
        Ok(())
    }

    /// Set a character at position with optional color
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.back[y as usize][x as usize] = Cell { ch, fg };
        }
    }

    #[cfg(test)]
    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.back.get(y as usize)?.get(x as usize).copied()
    }

    /// Write changed cells to the screen
    pub fn present(&mut self) -> io::Result<()> {
        let mut out = stdout().lock();
        self.present_to(&mut out)
    }

    /// Write the cells that differ from the last presented frame
    pub fn present_to<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        for (y, row) in self.back.iter().enumerate() {
            let previous = self.front.get(y);
            for (x, cell) in row.iter().enumerate() {
                if previous.and_then(|r| r.get(x)) == Some(cell) {
                    continue;
                }

                queue!(out, MoveTo(x as u16, y as u16))?;
                match cell.fg {
                    Some(color) => queue!(out, SetForegroundColor(color), Print(cell.ch), ResetColor)?,
                    None => queue!(out, Print(cell.ch))?,
                }
            }
        }

        out.flush()?;
        self.front.clone_from(&self.back);
        Ok(())
    }

    /// Wait up to `timeout` for a keypress, returns (code, modifiers)
    pub fn wait_key(&self, timeout: Duration) -> io::Result<Option<(KeyCode, KeyModifiers)>> {
        if poll(timeout)? {
            if let Event::Key(key_event) = read()? {
                return Ok(Some((key_event.code, key_event.modifiers)));
            }
        }
        Ok(None)
    }

    /// Write the back buffer with ANSI colors (for print mode)
    pub fn write_ansi<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for row in &self.back {
            // trailing blanks only pad the line
            let used = row.iter().rposition(|c| c.ch != ' ').map_or(0, |i| i + 1);

            for cell in &row[..used] {
                match cell.fg {
                    Some(Color::Rgb { r, g, b }) => {
                        write!(out, "\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, cell.ch)?
                    }
                    Some(Color::AnsiValue(v)) => write!(out, "\x1b[38;5;{}m{}\x1b[0m", v, cell.ch)?,
                    _ => write!(out, "{}", cell.ch)?,
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Print back buffer to stdout (for print mode)
    pub fn print_to_stdout(&self) -> io::Result<()> {
        let mut out = stdout().lock();
        self.write_ansi(&mut out)?;
        out.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.alternate_screen {
            let _ = execute!(stdout(), ResetColor, Show, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        }
    }
}

/// Helper to create RGB colors
pub fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}
