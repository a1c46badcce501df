//! Screen buffer
//!
//! A character grid sized for a terminal pane. Rows are independent
//! heapless strings; each row can carry one highlighted column range.

use core::fmt::{self, Write};

use heapless::String;

/// Number of character rows
pub const SCREEN_ROWS: usize = 24;

/// Number of character columns
pub const SCREEN_COLS: usize = 48;

/// Maximum bytes per line
pub const LINE_LEN: usize = SCREEN_COLS;

/// Character buffer for text-mode output
#[derive(Clone)]
pub struct Screen {
    /// Row contents
    lines: [String<LINE_LEN>; SCREEN_ROWS],
    /// Highlighted (start_col, end_col) per row
    highlights: [Option<(u8, u8)>; SCREEN_ROWS],
    /// Changed since the last `mark_clean`
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new empty screen
    pub const fn new() -> Self {
        Self {
            lines: [const { String::new() }; SCREEN_ROWS],
            highlights: [None; SCREEN_ROWS],
            dirty: true,
        }
    }

    /// Clear every row and highlight
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.highlights = [None; SCREEN_ROWS];
        self.dirty = true;
    }

    /// Replace a row, truncating at a character boundary
    ///
    /// Rows past the bottom are ignored.
    pub fn set_line(&mut self, row: usize, text: &str) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        line.clear();
        for ch in text.chars() {
            if line.push(ch).is_err() {
                break;
            }
        }
        self.dirty = true;
    }

    /// Replace a row with formatted text
    pub fn write_line(&mut self, row: usize, args: fmt::Arguments<'_>) {
        let mut text = Truncating::default();
        let _ = text.write_fmt(args);
        self.set_line(row, &text.0);
    }

    /// Get the content of a row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Highlight columns `start_col..end_col` of a row
    pub fn set_highlight(&mut self, row: usize, start_col: u8, end_col: u8) {
        if row < SCREEN_ROWS && start_col < end_col {
            self.highlights[row] = Some((start_col, end_col.min(SCREEN_COLS as u8)));
            self.dirty = true;
        }
    }

    /// Get highlight region for a row
    pub fn get_highlight(&self, row: usize) -> Option<(u8, u8)> {
        self.highlights.get(row).copied().flatten()
    }

    /// Check if the screen changed since it was last presented
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark as presented
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// All rows, top to bottom
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// Find the first row containing `needle`
    pub fn find(&self, needle: &str) -> Option<usize> {
        self.lines().position(|line| line.contains(needle))
    }

    pub const fn rows(&self) -> usize {
        SCREEN_ROWS
    }

    pub const fn cols(&self) -> usize {
        SCREEN_COLS
    }
}

impl fmt::Debug for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.lines()).finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}

/// Format sink that keeps what fits and drops the rest
#[derive(Default)]
struct Truncating(String<LINE_LEN>);

impl Write for Truncating {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            if self.0.push(ch).is_err() {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut screen = Screen::new();
        screen.set_line(1, "Scan & Clean");
        assert_eq!(screen.get_line(1), Some("Scan & Clean"));
        assert_eq!(screen.get_line(0), Some(""));
        assert_eq!(screen.get_line(SCREEN_ROWS), None);
    }

    #[test]
    fn test_truncates_long_lines() {
        let mut screen = Screen::new();
        let long: heapless::String<64> = core::iter::repeat('x').take(SCREEN_COLS + 10).collect();
        screen.set_line(0, &long);
        assert_eq!(screen.get_line(0).map(str::len), Some(SCREEN_COLS));
    }

    #[test]
    fn test_truncates_on_char_boundary() {
        let mut screen = Screen::new();
        let text: heapless::String<128> = core::iter::repeat('é').take(40).collect();
        screen.set_line(0, &text);
        let line = screen.get_line(0).unwrap();
        assert_eq!(line.chars().count(), SCREEN_COLS / 2);
    }

    #[test]
    fn test_write_line() {
        let mut screen = Screen::new();
        screen.write_line(3, format_args!("Loading {}%", 42));
        assert_eq!(screen.get_line(3), Some("Loading 42%"));
        assert_eq!(screen.find("42%"), Some(3));
    }

    #[test]
    fn test_highlight_and_dirty() {
        let mut screen = Screen::new();
        screen.mark_clean();
        assert!(!screen.is_dirty());

        screen.set_highlight(2, 4, 9);
        assert!(screen.is_dirty());
        assert_eq!(screen.get_highlight(2), Some((4, 9)));

        screen.set_highlight(3, 5, 5);
        assert_eq!(screen.get_highlight(3), None);

        screen.clear();
        assert_eq!(screen.get_highlight(2), None);
    }
}
