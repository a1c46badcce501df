//! Display backend trait

use crate::screen::Screen;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Writing to the output failed
    Communication,
    /// Row or column outside the display
    InvalidCoordinates,
    /// Backend not ready yet
    NotInitialized,
}

/// Something that can show rows of characters
///
/// The simulator draws to a terminal; tests record calls in memory.
pub trait DisplayBackend {
    /// Clear the entire display
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text starting at `row`, `col` (character units, 0-based)
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Emphasise columns `start_col..end_col` of a row
    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError>;

    /// Push buffered content out
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Size as (columns, rows)
    fn dimensions(&self) -> (u8, u8);

    /// Check if the display can accept output
    fn is_ready(&self) -> bool {
        true
    }

    /// Draw a whole screen buffer
    ///
    /// Empty rows are skipped. Rows past the backend's height are dropped.
    fn present(&mut self, screen: &Screen) -> Result<(), DisplayError> {
        if !self.is_ready() {
            return Err(DisplayError::NotInitialized);
        }

        let (_, rows) = self.dimensions();
        self.clear()?;

        for (row, line) in screen.lines().enumerate().take(rows as usize) {
            let row = row as u8;
            if !line.is_empty() {
                self.draw_text(row, 0, line)?;
            }
            if let Some((start, end)) = screen.get_highlight(row as usize) {
                self.invert_region(row, start, end)?;
            }
        }

        self.flush()
    }
}
