//! Terminal display
//!
//! `TerminalBackend` draws a `Screen` to any `io::Write`, using ANSI reverse
//! video for highlighted regions. The display task redraws whenever the site
//! task publishes a new frame.

use std::io::{self, Write};

use tracing::{info, warn};
use zbot_display::{DisplayBackend, DisplayError, SCREEN_COLS, SCREEN_ROWS};

use crate::channels::{SCREEN_BUFFER, SCREEN_UPDATE};

const CLEAR: &str = "\x1b[2J\x1b[H";
const REVERSE: &str = "\x1b[7m";
const RESET: &str = "\x1b[0m";

/// Character display backed by a writer
pub struct TerminalBackend<W: Write> {
    out: W,
    /// Emit ANSI escapes (off for plain logs and tests)
    ansi: bool,
    rows: Vec<String>,
    highlights: Vec<Option<(u8, u8)>>,
}

impl<W: Write> TerminalBackend<W> {
    pub fn new(out: W, ansi: bool) -> Self {
        Self {
            out,
            ansi,
            rows: vec![String::new(); SCREEN_ROWS],
            highlights: vec![None; SCREEN_ROWS],
        }
    }

    /// Get the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn compose_row(&self, row: usize) -> String {
        let text = &self.rows[row];
        let Some((start, end)) = self.highlights[row] else {
            return text.trim_end().to_string();
        };

        // Pad so highlights past the text are still visible
        let chars: Vec<char> = text.chars().collect();
        let end = (end as usize).min(SCREEN_COLS);
        let start = (start as usize).min(end);
        let width = end.max(chars.len());
        let padded: Vec<char> = chars
            .into_iter()
            .chain(std::iter::repeat(' '))
            .take(width)
            .collect();

        let before: String = padded[..start].iter().collect();
        let inside: String = padded[start..end].iter().collect();
        let after: String = padded[end..].iter().collect();

        if self.ansi {
            format!("{}{}{}{}{}", before, REVERSE, inside, RESET, after.trim_end())
        } else {
            format!("{}[{}]{}", before, inside, after.trim_end())
        }
    }
}

impl<W: Write> DisplayBackend for TerminalBackend<W> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.rows.iter_mut().for_each(String::clear);
        self.highlights.iter_mut().for_each(|h| *h = None);
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        let line = self
            .rows
            .get_mut(row as usize)
            .ok_or(DisplayError::InvalidCoordinates)?;

        let col = col as usize;
        let mut chars: Vec<char> = line.chars().collect();
        if chars.len() < col {
            chars.resize(col, ' ');
        }
        chars.truncate(col);
        chars.extend(text.chars());
        chars.truncate(SCREEN_COLS);
        *line = chars.into_iter().collect();
        Ok(())
    }

    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError> {
        let slot = self
            .highlights
            .get_mut(row as usize)
            .ok_or(DisplayError::InvalidCoordinates)?;
        *slot = Some((start_col, end_col));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        let mut frame = String::new();
        if self.ansi {
            frame.push_str(CLEAR);
        }
        for row in 0..SCREEN_ROWS {
            frame.push_str(&self.compose_row(row));
            frame.push('\n');
        }
        if !self.ansi {
            frame.push_str(&"-".repeat(SCREEN_COLS));
            frame.push('\n');
        }

        self.out
            .write_all(frame.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|_| DisplayError::Communication)
    }

    fn dimensions(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }
}

/// Redraw on every published frame
#[embassy_executor::task]
pub async fn display_task(ansi: bool) {
    info!("Display task started");

    let mut backend = TerminalBackend::new(io::stdout(), ansi);

    loop {
        SCREEN_UPDATE.wait().await;

        let mut screen = SCREEN_BUFFER.lock().await;
        if !screen.is_dirty() {
            continue;
        }
        match backend.present(&screen) {
            Ok(()) => screen.mark_clean(),
            Err(e) => warn!("Failed to draw screen: {:?}", e),
        }
    }
}
