//! Unified absolute-line view over the screen's history and live buffers.
//!
//! The external store keeps history indexed newest-first; this view
//! reverses it so absolute line 0 is the oldest retained line and indices
//! grow top-to-bottom through the live buffer. All reads are defensive:
//! the store may be trimmed while a scan is in flight, so out-of-range
//! lines read as empty.

use super::types::ScrollMode;
use crate::host::Screen;
use crate::text_cells;

impl ScrollMode {
    /// Total addressable lines: history + live on the main buffer, live
    /// only on the alternate screen.
    pub(crate) fn total_lines(&self, screen: &dyn Screen) -> usize {
        if self.alt_screen {
            screen.lines()
        } else {
            screen.history_count() + screen.lines()
        }
    }

    /// Absolute line index of the top row of the viewport.
    pub(crate) fn viewport_top(&self, screen: &dyn Screen) -> usize {
        if self.alt_screen {
            0
        } else {
            screen.history_count().saturating_sub(screen.scrolled_by())
        }
    }

    /// Text of an absolute line; empty when out of range.
    pub(crate) fn line_text(&self, screen: &dyn Screen, abs_line: usize) -> String {
        if self.alt_screen {
            return screen.live_line(abs_line).unwrap_or_default();
        }
        let h_count = screen.history_count();
        if abs_line < h_count {
            // History is stored newest-first
            screen.history_line(h_count - 1 - abs_line).unwrap_or_default()
        } else {
            screen.live_line(abs_line - h_count).unwrap_or_default()
        }
    }

    /// Whether an absolute line is a soft-wrap continuation of the line
    /// above it. The first live line continues the *newest* history line
    /// when that one wrapped.
    pub(crate) fn is_line_continued(&self, screen: &dyn Screen, abs_line: usize) -> bool {
        if abs_line == 0 {
            return false;
        }
        if self.alt_screen {
            return screen.live_line_continued(abs_line);
        }
        let h_count = screen.history_count();
        if abs_line < h_count {
            screen.history_line_continued(h_count - 1 - abs_line)
        } else {
            let live_idx = abs_line - h_count;
            if live_idx == 0 {
                h_count > 0 && screen.history_line_continued(0)
            } else {
                screen.live_line_continued(live_idx)
            }
        }
    }

    /// `(char, starting_cell)` pairs of an absolute line, truncated at the
    /// screen width.
    pub(crate) fn line_cells(&self, screen: &dyn Screen, abs_line: usize) -> Vec<(char, usize)> {
        let text = self.line_text(screen, abs_line);
        text_cells::line_cells(&text, screen.columns())
    }

    /// Snap a cell column to the start cell of the character spanning it
    /// on the given line.
    pub(crate) fn snap_cell_x(&self, screen: &dyn Screen, abs_line: usize, cell_x: usize) -> usize {
        let text = self.line_text(screen, abs_line);
        text_cells::snap_cell(&text, cell_x)
    }
}
