//! Cursor movement and viewport control.
//!
//! Every mutation funnels through [`ScrollMode::move_cursor`] or
//! [`ScrollMode::move_cursor_to`]: clamp to the buffer, scroll the
//! viewport if the cursor left it, snap off wide-character trailing
//! cells, then push the cursor and selection overlays to the renderer
//! and mark the tab bar dirty.

use super::types::{ModeState, ScrollMode};
use crate::host::{ScrollCursor, SelectionRect, WindowContext};
use crate::selection::SelectionMode;
use crate::text_cells;

impl ScrollMode {
    /// Move the cursor by a relative offset and update the display.
    pub(crate) fn move_cursor(&mut self, ctx: &mut WindowContext<'_>, dy: isize, dx: isize) {
        let old_x = self.cursor_x;
        self.cursor_line = self.cursor_line.saturating_add_signed(dy);
        self.cursor_x = self.cursor_x.saturating_add_signed(dx);
        self.ensure_cursor_visible(ctx);
        let mut snapped = self.snap_cell_x(ctx.screen, self.cursor_line, self.cursor_x);
        if dx > 0 && snapped <= old_x {
            // Moving right landed on the trailing cell of the wide char at
            // the old position; advance past it by its full width.
            let text = self.line_text(ctx.screen, self.cursor_line);
            let ci = text_cells::cell_to_char_idx(&text, old_x);
            let advanced = match text.chars().nth(ci) {
                Some(ch) => old_x + text_cells::char_width(ch),
                None => old_x + 1,
            };
            // A wide char at the right margin has no room to advance past
            let max_x = ctx.screen.columns().saturating_sub(1);
            snapped = if advanced <= max_x { advanced } else { old_x };
        }
        self.cursor_x = snapped;
        self.sync_cursor(ctx);
        ctx.tab_bar.mark_dirty();
    }

    /// Move the cursor to an absolute position and update the display.
    pub(crate) fn move_cursor_to(&mut self, ctx: &mut WindowContext<'_>, abs_line: usize, x: usize) {
        self.cursor_line = abs_line;
        self.cursor_x = x;
        self.ensure_cursor_visible(ctx);
        self.cursor_x = self.snap_cell_x(ctx.screen, self.cursor_line, self.cursor_x);
        self.sync_cursor(ctx);
        ctx.tab_bar.mark_dirty();
    }

    /// Clamp the cursor to the buffer and scroll the viewport so it stays
    /// on screen. Issues at most one scroll call, to the nearest edge.
    pub(crate) fn ensure_cursor_visible(&mut self, ctx: &mut WindowContext<'_>) {
        let total = self.total_lines(ctx.screen);
        self.cursor_line = self.cursor_line.min(total.saturating_sub(1));
        self.cursor_x = self.cursor_x.min(ctx.screen.columns().saturating_sub(1));

        if self.alt_screen {
            // No scrolling on the alternate screen; the viewport is fixed.
            return;
        }

        let vt = self.viewport_top(ctx.screen);
        let vb = vt + ctx.screen.lines().saturating_sub(1);
        if self.cursor_line < vt {
            ctx.screen.scroll(vt - self.cursor_line, true);
        } else if self.cursor_line > vb {
            ctx.screen.scroll(self.cursor_line - vb, false);
        }
    }

    /// Push the cursor overlay (and, transitively, the selection overlay)
    /// to the rendering layer.
    pub(crate) fn sync_cursor(&mut self, ctx: &mut WindowContext<'_>) {
        let lines = ctx.screen.lines();
        let vt = self.viewport_top(ctx.screen);
        let vy = self
            .cursor_line
            .saturating_sub(vt)
            .min(lines.saturating_sub(1));
        // Box both cells when the cursor sits on a wide character
        let text = self.line_text(ctx.screen, self.cursor_line);
        let ci = text_cells::cell_to_char_idx(&text, self.cursor_x);
        let width = text
            .chars()
            .nth(ci)
            .map(text_cells::char_width)
            .unwrap_or(1);
        ctx.screen.set_scroll_cursor(Some(ScrollCursor {
            x: self.cursor_x,
            y: vy,
            width,
        }));
        self.sync_selection(ctx);
    }

    /// Push the selection highlight to the rendering layer, clamped to the
    /// visible viewport, or clear it when no selection is active.
    pub(crate) fn sync_selection(&mut self, ctx: &mut WindowContext<'_>) {
        let sel = match self.state {
            ModeState::Select(sel) => sel,
            _ => {
                ctx.screen.set_scroll_selection(None);
                return;
            }
        };

        let vt = self.viewport_top(ctx.screen);
        let num_lines = ctx.screen.lines();
        let columns = ctx.screen.columns();

        let ((start_abs, start_x), (end_abs, end_x)) =
            sel.normalized(self.cursor_line, self.cursor_x);

        // Entirely off-screen
        if end_abs < vt || start_abs >= vt + num_lines {
            ctx.screen.set_scroll_selection(None);
            return;
        }

        // Clamp rows to the viewport, opening the clamped end to the margin
        let (start_vy, mut start_x) = if start_abs < vt {
            (0, 0)
        } else {
            (start_abs - vt, start_x)
        };
        let (end_vy, mut end_x) = if end_abs >= vt + num_lines {
            (num_lines - 1, columns.saturating_sub(1))
        } else {
            (end_abs - vt, end_x)
        };

        match sel.mode {
            SelectionMode::Line => {
                start_x = 0;
                end_x = columns.saturating_sub(1);
            }
            SelectionMode::Block => {
                // Raw corners; the renderer takes min/max per row
                start_x = sel.anchor_x;
                end_x = self.cursor_x;
            }
            SelectionMode::Char => {
                // Extend the end over the second cell of a wide character
                let end_line = self.line_text(ctx.screen, end_abs);
                let ci = text_cells::cell_to_char_idx(&end_line, end_x);
                if let Some(ch) = end_line.chars().nth(ci)
                    && text_cells::char_width(ch) == 2
                {
                    end_x += 1;
                }
            }
        }

        ctx.screen.set_scroll_selection(Some(SelectionRect {
            mode: sel.mode,
            start_x,
            start_y: start_vy,
            end_x,
            end_y: end_vy,
        }));
    }
}
