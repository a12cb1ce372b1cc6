//! Mouse dispatch: click, double/triple click, drag selection, and
//! auto-entry from outside the mode.
//!
//! The host dispatches left-button events with a `repeat_count` protocol:
//! 1 = press, 2 = double, 3 = triple, 0 = drag motion, -1 = release.

use crossterm::event::MouseButton;

use super::types::{ModeState, MouseInput, ScrollMode};
use crate::host::WindowContext;
use crate::selection::SelectionMode;

impl ScrollMode {
    /// Handle a mouse event. Returns true when the event was consumed.
    pub fn handle_mouse(&mut self, ctx: &mut WindowContext<'_>, input: &MouseInput) -> bool {
        if input.button != MouseButton::Left {
            // Consume but ignore non-left buttons while active
            return self.active;
        }
        let (cell_x, cell_y) = (input.cell_x, input.cell_y);

        if !self.active {
            return self.mouse_auto_enter(ctx, input.repeat_count, cell_x, cell_y);
        }

        match input.repeat_count {
            1 => {
                // Single press: leave any selection, move, arm drag
                if matches!(self.state, ModeState::Select(_)) {
                    self.state = ModeState::Navigate;
                }
                self.mouse_click(ctx, cell_x, cell_y);
                self.drag.active = true;
                self.drag.started = false;
                true
            }
            2 => {
                self.mouse_click(ctx, cell_x, cell_y);
                self.select_word_at_cursor(ctx);
                self.drag.active = false;
                true
            }
            3 => {
                self.mouse_click(ctx, cell_x, cell_y);
                self.start_selection(ctx, SelectionMode::Line);
                self.drag.active = false;
                true
            }
            0 => {
                if !self.drag.active {
                    return true;
                }
                if !self.drag.started {
                    // First motion: the press cell becomes the anchor
                    self.start_selection(ctx, SelectionMode::Char);
                    self.drag.started = true;
                }
                self.mouse_move(ctx, cell_x, cell_y);
                true
            }
            _ => {
                // Release disarms the drag; everything else is swallowed
                self.drag.active = false;
                self.drag.started = false;
                true
            }
        }
    }

    /// Dispatch while inactive: double/triple click and drag auto-enter
    /// the mode when the mouse opt-in is set; plain presses only record
    /// the cell for a later drag and pass through.
    fn mouse_auto_enter(
        &mut self,
        ctx: &mut WindowContext<'_>,
        repeat_count: i8,
        cell_x: usize,
        cell_y: usize,
    ) -> bool {
        if !ctx.options.scroll_mode_mouse {
            return false;
        }
        match repeat_count {
            1 => {
                self.drag.press_x = cell_x;
                self.drag.press_y = cell_y;
                false // let normal press handling proceed
            }
            2 => {
                self.enter(ctx, true);
                if self.active {
                    self.mouse_click(ctx, cell_x, cell_y);
                    self.select_word_at_cursor(ctx);
                }
                true
            }
            3 => {
                self.enter(ctx, true);
                if self.active {
                    self.mouse_click(ctx, cell_x, cell_y);
                    self.start_selection(ctx, SelectionMode::Line);
                }
                true
            }
            0 => {
                self.enter(ctx, true);
                if self.active {
                    // Anchor at the recorded press cell, then extend to the
                    // current drag cell with a fresh viewport
                    let anchor_abs = self.viewport_top(ctx.screen) + self.drag.press_y;
                    let anchor_x = self.drag.press_x;
                    self.move_cursor_to(ctx, anchor_abs, anchor_x);
                    self.start_selection(ctx, SelectionMode::Char);
                    self.drag.active = true;
                    self.drag.started = true;
                    self.mouse_move(ctx, cell_x, cell_y);
                }
                true
            }
            _ => false,
        }
    }

    /// Move the cursor to a clicked cell.
    fn mouse_click(&mut self, ctx: &mut WindowContext<'_>, cell_x: usize, cell_y: usize) {
        let abs_line = (self.viewport_top(ctx.screen) + cell_y)
            .min(self.total_lines(ctx.screen).saturating_sub(1));
        let cell_x = cell_x.min(ctx.screen.columns().saturating_sub(1));
        let cell_x = self.snap_cell_x(ctx.screen, abs_line, cell_x);
        self.move_cursor_to(ctx, abs_line, cell_x);
    }

    /// Move the cursor during a drag, scrolling one line when the drag
    /// touches a viewport edge so the selection can grow off-screen.
    fn mouse_move(&mut self, ctx: &mut WindowContext<'_>, cell_x: usize, cell_y: usize) {
        let num_lines = ctx.screen.lines();
        if !self.alt_screen {
            if cell_y == 0 && ctx.screen.scrolled_by() < ctx.screen.history_count() {
                ctx.screen.scroll(1, true);
            } else if cell_y >= num_lines.saturating_sub(1) && ctx.screen.scrolled_by() > 0 {
                ctx.screen.scroll(1, false);
            }
        }
        let abs_line = (self.viewport_top(ctx.screen) + cell_y)
            .min(self.total_lines(ctx.screen).saturating_sub(1));
        let cell_x = cell_x.min(ctx.screen.columns().saturating_sub(1));
        self.cursor_line = abs_line;
        self.cursor_x = self.snap_cell_x(ctx.screen, abs_line, cell_x);
        self.ensure_cursor_visible(ctx);
        self.sync_cursor(ctx);
        ctx.tab_bar.mark_dirty();
    }
}
