//! Selection lifecycle, yank, and text extraction.

use super::types::{ModeState, ScrollMode};
use crate::host::WindowContext;
use crate::selection::{Selection, SelectionMode};
use crate::text_cells::{self, CharClass};

impl ScrollMode {
    /// Begin a visual selection of the given mode at the cursor and move
    /// to SELECT state.
    pub(crate) fn start_selection(&mut self, ctx: &mut WindowContext<'_>, mode: SelectionMode) {
        let anchor_x = if mode == SelectionMode::Line {
            0
        } else {
            self.cursor_x
        };
        self.state = ModeState::Select(Selection::new(self.cursor_line, anchor_x, mode));
        self.sync_cursor(ctx);
        ctx.tab_bar.mark_dirty();
    }

    /// Handle `v`/`V`/`Ctrl-V` while already selecting: the current mode's
    /// own key drops back to NAVIGATE (char) or restores the previous mode
    /// (line/block); any other key switches modes, remembering the old one.
    pub(crate) fn toggle_selection_mode(
        &mut self,
        ctx: &mut WindowContext<'_>,
        mode: SelectionMode,
    ) {
        let ModeState::Select(mut sel) = self.state else {
            return;
        };
        if sel.mode == mode {
            if mode == SelectionMode::Char {
                self.state = ModeState::Navigate;
            } else {
                sel.mode = sel.prev_mode.unwrap_or(SelectionMode::Char);
                self.state = ModeState::Select(sel);
            }
        } else {
            sel.prev_mode = Some(sel.mode);
            sel.mode = mode;
            self.state = ModeState::Select(sel);
        }
        self.sync_cursor(ctx);
        ctx.tab_bar.mark_dirty();
    }

    /// `o`: exchange anchor and cursor.
    pub(crate) fn swap_selection_ends(&mut self, ctx: &mut WindowContext<'_>) {
        let ModeState::Select(mut sel) = self.state else {
            return;
        };
        std::mem::swap(&mut sel.anchor_line, &mut self.cursor_line);
        std::mem::swap(&mut sel.anchor_x, &mut self.cursor_x);
        self.state = ModeState::Select(sel);
        self.ensure_cursor_visible(ctx);
        self.sync_cursor(ctx);
        ctx.tab_bar.mark_dirty();
    }

    /// Select the word under the cursor (double-click): the maximal run of
    /// same-class cells around it. Whitespace selects nothing.
    pub(crate) fn select_word_at_cursor(&mut self, ctx: &mut WindowContext<'_>) {
        let word_chars = ctx.options.word_characters.clone();
        let cells = self.line_cells(ctx.screen, self.cursor_line);
        let Some(pos) = cells.iter().position(|&(_, cx)| cx >= self.cursor_x) else {
            return;
        };
        let cls = CharClass::of(cells[pos].0, &word_chars);
        if cls == CharClass::Whitespace {
            return;
        }
        let mut start = pos;
        while start > 0 && CharClass::of(cells[start - 1].0, &word_chars) == cls {
            start -= 1;
        }
        let mut end = pos;
        while end + 1 < cells.len() && CharClass::of(cells[end + 1].0, &word_chars) == cls {
            end += 1;
        }
        let sel = Selection::new(self.cursor_line, cells[start].1, SelectionMode::Char);
        self.cursor_x = cells[end].1;
        self.state = ModeState::Select(sel);
        self.sync_cursor(ctx);
        ctx.tab_bar.mark_dirty();
    }

    /// Extract the text covered by the active selection.
    ///
    /// Soft-wrapped lines are joined without a separator; only real line
    /// breaks produce newlines. Every line is right-trimmed.
    pub(crate) fn selected_text(&self, ctx: &mut WindowContext<'_>) -> String {
        let ModeState::Select(sel) = self.state else {
            return String::new();
        };
        let (start_abs, end_abs) = sel.line_span(self.cursor_line);

        if sel.mode == SelectionMode::Block {
            let x_left = sel.anchor_x.min(self.cursor_x);
            let x_right = sel.anchor_x.max(self.cursor_x);
            let mut parts = Vec::new();
            for abs_line in start_abs..=end_abs {
                let line = self.line_text(ctx.screen, abs_line);
                let piece = text_cells::slice_cells(&line, x_left, x_right + 1);
                parts.push(piece.trim_end().to_string());
            }
            return parts.join("\n");
        }

        let ((_, start_x), (_, end_x)) = sel.normalized(self.cursor_line, self.cursor_x);
        let mut parts: Vec<String> = Vec::new();
        for abs_line in start_abs..=end_abs {
            let line = self.line_text(ctx.screen, abs_line);
            let piece = if sel.mode == SelectionMode::Char {
                if abs_line == start_abs && abs_line == end_abs {
                    text_cells::slice_cells(&line, start_x, end_x + 1)
                } else if abs_line == start_abs {
                    text_cells::slice_cells(&line, start_x, usize::MAX)
                } else if abs_line == end_abs {
                    text_cells::slice_cells(&line, 0, end_x + 1)
                } else {
                    line.as_str()
                }
            } else {
                line.as_str()
            };
            let piece = piece.trim_end().to_string();
            if !parts.is_empty() && self.is_line_continued(ctx.screen, abs_line) {
                // Soft wrap: glue onto the previous part without a newline
                if let Some(last) = parts.last_mut() {
                    last.push_str(&piece);
                }
            } else {
                parts.push(piece);
            }
        }
        parts.join("\n")
    }

    /// Copy the selection to the clipboard. Exits scroll mode unless
    /// `stay`, in which case the selection clears and NAVIGATE resumes.
    pub(crate) fn yank_selection(&mut self, ctx: &mut WindowContext<'_>, stay: bool) {
        let text = self.selected_text(ctx);
        if !text.is_empty() {
            ctx.host.set_clipboard_string(&text);
            log::debug!("yanked {} bytes to clipboard", text.len());
        }
        if stay {
            self.state = ModeState::Navigate;
            ctx.screen.set_scroll_selection(None);
            self.sync_cursor(ctx);
            ctx.tab_bar.mark_dirty();
        } else {
            self.exit(ctx);
        }
    }
}
