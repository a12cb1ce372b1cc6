//! Vim-style word motions over cell lists.
//!
//! Words are maximal runs of same-class characters (word vs punctuation);
//! whitespace separates them. Motions operate on the `(char, cell)` walk
//! of the current line and continue onto the next or previous line when a
//! line is exhausted.

use super::types::ScrollMode;
use crate::host::WindowContext;
use crate::text_cells::CharClass;

impl ScrollMode {
    /// Index into `cells` of the character spanning the cursor column, or
    /// `cells.len()` when the cursor is past the text.
    fn cell_pos(cells: &[(char, usize)], cursor_x: usize) -> usize {
        cells
            .iter()
            .position(|&(_, cx)| cx >= cursor_x)
            .unwrap_or(cells.len())
    }

    /// `w`: skip the rest of the current class group, skip whitespace,
    /// land on the start of the next group. `e`: advance one, skip
    /// whitespace, land on the last cell of the current group. Both wrap
    /// onto following lines.
    pub(crate) fn word_move_forward(&mut self, ctx: &mut WindowContext<'_>, to_end: bool) {
        let total = self.total_lines(ctx.screen);
        let word_chars = ctx.options.word_characters.clone();
        let class = |ch: char| CharClass::of(ch, &word_chars);

        let mut line_abs = self.cursor_line;
        let mut cells = self.line_cells(ctx.screen, line_abs);
        let mut pos = Self::cell_pos(&cells, self.cursor_x);

        if to_end {
            pos += 1;
            loop {
                if pos >= cells.len() {
                    if line_abs + 1 >= total {
                        return;
                    }
                    line_abs += 1;
                    cells = self.line_cells(ctx.screen, line_abs);
                    pos = 0;
                    continue;
                }
                while pos < cells.len() && class(cells[pos].0) == CharClass::Whitespace {
                    pos += 1;
                }
                if pos >= cells.len() {
                    continue;
                }
                let cls = class(cells[pos].0);
                while pos + 1 < cells.len() && class(cells[pos + 1].0) == cls {
                    pos += 1;
                }
                break;
            }
        } else {
            loop {
                if pos >= cells.len() {
                    if line_abs + 1 >= total {
                        return;
                    }
                    line_abs += 1;
                    cells = self.line_cells(ctx.screen, line_abs);
                    pos = 0;
                    // A line opening with content is itself the next word
                    if let Some(&(ch, _)) = cells.first()
                        && class(ch) != CharClass::Whitespace
                    {
                        break;
                    }
                    continue;
                }
                let cls = class(cells[pos].0);
                if cls != CharClass::Whitespace {
                    while pos < cells.len() && class(cells[pos].0) == cls {
                        pos += 1;
                    }
                }
                while pos < cells.len() && class(cells[pos].0) == CharClass::Whitespace {
                    pos += 1;
                }
                if pos < cells.len() {
                    break;
                }
            }
        }

        if pos < cells.len() {
            let x = cells[pos].1;
            self.move_cursor_to(ctx, line_abs, x);
        }
    }

    /// `b`: step back one cell, skip whitespace backward, land on the
    /// first cell of that class group. Wraps onto preceding lines.
    pub(crate) fn word_move_backward(&mut self, ctx: &mut WindowContext<'_>) {
        let word_chars = ctx.options.word_characters.clone();
        let class = |ch: char| CharClass::of(ch, &word_chars);

        let mut line_abs = self.cursor_line;
        let mut cells = self.line_cells(ctx.screen, line_abs);
        let mut pos = if cells.iter().any(|&(_, cx)| cx >= self.cursor_x) {
            Self::cell_pos(&cells, self.cursor_x) as isize
        } else {
            cells.len() as isize - 1
        };

        pos -= 1;
        loop {
            if pos < 0 {
                if line_abs == 0 {
                    return;
                }
                line_abs -= 1;
                cells = self.line_cells(ctx.screen, line_abs);
                pos = cells.len() as isize - 1;
                if pos < 0 {
                    continue;
                }
            }
            while pos >= 0 && class(cells[pos as usize].0) == CharClass::Whitespace {
                pos -= 1;
            }
            if pos < 0 {
                continue;
            }
            let cls = class(cells[pos as usize].0);
            while pos > 0 && class(cells[pos as usize - 1].0) == cls {
                pos -= 1;
            }
            break;
        }

        if pos >= 0 && (pos as usize) < cells.len() {
            let x = cells[pos as usize].1;
            self.move_cursor_to(ctx, line_abs, x);
        }
    }
}
