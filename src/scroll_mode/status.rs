//! Powerline status line rendered into the tab-bar cell grid.
//!
//! Layout, left to right: bold mode badge, then while a search is live a
//! query segment (direction arrow, query, `|` input cursor in SEARCH) and
//! a match-count segment, then a closing separator. Right-aligned:
//! `row:col` and `row/total` position segments. Gruvbox palette.

use super::types::{ModeState, ScrollMode};
use crate::host::{Rgb, SegmentStyle, WindowContext};
use crate::selection::SelectionMode;

const BG1: Rgb = Rgb(0x3c, 0x38, 0x36);
const BG2: Rgb = Rgb(0x50, 0x49, 0x45);
const FG1: Rgb = Rgb(0xeb, 0xdb, 0xb2);
const FG2: Rgb = Rgb(0xd5, 0xc4, 0xa1);
const DARK: Rgb = Rgb(0x28, 0x28, 0x28);
const YELLOW: Rgb = Rgb(0xfa, 0xbd, 0x2f);
const RED: Rgb = Rgb(0xfb, 0x49, 0x34);
const ORANGE: Rgb = Rgb(0xfe, 0x80, 0x19);
const GREEN: Rgb = Rgb(0xb8, 0xbb, 0x26);
const BLUE: Rgb = Rgb(0x83, 0xa5, 0x98);

/// Powerline separators and direction arrows (private-use glyphs).
const SEP_RIGHT: &str = "\u{e0b0}";
const SEP_LEFT: &str = "\u{e0b2}";
const ARROW_UP: &str = "\u{f0d8}";
const ARROW_DOWN: &str = "\u{f0d7}";

fn seg(fg: Rgb, bg: Option<Rgb>, bold: bool) -> SegmentStyle {
    SegmentStyle::new(Some(fg), bg, bold)
}

impl ScrollMode {
    /// Draw the status line. Called by the host whenever the tab bar is
    /// laid out while the mode is active; a no-op before the first layout.
    pub fn draw_status(&self, ctx: &mut WindowContext<'_>) {
        if !self.active || !ctx.tab_bar.laid_out_once() {
            return;
        }
        ctx.tab_bar.begin_line();

        let (mode_bg, mode_text) = match self.state {
            ModeState::Select(sel) => (
                ORANGE,
                match sel.mode {
                    SelectionMode::Line => " V-LINE ",
                    SelectionMode::Block => " VBLOCK ",
                    SelectionMode::Char => " VISUAL ",
                },
            ),
            ModeState::Search => (GREEN, " SEARCH "),
            ModeState::Navigate => (BLUE, " NORMAL "),
        };
        ctx.tab_bar.draw(mode_text, seg(DARK, Some(mode_bg), true));

        let searching = self.state == ModeState::Search;
        if searching || !self.search.query.is_empty() {
            let arrow = if self.search.backwards {
                ARROW_UP
            } else {
                ARROW_DOWN
            };
            let input_cursor = if searching { "|" } else { "" };
            let matches = self.find_all_matches(ctx.screen);

            // Query segment
            ctx.tab_bar.draw(SEP_RIGHT, seg(mode_bg, Some(BG1), false));
            ctx.tab_bar.draw(
                &format!(" {arrow} {}{input_cursor} ", self.search.query),
                seg(FG1, Some(BG1), false),
            );

            // Match count segment
            ctx.tab_bar.draw(SEP_RIGHT, seg(BG1, Some(BG2), false));
            let count_fg = if matches.is_empty() { RED } else { YELLOW };
            let count_text = if !matches.is_empty() {
                let idx = self.current_match_index(&matches) + 1;
                format!(" {idx}/{} ", matches.len())
            } else if !self.search.query.is_empty() {
                " 0/0 ".to_string()
            } else {
                "   ".to_string()
            };
            ctx.tab_bar.draw(&count_text, seg(count_fg, Some(BG2), true));

            // Close segment
            ctx.tab_bar.draw(SEP_RIGHT, seg(BG2, None, false));
        } else {
            ctx.tab_bar.draw(SEP_RIGHT, seg(mode_bg, None, false));
        }

        // Right-aligned position info
        let total = self.total_lines(ctx.screen);
        let row_col = format!(" {}:{} ", self.cursor_line + 1, self.cursor_x + 1);
        let row_total = format!(" {}/{} ", self.cursor_line + 1, total);
        let right_width = 1 + row_col.chars().count() + 1 + row_total.chars().count();

        let columns = ctx.tab_bar.columns();
        let drawn = ctx.tab_bar.cursor_col();
        if drawn + right_width < columns {
            let pad = " ".repeat(columns - drawn - right_width);
            ctx.tab_bar.draw(&pad, seg(FG2, None, false));
        }

        ctx.tab_bar.draw(SEP_LEFT, seg(BG2, None, false));
        ctx.tab_bar.draw(&row_col, seg(FG2, Some(BG2), false));
        ctx.tab_bar.draw(SEP_LEFT, seg(BG1, Some(BG2), false));
        ctx.tab_bar.draw(&row_total, seg(FG1, Some(BG1), true));
    }
}
