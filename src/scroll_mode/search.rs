//! Incremental case-insensitive substring search.
//!
//! Queries are literal substrings, matched case-folded against every line
//! of the buffer. Match positions are reported in cell columns so they can
//! feed the cursor directly. Highlighting rides on the screen's marker
//! mechanism: a case-insensitive literal-escaped pattern installed while
//! the query is non-empty.

use regex::Regex;

use super::types::ScrollMode;
use crate::host::{Screen, WindowContext};
use crate::text_cells;

/// Cell columns of every case-folded occurrence of `query_folded` in
/// `text`, including overlapping ones.
///
/// Folding can change a character's length (ß → ss), so matching runs on
/// the folded text with a byte → source-cell map carried alongside.
pub(crate) fn matches_in_line(text: &str, query_folded: &str) -> Vec<usize> {
    if query_folded.is_empty() {
        return Vec::new();
    }
    let (folded, byte_cells) = fold_with_cells(text);
    let mut out = Vec::new();
    let mut from = 0;
    while let Some(off) = folded[from..].find(query_folded) {
        let at = from + off;
        out.push(byte_cells[at]);
        // Advance one folded character so overlapping matches are counted
        from = at
            + folded[at..]
                .chars()
                .next()
                .map(char::len_utf8)
                .unwrap_or(1);
    }
    out
}

/// Case-fold `text`, returning the folded string and, per folded byte, the
/// cell column of the source character it came from.
fn fold_with_cells(text: &str) -> (String, Vec<usize>) {
    let mut folded = String::new();
    let mut byte_cells = Vec::new();
    let mut cell = 0;
    for ch in text.chars() {
        for lc in ch.to_lowercase() {
            folded.push(lc);
        }
        byte_cells.resize(folded.len(), cell);
        cell += text_cells::char_width(ch);
    }
    (folded, byte_cells)
}

impl ScrollMode {
    /// All `(abs_line, cell)` match positions across the buffer, in order.
    /// Lines that fail to read are skipped.
    pub(crate) fn find_all_matches(&self, screen: &dyn Screen) -> Vec<(usize, usize)> {
        if self.search.query.is_empty() {
            return Vec::new();
        }
        let query = self.search.query.to_lowercase();
        let total = self.total_lines(screen);
        let mut matches = Vec::new();
        for abs_line in 0..total {
            let text = self.line_text(screen, abs_line);
            for cell in matches_in_line(&text, &query) {
                matches.push((abs_line, cell));
            }
        }
        matches
    }

    /// Index of the match at the cursor, or of the nearest one after it,
    /// for the `current/total` status segment.
    pub(crate) fn current_match_index(&self, matches: &[(usize, usize)]) -> usize {
        if let Some(i) = matches
            .iter()
            .position(|&(line, cell)| line == self.cursor_line && cell == self.cursor_x)
        {
            return i;
        }
        matches
            .iter()
            .position(|&(line, cell)| {
                line > self.cursor_line || (line == self.cursor_line && cell >= self.cursor_x)
            })
            .unwrap_or(0)
    }

    /// Jump to the nearest match while the query is being typed: stay when
    /// already on one, prefer a later match on the current line, otherwise
    /// jump inter-line in the current direction.
    pub(crate) fn jump_to_nearest_match(&mut self, ctx: &mut WindowContext<'_>) {
        if self.search.query.is_empty() {
            return;
        }
        let query = self.search.query.to_lowercase();
        let text = self.line_text(ctx.screen, self.cursor_line);
        if let Some(&cell) = matches_in_line(&text, &query)
            .iter()
            .find(|&&cell| cell >= self.cursor_x)
        {
            if cell == self.cursor_x {
                return;
            }
            self.cursor_x = cell;
            self.sync_cursor(ctx);
            return;
        }
        self.jump_to_match(ctx, self.search.backwards);
    }

    /// Jump to the strictly-next (or strictly-previous) match, wrapping
    /// around the end of the buffer once.
    pub(crate) fn jump_to_match(&mut self, ctx: &mut WindowContext<'_>, backwards: bool) {
        if self.search.query.is_empty() {
            return;
        }
        let query = self.search.query.to_lowercase();
        let total = self.total_lines(ctx.screen);
        let cur = self.cursor_line;

        // Same-line candidates first
        let line_hits = matches_in_line(&self.line_text(ctx.screen, cur), &query);
        let same_line = if backwards {
            line_hits.iter().rev().find(|&&c| c < self.cursor_x)
        } else {
            line_hits.iter().find(|&&c| c > self.cursor_x)
        };
        if let Some(&cell) = same_line {
            self.cursor_x = cell;
            self.sync_cursor(ctx);
            ctx.tab_bar.mark_dirty();
            return;
        }

        let scan: Box<dyn Iterator<Item = usize>> = if backwards {
            // Lines above the cursor, then wrap from the bottom
            Box::new((0..cur).rev().chain((cur..total).rev()))
        } else {
            // Lines below the cursor, then wrap from the top
            Box::new((cur + 1..total).chain(0..=cur.min(total.saturating_sub(1))))
        };
        for abs_line in scan {
            let hits = matches_in_line(&self.line_text(ctx.screen, abs_line), &query);
            let cell = if backwards {
                hits.last()
            } else {
                hits.first()
            };
            if let Some(&cell) = cell {
                self.move_cursor_to(ctx, abs_line, cell);
                return;
            }
        }
    }

    /// Install the match-highlight marker for the current query.
    ///
    /// The pattern is a case-insensitive literal escape of the query; a
    /// pattern the engine rejects is silently skipped (the query display
    /// still works, only the highlight is missing).
    pub(crate) fn apply_search_marker(&self, ctx: &mut WindowContext<'_>) {
        if self.search.query.is_empty() {
            return;
        }
        let pattern = format!("(?i){}", regex::escape(&self.search.query));
        match Regex::new(&pattern) {
            Ok(marker) => ctx.screen.set_marker(Some(marker)),
            Err(e) => log::debug!("search marker pattern rejected: {e}"),
        }
    }

    /// Remove the match-highlight marker.
    pub(crate) fn clear_search_marker(&self, ctx: &mut WindowContext<'_>) {
        ctx.screen.set_marker(None);
    }
}
