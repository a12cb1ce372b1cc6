//! Cell-coordinate text utilities.
//!
//! Terminal columns are cells, not code points: an east-asian wide or
//! fullwidth character occupies two consecutive cells. Everything in scroll
//! mode that slices, snaps, or classifies line text goes through here.

use unicode_width::UnicodeWidthChar;

/// Cell width of a character: 2 for wide/fullwidth, else 1.
pub fn char_width(ch: char) -> usize {
    if ch.width() == Some(2) { 2 } else { 1 }
}

/// Character classification for word motions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Whitespace,
    /// Alphanumeric plus the user's extra word characters
    Word,
    /// Everything else (punctuation, symbols)
    Punct,
}

impl CharClass {
    /// Classify `ch` using the configured extra word characters.
    pub fn of(ch: char, word_chars: &str) -> Self {
        if ch.is_whitespace() {
            CharClass::Whitespace
        } else if ch.is_alphanumeric() || word_chars.contains(ch) {
            CharClass::Word
        } else {
            CharClass::Punct
        }
    }
}

/// Convert a cell column to a character index into `text`.
///
/// Walks the string accumulating cell widths; returns the index of the
/// character spanning `cell_x`, or `text.chars().count()` when the column
/// lies past the end of the line. A column on the trailing half of a wide
/// character maps to the *next* character, which makes
/// `cell_to_char_idx(text, end + 1)` an exclusive slice bound that covers
/// the full wide character at `end`.
pub fn cell_to_char_idx(text: &str, cell_x: usize) -> usize {
    let mut cell = 0;
    for (idx, ch) in text.chars().enumerate() {
        if cell >= cell_x {
            return idx;
        }
        cell += char_width(ch);
    }
    text.chars().count()
}

/// Snap a cell column to the starting cell of the character occupying it.
///
/// Columns past the end of the text are returned unchanged.
pub fn snap_cell(text: &str, cell_x: usize) -> usize {
    let mut cell = 0;
    for ch in text.chars() {
        let w = char_width(ch);
        if cell_x < cell + w {
            return cell;
        }
        cell += w;
    }
    cell_x
}

/// Slice `text` by cell columns, `start_cell` inclusive to `end_cell`
/// exclusive, honoring wide-character boundaries.
pub fn slice_cells(text: &str, start_cell: usize, end_cell: usize) -> &str {
    let start_idx = cell_to_char_idx(text, start_cell);
    let end_idx = cell_to_char_idx(text, end_cell);
    let byte_at = |char_idx: usize| {
        text.char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(text.len())
    };
    let start_byte = byte_at(start_idx);
    let end_byte = if end_idx > start_idx {
        byte_at(end_idx)
    } else {
        start_byte
    };
    &text[start_byte..end_byte]
}

/// Walk a line into `(char, starting_cell)` pairs, truncated at `columns`.
pub fn line_cells(text: &str, columns: usize) -> Vec<(char, usize)> {
    let mut result = Vec::new();
    let mut cell = 0;
    for ch in text.chars() {
        if cell >= columns {
            break;
        }
        result.push((ch, cell));
        cell += char_width(ch);
    }
    result
}
