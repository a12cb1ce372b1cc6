//! Type definitions for the scroll mode state machine.

use crate::selection::Selection;
use crossterm::event::MouseButton;

/// Which input map is live.
///
/// SELECT carries the selection payload; NAVIGATE and SEARCH share the
/// persistent cursor and search fields on [`ScrollMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeState {
    /// Cursor motion over the buffer
    Navigate,
    /// Incremental query editing
    Search,
    /// Visual selection in progress
    Select(Selection),
}

/// Incremental search state.
///
/// The query survives leaving SEARCH so `n`/`N` can repeat the jump.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    pub backwards: bool,
}

/// Left-button drag tracking, retained while the button is held.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragState {
    /// A press armed the drag.
    pub active: bool,
    /// The first drag motion started a selection.
    pub started: bool,
    /// Cell position of the arming press.
    pub press_x: usize,
    pub press_y: usize,
}

/// A mouse event as dispatched by the host.
///
/// `repeat_count` follows the host's click protocol: 1 = press, 2 =
/// double, 3 = triple, 0 = drag motion with the button held, -1 = release.
#[derive(Debug, Clone, Copy)]
pub struct MouseInput {
    pub button: MouseButton,
    pub repeat_count: i8,
    pub cell_x: usize,
    pub cell_y: usize,
}

/// Scroll mode state machine.
///
/// Line addressing is absolute over history + live:
/// - Line 0 = oldest retained history line
/// - Line `history_count - 1` = newest history line
/// - Line `history_count` = top row of the live buffer
///
/// On the alternate screen there is no history and absolute lines index
/// the live buffer directly.
#[derive(Debug)]
pub struct ScrollMode {
    /// Whether scroll mode is active
    pub(crate) active: bool,
    /// Which input map is live
    pub(crate) state: ModeState,
    /// The window was on the alternate screen when the mode was entered
    pub(crate) alt_screen: bool,
    /// Cursor absolute line
    pub(crate) cursor_line: usize,
    /// Cursor cell column
    pub(crate) cursor_x: usize,
    pub(crate) search: SearchState,
    pub(crate) drag: DragState,
}

impl Default for ScrollMode {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollMode {
    /// Create a new inactive scroll mode
    pub fn new() -> Self {
        Self {
            active: false,
            state: ModeState::Navigate,
            alt_screen: false,
            cursor_line: 0,
            cursor_x: 0,
            search: SearchState::default(),
            drag: DragState::default(),
        }
    }

    /// Whether the mode is currently active
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current input state
    pub fn state(&self) -> ModeState {
        self.state
    }

    /// Cursor position as `(absolute_line, cell_x)`
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_line, self.cursor_x)
    }

    /// Current search query
    pub fn search_query(&self) -> &str {
        &self.search.query
    }

    /// The active selection, if the mode is in SELECT state
    pub fn selection(&self) -> Option<Selection> {
        match self.state {
            ModeState::Select(sel) => Some(sel),
            _ => None,
        }
    }
}
