//! Capability interfaces the host terminal provides to scroll mode.
//!
//! The mode never touches the emulator's data structures directly. The host
//! hands it a [`WindowContext`] on every call, bundling the screen buffer,
//! the tab-bar drawing surface, the relevant options, and a handful of
//! process-level services (clipboard, error display, I/O wakeup). Tests
//! substitute scripted fakes for all three traits.

use regex::Regex;
use thiserror::Error;

/// Why scroll mode refused to activate.
#[derive(Debug, Error)]
pub enum ScrollModeError {
    /// The status display needs the tab bar; without it the mode is unusable.
    #[error("scroll mode requires the tab bar to be visible (set tab_bar_min_tabs 1)")]
    TabBarHidden,
}

/// Cursor overlay pushed down to the rendering layer.
///
/// `y` is viewport-relative; `width` is 2 when the cursor sits on a wide
/// character so the renderer can box both cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollCursor {
    pub x: usize,
    pub y: usize,
    pub width: usize,
}

/// Selection highlight rectangle pushed down to the rendering layer.
///
/// Rows are viewport-relative and already clamped to the visible area.
/// For [`SelectionMode::Block`] the x values are the raw anchor/cursor
/// columns; the renderer takes min/max per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRect {
    pub mode: crate::selection::SelectionMode,
    pub start_x: usize,
    pub start_y: usize,
    pub end_x: usize,
    pub end_y: usize,
}

/// Read/write surface of the emulator screen consumed by scroll mode.
///
/// Line readers are total: indexes past the end return `None` and the
/// caller treats the line as empty, because the backing store may be
/// trimmed concurrently with a long scan.
pub trait Screen {
    /// Number of visible rows.
    fn lines(&self) -> usize;
    /// Number of columns.
    fn columns(&self) -> usize;
    /// The real terminal cursor, `(x, y)` in screen coordinates.
    fn cursor_position(&self) -> (usize, usize);
    /// Number of retained history lines.
    fn history_count(&self) -> usize;
    /// How many lines the viewport is currently scrolled into history.
    fn scrolled_by(&self) -> usize;
    /// True when the main buffer (with scrollback) is active.
    fn is_main_linebuf(&self) -> bool;

    /// History line text; index 0 is the *newest* history line.
    fn history_line(&self, idx: usize) -> Option<String>;
    /// Live (visible buffer) line text.
    fn live_line(&self, idx: usize) -> Option<String>;
    /// Whether a history line is a soft-wrap continuation of its predecessor.
    fn history_line_continued(&self, idx: usize) -> bool;
    /// Whether a live line is a soft-wrap continuation of its predecessor.
    fn live_line_continued(&self, idx: usize) -> bool;

    /// Scroll the viewport by `n` lines, toward history when `up`.
    fn scroll(&mut self, n: usize, up: bool);
    /// Scroll the viewport back to the bottom of the live buffer.
    fn scroll_to_end(&mut self);
    /// Drop any normal (non-scroll-mode) selection in progress.
    fn clear_selection(&mut self);
    /// Install or remove the match-highlight marker.
    fn set_marker(&mut self, marker: Option<Regex>);
    /// Pause or resume parsing of child output into the buffer.
    fn set_scroll_pause(&mut self, paused: bool);
    /// Emit output bytes buffered while parsing was paused.
    fn flush_scroll_pending(&mut self);
    /// Show or hide the scroll-mode cursor overlay.
    fn set_scroll_cursor(&mut self, cursor: Option<ScrollCursor>);
    /// Show or hide the scroll-mode selection highlight.
    fn set_scroll_selection(&mut self, selection: Option<SelectionRect>);
}

/// 24-bit color for status segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Cell attributes for one status-bar draw call.
///
/// `None` colors mean the surface's defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentStyle {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub bold: bool,
}

impl SegmentStyle {
    pub fn new(fg: Option<Rgb>, bg: Option<Rgb>, bold: bool) -> Self {
        Self { fg, bg, bold }
    }
}

/// The tab-bar cell grid the status renderer draws into.
pub trait TabBar {
    /// False when the tab bar is hidden; scroll mode refuses to enter.
    fn is_visible(&self) -> bool;
    /// False until the host has laid the bar out at least once.
    fn laid_out_once(&self) -> bool;
    /// Width of the bar in cells.
    fn columns(&self) -> usize;
    /// Current draw position.
    fn cursor_col(&self) -> usize;
    /// Home the draw position and erase the line.
    fn begin_line(&mut self);
    /// Write styled cells at the draw position, advancing it.
    fn draw(&mut self, text: &str, style: SegmentStyle);
    /// Request a repaint of the bar.
    fn mark_dirty(&mut self);
    /// Rebuild the bar's normal (tab list) content after scroll mode exits.
    fn update_data(&mut self);
}

/// Process-level services: clipboard, user-visible errors, I/O wakeup.
pub trait Host {
    /// Copy text to the system clipboard.
    fn set_clipboard_string(&mut self, text: &str);
    /// Show a user-visible error message.
    fn show_error(&mut self, title: &str, message: &str);
    /// Wake the I/O loop so it resumes reading from the child PTY.
    fn wake_io_loop(&mut self);
}

/// User-configurable knobs consumed by scroll mode.
#[derive(Debug, Clone)]
pub struct ScrollModeOptions {
    /// Auto-enter scroll mode from double/triple-click and drag.
    pub scroll_mode_mouse: bool,
    /// Extra characters treated as word characters by `w`/`e`/`b` and
    /// double-click selection, on top of alphanumerics.
    pub word_characters: String,
}

impl Default for ScrollModeOptions {
    fn default() -> Self {
        Self {
            scroll_mode_mouse: false,
            word_characters: "@-./_~?&=%+#".to_string(),
        }
    }
}

/// Everything scroll mode needs from the host for one call.
///
/// The mode holds no references between calls; the host rebuilds this
/// bundle (cheaply, they are all borrows) around every entry point.
pub struct WindowContext<'a> {
    pub screen: &'a mut dyn Screen,
    pub tab_bar: &'a mut dyn TabBar,
    pub options: &'a ScrollModeOptions,
    pub host: &'a mut dyn Host,
}
