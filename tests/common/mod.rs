//! Shared integration test helpers for scrollnav.
//!
//! Scripted fake collaborators implementing the capability traits, plus a
//! `TestWindow` harness that owns one of each and hides the per-call
//! context plumbing.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::TestWindow;
//! ```
//!
//! Note: Rust integration tests use `mod common;` (not `use`) to bring in
//! helpers from `tests/common/mod.rs`. The `#[allow(dead_code)]` attribute
//! suppresses warnings when only a subset of helpers are used per file.

#![allow(dead_code)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton};
use regex::Regex;

use scrollnav::{
    Host, MouseInput, Screen, ScrollCursor, ScrollMode, ScrollModeOptions, SegmentStyle,
    SelectionRect, TabBar, WindowContext,
};

/// Scripted screen buffer with an ordered log of every state-changing
/// call, for asserting the pause/flush/resume contract.
pub struct ScriptedScreen {
    pub columns: usize,
    pub lines: usize,
    pub cursor: (usize, usize),
    /// History lines, oldest first.
    pub history: Vec<String>,
    pub history_continued: Vec<bool>,
    pub live: Vec<String>,
    pub live_continued: Vec<bool>,
    pub scrolled_by: usize,
    pub main_linebuf: bool,
    pub marker: Option<Regex>,
    pub scroll_cursor: Option<ScrollCursor>,
    pub scroll_selection: Option<SelectionRect>,
    /// Every `SelectionRect` ever pushed, for protocol assertions.
    pub selection_history: Vec<Option<SelectionRect>>,
    pub ops: Vec<String>,
}

impl ScriptedScreen {
    pub fn new(history: Vec<String>, live: Vec<String>, columns: usize) -> Self {
        Self {
            columns,
            lines: live.len(),
            cursor: (0, 0),
            history_continued: vec![false; history.len()],
            live_continued: vec![false; live.len()],
            history,
            live,
            scrolled_by: 0,
            main_linebuf: true,
            marker: None,
            scroll_cursor: None,
            scroll_selection: None,
            selection_history: Vec::new(),
            ops: Vec::new(),
        }
    }
}

impl Screen for ScriptedScreen {
    fn lines(&self) -> usize {
        self.lines
    }
    fn columns(&self) -> usize {
        self.columns
    }
    fn cursor_position(&self) -> (usize, usize) {
        self.cursor
    }
    fn history_count(&self) -> usize {
        self.history.len()
    }
    fn scrolled_by(&self) -> usize {
        self.scrolled_by
    }
    fn is_main_linebuf(&self) -> bool {
        self.main_linebuf
    }
    fn history_line(&self, idx: usize) -> Option<String> {
        // idx 0 = newest history line
        let n = self.history.len();
        if idx < n {
            self.history.get(n - 1 - idx).cloned()
        } else {
            None
        }
    }
    fn live_line(&self, idx: usize) -> Option<String> {
        self.live.get(idx).cloned()
    }
    fn history_line_continued(&self, idx: usize) -> bool {
        let n = self.history.len();
        idx < n && self.history_continued[n - 1 - idx]
    }
    fn live_line_continued(&self, idx: usize) -> bool {
        self.live_continued.get(idx).copied().unwrap_or(false)
    }
    fn scroll(&mut self, n: usize, up: bool) {
        self.ops.push(format!("scroll({n},{up})"));
        if up {
            self.scrolled_by = (self.scrolled_by + n).min(self.history.len());
        } else {
            self.scrolled_by = self.scrolled_by.saturating_sub(n);
        }
    }
    fn scroll_to_end(&mut self) {
        self.ops.push("scroll_to_end".into());
        self.scrolled_by = 0;
    }
    fn clear_selection(&mut self) {
        self.ops.push("clear_selection".into());
    }
    fn set_marker(&mut self, marker: Option<Regex>) {
        self.ops.push(format!("set_marker({})", marker.is_some()));
        self.marker = marker;
    }
    fn set_scroll_pause(&mut self, paused: bool) {
        self.ops.push(if paused { "pause" } else { "unpause" }.into());
    }
    fn flush_scroll_pending(&mut self) {
        self.ops.push("flush".into());
    }
    fn set_scroll_cursor(&mut self, cursor: Option<ScrollCursor>) {
        self.scroll_cursor = cursor;
    }
    fn set_scroll_selection(&mut self, selection: Option<SelectionRect>) {
        self.selection_history.push(selection);
        self.scroll_selection = selection;
    }
}

/// Recording tab-bar surface.
#[derive(Default)]
pub struct RecordingTabBar {
    pub hidden: bool,
    pub never_laid_out: bool,
    pub columns: usize,
    pub col: usize,
    pub segments: Vec<(String, SegmentStyle)>,
    pub dirty: usize,
    pub data_updates: usize,
}

impl RecordingTabBar {
    /// All drawn text concatenated, for contains-style assertions.
    pub fn text(&self) -> String {
        self.segments.iter().map(|(t, _)| t.as_str()).collect()
    }
}

impl TabBar for RecordingTabBar {
    fn is_visible(&self) -> bool {
        !self.hidden
    }
    fn laid_out_once(&self) -> bool {
        !self.hidden && !self.never_laid_out
    }
    fn columns(&self) -> usize {
        self.columns
    }
    fn cursor_col(&self) -> usize {
        self.col
    }
    fn begin_line(&mut self) {
        self.col = 0;
        self.segments.clear();
    }
    fn draw(&mut self, text: &str, style: SegmentStyle) {
        self.col += text.chars().count();
        self.segments.push((text.to_string(), style));
    }
    fn mark_dirty(&mut self) {
        self.dirty += 1;
    }
    fn update_data(&mut self) {
        self.data_updates += 1;
    }
}

/// Recording clipboard / error / wakeup sink.
#[derive(Default)]
pub struct RecordingHost {
    pub clipboard: Vec<String>,
    pub errors: Vec<(String, String)>,
    pub wakeups: usize,
}

impl Host for RecordingHost {
    fn set_clipboard_string(&mut self, text: &str) {
        self.clipboard.push(text.to_string());
    }
    fn show_error(&mut self, title: &str, message: &str) {
        self.errors.push((title.to_string(), message.to_string()));
    }
    fn wake_io_loop(&mut self) {
        self.wakeups += 1;
    }
}

/// One window's worth of fakes plus the mode under test.
pub struct TestWindow {
    pub mode: ScrollMode,
    pub screen: ScriptedScreen,
    pub tab_bar: RecordingTabBar,
    pub options: ScrollModeOptions,
    pub host: RecordingHost,
}

impl TestWindow {
    pub fn new(history: Vec<String>, live: Vec<String>, columns: usize) -> Self {
        Self {
            mode: ScrollMode::new(),
            screen: ScriptedScreen::new(history, live, columns),
            tab_bar: RecordingTabBar {
                columns: 140,
                ..Default::default()
            },
            options: ScrollModeOptions::default(),
            host: RecordingHost::default(),
        }
    }

    /// 100 history lines and 24 live rows of distinct text, 80 columns.
    pub fn with_scrollback() -> Self {
        let history = (0..100).map(|i| format!("history line {i}")).collect();
        let live = (0..24).map(|i| format!("live row {i}")).collect();
        Self::new(history, live, 80)
    }

    pub fn with_ctx<R>(
        &mut self,
        f: impl FnOnce(&mut ScrollMode, &mut WindowContext<'_>) -> R,
    ) -> R {
        let mut ctx = WindowContext {
            screen: &mut self.screen,
            tab_bar: &mut self.tab_bar,
            options: &self.options,
            host: &mut self.host,
        };
        f(&mut self.mode, &mut ctx)
    }

    pub fn enter(&mut self) {
        self.with_ctx(|m, ctx| m.enter(ctx, false));
    }

    pub fn exit(&mut self) {
        self.with_ctx(|m, ctx| m.exit(ctx));
    }

    pub fn key(&mut self, code: KeyCode) -> bool {
        self.keym(code, KeyModifiers::NONE)
    }

    pub fn keym(&mut self, code: KeyCode, mods: KeyModifiers) -> bool {
        let event = KeyEvent::new(code, mods);
        self.with_ctx(|m, ctx| m.handle_key(ctx, &event))
    }

    /// Feed a run of plain character keys.
    pub fn keys(&mut self, spec: &str) {
        for ch in spec.chars() {
            self.key(KeyCode::Char(ch));
        }
    }

    pub fn mouse(&mut self, repeat_count: i8, cell_x: usize, cell_y: usize) -> bool {
        let input = MouseInput {
            button: MouseButton::Left,
            repeat_count,
            cell_x,
            cell_y,
        };
        self.with_ctx(|m, ctx| m.handle_mouse(ctx, &input))
    }

    pub fn draw_status(&mut self) {
        self.with_ctx(|m, ctx| m.draw_status(ctx));
    }

    /// Absolute line index of the viewport's top row.
    pub fn viewport_top(&self) -> usize {
        self.screen.history.len() - self.screen.scrolled_by
    }
}
