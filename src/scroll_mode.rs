//! Modal scrollback navigation.
//!
//! When active, all keyboard and mouse input drives an independent cursor
//! over the scrollback buffer: vim-style motion, incremental
//! case-insensitive search with match highlighting, char/line/block
//! visual selection, prompt jumping, and clipboard yank. Child output is
//! paused on entry so the buffer stays stable while browsing, and flushed
//! on exit.
//!
//! ## Module layout
//!
//! - [`types`]: state enum, the `ScrollMode` struct, drag/search records
//! - `buffer`: absolute-line view over history + live lines
//! - `cursor`: motion, viewport scrolling, render synchronization
//! - `motion`: vim word motions
//! - `search`: case-folded substring search and the match marker
//! - `prompt`: shell-prompt detection and jumping
//! - `visual`: selection lifecycle, yank, text extraction
//! - `mouse`: click/drag dispatch and mouse auto-entry
//! - `keys`: key dispatch per state
//! - `status`: powerline status line in the tab bar

mod buffer;
mod cursor;
mod keys;
mod motion;
mod mouse;
mod prompt;
mod search;
mod status;
mod types;
mod visual;


pub use types::{DragState, ModeState, MouseInput, ScrollMode, SearchState};

use crate::host::{ScrollModeError, WindowContext};

impl ScrollMode {
    /// Activate scroll mode.
    ///
    /// When `silent`, a refused entry (tab bar unavailable) aborts without
    /// a user-visible error; mouse auto-entry uses this path.
    pub fn enter(&mut self, ctx: &mut WindowContext<'_>, silent: bool) {
        if !ctx.tab_bar.is_visible() || !ctx.tab_bar.laid_out_once() {
            if !silent {
                let err = ScrollModeError::TabBarHidden;
                ctx.host.show_error("Scroll mode unavailable", &err.to_string());
            }
            return;
        }
        self.active = true;
        self.state = ModeState::Navigate;
        self.search.query.clear();
        self.alt_screen = !ctx.screen.is_main_linebuf();

        // Pause child output before the first buffer read so the content
        // stays stable while browsing; raw bytes accumulate until exit.
        ctx.screen.set_scroll_pause(true);
        ctx.screen.clear_selection();

        // Cursor starts on the terminal cursor's line. The viewport is left
        // where the user had it; display clamping happens in sync_cursor.
        let (cursor_x, cursor_y) = ctx.screen.cursor_position();
        self.cursor_line = if self.alt_screen {
            cursor_y
        } else {
            ctx.screen.history_count() + cursor_y
        };
        self.cursor_x = self.snap_cell_x(ctx.screen, self.cursor_line, cursor_x);
        self.sync_cursor(ctx);
        ctx.tab_bar.mark_dirty();
        log::debug!(
            "scroll mode entered at ({}, {})",
            self.cursor_line,
            self.cursor_x
        );
    }

    /// Activate scroll mode directly in SEARCH state.
    pub fn enter_search(&mut self, ctx: &mut WindowContext<'_>) {
        self.enter(ctx, false);
        if self.active {
            self.search.backwards = false;
            self.search.query.clear();
            self.state = ModeState::Search;
            ctx.tab_bar.mark_dirty();
        }
    }

    /// Activate scroll mode on the nearest prompt line above the terminal
    /// cursor. Does nothing when no prompt exists or on the alternate
    /// screen (which has no prompt history).
    pub fn enter_prompt_jump(&mut self, ctx: &mut WindowContext<'_>) {
        if !ctx.screen.is_main_linebuf() {
            return;
        }
        let Some(prompt_line) = self.find_prompt_above_cursor(ctx.screen) else {
            return;
        };
        self.enter(ctx, false);
        if self.active {
            self.move_cursor_to(ctx, prompt_line, 0);
        }
    }

    /// Deactivate scroll mode and restore normal terminal state: clear the
    /// overlays and marker, emit output buffered during the pause, resume
    /// parsing, and snap the main buffer back to its bottom.
    pub fn exit(&mut self, ctx: &mut WindowContext<'_>) {
        if !self.active {
            return;
        }
        ctx.screen.set_scroll_cursor(None);
        ctx.screen.set_scroll_selection(None);
        self.clear_search_marker(ctx);
        ctx.screen.flush_scroll_pending();
        if !self.alt_screen {
            ctx.screen.scroll_to_end();
        }
        ctx.screen.set_scroll_pause(false);

        ctx.tab_bar.update_data();
        ctx.tab_bar.mark_dirty();

        self.active = false;
        self.state = ModeState::Navigate;
        self.alt_screen = false;
        self.drag = types::DragState::default();

        // Resume reading from the child PTY
        ctx.host.wake_io_loop();
        log::debug!("scroll mode exited");
    }
}
