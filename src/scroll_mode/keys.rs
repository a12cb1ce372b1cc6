//! Key dispatch for the NAVIGATE / SEARCH / SELECT states.
//!
//! While the mode is active every press/repeat event is consumed, mapped
//! or not, so nothing leaks into the terminal. Release events are
//! consumed without mutation.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::types::{ModeState, ScrollMode};
use crate::host::WindowContext;
use crate::selection::SelectionMode;

/// No modifiers held.
fn plain(mods: KeyModifiers) -> bool {
    mods.is_empty()
}

/// At most shift held (symbol characters like `?` and `$` arrive with it).
fn shifted(mods: KeyModifiers) -> bool {
    mods.difference(KeyModifiers::SHIFT).is_empty()
}

/// Case-normalized view of a key event: terminals report shift+n either as
/// `Char('N')` or as `Char('n')` with the shift modifier, so uppercase
/// letters fold to lowercase with shift added and the arms below match one
/// canonical shape.
fn normalize(event: &KeyEvent) -> (KeyCode, KeyModifiers) {
    let mut mods = event.modifiers;
    let code = match event.code {
        KeyCode::Char(ch) if ch.is_ascii_uppercase() => {
            mods |= KeyModifiers::SHIFT;
            KeyCode::Char(ch.to_ascii_lowercase())
        }
        code => code,
    };
    (code, mods)
}

impl ScrollMode {
    /// Handle a key event. Returns true when the event was consumed.
    pub fn handle_key(&mut self, ctx: &mut WindowContext<'_>, event: &KeyEvent) -> bool {
        if !self.active {
            return false;
        }
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {}
            KeyEventKind::Release => return true,
        }
        match self.state {
            ModeState::Navigate => self.navigate_key(ctx, event),
            ModeState::Search => self.search_key(ctx, event),
            ModeState::Select(_) => self.select_key(ctx, event),
        }
    }

    fn navigate_key(&mut self, ctx: &mut WindowContext<'_>, event: &KeyEvent) -> bool {
        let (code, mods) = normalize(event);
        match code {
            KeyCode::Char('q') if plain(mods) => {
                self.exit(ctx);
                true
            }
            KeyCode::Esc if plain(mods) => {
                self.exit(ctx);
                true
            }
            KeyCode::Char('/') if shifted(mods) => {
                self.open_search(ctx, false);
                true
            }
            KeyCode::Char('s') if mods == KeyModifiers::ALT => {
                self.open_search(ctx, false);
                true
            }
            KeyCode::Char('?') if shifted(mods) => {
                self.open_search(ctx, true);
                true
            }
            KeyCode::Char('n') if plain(mods) => {
                if !self.search.query.is_empty() {
                    self.jump_to_match(ctx, self.search.backwards);
                }
                true
            }
            KeyCode::Char('n') if mods == KeyModifiers::SHIFT => {
                if !self.search.query.is_empty() {
                    self.jump_to_match(ctx, !self.search.backwards);
                }
                true
            }
            KeyCode::Char('u') if mods == KeyModifiers::ALT => {
                self.jump_to_prompt(ctx, true);
                true
            }
            KeyCode::Char('n') if mods == KeyModifiers::ALT => {
                self.jump_to_prompt(ctx, false);
                true
            }
            KeyCode::Char('v') if plain(mods) => {
                self.start_selection(ctx, SelectionMode::Char);
                true
            }
            KeyCode::Char('v') if mods == KeyModifiers::SHIFT => {
                self.start_selection(ctx, SelectionMode::Line);
                true
            }
            KeyCode::Char('v') if mods == KeyModifiers::CONTROL => {
                self.start_selection(ctx, SelectionMode::Block);
                true
            }
            _ => self.movement_key(ctx, event),
        }
    }

    fn select_key(&mut self, ctx: &mut WindowContext<'_>, event: &KeyEvent) -> bool {
        let (code, mods) = normalize(event);
        match code {
            // Escape yanks the selection and leaves scroll mode entirely
            KeyCode::Esc if plain(mods) => {
                self.yank_selection(ctx, false);
                true
            }
            KeyCode::Char('q') if plain(mods) => {
                self.exit(ctx);
                true
            }
            KeyCode::Char('y') if plain(mods) => {
                self.yank_selection(ctx, false);
                true
            }
            KeyCode::Char('y') if mods == KeyModifiers::SHIFT => {
                self.yank_selection(ctx, true);
                true
            }
            KeyCode::Char('o') if plain(mods) => {
                self.swap_selection_ends(ctx);
                true
            }
            KeyCode::Char('v') if plain(mods) => {
                self.toggle_selection_mode(ctx, SelectionMode::Char);
                true
            }
            KeyCode::Char('v') if mods == KeyModifiers::SHIFT => {
                self.toggle_selection_mode(ctx, SelectionMode::Line);
                true
            }
            KeyCode::Char('v') if mods == KeyModifiers::CONTROL => {
                self.toggle_selection_mode(ctx, SelectionMode::Block);
                true
            }
            KeyCode::Char('n') if plain(mods) => {
                if !self.search.query.is_empty() {
                    self.jump_to_match(ctx, self.search.backwards);
                }
                true
            }
            KeyCode::Char('n') if mods == KeyModifiers::SHIFT => {
                if !self.search.query.is_empty() {
                    self.jump_to_match(ctx, !self.search.backwards);
                }
                true
            }
            // Opening search drops the selection
            KeyCode::Char('/') if shifted(mods) => {
                self.open_search(ctx, false);
                true
            }
            KeyCode::Char('s') if mods == KeyModifiers::ALT => {
                self.open_search(ctx, false);
                true
            }
            KeyCode::Char('?') if shifted(mods) => {
                self.open_search(ctx, true);
                true
            }
            _ => self.movement_key(ctx, event),
        }
    }

    fn search_key(&mut self, ctx: &mut WindowContext<'_>, event: &KeyEvent) -> bool {
        let mods = event.modifiers;
        match event.code {
            KeyCode::Esc if plain(mods) => {
                self.clear_search_marker(ctx);
                self.search.query.clear();
                self.state = ModeState::Navigate;
                ctx.tab_bar.mark_dirty();
                true
            }
            KeyCode::Enter if plain(mods) => {
                self.state = ModeState::Navigate;
                ctx.tab_bar.mark_dirty();
                true
            }
            KeyCode::Backspace if plain(mods) => {
                if self.search.query.pop().is_some() {
                    if self.search.query.is_empty() {
                        self.clear_search_marker(ctx);
                    } else {
                        self.apply_search_marker(ctx);
                    }
                }
                ctx.tab_bar.mark_dirty();
                true
            }
            KeyCode::Char('u') if mods == KeyModifiers::CONTROL => {
                self.search.query.clear();
                self.clear_search_marker(ctx);
                ctx.tab_bar.mark_dirty();
                true
            }
            // Printable input appends to the query, with the original case
            KeyCode::Char(ch) if shifted(mods) && !ch.is_control() => {
                self.search.query.push(ch);
                self.apply_search_marker(ctx);
                self.jump_to_nearest_match(ctx);
                ctx.tab_bar.mark_dirty();
                true
            }
            _ => true,
        }
    }

    /// Cursor motion shared by NAVIGATE and SELECT.
    fn movement_key(&mut self, ctx: &mut WindowContext<'_>, event: &KeyEvent) -> bool {
        let (code, mods) = normalize(event);
        let num_lines = ctx.screen.lines() as isize;
        match code {
            KeyCode::Char('j') if plain(mods) => self.move_cursor(ctx, 1, 0),
            KeyCode::Down => self.move_cursor(ctx, 1, 0),
            KeyCode::Char('k') if plain(mods) => self.move_cursor(ctx, -1, 0),
            KeyCode::Up => self.move_cursor(ctx, -1, 0),
            KeyCode::Char('h') if plain(mods) => self.move_cursor(ctx, 0, -1),
            KeyCode::Left => self.move_cursor(ctx, 0, -1),
            KeyCode::Char('l') if plain(mods) => self.move_cursor(ctx, 0, 1),
            KeyCode::Right => self.move_cursor(ctx, 0, 1),

            KeyCode::Char('d') if plain(mods) || mods == KeyModifiers::CONTROL => {
                self.move_cursor(ctx, (num_lines / 2).max(1), 0)
            }
            KeyCode::Char('u') if plain(mods) || mods == KeyModifiers::CONTROL => {
                self.move_cursor(ctx, -((num_lines / 2).max(1)), 0)
            }
            KeyCode::Char('f') if mods == KeyModifiers::CONTROL => {
                self.move_cursor(ctx, num_lines, 0)
            }
            KeyCode::PageDown => self.move_cursor(ctx, num_lines, 0),
            KeyCode::Char('b') if mods == KeyModifiers::CONTROL => {
                self.move_cursor(ctx, -num_lines, 0)
            }
            KeyCode::PageUp => self.move_cursor(ctx, -num_lines, 0),

            KeyCode::Char('g') if plain(mods) => self.move_cursor_to(ctx, 0, 0),
            KeyCode::Char('g') if mods == KeyModifiers::SHIFT => {
                let last = self.total_lines(ctx.screen).saturating_sub(1);
                self.move_cursor_to(ctx, last, 0);
            }

            KeyCode::Char('0') if plain(mods) => {
                self.cursor_x = 0;
                self.sync_cursor(ctx);
                ctx.tab_bar.mark_dirty();
            }
            KeyCode::Char('$') if shifted(mods) => {
                self.cursor_x = ctx.screen.columns().saturating_sub(1);
                self.cursor_x = self.snap_cell_x(ctx.screen, self.cursor_line, self.cursor_x);
                self.sync_cursor(ctx);
                ctx.tab_bar.mark_dirty();
            }

            KeyCode::Char('w') if plain(mods) => self.word_move_forward(ctx, false),
            KeyCode::Char('e') if plain(mods) => self.word_move_forward(ctx, true),
            KeyCode::Char('b') if plain(mods) => self.word_move_backward(ctx),

            _ => {} // swallow unmapped keys
        }
        true
    }

    /// Clear any selection and move to SEARCH with an empty query.
    fn open_search(&mut self, ctx: &mut WindowContext<'_>, backwards: bool) {
        let had_selection = matches!(self.state, ModeState::Select(_));
        self.search.backwards = backwards;
        self.search.query.clear();
        self.clear_search_marker(ctx);
        self.state = ModeState::Search;
        if had_selection {
            self.sync_cursor(ctx);
        }
        ctx.tab_bar.mark_dirty();
    }
}
