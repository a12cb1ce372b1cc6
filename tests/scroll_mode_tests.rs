//! End-to-end scenarios for scroll mode, driven through the public API
//! against scripted fake collaborators.
//!
//! These tests exercise the full stack — key/mouse dispatch, the buffer
//! view, search, selection, the viewport controller, and the lifecycle
//! contract with the host — with no terminal, GPU, or PTY involved.
//!
//! Coverage targets:
//! - Entry + `G`: cursor and viewport land on the last buffer line
//! - Incremental search with marker, `n` repetition, and wrap-around
//! - Word motion over punctuation
//! - Block selection: raw corner protocol and column extraction
//! - Wide-character right-motion
//! - Mouse drag auto-entry with anchor recomputed against the viewport
//! - Pause/flush/resume ordering and buffer immutability
//! - Cursor invariants under arbitrary key batches

mod common;

use common::TestWindow;
use crossterm::event::{KeyCode, KeyModifiers};
use scrollnav::{ModeState, SelectionMode};

// ---------------------------------------------------------------------------
// Scenario: enter + G
// ---------------------------------------------------------------------------

#[test]
fn enter_then_goto_bottom_lands_on_last_line() {
    let mut win = TestWindow::with_scrollback();
    win.screen.cursor = (0, 10);
    win.screen.scrolled_by = 50;
    win.enter();
    assert!(win.mode.is_active());

    win.key(KeyCode::Char('G'));
    assert_eq!(win.mode.cursor(), (123, 0));
    // Line 123 is the bottom viewport row
    assert_eq!(win.viewport_top(), 100);
    assert_eq!(win.viewport_top() + win.screen.lines - 1, 123);
}

#[test]
fn goto_top_scrolls_to_oldest_history() {
    let mut win = TestWindow::with_scrollback();
    win.enter();
    win.key(KeyCode::Char('g'));
    assert_eq!(win.mode.cursor(), (0, 0));
    assert_eq!(win.viewport_top(), 0);
}

// ---------------------------------------------------------------------------
// Scenario: incremental search
// ---------------------------------------------------------------------------

fn search_window() -> TestWindow {
    let mut lines: Vec<String> = (0..124).map(|i| format!("row {i}")).collect();
    lines[5] = "Hello world".to_string();
    lines[40] = "............Hello".to_string();
    let live = lines.split_off(100);
    TestWindow::new(lines, live, 80)
}

#[test]
fn incremental_search_finds_jumps_and_wraps() {
    let mut win = search_window();
    win.enter();
    win.key(KeyCode::Char('g'));
    assert_eq!(win.mode.cursor(), (0, 0));

    win.key(KeyCode::Char('/'));
    win.keys("hello");
    win.key(KeyCode::Enter);
    assert_eq!(win.mode.state(), ModeState::Navigate);
    assert_eq!(win.mode.cursor(), (5, 0));
    assert!(win.screen.marker.is_some(), "marker installed on commit");

    win.key(KeyCode::Char('n'));
    assert_eq!(win.mode.cursor(), (40, 12));
    win.key(KeyCode::Char('n'));
    assert_eq!(win.mode.cursor(), (5, 0), "second n wraps to the first match");
}

#[test]
fn search_marker_is_removed_when_query_empties() {
    let mut win = search_window();
    win.enter();
    win.key(KeyCode::Char('/'));
    win.keys("he");
    assert!(win.screen.marker.is_some());
    win.key(KeyCode::Backspace);
    assert!(win.screen.marker.is_some());
    win.key(KeyCode::Backspace);
    assert!(win.screen.marker.is_none(), "empty query clears the marker");
}

// ---------------------------------------------------------------------------
// Scenario: word motion with punctuation
// ---------------------------------------------------------------------------

#[test]
fn word_motion_stops_on_punctuation_groups() {
    let mut win = TestWindow::new(
        Vec::new(),
        vec!["foo.bar baz".to_string(), String::new()],
        80,
    );
    win.options.word_characters = String::new();
    win.enter();
    win.key(KeyCode::Char('g'));

    win.key(KeyCode::Char('w'));
    assert_eq!(win.mode.cursor(), (0, 3));
    win.key(KeyCode::Char('w'));
    assert_eq!(win.mode.cursor(), (0, 4));
    win.key(KeyCode::Char('w'));
    assert_eq!(win.mode.cursor(), (0, 8));
}

// ---------------------------------------------------------------------------
// Scenario: block selection
// ---------------------------------------------------------------------------

#[test]
fn block_selection_protocol_and_extraction() {
    let live: Vec<String> = (0..24).map(|_| "abcdefgh".to_string()).collect();
    let mut win = TestWindow::new(Vec::new(), live, 80);
    win.screen.cursor = (2, 10);
    win.enter();
    assert_eq!(win.mode.cursor(), (10, 2));

    win.keym(KeyCode::Char('v'), KeyModifiers::CONTROL);
    win.keys("jjll");

    let rect = win.screen.scroll_selection.expect("selection pushed");
    assert_eq!(rect.mode, SelectionMode::Block);
    assert_eq!((rect.start_x, rect.end_x), (2, 4), "raw corners, unswapped");
    assert_eq!((rect.start_y, rect.end_y), (10, 12));

    win.key(KeyCode::Char('y'));
    assert_eq!(win.host.clipboard.last().unwrap(), "cde\ncde\ncde");
    assert!(!win.mode.is_active(), "yank leaves scroll mode");
}

// ---------------------------------------------------------------------------
// Scenario: wide-character right-move
// ---------------------------------------------------------------------------

#[test]
fn right_move_advances_past_wide_char() {
    let mut win = TestWindow::new(
        Vec::new(),
        vec!["あi".to_string(), String::new()],
        80,
    );
    win.enter();
    win.key(KeyCode::Char('g'));
    win.key(KeyCode::Char('l'));
    assert_eq!(win.mode.cursor(), (0, 2), "l skips the trailing half-cell");
}

// ---------------------------------------------------------------------------
// Scenario: mouse drag auto-enter
// ---------------------------------------------------------------------------

#[test]
fn drag_from_inactive_enters_with_char_selection() {
    let mut win = TestWindow::with_scrollback();
    win.options.scroll_mode_mouse = true;
    win.screen.scrolled_by = 25; // viewport top = absolute line 75

    assert!(!win.mouse(1, 3, 5), "plain press passes through");
    assert!(!win.mode.is_active());

    assert!(win.mouse(0, 10, 8), "drag consumes and auto-enters");
    assert!(win.mode.is_active());
    let sel = win.mode.selection().expect("char selection started");
    assert_eq!(sel.mode, SelectionMode::Char);
    assert_eq!((sel.anchor_line, sel.anchor_x), (80, 3));
    assert_eq!(win.mode.cursor(), (83, 10));
}

#[test]
fn double_click_from_inactive_enters_and_selects_word() {
    let live: Vec<String> = (0..24).map(|_| "lorem ipsum dolor".to_string()).collect();
    let mut win = TestWindow::new(Vec::new(), live, 80);
    win.options.scroll_mode_mouse = true;

    assert!(win.mouse(2, 8, 4));
    assert!(win.mode.is_active());
    let sel = win.mode.selection().expect("word selected");
    assert_eq!((sel.anchor_line, sel.anchor_x), (4, 6));
    assert_eq!(win.mode.cursor(), (4, 10));

    win.key(KeyCode::Char('y'));
    assert_eq!(win.host.clipboard.last().unwrap(), "ipsum");
}

// ---------------------------------------------------------------------------
// Lifecycle contract
// ---------------------------------------------------------------------------

#[test]
fn pause_precedes_reads_and_resume_follows_flush_and_scroll() {
    let mut win = TestWindow::with_scrollback();
    win.enter();
    win.keys("kkjj");
    win.exit();

    let ops = &win.screen.ops;
    assert_eq!(ops.first().map(String::as_str), Some("pause"));
    let flush = ops.iter().position(|o| o == "flush").expect("flushed");
    let to_end = ops.iter().position(|o| o == "scroll_to_end").expect("scrolled");
    let unpause = ops.iter().position(|o| o == "unpause").expect("resumed");
    assert!(flush < to_end, "buffered bytes flushed before scroll-to-end");
    assert!(to_end < unpause, "parsing resumes last");
    assert_eq!(win.host.wakeups, 1, "I/O loop woken once on exit");
}

#[test]
fn enter_exit_without_keys_leaves_screen_state_unchanged() {
    let mut win = TestWindow::with_scrollback();
    let history = win.screen.history.clone();
    let live = win.screen.live.clone();
    win.enter();
    win.exit();
    assert_eq!(win.screen.history, history);
    assert_eq!(win.screen.live, live);
    assert_eq!(win.screen.scrolled_by, 0);
    assert!(win.screen.marker.is_none());
    assert!(win.screen.scroll_cursor.is_none());
    assert!(win.screen.scroll_selection.is_none());
}

#[test]
fn entry_error_is_loud_interactively_and_silent_for_mouse() {
    let mut win = TestWindow::with_scrollback();
    win.tab_bar.hidden = true;
    win.enter();
    assert!(!win.mode.is_active());
    assert_eq!(win.host.errors.len(), 1);

    win.options.scroll_mode_mouse = true;
    win.mouse(2, 0, 0); // double-click auto-enter path is silent
    assert!(!win.mode.is_active());
    assert_eq!(win.host.errors.len(), 1, "no second error from mouse entry");
}

// ---------------------------------------------------------------------------
// Invariants
// ---------------------------------------------------------------------------

/// Cursor stays in range, on a character start cell, and inside the
/// viewport after every command in an arbitrary batch.
#[test]
fn cursor_invariants_hold_under_key_batches() {
    let mut lines: Vec<String> = (0..60).map(|i| format!("text line {i} with words")).collect();
    lines[7] = "wide あいうえお chars".to_string();
    lines[9] = String::new();
    let live = lines.split_off(40);
    let mut win = TestWindow::new(lines, live, 40);
    win.enter();

    let script = "ggjjllwwebkk$0GwbhheeklujdnN";
    for ch in script.chars() {
        win.key(KeyCode::Char(ch));

        let (line, x) = win.mode.cursor();
        let total = win.screen.history.len() + win.screen.lines;
        assert!(line < total, "line {line} out of range after '{ch}'");
        assert!(x < win.screen.columns, "x {x} out of range after '{ch}'");

        // Never on the trailing half of a wide character
        let h = win.screen.history.len();
        let text = if line < h {
            win.screen.history[line].clone()
        } else {
            win.screen.live[line - h].clone()
        };
        assert_eq!(
            scrollnav::text_cells::snap_cell(&text, x),
            x,
            "cursor off a character start cell after '{ch}'"
        );

        let vt = win.viewport_top();
        assert!(
            line >= vt && line < vt + win.screen.lines,
            "cursor left the viewport after '{ch}'"
        );
    }
}

#[test]
fn selection_survives_mode_switches_and_extracts_consistently() {
    let live: Vec<String> = vec![
        "first line".to_string(),
        "second line".to_string(),
        "third".to_string(),
    ];
    let mut win = TestWindow::new(Vec::new(), live, 80);
    win.enter();
    win.key(KeyCode::Char('g'));
    win.key(KeyCode::Char('v'));
    win.key(KeyCode::Char('j'));

    // char → line → back to char keeps anchor and cursor
    win.key(KeyCode::Char('V'));
    assert_eq!(win.mode.selection().unwrap().mode, SelectionMode::Line);
    win.key(KeyCode::Char('V'));
    assert_eq!(win.mode.selection().unwrap().mode, SelectionMode::Char);
    let sel = win.mode.selection().unwrap();
    assert_eq!((sel.anchor_line, sel.anchor_x), (0, 0));
    assert_eq!(win.mode.cursor(), (1, 0));

    win.keym(KeyCode::Char('y'), KeyModifiers::SHIFT);
    assert_eq!(win.host.clipboard.last().unwrap(), "first line\ns");
    assert!(win.mode.is_active(), "Y yanks without leaving the mode");
    assert_eq!(win.mode.state(), ModeState::Navigate);
}

#[test]
fn status_line_reports_mode_and_position_segments() {
    let mut win = TestWindow::with_scrollback();
    win.screen.cursor = (4, 10);
    win.enter();
    win.draw_status();
    let text = win.tab_bar.text();
    assert!(text.contains(" NORMAL "));
    assert!(text.contains(" 111:5 "));
    assert!(text.contains(" 111/124 "));

    win.key(KeyCode::Char('v'));
    win.draw_status();
    assert!(win.tab_bar.text().contains(" VISUAL "));
}
