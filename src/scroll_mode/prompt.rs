//! Shell-prompt detection and prompt jumping.
//!
//! Fallback heuristic for hosts without OSC 133 shell integration: a
//! pattern over common prompt endings and REPL markers, matched
//! case-sensitively against extracted line text.

use std::sync::LazyLock;

use regex::Regex;

use super::types::ScrollMode;
use crate::host::{Screen, WindowContext};

/// Prompt endings and special prompt symbols, kept as data so the match
/// loop stays generic.
static PROMPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"❯",                      // starship, pure, spaceship
        r"|➜",                     // robbyrussell (oh-my-zsh default)
        r"|⟩",                     // some minimal prompts
        r"|λ",                     // haskell-style prompts
        r"|:\)[\s\x00]*$",         // smiley prompt: "hostname :) "
        r"|[$#%>][\s\x00]*$",      // line ending with $ # % >
        r"|>>>\s",                 // python REPL
        r"|In\s*\[\d+\]",          // IPython / Jupyter
    ))
    .expect("PROMPT is a valid static regex")
});

/// Whether a line of extracted text looks like a shell prompt.
pub(crate) fn is_prompt_line(text: &str) -> bool {
    PROMPT.is_match(text)
}

impl ScrollMode {
    /// Jump the cursor to the nearest prompt line in the given direction,
    /// wrapping around the buffer once.
    pub(crate) fn jump_to_prompt(&mut self, ctx: &mut WindowContext<'_>, backwards: bool) {
        let total = self.total_lines(ctx.screen);
        let cur = self.cursor_line;
        let scan: Box<dyn Iterator<Item = usize>> = if backwards {
            Box::new((0..cur).rev().chain((cur..total).rev()))
        } else {
            Box::new((cur + 1..total).chain(0..=cur.min(total.saturating_sub(1))))
        };
        for abs_line in scan {
            if is_prompt_line(&self.line_text(ctx.screen, abs_line)) {
                self.move_cursor_to(ctx, abs_line, 0);
                return;
            }
        }
    }

    /// Find the nearest prompt line strictly above the real terminal
    /// cursor, for prompt-gated entry. Main buffer only.
    pub(crate) fn find_prompt_above_cursor(&self, screen: &dyn Screen) -> Option<usize> {
        let (_, cursor_y) = screen.cursor_position();
        let real_cursor_abs = screen.history_count() + cursor_y;
        (0..real_cursor_abs)
            .rev()
            .find(|&abs_line| is_prompt_line(&self.line_text(screen, abs_line)))
    }
}
