//! Modal scrollback navigation core for terminal emulators.
//!
//! The host terminal embeds [`scroll_mode::ScrollMode`] and routes key and
//! mouse events through it while active; everything the mode needs from
//! the emulator (screen buffer, tab bar surface, options, clipboard) comes
//! in through the capability traits in [`host`].

pub mod host;
pub mod scroll_mode;
pub mod selection;
pub mod text_cells;

pub use host::{
    Host, Rgb, Screen, ScrollCursor, ScrollModeError, ScrollModeOptions, SegmentStyle,
    SelectionRect, TabBar, WindowContext,
};
pub use scroll_mode::{ModeState, MouseInput, ScrollMode};
pub use selection::{Selection, SelectionMode};
