//! Console-style text control.
//!
//! One buffer, two regions: everything before the boundary is finished
//! output and cannot be edited; everything after it is the line being
//! composed. Output may arrive from any thread while the user is mid-edit;
//! it is spliced in ahead of the editable region with the pending input and
//! relative cursor position preserved.
//!
//! Invariant: the boundary is owned by [`core::region::RegionController`]
//! and moves only when output is reconciled or the input is cleared. Mutate
//! the surface through the controller (or the [`Console`] widget) or the
//! boundary desynchronizes.
//!
//! # Public API Overview
//! - Embed a [`Console`] behind the [`Component`]/[`Focusable`] traits and
//!   feed it events from [`parse_input_events`].
//! - Deliver output from any thread via [`ConsoleSender`], draining it with
//!   `Console::pump` on the event thread.
//! - Receive submitted lines through `Console::set_on_input`.
//! - Reuse the region logic standalone via [`RegionController`] over any
//!   [`TextSurface`].

pub mod config;
pub mod logging;

pub mod core;
pub mod widgets;

/// The console component.
pub use crate::widgets::Console;

/// Configuration types.
pub use crate::config::{ConsoleOptions, EnvConfig, LineEnding};

/// Region-boundary control over a text surface.
pub use crate::core::region::{
    normalize_message, KeyClass, KeyDecision, RegionController, TextSurface,
};
pub use crate::core::surface::StringSurface;

/// Submitted-line history.
pub use crate::core::history::{CommandHistory, Recall};

/// Cross-thread output delivery.
pub use crate::core::outbound::{ConsoleSender, OutboundQueue};

/// Output message filters.
pub use crate::core::filter::{
    AnsiStripFilter, MessageFilter, StyleSpans, StyledSpan, TextStyle,
};

/// Keybinding configuration and default mappings.
pub use crate::core::keybindings::{
    default_console_keybindings_handle, ConsoleAction, ConsoleKeybindingsConfig,
    ConsoleKeybindingsHandle, ConsoleKeybindingsManager, KeyId, DEFAULT_CONSOLE_KEYBINDINGS,
};

/// Keyboard input parsing and matching helpers.
pub use crate::core::input::{matches_key, normalize_key_id, parse_key, parse_text};
pub use crate::core::input_event::{parse_input_events, InputEvent};

/// Component traits and cursor metadata.
pub use crate::core::component::{Component, CursorPos, Focusable};

/// Visible width helper that ignores ANSI control sequences.
pub use crate::core::text::width::visible_width;

/// Returns whether a component exposes focus behavior via [`Focusable`].
pub fn is_focusable(component: &mut dyn Component) -> bool {
    component.as_focusable().is_some()
}
