//! Text helpers (ANSI scanning, width calculations, grapheme/word boundaries).
//!
//! These helpers are pure (string in/string out) and live under `core` so
//! widgets can depend on them without pulling in anything host-specific.

pub mod ansi;
pub mod utils;
pub mod width;
