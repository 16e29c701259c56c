//! Embeddable components.

pub mod console;

pub use console::Console;
