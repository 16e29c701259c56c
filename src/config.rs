//! Environment and per-console configuration.

use std::env;

/// Canonical line terminator used for reconciled output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Crlf,
    Lf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Crlf => "\r\n",
            LineEnding::Lf => "\n",
        }
    }
}

/// Per-console settings.
#[derive(Debug, Clone)]
pub struct ConsoleOptions {
    /// Record submitted lines and enable ctrl+arrow recall.
    pub history: bool,
    /// Cap on stored history entries; `None` keeps everything.
    pub history_limit: Option<usize>,
    /// Terminator appended to reconciled output messages.
    pub line_ending: LineEnding,
    /// Rendered ahead of the editable region; not part of the buffer.
    pub prompt: String,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self {
            history: false,
            history_limit: None,
            line_ending: LineEnding::Crlf,
            prompt: String::new(),
        }
    }
}

/// Process-wide debug knobs.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub debug: bool,
    pub write_log: Option<String>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            debug: env_flag("CONSOLE_TUI_DEBUG"),
            write_log: env_string_opt("CONSOLE_TUI_WRITE_LOG"),
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}
