//! Debug write log.
//!
//! Enabled via `CONSOLE_TUI_WRITE_LOG=<path>`; every call appends one line.
//! When disabled it is a no-op and costs nothing per event.

use std::fs::{File, OpenOptions};
use std::io::Write;

use crate::config::EnvConfig;

pub struct WriteLog {
    file: Option<File>,
}

impl WriteLog {
    pub fn from_env(config: &EnvConfig) -> Self {
        let file = config.write_log.as_deref().and_then(|path| {
            OpenOptions::new().create(true).append(true).open(path).ok()
        });
        Self { file }
    }

    pub fn disabled() -> Self {
        Self { file: None }
    }

    pub fn enabled(&self) -> bool {
        self.file.is_some()
    }

    /// Append one line, best effort.
    pub fn line(&mut self, message: &str) {
        if let Some(file) = self.file.as_mut() {
            let _ = writeln!(file, "{message}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::WriteLog;
    use crate::config::EnvConfig;

    #[test]
    fn disabled_log_is_inert() {
        let mut log = WriteLog::disabled();
        assert!(!log.enabled());
        log.line("dropped");
    }

    #[test]
    fn missing_path_stays_disabled() {
        let config = EnvConfig {
            debug: false,
            write_log: None,
        };
        assert!(!WriteLog::from_env(&config).enabled());
    }
}
