//! Submitted-line history and the recall cursor.

/// What a recall step asks the caller to do with the editable region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recall {
    /// Replace the editable region with this entry, cursor at the end.
    Replace(String),
    /// Clear the editable region (walked off the most-recent end).
    Clear,
    /// Nothing to do (no entries, or not browsing).
    Ignored,
}

/// Log of submitted lines plus a browse cursor.
///
/// `entries` is ordered oldest first; `browse` is `None` when the user is not
/// navigating history. Browsing state survives ordinary edits and is reset by
/// the next submission.
#[derive(Debug, Default)]
pub struct CommandHistory {
    entries: Vec<String>,
    browse: Option<usize>,
    limit: Option<usize>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A limit drops the oldest entry once exceeded. No limit means the log
    /// grows for the life of the console.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Record a submitted line. Blank lines and a repeat of the most recent
    /// entry are not stored. Any browse in progress ends here.
    pub fn push(&mut self, line: &str) {
        self.browse = None;
        if line.trim().is_empty() {
            return;
        }
        if self.entries.last().map(|entry| entry == line).unwrap_or(false) {
            return;
        }
        self.entries.push(line.to_string());
        if let Some(limit) = self.limit {
            while self.entries.len() > limit {
                self.entries.remove(0);
            }
        }
    }

    /// Step to the previous (older) entry. Enters browsing at the most recent
    /// entry; at the oldest entry it stays put.
    pub fn recall_prev(&mut self) -> Recall {
        if self.entries.is_empty() {
            return Recall::Ignored;
        }
        let idx = match self.browse {
            None => self.entries.len() - 1,
            Some(current) => current.saturating_sub(1),
        };
        self.browse = Some(idx);
        Recall::Replace(self.entries[idx].clone())
    }

    /// Step to the next (newer) entry; stepping past the most recent entry
    /// exits browsing and clears the editable region.
    pub fn recall_next(&mut self) -> Recall {
        let Some(current) = self.browse else {
            return Recall::Ignored;
        };
        if current + 1 < self.entries.len() {
            self.browse = Some(current + 1);
            Recall::Replace(self.entries[current + 1].clone())
        } else {
            self.browse = None;
            Recall::Clear
        }
    }

    pub fn reset_browse(&mut self) {
        self.browse = None;
    }

    pub fn is_browsing(&self) -> bool {
        self.browse.is_some()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandHistory, Recall};

    #[test]
    fn browse_walks_back_and_floors_at_oldest() {
        let mut history = CommandHistory::new();
        history.push("a");
        history.push("b");

        assert_eq!(history.recall_prev(), Recall::Replace("b".to_string()));
        assert_eq!(history.recall_prev(), Recall::Replace("a".to_string()));
        assert_eq!(history.recall_prev(), Recall::Replace("a".to_string()));
    }

    #[test]
    fn walking_past_newest_clears_and_exits() {
        let mut history = CommandHistory::new();
        history.push("a");
        history.push("b");

        history.recall_prev();
        history.recall_prev();
        assert_eq!(history.recall_next(), Recall::Replace("b".to_string()));
        assert_eq!(history.recall_next(), Recall::Clear);
        assert!(!history.is_browsing());
        assert_eq!(history.recall_next(), Recall::Ignored);
    }

    #[test]
    fn empty_history_ignores_recall() {
        let mut history = CommandHistory::new();
        assert_eq!(history.recall_prev(), Recall::Ignored);
        assert_eq!(history.recall_next(), Recall::Ignored);
    }

    #[test]
    fn blank_and_duplicate_lines_are_not_stored() {
        let mut history = CommandHistory::new();
        history.push("look");
        history.push("look");
        history.push("   ");
        assert_eq!(history.entries(), &["look".to_string()]);
    }

    #[test]
    fn limit_drops_oldest() {
        let mut history = CommandHistory::with_limit(2);
        history.push("a");
        history.push("b");
        history.push("c");
        assert_eq!(history.entries(), &["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn push_ends_browsing() {
        let mut history = CommandHistory::new();
        history.push("a");
        history.recall_prev();
        assert!(history.is_browsing());
        history.push("b");
        assert!(!history.is_browsing());
    }
}
