//! Console widget.

use crate::config::{ConsoleOptions, EnvConfig};
use crate::core::component::{Component, CursorPos, Focusable};
use crate::core::filter::MessageFilter;
use crate::core::history::{CommandHistory, Recall};
use crate::core::input_event::InputEvent;
use crate::core::keybindings::{ConsoleAction, ConsoleKeybindingsHandle};
use crate::core::outbound::{ConsoleSender, OutboundQueue};
use crate::core::region::{
    normalize_message, KeyClass, KeyDecision, RegionController, TextSurface,
};
use crate::core::surface::StringSurface;
use crate::core::text::utils::{
    grapheme_segments, next_grapheme_end, next_word_boundary, prev_grapheme_start,
    prev_word_boundary,
};
use crate::core::text::width::visible_width;
use crate::logging::WriteLog;

/// Console component: finished output above, the line being composed below,
/// in one buffer. Output can arrive from any thread via [`Console::sender`]
/// and is spliced in ahead of the editable region without disturbing it.
pub struct Console {
    surface: StringSurface,
    region: RegionController,
    history: CommandHistory,
    options: ConsoleOptions,
    keybindings: ConsoleKeybindingsHandle,
    filters: Vec<Box<dyn MessageFilter>>,
    outbound: OutboundQueue,
    on_input: Option<Box<dyn FnMut(String)>>,
    focused: bool,
    last_cursor_pos: Option<CursorPos>,
    log: WriteLog,
}

impl Console {
    pub fn new(keybindings: ConsoleKeybindingsHandle) -> Self {
        Self::with_options(keybindings, ConsoleOptions::default())
    }

    pub fn with_options(keybindings: ConsoleKeybindingsHandle, options: ConsoleOptions) -> Self {
        let history = match options.history_limit {
            Some(limit) => CommandHistory::with_limit(limit),
            None => CommandHistory::new(),
        };
        Self {
            surface: StringSurface::new(),
            region: RegionController::new(options.line_ending),
            history,
            options,
            keybindings,
            filters: Vec::new(),
            outbound: OutboundQueue::new(),
            on_input: None,
            focused: false,
            last_cursor_pos: None,
            log: WriteLog::from_env(&EnvConfig::from_env()),
        }
    }

    /// Thread-safe producer handle; messages land on the next [`Self::pump`].
    pub fn sender(&self) -> ConsoleSender {
        self.outbound.sender()
    }

    /// Drain queued messages into the buffer. Call on the event thread,
    /// typically from the wake handler installed on the sender. Returns the
    /// number of messages reconciled.
    pub fn pump(&mut self) -> usize {
        let messages = self.outbound.drain();
        let count = messages.len();
        for message in messages {
            self.append_output(&message);
        }
        count
    }

    /// Splice one output message in ahead of the editable region, preserving
    /// pending input and relative cursor position. Event-thread only.
    pub fn append_output(&mut self, message: &str) {
        let mut normalized = normalize_message(message, self.options.line_ending);
        let splice_at = self.region.boundary();
        for filter in self.filters.iter_mut() {
            normalized = filter.filter(normalized, splice_at);
        }
        if self.log.enabled() {
            self.log
                .line(&format!("append {} bytes at {}", normalized.len(), splice_at));
        }
        self.region.append_normalized(&mut self.surface, &normalized);
    }

    /// The pending, unsubmitted line.
    pub fn current_input(&self) -> String {
        self.region.current_input(&self.surface)
    }

    /// Entire buffer contents (history plus pending input).
    pub fn text(&self) -> &str {
        self.surface.text()
    }

    /// Hook invoked once per submitted line, after the input is cleared.
    pub fn set_on_input(&mut self, handler: Option<Box<dyn FnMut(String)>>) {
        self.on_input = handler;
    }

    /// Append a message filter; filters run in insertion order.
    pub fn add_filter(&mut self, filter: Box<dyn MessageFilter>) {
        self.filters.push(filter);
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.options.prompt = prompt.into();
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    fn insert_input(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.region.decide_key(&self.surface, KeyClass::Printable) == KeyDecision::SnapToEnd {
            let end = self.surface.length();
            self.surface.set_cursor(end);
        }
        let cursor = self.surface.cursor();
        self.surface.insert(cursor, text);
    }

    fn submit(&mut self) {
        let line = self.region.take_input(&mut self.surface);
        if self.options.history {
            self.history.push(&line);
        } else {
            self.history.reset_browse();
        }
        if self.log.enabled() {
            self.log.line(&format!("submit {} bytes", line.len()));
        }
        if let Some(handler) = self.on_input.as_mut() {
            handler(line);
        }
    }

    fn recall(&mut self, previous: bool) {
        if !self.options.history {
            return;
        }
        let step = if previous {
            self.history.recall_prev()
        } else {
            self.history.recall_next()
        };
        match step {
            Recall::Replace(entry) => self.region.replace_input(&mut self.surface, &entry),
            Recall::Clear => self.region.clear_input(&mut self.surface),
            Recall::Ignored => {}
        }
    }

    fn delete_backward(&mut self) {
        if self.region.decide_key(&self.surface, KeyClass::EraseBackward) == KeyDecision::Suppress
        {
            return;
        }
        let cursor = self.surface.cursor();
        let start =
            prev_grapheme_start(self.surface.text(), cursor).max(self.region.boundary());
        if start < cursor {
            self.surface.remove(start, cursor);
        }
    }

    fn delete_forward(&mut self) {
        if !self.region.is_editing(&self.surface, false) {
            return;
        }
        let cursor = self.surface.cursor();
        let end = next_grapheme_end(self.surface.text(), cursor);
        if end > cursor {
            self.surface.remove(cursor, end);
        }
    }

    fn delete_word_backward(&mut self) {
        if self.region.decide_key(&self.surface, KeyClass::EraseBackward) == KeyDecision::Suppress
        {
            return;
        }
        let cursor = self.surface.cursor();
        let start = prev_word_boundary(self.surface.text(), cursor).max(self.region.boundary());
        if start < cursor {
            self.surface.remove(start, cursor);
        }
    }

    fn delete_to_input_start(&mut self) {
        let cursor = self.surface.cursor();
        let boundary = self.region.boundary();
        if cursor > boundary {
            self.surface.remove(boundary, cursor);
        }
    }

    fn delete_to_input_end(&mut self) {
        if !self.region.is_editing(&self.surface, false) {
            return;
        }
        let cursor = self.surface.cursor();
        let length = self.surface.length();
        if length > cursor {
            self.surface.remove(cursor, length);
        }
    }

    fn handle_key(&mut self, raw: &str) {
        use ConsoleAction::*;

        let (
            is_submit,
            is_delete_backward,
            is_delete_forward,
            is_delete_word_backward,
            is_delete_to_start,
            is_delete_to_end,
            is_left,
            is_right,
            is_word_left,
            is_word_right,
            is_line_start,
            is_line_end,
            is_history_prev,
            is_history_next,
        ) = {
            let kb = self
                .keybindings
                .lock()
                .expect("console keybindings lock poisoned");
            (
                kb.matches(raw, Submit),
                kb.matches(raw, DeleteCharBackward),
                kb.matches(raw, DeleteCharForward),
                kb.matches(raw, DeleteWordBackward),
                kb.matches(raw, DeleteToLineStart),
                kb.matches(raw, DeleteToLineEnd),
                kb.matches(raw, CursorLeft),
                kb.matches(raw, CursorRight),
                kb.matches(raw, CursorWordLeft),
                kb.matches(raw, CursorWordRight),
                kb.matches(raw, CursorLineStart),
                kb.matches(raw, CursorLineEnd),
                kb.matches(raw, HistoryPrev),
                kb.matches(raw, HistoryNext),
            )
        };

        if is_submit {
            self.submit();
            return;
        }

        if is_history_prev || is_history_next {
            self.recall(is_history_prev);
            return;
        }

        if is_delete_backward {
            self.delete_backward();
            return;
        }

        if is_delete_forward {
            self.delete_forward();
            return;
        }

        if is_delete_word_backward {
            self.delete_word_backward();
            return;
        }

        if is_delete_to_start {
            self.delete_to_input_start();
            return;
        }

        if is_delete_to_end {
            self.delete_to_input_end();
            return;
        }

        if is_left {
            let cursor = self.surface.cursor();
            let target = prev_grapheme_start(self.surface.text(), cursor);
            self.surface.set_cursor(target);
            return;
        }

        if is_right {
            let cursor = self.surface.cursor();
            let target = next_grapheme_end(self.surface.text(), cursor);
            self.surface.set_cursor(target);
            return;
        }

        if is_word_left {
            let cursor = self.surface.cursor();
            let target = prev_word_boundary(self.surface.text(), cursor);
            self.surface.set_cursor(target);
            return;
        }

        if is_word_right {
            let cursor = self.surface.cursor();
            let target = next_word_boundary(self.surface.text(), cursor);
            self.surface.set_cursor(target);
            return;
        }

        if is_line_start {
            let boundary = self.region.boundary();
            self.surface.set_cursor(boundary);
            return;
        }

        if is_line_end {
            let length = self.surface.length();
            self.surface.set_cursor(length);
        }
    }
}

impl Component for Console {
    fn render(&mut self, width: usize) -> Vec<String> {
        self.last_cursor_pos = None;

        let ending = self.options.line_ending.as_str();
        let text = self.surface.text().to_string();
        let cursor = self.surface.cursor();
        let prompt = self.options.prompt.clone();

        let segments: Vec<&str> = text.split(ending).collect();
        let last_row = segments.len() - 1;

        // Locate the cursor's row and byte column; a cursor parked on a line
        // terminator renders at that line's end.
        let mut cursor_row = last_row;
        let mut cursor_col_bytes = segments[last_row].len();
        let mut offset = 0;
        for (row, segment) in segments.iter().enumerate() {
            let line_end = offset + segment.len();
            if cursor <= line_end {
                cursor_row = row;
                cursor_col_bytes = cursor.saturating_sub(offset).min(segment.len());
                break;
            }
            offset = line_end + ending.len();
        }

        let mut lines = Vec::with_capacity(segments.len());
        for (row, segment) in segments.iter().enumerate() {
            let lead = if row == last_row { prompt.as_str() } else { "" };

            let mut line = if row == cursor_row {
                let before = &segment[..cursor_col_bytes];
                let after = &segment[cursor_col_bytes..];
                let at_cursor = grapheme_segments(after).next().unwrap_or(" ");
                let after_cursor = &after[at_cursor.len().min(after.len())..];

                let col = visible_width(lead) + visible_width(before);
                self.last_cursor_pos = self.focused.then_some(CursorPos { row, col });

                format!("{lead}{before}\x1b[7m{at_cursor}\x1b[27m{after_cursor}")
            } else {
                format!("{lead}{segment}")
            };

            let padding = width.saturating_sub(visible_width(&line));
            line.push_str(&" ".repeat(padding));
            lines.push(line);
        }

        lines
    }

    fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Text { text, .. } => self.insert_input(text),
            InputEvent::Paste { text, .. } => {
                let cleaned = text.replace(['\r', '\n'], "");
                self.insert_input(&cleaned);
            }
            InputEvent::Key { raw, .. } => self.handle_key(raw),
            InputEvent::UnknownRaw { .. } => {}
        }
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        self.last_cursor_pos
    }

    fn invalidate(&mut self) {
        // No cached state to invalidate.
    }

    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
        Some(self)
    }
}

impl Focusable for Console {
    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::Console;
    use crate::config::ConsoleOptions;
    use crate::core::component::Component;
    use crate::core::input_event::parse_input_events;
    use crate::core::keybindings::default_console_keybindings_handle;

    fn send(console: &mut Console, data: &str) {
        for event in parse_input_events(data) {
            console.handle_event(&event);
        }
    }

    fn history_console() -> Console {
        Console::with_options(
            default_console_keybindings_handle(),
            ConsoleOptions {
                history: true,
                ..ConsoleOptions::default()
            },
        )
    }

    #[test]
    fn typing_and_submit_fire_hook_once() {
        let mut console = Console::new(default_console_keybindings_handle());
        let submitted: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&submitted);
        console.set_on_input(Some(Box::new(move |line| {
            log.borrow_mut().push(line);
        })));

        send(&mut console, "cmd");
        assert_eq!(console.current_input(), "cmd");

        send(&mut console, "\r");
        assert_eq!(submitted.borrow().as_slice(), &["cmd".to_string()]);
        assert_eq!(console.current_input(), "");
    }

    #[test]
    fn input_is_cleared_before_the_hook_runs() {
        let mut console = Console::new(default_console_keybindings_handle());
        let seen: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
        let sender = console.sender();
        let seen_in_hook = Rc::clone(&seen);
        console.set_on_input(Some(Box::new(move |line| {
            // Echo from inside the hook, the way a network client would.
            sender.send(format!("> {line}"));
            *seen_in_hook.borrow_mut() = Some(line);
        })));

        send(&mut console, "go");
        send(&mut console, "\r");
        assert_eq!(seen.borrow().as_deref(), Some("go"));
        assert_eq!(console.pump(), 1);
        assert_eq!(console.text(), "> go\r\n");
        assert_eq!(console.current_input(), "");
    }

    #[test]
    fn backspace_stops_at_the_boundary() {
        let mut console = Console::new(default_console_keybindings_handle());
        console.append_output("locked");
        send(&mut console, "ab");
        for _ in 0..4 {
            send(&mut console, "\x7f");
        }
        assert_eq!(console.text(), "locked\r\n");
        assert_eq!(console.current_input(), "");
    }

    #[test]
    fn typing_in_history_snaps_to_input() {
        let mut console = Console::new(default_console_keybindings_handle());
        console.append_output("out");
        send(&mut console, "\x1b[D"); // into the history region
        send(&mut console, "\x1b[D");
        send(&mut console, "a");
        assert_eq!(console.current_input(), "a");
        assert_eq!(console.text(), "out\r\na");
    }

    #[test]
    fn async_output_preserves_typed_input() {
        let mut console = Console::new(default_console_keybindings_handle());
        let sender = console.sender();
        send(&mut console, "half");
        sender.send("interrupt");
        assert_eq!(console.pump(), 1);
        assert_eq!(console.text(), "interrupt\r\nhalf");
        assert_eq!(console.current_input(), "half");
    }

    #[test]
    fn history_recall_round_trip() {
        let mut console = history_console();
        send(&mut console, "first");
        send(&mut console, "\r");
        send(&mut console, "second");
        send(&mut console, "\r");

        send(&mut console, "\x1b[1;5A");
        assert_eq!(console.current_input(), "second");
        send(&mut console, "\x1b[1;5A");
        assert_eq!(console.current_input(), "first");
        send(&mut console, "\x1b[1;5B");
        assert_eq!(console.current_input(), "second");
        send(&mut console, "\x1b[1;5B");
        assert_eq!(console.current_input(), "");
        assert!(!console.history().is_browsing());
    }

    #[test]
    fn recall_is_inert_without_history() {
        let mut console = Console::new(default_console_keybindings_handle());
        send(&mut console, "line");
        send(&mut console, "\r");
        send(&mut console, "\x1b[1;5A");
        assert_eq!(console.current_input(), "");
        assert!(console.history().is_empty());
    }

    #[test]
    fn paste_drops_newlines() {
        let mut console = Console::new(default_console_keybindings_handle());
        send(&mut console, "\x1b[200~two\nwords\x1b[201~");
        assert_eq!(console.current_input(), "twowords");
    }

    #[test]
    fn render_marks_cursor_on_the_input_line() {
        let mut console = Console::new(default_console_keybindings_handle());
        console.set_prompt("> ");
        console.append_output("hello");
        send(&mut console, "hi");

        let lines = console.render(12);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("hello"));
        assert!(lines[1].starts_with("> hi"));
        assert!(lines[1].contains("\x1b[7m"));
    }

    #[test]
    fn word_delete_respects_the_boundary() {
        let mut console = Console::new(default_console_keybindings_handle());
        console.append_output("two words");
        send(&mut console, "one");
        send(&mut console, "\x17"); // ctrl+w
        assert_eq!(console.current_input(), "");
        assert_eq!(console.text(), "two words\r\n");
        send(&mut console, "\x17");
        assert_eq!(console.text(), "two words\r\n");
    }
}
