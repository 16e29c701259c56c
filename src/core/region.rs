//! Region-boundary buffer control.
//!
//! One text buffer, two regions: `[0, boundary)` is finished output the user
//! must not edit, `[boundary, length]` is the line being composed. The
//! controller is the only writer of `boundary`; it moves in exactly two
//! places (`append_normalized`, `clear_input`). Hosts that mutate the
//! surface behind the controller's back desynchronize the boundary.
//!
//! Offsets are byte offsets into UTF-8 text. Out-of-range boundaries and
//! inverted ranges are bugs, not runtime conditions, and are asserted.

use crate::config::LineEnding;

/// Mutable text buffer with a cursor, as provided by the embedding widget.
///
/// Implementations must keep the cursor within `[0, length()]` and on a char
/// boundary.
pub trait TextSurface {
    fn length(&self) -> usize;
    fn cursor(&self) -> usize;
    fn set_cursor(&mut self, pos: usize);
    fn range(&self, start: usize, end: usize) -> String;
    fn set_content(&mut self, text: &str);
    fn append(&mut self, text: &str);
    fn remove(&mut self, start: usize, end: usize);
}

/// Keystroke classes the controller arbitrates; everything else passes
/// through to ordinary editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass {
    /// The submit chord (enter).
    Submit,
    /// A backward-destructive edit (backspace and friends).
    EraseBackward,
    /// Printable text about to be inserted.
    Printable,
    /// Anything else.
    Other,
}

/// What the caller should do with a keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDecision {
    /// Take the pending input (see [`RegionController::take_input`]) and hand
    /// it to the input hook; the keystroke itself is consumed.
    Submit,
    /// Drop the keystroke: it would erase into finished output.
    Suppress,
    /// Move the cursor to the end of the editable region first, then apply
    /// the ordinary edit.
    SnapToEnd,
    /// Apply the ordinary edit unchanged.
    PassThrough,
}

/// Owner of the history/editable boundary.
pub struct RegionController {
    boundary: usize,
    line_ending: LineEnding,
}

impl RegionController {
    pub fn new(line_ending: LineEnding) -> Self {
        Self {
            boundary: 0,
            line_ending,
        }
    }

    /// First offset of the editable region.
    pub fn boundary(&self) -> usize {
        self.boundary
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Splice `message` in ahead of the editable region.
    ///
    /// The pending input is preserved byte for byte, and the cursor keeps its
    /// offset relative to whichever region it was in.
    pub fn append_output(&mut self, surface: &mut dyn TextSurface, message: &str) {
        let normalized = normalize_message(message, self.line_ending);
        self.append_normalized(surface, &normalized);
    }

    /// [`Self::append_output`] without the normalization step, for callers
    /// that already normalized (and possibly filtered) the message.
    ///
    /// `message` must end with exactly one line terminator.
    pub fn append_normalized(&mut self, surface: &mut dyn TextSurface, message: &str) {
        debug_assert!(
            message.ends_with(self.line_ending.as_str()),
            "append_normalized expects a terminated message"
        );
        let length = surface.length();
        assert!(
            self.boundary <= length,
            "boundary {} beyond surface length {}",
            self.boundary,
            length
        );

        let saved_cursor = surface.cursor();
        let history = surface.range(0, self.boundary);
        let pending = surface.range(self.boundary, length);

        surface.set_content(&history);
        surface.append(message);

        // Cursor in the editable region keeps its offset relative to the
        // start of the pending input; a cursor in history stays put.
        let restored_cursor = if saved_cursor >= self.boundary {
            saved_cursor + message.len()
        } else {
            saved_cursor
        };

        self.boundary = surface.length();
        surface.append(&pending);
        surface.set_cursor(restored_cursor);
    }

    /// The pending, unsubmitted line. Read-only.
    pub fn current_input(&self, surface: &dyn TextSurface) -> String {
        surface.range(self.boundary, surface.length())
    }

    /// Remove the pending input and move the boundary to the buffer end.
    /// Calling it twice in a row is harmless.
    pub fn clear_input(&mut self, surface: &mut dyn TextSurface) {
        let length = surface.length();
        assert!(
            self.boundary <= length,
            "boundary {} beyond surface length {}",
            self.boundary,
            length
        );
        surface.remove(self.boundary, length);
        self.boundary = surface.length();
    }

    /// Extract and clear the pending input in one step.
    ///
    /// The clear happens before the caller sees the text, so an input hook
    /// that re-enters `append_output` never races stale pending input.
    pub fn take_input(&mut self, surface: &mut dyn TextSurface) -> String {
        let input = self.current_input(surface);
        self.clear_input(surface);
        input
    }

    /// Replace the pending input wholesale (history recall), cursor at the
    /// end of the editable region.
    pub fn replace_input(&mut self, surface: &mut dyn TextSurface, text: &str) {
        self.clear_input(surface);
        surface.append(text);
        surface.set_cursor(surface.length());
    }

    /// Whether the cursor sits in the editable region. The strict variant
    /// requires at least one editable character behind the cursor, which is
    /// what a backward-destructive key needs.
    pub fn is_editing(&self, surface: &dyn TextSurface, strict: bool) -> bool {
        let pos = surface.cursor();
        let pos = if strict {
            match pos.checked_sub(1) {
                Some(pos) => pos,
                None => return false,
            }
        } else {
            pos
        };
        pos >= self.boundary
    }

    /// Arbitrate a keystroke against the region model.
    pub fn decide_key(&self, surface: &dyn TextSurface, class: KeyClass) -> KeyDecision {
        match class {
            KeyClass::Submit => KeyDecision::Submit,
            KeyClass::EraseBackward if !self.is_editing(surface, true) => KeyDecision::Suppress,
            KeyClass::Printable if surface.cursor() < self.boundary => KeyDecision::SnapToEnd,
            _ => KeyDecision::PassThrough,
        }
    }
}

/// Normalize line endings and guarantee exactly one trailing terminator.
///
/// Interior blank lines survive; a message already ending in one terminator
/// is not double-terminated.
pub fn normalize_message(message: &str, ending: LineEnding) -> String {
    let mut unified = message.replace("\r\n", "\n").replace('\r', "\n");
    if unified.ends_with('\n') {
        unified.pop();
    }

    let mut out = unified
        .split('\n')
        .collect::<Vec<_>>()
        .join(ending.as_str());
    if !out.ends_with(ending.as_str()) {
        out.push_str(ending.as_str());
    }
    out
}
