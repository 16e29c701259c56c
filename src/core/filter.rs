//! Output message filters.
//!
//! Filters run on the event thread, after line-ending normalization and
//! before the message is spliced in ahead of the editable region. A filter
//! sees the final buffer offset the message will land at, so anything it
//! records (like style spans) can be expressed in absolute offsets that stay
//! valid: text before the boundary is never edited again.

use std::sync::{Arc, Mutex};

use crate::core::text::ansi::{extract_ansi_code, AnsiCodeKind};

/// Transform one outbound message before reconciliation.
pub trait MessageFilter {
    /// `message` is normalized and terminated; `splice_at` is the absolute
    /// offset it will be inserted at. Return the text to actually splice.
    fn filter(&mut self, message: String, splice_at: usize) -> String;
}

/// Text attributes decoded from SGR parameters.
///
/// Colors keep the raw SGR parameter string (`"31"`, `"38;5;208"`,
/// `"38;2;255;0;0"`) so hosts can map them to their own palette.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub inverse: bool,
    pub fg_color: Option<String>,
    pub bg_color: Option<String>,
}

impl TextStyle {
    pub fn is_default(&self) -> bool {
        *self == TextStyle::default()
    }
}

/// A styled run of buffer text, in absolute byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub start: usize,
    pub end: usize,
    pub style: TextStyle,
}

/// Shared span log; the host drains it after pumping messages and applies
/// the styles with whatever attribute mechanism its text surface has.
#[derive(Clone, Default)]
pub struct StyleSpans {
    spans: Arc<Mutex<Vec<StyledSpan>>>,
}

impl StyleSpans {
    pub fn drain(&self) -> Vec<StyledSpan> {
        let mut spans = match self.spans.lock() {
            Ok(spans) => spans,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::take(&mut *spans)
    }

    fn push(&self, span: StyledSpan) {
        let mut spans = match self.spans.lock() {
            Ok(spans) => spans,
            Err(poisoned) => poisoned.into_inner(),
        };
        spans.push(span);
    }
}

/// Strips ANSI escape sequences from output, reporting SGR color/attribute
/// runs as [`StyledSpan`]s. Non-SGR sequences (cursor movement, OSC titles)
/// are dropped without a trace.
///
/// SGR state persists across messages: a color left open at the end of one
/// message continues into the next, matching how terminals behave.
#[derive(Default)]
pub struct AnsiStripFilter {
    state: SgrState,
    spans: StyleSpans,
}

impl AnsiStripFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for draining recorded spans.
    pub fn spans(&self) -> StyleSpans {
        self.spans.clone()
    }
}

impl MessageFilter for AnsiStripFilter {
    fn filter(&mut self, message: String, splice_at: usize) -> String {
        let mut clean = String::with_capacity(message.len());
        let mut open: Option<(usize, TextStyle)> = None;

        if !self.state.snapshot().is_default() {
            open = Some((0, self.state.snapshot()));
        }

        let mut idx = 0;
        while idx < message.len() {
            if let Some(code) = extract_ansi_code(&message, idx) {
                if code.kind == AnsiCodeKind::Csi && code.code.ends_with('m') {
                    close_span(&self.spans, &mut open, clean.len(), splice_at);
                    self.state.process(code.code);
                    if !self.state.snapshot().is_default() {
                        open = Some((clean.len(), self.state.snapshot()));
                    }
                }
                idx += code.length;
                continue;
            }
            let ch = message[idx..].chars().next().expect("char at valid boundary");
            clean.push(ch);
            idx += ch.len_utf8();
        }

        close_span(&self.spans, &mut open, clean.len(), splice_at);
        clean
    }
}

fn close_span(
    spans: &StyleSpans,
    open: &mut Option<(usize, TextStyle)>,
    clean_end: usize,
    splice_at: usize,
) {
    if let Some((start, style)) = open.take() {
        if start < clean_end {
            spans.push(StyledSpan {
                start: splice_at + start,
                end: splice_at + clean_end,
                style,
            });
        }
    }
}

/// Running SGR attribute state.
#[derive(Debug, Default)]
struct SgrState {
    style: TextStyle,
}

impl SgrState {
    fn snapshot(&self) -> TextStyle {
        self.style.clone()
    }

    fn process(&mut self, code: &str) {
        let Some(params) = code
            .strip_prefix("\x1b[")
            .and_then(|body| body.strip_suffix('m'))
        else {
            return;
        };

        if params.is_empty() || params == "0" {
            self.style = TextStyle::default();
            return;
        }

        let parts: Vec<&str> = params.split(';').collect();
        let mut idx = 0;
        while idx < parts.len() {
            let number = parts[idx].parse::<u16>().unwrap_or(0);

            // 256-color and truecolor forms consume extra parameters.
            if number == 38 || number == 48 {
                let consumed = match parts.get(idx + 1).copied() {
                    Some("5") if idx + 2 < parts.len() => 3,
                    Some("2") if idx + 4 < parts.len() => 5,
                    _ => 0,
                };
                if consumed > 0 {
                    let color = parts[idx..idx + consumed].join(";");
                    if number == 38 {
                        self.style.fg_color = Some(color);
                    } else {
                        self.style.bg_color = Some(color);
                    }
                    idx += consumed;
                    continue;
                }
            }

            match number {
                0 => self.style = TextStyle::default(),
                1 => self.style.bold = true,
                3 => self.style.italic = true,
                4 => self.style.underline = true,
                7 => self.style.inverse = true,
                21 | 22 => self.style.bold = false,
                23 => self.style.italic = false,
                24 => self.style.underline = false,
                27 => self.style.inverse = false,
                39 => self.style.fg_color = None,
                49 => self.style.bg_color = None,
                30..=37 | 90..=97 => self.style.fg_color = Some(number.to_string()),
                40..=47 | 100..=107 => self.style.bg_color = Some(number.to_string()),
                _ => {}
            }
            idx += 1;
        }
    }
}
