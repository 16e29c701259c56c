//! Grapheme and word-boundary helpers.
//!
//! Pure (text, byte offset) functions so editing code can share one
//! definition of "previous grapheme" and "previous word" instead of each
//! widget re-deriving it.

use unicode_segmentation::UnicodeSegmentation;

pub fn grapheme_segments(text: &str) -> unicode_segmentation::Graphemes<'_> {
    UnicodeSegmentation::graphemes(text, true)
}

pub fn is_whitespace_char(ch: char) -> bool {
    ch.is_whitespace()
}

pub fn is_punctuation_char(ch: char) -> bool {
    matches!(
        ch,
        '(' | ')'
            | '{'
            | '}'
            | '['
            | ']'
            | '<'
            | '>'
            | '.'
            | ','
            | ';'
            | ':'
            | '\''
            | '"'
            | '!'
            | '?'
            | '+'
            | '-'
            | '='
            | '*'
            | '/'
            | '\\'
            | '|'
            | '&'
            | '%'
            | '^'
            | '$'
            | '#'
            | '@'
            | '~'
            | '`'
    )
}

fn is_whitespace_segment(segment: &str) -> bool {
    segment.chars().any(is_whitespace_char)
}

fn is_punctuation_segment(segment: &str) -> bool {
    segment.chars().any(is_punctuation_char)
}

/// Start offset of the grapheme ending at `pos`; `pos` when already at 0.
pub fn prev_grapheme_start(text: &str, pos: usize) -> usize {
    let before = &text[..pos];
    match grapheme_segments(before).next_back() {
        Some(last) => pos - last.len(),
        None => pos,
    }
}

/// End offset of the grapheme starting at `pos`; `pos` when already at the end.
pub fn next_grapheme_end(text: &str, pos: usize) -> usize {
    let after = &text[pos..];
    match grapheme_segments(after).next() {
        Some(first) => pos + first.len(),
        None => pos,
    }
}

/// Offset of the previous word boundary: trailing whitespace is skipped,
/// then one run of punctuation or one run of word characters.
pub fn prev_word_boundary(text: &str, pos: usize) -> usize {
    let mut graphemes: Vec<&str> = grapheme_segments(&text[..pos]).collect();
    let mut cursor = pos;

    while let Some(last) = graphemes.last() {
        if is_whitespace_segment(last) {
            cursor -= last.len();
            graphemes.pop();
        } else {
            break;
        }
    }

    let in_punctuation = graphemes
        .last()
        .map(|last| is_punctuation_segment(last))
        .unwrap_or(false);

    while let Some(last) = graphemes.last() {
        let matches_run = if in_punctuation {
            is_punctuation_segment(last)
        } else {
            !is_whitespace_segment(last) && !is_punctuation_segment(last)
        };
        if matches_run {
            cursor -= last.len();
            graphemes.pop();
        } else {
            break;
        }
    }

    cursor
}

/// Offset of the next word boundary, mirroring [`prev_word_boundary`].
pub fn next_word_boundary(text: &str, pos: usize) -> usize {
    let mut iter = grapheme_segments(&text[pos..]).peekable();
    let mut cursor = pos;

    while let Some(seg) = iter.peek() {
        if is_whitespace_segment(seg) {
            cursor += seg.len();
            iter.next();
        } else {
            break;
        }
    }

    let in_punctuation = iter
        .peek()
        .map(|seg| is_punctuation_segment(seg))
        .unwrap_or(false);

    while let Some(seg) = iter.peek() {
        let matches_run = if in_punctuation {
            is_punctuation_segment(seg)
        } else {
            !is_whitespace_segment(seg) && !is_punctuation_segment(seg)
        };
        if matches_run {
            cursor += seg.len();
            iter.next();
        } else {
            break;
        }
    }

    cursor
}
