//! Grapheme and visible width helpers.

use emojis::get as emoji_get;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

use super::ansi::strip_codes;

const TAB_WIDTH: usize = 3;

/// Terminal cell width of a single grapheme cluster.
///
/// RGI emoji render two cells wide even when their individual scalars say
/// otherwise, so the emoji table wins over `unicode-width`.
pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.is_empty() {
        return 0;
    }
    if grapheme == "\t" {
        return TAB_WIDTH;
    }
    if emoji_get(grapheme).is_some() {
        return 2;
    }

    grapheme
        .chars()
        .map(|ch| {
            if ch == '\t' {
                TAB_WIDTH
            } else {
                UnicodeWidthChar::width(ch).unwrap_or(0)
            }
        })
        .sum()
}

/// Cell width of `input` as it would appear on screen: ANSI escape sequences
/// count for nothing, tabs count as [`TAB_WIDTH`].
pub fn visible_width(input: &str) -> usize {
    if input.is_empty() {
        return 0;
    }

    strip_codes(input)
        .graphemes(true)
        .map(grapheme_width)
        .sum()
}
