//! ANSI escape-sequence scanning.
//!
//! Network output routinely arrives with CSI/OSC sequences embedded in it.
//! These helpers locate and measure them so width math and message filters
//! can treat them as zero-width (or remove them outright).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiCodeKind {
    Csi,
    Osc,
    Apc,
    Dcs,
    Ss3,
}

/// One escape sequence found in a string, starting at the `pos` passed to
/// [`extract_ansi_code`]; `length` is the full sequence length in bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsiCode<'a> {
    pub code: &'a str,
    pub length: usize,
    pub kind: AnsiCodeKind,
}

/// Parse the escape sequence starting at byte `pos`, if any.
pub fn extract_ansi_code(input: &str, pos: usize) -> Option<AnsiCode<'_>> {
    let bytes = input.as_bytes();
    if pos + 1 >= bytes.len() || bytes[pos] != 0x1b {
        return None;
    }

    let (end, kind) = match bytes[pos + 1] {
        b'[' => (csi_end(bytes, pos + 2)?, AnsiCodeKind::Csi),
        b']' => (string_end(bytes, pos + 2)?, AnsiCodeKind::Osc),
        b'_' => (string_end(bytes, pos + 2)?, AnsiCodeKind::Apc),
        b'P' => (string_end(bytes, pos + 2)?, AnsiCodeKind::Dcs),
        b'O' => {
            if pos + 2 >= bytes.len() {
                return None;
            }
            (pos + 3, AnsiCodeKind::Ss3)
        }
        _ => return None,
    };

    Some(AnsiCode {
        code: &input[pos..end],
        length: end - pos,
        kind,
    })
}

/// CSI sequences end at the first final byte in 0x40..=0x7e.
fn csi_end(bytes: &[u8], mut idx: usize) -> Option<usize> {
    while idx < bytes.len() {
        if (0x40..=0x7e).contains(&bytes[idx]) {
            return Some(idx + 1);
        }
        idx += 1;
    }
    None
}

/// OSC/APC/DCS sequences end at BEL or the two-byte ST terminator.
fn string_end(bytes: &[u8], mut idx: usize) -> Option<usize> {
    while idx < bytes.len() {
        if bytes[idx] == 0x07 {
            return Some(idx + 1);
        }
        if bytes[idx] == 0x1b && idx + 1 < bytes.len() && bytes[idx + 1] == b'\\' {
            return Some(idx + 2);
        }
        idx += 1;
    }
    None
}

/// Remove every recognized escape sequence, keeping all other text.
///
/// An ESC that does not open a recognized sequence is kept as-is.
pub fn strip_codes(input: &str) -> String {
    if !input.contains('\x1b') {
        return input.to_string();
    }

    let mut clean = String::with_capacity(input.len());
    let mut idx = 0;
    while idx < input.len() {
        if let Some(ansi) = extract_ansi_code(input, idx) {
            idx += ansi.length;
            continue;
        }
        let ch = input[idx..].chars().next().expect("char at valid boundary");
        clean.push(ch);
        idx += ch.len_utf8();
    }
    clean
}

#[cfg(test)]
mod tests {
    use super::{extract_ansi_code, strip_codes, AnsiCodeKind};

    #[test]
    fn csi_sequence_is_measured() {
        let code = extract_ansi_code("\x1b[31mred", 0).expect("csi");
        assert_eq!(code.code, "\x1b[31m");
        assert_eq!(code.length, 5);
        assert_eq!(code.kind, AnsiCodeKind::Csi);
    }

    #[test]
    fn osc_sequence_ends_at_bel_or_st() {
        let bel = extract_ansi_code("\x1b]0;title\x07rest", 0).expect("osc bel");
        assert_eq!(bel.length, "\x1b]0;title\x07".len());
        let st = extract_ansi_code("\x1b]8;;x\x1b\\rest", 0).expect("osc st");
        assert_eq!(st.length, "\x1b]8;;x\x1b\\".len());
    }

    #[test]
    fn strip_removes_codes_and_keeps_text() {
        assert_eq!(strip_codes("\x1b[1;33mwarn\x1b[0m ok"), "warn ok");
        assert_eq!(strip_codes("plain"), "plain");
    }

    #[test]
    fn bare_escape_is_preserved() {
        assert_eq!(strip_codes("a\x1bz"), "a\x1bz");
    }
}
