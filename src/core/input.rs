//! Key parsing: terminal byte sequences to normalized key identifiers.
//!
//! A key identifier is a lowercase name with optional `shift+`/`ctrl+`/`alt+`
//! prefixes in that order, e.g. `"enter"`, `"ctrl+up"`, `"alt+backspace"`.
//! Parsing covers the legacy escape-sequence protocol (CSI, SS3, rxvt arrow
//! variants); sequences that don't resolve stay raw and are surfaced as
//! [`crate::core::input_event::InputEvent::UnknownRaw`].

const MOD_SHIFT: u8 = 1;
const MOD_ALT: u8 = 2;
const MOD_CTRL: u8 = 4;

/// Decoded text, if `data` is plain printable input rather than a key chord.
///
/// Anything containing a control character (including ESC) is not text.
pub fn parse_text(data: &str) -> Option<String> {
    if data.is_empty() || data.chars().any(|ch| ch.is_control()) {
        return None;
    }
    Some(data.to_string())
}

/// Normalized key identifier for a terminal byte sequence, if recognized.
pub fn parse_key(data: &str) -> Option<String> {
    if let Some(key_id) = fixed_sequence_key_id(data) {
        return Some(key_id.to_string());
    }

    if let Some(key_id) = parse_modified_csi(data) {
        return Some(key_id);
    }

    // ESC prefix: alt-modified byte.
    if data.len() == 2 && data.starts_with('\x1b') {
        let code = data.as_bytes()[1];
        if (1..=26).contains(&code) && code != b'\t' && code != b'\r' && code != b'\n' {
            return Some(format!("ctrl+alt+{}", (code + 96) as char));
        }
        if code.is_ascii_lowercase() {
            return Some(format!("alt+{}", code as char));
        }
    }

    if data.len() == 1 {
        let code = data.as_bytes()[0];
        if (1..=26).contains(&code) {
            return Some(format!("ctrl+{}", (code + 96) as char));
        }
        if (0x20..=0x7e).contains(&code) {
            return Some(data.to_string());
        }
    }

    None
}

/// Whether `data` is an encoding of `key_id` (e.g. `"\x1b[1;5A"` vs `"ctrl+up"`).
pub fn matches_key(data: &str, key_id: &str) -> bool {
    match (parse_key(data), normalize_key_id(key_id)) {
        (Some(parsed), Some(wanted)) => parsed == wanted,
        _ => false,
    }
}

/// Canonical form of a user-supplied key identifier: lowercase, aliases
/// resolved, modifiers ordered shift, ctrl, alt.
pub fn normalize_key_id(key_id: &str) -> Option<String> {
    let lowered = key_id.to_lowercase();
    let parts: Vec<&str> = lowered.split('+').collect();
    let key = match *parts.last()? {
        "" => return None,
        "esc" => "escape",
        "return" => "enter",
        other => other,
    };

    let mut modifier = 0;
    for part in &parts[..parts.len() - 1] {
        match *part {
            "shift" => modifier |= MOD_SHIFT,
            "ctrl" => modifier |= MOD_CTRL,
            "alt" => modifier |= MOD_ALT,
            _ => return None,
        }
    }

    Some(compose_key_id(key, modifier))
}

fn compose_key_id(key: &str, modifier: u8) -> String {
    if modifier == 0 {
        return key.to_string();
    }
    let mut id = String::new();
    if modifier & MOD_SHIFT != 0 {
        id.push_str("shift+");
    }
    if modifier & MOD_CTRL != 0 {
        id.push_str("ctrl+");
    }
    if modifier & MOD_ALT != 0 {
        id.push_str("alt+");
    }
    id.push_str(key);
    id
}

fn fixed_sequence_key_id(data: &str) -> Option<&'static str> {
    let key_id = match data {
        "\x1b" => "escape",
        "\t" => "tab",
        "\x1b[Z" => "shift+tab",
        "\r" | "\n" | "\x1bOM" => "enter",
        "\x1b\r" => "alt+enter",
        "\x7f" | "\x08" => "backspace",
        "\x1b\x7f" | "\x1b\x08" => "alt+backspace",
        " " => "space",
        "\x00" => "ctrl+space",
        "\x1b " => "alt+space",
        "\x1c" => "ctrl+\\",
        "\x1d" => "ctrl+]",
        "\x1f" => "ctrl+-",
        "\x1b[A" | "\x1bOA" => "up",
        "\x1b[B" | "\x1bOB" => "down",
        "\x1b[C" | "\x1bOC" => "right",
        "\x1b[D" | "\x1bOD" => "left",
        "\x1b[a" => "shift+up",
        "\x1b[b" => "shift+down",
        "\x1b[c" => "shift+right",
        "\x1b[d" => "shift+left",
        // rxvt encodes ctrl+arrow as SS3 with a lowercase final byte.
        "\x1bOa" => "ctrl+up",
        "\x1bOb" => "ctrl+down",
        "\x1bOc" => "ctrl+right",
        "\x1bOd" => "ctrl+left",
        "\x1bp" => "alt+up",
        "\x1bn" => "alt+down",
        "\x1bb" | "\x1bB" => "alt+left",
        "\x1bf" | "\x1bF" => "alt+right",
        "\x1b[H" | "\x1bOH" | "\x1b[1~" | "\x1b[7~" => "home",
        "\x1b[F" | "\x1bOF" | "\x1b[4~" | "\x1b[8~" => "end",
        "\x1b[7^" => "ctrl+home",
        "\x1b[8^" => "ctrl+end",
        "\x1b[2~" => "insert",
        "\x1b[3~" => "delete",
        "\x1b[3$" => "shift+delete",
        "\x1b[3^" => "ctrl+delete",
        "\x1b[5~" => "pageup",
        "\x1b[6~" => "pagedown",
        _ => return None,
    };
    Some(key_id)
}

/// Modified CSI forms: `ESC [ 1 ; m {A..D,H,F}` and `ESC [ n ; m ~`.
fn parse_modified_csi(data: &str) -> Option<String> {
    let body = data.strip_prefix("\x1b[")?;

    if let Some(rest) = body.strip_prefix("1;") {
        if rest.len() < 2 {
            return None;
        }
        let (mod_part, final_part) = rest.split_at(rest.len() - 1);
        let key = match final_part {
            "A" => "up",
            "B" => "down",
            "C" => "right",
            "D" => "left",
            "H" => "home",
            "F" => "end",
            _ => return None,
        };
        let modifier = parse_modifier_param(mod_part)?;
        return Some(compose_key_id(key, modifier));
    }

    let tilde_body = body.strip_suffix('~')?;
    let (num_part, mod_part) = tilde_body.split_once(';')?;
    let key = match num_part {
        "2" => "insert",
        "3" => "delete",
        "5" => "pageup",
        "6" => "pagedown",
        _ => return None,
    };
    let modifier = parse_modifier_param(mod_part)?;
    Some(compose_key_id(key, modifier))
}

/// xterm encodes modifiers as `1 + bits`, bits: 1=shift, 2=alt, 4=ctrl.
fn parse_modifier_param(param: &str) -> Option<u8> {
    let value = param.parse::<u8>().ok()?;
    let modifier = value.checked_sub(1)?;
    if modifier == 0 || modifier > MOD_SHIFT + MOD_ALT + MOD_CTRL {
        return None;
    }
    Some(modifier)
}
