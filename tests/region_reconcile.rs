//! Reconciliation properties of the region controller over a string surface.

use console_tui::{LineEnding, RegionController, StringSurface, TextSurface};

fn surface_with_input(region: &mut RegionController, history: &[&str], input: &str) -> StringSurface {
    let mut surface = StringSurface::new();
    for message in history {
        region.append_output(&mut surface, message);
    }
    surface.append(input);
    surface.set_cursor(surface.length());
    surface
}

#[test]
fn boundary_equals_length_minus_prior_pending() {
    let mut region = RegionController::new(LineEnding::Crlf);
    let mut surface = StringSurface::new();
    surface.append("pending");

    for message in ["one", "two\nthree", "", "four\r\n"] {
        let pending_before = region.current_input(&surface);
        region.append_output(&mut surface, message);
        assert_eq!(
            region.boundary(),
            surface.length() - pending_before.len(),
            "after appending {message:?}"
        );
    }
}

#[test]
fn pending_input_survives_any_message() {
    let mut region = RegionController::new(LineEnding::Crlf);
    let mut surface = surface_with_input(&mut region, &["greeting"], "say hello");

    for message in ["plain", "two\nlines", "", "trailing\n", "\r\nleading"] {
        let before = region.current_input(&surface);
        region.append_output(&mut surface, message);
        assert_eq!(region.current_input(&surface), before);
    }
}

#[test]
fn cursor_keeps_relative_offset_in_editable_region() {
    let mut region = RegionController::new(LineEnding::Crlf);
    let mut surface = surface_with_input(&mut region, &["out"], "abcdef");

    surface.set_cursor(region.boundary() + 3);
    let distance = surface.cursor() - region.boundary();

    region.append_output(&mut surface, "interrupting\nmessage");
    assert_eq!(surface.cursor() - region.boundary(), distance);
}

#[test]
fn clear_input_twice_keeps_invariants() {
    let mut region = RegionController::new(LineEnding::Crlf);
    let mut surface = surface_with_input(&mut region, &["out"], "typed");

    region.clear_input(&mut surface);
    assert_eq!(region.current_input(&surface), "");
    assert_eq!(region.boundary(), surface.length());

    region.clear_input(&mut surface);
    assert_eq!(region.current_input(&surface), "");
    assert_eq!(region.boundary(), surface.length());
}

#[test]
fn scenario_append_to_empty_surface() {
    let mut region = RegionController::new(LineEnding::Crlf);
    let mut surface = StringSurface::new();

    region.append_output(&mut surface, "hello");
    assert_eq!(surface.text(), "hello\r\n");
    assert_eq!(region.boundary(), 7);
    assert_eq!(region.current_input(&surface), "");
}

#[test]
fn scenario_append_while_two_chars_typed() {
    let mut region = RegionController::new(LineEnding::Crlf);
    let mut surface = StringSurface::new();
    surface.append("ab");
    surface.set_cursor(2);

    region.append_output(&mut surface, "X\n");
    assert_eq!(surface.text(), "X\r\nab");
    assert_eq!(region.boundary(), 3);
    assert_eq!(region.current_input(&surface), "ab");
    assert_eq!(surface.cursor(), 5);
}

#[test]
fn take_input_clears_before_handing_over() {
    let mut region = RegionController::new(LineEnding::Crlf);
    let mut surface = surface_with_input(&mut region, &[], "cmd");

    let line = region.take_input(&mut surface);
    assert_eq!(line, "cmd");
    assert_eq!(region.current_input(&surface), "");
    assert_eq!(region.boundary(), surface.length());

    // A handler reacting to the line can append immediately without
    // interleaving with stale pending input.
    region.append_output(&mut surface, &format!("echo {line}"));
    assert_eq!(region.current_input(&surface), "");
}

#[test]
fn lf_line_ending_is_respected() {
    let mut region = RegionController::new(LineEnding::Lf);
    let mut surface = StringSurface::new();

    region.append_output(&mut surface, "a\r\nb");
    assert_eq!(surface.text(), "a\nb\n");
    assert_eq!(region.boundary(), 4);
}
