use super::*;

fn per_char(px: f32) -> impl FnMut(&str) -> f32 {
    move |s: &str| s.chars().count() as f32 * px
}

#[test]
fn generous_width_yields_single_uppercased_line() {
    let out = wrap("one does not simply", 10_000.0, per_char(9.0));
    assert_eq!(out.lines, vec!["ONE DOES NOT SIMPLY".to_string()]);
}

#[test]
fn empty_and_blank_text_yield_no_lines() {
    assert!(wrap("", 100.0, per_char(9.0)).is_empty());
    assert!(wrap("   \t\n ", 100.0, per_char(9.0)).is_empty());
}

#[test]
fn oversized_single_word_is_never_split() {
    let out = wrap("supercalifragilistic", 50.0, per_char(9.0));
    assert_eq!(out.lines, vec!["SUPERCALIFRAGILISTIC".to_string()]);
}

#[test]
fn oversized_word_in_the_middle_gets_its_own_line() {
    let out = wrap("a incomprehensibilities b", 45.0, per_char(9.0));
    assert_eq!(
        out.lines,
        vec![
            "A".to_string(),
            "INCOMPREHENSIBILITIES".to_string(),
            "B".to_string()
        ]
    );
}

#[test]
fn fills_backward_so_last_line_is_fullest() {
    // 20 px per glyph at a 460 px limit allows 23 characters per line.
    let out = wrap(
        "When you finally fix the bug after three hours",
        460.0,
        per_char(20.0),
    );
    assert_eq!(
        out.lines,
        vec![
            "WHEN".to_string(),
            "YOU FINALLY FIX THE".to_string(),
            "BUG AFTER THREE HOURS".to_string(),
        ]
    );
}

#[test]
fn scenario_long_caption_wraps_within_limit() {
    let max = 460.0;
    let mut measure = per_char(20.0);
    let out = wrap(
        "WHEN YOU FINALLY FIX THE BUG AFTER THREE HOURS",
        max,
        &mut measure,
    );
    assert!(out.len() >= 2);
    assert!(!out.lines.last().unwrap().is_empty());
    for line in out.iter() {
        assert!(measure(line) <= max, "line '{line}' exceeds {max}");
    }
}

#[test]
fn whitespace_is_collapsed_between_words() {
    let out = wrap("  hello \t  world  ", 10_000.0, per_char(9.0));
    assert_eq!(out.lines, vec!["HELLO WORLD".to_string()]);
}

#[test]
fn rewrapping_joined_lines_is_idempotent() {
    let text = "the quick brown fox jumps over the lazy dog while everyone watches";
    for width in [60.0, 90.0, 150.0, 240.0] {
        let first = wrap(text, width, per_char(9.0));
        let second = wrap(&first.joined(), width, per_char(9.0));
        assert_eq!(first, second, "width {width}");
        assert_eq!(first, wrap(text, width, per_char(9.0)));
    }
}

#[test]
fn measure_sees_trimmed_uppercase_candidates() {
    let mut seen = Vec::new();
    let _ = wrap("ab cd", 1_000.0, |s: &str| {
        seen.push(s.to_string());
        0.0
    });
    assert_eq!(seen, vec!["CD".to_string(), "AB CD".to_string()]);
}
