use super::*;

fn per_char(px: f32) -> impl FnMut(&str) -> f32 {
    move |s: &str| s.chars().count() as f32 * px
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn metrics_follow_image_width() {
    let m = CaptionMetrics::for_image_width(500);
    assert_eq!(m.font_size, 41.0);
    assert!((m.line_height - 49.2).abs() < 1e-4);
    assert_eq!(m.stroke_width, 2.0);
    assert_eq!(m.max_text_width, 460.0);
    assert!((m.bottom_padding - 8.2).abs() < 1e-4);

    let small = CaptionMetrics::for_image_width(100);
    assert_eq!(small.font_size, 8.0);
    assert_eq!(small.stroke_width, 1.0);
}

#[test]
fn small_captions_keep_a_one_pixel_outline() {
    for width in [12, 100, 179] {
        let m = CaptionMetrics::for_image_width(width);
        assert!(m.font_size < 15.0);
        assert_eq!(m.stroke_width, 1.0, "width {width}");
    }
    assert_eq!(CaptionMetrics::for_image_width(180).stroke_width, 1.0);
    assert_eq!(CaptionMetrics::for_image_width(360).stroke_width, 2.0);
}

#[test]
fn last_line_sits_on_anchor_and_earlier_lines_stack_upward() {
    let plan = CaptionPlan::build(
        500,
        300,
        "When you finally fix the bug after three hours",
        per_char(20.0),
    )
    .unwrap();

    assert_eq!(plan.lines.len(), 3);
    assert!(approx(plan.anchor.x, 250.0));
    assert!(approx(plan.anchor.y, 300.0 - 8.2));

    let lh = f64::from(plan.metrics.line_height);
    for (i, line) in plan.lines.iter().enumerate() {
        let expected = plan.anchor.y - (2 - i) as f64 * lh;
        assert!(approx(line.bottom_center.y, expected), "line {i}");
        assert!(approx(line.bottom_center.x, 250.0));
        assert!(line.width <= plan.metrics.max_text_width);
    }
    assert_eq!(plan.lines[2].text, "BUG AFTER THREE HOURS");
    assert!(plan.overflow.is_none());
}

#[test]
fn blank_caption_or_tiny_image_has_no_plan() {
    assert!(CaptionPlan::build(500, 300, "   ", per_char(9.0)).is_none());
    assert!(CaptionPlan::build(11, 300, "hello", per_char(9.0)).is_none());
}

#[test]
fn long_caption_on_short_image_signals_overflow_without_moving_lines() {
    let caption = "a b c d e f g h i j k l m n o p q r s t u v w x y z";
    let plan = CaptionPlan::build(100, 30, caption, per_char(5.0)).unwrap();

    let overflow = plan.overflow.expect("expected overflow");
    let top = plan.lines[0].bottom_center.y - f64::from(plan.metrics.font_size);
    assert!(approx(overflow.overflow_px, -top));
    assert!(approx(
        plan.lines.last().unwrap().bottom_center.y,
        30.0 - f64::from(plan.metrics.bottom_padding)
    ));
}

#[test]
fn plan_carries_style_for_overlay_targets() {
    let plan = CaptionPlan::build(240, 240, "such wow", per_char(9.0)).unwrap();
    assert_eq!(plan.font_stack, "Impact, Arial Black, sans-serif");
    assert_eq!(plan.fill, Rgba8::WHITE);
    assert_eq!(plan.stroke, Rgba8::BLACK);
    assert_eq!(plan.line_layout().lines, vec!["SUCH WOW".to_string()]);

    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["lines"][0]["text"], "SUCH WOW");
    assert_eq!(json["image_width"], 240);
}
