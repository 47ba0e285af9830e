use super::*;

#[test]
fn width_is_char_count_times_advance() {
    let f = BuiltinFont;
    assert_eq!(f.measure_width(""), 0.0);
    assert_eq!(f.measure_width("abc"), 3.0 * BuiltinFont::ADVANCE_PX as f32);
    // Non-ASCII characters still take one cell.
    assert_eq!(f.measure_width("é"), BuiltinFont::ADVANCE_PX as f32);
}

#[test]
fn bbox_height_depends_on_content() {
    let f = BuiltinFont;
    assert_eq!(f.bbox_height(""), 0.0);
    assert_eq!(f.bbox_height("   "), 0.0);
    // '-' only inks row 3, 'A' reaches row 6.
    assert_eq!(f.bbox_height("-"), (4 * SCALE) as f32);
    assert_eq!(f.bbox_height("A"), (7 * SCALE) as f32);
    assert_eq!(f.bbox_height("-A"), (7 * SCALE) as f32);
    assert!(f.bbox_height("A") <= BuiltinFont::CELL_HEIGHT_PX as f32);
}

#[test]
fn dots_stay_inside_measured_box() {
    let f = BuiltinFont;
    let text = "Hello, world!";
    let w = f.measure_width(text);
    let h = f.bbox_height(text);
    let mut count = 0;
    f.for_each_dot(text, 10.0, 20.0, |x, y| {
        count += 1;
        assert!(x >= 10.0 && x + SCALE as f32 <= 10.0 + w);
        assert!(y >= 20.0 && y + SCALE as f32 <= 20.0 + h);
    });
    assert!(count > 0);
}

#[test]
fn unknown_chars_render_as_question_mark() {
    let f = BuiltinFont;
    let mut a = Vec::new();
    f.for_each_dot("\u{263a}", 0.0, 0.0, |x, y| a.push((x, y)));
    let mut b = Vec::new();
    f.for_each_dot("?", 0.0, 0.0, |x, y| b.push((x, y)));
    assert_eq!(a, b);
}
