use super::*;

fn system_font() -> Option<PathBuf> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/Library/Fonts/Arial.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .find(|p| p.is_file())
}

#[test]
fn garbage_bytes_are_rejected() {
    let err = OutlineFont::from_bytes(b"not a font".to_vec(), 40.0, PathBuf::from("junk.ttf"))
        .unwrap_err();
    assert!(err.to_string().contains("junk.ttf"));
}

#[test]
fn non_positive_size_is_rejected() {
    let err = OutlineFont::from_bytes(Vec::new(), 0.0, PathBuf::from("x.ttf")).unwrap_err();
    assert!(matches!(err, QuoteError::Validation(_)));
}

#[test]
fn missing_file_is_an_error() {
    assert!(OutlineFont::load(Path::new("target/no/such/font.ttf"), 40.0).is_err());
}

#[test]
fn measurement_grows_with_text_and_size() {
    let Some(path) = system_font() else {
        return;
    };
    let mut small = OutlineFont::load(&path, 20.0).unwrap();
    let mut large = OutlineFont::load(&path, 60.0).unwrap();
    assert!(!small.family().is_empty());
    assert_eq!(small.source(), path.as_path());

    assert_eq!(small.measure_width(""), 0.0);
    let a = small.measure_width("Hello");
    let b = small.measure_width("Hello world");
    assert!(a > 0.0 && b > a);
    assert!(large.measure_width("Hello") > a * 2.0);

    assert_eq!(small.bbox_height("   "), 0.0);
    let h = large.bbox_height("Hello");
    assert!(h > 20.0 && h < 120.0, "unexpected height {h}");
    // Descenders reach lower than cap-height-only text.
    assert!(large.bbox_height("gypsy") > large.bbox_height("HELLO"));
}

#[test]
fn draw_inks_pixels_in_requested_color() {
    let Some(path) = system_font() else {
        return;
    };
    let mut font = OutlineFont::load(&path, 32.0).unwrap();
    let mut ctx = vello_cpu::RenderContext::new(200, 80);
    font.draw(&mut ctx, "Hi", 10.0, 10.0, Rgb8::new(255, 0, 0));
    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(200, 80);
    ctx.render_to_pixmap(&mut pixmap);
    let inked = pixmap
        .data_as_u8_slice()
        .chunks_exact(4)
        .filter(|px| px[3] == 255)
        .collect::<Vec<_>>();
    assert!(!inked.is_empty());
    assert!(inked.iter().all(|px| px[0] == 255 && px[1] == 0 && px[2] == 0));
}
