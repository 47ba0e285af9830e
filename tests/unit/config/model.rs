use super::*;
use serde_json::json;

#[test]
fn defaults_match_documented_values() {
    let cfg = RenderConfig::default();
    assert_eq!(cfg.video.frame_width, 720);
    assert_eq!(cfg.video.frame_height, 1280);
    assert_eq!(cfg.video.fps, 24);
    assert_eq!(cfg.video.duration, 5);
    assert_eq!(cfg.total_frames(), 120);
    assert_eq!(cfg.text.text_align, TextAlign::Center);
    assert_eq!(cfg.text.vertical_pos, VerticalPos::Middle);
    assert_eq!(cfg.video.codec, Codec::Mp4v);
    assert!(!cfg.text.show_author);
    cfg.validate().unwrap();
}

#[test]
fn partial_document_fills_in_defaults() {
    let cfg: RenderConfig = serde_json::from_value(json!({
        "video": { "fps": 30 },
        "text": { "text_align": "left", "font_color": "#ff0000" }
    }))
    .unwrap();
    assert_eq!(cfg.video.fps, 30);
    assert_eq!(cfg.video.frame_width, 720);
    assert_eq!(cfg.text.text_align, TextAlign::Left);
    assert_eq!(cfg.text.font_color, Rgb8::new(255, 0, 0));
    assert_eq!(cfg.paths.output, PathBuf::from("output"));
}

#[test]
fn validate_rejects_zero_values() {
    let mut cfg = RenderConfig::default();
    cfg.video.fps = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = RenderConfig::default();
    cfg.video.duration = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = RenderConfig::default();
    cfg.video.frame_height = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = RenderConfig::default();
    cfg.text.font_size = 0;
    assert!(cfg.validate().is_err());
}

#[test]
fn odd_frame_dimensions_are_rejected() {
    let mut cfg = RenderConfig::default();
    cfg.video.frame_width = 721;
    let err = cfg.validate().unwrap_err();
    assert!(matches!(err, QuoteError::Validation(_)));
    assert!(err.to_string().contains("even"));

    let mut cfg = RenderConfig::default();
    cfg.video.frame_height = 1279;
    assert!(cfg.validate().is_err());

    let mut cfg = RenderConfig::default();
    cfg.video.frame_width = 722;
    cfg.video.frame_height = 1282;
    assert!(cfg.validate().is_ok());
}

#[test]
fn unknown_enum_spelling_is_rejected() {
    let err = serde_json::from_value::<RenderConfig>(json!({"text": {"vertical_pos": "center"}}));
    assert!(err.is_err());
    assert!("diagonal".parse::<TextAlign>().is_err());
    assert_eq!("RIGHT".parse::<TextAlign>().unwrap(), TextAlign::Right);
    assert_eq!(" bottom ".parse::<VerticalPos>().unwrap(), VerticalPos::Bottom);
    assert_eq!("avc1".parse::<Codec>().unwrap(), Codec::Avc1);
}

#[test]
fn blank_font_path_counts_as_unset() {
    let mut text = TextConfig::default();
    assert!(text.font_path().is_none());
    text.font_path = Some("   ".to_string());
    assert!(text.font_path().is_none());
    text.font_path = Some("fonts/a.ttf".to_string());
    assert_eq!(text.font_path(), Some(Path::new("fonts/a.ttf")));
}

#[test]
fn max_line_width_saturates() {
    let mut cfg = RenderConfig::default();
    assert_eq!(cfg.max_line_width(), 640.0);
    cfg.text.margin = 1000;
    assert_eq!(cfg.max_line_width(), 0.0);
}

#[test]
fn codec_metadata() {
    assert_eq!(Codec::Mp4v.fourcc(), "mp4v");
    assert_eq!(Codec::Mp4v.ffmpeg_encoder(), "mpeg4");
    assert_eq!(Codec::Avc1.ffmpeg_encoder(), "libx264");
    assert_eq!(Codec::Avc1.extension(), "mp4");
    assert_eq!(Codec::Avc1.to_string(), "avc1");
}

#[test]
fn asset_subdirectories() {
    let paths = PathsConfig {
        output: PathBuf::from("out"),
        assets: PathBuf::from("a"),
    };
    assert_eq!(paths.images_dir(), PathBuf::from("a").join("images"));
    assert_eq!(paths.fonts_dir(), PathBuf::from("a").join("fonts"));
}
