use super::*;
use crate::foundation::core::{FrameSize, Rgb8};

fn sink_cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: 24,
        codec: Codec::Mp4v,
    }
}

#[test]
fn odd_dimensions_are_rejected_before_spawning() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/unit_encode_ffmpeg/odd.mp4"));
    let err = sink.begin(sink_cfg(721, 1280)).unwrap_err();
    assert!(matches!(err, QuoteError::Validation(_)));
    assert!(err.to_string().contains("even"));
}

#[test]
fn zero_fps_is_rejected() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/unit_encode_ffmpeg/zero.mp4"));
    let mut cfg = sink_cfg(64, 64);
    cfg.fps = 0;
    assert!(sink.begin(cfg).is_err());
}

#[test]
fn push_and_end_require_begin() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/unit_encode_ffmpeg/unused.mp4"));
    let frame = ComposedFrame::solid(FrameSize::new(2, 2).unwrap(), Rgb8::WHITE);
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    assert!(sink.end().is_err());
    assert_eq!(
        sink.output_path(),
        Some(Path::new("target/unit_encode_ffmpeg/unused.mp4"))
    );
}

#[test]
fn refuses_to_overwrite_when_disabled() {
    let path = PathBuf::from("target/unit_encode_ffmpeg/existing.mp4");
    ensure_parent_dir(&path).unwrap();
    std::fs::write(&path, b"old").unwrap();

    let mut opts = FfmpegSinkOpts::new(&path);
    opts.overwrite = false;
    let err = FfmpegSink::new(opts).begin(sink_cfg(64, 64)).unwrap_err();
    assert!(err.to_string().contains("already exists"));
}

#[test]
fn codec_args_select_encoder_and_tag() {
    let mut cmd = Command::new("ffmpeg");
    push_codec_args(&mut cmd, Codec::Avc1);
    let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
    assert_eq!(args, ["-c:v", "libx264", "-tag:v", "avc1"]);

    let mut cmd = Command::new("ffmpeg");
    push_codec_args(&mut cmd, Codec::Mp4v);
    let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
    assert_eq!(&args[..4], ["-c:v", "mpeg4", "-tag:v", "mp4v"]);
}
