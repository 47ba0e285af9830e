use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::core::{FrameSize, Rgb8};
use crate::foundation::error::{QuoteError, QuoteResult};

/// Complete render configuration for one generation run.
///
/// Every group and field has a default, so a configuration document only needs to list the
/// values it changes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output stream geometry, timing and background.
    pub video: VideoConfig,
    /// Font selection and text placement.
    pub text: TextConfig,
    /// Output and asset directories.
    pub paths: PathsConfig,
}

/// `video` configuration group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Frame width in pixels.
    pub frame_width: u32,
    /// Frame height in pixels.
    pub frame_height: u32,
    /// Output frames per second.
    pub fps: u32,
    /// Clip duration in whole seconds.
    pub duration: u32,
    /// Fill color used when a quote has no usable background image.
    pub background_color: Rgb8,
    /// Output codec.
    pub codec: Codec,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            frame_width: 720,
            frame_height: 1280,
            fps: 24,
            duration: 5,
            background_color: Rgb8::BLACK,
            codec: Codec::Mp4v,
        }
    }
}

/// `text` configuration group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Explicit font file; an empty string means "not set".
    pub font_path: Option<String>,
    /// Font size in pixels.
    pub font_size: u32,
    /// Text fill color.
    pub font_color: Rgb8,
    /// Distance from the frame edge in pixels, also the horizontal wrap inset.
    pub margin: u32,
    /// Extra vertical gap between lines in pixels.
    pub line_spacing: u32,
    /// Horizontal alignment of each line.
    pub text_align: TextAlign,
    /// Vertical placement of the text block.
    pub vertical_pos: VerticalPos,
    /// Draw a `- author` line below the quote when the record has an author.
    pub show_author: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_path: None,
            font_size: 70,
            font_color: Rgb8::WHITE,
            margin: 40,
            line_spacing: 10,
            text_align: TextAlign::Center,
            vertical_pos: VerticalPos::Middle,
            show_author: false,
        }
    }
}

impl TextConfig {
    /// The configured font path, treating an empty or blank string as unset.
    pub fn font_path(&self) -> Option<&Path> {
        self.font_path
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Path::new)
    }
}

/// `paths` configuration group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory receiving generated videos.
    pub output: PathBuf,
    /// Asset root holding `images/` and `fonts/`.
    pub assets: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("output"),
            assets: PathBuf::from("assets"),
        }
    }
}

impl PathsConfig {
    /// `<assets>/images`.
    pub fn images_dir(&self) -> PathBuf {
        self.assets.join("images")
    }

    /// `<assets>/fonts`.
    pub fn fonts_dir(&self) -> PathBuf {
        self.assets.join("fonts")
    }
}

/// Horizontal alignment of a text line within the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Start at `margin`.
    Left,
    /// Centered on the frame.
    #[default]
    Center,
    /// End at `frame_width - margin`.
    Right,
}

/// Vertical placement of the text block within the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalPos {
    /// Block starts at `margin`.
    Top,
    /// Block centered on the frame.
    #[default]
    Middle,
    /// Block ends at `frame_height - margin`.
    Bottom,
}

/// Output video codec, named by its fourcc.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    /// MPEG-4 Part 2.
    #[default]
    Mp4v,
    /// H.264 / AVC.
    Avc1,
}

impl Codec {
    /// Four-character code tagged on the output stream.
    pub fn fourcc(self) -> &'static str {
        match self {
            Codec::Mp4v => "mp4v",
            Codec::Avc1 => "avc1",
        }
    }

    /// `ffmpeg` encoder name.
    pub fn ffmpeg_encoder(self) -> &'static str {
        match self {
            Codec::Mp4v => "mpeg4",
            Codec::Avc1 => "libx264",
        }
    }

    /// Container file extension.
    pub fn extension(self) -> &'static str {
        "mp4"
    }
}

impl TextAlign {
    /// Configuration spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

impl VerticalPos {
    /// Configuration spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            VerticalPos::Top => "top",
            VerticalPos::Middle => "middle",
            VerticalPos::Bottom => "bottom",
        }
    }
}

fn unknown_choice(what: &str, got: &str, expected: &[&str]) -> QuoteError {
    QuoteError::validation(format!(
        "unknown {what} \"{got}\" (expected one of: {})",
        expected.join(", ")
    ))
}

impl FromStr for TextAlign {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(TextAlign::Left),
            "center" => Ok(TextAlign::Center),
            "right" => Ok(TextAlign::Right),
            other => Err(unknown_choice(
                "text_align",
                other,
                &["left", "center", "right"],
            )),
        }
    }
}

impl FromStr for VerticalPos {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(VerticalPos::Top),
            "middle" => Ok(VerticalPos::Middle),
            "bottom" => Ok(VerticalPos::Bottom),
            other => Err(unknown_choice(
                "vertical_pos",
                other,
                &["top", "middle", "bottom"],
            )),
        }
    }
}

impl FromStr for Codec {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mp4v" => Ok(Codec::Mp4v),
            "avc1" => Ok(Codec::Avc1),
            other => Err(unknown_choice("codec", other, &["mp4v", "avc1"])),
        }
    }
}

impl fmt::Display for TextAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for VerticalPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fourcc())
    }
}

impl RenderConfig {
    /// Check the numeric invariants the renderer and encoder rely on.
    pub fn validate(&self) -> QuoteResult<()> {
        if self.video.frame_width == 0 || self.video.frame_height == 0 {
            return Err(QuoteError::validation(
                "video.frame_width/frame_height must be > 0",
            ));
        }
        // yuv420p output needs even dimensions.
        if !self.video.frame_width.is_multiple_of(2) || !self.video.frame_height.is_multiple_of(2)
        {
            return Err(QuoteError::validation(format!(
                "video.frame_width/frame_height must be even (got {}x{})",
                self.video.frame_width, self.video.frame_height
            )));
        }
        if self.video.fps == 0 {
            return Err(QuoteError::validation("video.fps must be > 0"));
        }
        if self.video.duration == 0 {
            return Err(QuoteError::validation("video.duration must be > 0"));
        }
        if self.text.font_size == 0 {
            return Err(QuoteError::validation("text.font_size must be > 0"));
        }
        Ok(())
    }

    /// Frame geometry as a validated [`FrameSize`].
    pub fn frame_size(&self) -> QuoteResult<FrameSize> {
        FrameSize::new(self.video.frame_width, self.video.frame_height)
    }

    /// Frames written per video: `duration * fps`.
    pub fn total_frames(&self) -> u64 {
        u64::from(self.video.duration) * u64::from(self.video.fps)
    }

    /// Horizontal space available to a wrapped line: `frame_width - 2 * margin`.
    ///
    /// Saturates at zero when the margins exceed the frame.
    pub fn max_line_width(&self) -> f32 {
        let inner = i64::from(self.video.frame_width) - 2 * i64::from(self.text.margin);
        inner.max(0) as f32
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
