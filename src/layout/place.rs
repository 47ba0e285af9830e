use crate::config::model::{TextAlign, TextConfig, VerticalPos};
use crate::foundation::core::FrameSize;
use crate::text::font::TextMeasure;

/// One positioned line of the quote block.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutLine {
    /// Line content.
    pub text: String,
    /// Measured advance width in pixels.
    pub width: f32,
    /// Ink height of this exact line, excluding spacing.
    pub height: f32,
    /// Left edge in frame pixels.
    pub x: f32,
    /// Top edge in frame pixels.
    pub y: f32,
}

/// Alignment and spacing applied to a block of lines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockStyle {
    /// Horizontal alignment of each line.
    pub align: TextAlign,
    /// Vertical anchor of the whole block.
    pub vertical_pos: VerticalPos,
    /// Frame margin in pixels.
    pub margin: f32,
    /// Extra pixels between consecutive lines.
    pub line_spacing: f32,
}

impl From<&TextConfig> for BlockStyle {
    fn from(t: &TextConfig) -> Self {
        Self {
            align: t.text_align,
            vertical_pos: t.vertical_pos,
            margin: t.margin as f32,
            line_spacing: t.line_spacing as f32,
        }
    }
}

/// Total height of a block: line heights plus spacing between (not after) lines.
pub fn block_height(lines: &[LayoutLine], line_spacing: f32) -> f32 {
    if lines.is_empty() {
        return 0.0;
    }
    lines.iter().map(|l| l.height + line_spacing).sum::<f32>() - line_spacing
}

/// Place `lines` inside `frame`. Positions are not clamped to the frame.
pub fn layout<M: TextMeasure + ?Sized>(
    lines: &[String],
    font: &mut M,
    frame: FrameSize,
    style: &BlockStyle,
) -> Vec<LayoutLine> {
    let frame_w = frame.width as f32;
    let frame_h = frame.height as f32;

    let mut placed: Vec<LayoutLine> = lines
        .iter()
        .map(|text| LayoutLine {
            width: font.measure_width(text),
            height: font.bbox_height(text),
            text: text.clone(),
            x: 0.0,
            y: 0.0,
        })
        .collect();

    let total = block_height(&placed, style.line_spacing);
    let mut y = match style.vertical_pos {
        VerticalPos::Top => style.margin,
        VerticalPos::Middle => (frame_h - total) / 2.0,
        VerticalPos::Bottom => frame_h - total - style.margin,
    };

    for line in &mut placed {
        line.x = match style.align {
            TextAlign::Left => style.margin,
            TextAlign::Center => (frame_w - line.width) / 2.0,
            TextAlign::Right => frame_w - line.width - style.margin,
        };
        line.y = y;
        y += line.height + style.line_spacing;
    }
    placed
}

#[cfg(test)]
#[path = "../../tests/unit/layout/place.rs"]
mod tests;
