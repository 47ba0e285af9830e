use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::foundation::core::Rgb8;
use crate::foundation::error::{QuoteError, QuoteResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color carried through Parley layouts.
pub(crate) struct TextBrush {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgb8> for TextBrush {
    fn from(c: Rgb8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: 255,
        }
    }
}

/// Outline font face loaded from a font file and fixed at one pixel size.
///
/// Owns its own Parley contexts so shaping state is reused across every line of a run.
pub struct OutlineFont {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    family: String,
    font: vello_cpu::peniko::FontData,
    size_px: f32,
    source: PathBuf,
}

impl std::fmt::Debug for OutlineFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineFont")
            .field("family", &self.family)
            .field("size_px", &self.size_px)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl OutlineFont {
    /// Load and register the face stored at `path`.
    pub fn load(path: &Path, size_px: f32) -> QuoteResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            QuoteError::render(format!("read font '{}': {e}", path.display()))
        })?;
        Self::from_bytes(bytes, size_px, path.to_path_buf())
    }

    /// Register raw font bytes. Fails when the bytes hold no usable face.
    pub fn from_bytes(bytes: Vec<u8>, size_px: f32, source: PathBuf) -> QuoteResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(QuoteError::validation(
                "font size must be finite and > 0",
            ));
        }

        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            QuoteError::render(format!(
                "no font families found in '{}'",
                source.display()
            ))
        })?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| QuoteError::render("registered font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            font,
            size_px,
            source,
        })
    }

    /// Family name the face registered under.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Pixel size every line is shaped at.
    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// File the face was loaded from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Shape `text` as a single unbroken line.
    fn shape(&mut self, text: &str, brush: TextBrush) -> parley::Layout<TextBrush> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(self.size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// Advance width of `text` in pixels.
    pub fn measure_width(&mut self, text: &str) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        let layout = self.shape(text, TextBrush::default());
        layout
            .lines()
            .map(|l| l.metrics().advance)
            .fold(0.0f32, f32::max)
    }

    /// Distance from the top of the line box to the lowest inked pixel row.
    ///
    /// Measured by rasterizing the line, so descenders count only when present.
    pub fn bbox_height(&mut self, text: &str) -> f32 {
        if text.trim().is_empty() {
            return 0.0;
        }
        let brush = TextBrush {
            r: 255,
            g: 255,
            b: 255,
            a: 255,
        };
        let layout = self.shape(text, brush);

        let (advance, box_height) = layout.lines().fold((0.0f32, 0.0f32), |(w, h), l| {
            let m = l.metrics();
            (w.max(m.advance), h + m.ascent + m.descent + m.leading)
        });
        // Ink can spill past the nominal line box on either side.
        let pad = (self.size_px * 0.5).ceil().max(2.0);
        let width = to_canvas_dim(advance + 2.0 * pad);
        let height = to_canvas_dim(box_height + 2.0 * pad);

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(pad),
            f64::from(pad),
        )));
        self.fill_layout(&mut ctx, &layout);
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);

        let stride = usize::from(width) * 4;
        let bottom = pixmap
            .data_as_u8_slice()
            .chunks_exact(stride)
            .rposition(|row| row.chunks_exact(4).any(|px| px[3] > 0));
        match bottom {
            Some(row) => (row as f32 + 1.0 - pad).max(0.0),
            None => 0.0,
        }
    }

    /// Draw `text` with the top-left of its line box at `(x, y)`.
    pub fn draw(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        x: f32,
        y: f32,
        color: Rgb8,
    ) {
        if text.is_empty() {
            return;
        }
        let layout = self.shape(text, TextBrush::from(color));
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(x),
            f64::from(y),
        )));
        self.fill_layout(ctx, &layout);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    fn fill_layout(&self, ctx: &mut vello_cpu::RenderContext, layout: &parley::Layout<TextBrush>) {
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }
}

fn to_canvas_dim(v: f32) -> u16 {
    v.ceil().clamp(1.0, f32::from(u16::MAX)) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/text/outline.rs"]
mod tests;
