use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::config::model::RenderConfig;
use crate::foundation::core::FrameSize;
use crate::foundation::error::{QuoteError, QuoteResult};
use crate::foundation::log::LogSink;
use crate::input::quotes::QuoteRecord;
use crate::layout::place::{BlockStyle, LayoutLine, layout};
use crate::layout::wrap::wrap;
use crate::render::frame::ComposedFrame;
use crate::text::font::ResolvedFont;

/// Paints quote frames for one configuration, reusing its raster context between quotes.
pub struct Compositor {
    config: RenderConfig,
    size: FrameSize,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl Compositor {
    /// Prepare a compositor for `config`'s frame size.
    pub fn new(config: &RenderConfig) -> QuoteResult<Self> {
        let size = config.frame_size()?;
        let (w, h) = canvas_dims(size)?;
        Ok(Self {
            config: config.clone(),
            size,
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
        })
    }

    /// Configuration this compositor renders with.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Wrap and position every line drawn for `quote`, including the author line when enabled.
    pub fn layout_quote(&self, quote: &QuoteRecord, font: &mut ResolvedFont) -> Vec<LayoutLine> {
        let max_width = self.config.max_line_width();
        let mut lines = wrap(&quote.text, font, max_width);

        let author = quote.author.trim();
        if self.config.text.show_author && !author.is_empty() {
            // An empty line adds exactly one line_spacing gap.
            lines.push(String::new());
            lines.extend(wrap(&format!("- {author}"), font, max_width));
        }

        layout(&lines, font, self.size, &BlockStyle::from(&self.config.text))
    }

    /// Compose the frame for `quote`.
    ///
    /// A missing or undecodable background image falls back to the solid background color.
    pub fn compose(
        &mut self,
        quote: &QuoteRecord,
        font: &mut ResolvedFont,
        log: &dyn LogSink,
    ) -> QuoteResult<ComposedFrame> {
        let background = self.background_paint(quote, log);
        let lines = self.layout_quote(quote, font);
        let color = self.config.text.font_color;

        self.ctx.reset();
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        match background {
            Some(image) => self.ctx.set_paint(image),
            None => {
                let bg = self.config.video.background_color;
                self.ctx
                    .set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, 255));
            }
        }
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.size.width),
            f64::from(self.size.height),
        ));

        for line in &lines {
            font.draw(&mut self.ctx, &line.text, line.x, line.y, color);
        }

        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        tracing::debug!(lines = lines.len(), "composed frame");

        let mut rgb = Vec::with_capacity(self.size.pixel_count() * 3);
        for px in self.pixmap.data_as_u8_slice().chunks_exact(4) {
            rgb.extend_from_slice(&px[..3]);
        }
        ComposedFrame::from_rgb(self.size.width, self.size.height, rgb)
    }

    fn background_paint(&self, quote: &QuoteRecord, log: &dyn LogSink) -> Option<vello_cpu::Image> {
        let name = quote.background_image.trim();
        if name.is_empty() {
            return None;
        }
        let path = self.config.paths.images_dir().join(name);
        if !path.is_file() {
            log.warn(&format!(
                "Background image not found at '{}', using solid background color.",
                path.display()
            ));
            return None;
        }
        match load_background(&path, self.size) {
            Ok(image) => {
                log.info(&format!("Using background image: {}", path.display()));
                Some(image)
            }
            Err(err) => {
                log.warn(&format!(
                    "Could not use background image '{}' ({err}), using solid background color.",
                    path.display()
                ));
                None
            }
        }
    }
}

/// Compose a single frame with a one-off [`Compositor`].
pub fn compose(
    quote: &QuoteRecord,
    config: &RenderConfig,
    font: &mut ResolvedFont,
    log: &dyn LogSink,
) -> QuoteResult<ComposedFrame> {
    Compositor::new(config)?.compose(quote, font, log)
}

/// Decode `path`, stretch it to exactly `size` and drop any alpha channel.
fn load_background(path: &Path, size: FrameSize) -> QuoteResult<vello_cpu::Image> {
    let img = image::open(path)
        .with_context(|| format!("decode background image '{}'", path.display()))?;
    let rgb = img
        .resize_exact(
            size.width,
            size.height,
            image::imageops::FilterType::CatmullRom,
        )
        .to_rgb8();

    let (w, h) = canvas_dims(size)?;
    let pixels = rgb
        .pixels()
        .map(|p| vello_cpu::peniko::color::PremulRgba8 {
            r: p[0],
            g: p[1],
            b: p[2],
            a: 255,
        })
        .collect::<Vec<_>>();
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, false);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn canvas_dims(size: FrameSize) -> QuoteResult<(u16, u16)> {
    let w: u16 = size
        .width
        .try_into()
        .map_err(|_| QuoteError::render("frame width exceeds 65535"))?;
    let h: u16 = size
        .height
        .try_into()
        .map_err(|_| QuoteError::render("frame height exceeds 65535"))?;
    Ok((w, h))
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
