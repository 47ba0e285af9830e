use std::path::{Path, PathBuf};

use crate::config::model::RenderConfig;
use crate::foundation::core::Rgb8;
use crate::foundation::error::{QuoteError, QuoteResult};
use crate::foundation::log::LogSink;
use crate::text::builtin::BuiltinFont;
use crate::text::outline::OutlineFont;

const MAX_SEARCH_DEPTH: usize = 4;

/// Width and ink-height measurement used by the layout engine.
pub trait TextMeasure {
    /// Advance width of `text` in pixels.
    fn measure_width(&mut self, text: &str) -> f32;
    /// Distance from the line top to the lowest inked row of `text`, in pixels.
    fn bbox_height(&mut self, text: &str) -> f32;
}

/// Where a [`ResolvedFont`] came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontOrigin {
    /// The configured `text.font_path`.
    UserPath(PathBuf),
    /// A platform font file located by name.
    System(PathBuf),
    /// The built-in bitmap face.
    Builtin,
}

#[derive(Debug)]
enum Face {
    Outline(Box<OutlineFont>),
    Builtin(BuiltinFont),
}

/// A loaded face, resolved once per run and reused for every quote.
#[derive(Debug)]
pub struct ResolvedFont {
    face: Face,
    origin: FontOrigin,
}

impl ResolvedFont {
    /// The built-in bitmap face.
    pub fn builtin() -> Self {
        Self {
            face: Face::Builtin(BuiltinFont),
            origin: FontOrigin::Builtin,
        }
    }

    fn outline(font: OutlineFont, origin: FontOrigin) -> Self {
        Self {
            face: Face::Outline(Box::new(font)),
            origin,
        }
    }

    /// Where this face was loaded from.
    pub fn origin(&self) -> &FontOrigin {
        &self.origin
    }

    /// Whether this is the built-in bitmap face.
    pub fn is_builtin(&self) -> bool {
        matches!(self.face, Face::Builtin(_))
    }

    /// Draw one line with the top of its line box at `(x, y)`.
    pub fn draw(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        x: f32,
        y: f32,
        color: Rgb8,
    ) {
        match &mut self.face {
            Face::Outline(f) => f.draw(ctx, text, x, y, color),
            Face::Builtin(f) => f.draw(ctx, text, x, y, color),
        }
    }
}

impl TextMeasure for ResolvedFont {
    fn measure_width(&mut self, text: &str) -> f32 {
        match &mut self.face {
            Face::Outline(f) => f.measure_width(text),
            Face::Builtin(f) => f.measure_width(text),
        }
    }

    fn bbox_height(&mut self, text: &str) -> f32 {
        match &mut self.face {
            Face::Outline(f) => f.bbox_height(text),
            Face::Builtin(f) => f.bbox_height(text),
        }
    }
}

/// Host platform family, selecting default font names and directories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    /// Microsoft Windows.
    Windows,
    /// Apple macOS.
    MacOs,
    /// Linux and every other Unix-like system.
    Other,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Other
        }
    }

    /// Font file names tried in priority order.
    pub fn font_names(self) -> &'static [&'static str] {
        match self {
            Self::Windows => &["arial.ttf", "calibri.ttf", "verdana.ttf"],
            Self::MacOs => &["Arial.ttf", "Helvetica.ttf"],
            Self::Other => &["DejaVuSans.ttf", "LiberationSans-Regular.ttf", "Arial.ttf"],
        }
    }

    /// Directories holding installed fonts.
    pub fn font_dirs(self) -> Vec<PathBuf> {
        let home = std::env::var_os("HOME").map(PathBuf::from);
        match self {
            Self::Windows => {
                let windir = std::env::var_os("WINDIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("C:\\Windows"));
                let mut dirs = vec![windir.join("Fonts")];
                if let Some(local) = std::env::var_os("LOCALAPPDATA") {
                    dirs.push(PathBuf::from(local).join("Microsoft\\Windows\\Fonts"));
                }
                dirs
            }
            Self::MacOs => {
                let mut dirs = vec![
                    PathBuf::from("/System/Library/Fonts"),
                    PathBuf::from("/System/Library/Fonts/Supplemental"),
                    PathBuf::from("/Library/Fonts"),
                ];
                if let Some(home) = home {
                    dirs.push(home.join("Library/Fonts"));
                }
                dirs
            }
            Self::Other => {
                let mut dirs = vec![
                    PathBuf::from("/usr/share/fonts"),
                    PathBuf::from("/usr/local/share/fonts"),
                ];
                if let Some(data) = std::env::var_os("XDG_DATA_HOME") {
                    dirs.push(PathBuf::from(data).join("fonts"));
                }
                if let Some(home) = home {
                    dirs.push(home.join(".local/share/fonts"));
                    dirs.push(home.join(".fonts"));
                }
                dirs
            }
        }
    }
}

/// Three-stage font lookup: configured path, platform names, built-in face.
#[derive(Clone, Debug)]
pub struct FontResolver {
    names: Vec<String>,
    search_dirs: Vec<PathBuf>,
}

impl FontResolver {
    /// Resolver for the host platform, searching `assets_fonts` before the system directories.
    pub fn for_platform(platform: Platform, assets_fonts: &Path) -> Self {
        let mut search_dirs = vec![assets_fonts.to_path_buf()];
        search_dirs.extend(platform.font_dirs());
        Self {
            names: platform.font_names().iter().map(|s| s.to_string()).collect(),
            search_dirs,
        }
    }

    /// Resolver with an explicit name list and search path.
    pub fn with_search(names: Vec<String>, search_dirs: Vec<PathBuf>) -> Self {
        Self { names, search_dirs }
    }

    /// Resolve the face for `config`. Never fails.
    pub fn resolve(&self, config: &RenderConfig, log: &dyn LogSink) -> ResolvedFont {
        let size_px = config.text.font_size as f32;

        if let Some(user_path) = config.text.font_path() {
            let fonts_dir = config.paths.fonts_dir();
            match probe_user_font(user_path, &fonts_dir, size_px) {
                Ok((font, path)) => {
                    log.info(&format!(
                        "Successfully loaded user-specified font: {}",
                        path.display()
                    ));
                    return ResolvedFont::outline(font, FontOrigin::UserPath(path));
                }
                Err(err) => {
                    tracing::debug!(error = %err, "user font probe failed");
                    log.warn(&format!(
                        "Could not load user font at '{}', searching for system fonts.",
                        user_path.display()
                    ));
                }
            }
        }

        for name in &self.names {
            match self.probe_named(name, size_px) {
                Ok((font, path)) => {
                    log.info(&format!(
                        "Found and loaded system font: {name} ({})",
                        path.display()
                    ));
                    return ResolvedFont::outline(font, FontOrigin::System(path));
                }
                Err(err) => tracing::debug!(font = %name, error = %err, "font candidate rejected"),
            }
        }

        log.warn("No suitable system fonts found. Using built-in bitmap font.");
        ResolvedFont::builtin()
    }

    fn probe_named(&self, name: &str, size_px: f32) -> QuoteResult<(OutlineFont, PathBuf)> {
        let mut last_err = None;
        for dir in &self.search_dirs {
            let Some(path) = find_font_file(dir, name, MAX_SEARCH_DEPTH) else {
                continue;
            };
            match OutlineFont::load(&path, size_px) {
                Ok(font) => return Ok((font, path)),
                Err(err) => last_err = Some(err),
            }
        }
        Err(last_err.unwrap_or_else(|| QuoteError::render(format!("font '{name}' not found"))))
    }
}

/// Resolve the face for `config` on the host platform. Never fails.
pub fn resolve_font(config: &RenderConfig, log: &dyn LogSink) -> ResolvedFont {
    FontResolver::for_platform(Platform::current(), &config.paths.fonts_dir()).resolve(config, log)
}

fn probe_user_font(
    user_path: &Path,
    fonts_dir: &Path,
    size_px: f32,
) -> QuoteResult<(OutlineFont, PathBuf)> {
    let path = if user_path.is_file() {
        user_path.to_path_buf()
    } else if user_path.is_relative() && fonts_dir.join(user_path).is_file() {
        fonts_dir.join(user_path)
    } else {
        return Err(QuoteError::render(format!(
            "font file '{}' does not exist",
            user_path.display()
        )));
    };
    let font = OutlineFont::load(&path, size_px)?;
    Ok((font, path))
}

/// Depth-limited search for a file called `name` (ASCII case-insensitive) below `dir`.
pub(crate) fn find_font_file(dir: &Path, name: &str, depth: usize) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    let mut subdirs = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(kind) = entry.file_type() else {
            continue;
        };
        if kind.is_dir() {
            subdirs.push(path);
        } else if entry
            .file_name()
            .to_str()
            .is_some_and(|n| n.eq_ignore_ascii_case(name))
        {
            return Some(path);
        }
    }
    if depth == 0 {
        return None;
    }
    subdirs.sort();
    subdirs
        .iter()
        .find_map(|sub| find_font_file(sub, name, depth - 1))
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
