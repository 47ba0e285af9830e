use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde_json::{Map, Value};

use crate::config::model::{Codec, RenderConfig, TextAlign, VerticalPos};
use crate::foundation::core::Rgb8;
use crate::foundation::error::{QuoteError, QuoteResult};

/// Merge `overrides` over `base`, returning a new document.
///
/// Top-level scalar (or array) override keys replace the base value. Object override keys are
/// merged key-by-key one level deep: each inner key replaces the base's inner key, inner keys
/// absent from the override keep their base value. Neither input is modified.
///
/// A `null` override leaves the base untouched; a non-object override replaces it wholesale.
pub fn merge_config_values(base: &Value, overrides: &Value) -> Value {
    let (Value::Object(base_map), Value::Object(over_map)) = (base, overrides) else {
        return match overrides {
            Value::Null => base.clone(),
            other => other.clone(),
        };
    };

    let mut out = base_map.clone();
    for (key, value) in over_map {
        match (out.get(key), value) {
            (Some(Value::Object(group)), Value::Object(patch)) => {
                let mut merged = group.clone();
                for (inner_key, inner_value) in patch {
                    merged.insert(inner_key.clone(), inner_value.clone());
                }
                out.insert(key.clone(), Value::Object(merged));
            }
            _ => {
                out.insert(key.clone(), value.clone());
            }
        }
    }
    Value::Object(out)
}

/// Read a configuration document from disk without interpreting it.
pub fn load_config_value(path: &Path) -> QuoteResult<Value> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            QuoteError::config(format!(
                "configuration file not found at '{}'",
                path.display()
            ))
        } else {
            QuoteError::config(format!(
                "failed to read configuration file '{}': {e}",
                path.display()
            ))
        }
    })?;
    serde_json::from_str(&text).map_err(|e| {
        QuoteError::config(format!(
            "failed to parse configuration file '{}': {e}",
            path.display()
        ))
    })
}

impl RenderConfig {
    /// Interpret a configuration document and validate it.
    pub fn from_value(value: Value) -> QuoteResult<Self> {
        let cfg: RenderConfig = serde_json::from_value(value)
            .map_err(|e| QuoteError::config(format!("invalid configuration: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load and validate a configuration document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> QuoteResult<Self> {
        Self::from_value(load_config_value(path.as_ref())?)
    }

    /// Produce a new configuration with `overrides` merged over this one.
    pub fn with_overrides(&self, overrides: &Value) -> QuoteResult<Self> {
        let base = self.to_value()?;
        Self::from_value(merge_config_values(&base, overrides))
    }

    /// This configuration as a JSON document.
    pub fn to_value(&self) -> QuoteResult<Value> {
        serde_json::to_value(self)
            .context("serialize configuration")
            .map_err(QuoteError::from)
    }

    /// Pretty-printed JSON, suitable for writing a starter `config.json`.
    pub fn to_json_pretty(&self) -> QuoteResult<String> {
        serde_json::to_string_pretty(self)
            .context("serialize configuration")
            .map_err(QuoteError::from)
    }
}

/// Typed builder for the override document a frontend merges over the file configuration.
///
/// Only fields that are set appear in [`ConfigOverrides::to_value`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigOverrides {
    /// `video.duration`.
    pub duration: Option<u32>,
    /// `video.fps`.
    pub fps: Option<u32>,
    /// `video.frame_width`.
    pub frame_width: Option<u32>,
    /// `video.frame_height`.
    pub frame_height: Option<u32>,
    /// `video.background_color`.
    pub background_color: Option<Rgb8>,
    /// `video.codec`.
    pub codec: Option<Codec>,
    /// `text.font_path`.
    pub font_path: Option<PathBuf>,
    /// `text.font_size`.
    pub font_size: Option<u32>,
    /// `text.font_color`.
    pub font_color: Option<Rgb8>,
    /// `text.text_align`.
    pub text_align: Option<TextAlign>,
    /// `text.vertical_pos`.
    pub vertical_pos: Option<VerticalPos>,
    /// `text.show_author`.
    pub show_author: Option<bool>,
    /// `paths.output`.
    pub output: Option<PathBuf>,
    /// `paths.assets`.
    pub assets: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Render the set fields as a nested JSON object.
    pub fn to_value(&self) -> Value {
        fn put<T: serde::Serialize>(group: &mut Map<String, Value>, key: &str, v: &Option<T>) {
            if let Some(v) = v
                && let Ok(json) = serde_json::to_value(v)
            {
                group.insert(key.to_owned(), json);
            }
        }

        let mut video = Map::new();
        put(&mut video, "duration", &self.duration);
        put(&mut video, "fps", &self.fps);
        put(&mut video, "frame_width", &self.frame_width);
        put(&mut video, "frame_height", &self.frame_height);
        put(&mut video, "background_color", &self.background_color);
        put(&mut video, "codec", &self.codec);

        let mut text = Map::new();
        put(&mut text, "font_path", &self.font_path);
        put(&mut text, "font_size", &self.font_size);
        put(&mut text, "font_color", &self.font_color);
        put(&mut text, "text_align", &self.text_align);
        put(&mut text, "vertical_pos", &self.vertical_pos);
        put(&mut text, "show_author", &self.show_author);

        let mut paths = Map::new();
        put(&mut paths, "output", &self.output);
        put(&mut paths, "assets", &self.assets);

        let mut root = Map::new();
        for (name, group) in [("video", video), ("text", text), ("paths", paths)] {
            if !group.is_empty() {
                root.insert(name.to_owned(), Value::Object(group));
            }
        }
        Value::Object(root)
    }

    /// Return `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        self.to_value().as_object().is_none_or(Map::is_empty)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/merge.rs"]
mod tests;
