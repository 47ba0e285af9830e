use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{QuoteError, QuoteResult};
use crate::foundation::log::LogSink;

/// One quote to render.
///
/// `author` and `background_image` are empty strings when absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteRecord {
    /// Quote body.
    pub text: String,
    /// Attribution, possibly empty.
    pub author: String,
    /// File name under `<assets>/images/`, possibly empty.
    pub background_image: String,
}

impl QuoteRecord {
    /// A record carrying only quote text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// The first `max_chars` characters of the text, for progress lines.
    pub fn preview(&self, max_chars: usize) -> String {
        let mut chars = self.text.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{head}...")
        } else {
            head
        }
    }
}

/// Supported quote file formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuoteFormat {
    /// One quote per non-blank line.
    Txt,
    /// Header row with `text`, `author`, `background_image` columns.
    Csv,
}

impl QuoteFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(QuoteFormat::Txt),
            "csv" => Some(QuoteFormat::Csv),
            _ => None,
        }
    }
}

/// Load quote records from a `.txt` or `.csv` file.
pub fn load_quotes(path: &Path, log: &dyn LogSink) -> QuoteResult<Vec<QuoteRecord>> {
    log.info(&format!("Loading quotes from: {}", path.display()));

    let format = QuoteFormat::from_path(path).ok_or_else(|| {
        QuoteError::input(format!(
            "unsupported quotes file '{}' (expected .txt or .csv)",
            path.display()
        ))
    })?;

    let quotes = match format {
        QuoteFormat::Txt => {
            log.info(&format!("Detected TXT file: {}", path.display()));
            let text = std::fs::read_to_string(path).map_err(|e| {
                QuoteError::input(format!("failed to read '{}': {e}", path.display()))
            })?;
            parse_txt(&text)
        }
        QuoteFormat::Csv => {
            log.info(&format!("Detected CSV file: {}", path.display()));
            let rdr = csv_reader().from_path(path).map_err(|e| {
                QuoteError::input(format!("failed to open '{}': {e}", path.display()))
            })?;
            collect_csv(rdr).map_err(|e| {
                QuoteError::input(format!("failed to parse '{}': {e}", path.display()))
            })?
        }
    };

    log.info(&format!("Loaded {} quote(s).", quotes.len()));
    Ok(quotes)
}

/// Parse TXT content: one record per non-blank line, trimmed.
pub fn parse_txt(text: &str) -> Vec<QuoteRecord> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(QuoteRecord::from_text)
        .collect()
}

/// Parse CSV content with a header row. Missing columns default to empty strings and unknown
/// columns are ignored.
pub fn parse_csv(text: &str) -> QuoteResult<Vec<QuoteRecord>> {
    collect_csv(csv_reader().from_reader(text.as_bytes()))
        .map_err(|e| QuoteError::input(format!("failed to parse csv: {e}")))
}

fn csv_reader() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).flexible(true);
    builder
}

fn collect_csv<R: std::io::Read>(mut rdr: csv::Reader<R>) -> Result<Vec<QuoteRecord>, csv::Error> {
    rdr.deserialize::<QuoteRecord>().collect()
}

#[cfg(test)]
#[path = "../../tests/unit/input/quotes.rs"]
mod tests;
