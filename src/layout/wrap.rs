use crate::text::font::TextMeasure;

/// Greedily wrap `text` on whitespace so each line measures at most `max_width` pixels.
///
/// A word wider than `max_width` is kept whole on its own line. The final line is always
/// emitted, so empty input yields a single empty line.
pub fn wrap<M: TextMeasure + ?Sized>(text: &str, font: &mut M, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if font.measure_width(&candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    lines.push(current);

    tracing::debug!(lines = lines.len(), max_width, "wrapped text");
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
