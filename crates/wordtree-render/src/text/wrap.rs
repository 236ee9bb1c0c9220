//! Greedy word wrapping for tooltip text.

use super::{TextMeasurer, TextStyle};
use serde::{Deserialize, Serialize};

/// One wrapped line; `dy` is the vertical offset from the first line's baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrappedLine {
    pub text: String,
    pub width: f64,
    pub dy: f64,
}

/// Packs whitespace-delimited words into lines no wider than `max_width_px`.
///
/// Words are never split: a word wider than the limit gets a line of its own. Blank input yields
/// no lines.
pub fn wrap_words(
    text: &str,
    measurer: &dyn TextMeasurer,
    style: &TextStyle,
    max_width_px: f64,
    line_height_px: f64,
) -> Vec<WrappedLine> {
    let mut lines: Vec<(String, f64)> = Vec::new();
    let mut cur = String::new();
    let mut cur_width = 0.0;

    for word in text.split_whitespace() {
        if cur.is_empty() {
            cur.push_str(word);
            cur_width = measurer.measure(&cur, style).width;
            continue;
        }

        let candidate = format!("{cur} {word}");
        let width = measurer.measure(&candidate, style).width;
        if width <= max_width_px {
            cur = candidate;
            cur_width = width;
            continue;
        }

        lines.push((std::mem::take(&mut cur), cur_width));
        cur.push_str(word);
        cur_width = measurer.measure(&cur, style).width;
    }
    if !cur.is_empty() {
        lines.push((cur, cur_width));
    }

    lines
        .into_iter()
        .enumerate()
        .map(|(i, (text, width))| WrappedLine {
            text,
            width,
            dy: i as f64 * line_height_px,
        })
        .collect()
}
