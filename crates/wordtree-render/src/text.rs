use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

mod wrap;

pub use wrap::{WrappedLine, wrap_words};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self { font_size: 12.0 }
    }
}

impl TextStyle {
    /// Labels and tooltips are always set in the sans-serif family; only the size varies.
    pub fn sans_serif(font_size: f64) -> Self {
        Self { font_size }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

/// Text measurement capability of a rendering surface.
///
/// Layout and tooltip wrapping only need widths; any surface with real font metrics (a browser,
/// a font rasterizer) can stand in for the deterministic estimate below.
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Font-independent estimate: every column is `char_width_factor` em wide, and East Asian wide
/// characters take two columns.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl DeterministicTextMeasurer {
    pub fn normalized_text_lines(text: &str) -> Vec<String> {
        let out = text.split('\n').map(|s| s.to_string()).collect::<Vec<_>>();
        if out.is_empty() {
            return vec!["".to_string()];
        }
        out
    }

    fn columns(line: &str) -> usize {
        line.chars().map(|c| c.width().unwrap_or(0)).sum()
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };

        let lines = Self::normalized_text_lines(text);
        let font_size = style.font_size.max(1.0);
        let max_columns = lines.iter().map(|l| Self::columns(l)).max().unwrap_or(0);

        TextMetrics {
            width: max_columns as f64 * font_size * char_width_factor,
            height: lines.len() as f64 * font_size * line_height_factor,
            line_count: lines.len(),
        }
    }
}
