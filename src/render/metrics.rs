// src/render/metrics.rs

use serde::Deserialize;

use crate::types::NodeDimension;

/// Fixed-pitch estimate of how large a node label renders.
///
/// A headless renderer has no font engine, so it approximates every glyph
/// with the same advance width and pads the single-line label box.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TextMetrics {
    #[serde(default = "default_char_width")]
    pub char_width: f64,
    #[serde(default = "default_line_height")]
    pub line_height: f64,
    #[serde(default = "default_padding_x")]
    pub padding_x: f64,
    #[serde(default = "default_padding_y")]
    pub padding_y: f64,
}

fn default_char_width() -> f64 {
    8.0
}

fn default_line_height() -> f64 {
    18.0
}

fn default_padding_x() -> f64 {
    12.0
}

fn default_padding_y() -> f64 {
    8.0
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: default_char_width(),
            line_height: default_line_height(),
            padding_x: default_padding_x(),
            padding_y: default_padding_y(),
        }
    }
}

impl TextMetrics {
    pub fn measure(&self, label: &str) -> NodeDimension {
        let chars = label.replace('\t', "    ").chars().count() as f64;
        NodeDimension::new(
            chars * self.char_width + 2.0 * self.padding_x,
            self.line_height + 2.0 * self.padding_y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_width_scales_with_length() {
        let metrics = TextMetrics::default();
        assert_eq!(metrics.measure("//:a"), NodeDimension::new(56.0, 34.0));
        assert_eq!(metrics.measure(""), NodeDimension::new(24.0, 34.0));
    }
}
