// src/config/model.rs

use serde::Deserialize;

use crate::layout::LayoutConfig;
use crate::render::TextMetrics;

/// Top-level configuration as read from a TOML file, before validation.
///
/// ```toml
/// [server]
/// url = "http://127.0.0.1:5000"
/// refresh_secs = 10
///
/// [layout]
/// direction = "bottom_to_top"
/// rank_sep = 50.0
/// node_gap = 30.0
/// ordering_passes = 4
///
/// [render]
/// char_width = 8.0
/// line_height = 18.0
/// padding_x = 12.0
/// padding_y = 8.0
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub render: TextMetrics,
}

/// Validated configuration. Build it with `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub server: ServerSection,
    pub layout: LayoutConfig,
    pub render: TextMetrics,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        server: ServerSection,
        layout: LayoutConfig,
        render: TextMetrics,
    ) -> Self {
        Self {
            server,
            layout,
            render,
        }
    }
}

/// `[server]` section: where the engine's explorer API lives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Base URL; the `/api/1/...` paths are appended to it.
    #[serde(default = "default_url")]
    pub url: String,

    /// Seconds between refetches. `0` fetches once and keeps the result.
    #[serde(default)]
    pub refresh_secs: u64,
}

fn default_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            url: default_url(),
            refresh_secs: 0,
        }
    }
}
