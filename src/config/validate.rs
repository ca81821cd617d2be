// src/config/validate.rs

use reqwest::Url;

use crate::config::model::{ConfigFile, RawConfigFile, ServerSection};
use crate::errors::{ExplorerError, Result};
use crate::layout::LayoutConfig;
use crate::render::TextMetrics;

pub const MAX_ORDERING_PASSES: usize = 64;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = ExplorerError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_server(&raw.server)?;
        validate_layout(&raw.layout)?;
        validate_render(&raw.render)?;
        Ok(ConfigFile::new_unchecked(raw.server, raw.layout, raw.render))
    }
}

fn config_error(msg: String) -> ExplorerError {
    ExplorerError::ConfigError(msg)
}

fn validate_server(server: &ServerSection) -> Result<()> {
    let url = Url::parse(&server.url)
        .map_err(|e| config_error(format!("[server].url '{}' is not a URL: {e}", server.url)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(config_error(format!(
            "[server].url must use http or https (got '{}')",
            url.scheme()
        )));
    }
    if url.host_str().is_none() {
        return Err(config_error(format!(
            "[server].url '{}' has no host",
            server.url
        )));
    }
    Ok(())
}

fn non_negative(section: &str, field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(config_error(format!(
            "[{section}].{field} must be a finite number >= 0 (got {value})"
        )));
    }
    Ok(())
}

fn positive(section: &str, field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(config_error(format!(
            "[{section}].{field} must be a finite number > 0 (got {value})"
        )));
    }
    Ok(())
}

fn validate_layout(layout: &LayoutConfig) -> Result<()> {
    non_negative("layout", "rank_sep", layout.rank_sep)?;
    non_negative("layout", "node_gap", layout.node_gap)?;

    if !(1..=MAX_ORDERING_PASSES).contains(&layout.ordering_passes) {
        return Err(config_error(format!(
            "[layout].ordering_passes must be between 1 and {MAX_ORDERING_PASSES} (got {})",
            layout.ordering_passes
        )));
    }
    Ok(())
}

fn validate_render(render: &TextMetrics) -> Result<()> {
    positive("render", "char_width", render.char_width)?;
    positive("render", "line_height", render.line_height)?;
    non_negative("render", "padding_x", render.padding_x)?;
    non_negative("render", "padding_y", render.padding_y)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_src: &str) -> Result<ConfigFile> {
        let raw: RawConfigFile = toml::from_str(toml_src)?;
        ConfigFile::try_from(raw)
    }

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.server, ServerSection::default());
        assert_eq!(cfg.layout, LayoutConfig::default());
        assert_eq!(cfg.render, TextMetrics::default());
    }

    #[test]
    fn rejects_non_http_url() {
        let err = parse("[server]\nurl = \"ftp://example.com\"\n").unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn rejects_negative_separation() {
        let err = parse("[layout]\nrank_sep = -1.0\n").unwrap_err();
        assert!(err.to_string().contains("rank_sep"));
    }

    #[test]
    fn rejects_zero_char_width() {
        let err = parse("[render]\nchar_width = 0.0\n").unwrap_err();
        assert!(err.to_string().contains("char_width"));
    }

    #[test]
    fn ordering_passes_bounds() {
        assert!(parse("[layout]\nordering_passes = 0\n").is_err());
        assert!(parse("[layout]\nordering_passes = 65\n").is_err());
        assert!(parse("[layout]\nordering_passes = 64\n").is_ok());
    }

    #[test]
    fn unknown_section_is_a_parse_error() {
        assert!(matches!(
            parse("[task.A]\ncmd = \"echo\"\n"),
            Err(ExplorerError::TomlError(_))
        ));
    }
}
