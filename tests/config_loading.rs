// tests/config_loading.rs

use std::fs;

use tempfile::tempdir;

use taskgraph_explorer::config::{load_and_validate, load_or_default, ConfigFile};
use taskgraph_explorer::errors::ExplorerError;
use taskgraph_explorer::types::LayoutDirection;

#[test]
fn loads_full_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Explorer.toml");
    fs::write(
        &path,
        r#"
[server]
url = "https://engine.example.com:8443/"
refresh_secs = 15

[layout]
direction = "top_to_bottom"
rank_sep = 80
node_gap = 12.5
ordering_passes = 8

[render]
char_width = 7.0
"#,
    )
    .unwrap();

    let cfg = load_and_validate(&path).unwrap();
    assert_eq!(cfg.server.url, "https://engine.example.com:8443/");
    assert_eq!(cfg.server.refresh_secs, 15);
    assert_eq!(cfg.layout.direction, LayoutDirection::TopToBottom);
    assert_eq!(cfg.layout.rank_sep, 80.0);
    assert_eq!(cfg.layout.node_gap, 12.5);
    assert_eq!(cfg.layout.ordering_passes, 8);
    assert_eq!(cfg.render.char_width, 7.0);
    assert_eq!(cfg.render.line_height, 18.0);
}

#[test]
fn explicit_missing_path_is_an_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(matches!(
        load_or_default(Some(&missing)),
        Err(ExplorerError::IoError(_))
    ));
}

#[test]
fn invalid_values_are_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[layout]\nnode_gap = -4.0\n").unwrap();

    let err = load_and_validate(&path).unwrap_err();
    assert!(matches!(err, ExplorerError::ConfigError(_)));
    assert!(err.to_string().contains("node_gap"));
}

#[test]
fn server_override_is_validated_too() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Explorer.toml");
    fs::write(&path, "[server]\nrefresh_secs = 5\n").unwrap();

    let mut raw = load_or_default(Some(&path)).unwrap();
    raw.server.url = "not a url".to_string();
    assert!(ConfigFile::try_from(raw).is_err());
}
