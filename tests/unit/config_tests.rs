//! Layered configuration loading through the public entry point.

use std::path::PathBuf;
use std::time::Duration;

use occmatch::config::{Config, DEFAULT_RANKER_TIMEOUT_MS};
use occmatch::search::DEFAULT_TOP_N;
use occmatch::test_utils::fixtures::UnitTestFixture;

#[test]
fn defaults_without_any_file() {
    let config = Config::default();
    assert_eq!(config.matcher.default_top_n, DEFAULT_TOP_N);
    assert_eq!(config.ranker.timeout_ms, DEFAULT_RANKER_TIMEOUT_MS);
    assert!(!config.ranker.enabled);
    assert!(config.taxonomy.path.is_none());
}

#[test]
fn explicit_file_overrides_defaults_partially() {
    let fixture = UnitTestFixture::new();
    let path = fixture.create_file(
        "custom.toml",
        r#"
[taxonomy]
path = "data/soc.json"

[ranker]
command = "rank-tool"
timeout_ms = 500
"#,
    );

    let config = Config::load(Some(&path), &fixture.data_path).unwrap();

    assert_eq!(config.taxonomy.path, Some(PathBuf::from("data/soc.json")));
    assert_eq!(config.ranker.command.as_deref(), Some("rank-tool"));
    assert_eq!(config.ranker.timeout(), Duration::from_millis(500));
    assert_eq!(config.matcher.default_top_n, DEFAULT_TOP_N);
    assert!(config.ranker.args.is_empty());
}

#[test]
fn missing_explicit_file_falls_back_to_defaults() {
    let fixture = UnitTestFixture::new();
    let config = Config::load(Some(&fixture.data_path.join("none.toml")), &fixture.data_path)
        .unwrap();
    assert_eq!(config.matcher.default_top_n, DEFAULT_TOP_N);
}
