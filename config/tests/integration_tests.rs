use std::path::Path;

use odt_commons_config::{
    BUILD_INFO_FILE, BuildInfo, BuildInfoProvider, CommonsConfig, ConfigError, LOG_CONFIG_FILE,
    LogFormat, is_logging_configured,
};
use odt_commons_core::{CommonsError, SemVersion};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn write(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).unwrap();
}

fn sample_build_info() -> &'static str {
    r#"
build-jdk: "rustc 1.86.0"
built-by: ci
created-by: cargo
git-sha: 3f2a9c1
scm-url: https://github.com/opendatatrentino/odt-commons
timestamp: "2015-06-01T10:00:00Z"
version: 1.1.0
"#
}

/// Conf and resource directories under one temporary root.
fn layout() -> (TempDir, CommonsConfig) {
    let root = TempDir::new().unwrap();
    std::fs::create_dir_all(root.path().join("conf")).unwrap();
    std::fs::create_dir_all(root.path().join("res")).unwrap();
    let config = CommonsConfig::new("integration")
        .with_conf_dir(root.path().join("conf"))
        .with_resource_dir(root.path().join("res"));
    (root, config)
}

// ---------------------------------------------------------------------------
// Build info
// ---------------------------------------------------------------------------

#[test]
fn test_build_info_from_resources() {
    let (root, config) = layout();
    write(&root.path().join("res"), BUILD_INFO_FILE, sample_build_info());

    let info = config.build_info().unwrap();
    assert!(!info.scm_url.is_empty());
    assert!(!info.version.is_empty());
    assert_eq!(info.semver().unwrap(), SemVersion::release(1, 1, 0));
}

#[test]
fn test_build_info_is_cached() {
    let (root, config) = layout();
    let path = root.path().join("res").join(BUILD_INFO_FILE);
    std::fs::write(&path, sample_build_info()).unwrap();

    let first = config.build_info().unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(config.build_info().unwrap(), first);

    let fresh = CommonsConfig::new("other").with_resource_dir(root.path().join("res"));
    assert!(matches!(
        fresh.build_info(),
        Err(ConfigError::Commons(CommonsError::NotFound(_)))
    ));
}

#[test]
fn test_build_info_partial_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "partial.yml", "git-sha: abc\n");

    let info = BuildInfo::load(dir.path().join("partial.yml")).unwrap();
    assert_eq!(info.git_sha, "abc");
    assert_eq!(info.version, "");
}

#[test]
fn test_build_info_malformed_yaml() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "bad.yml", "version: [unclosed\n");

    let result = BuildInfo::load(dir.path().join("bad.yml"));
    assert!(matches!(result, Err(ConfigError::Yaml(_))));
}

// ---------------------------------------------------------------------------
// Logging configuration
// ---------------------------------------------------------------------------

#[test]
fn test_conf_dir_overrides_resources() {
    let (root, config) = layout();
    write(&root.path().join("res"), LOG_CONFIG_FILE, "level: warn\n");
    assert_eq!(config.log_config().unwrap().level, "warn");

    write(&root.path().join("conf"), LOG_CONFIG_FILE, "level: debug\nformat: pretty\n");
    let found = config.find_log_config().unwrap();
    assert!(found.starts_with(root.path().join("conf")));

    let log = config.log_config().unwrap();
    assert_eq!(log.level, "debug");
    assert_eq!(log.format, LogFormat::Pretty);
}

#[test]
fn test_init_logging_only_once() {
    let (root, config) = layout();
    write(&root.path().join("conf"), LOG_CONFIG_FILE, "level: trace\nansi: false\n");

    assert!(config.init_logging().unwrap());
    assert!(is_logging_configured());
    assert!(!config.init_logging().unwrap());
    assert!(!CommonsConfig::new("again").init_logging().unwrap());
}
