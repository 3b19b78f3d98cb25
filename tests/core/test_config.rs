// Configuration loading with environment overrides

use kbindex::core::config::Config;
use kbindex::core::xdg::XdgDirs;
use kbindex::IndexerError;
use serial_test::serial;
use std::env;
use tempfile::TempDir;

const VARS: &[&str] = &[
    "KBINDEX_CONFIG",
    "KBINDEX_STATE_DIR",
    "KBINDEX_BATCH_SIZE",
    "KBINDEX_COMMIT_INTERVAL",
    "KBINDEX_API_TOKEN",
];

fn xdg_in(temp: &TempDir) -> XdgDirs {
    XdgDirs {
        config_dir: temp.path().join("config"),
        state_dir: temp.path().join("state"),
    }
}

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_toml_file_then_env_override() {
    clear_env();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("kbindex.toml");
    std::fs::write(
        &path,
        "[expansion]\nbatch_size = 7\ncommit_interval = 3\n\n[ingestion]\nknowledge_base = \"docs\"\n",
    )
    .unwrap();

    env::set_var("KBINDEX_CONFIG", &path);
    env::set_var("KBINDEX_BATCH_SIZE", "11");
    env::set_var("KBINDEX_API_TOKEN", "secret");

    let xdg = xdg_in(&temp);
    let config = Config::load_with_xdg(&xdg).unwrap();
    clear_env();

    assert_eq!(config.expansion.batch_size, 11);
    assert_eq!(config.expansion.commit_interval, 3);
    assert_eq!(config.expansion.seed_limit, 100);
    assert_eq!(config.ingestion.knowledge_base, "docs");
    assert_eq!(config.ingestion.api_token.as_deref(), Some("secret"));
    assert_eq!(config.storage.state_dir, xdg.projects_dir());
}

#[test]
#[serial]
fn test_zero_batch_size_rejected() {
    clear_env();
    env::set_var("KBINDEX_BATCH_SIZE", "0");

    let temp = TempDir::new().unwrap();
    let xdg = xdg_in(&temp);
    let result = Config::load_with_xdg(&xdg);
    clear_env();

    assert!(matches!(result, Err(IndexerError::ConfigError(_))));
}

#[test]
fn test_token_never_serialized() {
    let mut config = Config::default();
    config.ingestion.api_token = Some("secret".to_string());

    let toml = toml::to_string(&config).unwrap();
    assert!(!toml.contains("secret"));
}
