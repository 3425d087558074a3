//! Integration tests for the configuration module

use std::env;
use std::fs;

use serial_test::serial;
use tempfile::TempDir;

use ontoctl::Config;

#[test]
fn test_config_full_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("test_config.yaml");

    let original_config = Config {
        endpoint: "http://agent.lab:5009".to_string(),
        timeout_seconds: 10,
        default_speaker: Some("@TEST.HUMAN.1".to_string()),
    };

    original_config.save_to_file(&config_path)?;

    assert!(config_path.exists());
    let file_content = fs::read_to_string(&config_path)?;
    assert!(file_content.contains("http://agent.lab:5009"));
    assert!(file_content.contains("@TEST.HUMAN.1"));

    let loaded_config = Config::load_from_file(&config_path)?;
    assert_eq!(loaded_config, original_config);

    Ok(())
}

#[test]
#[serial]
fn test_save_and_load_through_home() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let original_home = env::var("HOME").ok();
    env::set_var("HOME", temp_dir.path());
    env::remove_var("ONTOCTL_ENDPOINT");

    let config = Config {
        endpoint: "http://agent.lab:5009".to_string(),
        timeout_seconds: 45,
        default_speaker: None,
    };
    config.save()?;

    assert!(temp_dir.path().join(".ontoctl/config.yaml").exists());

    let loaded = Config::load_or_default()?;
    assert_eq!(loaded, config);

    match original_home {
        Some(home) => env::set_var("HOME", home),
        None => env::remove_var("HOME"),
    }
    Ok(())
}

#[test]
#[serial]
fn test_env_endpoint_beats_saved_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let original_home = env::var("HOME").ok();
    env::set_var("HOME", temp_dir.path());

    let config = Config {
        endpoint: "http://from-file:5009".to_string(),
        ..Config::default()
    };
    config.save()?;

    env::set_var("ONTOCTL_ENDPOINT", "http://from-env:5009");
    let loaded = Config::load_or_default()?;
    assert_eq!(loaded.endpoint, "http://from-env:5009");

    // Everything else still comes from the file.
    assert_eq!(loaded.timeout_seconds, config.timeout_seconds);

    env::remove_var("ONTOCTL_ENDPOINT");
    match original_home {
        Some(home) => env::set_var("HOME", home),
        None => env::remove_var("HOME"),
    }
    Ok(())
}

#[test]
#[serial]
fn test_malformed_config_falls_back_to_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let original_home = env::var("HOME").ok();
    env::set_var("HOME", temp_dir.path());
    env::remove_var("ONTOCTL_ENDPOINT");

    let config_dir = temp_dir.path().join(".ontoctl");
    fs::create_dir_all(&config_dir)?;
    fs::write(config_dir.join("config.yaml"), "endpoint: [broken")?;

    let loaded = Config::load_or_default()?;
    assert_eq!(loaded, Config::default());

    match original_home {
        Some(home) => env::set_var("HOME", home),
        None => env::remove_var("HOME"),
    }
    Ok(())
}
