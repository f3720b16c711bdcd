use std::fs;
use std::path::PathBuf;

use paddleflow_config::{
    ConfigError, DEFAULT_PADDLEFLOW_PORT, load_config, resolve_config_path,
};
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> anyhow::Result<PathBuf> {
    let path = dir.path().join("config");
    fs::write(&path, contents)?;
    Ok(path)
}

#[test]
fn missing_file_reports_resolved_path() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = resolve_config_path(None, Some(dir.path()))?;
    let err = load_config(&path).err().ok_or_else(|| anyhow::anyhow!("expected error"))?;

    assert!(matches!(err, ConfigError::Unreadable { .. }));
    assert!(err.to_string().contains(&path.display().to_string()));
    assert!(err.to_string().contains(".paddleflow/config"));
    Ok(())
}

#[test]
fn missing_sections_are_named() -> anyhow::Result<()> {
    let dir = TempDir::new()?;

    let no_user = write_config(&dir, "[server]\npaddleflow_server = 127.0.0.1\n")?;
    let err = load_config(&no_user).err().ok_or_else(|| anyhow::anyhow!("expected error"))?;
    assert_eq!(
        err.to_string(),
        format!("no user conf in {}", no_user.display())
    );

    let no_server = write_config(&dir, "[user]\nname = root\npassword = pw\n")?;
    let err = load_config(&no_server).err().ok_or_else(|| anyhow::anyhow!("expected error"))?;
    assert_eq!(
        err.to_string(),
        format!("no server conf in {}", no_server.display())
    );
    Ok(())
}

#[test]
fn missing_user_keys_are_named() -> anyhow::Result<()> {
    let dir = TempDir::new()?;

    let no_name = write_config(
        &dir,
        "[user]\npassword = pw\n[server]\npaddleflow_server = 127.0.0.1\n",
    )?;
    let message = load_config(&no_name)
        .err()
        .map(|err| err.to_string())
        .unwrap_or_default();
    assert!(message.starts_with("no name conf['user']"), "{message}");

    let no_password = write_config(
        &dir,
        "[user]\nname = root\n[server]\npaddleflow_server = 127.0.0.1\n",
    )?;
    let message = load_config(&no_password)
        .err()
        .map(|err| err.to_string())
        .unwrap_or_default();
    assert!(message.starts_with("no password conf['user']"), "{message}");
    Ok(())
}

#[test]
fn missing_server_address_is_named() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = write_config(
        &dir,
        "[user]\nname = root\npassword = pw\n[server]\npaddleflow_port = 8999\n",
    )?;
    let err = load_config(&path).err().ok_or_else(|| anyhow::anyhow!("expected error"))?;
    assert!(matches!(
        err,
        ConfigError::MissingKey {
            section: "server",
            key: "paddleflow_server",
            ..
        }
    ));
    Ok(())
}

#[test]
fn default_port_applies_when_absent() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = write_config(
        &dir,
        "[user]\nname = root\npassword = pw\n[server]\npaddleflow_server = 127.0.0.1\n",
    )?;
    let config = load_config(&path)?;
    assert_eq!(config.server.port, DEFAULT_PADDLEFLOW_PORT);
    assert_eq!(config.server.port, 8080);
    Ok(())
}

#[test]
fn key_names_match_case_insensitively() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = write_config(
        &dir,
        "[user]\nNAME = root\nPassword = pw\n[server]\nPaddleFlow_Server = pf.local\nPADDLEFLOW_PORT = 9000\n",
    )?;
    let config = load_config(&path)?;
    assert_eq!(config.credentials.name, "root");
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.base_url.as_str(), "http://pf.local:9000/");
    Ok(())
}

#[test]
fn invalid_port_is_rejected() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = write_config(
        &dir,
        "[user]\nname = root\npassword = pw\n[server]\npaddleflow_server = pf.local\npaddleflow_port = 80a\n",
    )?;
    let err = load_config(&path).err().ok_or_else(|| anyhow::anyhow!("expected error"))?;
    assert!(err.to_string().contains("paddleflow_port"));
    Ok(())
}

#[test]
fn malformed_ini_is_a_parse_error_naming_the_path() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = write_config(&dir, "[user\nname = root\n")?;
    let err = load_config(&path).err().ok_or_else(|| anyhow::anyhow!("expected error"))?;

    assert!(matches!(err, ConfigError::Parse { .. }), "{err:?}");
    assert!(err.to_string().starts_with(&format!(
        "failed to parse config file {}",
        path.display()
    )));
    Ok(())
}

#[test]
fn repeated_keys_and_sections_are_rejected() -> anyhow::Result<()> {
    let dir = TempDir::new()?;

    let repeated_key = write_config(
        &dir,
        "[user]\nname = a\nNAME = b\npassword = pw\n[server]\npaddleflow_server = 127.0.0.1\n",
    )?;
    let err = load_config(&repeated_key).err().ok_or_else(|| anyhow::anyhow!("expected error"))?;
    assert_eq!(
        err.to_string(),
        format!("duplicate name conf['user'] in {}", repeated_key.display())
    );

    let repeated_port = write_config(
        &dir,
        "[user]\nname = a\npassword = pw\n[server]\npaddleflow_server = 127.0.0.1\npaddleflow_port = 8999\npaddleflow_port = 9000\n",
    )?;
    let err = load_config(&repeated_port).err().ok_or_else(|| anyhow::anyhow!("expected error"))?;
    assert!(matches!(
        err,
        ConfigError::DuplicateKey {
            key: "paddleflow_port",
            ..
        }
    ));

    let repeated_section = write_config(
        &dir,
        "[user]\nname = a\npassword = pw\n[user]\nname = b\n[server]\npaddleflow_server = 127.0.0.1\n",
    )?;
    let err = load_config(&repeated_section).err().ok_or_else(|| anyhow::anyhow!("expected error"))?;
    assert!(matches!(
        err,
        ConfigError::DuplicateSection { section: "user", .. }
    ));
    Ok(())
}
