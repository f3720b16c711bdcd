//! Config path resolution and INI loading.
//!
//! # Design
//! - The file is read once; nothing here writes it back.
//! - Values are taken verbatim: no quote stripping and no escape handling, so
//!   passwords containing `\` or `"` survive unchanged.

use std::fs;
use std::path::{Path, PathBuf};

use ini::{Ini, ParseOption};
use tracing::debug;

use crate::defaults::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_PADDLEFLOW_PORT, SERVER_HOST_KEY, SERVER_PORT_KEY,
    SERVER_SECTION, USER_NAME_KEY, USER_PASSWORD_KEY, USER_SECTION,
};
use crate::error::{ConfigError, ConfigResult};
use crate::model::{ClientConfig, Credentials, ServerEndpoint};
use crate::validate::{lookup, parse_port, require_key, require_section};

/// Default config location beneath a home directory.
#[must_use]
pub fn default_config_path(home: &Path) -> PathBuf {
    home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
}

/// Pick the config file to load: the explicit path when given, otherwise
/// `<home>/.paddleflow/config`.
///
/// # Errors
///
/// Returns [`ConfigError::HomeUnset`] when neither an explicit path nor a home
/// directory is available.
pub fn resolve_config_path(explicit: Option<&Path>, home: Option<&Path>) -> ConfigResult<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    home.map(default_config_path).ok_or(ConfigError::HomeUnset)
}

/// Read and validate the config file at `path`.
///
/// # Errors
///
/// Returns a [`ConfigError`] when the file cannot be read or parsed, when a
/// required section or key is missing, or when a value is invalid.
pub fn load_config(path: &Path) -> ConfigResult<ClientConfig> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&contents, path)?;
    debug!(
        path = %path.display(),
        server = %config.server.base_url,
        "loaded client configuration"
    );
    Ok(config)
}

/// Validate INI text as a client configuration. `path` is only used for
/// error messages.
///
/// # Errors
///
/// See [`load_config`].
pub fn parse_config(contents: &str, path: &Path) -> ConfigResult<ClientConfig> {
    let options = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    let ini = Ini::load_from_str_opt(contents, options).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let user = require_section(&ini, USER_SECTION, path)?;
    let server = require_section(&ini, SERVER_SECTION, path)?;

    let credentials = Credentials {
        name: require_key(user, USER_SECTION, USER_NAME_KEY, path)?,
        password: require_key(user, USER_SECTION, USER_PASSWORD_KEY, path)?,
    };

    let host = require_key(server, SERVER_SECTION, SERVER_HOST_KEY, path)?;
    let port = match lookup(server, SERVER_SECTION, SERVER_PORT_KEY, path)? {
        Some(raw) => parse_port(raw, SERVER_PORT_KEY, path)?,
        None => DEFAULT_PADDLEFLOW_PORT,
    };
    let server = ServerEndpoint::new(&host, port).map_err(|reason| ConfigError::InvalidValue {
        key: SERVER_HOST_KEY,
        value: host.clone(),
        path: path.to_path_buf(),
        reason,
    })?;

    Ok(ClientConfig {
        credentials,
        server,
    })
}
