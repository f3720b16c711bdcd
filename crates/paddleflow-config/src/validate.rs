//! Section and key lookups plus value parsing for the config file.

use std::path::Path;

use ini::{Ini, Properties};

use crate::error::{ConfigError, ConfigResult};

/// Fetch a named section, failing with a section-specific error.
///
/// # Errors
///
/// Returns [`ConfigError::MissingSection`] when the section is absent and
/// [`ConfigError::DuplicateSection`] when its header appears more than once.
pub fn require_section<'a>(
    ini: &'a Ini,
    section: &'static str,
    path: &Path,
) -> ConfigResult<&'a Properties> {
    let mut matches = ini.section_all(Some(section));
    let first = matches.next().ok_or_else(|| ConfigError::MissingSection {
        section,
        path: path.to_path_buf(),
    })?;
    if matches.next().is_some() {
        return Err(ConfigError::DuplicateSection {
            section,
            path: path.to_path_buf(),
        });
    }
    Ok(first)
}

/// Look up a key ignoring ASCII case. Values come back trimmed, and blank
/// values read as absent.
///
/// # Errors
///
/// Returns [`ConfigError::DuplicateKey`] when more than one spelling of the
/// key is present in the section.
pub fn lookup<'a>(
    properties: &'a Properties,
    section: &'static str,
    key: &'static str,
    path: &Path,
) -> ConfigResult<Option<&'a str>> {
    let mut matches = properties
        .iter()
        .filter(|(candidate, _)| candidate.trim().eq_ignore_ascii_case(key))
        .map(|(_, value)| value.trim());
    let value = matches.next();
    if matches.next().is_some() {
        return Err(ConfigError::DuplicateKey {
            section,
            key,
            path: path.to_path_buf(),
        });
    }
    Ok(value.filter(|value| !value.is_empty()))
}

/// Fetch a required key from a section.
///
/// # Errors
///
/// Returns [`ConfigError::MissingKey`] when the key is absent or blank, and
/// [`ConfigError::DuplicateKey`] when it is set more than once.
pub fn require_key(
    properties: &Properties,
    section: &'static str,
    key: &'static str,
    path: &Path,
) -> ConfigResult<String> {
    lookup(properties, section, key, path)?
        .map(str::to_string)
        .ok_or_else(|| ConfigError::MissingKey {
            section,
            key,
            path: path.to_path_buf(),
        })
}

/// Parse a TCP port value.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] when the value is not an integer in
/// `1..=65535`.
pub fn parse_port(value: &str, key: &'static str, path: &Path) -> ConfigResult<u16> {
    match value.trim().parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            path: path.to_path_buf(),
            reason: "must be an integer between 1 and 65535".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Ini {
        let mut ini = Ini::new();
        ini.with_section(Some("user"))
            .set("Name", "root")
            .set("password", "   ");
        ini
    }

    #[test]
    fn lookup_ignores_key_case() -> ConfigResult<()> {
        let ini = sample();
        let Some(user) = ini.section(Some("user")) else {
            panic!("user section present");
        };
        assert_eq!(lookup(user, "user", "name", Path::new("config"))?, Some("root"));
        Ok(())
    }

    #[test]
    fn repeated_key_in_any_case_is_rejected() {
        let mut user = Properties::new();
        user.append("name", "a");
        user.append("NAME", "b");
        let err = require_key(&user, "user", "name", Path::new("config"));
        assert!(matches!(
            err,
            Err(ConfigError::DuplicateKey {
                section: "user",
                key: "name",
                ..
            })
        ));
    }

    #[test]
    fn blank_values_read_as_missing() {
        let ini = sample();
        let path = Path::new("config");
        let Some(user) = ini.section(Some("user")) else {
            panic!("user section present");
        };
        let err = require_key(user, "user", "password", path);
        assert!(matches!(
            err,
            Err(ConfigError::MissingKey {
                key: "password",
                ..
            })
        ));
    }

    #[test]
    fn missing_section_is_reported_by_name() {
        let ini = sample();
        let err = require_section(&ini, "server", Path::new("config"));
        assert!(matches!(
            err,
            Err(ConfigError::MissingSection {
                section: "server",
                ..
            })
        ));
    }

    #[test]
    fn parse_port_bounds() {
        let path = Path::new("config");
        assert_eq!(parse_port(" 8999 ", "paddleflow_port", path).ok(), Some(8999));
        assert!(parse_port("0", "paddleflow_port", path).is_err());
        assert!(parse_port("65536", "paddleflow_port", path).is_err());
        assert!(parse_port("eighty", "paddleflow_port", path).is_err());
    }
}
