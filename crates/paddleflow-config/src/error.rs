//! Error types for configuration loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while resolving, reading, or validating the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No explicit path was given and `HOME` is not set.
    #[error("cannot resolve config path: HOME is not set and --pf_config was not given")]
    HomeUnset,
    /// The config file could not be read.
    #[error("no config file in {}", path.display())]
    Unreadable {
        /// Resolved config path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The config file is not valid INI.
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        /// Resolved config path.
        path: PathBuf,
        /// Underlying INI parse error.
        #[source]
        source: ini::ParseError,
    },
    /// A required section is absent.
    #[error("no {section} conf in {}", path.display())]
    MissingSection {
        /// Name of the missing section.
        section: &'static str,
        /// Resolved config path.
        path: PathBuf,
    },
    /// A required key is absent or blank.
    #[error("no {key} conf['{section}'] in {}", path.display())]
    MissingKey {
        /// Section expected to hold the key.
        section: &'static str,
        /// Name of the missing key.
        key: &'static str,
        /// Resolved config path.
        path: PathBuf,
    },
    /// A section header appears more than once.
    #[error("duplicate {section} conf in {}", path.display())]
    DuplicateSection {
        /// Name of the repeated section.
        section: &'static str,
        /// Resolved config path.
        path: PathBuf,
    },
    /// A key is set more than once in a section, in any letter case.
    #[error("duplicate {key} conf['{section}'] in {}", path.display())]
    DuplicateKey {
        /// Section holding the repeated key.
        section: &'static str,
        /// Name of the repeated key.
        key: &'static str,
        /// Resolved config path.
        path: PathBuf,
    },
    /// A key holds a value that cannot be used.
    #[error("invalid {key} '{value}' in {}: {reason}", path.display())]
    InvalidValue {
        /// Offending key.
        key: &'static str,
        /// Raw value found in the file.
        value: String,
        /// Resolved config path.
        path: PathBuf,
        /// Human-readable reason for the rejection.
        reason: String,
    },
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
