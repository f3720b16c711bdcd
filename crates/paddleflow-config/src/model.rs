//! Typed view of the client configuration file.

use std::fmt::{self, Debug, Formatter};

use url::Url;

/// Login credentials from the `[user]` section.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account name.
    pub name: String,
    /// Account password.
    pub password: String,
}

impl Debug for Credentials {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Address of the paddleflow server from the `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEndpoint {
    /// Host (or URL) exactly as configured.
    pub host: String,
    /// Effective port, defaulted when not configured.
    pub port: u16,
    /// Base URL every API path is joined onto.
    pub base_url: Url,
}

impl ServerEndpoint {
    /// Build an endpoint from a configured host and effective port.
    ///
    /// A bare host is reached over plain HTTP; a value that already carries a
    /// scheme keeps it. The port always overrides whatever the host names.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem when the host does not form a
    /// valid URL.
    pub fn new(host: &str, port: u16) -> Result<Self, String> {
        let host = host.trim().trim_end_matches('/');
        if host.is_empty() {
            return Err("server address cannot be empty".to_string());
        }

        let mut base_url = if host.contains("://") {
            host.parse::<Url>().map_err(|err| err.to_string())?
        } else {
            format!("http://{host}")
                .parse::<Url>()
                .map_err(|err| err.to_string())?
        };
        if base_url.cannot_be_a_base() || base_url.host_str().is_none() {
            return Err("server address must name a host".to_string());
        }
        base_url
            .set_port(Some(port))
            .map_err(|()| "server address does not accept a port".to_string())?;

        Ok(Self {
            host: host.to_string(),
            port,
            base_url,
        })
    }
}

/// Fully validated client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Credentials used for the login call.
    pub credentials: Credentials,
    /// Server the client is bound to.
    pub server: ServerEndpoint,
}
