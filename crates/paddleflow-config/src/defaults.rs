//! Well-known names and defaults for the client configuration file.

/// Port used when `server.paddleflow_port` is not configured.
pub const DEFAULT_PADDLEFLOW_PORT: u16 = 8080;

/// Directory under `$HOME` holding the client configuration.
pub const CONFIG_DIR_NAME: &str = ".paddleflow";
/// File name of the client configuration inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config";

/// Section carrying the login credentials.
pub const USER_SECTION: &str = "user";
/// Section carrying the server address.
pub const SERVER_SECTION: &str = "server";

/// Login name key under [`USER_SECTION`].
pub const USER_NAME_KEY: &str = "name";
/// Login password key under [`USER_SECTION`].
pub const USER_PASSWORD_KEY: &str = "password";
/// Server host (or URL) key under [`SERVER_SECTION`].
pub const SERVER_HOST_KEY: &str = "paddleflow_server";
/// Optional server port key under [`SERVER_SECTION`].
pub const SERVER_PORT_KEY: &str = "paddleflow_port";
