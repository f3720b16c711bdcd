#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Client configuration for the paddleflow CLI.
//!
//! Layout: `model.rs` (typed config), `loader.rs` (path resolution and INI
//! loading), `validate.rs` (section/key lookups and value parsing),
//! `defaults.rs` (well-known names and the default port).

pub mod defaults;
pub mod error;
pub mod loader;
pub mod model;
pub mod validate;

pub use defaults::DEFAULT_PADDLEFLOW_PORT;
pub use error::{ConfigError, ConfigResult};
pub use loader::{default_config_path, load_config, parse_config, resolve_config_path};
pub use model::{ClientConfig, Credentials, ServerEndpoint};
