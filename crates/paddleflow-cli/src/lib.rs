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
#![allow(clippy::redundant_pub_crate)]

//! Command-line client for a paddleflow service.
//!
//! Layout:
//! - `cli.rs`: argument parsing, session bootstrap, and command dispatch
//! - `commands/`: command handlers, one module per subcommand group
//! - `client.rs`: client seam, HTTP implementation, session context, errors
//! - `output.rs`: renderers and formatting helpers
//! - `main.rs`: thin entrypoint delegating to `run()`

pub(crate) mod cli;
pub(crate) mod client;
pub(crate) mod commands;
pub(crate) mod output;

#[cfg(test)]
pub(crate) mod test_support;

pub use cli::{run, run_from};
