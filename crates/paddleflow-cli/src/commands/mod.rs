//! Command handlers, one module per subcommand group.

pub(crate) mod cluster;
pub(crate) mod flavour;
pub(crate) mod fs;
pub(crate) mod log;
pub(crate) mod pipeline;
pub(crate) mod queue;
pub(crate) mod resource;
pub(crate) mod run;
pub(crate) mod user;
