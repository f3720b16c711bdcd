//! Resource operations shared by the subcommand groups.

use anyhow::anyhow;
use clap::Args;
use paddleflow_api_models::ResourcePage;
use tracing::debug;

use crate::client::{CliError, CliResult, SessionContext};
use crate::output::{Column, render_ack, render_detail, render_page};

/// Static description of one REST resource collection.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResourceKind {
    /// Singular noun used in messages.
    pub(crate) noun: &'static str,
    pub(crate) path: &'static str,
    /// Field of the listing response holding the entries.
    pub(crate) list_field: &'static str,
    pub(crate) columns: &'static [Column],
}

#[derive(Args, Debug, Clone, Default)]
pub(crate) struct ListArgs {
    /// Maximum number of entries to return.
    #[arg(long)]
    pub(crate) maxkeys: Option<u32>,
    /// Continue a previous listing from this marker.
    #[arg(long)]
    pub(crate) marker: Option<String>,
}

impl ListArgs {
    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(max_keys) = self.maxkeys {
            query.push(("maxKeys", max_keys.to_string()));
        }
        if let Some(marker) = self.marker.as_deref().filter(|marker| !marker.is_empty()) {
            query.push(("marker", marker.to_string()));
        }
        query
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct TargetArg {
    /// Resource identifier.
    pub(crate) id: String,
}

impl ResourceKind {
    /// Path of a single resource below this collection.
    pub(crate) fn item_path(&self, id: &str) -> CliResult<String> {
        let id = id.trim();
        if id.is_empty() {
            return Err(CliError::validation(format!(
                "{} identifier must not be empty",
                self.noun
            )));
        }
        if id.contains('/') {
            return Err(CliError::validation(format!(
                "{} identifier '{id}' must not contain '/'",
                self.noun
            )));
        }
        if id == "." || id == ".." {
            return Err(CliError::validation(format!(
                "{} identifier '{id}' is not a valid name",
                self.noun
            )));
        }
        Ok(format!("{}/{id}", self.path))
    }
}

pub(crate) async fn list_resources(
    session: &SessionContext,
    kind: &ResourceKind,
    args: &ListArgs,
    filters: Vec<(&'static str, String)>,
) -> CliResult<()> {
    let mut query = args.query();
    query.extend(filters);
    debug!(resource = kind.noun, params = query.len(), "listing resources");

    let body = session.client.get(kind.path, &query).await?;
    let page = ResourcePage::from_value(&body, kind.list_field).ok_or_else(|| {
        CliError::failure(anyhow!(
            "unexpected {} listing: '{}' is not a list",
            kind.noun,
            kind.list_field
        ))
    })?;
    render_page(&page, &body, kind.columns, session.output)
}

pub(crate) async fn show_resource(
    session: &SessionContext,
    kind: &ResourceKind,
    target: &TargetArg,
) -> CliResult<()> {
    let path = kind.item_path(&target.id)?;
    let detail = session.client.get(&path, &[]).await?;
    render_detail(&detail, session.output)
}

pub(crate) async fn delete_resource(
    session: &SessionContext,
    kind: &ResourceKind,
    target: &TargetArg,
) -> CliResult<()> {
    let path = kind.item_path(&target.id)?;
    session.client.delete(&path).await?;
    render_ack(&format!("{} {} deleted", kind.noun, target.id.trim()));
    Ok(())
}
