//! Account management. Only the root user may add or delete accounts.

use std::io::{self, IsTerminal};

use anyhow::anyhow;
use clap::{Args, Subcommand};
use paddleflow_api_models::{PasswordUpdateRequest, UserCreateRequest};
use serde::Serialize;
use serde_json::Value;

use crate::client::{CliError, CliResult, SessionContext};
use crate::commands::resource::{ListArgs, ResourceKind, TargetArg, delete_resource, list_resources};
use crate::output::{Column, render_ack};

pub(crate) const USERS: ResourceKind = ResourceKind {
    noun: "user",
    path: "/user",
    list_field: "userList",
    columns: &[Column::new("NAME", "name"), Column::new("CREATED", "createTime")],
};

#[derive(Subcommand, Debug)]
pub(crate) enum UserCommand {
    /// List users.
    List(ListArgs),
    /// Create a user.
    Add(UserPasswordArgs),
    /// Delete a user.
    Delete(TargetArg),
    /// Change a user's password.
    SetPassword(UserPasswordArgs),
}

#[derive(Args, Debug, Clone)]
pub(crate) struct UserPasswordArgs {
    /// Account name.
    pub(crate) name: String,
    /// Password; prompted for when omitted on a terminal.
    #[arg(long)]
    pub(crate) password: Option<String>,
}

impl UserCommand {
    pub(crate) const fn label(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Add(_) => "add",
            Self::Delete(_) => "delete",
            Self::SetPassword(_) => "set_password",
        }
    }
}

pub(crate) async fn handle(session: &SessionContext, command: UserCommand) -> CliResult<()> {
    match command {
        UserCommand::List(args) => list_resources(session, &USERS, &args, Vec::new()).await,
        UserCommand::Add(args) => handle_add(session, args).await,
        UserCommand::Delete(target) => delete_resource(session, &USERS, &target).await,
        UserCommand::SetPassword(args) => handle_set_password(session, args).await,
    }
}

async fn handle_add(session: &SessionContext, args: UserPasswordArgs) -> CliResult<()> {
    let name = require_name(&args.name)?;
    let password = resolve_password(args.password)?;
    let body = encode(&UserCreateRequest {
        username: name.to_string(),
        password,
    })?;
    session.client.post(USERS.path, &body).await?;
    render_ack(&format!("user {name} created"));
    Ok(())
}

async fn handle_set_password(session: &SessionContext, args: UserPasswordArgs) -> CliResult<()> {
    let path = USERS.item_path(&args.name)?;
    let password = resolve_password(args.password)?;
    let body = encode(&PasswordUpdateRequest { password })?;
    session.client.put(&path, &[], Some(&body)).await?;
    render_ack(&format!("password of user {} updated", args.name.trim()));
    Ok(())
}

fn require_name(name: &str) -> CliResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::validation("user name must not be empty"));
    }
    Ok(name)
}

fn resolve_password(flag: Option<String>) -> CliResult<String> {
    let password = match flag {
        Some(password) => password,
        None if io::stdin().is_terminal() => rpassword::prompt_password("password: ")
            .map_err(|err| CliError::failure(anyhow!("failed to read password: {err}")))?,
        None => {
            return Err(CliError::validation(
                "password is required (pass --password or run from a terminal)",
            ));
        }
    };
    if password.is_empty() {
        return Err(CliError::validation("password must not be empty"));
    }
    Ok(password)
}

fn encode<T: Serialize>(request: &T) -> CliResult<Value> {
    serde_json::to_value(request)
        .map_err(|err| CliError::failure(anyhow!("failed to encode request: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use crate::test_support::session_for;
    use anyhow::Result;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn empty_password_flag_is_rejected() {
        let err = resolve_password(Some(String::new())).err();
        assert!(matches!(err, Some(CliError::Validation(_))));
    }

    #[tokio::test]
    async fn add_posts_new_account() -> Result<()> {
        let server = MockServer::start_async().await;
        let create = server.mock(|when, then| {
            when.method(POST)
                .path("/api/paddleflow/v1/user")
                .json_body(json!({"username": "alice", "password": "s3cret"}));
            then.status(200);
        });
        let session = session_for(&server, OutputFormat::Table).await?;

        handle(
            &session,
            UserCommand::Add(UserPasswordArgs {
                name: "alice".to_string(),
                password: Some("s3cret".to_string()),
            }),
        )
        .await?;
        create.assert();
        Ok(())
    }

    #[tokio::test]
    async fn set_password_updates_named_user() -> Result<()> {
        let server = MockServer::start_async().await;
        let update = server.mock(|when, then| {
            when.method(PUT)
                .path("/api/paddleflow/v1/user/alice")
                .json_body(json!({"password": "n3w"}));
            then.status(200);
        });
        let session = session_for(&server, OutputFormat::Table).await?;

        handle(
            &session,
            UserCommand::SetPassword(UserPasswordArgs {
                name: "alice".to_string(),
                password: Some("n3w".to_string()),
            }),
        )
        .await?;
        update.assert();
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_user_is_a_validation_error() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/paddleflow/v1/user");
            then.status(409).json_body(json!({
                "code": "DuplicatedName",
                "message": "user alice already exists"
            }));
        });
        let session = session_for(&server, OutputFormat::Table).await?;

        let err = handle(
            &session,
            UserCommand::Add(UserPasswordArgs {
                name: "alice".to_string(),
                password: Some("pw".to_string()),
            }),
        )
        .await
        .err();
        assert_eq!(
            err.map(|err| err.display_message()),
            Some("user alice already exists (code DuplicatedName, status 409)".to_string())
        );
        Ok(())
    }
}
