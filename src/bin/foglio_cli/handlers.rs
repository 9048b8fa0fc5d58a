#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use foglio::application::collection::{CollectionClient, CollectionError};
use foglio::application::list_sync::{ListSync, Phase};
use foglio::application::session::{AdminSession, ListSession, Notice};
use foglio::config::SettingsError;
use foglio::domain::posts::Post;
use foglio::infra::error::InfraError;

use crate::args::PostsCmd;
use crate::io;
use crate::print::print_json;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Collection(#[from] CollectionError),
    #[error("failed to read input file {path}: {source}")]
    InputFile {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to read confirmation: {0}")]
    Prompt(std::io::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    Sync(String),
}

/// JSON view of a session: the state the browser surface would render.
#[derive(Serialize)]
struct SessionOutput<'a> {
    status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<&'a str>,
    current_page: u32,
    last_page: u32,
    posts: &'a [Post],
}

fn snapshot<'a>(list: &'a ListSync, notice: Option<&'a Notice>) -> SessionOutput<'a> {
    let (status, error) = match list.phase() {
        Phase::Idle => ("idle", None),
        Phase::Loading => ("loading", None),
        Phase::Ready => ("ready", None),
        Phase::Error(message) => ("error", Some(message.as_str())),
    };
    SessionOutput {
        status,
        error,
        notice: notice.map(Notice::message),
        current_page: list.window().current_page,
        last_page: list.window().last_page,
        posts: list.posts(),
    }
}

/// Fail the process when a fetch left the list in the error phase.
fn check_list(list: &ListSync) -> Result<(), CliError> {
    match list.phase() {
        Phase::Error(message) => Err(CliError::Sync(message.clone())),
        _ => Ok(()),
    }
}

pub async fn posts(client: Arc<dyn CollectionClient>, cmd: PostsCmd) -> Result<(), CliError> {
    match cmd {
        PostsCmd::List { page, search } => list(client, page, search).await,
        PostsCmd::Create {
            title,
            content,
            content_file,
            slug,
            published_at,
        } => {
            save(
                client,
                None,
                DraftInput {
                    title,
                    content,
                    content_file,
                    slug,
                    published_at,
                },
            )
            .await
        }
        PostsCmd::Update {
            id,
            title,
            content,
            content_file,
            slug,
            published_at,
        } => {
            save(
                client,
                Some(id),
                DraftInput {
                    title,
                    content,
                    content_file,
                    slug,
                    published_at,
                },
            )
            .await
        }
        PostsCmd::Delete {
            id,
            yes,
            page,
            search,
        } => delete(client, id, yes, page, search).await,
    }
}

async fn list(
    client: Arc<dyn CollectionClient>,
    page: u32,
    search: Option<String>,
) -> Result<(), CliError> {
    let mut session = ListSession::with_query(client, page, search.unwrap_or_default());
    session.load().await;
    print_json(&snapshot(session.list(), None))?;
    check_list(session.list())
}

struct DraftInput {
    title: String,
    content: Option<String>,
    content_file: Option<PathBuf>,
    slug: Option<String>,
    published_at: Option<String>,
}

async fn save(
    client: Arc<dyn CollectionClient>,
    id: Option<i64>,
    input: DraftInput,
) -> Result<(), CliError> {
    let content = io::read_value(input.content, input.content_file)?;

    let mut session = AdminSession::new(client);
    if let Some(id) = id {
        session.form_mut().bind(id);
    }
    {
        let draft = session.form_mut().draft_mut();
        draft.title = input.title;
        draft.content = content;
        draft.slug = input.slug.unwrap_or_default();
        draft.published_at = input.published_at.unwrap_or_default();
    }

    let saved = session.submit().await;
    print_json(&snapshot(session.list(), session.notice()))?;
    if saved {
        Ok(())
    } else {
        let message = session
            .notice()
            .map_or_else(|| "save failed".to_string(), |n| n.message().to_string());
        Err(CliError::Sync(message))
    }
}

async fn delete(
    client: Arc<dyn CollectionClient>,
    id: i64,
    yes: bool,
    page: u32,
    search: Option<String>,
) -> Result<(), CliError> {
    let mut session = AdminSession::with_query(client, page, search.unwrap_or_default());
    session.load().await;
    check_list(session.list())?;

    session.request_delete(id);
    if !yes && !io::confirm(&format!("delete post {id}?"))? {
        session.cancel_delete();
        println!("delete aborted");
        return Ok(());
    }

    let deleted = session.confirm_delete().await;
    print_json(&snapshot(session.list(), session.notice()))?;
    if deleted {
        check_list(session.list())
    } else {
        let message = session
            .notice()
            .map_or_else(|| "delete failed".to_string(), |n| n.message().to_string());
        Err(CliError::Sync(message))
    }
}
