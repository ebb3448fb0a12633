//! The three placeholder API examples.
//!
//! Each run owns a fresh `Fetcher`, activates it once, prints the Loading
//! render straight away and the terminal render once it settles, then tears
//! the fetcher down. Users show the first user, todos the whole list, and a
//! created post is announced before its payload.

use std::io::Write;

use fetch_core::{FetchError, Fetcher, NewPost, PlaceholderApi, RequestDescriptor, RequestState, Transport};

use crate::render::{render, View};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Example {
    Users,
    Todos,
    CreatePost,
}

impl Example {
    pub fn title(&self) -> &'static str {
        match self {
            Example::Users => "Users",
            Example::Todos => "Todos",
            Example::CreatePost => "Create post",
        }
    }

    pub fn view(&self) -> View {
        match self {
            Example::Users => View::FirstItem,
            Example::Todos | Example::CreatePost => View::Whole,
        }
    }

    /// Printed above a successful payload.
    pub fn success_banner(&self) -> Option<&'static str> {
        match self {
            Example::CreatePost => Some("Data sent successfully:"),
            Example::Users | Example::Todos => None,
        }
    }

    pub fn descriptor(&self, api: &PlaceholderApi) -> Result<RequestDescriptor, FetchError> {
        match self {
            Example::Users => Ok(api.list_users()),
            Example::Todos => Ok(api.list_todos()),
            Example::CreatePost => api.create_post(&NewPost::sample()),
        }
    }
}

pub async fn run_example<T: Transport + 'static>(
    example: Example,
    api: &PlaceholderApi,
    fetcher: Fetcher<T>,
    out: &mut impl Write,
) -> anyhow::Result<RequestState> {
    writeln!(out, "== {}", example.title())?;

    fetcher.activate(example.descriptor(api)?)?;
    writeln!(out, "{}", render(&fetcher.state(), example.view()))?;

    let state = fetcher.settled().await;
    match (&state, example.success_banner()) {
        (RequestState::Success(_), Some(banner)) => writeln!(out, "{banner}")?,
        (RequestState::Error(err), _) => {
            tracing::warn!(example = example.title(), recoverable = err.is_recoverable(), "Example failed");
        }
        _ => {}
    }
    writeln!(out, "{}", render(&state, example.view()))?;
    if let Some(err) = state.error() {
        writeln!(out, "{}", retry_hint(err))?;
    }

    fetcher.teardown();
    Ok(state)
}

fn retry_hint(err: &FetchError) -> &'static str {
    if err.is_recoverable() {
        "Run the example again to retry."
    } else {
        "Retrying will not help until the request is fixed."
    }
}
