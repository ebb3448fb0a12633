//! Lifecycle observers.
//!
//! A `Fetcher` reports every state change it applies to an injected
//! `LifecycleObserver` instead of writing to the console. The default
//! `TracingObserver` turns transitions into structured `tracing` events;
//! `RecordingObserver` keeps them in memory for assertions.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::http::HttpMethod;
use crate::state::{RequestState, Status};
use crate::types::ActivationId;

/// A state change applied to a fetcher.
#[derive(Debug, Clone, Copy)]
pub struct Transition<'a> {
    pub activation: ActivationId,
    pub method: HttpMethod,
    pub url: &'a str,
    pub state: &'a RequestState,
}

pub trait LifecycleObserver: Send + Sync {
    fn on_transition(&self, transition: &Transition<'_>);
}

/// Emits one `tracing` event per transition.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl LifecycleObserver for TracingObserver {
    fn on_transition(&self, transition: &Transition<'_>) {
        let Transition {
            activation,
            method,
            url,
            state,
        } = *transition;
        match state {
            RequestState::Idle => {}
            RequestState::Loading => {
                tracing::debug!(activation = %activation, method = %method, url, "Request started");
            }
            RequestState::Success(data) => {
                tracing::info!(
                    activation = %activation,
                    method = %method,
                    url,
                    items = data.as_array().map(Vec::len),
                    "Request succeeded"
                );
            }
            RequestState::Error(err) => {
                tracing::warn!(
                    activation = %activation,
                    method = %method,
                    url,
                    kind = ?err.kind(),
                    error = %err,
                    "Request failed"
                );
            }
        }
    }
}

/// An owned copy of a `Transition`, as kept by `RecordingObserver`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedTransition {
    pub activation: ActivationId,
    pub method: HttpMethod,
    pub url: String,
    pub state: RequestState,
}

/// Keeps every transition it sees. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    log: Arc<Mutex<Vec<RecordedTransition>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transitions(&self) -> Vec<RecordedTransition> {
        self.log.lock().clone()
    }

    pub fn statuses(&self) -> Vec<Status> {
        self.log.lock().iter().map(|t| t.state.status()).collect()
    }
}

impl LifecycleObserver for RecordingObserver {
    fn on_transition(&self, transition: &Transition<'_>) {
        self.log.lock().push(RecordedTransition {
            activation: transition.activation,
            method: transition.method,
            url: transition.url.to_string(),
            state: transition.state.clone(),
        });
    }
}
