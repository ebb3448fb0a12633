//! The request lifecycle driver.
//!
//! # Design
//! A `Fetcher` owns one `RequestState`. `activate` validates the descriptor,
//! moves the state to `Loading` before returning, and spawns a task that sends
//! the request through the `Transport` and applies the terminal state.
//!
//! Every activation gets a generation number. The spawned task applies its
//! result only if the fetcher has not been torn down and no newer activation
//! has started; both checks and the write happen under one lock, so a late
//! resolution can never overwrite a newer state or touch a dropped owner.
//! In-flight requests are never aborted, their results are just discarded.
//!
//! The observer is called after the lock is released, so it may call back
//! into the fetcher (for example to re-activate on `Error`).

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::watch;

use crate::config::{FetchConfig, StatusPolicy};
use crate::error::FetchError;
use crate::http::{HttpResponse, RequestDescriptor};
use crate::observer::{LifecycleObserver, TracingObserver, Transition};
use crate::state::RequestState;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::ActivationId;

/// Owns a `RequestState` and drives it through activations.
///
/// Dropping the fetcher (or calling `teardown`) detaches any in-flight
/// request: its result is discarded when it arrives.
pub struct Fetcher<T: Transport + 'static> {
    transport: Arc<T>,
    observer: Arc<dyn LifecycleObserver>,
    policy: StatusPolicy,
    shared: Arc<Shared>,
}

struct Shared {
    lifecycle: Mutex<Lifecycle>,
    state: watch::Sender<RequestState>,
}

#[derive(Default)]
struct Lifecycle {
    generation: u64,
    torn_down: bool,
}

/// What the spawned task needs to know about the activation it resolves.
struct Activation {
    id: ActivationId,
    generation: u64,
    descriptor: RequestDescriptor,
}

impl Fetcher<ReqwestTransport> {
    /// A fetcher on a reqwest transport configured from `config`.
    pub fn from_config(config: &FetchConfig) -> Result<Self, FetchError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(transport).with_status_policy(config.status_policy))
    }
}

impl<T: Transport + 'static> Fetcher<T> {
    pub fn new(transport: T) -> Self {
        let (state, _) = watch::channel(RequestState::Idle);
        Self {
            transport: Arc::new(transport),
            observer: Arc::new(TracingObserver),
            policy: StatusPolicy::default(),
            shared: Arc::new(Shared {
                lifecycle: Mutex::new(Lifecycle::default()),
                state,
            }),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn LifecycleObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_status_policy(mut self, policy: StatusPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> RequestState {
        self.shared.state.borrow().clone()
    }

    /// A receiver that sees every state this fetcher applies.
    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.shared.state.subscribe()
    }

    /// Wait until the state is no longer `Loading` and return it.
    ///
    /// Returns immediately when nothing is in flight, including `Idle`.
    pub async fn settled(&self) -> RequestState {
        let mut rx = self.subscribe();
        let settled = rx
            .wait_for(|state| !state.is_loading())
            .await
            .map(|state| state.clone());
        // The sender lives as long as `self`, so the channel cannot close here.
        settled.unwrap_or_else(|_| self.state())
    }

    /// Start one request/response cycle for `descriptor`.
    ///
    /// On return the state is `Loading`. A malformed descriptor, or a call
    /// from outside a Tokio runtime, fails with `FetchError::Configuration`
    /// and leaves the state untouched.
    #[tracing::instrument(skip(self, descriptor), fields(method = %descriptor.method(), url = %descriptor.url()))]
    pub fn activate(&self, descriptor: RequestDescriptor) -> Result<ActivationId, FetchError> {
        if let Err(err) = descriptor.validate() {
            tracing::warn!(error = %err, "Rejected request descriptor");
            return Err(err);
        }
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| {
            FetchError::Configuration("activate must be called from within a Tokio runtime".to_string())
        })?;

        let id = ActivationId::new();
        let generation = {
            let mut lifecycle = self.shared.lifecycle.lock();
            lifecycle.generation += 1;
            self.shared.state.send_replace(RequestState::Loading);
            lifecycle.generation
        };
        // Observers run outside the lock so they may re-activate.
        self.observer.on_transition(&Transition {
            activation: id,
            method: descriptor.method(),
            url: descriptor.url(),
            state: &RequestState::Loading,
        });

        let activation = Activation {
            id,
            generation,
            descriptor,
        };
        let transport = Arc::clone(&self.transport);
        let observer = Arc::clone(&self.observer);
        let shared = Arc::clone(&self.shared);
        let policy = self.policy;

        runtime.spawn(async move {
            let result = transport.send(&activation.descriptor).await;
            let state = RequestState::from(result.and_then(|response| decode(response, policy)));
            shared.resolve(&activation, state, observer.as_ref());
        });

        Ok(id)
    }

    /// Drop the fetcher; any in-flight resolution becomes a no-op.
    pub fn teardown(self) {
        tracing::debug!("Fetcher torn down");
    }
}

impl<T: Transport + 'static> Drop for Fetcher<T> {
    fn drop(&mut self) {
        self.shared.lifecycle.lock().torn_down = true;
    }
}

impl Shared {
    /// Apply a terminal state if `activation` is still current, then notify
    /// `observer` once the lock is released.
    fn resolve(&self, activation: &Activation, state: RequestState, observer: &dyn LifecycleObserver) {
        {
            let lifecycle = self.lifecycle.lock();
            if lifecycle.torn_down {
                tracing::trace!(activation = %activation.id, "Discarding resolution after teardown");
                return;
            }
            if lifecycle.generation != activation.generation {
                tracing::trace!(activation = %activation.id, "Discarding resolution of superseded activation");
                return;
            }
            self.state.send_replace(state.clone());
        }
        observer.on_transition(&Transition {
            activation: activation.id,
            method: activation.descriptor.method(),
            url: activation.descriptor.url(),
            state: &state,
        });
    }
}

/// Turn a completed round-trip into parsed JSON according to `policy`.
pub fn decode(response: HttpResponse, policy: StatusPolicy) -> Result<Value, FetchError> {
    if policy == StatusPolicy::RequireSuccess && !response.is_success() {
        return Err(FetchError::HttpStatus {
            status: response.status,
            body: response.body,
        });
    }
    serde_json::from_str(&response.body).map_err(|e| FetchError::Decode(e.to_string()))
}
