//! Typed HTTP fetch primitive with loading-state tracking.
//!
//! # Overview
//! A `Fetcher` owns a `RequestState` and performs one HTTP call per
//! activation: `Idle -> Loading` immediately, then `Success` with the parsed
//! JSON body or `Error` with a `FetchError`. `PlaceholderApi` builds the
//! descriptors for the placeholder endpoints (`/users`, `/todos`, `/posts`).
//!
//! # Design
//! - `RequestDescriptor` is plain, immutable data; `Transport` executes it.
//!   `ReqwestTransport` is the production transport, `MockTransport` serves
//!   canned and delayed responses in tests.
//! - State changes are reported to an injected `LifecycleObserver`
//!   (`TracingObserver` by default), never printed.
//! - Resolutions that arrive after teardown or after a newer activation are
//!   discarded.
//! - Non-2xx responses are errors unless `StatusPolicy::AcceptAny` is set.

pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod observer;
pub mod state;
pub mod transport;
pub mod types;

pub use client::PlaceholderApi;
pub use config::{FetchConfig, StatusPolicy};
pub use error::{ErrorKind, FetchError};
pub use fetcher::{decode, Fetcher};
pub use http::{HttpMethod, HttpResponse, RequestDescriptor};
pub use observer::{LifecycleObserver, RecordedTransition, RecordingObserver, TracingObserver, Transition};
pub use state::{RequestState, Status};
pub use transport::{MockTransport, ReqwestTransport, ResponseTrigger, Transport};
pub use types::{ActivationId, NewPost};
