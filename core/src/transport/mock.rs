use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use super::Transport;
use crate::error::FetchError;
use crate::http::{HttpMethod, HttpResponse, RequestDescriptor};

/// Releases a response queued with `MockTransport::add_response_with_trigger`.
pub type ResponseTrigger = oneshot::Sender<()>;

/// In-memory transport for tests.
///
/// Responses are queued per `"{METHOD} {url}"` and handed out in FIFO order.
/// Every call is recorded, including ones with no queued response (those
/// fail with `FetchError::Network`).
///
/// # Example
/// ```ignore
/// let mock = MockTransport::new();
/// mock.add_response(
///     HttpMethod::Get,
///     "http://api.test/users",
///     Ok(HttpResponse::new(200, r#"[{"id":1}]"#)),
/// );
/// ```
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<String, VecDeque<MockResponse>>>>,
    calls: Arc<Mutex<Vec<RequestDescriptor>>>,
    in_flight: Arc<AtomicUsize>,
}

enum MockResponse {
    Immediate(Result<HttpResponse, FetchError>),
    /// Held until the paired sender fires or is dropped.
    Triggered {
        response: Result<HttpResponse, FetchError>,
        trigger: oneshot::Receiver<()>,
    },
}

fn key(method: HttpMethod, url: &str) -> String {
    format!("{method} {url}")
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_response(&self, method: HttpMethod, url: &str, response: Result<HttpResponse, FetchError>) {
        self.responses
            .lock()
            .entry(key(method, url))
            .or_default()
            .push_back(MockResponse::Immediate(response));
    }

    /// Queue a response that only completes once the returned trigger is
    /// sent or dropped.
    pub fn add_response_with_trigger(
        &self,
        method: HttpMethod,
        url: &str,
        response: Result<HttpResponse, FetchError>,
    ) -> ResponseTrigger {
        let (tx, rx) = oneshot::channel();
        self.responses
            .lock()
            .entry(key(method, url))
            .or_default()
            .push_back(MockResponse::Triggered { response, trigger: rx });
        tx
    }

    pub fn calls(&self) -> Vec<RequestDescriptor> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Number of `send` calls that have started but not returned.
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<HttpResponse, FetchError> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let _guard = InFlightGuard {
            in_flight: Arc::clone(&self.in_flight),
        };

        self.calls.lock().push(request.clone());

        let queued = self
            .responses
            .lock()
            .get_mut(&key(request.method(), request.url()))
            .and_then(VecDeque::pop_front);

        match queued {
            Some(MockResponse::Immediate(response)) => response,
            Some(MockResponse::Triggered { response, trigger }) => {
                // A dropped sender releases the response too.
                let _ = trigger.await;
                response
            }
            None => Err(FetchError::Network(format!(
                "no mock response configured for {} {}",
                request.method(),
                request.url()
            ))),
        }
    }
}

/// Decrements the in-flight counter even if the send future is dropped.
struct InFlightGuard {
    in_flight: Arc<AtomicUsize>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
