//! Lifecycle state of a single activation.
//!
//! `RequestState` is an enum so that "data only on success, error only on
//! failure, neither before resolution" holds by construction.

use serde_json::Value;

use crate::error::FetchError;

/// Discriminant of a `RequestState`, without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Idle,
    Loading,
    Success,
    Error,
}

/// Where an activation currently stands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    /// Nothing has been activated yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The response parsed as JSON.
    Success(Value),
    /// Transport, status or decode failure.
    Error(FetchError),
}

impl RequestState {
    pub fn status(&self) -> Status {
        match self {
            RequestState::Idle => Status::Idle,
            RequestState::Loading => Status::Loading,
            RequestState::Success(_) => Status::Success,
            RequestState::Error(_) => Status::Error,
        }
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            RequestState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            RequestState::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Success or Error. No further transition happens without a new
    /// activation.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestState::Success(_) | RequestState::Error(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }
}

impl From<Result<Value, FetchError>> for RequestState {
    fn from(result: Result<Value, FetchError>) -> Self {
        match result {
            Ok(data) => RequestState::Success(data),
            Err(err) => RequestState::Error(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_is_idle() {
        let state = RequestState::default();
        assert_eq!(state.status(), Status::Idle);
        assert!(!state.is_terminal());
        assert!(state.data().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn loading_carries_nothing() {
        let state = RequestState::Loading;
        assert!(state.is_loading());
        assert!(!state.is_terminal());
        assert!(state.data().is_none() && state.error().is_none());
    }

    #[test]
    fn success_exposes_data_only() {
        let state = RequestState::from(Ok(json!([{"id": 1}])));
        assert_eq!(state.status(), Status::Success);
        assert!(state.is_terminal());
        assert_eq!(state.data(), Some(&json!([{"id": 1}])));
        assert!(state.error().is_none());
    }

    #[test]
    fn error_exposes_error_only() {
        let state = RequestState::from(Err(FetchError::Decode("eof".into())));
        assert_eq!(state.status(), Status::Error);
        assert!(state.is_terminal());
        assert!(state.data().is_none());
        assert_eq!(state.error(), Some(&FetchError::Decode("eof".into())));
    }
}
