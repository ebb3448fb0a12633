//! Terminal rendering of a `RequestState`.

use fetch_core::RequestState;
use serde_json::Value;

pub const LOADING_MESSAGE: &str = "Loading data...";

/// How much of a successful payload to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The first element of a list, or the whole value if it is not one.
    FirstItem,
    Whole,
}

/// Idle renders as nothing, Loading as a placeholder, Success as the payload
/// selected by `view`, Error as its message.
pub fn render(state: &RequestState, view: View) -> String {
    match state {
        RequestState::Idle => String::new(),
        RequestState::Loading => LOADING_MESSAGE.to_string(),
        RequestState::Success(data) => match view {
            View::FirstItem => pretty(first_or_whole(data)),
            View::Whole => pretty(data),
        },
        RequestState::Error(err) => format!("Error: {err}"),
    }
}

fn first_or_whole(data: &Value) -> &Value {
    match data {
        Value::Array(items) => items.first().unwrap_or(data),
        other => other,
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
