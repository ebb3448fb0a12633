//! Identifiers and payload DTOs.
//!
//! # Design
//! `NewPost` mirrors the placeholder API's post schema but is defined
//! independently from the mock-server crate; integration tests catch any
//! drift between the two.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies one activation in logs and lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivationId(Uuid);

impl ActivationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActivationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActivationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Request payload for creating a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub user_id: u64,
}

impl NewPost {
    /// The payload the create-post example sends.
    pub fn sample() -> Self {
        Self {
            title: "Novo Post".to_string(),
            body: "Este é o conteúdo do post.".to_string(),
            user_id: 1,
        }
    }
}
