//! Descriptor builders for the placeholder API.
//!
//! # Design
//! `PlaceholderApi` holds only a `base_url` and never touches the network.
//! Each method produces a `RequestDescriptor` that a `Fetcher` activates, so
//! the endpoints the example components hit are spelled out in one place.

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::http::RequestDescriptor;
use crate::types::NewPost;

#[derive(Debug, Clone)]
pub struct PlaceholderApi {
    base_url: String,
}

impl PlaceholderApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &FetchConfig) -> Self {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn list_users(&self) -> RequestDescriptor {
        RequestDescriptor::get(format!("{}/users", self.base_url))
    }

    pub fn get_user(&self, id: u64) -> RequestDescriptor {
        RequestDescriptor::get(format!("{}/users/{id}", self.base_url))
    }

    pub fn list_todos(&self) -> RequestDescriptor {
        RequestDescriptor::get(format!("{}/todos", self.base_url))
    }

    pub fn create_post(&self, post: &NewPost) -> Result<RequestDescriptor, FetchError> {
        RequestDescriptor::post_json(format!("{}/posts", self.base_url), post)
    }
}

impl Default for PlaceholderApi {
    fn default() -> Self {
        Self::from_config(&FetchConfig::default())
    }
}
