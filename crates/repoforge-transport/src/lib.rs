//! Outbound transport for repoforge
//!
//! Every provider call goes through the [`Transport`] trait. Production code
//! uses [`HttpTransport`]; tests inject a `MockTransport` (behind the
//! `test-utils` feature) that answers from a registry of canned outcomes keyed
//! by method and URL instead of touching the network.

mod http_client;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
mod rest_client;
mod types;

pub use http_client::HttpTransport;
pub use reqwest::header::{self, HeaderMap, HeaderValue};
pub use reqwest::{Method, StatusCode};
pub use rest_client::RestClient;
pub use types::{Transport, TransportRequest, TransportResponse};

pub use repoforge_utils::error::TransportError;
