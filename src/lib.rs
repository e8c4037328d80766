//! Blocking client for the Yammer REST API.
//!
//! [`ApiClient`] sends authenticated GET and POST requests, decodes JSON
//! responses and classifies failed responses into [`ResponseError`] kinds.

pub mod client;
pub mod configs;

pub use client::error::{ClientError, ResponseError, ResponseErrorKind};
pub use client::{classify, ApiClient, Method, ParamValue, Params, DEFAULT_BASE_URL};
pub use configs::ClientConfig;
