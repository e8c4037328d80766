use crate::client::error::{ClientError, ResponseError};
use crate::configs::ClientConfig;
use hyper::ext::ReasonPhrase;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

pub mod error;
pub mod params;

pub use params::{ParamValue, Params};

/// Base endpoint used when a client is created without one.
pub const DEFAULT_BASE_URL: &'static str = "https://www.yammer.com/api/v1";

/// Marker the API puts into the body of a 400 caused by a bad access token.
const OAUTH_EXCEPTION: &'static str = "OAuthException";

/// Every resource path is requested with this suffix.
const RESOURCE_SUFFIX: &'static str = ".json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    fn as_reqwest(&self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// Blocking client for the Yammer REST API.
///
/// The client only holds its configuration and the transport handle, so one
/// instance can be shared by any number of independent calls.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
    headers: HeaderMap,
}

impl ApiClient {
    /// Creates a client with its own transport.
    ///
    /// `base_url` falls back to [`DEFAULT_BASE_URL`]. An empty access token is
    /// treated the same as no token.
    pub fn new(access_token: Option<String>, base_url: Option<String>) -> Result<Self, ClientError> {
        let http = reqwest::blocking::Client::builder()
            .build()
            .map_err(ClientError::Request)?;

        Self::with_http_client(http, access_token, base_url)
    }

    /// Creates a client on top of a caller supplied transport.
    pub fn with_http_client(
        http: reqwest::blocking::Client,
        access_token: Option<String>,
        base_url: Option<String>,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let headers = authorization_headers(access_token.as_deref())?;

        Ok(ApiClient { http, base_url, headers })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(config.access_token().map(str::to_owned), config.base_url().map(str::to_owned))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_access_token(&self) -> bool {
        self.headers.contains_key(AUTHORIZATION)
    }

    /// Performs a GET, sending `params` as the query string.
    ///
    /// The path names an API resource, e.g. `"/messages"`.
    pub fn get(&self, path: &str, params: &Params) -> Result<Value, ClientError> {
        self.request(Method::Get, path, params)
    }

    /// Performs a POST, sending `params` as a form encoded body.
    ///
    /// The path names an API resource, e.g. `"/messages"`.
    pub fn post(&self, path: &str, params: &Params) -> Result<Value, ClientError> {
        self.request(Method::Post, path, params)
    }

    /// Sends a single request and classifies its response.
    pub fn request(&self, method: Method, path: &str, params: &Params) -> Result<Value, ClientError> {
        let url = self.build_url(path);
        debug!("{} {} (params: {})", method, url, params.len());

        let request = self.http
            .request(method.as_reqwest(), url.as_str())
            .headers(self.build_headers());
        let request = match method {
            Method::Get => request.query(params),
            Method::Post => request.form(params),
        };

        let response = request.send()
            .map_err(ClientError::Request)?;
        let status = response.status();
        let reason = reason_phrase(&response);
        let body = response.text()
            .map_err(ClientError::Request)?;
        debug!("{} {} => {}", method, url, status);

        classify(status, &reason, &body).inspect_err(|e| {
            if let ClientError::Response(error) = e {
                warn!("{} {} failed: {:?}", method, url, error);
            }
        })
    }

    /// Joins the base URL, the resource path and the `.json` suffix verbatim.
    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, path, RESOURCE_SUFFIX)
    }

    pub fn build_headers(&self) -> HeaderMap {
        self.headers.clone()
    }
}

fn authorization_headers(access_token: Option<&str>) -> Result<HeaderMap, ClientError> {
    let mut headers = HeaderMap::new();

    if let Some(token) = access_token.filter(|t| !t.is_empty()) {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| ClientError::InvalidHeader(format!("access token: {}", e)))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

/// Reason phrase from the status line, or the standard one for the code when
/// the server sent the standard phrase (hyper only records non-standard ones).
fn reason_phrase(response: &reqwest::blocking::Response) -> String {
    match response.extensions().get::<ReasonPhrase>() {
        Some(phrase) => String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
        None => response.status().canonical_reason().unwrap_or("").to_owned(),
    }
}

/// Turns a status code, reason phrase and body into decoded JSON or a classified error.
///
/// Checks run in a fixed order and the first match wins: success, 404,
/// 400 with `OAuthException` somewhere in the raw body, 401, 429, anything else.
pub fn classify(status: StatusCode, reason: &str, body: &str) -> Result<Value, ClientError> {
    if status.is_success() {
        return serde_json::from_str(body).map_err(ClientError::Parse);
    }

    Err(ClientError::Response(error_for_status(status, reason, body)))
}

fn error_for_status(status: StatusCode, reason: &str, body: &str) -> ResponseError {
    let reason = reason.to_owned();

    match status {
        StatusCode::NOT_FOUND => ResponseError::NotFound(reason),
        StatusCode::BAD_REQUEST if body.contains(OAUTH_EXCEPTION) => ResponseError::InvalidAccessToken(reason),
        StatusCode::UNAUTHORIZED => ResponseError::Unauthorized(reason),
        StatusCode::TOO_MANY_REQUESTS => ResponseError::RateLimitExceeded(reason),
        _ => ResponseError::Generic(format!("{} error: {}", status.as_u16(), reason)),
    }
}
