use std::fmt;

/// Category of a failed API response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseErrorKind {
    NotFound,
    InvalidAccessToken,
    Unauthorized,
    RateLimitExceeded,
    Generic,
}

/// An API-level failure derived from a non-2xx HTTP response.
///
/// Every variant carries a human readable message. The specific kinds carry the
/// reason phrase of the status code, while [`ResponseError::Generic`] carries
/// `"<status> error: <reason>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseError {
    /// HTTP 404.
    NotFound(String),
    /// HTTP 400 whose body mentions `OAuthException`.
    InvalidAccessToken(String),
    /// HTTP 401.
    Unauthorized(String),
    /// HTTP 429.
    RateLimitExceeded(String),
    /// Any other non-2xx status.
    Generic(String),
}

impl ResponseError {
    pub fn kind(&self) -> ResponseErrorKind {
        match self {
            ResponseError::NotFound(_) => ResponseErrorKind::NotFound,
            ResponseError::InvalidAccessToken(_) => ResponseErrorKind::InvalidAccessToken,
            ResponseError::Unauthorized(_) => ResponseErrorKind::Unauthorized,
            ResponseError::RateLimitExceeded(_) => ResponseErrorKind::RateLimitExceeded,
            ResponseError::Generic(_) => ResponseErrorKind::Generic,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ResponseError::NotFound(message)
            | ResponseError::InvalidAccessToken(message)
            | ResponseError::Unauthorized(message)
            | ResponseError::RateLimitExceeded(message)
            | ResponseError::Generic(message) => message,
        }
    }
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ResponseError {}

/// Error returned by every [`ApiClient`](crate::client::ApiClient) call.
#[derive(Debug)]
pub enum ClientError {
    /// The access token cannot be sent as an HTTP header value.
    InvalidHeader(String),
    /// The transport failed, or the response body could not be read.
    Request(reqwest::Error),
    /// A successful response did not contain valid JSON.
    Parse(serde_json::Error),
    /// The API answered with a non-2xx status.
    Response(ResponseError),
}

impl ClientError {
    /// Returns the classified API error, if this is one.
    pub fn response(&self) -> Option<&ResponseError> {
        match self {
            ClientError::Response(error) => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::InvalidHeader(message) => write!(f, "Invalid header, {}", message),
            ClientError::Request(e) => write!(f, "Request failed, {}", e),
            ClientError::Parse(e) => write!(f, "Response parse failed, {}", e),
            ClientError::Response(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::InvalidHeader(_) => None,
            ClientError::Request(e) => Some(e),
            ClientError::Parse(e) => Some(e),
            ClientError::Response(e) => Some(e),
        }
    }
}

impl From<ResponseError> for ClientError {
    fn from(error: ResponseError) -> Self {
        ClientError::Response(error)
    }
}
