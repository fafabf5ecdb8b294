//! Client configuration.
//!
//! `ClientConfig` is validated once, at construction, and never mutated by the
//! client afterwards. Each `with_*` method consumes the value and returns an
//! updated one, so a config can be built up fluently and then shared.

use std::time::Duration;

use crate::error::ApiError;

pub const DEFAULT_API_ENDPOINT: &str = "https://api-news.layervault.com";
pub const DEFAULT_API_VERSION_SEGMENT: &str = "v1";
pub const DEFAULT_USER_AGENT: &str = concat!("designer-news-rs/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Settings for a `DesignerNewsClient`.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    access_token: String,
    api_version_segment: String,
    user_agent: String,
    api_endpoint: String,
    connect_timeout: Duration,
    timeout: Duration,
}

impl ClientConfig {
    /// Create a config with the given bearer token and defaults for the rest.
    ///
    /// Fails with `ApiError::Configuration` if the token is empty or blank.
    pub fn new(access_token: impl Into<String>) -> Result<Self, ApiError> {
        let access_token = access_token.into();
        if access_token.trim().is_empty() {
            return Err(ApiError::Configuration(
                "an access token is required".to_string(),
            ));
        }
        Ok(Self {
            access_token,
            api_version_segment: DEFAULT_API_VERSION_SEGMENT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_api_version_segment(mut self, segment: impl Into<String>) -> Self {
        self.api_version_segment = segment.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Point the client at another host, e.g. a local mock server.
    /// A trailing `/` is dropped.
    pub fn with_api_endpoint(mut self, endpoint: &str) -> Self {
        self.api_endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeouts(mut self, connect_timeout: Duration, timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self.timeout = timeout;
        self
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn api_version_segment(&self) -> &str {
        &self.api_version_segment
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `{endpoint}/api/{version}`, the prefix every request path is joined to.
    pub fn base_url(&self) -> String {
        format!("{}/api/{}", self.api_endpoint, self.api_version_segment)
    }
}

// Hand-written so the token never ends up in logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("access_token", &"<redacted>")
            .field("api_version_segment", &self.api_version_segment)
            .field("user_agent", &self.user_agent)
            .field("api_endpoint", &self.api_endpoint)
            .field("connect_timeout", &self.connect_timeout)
            .field("timeout", &self.timeout)
            .finish()
    }
}
