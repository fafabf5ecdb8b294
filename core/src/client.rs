//! Request builder, dispatcher and response parser for the Designer News API.
//!
//! # Design
//! `DesignerNewsClient` holds an immutable `ClientConfig` and a `Transport`,
//! and nothing else. Every endpoint method is a one-liner over `request`,
//! which is split into two pure halves around the transport call:
//! `build_request` produces an `HttpRequest` and `parse_response` consumes an
//! `HttpResponse`. Hosts that want to do their own I/O can call the halves
//! directly.
//!
//! Status codes are not interpreted. The remote API describes its own errors
//! in a JSON envelope, and that envelope is returned as-is; callers must
//! inspect it.

use log::{debug, warn};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::transport::UreqTransport;
use crate::types::{CommentBody, IntoIdentifier};

/// Synchronous, stateless client for the Designer News v1 API.
#[derive(Debug, Clone)]
pub struct DesignerNewsClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl DesignerNewsClient {
    /// Client that talks to the network through `UreqTransport`.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }

    /// Shorthand for `new(ClientConfig::new(access_token)?)`.
    pub fn from_token(access_token: impl Into<String>) -> Result<Self, ApiError> {
        Ok(Self::new(ClientConfig::new(access_token)?))
    }
}

impl<T: Transport> DesignerNewsClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Details for the authorized user.
    pub fn get_user(&self) -> Result<Value, ApiError> {
        self.request(HttpMethod::Get, "/me", &[], None)
    }

    pub fn get_story(&self, id: impl IntoIdentifier) -> Result<Value, ApiError> {
        let id = id.into_identifier()?;
        self.request(HttpMethod::Get, &format!("/stories/{id}"), &[], None)
    }

    /// The current front page.
    pub fn get_top_stories(&self) -> Result<Value, ApiError> {
        self.request(HttpMethod::Get, "/stories", &[], None)
    }

    pub fn get_recent_stories(&self) -> Result<Value, ApiError> {
        self.request(HttpMethod::Get, "/stories/recent", &[], None)
    }

    /// Upvote a story; the response carries the updated story.
    pub fn upvote_story(&self, id: impl IntoIdentifier) -> Result<Value, ApiError> {
        let id = id.into_identifier()?;
        self.request(HttpMethod::Post, &format!("/stories/{id}/upvote"), &[], None)
    }

    /// Post a top-level comment on a story and return the new comment.
    pub fn comment_on_story(
        &self,
        id: impl IntoIdentifier,
        comment: impl Into<CommentBody>,
    ) -> Result<Value, ApiError> {
        let id = id.into_identifier()?;
        let body = comment.into().to_form();
        self.request(HttpMethod::Post, &format!("/stories/{id}/reply"), &[], Some(body))
    }

    pub fn search_for_story(&self, query: &str) -> Result<Value, ApiError> {
        self.request(HttpMethod::Get, "/stories/search", &[("query", query)], None)
    }

    pub fn get_comment(&self, id: impl IntoIdentifier) -> Result<Value, ApiError> {
        let id = id.into_identifier()?;
        self.request(HttpMethod::Get, &format!("/comments/{id}"), &[], None)
    }

    pub fn upvote_comment(&self, id: impl IntoIdentifier) -> Result<Value, ApiError> {
        let id = id.into_identifier()?;
        self.request(HttpMethod::Post, &format!("/comments/{id}/upvote"), &[], None)
    }

    pub fn reply_to_comment(
        &self,
        id: impl IntoIdentifier,
        comment: impl Into<CommentBody>,
    ) -> Result<Value, ApiError> {
        let id = id.into_identifier()?;
        let body = comment.into().to_form();
        self.request(HttpMethod::Post, &format!("/comments/{id}/reply"), &[], Some(body))
    }

    /// The current message of the day.
    pub fn get_motd(&self) -> Result<Value, ApiError> {
        self.request(HttpMethod::Get, "/motd", &[], None)
    }

    pub fn upvote_motd(&self) -> Result<Value, ApiError> {
        self.request(HttpMethod::Post, "/motd/upvote", &[], None)
    }

    pub fn downvote_motd(&self) -> Result<Value, ApiError> {
        self.request(HttpMethod::Post, "/motd/downvote", &[], None)
    }

    /// Build, send and decode one request.
    ///
    /// `path` is relative to `{endpoint}/api/{version}` and must start with
    /// `/`. `params` become the query string; `body` is sent as a
    /// form-urlencoded payload.
    pub fn request(
        &self,
        method: HttpMethod,
        path: &str,
        params: &[(&str, &str)],
        body: Option<String>,
    ) -> Result<Value, ApiError> {
        let request = self.build_request(method, path, params, body);
        debug!("{} {}", request.method, request.url);

        let response = self.transport.send(&request).map_err(|e| {
            warn!("{} {} failed: {e}", request.method, request.url);
            e
        })?;
        self.parse_response(response)
    }

    /// Describe a request without sending it.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        params: &[(&str, &str)],
        body: Option<String>,
    ) -> HttpRequest {
        let mut url = format!("{}{path}", self.config.base_url());
        if !params.is_empty() {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params)
                .finish();
            url.push('?');
            url.push_str(&query);
        }

        let mut headers = vec![
            ("Accept".to_string(), "application/json".to_string()),
            (
                "Authorization".to_string(),
                format!("Bearer {}", self.config.access_token()),
            ),
            ("User-Agent".to_string(), self.config.user_agent().to_string()),
        ];
        if body.is_some() {
            headers.push((
                "Content-Type".to_string(),
                "application/x-www-form-urlencoded".to_string(),
            ));
        }

        HttpRequest {
            method,
            url,
            headers,
            body,
            connect_timeout: self.config.connect_timeout(),
            timeout: self.config.timeout(),
        }
    }

    /// Decode a response body as JSON, whatever its status.
    ///
    /// An empty body decodes to `Value::Null`.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, ApiError> {
        if !(200..300).contains(&response.status) {
            debug!("remote returned HTTP {}", response.status);
        }
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization {
            status: response.status,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::error::TransportError;

    /// Transport that must never be reached.
    struct Unreachable;

    impl Transport for Unreachable {
        fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            panic!("unexpected request to {}", request.url);
        }
    }

    fn client() -> DesignerNewsClient<Unreachable> {
        let config = ClientConfig::new("abc123")
            .unwrap()
            .with_api_endpoint("http://localhost:3000");
        DesignerNewsClient::with_transport(config, Unreachable)
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_get_request_has_auth_headers() {
        let req = client().build_request(HttpMethod::Get, "/stories/42", &[], None);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/api/v1/stories/42");
        assert_eq!(req.header("accept"), Some("application/json"));
        assert_eq!(req.header("authorization"), Some("Bearer abc123"));
        assert_eq!(req.header("user-agent"), Some(crate::config::DEFAULT_USER_AGENT));
        assert_eq!(req.header("content-type"), None);
        assert!(req.body.is_none());
    }

    #[test]
    fn build_request_applies_timeouts() {
        let req = client().build_request(HttpMethod::Get, "/me", &[], None);
        assert_eq!(req.connect_timeout, Duration::from_secs(10));
        assert_eq!(req.timeout, Duration::from_secs(60));
    }

    #[test]
    fn build_request_encodes_query_params() {
        let req = client().build_request(
            HttpMethod::Get,
            "/stories/search",
            &[("query", "flat design & you")],
            None,
        );
        assert_eq!(
            req.url,
            "http://localhost:3000/api/v1/stories/search?query=flat+design+%26+you"
        );
    }

    #[test]
    fn build_request_joins_multiple_params() {
        let req = client().build_request(HttpMethod::Get, "/x", &[("a", "1"), ("b", "2")], None);
        assert_eq!(req.url, "http://localhost:3000/api/v1/x?a=1&b=2");
    }

    #[test]
    fn build_post_request_with_body_is_form_encoded() {
        let body = CommentBody::new("hi there").to_form();
        let req = client().build_request(HttpMethod::Post, "/stories/7/reply", &[], Some(body));
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.header("content-type"), Some("application/x-www-form-urlencoded"));
        assert_eq!(req.body.as_deref(), Some("comment[body]=hi+there"));
    }

    #[test]
    fn custom_version_segment_and_user_agent_are_used() {
        let config = ClientConfig::new("tok")
            .unwrap()
            .with_api_endpoint("http://example.test")
            .with_api_version_segment("v2")
            .with_user_agent("tests/1.0");
        let client = DesignerNewsClient::with_transport(config, Unreachable);
        let req = client.build_request(HttpMethod::Get, "/motd", &[], None);
        assert_eq!(req.url, "http://example.test/api/v2/motd");
        assert_eq!(req.header("authorization"), Some("Bearer tok"));
        assert_eq!(req.header("user-agent"), Some("tests/1.0"));
    }

    #[test]
    fn invalid_id_fails_before_transport() {
        let err = client().get_story("not-a-number").unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
    }

    #[test]
    fn parse_response_returns_json() {
        let value = client()
            .parse_response(response(200, r#"{"story":{"id":42,"title":"Hello"}}"#))
            .unwrap();
        assert_eq!(value["story"]["id"], 42);
        assert_eq!(value["story"]["title"], "Hello");
    }

    #[test]
    fn parse_response_returns_error_envelope_as_is() {
        let value = client()
            .parse_response(response(401, r#"{"error":"unauthorized"}"#))
            .unwrap();
        assert_eq!(value, json!({"error": "unauthorized"}));
    }

    #[test]
    fn parse_response_accepts_arrays() {
        let value = client().parse_response(response(200, "[1,2,3]")).unwrap();
        assert_eq!(value, json!([1, 2, 3]));
    }

    #[test]
    fn parse_response_empty_body_is_null() {
        let value = client().parse_response(response(204, "")).unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn parse_response_bad_json() {
        let err = client()
            .parse_response(response(502, "<html>Bad Gateway</html>"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization { status: 502, .. }));
    }
}
