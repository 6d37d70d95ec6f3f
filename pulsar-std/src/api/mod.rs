//! API adapter.
//!
//! A thin, parameterized client for the services behind the front end. One
//! adapter is created per service; it works out the base URL for the
//! environment the page runs in, fills templated endpoint segments, encodes
//! query strings and decodes responses.
//!
//! ```rust,ignore
//! let users = ApiAdapter::new(ApiConfig::for_host("user", "localhost"), transport);
//!
//! let user = users
//!     .request(&ApiRequest::get("/users/:id").with_path_param("id", 42))
//!     .await?;
//!
//! let adults = users
//!     .request(&ApiRequest::get("/users").with_query("age", 30).with_query("sort", "asc"))
//!     .await?;
//! ```

mod config;
mod request;

pub use config::{ApiConfig, Environment};
pub use request::{ApiRequest, ReturnType};

use pulsar_core::{ApiError, DynTransport, HttpRequest, HttpResponse, Transport};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

type RedirectFn = Box<dyn Fn(&str) + Send + Sync>;

/// Decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiBody {
    /// A JSON document.
    Json(Value),
    /// Text, for CSV responses.
    Text(String),
    /// Raw bytes, for Parquet responses.
    Binary(Vec<u8>),
}

/// Outcome of an API request.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// The request completed and its body was decoded.
    Body(ApiBody),
    /// The server required authentication; the redirect sink was sent to
    /// `location` and there is no body.
    Redirected {
        /// Where the page was sent.
        location: String,
    },
}

impl ApiResponse {
    /// The decoded body, or `None` after a redirect.
    pub fn into_body(self) -> Option<ApiBody> {
        match self {
            ApiResponse::Body(body) => Some(body),
            ApiResponse::Redirected { .. } => None,
        }
    }

    /// Whether this response is a sign-in redirect.
    pub fn is_redirect(&self) -> bool {
        matches!(self, ApiResponse::Redirected { .. })
    }
}

/// Client for one service.
pub struct ApiAdapter {
    config: ApiConfig,
    transport: Arc<dyn DynTransport>,
    redirect: RedirectFn,
}

impl ApiAdapter {
    /// Create an adapter for the service described by `config`.
    ///
    /// Without a redirect sink, sign-in redirects are only logged.
    pub fn new<T: Transport>(config: ApiConfig, transport: T) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
            redirect: Box::new(|location: &str| {
                tracing::info!(%location, "authentication required");
            }),
        }
    }

    /// Call `redirect` with the sign-in location when a request answers 401.
    ///
    /// In a browser this sets `window.location`.
    pub fn on_redirect<F>(mut self, redirect: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.redirect = Box::new(redirect);
        self
    }

    /// The configuration in use.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Absolute URL `request` is sent to.
    pub fn url_for(&self, request: &ApiRequest) -> String {
        let mut url = self.config.base_url();
        url.push_str(request.endpoint().trim_start_matches('/'));
        if let Some(query) = request.query_string() {
            url.push('?');
            url.push_str(&query);
        }
        url
    }

    /// Send `request` and decode the response.
    ///
    /// - 401: the redirect sink is called and [`ApiResponse::Redirected`]
    ///   returned; this is not an error.
    /// - A status in the configured fatal set: [`ApiError::Status`].
    /// - Anything else is decoded according to the request's return type.
    pub async fn request(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.url_for(request);
        let mut http = HttpRequest::new(request.method(), url.as_str())
            .header("Content-Type", "application/json");
        if request.method().has_body() {
            let payload = request.payload().unwrap_or(&Value::Null);
            http = http.body(serde_json::to_vec(payload)?);
        }

        tracing::debug!(method = %request.method(), %url, "api request");
        let response = self
            .transport
            .send_dyn(http)
            .await
            .map_err(ApiError::Transport)?;

        if response.status == 401 {
            let location = self.config.sign_in_location().to_owned();
            (self.redirect)(&location);
            return Ok(ApiResponse::Redirected { location });
        }
        if self.config.is_fatal(response.status) {
            tracing::warn!(%url, status = response.status, "api request failed");
            return Err(ApiError::Status {
                status: response.status,
            });
        }

        decode(request.return_type(), response).map(ApiResponse::Body)
    }

    /// Send `request` and deserialize a JSON body into `T`.
    ///
    /// Returns `Ok(None)` after a sign-in redirect.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> Result<Option<T>, ApiError> {
        let request = request.clone().with_return_type(ReturnType::Json);
        match self.request(&request).await? {
            ApiResponse::Body(ApiBody::Json(value)) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| ApiError::Decode(Box::new(e))),
            ApiResponse::Body(_) | ApiResponse::Redirected { .. } => Ok(None),
        }
    }
}

impl std::fmt::Debug for ApiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiAdapter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn decode(return_type: ReturnType, response: HttpResponse) -> Result<ApiBody, ApiError> {
    match return_type {
        ReturnType::Json => serde_json::from_slice(&response.body)
            .map(ApiBody::Json)
            .map_err(|e| ApiError::Decode(Box::new(e))),
        ReturnType::Csv => String::from_utf8(response.body)
            .map(ApiBody::Text)
            .map_err(|e| ApiError::Decode(Box::new(e))),
        ReturnType::Parquet => Ok(ApiBody::Binary(response.body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use pulsar_core::Method;
    use serde::Deserialize;
    use std::sync::Mutex;

    fn adapter(transport: &ScriptedTransport) -> ApiAdapter {
        ApiAdapter::new(ApiConfig::for_host("user", "localhost"), transport.clone())
    }

    #[tokio::test]
    async fn test_get_json_with_path_params() {
        let transport = ScriptedTransport::new();
        transport.respond(
            "http://localhost:8084/user/users/42",
            HttpResponse::new(200, r#"{"id": 42, "name": "Ada"}"#),
        );

        let response = adapter(&transport)
            .request(&ApiRequest::get("/users/:id").with_path_param("id", 42))
            .await
            .unwrap();
        assert_eq!(
            response.into_body(),
            Some(ApiBody::Json(serde_json::json!({"id": 42, "name": "Ada"})))
        );

        let requests = transport.requests();
        let sent = &requests[0];
        assert_eq!(sent.method, Method::Get);
        assert!(sent.body.is_none());
        assert_eq!(
            sent.headers,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
    }

    #[tokio::test]
    async fn test_post_sends_json_payload() {
        let transport = ScriptedTransport::new();
        transport.respond("http://localhost:8084/user/users", HttpResponse::new(201, "{}"));

        adapter(&transport)
            .request(
                &ApiRequest::new("/users", Method::Post)
                    .with_payload(serde_json::json!({"name": "Ada"})),
            )
            .await
            .unwrap();

        let requests = transport.requests();
        let sent = &requests[0];
        assert_eq!(sent.body.as_deref(), Some(&br#"{"name":"Ada"}"#[..]));
    }

    #[tokio::test]
    async fn test_put_without_payload_sends_null() {
        let transport = ScriptedTransport::new();
        transport.respond("http://localhost:8084/user/users/1", HttpResponse::new(200, "{}"));

        adapter(&transport)
            .request(&ApiRequest::new("users/:id", Method::Put).with_path_param("id", 1))
            .await
            .unwrap();

        assert_eq!(transport.requests()[0].body.as_deref(), Some(&b"null"[..]));
    }

    #[tokio::test]
    async fn test_unauthorized_redirects() {
        let transport = ScriptedTransport::new();
        transport.respond("http://localhost:8084/user/me", HttpResponse::new(401, ""));
        let visited = Arc::new(Mutex::new(Vec::new()));
        let v = visited.clone();
        let api = adapter(&transport).on_redirect(move |location| {
            v.lock().unwrap().push(location.to_string());
        });

        let response = api.request(&ApiRequest::get("/me")).await.unwrap();
        assert!(response.is_redirect());
        assert_eq!(*visited.lock().unwrap(), vec!["/sign-in"]);
    }

    #[tokio::test]
    async fn test_fatal_status_is_error() {
        let transport = ScriptedTransport::new();
        for status in [403, 500, 518, 522, 527] {
            let url = format!("http://localhost:8084/user/s{status}");
            transport.respond(url, HttpResponse::new(status, ""));
            let err = adapter(&transport)
                .request(&ApiRequest::get(format!("/s{status}")))
                .await
                .unwrap_err();
            assert_eq!(err.status_code(), Some(status));
            assert_eq!(err.to_string(), format!("HTTP Error: {status}"));
        }
    }

    #[tokio::test]
    async fn test_other_statuses_are_decoded() {
        let transport = ScriptedTransport::new();
        transport.respond(
            "http://localhost:8084/user/missing",
            HttpResponse::new(404, r#"{"error": "not found"}"#),
        );

        let response = adapter(&transport)
            .request(&ApiRequest::get("/missing"))
            .await
            .unwrap();
        assert!(matches!(response, ApiResponse::Body(ApiBody::Json(_))));
    }

    #[tokio::test]
    async fn test_csv_and_parquet_return_types() {
        let transport = ScriptedTransport::new();
        transport.respond("http://localhost:8084/user/export", HttpResponse::new(200, "a,b\n1,2"));
        transport.respond("http://localhost:8084/user/dump", HttpResponse::new(200, vec![0x50, 0x41]));
        let api = adapter(&transport);

        let csv = api
            .request(&ApiRequest::get("/export").with_return_type(ReturnType::Csv))
            .await
            .unwrap();
        assert_eq!(csv.into_body(), Some(ApiBody::Text("a,b\n1,2".into())));

        let parquet = api
            .request(&ApiRequest::get("/dump").with_return_type(ReturnType::Parquet))
            .await
            .unwrap();
        assert_eq!(parquet.into_body(), Some(ApiBody::Binary(vec![0x50, 0x41])));
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let transport = ScriptedTransport::new();
        transport.respond("http://localhost:8084/user/broken", HttpResponse::new(200, "{"));

        let err = adapter(&transport)
            .request(&ApiRequest::get("/broken"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let transport = ScriptedTransport::new();
        transport.fail("http://localhost:8084/user/down", "connection refused");

        let err = adapter(&transport)
            .request(&ApiRequest::get("/down"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[tokio::test]
    async fn test_request_json_deserializes() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct User {
            id: u32,
            name: String,
        }

        let transport = ScriptedTransport::new();
        transport.respond(
            "http://localhost:8084/user/users/7",
            HttpResponse::new(200, r#"{"id": 7, "name": "Grace"}"#),
        );

        let user: Option<User> = adapter(&transport)
            .request_json(&ApiRequest::get("/users/:id").with_path_param("id", 7))
            .await
            .unwrap();
        assert_eq!(
            user,
            Some(User {
                id: 7,
                name: "Grace".into()
            })
        );
    }

    #[test]
    fn test_url_for_with_query() {
        let api = ApiAdapter::new(
            ApiConfig::for_host("user", "app.example.com"),
            ScriptedTransport::new(),
        );
        let request = ApiRequest::get("/users").with_query("age", 30).with_query("sort", "asc");
        assert_eq!(
            api.url_for(&request),
            "https://user.example.com/users?age=30&sort=asc"
        );
    }
}
