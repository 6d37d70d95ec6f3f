//! HTTP transports.
//!
//! With the `reqwest` feature enabled, [`ReqwestTransport`] sends requests
//! through a shared `reqwest::Client`.

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use pulsar_core::{BoxError, HttpRequest, HttpResponse, Transport};

    /// A [`Transport`] backed by `reqwest`.
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        /// Create a transport with a default client.
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a transport around an existing client.
        pub fn with_client(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    impl Transport for ReqwestTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
            let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())?;
            let mut builder = self.client.request(method, &request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?.to_vec();
            Ok(HttpResponse { status, body })
        }
    }
}
