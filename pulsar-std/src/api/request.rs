//! Request description for the API adapter.

use pulsar_core::{ApiError, Method};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// How a response body is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReturnType {
    /// JSON document.
    #[default]
    Json,
    /// CSV text.
    Csv,
    /// Parquet bytes.
    Parquet,
}

impl FromStr for ReturnType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(ReturnType::Json),
            "csv" => Ok(ReturnType::Csv),
            "parquet" => Ok(ReturnType::Parquet),
            other => Err(ApiError::UnsupportedReturnType(other.to_owned())),
        }
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReturnType::Json => "json",
            ReturnType::Csv => "csv",
            ReturnType::Parquet => "parquet",
        })
    }
}

/// One call to a service endpoint.
///
/// Endpoints may contain `:name` segments, filled from path parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    endpoint: String,
    method: Method,
    payload: Option<Value>,
    return_type: ReturnType,
    path_params: Vec<(String, String)>,
    query: Vec<(String, String)>,
}

impl ApiRequest {
    /// A request for `endpoint` with `method`, expecting JSON back.
    pub fn new(endpoint: impl Into<String>, method: Method) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            payload: None,
            return_type: ReturnType::default(),
            path_params: Vec::new(),
            query: Vec::new(),
        }
    }

    /// A `GET` request for `endpoint`.
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint, Method::Get)
    }

    /// Set the JSON payload. Only sent for methods that carry a body.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Serialize `payload` and use it as the JSON payload.
    pub fn with_serialized<T: Serialize>(self, payload: &T) -> Result<Self, ApiError> {
        Ok(self.with_payload(serde_json::to_value(payload)?))
    }

    /// Set how the response body is decoded.
    pub fn with_return_type(mut self, return_type: ReturnType) -> Self {
        self.return_type = return_type;
        self
    }

    /// Fill the `:key` segment of the endpoint with `value`.
    pub fn with_path_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.path_params.push((key.into(), value.to_string()));
        self
    }

    /// Append a query-string parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Request method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// JSON payload, if set.
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// How the response body is decoded.
    pub fn return_type(&self) -> ReturnType {
        self.return_type
    }

    /// The endpoint with path parameters substituted.
    ///
    /// Each parameter replaces the first `:key` occurrence, in the order the
    /// parameters were added.
    pub fn endpoint(&self) -> String {
        self.path_params
            .iter()
            .fold(self.endpoint.clone(), |endpoint, (key, value)| {
                endpoint.replacen(&format!(":{key}"), value, 1)
            })
    }

    /// The form-urlencoded query string, or `None` when there are no
    /// parameters.
    pub fn query_string(&self) -> Option<String> {
        if self.query.is_empty() {
            return None;
        }
        Some(
            url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(&self.query)
                .finish(),
        )
    }
}
