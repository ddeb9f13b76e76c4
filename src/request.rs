//! Outbound request descriptors.
//!
//! An [`ApiRequest`] is built per call and consumed by
//! [`crate::client::ApiClient::call`]. The body and the file-mode flag travel
//! together in [`Encoding`] so a JSON body can never be sent as a file or the
//! other way round.

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

use crate::error::ClientError;

const APPLICATION_JSON: &str = "application/json";

/// Payload sent as-is in file mode.
#[derive(Debug)]
pub enum FileBody {
    Bytes(Vec<u8>),
    /// Multipart form; the transport sets the boundary content type.
    Multipart(Form),
}

/// How the request body is encoded.
#[derive(Debug)]
pub enum Encoding {
    /// JSON content type is always sent; the body is serialized when present.
    Json(Option<Value>),
    /// No JSON content type; the body is forwarded unmodified.
    File(Option<FileBody>),
}

#[derive(Debug)]
pub struct ApiRequest {
    pub method: Method,
    /// Path appended to the API base URL, e.g. `/analysis/upload`.
    pub endpoint: String,
    pub encoding: Encoding,
}

impl ApiRequest {
    /// `GET` request with no body.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { method: Method::GET, endpoint: endpoint.into(), encoding: Encoding::Json(None) }
    }

    #[must_use]
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint)
    }

    #[must_use]
    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint).method(Method::POST)
    }

    #[must_use]
    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint).method(Method::PUT)
    }

    #[must_use]
    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint).method(Method::DELETE)
    }

    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Attach a JSON body. `null` is treated as no body.
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.encoding = Encoding::Json(Some(body).filter(|v| !v.is_null()));
        self
    }

    /// Attach any serializable value as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Json`] if `body` cannot be represented as JSON.
    pub fn json_from<T: Serialize + ?Sized>(self, body: &T) -> Result<Self, ClientError> {
        Ok(self.json(serde_json::to_value(body)?))
    }

    /// Switch to file mode without a body.
    #[must_use]
    pub fn file_mode(mut self) -> Self {
        self.encoding = Encoding::File(None);
        self
    }

    /// Switch to file mode and send `body` unmodified.
    #[must_use]
    pub fn file(mut self, body: FileBody) -> Self {
        self.encoding = Encoding::File(Some(body));
        self
    }

    #[must_use]
    pub fn bytes(self, body: impl Into<Vec<u8>>) -> Self {
        self.file(FileBody::Bytes(body.into()))
    }

    #[must_use]
    pub fn multipart(self, form: Form) -> Self {
        self.file(FileBody::Multipart(form))
    }

    #[must_use]
    pub fn is_file_mode(&self) -> bool {
        matches!(self.encoding, Encoding::File(_))
    }

    /// Apply content type and body to an in-flight builder.
    pub(crate) fn encode(self, builder: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        match self.encoding {
            Encoding::Json(body) => {
                let builder = builder.header(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
                match body {
                    Some(value) => Ok(builder.body(serde_json::to_vec(&value)?)),
                    None => Ok(builder),
                }
            }
            Encoding::File(Some(FileBody::Bytes(bytes))) => Ok(builder.body(bytes)),
            Encoding::File(Some(FileBody::Multipart(form))) => Ok(builder.multipart(form)),
            Encoding::File(None) => Ok(builder),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_defaults_to_get_json_without_body() {
        let req = ApiRequest::new("/me");
        assert_eq!(req.method, Method::GET);
        assert!(!req.is_file_mode());
        assert!(matches!(req.encoding, Encoding::Json(None)));
    }

    #[test]
    fn json_null_is_no_body() {
        let req = ApiRequest::post("/x").json(Value::Null);
        assert!(matches!(req.encoding, Encoding::Json(None)));
    }

    #[test]
    fn json_from_serializes_structs() {
        #[derive(Serialize)]
        struct Login<'a> {
            email: &'a str,
        }
        let req = ApiRequest::post("/auth/login").json_from(&Login { email: "a@b.c" }).unwrap();
        match req.encoding {
            Encoding::Json(Some(value)) => assert_eq!(value, json!({ "email": "a@b.c" })),
            other => panic!("unexpected encoding: {other:?}"),
        }
    }

    #[test]
    fn bytes_switches_to_file_mode() {
        let req = ApiRequest::post("/upload").bytes(b"raw".to_vec());
        assert!(req.is_file_mode());
    }

    #[test]
    fn later_json_overrides_file_mode() {
        let req = ApiRequest::post("/upload").file_mode().json(json!({ "a": 1 }));
        assert!(!req.is_file_mode());
    }
}
