// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The response type returned by unary RPCs.
//!
//! A response carries the decoded message and the response metadata. The
//! Google Ads API returns a `request-id` with every response, include it when
//! contacting support.
//!
//! # Example
//! ```
//! # use google_ads_gax::response::{Parts, Response};
//! let mut headers = http::HeaderMap::new();
//! headers.insert("request-id", http::HeaderValue::from_static("abc123"));
//! let response = Response::from_parts(Parts::new().set_headers(headers), "body");
//! assert_eq!(response.request_id(), Some("abc123"));
//! assert_eq!(response.into_body(), "body");
//! ```

/// The name of the metadata entry holding the request id.
pub const REQUEST_ID: &str = "request-id";

/// A response from a Google Ads API service: a body plus its metadata.
///
/// Applications may create responses directly when mocking clients.
#[derive(Clone, Debug)]
pub struct Response<T> {
    parts: Parts,
    body: T,
}

impl<T> Response<T> {
    /// Creates a response from the body, with empty metadata.
    pub fn from(body: T) -> Self {
        Self {
            body,
            parts: Parts::default(),
        }
    }

    /// Creates a response from the given parts.
    pub fn from_parts(parts: Parts, body: T) -> Self {
        Self { parts, body }
    }

    /// The response metadata.
    pub fn headers(&self) -> &http::HeaderMap<http::HeaderValue> {
        &self.parts.headers
    }

    /// The request id assigned by the service, if present.
    pub fn request_id(&self) -> Option<&str> {
        self.parts
            .headers
            .get(REQUEST_ID)
            .and_then(|v| v.to_str().ok())
    }

    /// The response body.
    pub fn body(&self) -> &T {
        &self.body
    }

    /// Splits the response into its metadata and its body.
    pub fn into_parts(self) -> (Parts, T) {
        (self.parts, self.body)
    }

    /// Consumes the response returning only its body.
    pub fn into_body(self) -> T {
        self.body
    }
}

/// Component parts of a response.
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct Parts {
    /// The response metadata, converted to HTTP headers.
    pub headers: http::HeaderMap<http::HeaderValue>,
}

impl Parts {
    /// Create a new instance.
    pub fn new() -> Self {
        Parts::default()
    }

    /// Set the headers.
    pub fn set_headers<V>(mut self, v: V) -> Self
    where
        V: Into<http::HeaderMap>,
    {
        self.headers = v.into();
        self
    }
}
