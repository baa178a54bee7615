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
use super::CredentialsError;
use super::rpc::Status;
use crate::response::REQUEST_ID;
use http::HeaderMap;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The error type returned by the Google Ads client libraries.
///
/// A request can fail before it is sent (invalid arguments, no credentials),
/// on the way to the service (connection problems, deadlines), or in the
/// service itself. The predicates on this type tell these cases apart. The
/// [status][Error::status] and [headers][Error::http_headers] carry the
/// details returned by the service, including the request id and the encoded
/// `GoogleAdsFailure`.
///
/// # Example
/// ```
/// use google_ads_gax::error::Error;
/// match example_function() {
///     Err(e) if e.status().is_some() => {
///         println!("request {:?} failed: {e}", e.request_id());
///     },
///     Err(e) if e.is_timeout() => { println!("not enough time {e}"); },
///     Err(e) => { println!("some other error {e}"); },
///     Ok(_) => { println!("success"); },
/// }
///
/// fn example_function() -> Result<String, Error> {
///     # use google_ads_gax::error::rpc::{Code, Status};
///     # Err(Error::service(Status::default().set_code(Code::NotFound).set_message("NOT FOUND")))
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: Option<BoxError>,
}

#[derive(Debug, thiserror::Error)]
enum ErrorKind {
    #[error("invalid arguments for the request")]
    Binding,
    #[error("cannot encode the request")]
    Serialization,
    #[error("cannot decode the response")]
    Deserialization,
    #[error("cannot create the authentication headers")]
    Authentication,
    #[error("the request exceeded its deadline")]
    Timeout,
    #[error("the retry policy gave up")]
    Exhausted,
    #[error("{}", transport_message(.0))]
    Transport(Box<TransportDetails>),
    #[error("the service reports an error with code {} described as: {}", .0.status.code, .0.status.message)]
    Service(Box<ServiceDetails>),
    #[error("an unclassified problem making a request")]
    Other,
}

#[derive(Debug, Default)]
struct TransportDetails {
    status_code: Option<u16>,
    headers: Option<HeaderMap>,
    payload: Option<bytes::Bytes>,
}

fn transport_message(d: &TransportDetails) -> String {
    match (d.status_code, &d.payload) {
        (Some(code), Some(p)) => match std::str::from_utf8(p) {
            Ok(text) => format!("the HTTP transport reports a [{code}] error: {text}"),
            Err(_) => format!("the HTTP transport reports a [{code}] error: {p:?}"),
        },
        _ => "the transport reports an error".to_string(),
    }
}

#[derive(Debug)]
struct ServiceDetails {
    status: Status,
    status_code: Option<u16>,
    headers: Option<HeaderMap>,
}

impl Error {
    fn with_source<T: Into<BoxError>>(kind: ErrorKind, source: T) -> Self {
        Self {
            kind,
            source: Some(source.into()),
        }
    }

    /// Creates an error with the status returned by the service.
    ///
    /// # Example
    /// ```
    /// use google_ads_gax::error::Error;
    /// use google_ads_gax::error::rpc::{Code, Status};
    /// let status = Status::default().set_code(Code::NotFound).set_message("NOT FOUND");
    /// let error = Error::service(status.clone());
    /// assert_eq!(error.status(), Some(&status));
    /// ```
    pub fn service(status: Status) -> Self {
        Self::service_full(status, None, None, None)
    }

    /// Creates a service error including the response metadata.
    #[doc(hidden)]
    pub fn service_with_http_metadata(
        status: Status,
        status_code: Option<u16>,
        headers: Option<HeaderMap>,
    ) -> Self {
        Self::service_full(status, status_code, headers, None)
    }

    /// Creates a service error including the response metadata and the
    /// transport's own error type.
    #[doc(hidden)]
    pub fn service_full(
        status: Status,
        status_code: Option<u16>,
        headers: Option<HeaderMap>,
        source: Option<BoxError>,
    ) -> Self {
        let details = ServiceDetails {
            status,
            status_code,
            headers,
        };
        Self {
            kind: ErrorKind::Service(Box::new(details)),
            source,
        }
    }

    /// Creates an error representing a timeout.
    pub fn timeout<T: Into<BoxError>>(source: T) -> Self {
        Self::with_source(ErrorKind::Timeout, source)
    }

    /// Creates an error representing an exhausted retry policy.
    pub fn exhausted<T: Into<BoxError>>(source: T) -> Self {
        Self::with_source(ErrorKind::Exhausted, source)
    }

    /// The application supplied an invalid combination of arguments.
    ///
    /// See [BindingError][crate::error::binding::BindingError] for the
    /// possible causes.
    pub fn binding<T: Into<BoxError>>(source: T) -> Self {
        Self::with_source(ErrorKind::Binding, source)
    }

    #[doc(hidden)]
    pub fn ser<T: Into<BoxError>>(source: T) -> Self {
        Self::with_source(ErrorKind::Serialization, source)
    }

    #[doc(hidden)]
    pub fn deser<T: Into<BoxError>>(source: T) -> Self {
        Self::with_source(ErrorKind::Deserialization, source)
    }

    #[doc(hidden)]
    pub fn authentication(source: CredentialsError) -> Self {
        Self::with_source(ErrorKind::Authentication, source)
    }

    /// A broken connection, or any other transport failure without response
    /// metadata.
    #[doc(hidden)]
    pub fn io<T: Into<BoxError>>(source: T) -> Self {
        Self::with_source(ErrorKind::Transport(Box::default()), source)
    }

    /// A transport failure after the response metadata arrived.
    #[doc(hidden)]
    pub fn transport<T: Into<BoxError>>(headers: HeaderMap, source: T) -> Self {
        let details = TransportDetails {
            headers: Some(headers),
            ..Default::default()
        };
        Self::with_source(ErrorKind::Transport(Box::new(details)), source)
    }

    /// A proxy or load balancer rejected the request with a full HTTP
    /// response, before it reached the service.
    #[doc(hidden)]
    pub fn http(status_code: u16, headers: HeaderMap, payload: bytes::Bytes) -> Self {
        let details = TransportDetails {
            status_code: Some(status_code),
            headers: Some(headers),
            payload: Some(payload),
        };
        Self {
            kind: ErrorKind::Transport(Box::new(details)),
            source: None,
        }
    }

    #[doc(hidden)]
    pub fn other<T: Into<BoxError>>(source: T) -> Self {
        Self::with_source(ErrorKind::Other, source)
    }

    /// The request could not be completed before its deadline.
    ///
    /// The request may or may not have reached the service. Mutate requests
    /// may or may not have been applied.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, ErrorKind::Timeout)
    }

    /// The retry policy stopped retrying before the request succeeded.
    ///
    /// The [source][std::error::Error::source] contains the last error
    /// received, if any.
    pub fn is_exhausted(&self) -> bool {
        matches!(self.kind, ErrorKind::Exhausted)
    }

    /// The request arguments were invalid and the request was not sent.
    pub fn is_binding(&self) -> bool {
        matches!(self.kind, ErrorKind::Binding)
    }

    /// The request could not be encoded. Retrying fails in the same way.
    pub fn is_serialization(&self) -> bool {
        matches!(self.kind, ErrorKind::Serialization)
    }

    /// The response could not be decoded.
    ///
    /// Typically a mismatch between the API version used by the client and
    /// the version served.
    pub fn is_deserialization(&self) -> bool {
        matches!(self.kind, ErrorKind::Deserialization)
    }

    /// Could not create the authentication headers before sending the request.
    ///
    /// This typically indicates a misconfigured OAuth2 client id, secret,
    /// refresh token, or service account key.
    pub fn is_authentication(&self) -> bool {
        matches!(self.kind, ErrorKind::Authentication)
    }

    /// The request did not reach the service, or the response was lost.
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport(_))
    }

    /// The request failed before receiving any response metadata.
    pub fn is_io(&self) -> bool {
        matches!(&self.kind, ErrorKind::Transport(d) if d.headers.is_none() && d.status_code.is_none())
    }

    /// The [Status] returned by the service, if any.
    ///
    /// # Example
    /// ```
    /// use google_ads_gax::error::{Error, rpc::{Code, Status}};
    /// let error = Error::service(Status::default().set_code(Code::NotFound));
    /// if let Some(status) = error.status() {
    ///     assert_eq!(status.code, Code::NotFound);
    /// }
    /// ```
    pub fn status(&self) -> Option<&Status> {
        match &self.kind {
            ErrorKind::Service(d) => Some(&d.status),
            _ => None,
        }
    }

    /// The HTTP status code, if the transport reported one.
    pub fn http_status_code(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Service(d) => d.status_code,
            ErrorKind::Transport(d) => d.status_code,
            _ => None,
        }
    }

    /// The body of an HTTP error response that never reached the service.
    pub fn http_payload(&self) -> Option<&bytes::Bytes> {
        match &self.kind {
            ErrorKind::Transport(d) => d.payload.as_ref(),
            _ => None,
        }
    }

    /// The response headers, or gRPC metadata, associated with this error.
    ///
    /// The Google Ads API returns the request id and the encoded
    /// `GoogleAdsFailure` in the trailing metadata.
    pub fn http_headers(&self) -> Option<&HeaderMap> {
        match &self.kind {
            ErrorKind::Service(d) => d.headers.as_ref(),
            ErrorKind::Transport(d) => d.headers.as_ref(),
            _ => None,
        }
    }

    /// The request id assigned by the service, if the response carried one.
    ///
    /// # Example
    /// ```
    /// use google_ads_gax::error::{Error, rpc::Status};
    /// let mut headers = http::HeaderMap::new();
    /// headers.insert("request-id", http::HeaderValue::from_static("abc123"));
    /// let e = Error::service_with_http_metadata(Status::default(), None, Some(headers));
    /// assert_eq!(e.request_id(), Some("abc123"));
    /// ```
    pub fn request_id(&self) -> Option<&str> {
        self.http_headers()?.get(REQUEST_ID)?.to_str().ok()
    }

    /// Transient authentication problems happen before the RPC starts and are
    /// always safe to retry.
    pub(crate) fn is_transient_and_before_rpc(&self) -> bool {
        if !self.is_authentication() {
            return false;
        }
        self.source
            .as_ref()
            .and_then(|e| e.downcast_ref::<CredentialsError>())
            .is_some_and(CredentialsError::is_transient)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.kind, &self.source) {
            (ErrorKind::Service(_), _) | (_, None) => write!(f, "{}", self.kind),
            (ErrorKind::Exhausted, Some(e)) => write!(f, "{e}"),
            (kind, Some(e)) => write!(f, "{kind}: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error))
    }
}
