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

//! Google Ads API errors.
//!
//! The Google Ads API returns a `GoogleAdsFailure` with each failed request.
//! The failure lists one or more errors, each with a detailed error code, a
//! message, and the location of the field that caused the error. The failure
//! is sent in the trailing metadata of the response.
//!
//! Use [GoogleAdsException::try_from] to extract the failure from an
//! [Error][crate::Error].
//!
//! # Example
//! ```
//! # use google_ads::error::GoogleAdsException;
//! fn report(e: &google_ads::Error) {
//!     match GoogleAdsException::try_from(e) {
//!         Ok(ex) => {
//!             println!("request {:?} failed with {}", ex.request_id(), ex.code());
//!             for error in ex.errors() {
//!                 println!("  {}: {}", error.location_path(), error.message);
//!             }
//!         }
//!         Err(_) => println!("request failed: {e}"),
//!     }
//! }
//! ```

use crate::ApiVersion;
use crate::model::{GoogleAdsError, GoogleAdsFailure};
use gax::error::rpc::{Code, Status};
use prost::Message;

/// A failed request, with the Google Ads API error details.
#[derive(Clone, Debug, PartialEq)]
pub struct GoogleAdsException {
    status: Status,
    failure: GoogleAdsFailure,
    request_id: Option<String>,
    version: ApiVersion,
}

impl GoogleAdsException {
    /// The gRPC status returned by the service.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// The gRPC status code.
    pub fn code(&self) -> Code {
        self.status.code
    }

    /// The decoded failure.
    pub fn failure(&self) -> &GoogleAdsFailure {
        &self.failure
    }

    /// Consumes the exception, returning the decoded failure.
    pub fn into_failure(self) -> GoogleAdsFailure {
        self.failure
    }

    /// The errors in the failure.
    pub fn errors(&self) -> &[GoogleAdsError] {
        &self.failure.errors
    }

    /// The id assigned to the request by the service.
    ///
    /// Include this value when contacting support.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// The API version of the failure.
    pub fn version(&self) -> ApiVersion {
        self.version
    }
}

impl std::fmt::Display for GoogleAdsException {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "the Google Ads API returned {} with {} error(s), request id: {}",
            self.status.code,
            self.failure.errors.len(),
            self.request_id.as_deref().unwrap_or("unknown")
        )?;
        if let Some(first) = self.failure.errors.first() {
            write!(f, ", first error: {}", first.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for GoogleAdsException {}

/// The reasons an error does not convert into a [GoogleAdsException].
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ConversionError {
    /// The error was not returned by the service, e.g. a connection error.
    #[error("the error was not returned by the service")]
    NotAServiceError,
    /// `INTERNAL` and `RESOURCE_EXHAUSTED` errors are returned unchanged.
    #[error("{0} errors are not converted")]
    Excluded(Code),
    /// The response has no `GoogleAdsFailure` metadata.
    #[error("the error has no Google Ads failure metadata")]
    MissingFailure,
    /// The `GoogleAdsFailure` metadata cannot be decoded.
    #[error("cannot decode the Google Ads failure metadata")]
    Decode(#[source] prost::DecodeError),
}

impl TryFrom<&crate::Error> for GoogleAdsException {
    type Error = ConversionError;

    fn try_from(value: &crate::Error) -> Result<Self, Self::Error> {
        let status = value.status().ok_or(ConversionError::NotAServiceError)?;
        if matches!(status.code, Code::Internal | Code::ResourceExhausted) {
            return Err(ConversionError::Excluded(status.code));
        }
        let headers = value
            .http_headers()
            .ok_or(ConversionError::MissingFailure)?;
        let (version, bytes) = ApiVersion::ALL
            .iter()
            .rev()
            .find_map(|v| {
                gaxi::grpc::binary_metadata(headers, &v.failure_metadata_key()).map(|b| (*v, b))
            })
            .ok_or(ConversionError::MissingFailure)?;
        let failure = GoogleAdsFailure::decode(bytes).map_err(ConversionError::Decode)?;
        let request_id = value.request_id().map(str::to_string);
        Ok(Self {
            status: status.clone(),
            failure,
            request_id,
            version,
        })
    }
}

impl TryFrom<crate::Error> for GoogleAdsException {
    type Error = ConversionError;

    fn try_from(value: crate::Error) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}

/// The message summarizing a failed request in the logs.
///
/// This is the message of the first `GoogleAdsError`, or the status message
/// if the failure cannot be decoded.
pub(crate) fn fault_message(error: &crate::Error) -> String {
    if let Ok(ex) = GoogleAdsException::try_from(error) {
        if let Some(first) = ex.errors().first() {
            return first.message.clone();
        }
    }
    match error.status() {
        Some(status) => status.message.clone(),
        None => error.to_string(),
    }
}
