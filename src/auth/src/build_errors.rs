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

//! Errors created while building credentials.
//!
//! The Google Ads API accepts two kinds of credentials: an OAuth2 refresh
//! token from the installed application flow, and a service account key file.
//! These errors report invalid settings for either kind. They are detected
//! before any token is requested.

use std::path::PathBuf;

/// The error type for the [Credentials] builders.
///
/// [Credentials]: crate::credentials::Credentials
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The service account key file cannot be read.
    #[error("cannot read the service account key file `{}`: {source}", .path.display())]
    Loading {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The service account key is not valid JSON, or lacks a required field.
    #[error("cannot parse the service account key: {0}")]
    Parsing(#[source] serde_json::Error),

    /// The key file holds some other kind of credentials.
    #[error("the key file has type `{0}`, the Google Ads API requires a `service_account` key")]
    WrongKeyType(String),

    /// A field of the OAuth2 installed application flow is empty.
    #[error("the OAuth2 refresh token flow requires a non-empty `{0}`")]
    MissingField(&'static str),
}

impl Error {
    /// A problem finding or opening the key file.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// A problem parsing the service account key.
    pub fn is_parsing(&self) -> bool {
        matches!(self, Self::Parsing(_) | Self::WrongKeyType(_))
    }

    /// A required OAuth2 field is empty.
    pub fn is_missing_field(&self) -> bool {
        matches!(self, Self::MissingField(_))
    }

    pub(crate) fn loading<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Loading {
            path: path.into(),
            source,
        }
    }
}
