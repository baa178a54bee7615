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

//! The Google Ads specific request metadata.

use crate::config::Config;
use gax::options::{LINKED_CUSTOMER_ID, LOGIN_CUSTOMER_ID, RequestOptions};

pub(crate) const DEVELOPER_TOKEN: &str = "developer-token";

const REDACTED: &str = "REDACTED";

/// The metadata sent with every request.
#[derive(Clone, Default, PartialEq)]
pub(crate) struct AdsMetadata {
    developer_token: Option<String>,
    login_customer_id: Option<String>,
    linked_customer_id: Option<String>,
}

impl std::fmt::Debug for AdsMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.headers(true)).finish()
    }
}

impl AdsMetadata {
    pub(crate) fn from_config(config: &Config) -> Self {
        // Accounts using their Google Cloud organization for API access do
        // not send a developer token.
        let developer_token = Some(config.developer_token.clone())
            .filter(|_| !config.use_cloud_org_for_api_access)
            .filter(|t| !t.is_empty());
        Self {
            developer_token,
            login_customer_id: config.login_customer_id.clone(),
            linked_customer_id: config.linked_customer_id.clone(),
        }
    }

    /// The metadata entries, with the developer token masked if `redact` is
    /// set.
    pub(crate) fn headers(&self, redact: bool) -> Vec<(&'static str, &str)> {
        let token = self
            .developer_token
            .as_deref()
            .map(|t| if redact { REDACTED } else { t });
        [
            (DEVELOPER_TOKEN, token),
            (LOGIN_CUSTOMER_ID, self.login_customer_id.as_deref()),
            (LINKED_CUSTOMER_ID, self.linked_customer_id.as_deref()),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v)))
        .collect()
    }

    /// Adds the metadata to the request options.
    ///
    /// Metadata already present in the options takes precedence.
    pub(crate) fn apply(&self, mut options: RequestOptions) -> RequestOptions {
        for (key, value) in self.headers(false) {
            if options.headers().iter().any(|(k, _)| k.eq_ignore_ascii_case(key)) {
                continue;
            }
            options.insert_header(key, value);
        }
        options
    }
}

/// Formats request options metadata for logging, with the developer token
/// masked.
pub(crate) fn redacted_headers(options: &RequestOptions, metadata: &AdsMetadata) -> Vec<(String, String)> {
    let mut headers = metadata
        .headers(true)
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<Vec<_>>();
    for (k, v) in options.headers() {
        let v = if k.eq_ignore_ascii_case(DEVELOPER_TOKEN) {
            REDACTED.to_string()
        } else {
            v.clone()
        };
        headers.retain(|(key, _)| !key.eq_ignore_ascii_case(k));
        headers.push((k.clone(), v));
    }
    headers
}
