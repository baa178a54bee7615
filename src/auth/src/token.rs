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

//! OAuth2 access tokens for the Google Ads API.
//!
//! Both the refresh token flow and the service account flow exchange their
//! secret for a short-lived access token at the OAuth2 token endpoint. The
//! token is sent as `authorization: Bearer {token}` with each request.

use crate::credentials::Result;
use crate::errors::{self, CredentialsError};
use std::time::Duration;
use tokio::time::Instant;

/// Tokens are refreshed this long before they expire.
///
/// Requests may be queued or retried for a while after the `authorization`
/// header is computed. The margin keeps the token valid until the request
/// reaches the service.
pub(crate) const REFRESH_MARGIN: Duration = Duration::from_secs(225);

/// An access token.
#[derive(Clone, PartialEq)]
pub struct Token {
    /// The access token, used in the `authorization` header.
    pub token: String,

    /// The type of the token. The token endpoint returns `Bearer`.
    pub token_type: String,

    /// When the token expires, `None` if it does not.
    ///
    /// The `Instant` is only meaningful in the current process.
    pub expires_at: Option<Instant>,
}

impl Token {
    /// Returns true if the token expires within [REFRESH_MARGIN].
    pub(crate) fn needs_refresh(&self) -> bool {
        self.expires_at
            .is_some_and(|e| e.saturating_duration_since(Instant::now()) <= REFRESH_MARGIN)
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("token", &"[censored]")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// The successful response of the OAuth2 token endpoint.
///
/// Other fields, such as `scope`, are ignored.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    pub token_type: String,
}

impl TokenResponse {
    /// Converts the response into a token, `expires_in` counts from now.
    pub(crate) fn into_token(self) -> Token {
        Token {
            token: self.access_token,
            token_type: self.token_type,
            expires_at: self
                .expires_in
                .map(|secs| Instant::now() + Duration::from_secs(secs)),
        }
    }
}

/// Posts `form` to the OAuth2 token endpoint and parses the new token.
///
/// `context` prefixes the message of HTTP errors. Network errors, and
/// responses that fail to arrive in full, are transient.
pub(crate) async fn exchange(endpoint: &str, form: &[(&str, &str)], context: &str) -> Result<Token> {
    let response = reqwest::Client::new()
        .post(endpoint)
        .form(form)
        .send()
        .await
        .map_err(errors::retryable)?;
    if !response.status().is_success() {
        return Err(errors::from_http_response(response, context).await);
    }
    let response = response
        .json::<TokenResponse>()
        .await
        .map_err(|e| CredentialsError::new(!e.is_decode(), e))?;
    Ok(response.into_token())
}

#[async_trait::async_trait]
pub(crate) trait TokenProvider: std::fmt::Debug + Send + Sync {
    async fn token(&self) -> Result<Token>;
}
