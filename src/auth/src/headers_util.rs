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
use crate::credentials::{CredentialsProvider, Result};
use crate::errors;
use crate::token::{Token, TokenProvider};
use crate::token_cache::TokenCache;
use http::HeaderMap;
use http::header::{AUTHORIZATION, HeaderValue};

/// Builds the `authorization` header for a token.
///
/// The value is marked as sensitive, `http` omits it from `Debug` output.
pub(crate) fn build_bearer_headers(token: &Token) -> Result<HeaderMap> {
    let mut value = HeaderValue::from_str(&format!("{} {}", token.token_type, token.token))
        .map_err(errors::non_retryable)?;
    value.set_sensitive(true);
    let mut headers = HeaderMap::with_capacity(1);
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

/// Credentials sending a cached OAuth2 access token.
///
/// Both the refresh token and the service account flows produce these.
#[derive(Debug)]
pub(crate) struct BearerCredentials<T> {
    tokens: TokenCache<T>,
}

impl<T: TokenProvider> BearerCredentials<T> {
    pub(crate) fn new(provider: T) -> Self {
        Self {
            tokens: TokenCache::new(provider),
        }
    }
}

impl<T: TokenProvider + 'static> CredentialsProvider for BearerCredentials<T> {
    async fn headers(&self) -> Result<HeaderMap> {
        let token = self.tokens.token().await?;
        build_bearer_headers(&token)
    }
}
