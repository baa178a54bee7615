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
//! Credentials for an OAuth2 refresh token.
//!
//! Most Google Ads API applications act on behalf of a user with access to
//! the Google Ads accounts. The application obtains a refresh token once,
//! through the installed application or the web application flow, and keeps
//! it in its configuration together with the OAuth2 client id and secret.
//! These credentials trade the refresh token for access tokens as needed.
//!
//! Obtaining the refresh token is outside the scope of this crate, see
//! [RFC 6749 Section 6].
//!
//! ```
//! # use google_ads_auth::credentials::user_account::Builder;
//! # use google_ads_auth::credentials::Credentials;
//! let credentials: Credentials = Builder::new(
//!     "YOUR_CLIENT_ID.apps.googleusercontent.com",
//!     "YOUR_CLIENT_SECRET",
//!     "YOUR_REFRESH_TOKEN",
//! )
//! .build()?;
//! # Ok::<(), google_ads_auth::build_errors::Error>(())
//! ```
//!
//! [RFC 6749 Section 6]: https://datatracker.ietf.org/doc/html/rfc6749#section-6

use crate::build_errors::Error as BuilderError;
use crate::constants::OAUTH2_TOKEN_SERVER_URL;
use crate::credentials::{Credentials, Result};
use crate::headers_util::BearerCredentials;
use crate::token::{self, Token, TokenProvider};

/// Builds refresh token [Credentials].
///
/// # Example
/// ```
/// # use google_ads_auth::credentials::user_account::Builder;
/// let credentials = Builder::new("test-client-id", "test-client-secret", "test-refresh-token")
///     .with_token_uri("https://oauth2-fake.googleapis.com/token")
///     .build();
/// assert!(credentials.is_ok());
/// ```
pub struct Builder {
    refresh: RefreshTokenProvider,
}

impl Builder {
    pub fn new<I, S, R>(client_id: I, client_secret: S, refresh_token: R) -> Self
    where
        I: Into<String>,
        S: Into<String>,
        R: Into<String>,
    {
        Self {
            refresh: RefreshTokenProvider {
                client_id: client_id.into(),
                client_secret: client_secret.into(),
                refresh_token: refresh_token.into(),
                token_uri: OAUTH2_TOKEN_SERVER_URL.to_string(),
                scope: None,
            },
        }
    }

    /// Overrides the token endpoint, `https://oauth2.googleapis.com/token`
    /// by default.
    pub fn with_token_uri<S: Into<String>>(mut self, token_uri: S) -> Self {
        self.refresh.token_uri = token_uri.into();
        self
    }

    /// Narrows the [scopes] of the access tokens.
    ///
    /// By default the access tokens carry all the scopes granted to the
    /// refresh token.
    ///
    /// [scopes]: https://developers.google.com/identity/protocols/oauth2/scopes
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let scopes: Vec<String> = scopes.into_iter().map(Into::into).collect();
        self.refresh.scope = Some(scopes.join(" "));
        self
    }

    /// Returns the credentials, or an error naming the first empty field.
    pub fn build(self) -> std::result::Result<Credentials, BuilderError> {
        let r = &self.refresh;
        for (name, value) in [
            ("client_id", &r.client_id),
            ("client_secret", &r.client_secret),
            ("refresh_token", &r.refresh_token),
        ] {
            if value.is_empty() {
                return Err(BuilderError::MissingField(name));
            }
        }
        Ok(Credentials::from(BearerCredentials::new(self.refresh)))
    }
}

#[derive(PartialEq)]
struct RefreshTokenProvider {
    client_id: String,
    client_secret: String,
    refresh_token: String,
    token_uri: String,
    scope: Option<String>,
}

impl RefreshTokenProvider {
    fn form(&self) -> Vec<(&'static str, &str)> {
        let mut form = vec![
            ("grant_type", "refresh_token"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", self.refresh_token.as_str()),
        ];
        if let Some(scope) = &self.scope {
            form.push(("scope", scope.as_str()));
        }
        form
    }
}

impl std::fmt::Debug for RefreshTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshTokenProvider")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[censored]")
            .field("refresh_token", &"[censored]")
            .field("token_uri", &self.token_uri)
            .field("scope", &self.scope)
            .finish()
    }
}

#[async_trait::async_trait]
impl TokenProvider for RefreshTokenProvider {
    async fn token(&self) -> Result<Token> {
        token::exchange(
            &self.token_uri,
            &self.form(),
            "cannot refresh the access token",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenResponse;
    use http::header::{AUTHORIZATION, HeaderValue};
    use httptest::matchers::{all_of, contains, not, request, url_decoded};
    use httptest::responders::{json_encoded, status_code};
    use httptest::{Expectation, Server};
    use std::error::Error as _;
    use test_case::test_case;

    type TestResult = anyhow::Result<()>;

    fn builder(server: &Server) -> Builder {
        Builder::new("test-client-id", "test-client-secret", "1//test-refresh-token")
            .with_token_uri(server.url("/token").to_string())
    }

    fn response() -> TokenResponse {
        TokenResponse {
            access_token: "ya29.test-access-token".to_string(),
            expires_in: Some(3599),
            token_type: "Bearer".to_string(),
        }
    }

    #[test]
    fn debug_hides_secrets() {
        let builder = Builder::new("test-client-id", "test-client-secret", "1//refresh");
        let fmt = format!("{:?}", builder.refresh);
        assert!(fmt.contains("test-client-id"), "{fmt}");
        assert!(!fmt.contains("test-client-secret"), "{fmt}");
        assert!(!fmt.contains("1//refresh"), "{fmt}");
        assert!(fmt.contains(OAUTH2_TOKEN_SERVER_URL), "{fmt}");
    }

    #[test_case("", "s", "r", "client_id")]
    #[test_case("c", "", "r", "client_secret")]
    #[test_case("c", "s", "", "refresh_token")]
    fn build_missing_field(id: &str, secret: &str, refresh: &str, field: &str) {
        let e = Builder::new(id, secret, refresh).build().unwrap_err();
        assert!(e.is_missing_field(), "{e:?}");
        assert!(e.to_string().contains(field), "{e}");
    }

    #[test]
    fn form_fields() {
        let builder = Builder::new("id", "secret", "refresh");
        assert_eq!(
            builder.refresh.form(),
            vec![
                ("grant_type", "refresh_token"),
                ("client_id", "id"),
                ("client_secret", "secret"),
                ("refresh_token", "refresh"),
            ]
        );
        let builder = builder.with_scopes([crate::constants::ADWORDS_SCOPE]);
        assert_eq!(
            builder.refresh.form().last(),
            Some(&("scope", crate::constants::ADWORDS_SCOPE))
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn refresh_and_cache() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/token"),
                request::body(url_decoded(contains(("grant_type", "refresh_token")))),
                request::body(url_decoded(contains(("client_id", "test-client-id")))),
                request::body(url_decoded(contains(("client_secret", "test-client-secret")))),
                request::body(url_decoded(contains(("refresh_token", "1//test-refresh-token")))),
                request::body(url_decoded(not(contains(("scope", httptest::matchers::any()))))),
            ])
            .times(1)
            .respond_with(json_encoded(response())),
        );

        let credentials = builder(&server).build()?;
        for _ in 0..2 {
            let headers = credentials.headers().await?;
            assert_eq!(
                headers.get(AUTHORIZATION),
                Some(&HeaderValue::from_static("Bearer ya29.test-access-token"))
            );
        }
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn refresh_with_scopes() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/token"),
                request::body(url_decoded(contains(("scope", "scope1 scope2")))),
            ])
            .respond_with(json_encoded(response())),
        );

        let credentials = builder(&server)
            .with_scopes(["scope1", "scope2"])
            .build()?;
        let headers = credentials.headers().await?;
        assert!(headers.contains_key(AUTHORIZATION), "{headers:?}");
        Ok(())
    }

    #[test_case(503, "try again", true)]
    #[test_case(400, "invalid_grant", false)]
    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn refresh_http_error(code: u16, body: &'static str, transient: bool) -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::path("/token"))
                .respond_with(status_code(code).body(body)),
        );

        let credentials = builder(&server).build()?;
        let e = credentials.headers().await.unwrap_err();
        assert_eq!(e.is_transient(), transient, "{e}");
        assert!(e.to_string().contains(body), "{e}");
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn malformed_response_is_permanent() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::path("/token"))
                .respond_with(status_code(200).body("bad json")),
        );

        let credentials = builder(&server).build()?;
        let e = credentials.headers().await.unwrap_err();
        assert!(!e.is_transient(), "{e}");
        assert!(e.source().is_some(), "{e:?}");
        Ok(())
    }
}
