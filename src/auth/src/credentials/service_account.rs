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

//! [Service Account] Credentials type.
//!
//! A service account is an account for an application instead of an
//! individual end user. Google Ads API applications may use service accounts
//! when they have access to the Google Ads accounts, either directly or
//! through domain-wide delegation. With domain-wide delegation set the
//! [impersonated email][Builder::with_impersonated_email] to the user whose
//! Ads accounts the application manages.
//!
//! Services account keys should be treated as any other secret with security
//! implications. Think of them as unencrypted passwords. Do not store them
//! where unauthorized persons or programs may read them.
//!
//! These credentials sign a JWT assertion with the service account key and
//! exchange it for an access token, see [RFC 7523].
//!
//! Example usage:
//!
//! ```
//! # use google_ads_auth::credentials::service_account::Builder;
//! let key = serde_json::json!({
//!     "client_email": "test-client-email",
//!     "private_key_id": "test-private-key-id",
//!     "private_key": "", // <-- Provide valid PKCS#8 PEM key here
//!     "project_id": "test-project-id",
//! });
//! let credentials = Builder::new(key)
//!     .with_impersonated_email("user@example.com")
//!     .build()?;
//! # Ok::<(), google_ads_auth::build_errors::Error>(())
//! ```
//!
//! [RFC 7523]: https://datatracker.ietf.org/doc/html/rfc7523
//! [Service Account]: https://cloud.google.com/iam/docs/service-account-overview

mod jws;

use crate::build_errors::Error as BuilderError;
use crate::constants::{ADWORDS_SCOPE, JWT_BEARER_GRANT_TYPE, OAUTH2_TOKEN_SERVER_URL};
use crate::credentials::{Credentials, Result};
use crate::errors;
use crate::headers_util::BearerCredentials;
use crate::token::{self, Token, TokenProvider};
use base64::prelude::{BASE64_URL_SAFE_NO_PAD, Engine as _};
use jws::{CLOCK_SKEW_FUDGE, DEFAULT_TOKEN_TIMEOUT, JwsClaims, JwsHeader};
use rustls::crypto::KeyProvider;
use rustls::sign::Signer;
use rustls_pki_types::PrivateKeyDer;
use rustls_pki_types::pem::PemObject;
use serde_json::Value;
use std::path::Path;
use time::OffsetDateTime;

/// A builder for constructing service account [Credentials] instances.
///
/// # Example
/// ```
/// # use google_ads_auth::credentials::service_account::Builder;
/// let key = serde_json::json!({
///     "client_email": "test-client-email",
///     "private_key_id": "test-private-key-id",
///     "private_key": "<YOUR_PKCS8_PEM_KEY_HERE>",
/// });
/// let credentials = Builder::new(key).build();
/// assert!(credentials.is_ok());
/// ```
pub struct Builder {
    service_account_key: Value,
    impersonated_email: Option<String>,
    scopes: Option<Vec<String>>,
    token_uri: Option<String>,
}

impl Builder {
    /// Creates a new builder using the contents of a service account key.
    pub fn new(service_account_key: Value) -> Self {
        Self {
            service_account_key,
            impersonated_email: None,
            scopes: None,
            token_uri: None,
        }
    }

    /// Creates a new builder using the service account key stored in `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::result::Result<Self, BuilderError> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| BuilderError::loading(path, e))?;
        let value = serde_json::from_str::<Value>(&contents).map_err(BuilderError::Parsing)?;
        Ok(Self::new(value))
    }

    /// Sets the user impersonated by the service account.
    ///
    /// Requires [domain-wide delegation] for the service account.
    ///
    /// [domain-wide delegation]: https://developers.google.com/identity/protocols/oauth2/service-account#delegatingauthority
    pub fn with_impersonated_email<S: Into<String>>(mut self, email: S) -> Self {
        self.impersonated_email = Some(email.into());
        self
    }

    /// Sets the [scopes] for these credentials.
    ///
    /// Defaults to `https://www.googleapis.com/auth/adwords`.
    ///
    /// [scopes]: https://developers.google.com/identity/protocols/oauth2/scopes
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = Some(scopes.into_iter().map(|s| s.into()).collect());
        self
    }

    /// Overrides the token endpoint.
    ///
    /// Defaults to the `token_uri` in the key, or
    /// `https://oauth2.googleapis.com/token` if the key does not have one.
    pub fn with_token_uri<S: Into<String>>(mut self, token_uri: S) -> Self {
        self.token_uri = Some(token_uri.into());
        self
    }

    fn build_token_provider(self) -> std::result::Result<ServiceAccountTokenProvider, BuilderError> {
        let service_account_key =
            serde_json::from_value::<ServiceAccountKey>(self.service_account_key)
                .map_err(BuilderError::Parsing)?;
        if let Some(t) = service_account_key
            .key_type
            .as_deref()
            .filter(|t| *t != "service_account")
        {
            return Err(BuilderError::WrongKeyType(t.to_string()));
        }
        let token_uri = self
            .token_uri
            .or_else(|| service_account_key.token_uri.clone())
            .unwrap_or_else(|| OAUTH2_TOKEN_SERVER_URL.to_string());
        let scopes = self
            .scopes
            .map(|s| s.join(" "))
            .unwrap_or_else(|| ADWORDS_SCOPE.to_string());
        Ok(ServiceAccountTokenProvider {
            service_account_key,
            impersonated_email: self.impersonated_email,
            scopes,
            token_uri,
        })
    }

    /// Returns a [Credentials] instance with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns a [BuilderError] if the key is not a valid service account
    /// key. The private key is only parsed when a token is needed.
    pub fn build(self) -> std::result::Result<Credentials, BuilderError> {
        let provider = self.build_token_provider()?;
        Ok(Credentials::from(BearerCredentials::new(provider)))
    }
}

/// A representation of a [service account key].
///
/// [service account key]: https://cloud.google.com/iam/docs/keys-create-delete#creating
#[derive(serde::Deserialize, Default, Clone)]
pub(crate) struct ServiceAccountKey {
    /// Always `service_account` for service account keys.
    #[serde(default, rename = "type")]
    pub key_type: Option<String>,
    /// The client email address of the service account.
    pub client_email: String,
    /// ID of the service account's private key.
    pub private_key_id: String,
    /// The PEM-encoded PKCS#8 private key string.
    pub private_key: String,
    /// The project id the service account belongs to.
    #[serde(default)]
    pub project_id: Option<String>,
    /// The token endpoint.
    #[serde(default)]
    pub token_uri: Option<String>,
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("private_key", &"[censored]")
            .field("project_id", &self.project_id)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

impl ServiceAccountKey {
    // Creates a signer using the private key stored in the service account key.
    fn signer(&self) -> Result<Box<dyn Signer>> {
        let key_provider = key_provider()?;
        let pk = PrivateKeyDer::from_pem_slice(self.private_key.as_bytes())
            .map_err(errors::non_retryable)?;
        let sk = key_provider
            .load_private_key(pk)
            .map_err(errors::non_retryable)?;
        sk.choose_scheme(&[rustls::SignatureScheme::RSA_PKCS1_SHA256])
            .ok_or_else(|| errors::non_retryable_from_str("unable to choose RSA_SHA256 signing scheme"))
    }
}

fn key_provider() -> Result<&'static dyn KeyProvider> {
    if let Some(provider) = rustls::crypto::CryptoProvider::get_default() {
        return Ok(provider.key_provider);
    }
    default_key_provider().ok_or_else(|| {
        errors::non_retryable_from_str(
            "no rustls crypto provider installed, call `rustls::crypto::CryptoProvider::install_default()`",
        )
    })
}

#[cfg(feature = "default-rustls-provider")]
fn default_key_provider() -> Option<&'static dyn KeyProvider> {
    Some(rustls::crypto::aws_lc_rs::default_provider().key_provider)
}

#[cfg(not(feature = "default-rustls-provider"))]
fn default_key_provider() -> Option<&'static dyn KeyProvider> {
    None
}

#[derive(Debug)]
struct ServiceAccountTokenProvider {
    service_account_key: ServiceAccountKey,
    impersonated_email: Option<String>,
    scopes: String,
    token_uri: String,
}

impl ServiceAccountTokenProvider {
    fn assertion(&self) -> Result<String> {
        let signer = self.service_account_key.signer()?;
        let now = OffsetDateTime::now_utc() - CLOCK_SKEW_FUDGE;
        let claims = JwsClaims {
            iss: self.service_account_key.client_email.clone(),
            scope: self.scopes.clone(),
            aud: self.token_uri.clone(),
            exp: now + DEFAULT_TOKEN_TIMEOUT,
            iat: now,
            sub: self.impersonated_email.clone(),
        };
        let header = JwsHeader {
            alg: "RS256",
            typ: "JWT",
            kid: Some(self.service_account_key.private_key_id.clone()),
        };
        let encoded = format!("{}.{}", header.encode()?, claims.encode()?);
        let sig = signer
            .sign(encoded.as_bytes())
            .map_err(errors::non_retryable)?;
        Ok(format!("{encoded}.{}", BASE64_URL_SAFE_NO_PAD.encode(sig)))
    }
}

#[async_trait::async_trait]
impl TokenProvider for ServiceAccountTokenProvider {
    async fn token(&self) -> Result<Token> {
        let assertion = self.assertion()?;
        let form = [
            ("grant_type", JWT_BEARER_GRANT_TYPE),
            ("assertion", assertion.as_str()),
        ];
        token::exchange(&self.token_uri, &form, "cannot exchange the assertion").await
    }
}
