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

//! Types and functions to work with Google Ads API credentials.
//!
//! The Google Ads API accepts OAuth2 access tokens with the
//! `https://www.googleapis.com/auth/adwords` scope. Most applications use
//! an OAuth2 refresh token obtained through the installed application flow,
//! see [user_account]. Server to server applications may use a service
//! account key, see [service_account].

pub mod anonymous;
pub mod service_account;
pub mod user_account;

use crate::errors::CredentialsError;
use http::HeaderMap;
use std::future::Future;
use std::sync::Arc;

/// The result type for credentials operations.
pub type Result<T> = std::result::Result<T, CredentialsError>;

/// An implementation of [crate::credentials::CredentialsProvider].
///
/// Represents a [Credentials] used to obtain the auth request headers.
///
/// `Credentials` are cheap to clone, all the clones share the same token
/// cache.
///
/// # Example
/// ```
/// # use google_ads_auth::credentials::anonymous::Builder;
/// # tokio_test::block_on(async {
/// let credentials = Builder::new().build();
/// let headers = credentials.headers().await?;
/// assert!(headers.is_empty());
/// # Ok::<(), google_ads_auth::errors::CredentialsError>(())
/// # });
/// ```
#[derive(Clone, Debug)]
pub struct Credentials {
    inner: Arc<dyn dynamic::CredentialsProvider>,
}

impl<T> From<T> for Credentials
where
    T: CredentialsProvider + Send + Sync + 'static,
{
    fn from(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }
}

impl Credentials {
    /// Returns the headers used to authenticate a request.
    ///
    /// Fetches a new access token when the cached token is missing or
    /// expired.
    pub async fn headers(&self) -> Result<HeaderMap> {
        self.inner.headers().await
    }
}

/// Represents a source of authentication headers.
///
/// Implement this trait to use an authentication flow this crate does not
/// support, or to mock credentials in tests.
pub trait CredentialsProvider: std::fmt::Debug {
    /// Asynchronously constructs the auth headers.
    fn headers(&self) -> impl Future<Output = Result<HeaderMap>> + Send;
}

pub(crate) mod dynamic {
    use super::Result;
    use http::HeaderMap;

    /// A dyn-compatible, crate-private version of `CredentialsProvider`.
    #[async_trait::async_trait]
    pub trait CredentialsProvider: Send + Sync + std::fmt::Debug {
        async fn headers(&self) -> Result<HeaderMap>;
    }

    #[async_trait::async_trait]
    impl<T> CredentialsProvider for T
    where
        T: super::CredentialsProvider + Send + Sync,
    {
        async fn headers(&self) -> Result<HeaderMap> {
            T::headers(self).await
        }
    }
}
