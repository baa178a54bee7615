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

//! Types shared by the client builders.
//!
//! Applications do not use these types directly. Each client defines a
//! `builder()` function returning the right builder type.

use crate::backoff_policy::BackoffPolicy;
use crate::retry_policy::RetryPolicy;
use std::sync::Arc;

/// The result of building a client.
pub type Result<T> = std::result::Result<T, Error>;

/// Indicates a problem while building a client.
///
/// # Example
/// ```
/// # use google_ads_gax::client_builder::Error;
/// let e = Error::config("missing developer token");
/// assert!(e.is_config());
/// ```
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct Error(ErrorKind);

impl Error {
    /// The client could not create its credentials.
    pub fn is_credentials(&self) -> bool {
        matches!(&self.0, ErrorKind::Credentials(_))
    }

    /// The client could not initialize its transport, for example, because the
    /// endpoint is not a valid URI.
    pub fn is_transport(&self) -> bool {
        matches!(&self.0, ErrorKind::Transport(_))
    }

    /// The client configuration is invalid.
    pub fn is_config(&self) -> bool {
        matches!(&self.0, ErrorKind::Config(_))
    }

    #[doc(hidden)]
    pub fn cred<T: Into<BoxError>>(source: T) -> Self {
        Self(ErrorKind::Credentials(source.into()))
    }

    #[doc(hidden)]
    pub fn transport<T: Into<BoxError>>(source: T) -> Self {
        Self(ErrorKind::Transport(source.into()))
    }

    #[doc(hidden)]
    pub fn config<T: Into<BoxError>>(source: T) -> Self {
        Self(ErrorKind::Config(source.into()))
    }
}

#[derive(thiserror::Error, Debug)]
enum ErrorKind {
    #[error("could not create the credentials: {0}")]
    Credentials(#[source] BoxError),
    #[error("could not initialize transport client: {0}")]
    Transport(#[source] BoxError),
    #[error("invalid client configuration: {0}")]
    Config(#[source] BoxError),
}

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[doc(hidden)]
pub mod internal {
    use super::*;

    /// Configuration shared by all the transports.
    #[derive(Clone, Debug)]
    pub struct ClientConfig<Cr> {
        pub endpoint: Option<String>,
        pub universe_domain: Option<String>,
        pub cred: Option<Cr>,
        pub client_certificate: Option<ClientCertificate>,
        pub proxy: Option<String>,
        pub tracing: bool,
        pub retry_policy: Option<Arc<dyn RetryPolicy>>,
        pub backoff_policy: Option<Arc<dyn BackoffPolicy>>,
    }

    impl<Cr> Default for ClientConfig<Cr> {
        fn default() -> Self {
            Self {
                endpoint: None,
                universe_domain: None,
                cred: None,
                client_certificate: None,
                proxy: None,
                tracing: false,
                retry_policy: None,
                backoff_policy: None,
            }
        }
    }

    /// A PEM encoded client certificate and private key, used for mTLS.
    #[derive(Clone)]
    pub struct ClientCertificate {
        pub cert_pem: Vec<u8>,
        pub key_pem: Vec<u8>,
    }

    impl std::fmt::Debug for ClientCertificate {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("ClientCertificate")
                .field("cert_pem", &format!("[{} bytes]", self.cert_pem.len()))
                .field("key_pem", &"[censored]")
                .finish()
        }
    }
}
