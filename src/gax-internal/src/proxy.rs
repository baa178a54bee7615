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
//! Connects the gRPC channel through an HTTP proxy.
//!
//! The proxy is given as `[http://][user:password@]host[:port]`. The channel
//! opens a `CONNECT` tunnel to the service endpoint and runs TLS over it, so
//! the proxy never sees the requests.

use base64::prelude::{BASE64_STANDARD, Engine as _};
use http::{HeaderValue, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::connect::proxy::Tunnel;

/// An invalid proxy configuration.
#[derive(thiserror::Error, Debug)]
pub enum ProxyError {
    #[error("cannot parse the proxy URI `{0}`")]
    InvalidUri(String, #[source] http::uri::InvalidUri),
    #[error("unsupported scheme in proxy URI `{0}`, only `http` proxies are supported")]
    UnsupportedScheme(String),
    #[error("the proxy URI `{0}` has no host")]
    MissingHost(String),
    #[error("the proxy credentials are not valid header characters")]
    InvalidCredentials(#[source] http::header::InvalidHeaderValue),
}

/// Where to connect, and how to authenticate with the proxy.
#[derive(Debug, PartialEq)]
pub(crate) struct ProxyTarget {
    pub(crate) uri: Uri,
    pub(crate) authorization: Option<HeaderValue>,
}

impl ProxyTarget {
    pub(crate) fn parse(proxy: &str) -> Result<Self, ProxyError> {
        let full = if proxy.contains("://") {
            proxy.to_string()
        } else {
            format!("http://{proxy}")
        };
        let uri = full
            .parse::<Uri>()
            .map_err(|e| ProxyError::InvalidUri(proxy.to_string(), e))?;
        if uri.scheme_str() != Some("http") {
            return Err(ProxyError::UnsupportedScheme(proxy.to_string()));
        }
        let authority = uri
            .authority()
            .map(|a| a.as_str())
            .ok_or_else(|| ProxyError::MissingHost(proxy.to_string()))?;
        let (userinfo, host) = match authority.rsplit_once('@') {
            Some((u, h)) => (Some(u), h),
            None => (None, authority),
        };
        if host.is_empty() || host.starts_with(':') {
            return Err(ProxyError::MissingHost(proxy.to_string()));
        }
        let uri = format!("http://{host}")
            .parse::<Uri>()
            .map_err(|e| ProxyError::InvalidUri(proxy.to_string(), e))?;
        let authorization = userinfo.map(basic_auth).transpose()?;
        Ok(Self { uri, authorization })
    }

    /// A connector that tunnels each connection through the proxy.
    pub(crate) fn connector(self) -> Tunnel<HttpConnector> {
        let mut http = HttpConnector::new();
        http.set_nodelay(true);
        let tunnel = Tunnel::new(self.uri, http);
        match self.authorization {
            None => tunnel,
            Some(auth) => tunnel.with_auth(auth),
        }
    }
}

fn basic_auth(userinfo: &str) -> Result<HeaderValue, ProxyError> {
    let decoded = percent_encoding::percent_decode_str(userinfo).decode_utf8_lossy();
    let encoded = BASE64_STANDARD.encode(decoded.as_bytes());
    let mut value =
        HeaderValue::from_str(&format!("Basic {encoded}")).map_err(ProxyError::InvalidCredentials)?;
    value.set_sensitive(true);
    Ok(value)
}
