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

//! Endpoint selection for TLS and mutual TLS (mTLS).
//!
//! Three environment variables control the endpoint:
//!
//! * `GOOGLE_API_USE_CLIENT_CERTIFICATE`: `true` or `false` (the default).
//!   When `true`, a client certificate configured in the client builder is
//!   presented to the service.
//! * `GOOGLE_API_USE_MTLS_ENDPOINT`: `never`, `auto` (the default), or
//!   `always`. With `auto` the mTLS endpoint is used only when a client
//!   certificate is in use.
//! * `GOOGLE_CLOUD_UNIVERSE_DOMAIN`: the universe domain, `googleapis.com` by
//!   default.

use std::str::FromStr;

pub const USE_CLIENT_CERTIFICATE_VAR: &str = "GOOGLE_API_USE_CLIENT_CERTIFICATE";
pub const USE_MTLS_ENDPOINT_VAR: &str = "GOOGLE_API_USE_MTLS_ENDPOINT";
pub const UNIVERSE_DOMAIN_VAR: &str = "GOOGLE_CLOUD_UNIVERSE_DOMAIN";
pub const DEFAULT_UNIVERSE: &str = "googleapis.com";

/// Problems selecting the endpoint.
#[derive(Debug, thiserror::Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error(
        "Environment variable `GOOGLE_API_USE_CLIENT_CERTIFICATE` must be either `true` or `false`"
    )]
    InvalidUseClientCertificate(String),
    #[error(
        "Environment variable `GOOGLE_API_USE_MTLS_ENDPOINT` must be `never`, `auto` or `always`"
    )]
    InvalidUseMtlsEndpoint(String),
    #[error("Universe Domain cannot be an empty string.")]
    EmptyUniverseDomain,
    #[error("mTLS is not supported in any universe other than {DEFAULT_UNIVERSE}.")]
    MtlsOutsideDefaultUniverse(String),
}

/// When to use the mTLS endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum UseMtlsEndpoint {
    Never,
    #[default]
    Auto,
    Always,
}

impl FromStr for UseMtlsEndpoint {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "never" => Ok(Self::Never),
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            _ => Err(Error::InvalidUseMtlsEndpoint(s.to_string())),
        }
    }
}

/// The endpoint related settings found in the environment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Environment {
    pub use_client_certificate: bool,
    pub use_mtls_endpoint: UseMtlsEndpoint,
    pub universe_domain: Option<String>,
}

impl Environment {
    /// Reads and validates the environment variables.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_values(
            std::env::var(USE_CLIENT_CERTIFICATE_VAR).ok().as_deref(),
            std::env::var(USE_MTLS_ENDPOINT_VAR).ok().as_deref(),
            std::env::var(UNIVERSE_DOMAIN_VAR).ok(),
        )
    }

    fn from_values(
        use_client_certificate: Option<&str>,
        use_mtls_endpoint: Option<&str>,
        universe_domain: Option<String>,
    ) -> Result<Self, Error> {
        let use_client_certificate = match use_client_certificate.map(str::to_lowercase) {
            None => false,
            Some(v) if v == "true" => true,
            Some(v) if v == "false" => false,
            Some(v) => return Err(Error::InvalidUseClientCertificate(v)),
        };
        let use_mtls_endpoint = use_mtls_endpoint
            .map(UseMtlsEndpoint::from_str)
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            use_client_certificate,
            use_mtls_endpoint,
            universe_domain,
        })
    }
}

/// Converts an endpoint to its mTLS variant.
///
/// `*.googleapis.com` becomes `*.mtls.googleapis.com` and
/// `*.sandbox.googleapis.com` becomes `*.mtls.sandbox.googleapis.com`.
/// Endpoints that are already mTLS, or are not in a Google domain, are
/// returned unchanged.
///
/// # Example
/// ```
/// # use google_ads_gax_internal::mtls::default_mtls_endpoint;
/// assert_eq!(default_mtls_endpoint("googleads.googleapis.com"), "googleads.mtls.googleapis.com");
/// assert_eq!(default_mtls_endpoint("localhost:8080"), "localhost:8080");
/// ```
pub fn default_mtls_endpoint(endpoint: &str) -> String {
    let Some((name, domain)) = endpoint.split_once('.') else {
        return endpoint.to_string();
    };
    if name.is_empty() {
        return endpoint.to_string();
    }
    let (mtls, domain) = match domain.strip_prefix("mtls.") {
        Some(d) => (true, d),
        None => (false, domain),
    };
    let (sandbox, domain) = match domain.strip_prefix("sandbox.") {
        Some(d) => (true, d),
        None => (false, domain),
    };
    if mtls || !domain.starts_with("googleapis.com") {
        return endpoint.to_string();
    }
    if sandbox {
        return endpoint.replacen("sandbox.googleapis.com", "mtls.sandbox.googleapis.com", 1);
    }
    endpoint.replacen(".googleapis.com", ".mtls.googleapis.com", 1)
}

/// Returns the universe domain, preferring the client configuration over the
/// environment.
pub fn universe_domain(configured: Option<&str>, env: Option<&str>) -> Result<String, Error> {
    let domain = configured.or(env).unwrap_or(DEFAULT_UNIVERSE);
    if domain.trim().is_empty() {
        return Err(Error::EmptyUniverseDomain);
    }
    Ok(domain.to_string())
}

/// Selects the endpoint for a client.
///
/// # Parameters
/// - `endpoint_override`: an endpoint set in the client configuration, always
///   used if present.
/// - `default_host`: the default service host in the default universe, e.g.
///   `googleads.googleapis.com`.
/// - `has_client_certificate`: whether a client certificate is in use.
/// - `universe_domain`: the universe domain, see [universe_domain()].
/// - `use_mtls_endpoint`: the mTLS endpoint setting.
pub fn api_endpoint(
    endpoint_override: Option<&str>,
    default_host: &str,
    has_client_certificate: bool,
    universe_domain: &str,
    use_mtls_endpoint: UseMtlsEndpoint,
) -> Result<String, Error> {
    if let Some(e) = endpoint_override {
        return Ok(e.to_string());
    }
    let use_mtls = match use_mtls_endpoint {
        UseMtlsEndpoint::Always => true,
        UseMtlsEndpoint::Auto => has_client_certificate,
        UseMtlsEndpoint::Never => false,
    };
    if use_mtls {
        if universe_domain != DEFAULT_UNIVERSE {
            return Err(Error::MtlsOutsideDefaultUniverse(
                universe_domain.to_string(),
            ));
        }
        return Ok(default_mtls_endpoint(default_host));
    }
    let service = default_host
        .strip_suffix(DEFAULT_UNIVERSE)
        .unwrap_or(default_host);
    if service.len() == default_host.len() {
        return Ok(default_host.to_string());
    }
    Ok(format!("{service}{universe_domain}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoped_env::ScopedEnv;
    use test_case::test_case;

    #[test_case("googleads.googleapis.com", "googleads.mtls.googleapis.com"; "regular")]
    #[test_case("googleads.sandbox.googleapis.com", "googleads.mtls.sandbox.googleapis.com"; "sandbox")]
    #[test_case("googleads.mtls.googleapis.com", "googleads.mtls.googleapis.com"; "already mtls")]
    #[test_case("googleads.mtls.sandbox.googleapis.com", "googleads.mtls.sandbox.googleapis.com"; "already mtls sandbox")]
    #[test_case("api.example.com", "api.example.com"; "not google")]
    #[test_case("localhost", "localhost"; "no domain")]
    #[test_case("", ""; "empty")]
    fn mtls_endpoint(input: &str, want: &str) {
        assert_eq!(default_mtls_endpoint(input), want);
    }

    #[test_case(None, None, Ok(false); "default")]
    #[test_case(Some("true"), None, Ok(true); "true")]
    #[test_case(Some("TRUE"), None, Ok(true); "uppercase")]
    #[test_case(Some("false"), None, Ok(false); "false")]
    fn use_client_certificate(cert: Option<&str>, mtls: Option<&str>, want: Result<bool, ()>) {
        let got = Environment::from_values(cert, mtls, None)
            .map(|e| e.use_client_certificate)
            .map_err(|_| ());
        assert_eq!(got, want);
    }

    #[test]
    fn invalid_use_client_certificate() {
        let got = Environment::from_values(Some("yes"), None, None);
        let err = got.unwrap_err();
        assert!(matches!(err, Error::InvalidUseClientCertificate(_)), "{err:?}");
        assert_eq!(
            err.to_string(),
            "Environment variable `GOOGLE_API_USE_CLIENT_CERTIFICATE` must be either `true` or `false`"
        );
    }

    #[test_case(None, UseMtlsEndpoint::Auto)]
    #[test_case(Some("never"), UseMtlsEndpoint::Never)]
    #[test_case(Some("auto"), UseMtlsEndpoint::Auto)]
    #[test_case(Some("Always"), UseMtlsEndpoint::Always)]
    fn use_mtls_endpoint(input: Option<&str>, want: UseMtlsEndpoint) -> anyhow::Result<()> {
        let env = Environment::from_values(None, input, None)?;
        assert_eq!(env.use_mtls_endpoint, want);
        Ok(())
    }

    #[test]
    fn invalid_use_mtls_endpoint() {
        let err = Environment::from_values(None, Some("sometimes"), None).unwrap_err();
        assert!(matches!(err, Error::InvalidUseMtlsEndpoint(_)), "{err:?}");
        assert_eq!(
            err.to_string(),
            "Environment variable `GOOGLE_API_USE_MTLS_ENDPOINT` must be `never`, `auto` or `always`"
        );
    }

    #[test]
    #[serial_test::serial]
    fn from_env() -> anyhow::Result<()> {
        let _c = ScopedEnv::set(USE_CLIENT_CERTIFICATE_VAR, "true");
        let _m = ScopedEnv::set(USE_MTLS_ENDPOINT_VAR, "never");
        let _u = ScopedEnv::set(UNIVERSE_DOMAIN_VAR, "example.com");
        let env = Environment::from_env()?;
        assert_eq!(
            env,
            Environment {
                use_client_certificate: true,
                use_mtls_endpoint: UseMtlsEndpoint::Never,
                universe_domain: Some("example.com".to_string()),
            }
        );
        Ok(())
    }

    #[test]
    #[serial_test::serial]
    fn from_env_defaults() -> anyhow::Result<()> {
        let _c = ScopedEnv::remove(USE_CLIENT_CERTIFICATE_VAR);
        let _m = ScopedEnv::remove(USE_MTLS_ENDPOINT_VAR);
        let _u = ScopedEnv::remove(UNIVERSE_DOMAIN_VAR);
        let env = Environment::from_env()?;
        assert_eq!(env, Environment::default());
        Ok(())
    }

    #[test_case(None, None, "googleapis.com"; "default")]
    #[test_case(None, Some("env.com"), "env.com"; "from env")]
    #[test_case(Some("config.com"), Some("env.com"), "config.com"; "config wins")]
    fn universe(configured: Option<&str>, env: Option<&str>, want: &str) -> anyhow::Result<()> {
        assert_eq!(universe_domain(configured, env)?, want);
        Ok(())
    }

    #[test]
    fn empty_universe() {
        let err = universe_domain(Some("  "), None).unwrap_err();
        assert_eq!(err, Error::EmptyUniverseDomain);
        assert_eq!(err.to_string(), "Universe Domain cannot be an empty string.");
    }

    const HOST: &str = "googleads.googleapis.com";

    #[test_case(Some("http://localhost:1234"), false, DEFAULT_UNIVERSE, UseMtlsEndpoint::Always, "http://localhost:1234"; "override")]
    #[test_case(None, false, DEFAULT_UNIVERSE, UseMtlsEndpoint::Auto, "googleads.googleapis.com"; "auto without cert")]
    #[test_case(None, true, DEFAULT_UNIVERSE, UseMtlsEndpoint::Auto, "googleads.mtls.googleapis.com"; "auto with cert")]
    #[test_case(None, false, DEFAULT_UNIVERSE, UseMtlsEndpoint::Always, "googleads.mtls.googleapis.com"; "always")]
    #[test_case(None, true, DEFAULT_UNIVERSE, UseMtlsEndpoint::Never, "googleads.googleapis.com"; "never")]
    #[test_case(None, false, "example.com", UseMtlsEndpoint::Auto, "googleads.example.com"; "other universe")]
    fn endpoint(
        endpoint_override: Option<&str>,
        has_cert: bool,
        universe: &str,
        use_mtls: UseMtlsEndpoint,
        want: &str,
    ) -> anyhow::Result<()> {
        let got = api_endpoint(endpoint_override, HOST, has_cert, universe, use_mtls)?;
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn mtls_in_other_universe() {
        let err = api_endpoint(None, HOST, true, "example.com", UseMtlsEndpoint::Auto).unwrap_err();
        assert!(matches!(err, Error::MtlsOutsideDefaultUniverse(_)), "{err:?}");
        assert_eq!(
            err.to_string(),
            "mTLS is not supported in any universe other than googleapis.com."
        );
    }
}
