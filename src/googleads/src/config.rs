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

//! Client configuration.
//!
//! The configuration uses the same keys as the `google-ads.yaml` file used by
//! the other Google Ads API client libraries. It can be loaded from the
//! environment, a YAML file, a YAML string, or a key/value map.
//!
//! # Example
//! ```
//! # use google_ads::config::Config;
//! let config = Config::load_from_string(r#"
//! developer_token: "abcdef123456"
//! login_customer_id: "1234567890"
//! client_id: "my-client-id.apps.googleusercontent.com"
//! client_secret: "my-client-secret"
//! refresh_token: "my-refresh-token"
//! "#)?;
//! assert_eq!(config.login_customer_id.as_deref(), Some("1234567890"));
//! # Ok::<(), google_ads::config::Error>(())
//! ```

use auth::credentials::{Credentials, service_account, user_account};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The environment variable overriding the default configuration file path.
pub const CONFIGURATION_FILE_PATH_VAR: &str = "GOOGLE_ADS_CONFIGURATION_FILE_PATH";

/// The name of the default configuration file, in the home directory.
pub const DEFAULT_CONFIGURATION_FILE: &str = "google-ads.yaml";

const ENV_PREFIX: &str = "GOOGLE_ADS_";
const LOGGING_VAR: &str = "GOOGLE_ADS_LOGGING";

// Deprecated names and their replacements. The replacement wins if both are
// set.
const DEPRECATED_KEYS: [(&str, &str); 2] = [
    ("path_to_private_key_file", "json_key_file_path"),
    ("delegated_account", "impersonated_email"),
];

/// The result type for configuration functions.
pub type Result<T> = std::result::Result<T, Error>;

/// An invalid or incomplete configuration.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(
        "A required field in the configuration data was not found. The required fields are: ('developer_token',)"
    )]
    MissingRequiredField,
    #[error(
        "The specified {0} customer ID is invalid. It must be a ten digit number represented as a string, i.e. \"1234567890\""
    )]
    InvalidCustomerId(&'static str),
    #[error("GOOGLE_ADS_LOGGING env variable should be in JSON format.")]
    InvalidLogging(#[source] serde_json::Error),
    #[error("The {0} value must be a bool or a string representing a bool, i.e. \"true\" or \"false\".")]
    InvalidBool(&'static str),
    #[error("cannot find the configuration file, set {CONFIGURATION_FILE_PATH_VAR} or the HOME environment variable")]
    NoHomeDirectory,
    #[error("cannot read the configuration file `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse the configuration: {0}")]
    Parse(#[source] serde_yaml::Error),
    #[error(
        "The configuration must define the OAuth2 installed application flow fields ('client_id', 'client_secret', 'refresh_token') or the service account flow fields ('json_key_file_path',)."
    )]
    MissingCredentials,
    #[error("cannot create the credentials: {0}")]
    Credentials(#[source] auth::build_errors::Error),
}

/// The configuration for a [GoogleAdsClient][crate::client::GoogleAdsClient].
///
/// Use one of the `load_from_*` functions to load and validate a
/// configuration. Applications building the configuration in code should call
/// [Config::validate] before using it.
#[derive(Clone, Default, PartialEq)]
pub struct Config {
    /// The developer token, sent with every request.
    pub developer_token: String,
    /// The manager account used to access client accounts.
    pub login_customer_id: Option<String>,
    /// The linked account, for third party app analytics providers.
    pub linked_customer_id: Option<String>,
    /// Overrides the default endpoint, `googleads.googleapis.com`.
    pub endpoint: Option<String>,
    /// The logging configuration.
    ///
    /// The client library does not install a logger. Applications may use
    /// this value to configure their `tracing` subscriber.
    pub logging: Option<serde_json::Value>,
    /// A proxy URI for the gRPC connections.
    pub http_proxy: Option<String>,
    /// Use the Google Cloud organization instead of the developer token to
    /// determine the API access level. Only for accounts in the pilot.
    pub use_cloud_org_for_api_access: bool,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
    /// The path of a service account key file.
    pub json_key_file_path: Option<PathBuf>,
    /// The user impersonated by the service account.
    pub impersonated_email: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn censor<T>(v: &Option<T>) -> Option<&'static str> {
            v.as_ref().map(|_| "[censored]")
        }
        f.debug_struct("Config")
            .field("developer_token", &"[censored]")
            .field("login_customer_id", &self.login_customer_id)
            .field("linked_customer_id", &self.linked_customer_id)
            .field("endpoint", &self.endpoint)
            .field("logging", &self.logging)
            .field("http_proxy", &self.http_proxy)
            .field(
                "use_cloud_org_for_api_access",
                &self.use_cloud_org_for_api_access,
            )
            .field("client_id", &self.client_id)
            .field("client_secret", &censor(&self.client_secret))
            .field("refresh_token", &censor(&self.refresh_token))
            .field("json_key_file_path", &self.json_key_file_path)
            .field("impersonated_email", &self.impersonated_email)
            .finish()
    }
}

impl Config {
    /// Creates a configuration with the given developer token.
    pub fn new<T: Into<String>>(developer_token: T) -> Self {
        Self {
            developer_token: developer_token.into(),
            ..Default::default()
        }
    }

    /// Loads the configuration from `GOOGLE_ADS_*` environment variables.
    ///
    /// The variable names are the configuration keys in upper case, with a
    /// `GOOGLE_ADS_` prefix, e.g. `GOOGLE_ADS_DEVELOPER_TOKEN`.
    /// `GOOGLE_ADS_LOGGING` must contain JSON.
    pub fn load_from_env() -> Result<Self> {
        let mut raw = RawConfig {
            developer_token: env_var("developer_token"),
            login_customer_id: env_var("login_customer_id").map(CustomerIdValue::Str),
            linked_customer_id: env_var("linked_customer_id").map(CustomerIdValue::Str),
            endpoint: env_var("endpoint"),
            logging: None,
            http_proxy: env_var("http_proxy"),
            use_proto_plus: env_var("use_proto_plus").map(BoolValue::Str),
            use_cloud_org_for_api_access: env_var("use_cloud_org_for_api_access")
                .map(BoolValue::Str),
            client_id: env_var("client_id"),
            client_secret: env_var("client_secret"),
            refresh_token: env_var("refresh_token"),
            json_key_file_path: env_var("json_key_file_path"),
            path_to_private_key_file: None,
            impersonated_email: env_var("impersonated_email"),
            delegated_account: None,
        };
        if let Ok(logging) = std::env::var(LOGGING_VAR) {
            let logging = serde_json::from_str(&logging).map_err(Error::InvalidLogging)?;
            raw.logging = Some(logging);
        }
        for (old, new) in DEPRECATED_KEYS {
            let Some(value) = env_var(old) else {
                continue;
            };
            tracing::warn!(
                "The '{}' environment variable is deprecated. Please use '{}' instead.",
                env_name(old),
                env_name(new)
            );
            raw.set_deprecated(old, value);
        }
        raw.into_config()
    }

    /// Loads the configuration from a YAML file.
    ///
    /// If `path` is `None` the file is found using the
    /// `GOOGLE_ADS_CONFIGURATION_FILE_PATH` environment variable, or
    /// `$HOME/google-ads.yaml` if the variable is not set.
    pub fn load_from_storage<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let path = match path {
            Some(p) => p.as_ref().to_path_buf(),
            None => default_path()?,
        };
        tracing::debug!(path = %path.display(), "loading configuration file");
        let contents = std::fs::read_to_string(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        Self::load_from_string(&contents)
    }

    /// Loads the configuration from a YAML document.
    pub fn load_from_string(yaml: &str) -> Result<Self> {
        let raw = serde_yaml::from_str::<Option<RawConfig>>(yaml).map_err(Error::Parse)?;
        raw.unwrap_or_default().warn_deprecated().into_config()
    }

    /// Loads the configuration from key/value pairs.
    ///
    /// # Example
    /// ```
    /// # use google_ads::config::Config;
    /// let config = Config::load_from_map([
    ///     ("developer_token", serde_yaml::Value::from("abcdef123456")),
    ///     ("login_customer_id", serde_yaml::Value::from(1234567890)),
    /// ])?;
    /// assert_eq!(config.login_customer_id.as_deref(), Some("1234567890"));
    /// # Ok::<(), google_ads::config::Error>(())
    /// ```
    pub fn load_from_map<I, K, V>(map: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<serde_yaml::Value>,
    {
        let mapping = map
            .into_iter()
            .map(|(k, v)| (serde_yaml::Value::String(k.into()), v.into()))
            .collect::<serde_yaml::Mapping>();
        let raw = serde_yaml::from_value::<RawConfig>(serde_yaml::Value::Mapping(mapping))
            .map_err(Error::Parse)?;
        raw.warn_deprecated().into_config()
    }

    /// Verifies the required fields are present and the customer ids are
    /// valid.
    pub fn validate(&self) -> Result<()> {
        if self.developer_token.is_empty() {
            return Err(Error::MissingRequiredField);
        }
        if let Some(id) = &self.login_customer_id {
            validate_customer_id(id, "login")?;
        }
        if let Some(id) = &self.linked_customer_id {
            validate_customer_id(id, "linked")?;
        }
        Ok(())
    }

    /// Creates the credentials described by this configuration.
    ///
    /// Uses the OAuth2 installed application flow if `client_id`,
    /// `client_secret` and `refresh_token` are set, and a service account if
    /// `json_key_file_path` is set.
    pub fn credentials(&self) -> Result<Credentials> {
        if let (Some(id), Some(secret), Some(token)) =
            (&self.client_id, &self.client_secret, &self.refresh_token)
        {
            return user_account::Builder::new(id, secret, token)
                .build()
                .map_err(Error::Credentials);
        }
        if let Some(path) = &self.json_key_file_path {
            let mut builder = service_account::Builder::from_file(path).map_err(Error::Credentials)?;
            if let Some(email) = &self.impersonated_email {
                builder = builder.with_impersonated_email(email);
            }
            return builder.build().map_err(Error::Credentials);
        }
        Err(Error::MissingCredentials)
    }
}

fn validate_customer_id(id: &str, kind: &'static str) -> Result<()> {
    if id.len() != 10 || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidCustomerId(kind));
    }
    Ok(())
}

fn default_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIGURATION_FILE_PATH_VAR) {
        return Ok(PathBuf::from(path));
    }
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(|home| PathBuf::from(home).join(DEFAULT_CONFIGURATION_FILE))
        .ok_or(Error::NoHomeDirectory)
}

fn env_name(key: &str) -> String {
    format!("{ENV_PREFIX}{}", key.to_ascii_uppercase())
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(env_name(key)).ok()
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    developer_token: Option<String>,
    login_customer_id: Option<CustomerIdValue>,
    linked_customer_id: Option<CustomerIdValue>,
    endpoint: Option<String>,
    logging: Option<serde_json::Value>,
    http_proxy: Option<String>,
    use_proto_plus: Option<BoolValue>,
    use_cloud_org_for_api_access: Option<BoolValue>,
    client_id: Option<String>,
    client_secret: Option<String>,
    refresh_token: Option<String>,
    json_key_file_path: Option<String>,
    path_to_private_key_file: Option<String>,
    impersonated_email: Option<String>,
    delegated_account: Option<String>,
}

// Customer ids may be written as YAML integers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CustomerIdValue {
    Int(u64),
    Str(String),
}

impl CustomerIdValue {
    fn into_string(self) -> String {
        match self {
            Self::Int(v) => v.to_string(),
            Self::Str(v) => v,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BoolValue {
    Bool(bool),
    Str(String),
}

impl BoolValue {
    fn into_bool(self, key: &'static str) -> Result<bool> {
        match self {
            Self::Bool(v) => Ok(v),
            Self::Str(s) if s.eq_ignore_ascii_case("true") => Ok(true),
            Self::Str(s) if s.eq_ignore_ascii_case("false") => Ok(false),
            Self::Str(_) => Err(Error::InvalidBool(key)),
        }
    }
}

impl RawConfig {
    fn warn_deprecated(mut self) -> Self {
        for (old, new) in DEPRECATED_KEYS {
            let value = match old {
                "path_to_private_key_file" => self.path_to_private_key_file.take(),
                _ => self.delegated_account.take(),
            };
            if let Some(value) = value {
                tracing::warn!(
                    "The '{old}' configuration key is deprecated. Please use '{new}' instead."
                );
                self.set_deprecated(old, value);
            }
        }
        self
    }

    fn set_deprecated(&mut self, key: &str, value: String) {
        let field = match key {
            "path_to_private_key_file" => &mut self.json_key_file_path,
            _ => &mut self.impersonated_email,
        };
        field.get_or_insert(value);
    }

    fn into_config(self) -> Result<Config> {
        // Accepted for compatibility with the `google-ads.yaml` format.
        if let Some(v) = self.use_proto_plus {
            v.into_bool("use_proto_plus")?;
        }
        let use_cloud_org_for_api_access = self
            .use_cloud_org_for_api_access
            .map(|v| v.into_bool("use_cloud_org_for_api_access"))
            .transpose()?
            .unwrap_or(false);
        let config = Config {
            developer_token: self.developer_token.unwrap_or_default(),
            login_customer_id: self.login_customer_id.map(CustomerIdValue::into_string),
            linked_customer_id: self.linked_customer_id.map(CustomerIdValue::into_string),
            endpoint: self.endpoint,
            logging: self.logging,
            http_proxy: self.http_proxy,
            use_cloud_org_for_api_access,
            client_id: self.client_id,
            client_secret: self.client_secret,
            refresh_token: self.refresh_token,
            json_key_file_path: self.json_key_file_path.map(PathBuf::from),
            impersonated_email: self.impersonated_email,
        };
        config.validate()?;
        Ok(config)
    }
}
