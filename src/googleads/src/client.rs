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

//! The clients for the Google Ads API services.
//!
//! Applications create a [GoogleAdsClient], which owns the gRPC channel and
//! the Google Ads metadata, and then obtain a client for each service they
//! use. All the service clients share the channel of their `GoogleAdsClient`.

use crate::ApiVersion;
use crate::builder;
use crate::config::Config;
use crate::logging::Logging;
use crate::metadata::AdsMetadata;
use crate::stub;
use crate::transport::Transport;
use auth::credentials::Credentials;
use gax::backoff_policy::BackoffPolicyArg;
use gax::client_builder::Error as BuilderError;
use gax::retry_policy::RetryPolicyArg;
use std::sync::Arc;

/// The entry point to the Google Ads API.
///
/// # Example
/// ```no_run
/// # use google_ads::client::GoogleAdsClient;
/// # use google_ads::ApiVersion;
/// # async fn sample() -> anyhow::Result<()> {
/// let client = GoogleAdsClient::builder()
///     .with_version(ApiVersion::V21)
///     .build()
///     .await?;
/// let customers = client
///     .customer_service()
///     .list_accessible_customers()
///     .send()
///     .await?;
/// println!("{customers:?}");
/// # Ok(()) }
/// ```
///
/// # Configuration
///
/// By default the client loads its [Config] from `~/google-ads.yaml`, or the
/// file named by `GOOGLE_ADS_CONFIGURATION_FILE_PATH`. Use
/// [with_config()][ClientBuilder::with_config] to supply a configuration
/// loaded some other way. The credentials are derived from the
/// configuration, unless the application sets them with
/// [with_credentials()][ClientBuilder::with_credentials].
///
/// # Pooling and Cloning
///
/// `GoogleAdsClient` holds a gRPC channel internally, it is advised to create
/// one and then reuse it. You do not need to wrap `GoogleAdsClient` in an
/// [Rc](std::rc::Rc) or [Arc] to reuse it, because it already uses an `Arc`
/// internally.
#[derive(Clone, Debug)]
pub struct GoogleAdsClient {
    stub: Arc<Logging<Transport>>,
    version: ApiVersion,
}

impl GoogleAdsClient {
    /// Returns a builder for [GoogleAdsClient].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a client using `config` and the default settings.
    pub async fn from_config(config: Config) -> gax::client_builder::Result<Self> {
        Self::builder().with_config(config).build().await
    }

    /// The API version used by this client.
    pub fn version(&self) -> ApiVersion {
        self.version
    }

    /// Returns a client for `CampaignService`.
    pub fn campaign_service(&self) -> CampaignService {
        CampaignService {
            inner: self.stub.clone(),
        }
    }

    /// Returns a client for `AdGroupService`.
    pub fn ad_group_service(&self) -> AdGroupService {
        AdGroupService {
            inner: self.stub.clone(),
        }
    }

    /// Returns a client for `GoogleAdsService`.
    pub fn google_ads_service(&self) -> GoogleAdsService {
        GoogleAdsService {
            inner: self.stub.clone(),
        }
    }

    /// Returns a client for `CustomerService`.
    pub fn customer_service(&self) -> CustomerService {
        CustomerService {
            inner: self.stub.clone(),
        }
    }

    /// Returns the client for a service given its name.
    ///
    /// # Example
    /// ```no_run
    /// # use google_ads::client::{GoogleAdsClient, Service};
    /// # fn sample(client: &GoogleAdsClient) -> anyhow::Result<()> {
    /// let Service::Campaign(campaigns) = client.service("CampaignService")? else {
    ///     unreachable!();
    /// };
    /// # Ok(()) }
    /// ```
    pub fn service(&self, name: &str) -> Result<Service, UnknownServiceError> {
        let service = match name {
            "CampaignService" => Service::Campaign(self.campaign_service()),
            "AdGroupService" => Service::AdGroup(self.ad_group_service()),
            "GoogleAdsService" => Service::GoogleAds(self.google_ads_service()),
            "CustomerService" => Service::Customer(self.customer_service()),
            _ => {
                return Err(UnknownServiceError {
                    name: name.to_string(),
                    version: self.version,
                });
            }
        };
        Ok(service)
    }
}

/// A service client, as returned by [GoogleAdsClient::service].
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum Service {
    Campaign(CampaignService),
    AdGroup(AdGroupService),
    GoogleAds(GoogleAdsService),
    Customer(CustomerService),
}

/// The error returned by [GoogleAdsClient::service] for unknown services.
#[derive(thiserror::Error, Debug, PartialEq)]
#[error("Specified service {name}\" does not exist in Google Ads API {version}.")]
pub struct UnknownServiceError {
    name: String,
    version: ApiVersion,
}

impl UnknownServiceError {
    /// The requested service name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A builder for [GoogleAdsClient].
///
/// # Example
/// ```no_run
/// # use google_ads::client::GoogleAdsClient;
/// # use google_ads::config::Config;
/// # async fn sample() -> anyhow::Result<()> {
/// let config = Config::load_from_env()?;
/// let client = GoogleAdsClient::builder()
///     .with_config(config)
///     .with_endpoint("https://googleads.googleapis.com")
///     .with_tracing()
///     .build()
///     .await?;
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub struct ClientBuilder {
    config: Option<Config>,
    version: ApiVersion,
    client_config: gaxi::options::ClientConfig,
}

impl ClientBuilder {
    pub(crate) fn new() -> Self {
        Self {
            config: None,
            version: ApiVersion::default(),
            client_config: gaxi::options::ClientConfig::default(),
        }
    }

    /// Creates a new client.
    ///
    /// Fails if the configuration cannot be loaded or is invalid, or if the
    /// credentials cannot be created.
    pub async fn build(self) -> gax::client_builder::Result<GoogleAdsClient> {
        let config = match self.config {
            Some(c) => c,
            None => Config::load_from_storage(None::<&str>).map_err(BuilderError::config)?,
        };
        config.validate().map_err(BuilderError::config)?;
        let mut client_config = self.client_config;
        if client_config.cred.is_none() {
            client_config.cred = Some(config.credentials().map_err(BuilderError::cred)?);
        }
        if client_config.endpoint.is_none() {
            client_config.endpoint = config.endpoint.clone();
        }
        if client_config.proxy.is_none() {
            client_config.proxy = config.http_proxy.clone();
        }
        let spans = gaxi::options::tracing_enabled(&client_config);
        let metadata = Arc::new(AdsMetadata::from_config(&config));
        let transport = Transport::new(client_config, self.version, metadata.clone()).await?;
        let host = transport.host().to_string();
        let stub = Logging::new(transport, host, self.version, metadata, spans);
        Ok(GoogleAdsClient {
            stub: Arc::new(stub),
            version: self.version,
        })
    }

    /// Sets the configuration.
    pub fn with_config(mut self, v: Config) -> Self {
        self.config = Some(v);
        self
    }

    /// Sets the API version, the default is the latest supported version.
    pub fn with_version(mut self, v: ApiVersion) -> Self {
        self.version = v;
        self
    }

    /// Sets the endpoint, overriding the `endpoint` in the configuration.
    pub fn with_endpoint<V: Into<String>>(mut self, v: V) -> Self {
        self.client_config.endpoint = Some(v.into());
        self
    }

    /// Connects through an HTTP proxy, overriding the `http_proxy` in the
    /// configuration.
    ///
    /// The proxy is given as `[http://][user:password@]host[:port]`.
    pub fn with_http_proxy<V: Into<String>>(mut self, v: V) -> Self {
        self.client_config.proxy = Some(v.into());
        self
    }

    /// Sets the credentials, instead of deriving them from the configuration.
    pub fn with_credentials<V: Into<Credentials>>(mut self, v: V) -> Self {
        self.client_config.cred = Some(v.into());
        self
    }

    /// Sets the default retry policy for all requests.
    ///
    /// Only idempotent requests are retried.
    pub fn with_retry_policy<V: Into<RetryPolicyArg>>(mut self, v: V) -> Self {
        self.client_config.retry_policy = Some(v.into().into());
        self
    }

    /// Sets the default backoff policy for all requests.
    pub fn with_backoff_policy<V: Into<BackoffPolicyArg>>(mut self, v: V) -> Self {
        self.client_config.backoff_policy = Some(v.into().into());
        self
    }

    /// Runs each request in its own `tracing` span.
    ///
    /// Setting `GOOGLE_ADS_RUST_TRACING=true` has the same effect.
    pub fn with_tracing(mut self) -> Self {
        self.client_config.tracing = true;
        self
    }

    /// Sets the client certificate used for mTLS.
    ///
    /// The certificate is only used if `GOOGLE_API_USE_CLIENT_CERTIFICATE` is
    /// `true`.
    pub fn with_client_certificate<C, K>(mut self, cert_pem: C, key_pem: K) -> Self
    where
        C: Into<Vec<u8>>,
        K: Into<Vec<u8>>,
    {
        self.client_config.client_certificate = Some(gaxi::options::ClientCertificate {
            cert_pem: cert_pem.into(),
            key_pem: key_pem.into(),
        });
        self
    }
}

/// Implements a client for `CampaignService`.
///
/// Use [GoogleAdsClient::campaign_service] to create one.
#[derive(Clone, Debug)]
pub struct CampaignService {
    inner: Arc<dyn stub::dynamic::CampaignService>,
}

impl CampaignService {
    /// Creates a new client from the provided stub.
    ///
    /// The most common case for calling this function is in tests mocking the
    /// client's behavior.
    pub fn from_stub<T>(stub: T) -> Self
    where
        T: stub::CampaignService + 'static,
    {
        Self {
            inner: Arc::new(stub),
        }
    }

    /// Creates, updates, or removes campaigns.
    pub fn mutate_campaigns(&self) -> builder::campaign_service::MutateCampaigns {
        builder::campaign_service::MutateCampaigns::new(self.inner.clone())
    }
}

/// Implements a client for `AdGroupService`.
#[derive(Clone, Debug)]
pub struct AdGroupService {
    inner: Arc<dyn stub::dynamic::AdGroupService>,
}

impl AdGroupService {
    /// Creates a new client from the provided stub.
    pub fn from_stub<T>(stub: T) -> Self
    where
        T: stub::AdGroupService + 'static,
    {
        Self {
            inner: Arc::new(stub),
        }
    }

    /// Creates, updates, or removes ad groups.
    pub fn mutate_ad_groups(&self) -> builder::ad_group_service::MutateAdGroups {
        builder::ad_group_service::MutateAdGroups::new(self.inner.clone())
    }
}

/// Implements a client for `GoogleAdsService`.
///
/// This service queries any resource with the Google Ads Query Language, and
/// mutates resources of different types in a single request.
#[derive(Clone, Debug)]
pub struct GoogleAdsService {
    inner: Arc<dyn stub::dynamic::GoogleAdsService>,
}

impl GoogleAdsService {
    /// Creates a new client from the provided stub.
    pub fn from_stub<T>(stub: T) -> Self
    where
        T: stub::GoogleAdsService + 'static,
    {
        Self {
            inner: Arc::new(stub),
        }
    }

    /// Returns all rows that match the search query, one page at a time.
    pub fn search(&self) -> builder::google_ads_service::Search {
        builder::google_ads_service::Search::new(self.inner.clone())
    }

    /// Returns all rows that match the search query, as a stream of batches.
    pub fn search_stream(&self) -> builder::google_ads_service::SearchStream {
        builder::google_ads_service::SearchStream::new(self.inner.clone())
    }

    /// Creates, updates, or removes resources of any type.
    pub fn mutate(&self) -> builder::google_ads_service::Mutate {
        builder::google_ads_service::Mutate::new(self.inner.clone())
    }
}

/// Implements a client for `CustomerService`.
#[derive(Clone, Debug)]
pub struct CustomerService {
    inner: Arc<dyn stub::dynamic::CustomerService>,
}

impl CustomerService {
    /// Creates a new client from the provided stub.
    pub fn from_stub<T>(stub: T) -> Self
    where
        T: stub::CustomerService + 'static,
    {
        Self {
            inner: Arc::new(stub),
        }
    }

    /// Returns the resource names of the customers directly accessible by the
    /// user authenticating the call.
    pub fn list_accessible_customers(&self) -> builder::customer_service::ListAccessibleCustomers {
        builder::customer_service::ListAccessibleCustomers::new(self.inner.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model;
    use auth::credentials::anonymous;
    use gax::options::RequestOptions;
    use gax::response::Response;
    use pretty_assertions::assert_eq;

    mockall::mock! {
        #[derive(Debug)]
        CustomerService {}
        impl crate::stub::CustomerService for CustomerService {
            async fn list_accessible_customers(
                &self,
                req: model::ListAccessibleCustomersRequest,
                options: RequestOptions,
            ) -> crate::Result<Response<model::ListAccessibleCustomersResponse>>;
        }
    }

    async fn test_client() -> anyhow::Result<GoogleAdsClient> {
        let client = GoogleAdsClient::builder()
            .with_config(Config::new("test-developer-token"))
            .with_credentials(anonymous::Builder::new().build())
            .with_endpoint("http://127.0.0.1:1")
            .with_version(ApiVersion::V21)
            .build()
            .await?;
        Ok(client)
    }

    #[tokio::test]
    async fn build() -> anyhow::Result<()> {
        let client = test_client().await?;
        assert_eq!(client.version(), ApiVersion::V21);
        let debug = format!("{client:?}");
        assert!(debug.contains("127.0.0.1"), "{debug}");
        Ok(())
    }

    #[tokio::test]
    async fn build_invalid_config() {
        let err = GoogleAdsClient::builder()
            .with_config(Config::new(""))
            .with_credentials(anonymous::Builder::new().build())
            .build()
            .await
            .unwrap_err();
        assert!(err.is_config(), "{err:?}");
    }

    #[tokio::test]
    async fn build_missing_credentials() {
        let err = GoogleAdsClient::from_config(Config::new("test-developer-token"))
            .await
            .unwrap_err();
        assert!(err.is_credentials(), "{err:?}");
    }

    #[tokio::test]
    async fn service_by_name() -> anyhow::Result<()> {
        let client = test_client().await?;
        assert!(matches!(client.service("CampaignService")?, Service::Campaign(_)));
        assert!(matches!(client.service("AdGroupService")?, Service::AdGroup(_)));
        assert!(matches!(client.service("GoogleAdsService")?, Service::GoogleAds(_)));
        assert!(matches!(client.service("CustomerService")?, Service::Customer(_)));

        let err = client.service("NotAService").unwrap_err();
        assert_eq!(err.name(), "NotAService");
        assert_eq!(
            err.to_string(),
            "Specified service NotAService\" does not exist in Google Ads API v21."
        );
        Ok(())
    }

    #[tokio::test]
    async fn from_stub() -> anyhow::Result<()> {
        let mut mock = MockCustomerService::new();
        mock.expect_list_accessible_customers()
            .return_once(|_, _| {
                Ok(Response::from(model::ListAccessibleCustomersResponse {
                    resource_names: vec!["customers/1234567890".into()],
                }))
            });
        let client = CustomerService::from_stub(mock);
        let response = client.list_accessible_customers().send().await?;
        assert_eq!(response.resource_names, vec!["customers/1234567890"]);
        Ok(())
    }
}
