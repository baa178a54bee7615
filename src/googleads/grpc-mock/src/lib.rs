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

//! End-to-end mocks for the Google Ads API gRPC services.
//!
//! Use this crate for end-to-end client library tests. Start a local server
//! implementing the Google Ads API services, with the implementation defined
//! by mocks. Then test the client library against this server.
//!
//! The server uses the `v22` service names.
//!
//! # Example
//! ```no_rust
//! use googleads_grpc_mock::{start, Mocks};
//! use google_ads::client::GoogleAdsClient;
//!
//! # async fn test() -> anyhow::Result<()> {
//! let mut mocks = Mocks::default();
//! mocks.customer_service.expect_list_accessible_customers()
//!     .return_once(|_| Err(tonic::Status::invalid_argument("test message")));
//! // Starts a server using `mocks` and a random port.
//! let (endpoint, _server) = start("0.0.0.0:0", mocks).await?;
//! let client = GoogleAdsClient::builder()
//!     .with_config(Config::new("test-token"))
//!     .with_endpoint(endpoint)
//!     .with_credentials(Anonymous::new().build())
//!     .build()
//!     .await?;
//! let err = client.customer_service().list_accessible_customers().send().await.unwrap_err();
//! assert!(err.status().is_some(), "{err:?}");
//! # Ok(()) }
//! ```

mod mocks;
mod server;

use google_ads::model;
use prost::Message;
use std::net::SocketAddr;
use tokio::task::JoinHandle;

pub use mocks::{MockAdGroupService, MockCampaignService, MockCustomerService, MockGoogleAdsService};
pub use server::stream_response;

/// The metadata key carrying the `GoogleAdsFailure` of a failed request.
pub const FAILURE_KEY: &str = "google.ads.googleads.v22.errors.googleadsfailure-bin";

/// The mocks backing each service in the server.
///
/// Calls without a matching expectation panic, and the client receives an
/// error.
#[derive(Default)]
pub struct Mocks {
    pub campaign_service: MockCampaignService,
    pub ad_group_service: MockAdGroupService,
    pub google_ads_service: MockGoogleAdsService,
    pub customer_service: MockCustomerService,
}

/// Starts a mock Google Ads API server.
///
/// Returns the endpoint of the server, with its scheme, and the task running
/// it.
///
/// # Example
/// ```
/// use googleads_grpc_mock::{start, Mocks};
/// # async fn test() -> anyhow::Result<()> {
/// let mut mocks = Mocks::default();
/// mocks.campaign_service.expect_mutate_campaigns()
///     .return_once(|_| Err(tonic::Status::invalid_argument("test message")));
/// // starts a server using `mocks` and a random port.
/// let (endpoint, server) = start("0.0.0.0:0", mocks).await?;
/// // ... ... test goes here ... ...
/// # Ok(()) }
/// ```
pub async fn start(address: &str, mocks: Mocks) -> anyhow::Result<(String, JoinHandle<()>)> {
    let listener = tokio::net::TcpListener::bind(address).await?;
    let addr = listener.local_addr()?;

    let server = tokio::spawn(async move {
        let stream = tokio_stream::wrappers::TcpListenerStream::new(listener);
        let _ = tonic::transport::Server::builder()
            .add_service(server::CampaignServiceServer::new(mocks.campaign_service))
            .add_service(server::AdGroupServiceServer::new(mocks.ad_group_service))
            .add_service(server::GoogleAdsServiceServer::new(
                mocks.google_ads_service,
            ))
            .add_service(server::CustomerServiceServer::new(mocks.customer_service))
            .serve_with_incoming(stream)
            .await;
    });

    Ok((to_uri(addr), server))
}

/// Creates an error status carrying a `GoogleAdsFailure`, as the service
/// does for failed requests.
pub fn failure_status(
    code: tonic::Code,
    message: &str,
    failure: &model::GoogleAdsFailure,
) -> tonic::Status {
    let mut metadata = tonic::metadata::MetadataMap::new();
    metadata.insert_bin(
        FAILURE_KEY,
        tonic::metadata::MetadataValue::from_bytes(&failure.encode_to_vec()),
    );
    if let Ok(id) = failure.request_id.parse() {
        metadata.insert("request-id", id);
    }
    tonic::Status::with_metadata(code, message, metadata)
}

fn to_uri(addr: SocketAddr) -> String {
    if addr.is_ipv6() {
        format!("http://[{}]:{}", addr.ip(), addr.port())
    } else {
        format!("http://{}:{}", addr.ip(), addr.port())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pastey::paste;
    use test_case::test_case;
    use tonic::transport::Channel;

    async fn unary<Req, Resp>(
        endpoint: &str,
        path: &'static str,
        request: Req,
    ) -> anyhow::Result<tonic::Result<tonic::Response<Resp>>>
    where
        Req: Message + Send + Sync + 'static,
        Resp: Message + Default + Send + Sync + 'static,
    {
        let channel = Channel::from_shared(endpoint.to_string())?.connect().await?;
        let mut client = tonic::client::Grpc::new(channel);
        client.ready().await?;
        let codec = tonic_prost::ProstCodec::<Req, Resp>::default();
        Ok(client
            .unary(
                tonic::Request::new(request),
                http::uri::PathAndQuery::from_static(path),
                codec,
            )
            .await)
    }

    macro_rules! unary_tests {
        ($($field:ident, $method:ident, $path:literal, $request:ident, $response:ident;)*) => {
            paste! {
                $(
                #[tokio::test]
                async fn [<$method _success>]() -> anyhow::Result<()> {
                    let mut mocks = Mocks::default();
                    mocks.$field.[<expect_ $method>]()
                        .once()
                        .return_once(|_| Ok(tonic::Response::new(model::$response::default())));
                    let (endpoint, _server) = start("127.0.0.1:0", mocks).await?;
                    let response = unary::<_, model::$response>(
                        &endpoint, $path, model::$request::default()
                    ).await??;
                    assert_eq!(response.into_inner(), model::$response::default());
                    Ok(())
                }

                #[tokio::test]
                async fn [<$method _error>]() -> anyhow::Result<()> {
                    let mut mocks = Mocks::default();
                    mocks.$field.[<expect_ $method>]()
                        .once()
                        .return_once(|_| Err(tonic::Status::invalid_argument("test message")));
                    let (endpoint, _server) = start("127.0.0.1:0", mocks).await?;
                    let status = unary::<_, model::$response>(
                        &endpoint, $path, model::$request::default()
                    ).await?.unwrap_err();
                    assert_eq!(status.code(), tonic::Code::InvalidArgument);
                    assert_eq!(status.message(), "test message");
                    Ok(())
                }
                )*
            }
        };
    }

    unary_tests!(
        campaign_service, mutate_campaigns,
        "/google.ads.googleads.v22.services.CampaignService/MutateCampaigns",
        MutateCampaignsRequest, MutateCampaignsResponse;
        ad_group_service, mutate_ad_groups,
        "/google.ads.googleads.v22.services.AdGroupService/MutateAdGroups",
        MutateAdGroupsRequest, MutateAdGroupsResponse;
        google_ads_service, search,
        "/google.ads.googleads.v22.services.GoogleAdsService/Search",
        SearchGoogleAdsRequest, SearchGoogleAdsResponse;
        google_ads_service, mutate,
        "/google.ads.googleads.v22.services.GoogleAdsService/Mutate",
        MutateGoogleAdsRequest, MutateGoogleAdsResponse;
        customer_service, list_accessible_customers,
        "/google.ads.googleads.v22.services.CustomerService/ListAccessibleCustomers",
        ListAccessibleCustomersRequest, ListAccessibleCustomersResponse;
    );

    #[tokio::test]
    async fn search_stream() -> anyhow::Result<()> {
        let mut mocks = Mocks::default();
        mocks
            .google_ads_service
            .expect_search_stream()
            .withf(|r| r.get_ref().customer_id == "1234567890")
            .return_once(|_| {
                Ok(stream_response(vec![
                    Ok(model::SearchGoogleAdsStreamResponse {
                        request_id: "first".into(),
                        ..Default::default()
                    }),
                    Err(tonic::Status::internal("stream broken")),
                ]))
            });
        let (endpoint, _server) = start("127.0.0.1:0", mocks).await?;

        let channel = Channel::from_shared(endpoint)?.connect().await?;
        let mut client = tonic::client::Grpc::new(channel);
        client.ready().await?;
        let codec = tonic_prost::ProstCodec::<
            model::SearchGoogleAdsStreamRequest,
            model::SearchGoogleAdsStreamResponse,
        >::default();
        let request = model::SearchGoogleAdsStreamRequest {
            customer_id: "1234567890".into(),
            ..Default::default()
        };
        let response = client
            .server_streaming(
                tonic::Request::new(request),
                http::uri::PathAndQuery::from_static(
                    "/google.ads.googleads.v22.services.GoogleAdsService/SearchStream",
                ),
                codec,
            )
            .await?;
        let mut stream = response.into_inner();
        let first = stream.message().await?;
        assert_eq!(first.map(|r| r.request_id), Some("first".to_string()));
        let status = stream.message().await.unwrap_err();
        assert_eq!(status.code(), tonic::Code::Internal);
        Ok(())
    }

    #[test_case("/google.ads.googleads.v22.services.CampaignService/Unknown")]
    #[test_case("/google.ads.googleads.v22.services.GoogleAdsService/Unknown")]
    #[tokio::test]
    async fn unimplemented(path: &'static str) -> anyhow::Result<()> {
        let (endpoint, _server) = start("127.0.0.1:0", Mocks::default()).await?;
        let status = unary::<_, model::MutateCampaignsResponse>(
            &endpoint,
            path,
            model::MutateCampaignsRequest::default(),
        )
        .await?
        .unwrap_err();
        assert_eq!(status.code(), tonic::Code::Unimplemented);
        Ok(())
    }

    #[test]
    fn failure_metadata() -> anyhow::Result<()> {
        let failure = model::GoogleAdsFailure {
            errors: vec![model::GoogleAdsError {
                message: "bad query".into(),
                ..Default::default()
            }],
            request_id: "req-123".into(),
        };
        let status = failure_status(tonic::Code::InvalidArgument, "bad request", &failure);
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
        let id = status.metadata().get("request-id").map(|v| v.to_str()).transpose()?;
        assert_eq!(id, Some("req-123"));
        let bytes = status
            .metadata()
            .get_bin(FAILURE_KEY)
            .map(|v| v.to_bytes())
            .transpose()?
            .unwrap_or_default();
        assert_eq!(model::GoogleAdsFailure::decode(bytes)?, failure);
        Ok(())
    }
}
