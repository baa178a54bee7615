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

//! The gRPC transport for all the Google Ads API services.

use crate::ApiVersion;
use crate::metadata::AdsMetadata;
use crate::methods::{MethodInfo, Rpc, apply_defaults, method_info};
use crate::model;
use crate::streaming::Streaming;
use gax::error::binding::BindingError;
use gax::options::RequestOptions;
use gax::response::Response;
use std::sync::Arc;

/// Implements the stubs using a gRPC channel.
#[derive(Clone)]
pub(crate) struct Transport {
    inner: gaxi::grpc::Client,
    version: ApiVersion,
    metadata: Arc<AdsMetadata>,
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("inner", &self.inner)
            .field("version", &self.version)
            .field("metadata", &self.metadata)
            .finish()
    }
}

impl Transport {
    pub(crate) async fn new(
        config: gaxi::options::ClientConfig,
        version: ApiVersion,
        metadata: Arc<AdsMetadata>,
    ) -> gax::client_builder::Result<Self> {
        let inner = gaxi::grpc::Client::new(config, crate::DEFAULT_HOST).await?;
        Ok(Self {
            inner,
            version,
            metadata,
        })
    }

    /// The host receiving the requests, used in the logs.
    pub(crate) fn host(&self) -> &str {
        self.inner.host()
    }

    pub(crate) fn version(&self) -> ApiVersion {
        self.version
    }

    pub(crate) fn metadata(&self) -> &Arc<AdsMetadata> {
        &self.metadata
    }

    fn prepare(
        &self,
        rpc: Rpc,
        options: RequestOptions,
    ) -> crate::Result<(&'static MethodInfo, http::uri::PathAndQuery, RequestOptions)> {
        let info = method_info(self.version, rpc)?;
        let path = info
            .path
            .parse::<http::uri::PathAndQuery>()
            .map_err(crate::Error::ser)?;
        let options = self.metadata.apply(apply_defaults(info, options));
        Ok((info, path, options))
    }

    async fn unary<Req, Resp>(
        &self,
        rpc: Rpc,
        req: Req,
        options: RequestOptions,
        request_params: String,
    ) -> crate::Result<Response<Resp>>
    where
        Req: prost::Message + Clone + 'static,
        Resp: prost::Message + Default + 'static,
    {
        let (info, path, options) = self.prepare(rpc, options)?;
        self.inner
            .execute(
                tonic::GrpcMethod::new(&info.service, info.method),
                path,
                req,
                options,
                "k",
                "p",
            )
            .await
    }
}

/// Formats the routing header for requests with a `customer_id` field.
fn routing_customer_id(customer_id: &str) -> crate::Result<String> {
    if customer_id.is_empty() {
        return Err(crate::Error::binding(BindingError::MissingField(
            "customer_id",
        )));
    }
    Ok(gaxi::routing_parameter::format(("customer_id", customer_id)))
}

impl crate::stub::CampaignService for Transport {
    async fn mutate_campaigns(
        &self,
        req: model::MutateCampaignsRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::MutateCampaignsResponse>> {
        let params = routing_customer_id(&req.customer_id)?;
        self.unary(Rpc::MutateCampaigns, req, options, params).await
    }
}

impl crate::stub::AdGroupService for Transport {
    async fn mutate_ad_groups(
        &self,
        req: model::MutateAdGroupsRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::MutateAdGroupsResponse>> {
        let params = routing_customer_id(&req.customer_id)?;
        self.unary(Rpc::MutateAdGroups, req, options, params).await
    }
}

impl crate::stub::GoogleAdsService for Transport {
    async fn search(
        &self,
        req: model::SearchGoogleAdsRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::SearchGoogleAdsResponse>> {
        let params = routing_customer_id(&req.customer_id)?;
        self.unary(Rpc::Search, req, options, params).await
    }

    async fn search_stream(
        &self,
        req: model::SearchGoogleAdsStreamRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<Streaming<model::SearchGoogleAdsStreamResponse>>> {
        let params = routing_customer_id(&req.customer_id)?;
        let (info, path, options) = self.prepare(Rpc::SearchStream, options)?;
        let response = self
            .inner
            .server_streaming::<_, model::SearchGoogleAdsStreamResponse>(
                tonic::GrpcMethod::new(&info.service, info.method),
                path,
                req,
                options,
                &crate::info::X_GOOG_API_CLIENT_HEADER,
                &params,
            )
            .await?;
        let (parts, stream) = response.into_parts();
        Ok(Response::from_parts(parts, Streaming::new(stream)))
    }

    async fn mutate(
        &self,
        req: model::MutateGoogleAdsRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::MutateGoogleAdsResponse>> {
        let params = routing_customer_id(&req.customer_id)?;
        self.unary(Rpc::Mutate, req, options, params).await
    }
}

impl crate::stub::CustomerService for Transport {
    async fn list_accessible_customers(
        &self,
        req: model::ListAccessibleCustomersRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::ListAccessibleCustomersResponse>> {
        self.unary(Rpc::ListAccessibleCustomers, req, options, String::new())
            .await
    }
}
