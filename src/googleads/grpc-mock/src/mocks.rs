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

use async_trait::async_trait;
use google_ads::model;
use tokio::sync::mpsc;

// The streaming RPCs use an easy-to-create type (mpsc::Receiver) in the mock.
// The server adapts it to the stream type used by tonic.

#[mockall::automock]
#[async_trait]
pub trait CampaignService: Send + Sync + 'static {
    async fn mutate_campaigns(
        &self,
        request: tonic::Request<model::MutateCampaignsRequest>,
    ) -> tonic::Result<tonic::Response<model::MutateCampaignsResponse>>;
}

#[mockall::automock]
#[async_trait]
pub trait AdGroupService: Send + Sync + 'static {
    async fn mutate_ad_groups(
        &self,
        request: tonic::Request<model::MutateAdGroupsRequest>,
    ) -> tonic::Result<tonic::Response<model::MutateAdGroupsResponse>>;
}

#[mockall::automock]
#[async_trait]
pub trait GoogleAdsService: Send + Sync + 'static {
    async fn search(
        &self,
        request: tonic::Request<model::SearchGoogleAdsRequest>,
    ) -> tonic::Result<tonic::Response<model::SearchGoogleAdsResponse>>;

    async fn search_stream(
        &self,
        request: tonic::Request<model::SearchGoogleAdsStreamRequest>,
    ) -> tonic::Result<
        tonic::Response<mpsc::Receiver<tonic::Result<model::SearchGoogleAdsStreamResponse>>>,
    >;

    async fn mutate(
        &self,
        request: tonic::Request<model::MutateGoogleAdsRequest>,
    ) -> tonic::Result<tonic::Response<model::MutateGoogleAdsResponse>>;
}

#[mockall::automock]
#[async_trait]
pub trait CustomerService: Send + Sync + 'static {
    async fn list_accessible_customers(
        &self,
        request: tonic::Request<model::ListAccessibleCustomersRequest>,
    ) -> tonic::Result<tonic::Response<model::ListAccessibleCustomersResponse>>;
}
