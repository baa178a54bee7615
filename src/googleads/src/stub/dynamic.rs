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

//! Object-safe versions of the traits in [super].
//!
//! The clients hold their stub as `Arc<dyn Trait>`. The traits in
//! [super] use `impl Future` return types and are not object safe, each trait
//! here has a blanket implementation for the corresponding trait in [super].

use crate::model;
use crate::streaming::Streaming;
use gax::options::RequestOptions;
use gax::response::Response;

/// A dyn-compatible, crate-private version of [super::CampaignService].
#[async_trait::async_trait]
pub trait CampaignService: std::fmt::Debug + Send + Sync {
    async fn mutate_campaigns(
        &self,
        req: model::MutateCampaignsRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::MutateCampaignsResponse>>;
}

#[async_trait::async_trait]
impl<T: super::CampaignService> CampaignService for T {
    async fn mutate_campaigns(
        &self,
        req: model::MutateCampaignsRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::MutateCampaignsResponse>> {
        <T as super::CampaignService>::mutate_campaigns(self, req, options).await
    }
}

/// A dyn-compatible, crate-private version of [super::AdGroupService].
#[async_trait::async_trait]
pub trait AdGroupService: std::fmt::Debug + Send + Sync {
    async fn mutate_ad_groups(
        &self,
        req: model::MutateAdGroupsRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::MutateAdGroupsResponse>>;
}

#[async_trait::async_trait]
impl<T: super::AdGroupService> AdGroupService for T {
    async fn mutate_ad_groups(
        &self,
        req: model::MutateAdGroupsRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::MutateAdGroupsResponse>> {
        <T as super::AdGroupService>::mutate_ad_groups(self, req, options).await
    }
}

/// A dyn-compatible, crate-private version of [super::GoogleAdsService].
#[async_trait::async_trait]
pub trait GoogleAdsService: std::fmt::Debug + Send + Sync {
    async fn search(
        &self,
        req: model::SearchGoogleAdsRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::SearchGoogleAdsResponse>>;

    async fn search_stream(
        &self,
        req: model::SearchGoogleAdsStreamRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<Streaming<model::SearchGoogleAdsStreamResponse>>>;

    async fn mutate(
        &self,
        req: model::MutateGoogleAdsRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::MutateGoogleAdsResponse>>;
}

#[async_trait::async_trait]
impl<T: super::GoogleAdsService> GoogleAdsService for T {
    async fn search(
        &self,
        req: model::SearchGoogleAdsRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::SearchGoogleAdsResponse>> {
        <T as super::GoogleAdsService>::search(self, req, options).await
    }

    async fn search_stream(
        &self,
        req: model::SearchGoogleAdsStreamRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<Streaming<model::SearchGoogleAdsStreamResponse>>> {
        <T as super::GoogleAdsService>::search_stream(self, req, options).await
    }

    async fn mutate(
        &self,
        req: model::MutateGoogleAdsRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::MutateGoogleAdsResponse>> {
        <T as super::GoogleAdsService>::mutate(self, req, options).await
    }
}

/// A dyn-compatible, crate-private version of [super::CustomerService].
#[async_trait::async_trait]
pub trait CustomerService: std::fmt::Debug + Send + Sync {
    async fn list_accessible_customers(
        &self,
        req: model::ListAccessibleCustomersRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::ListAccessibleCustomersResponse>>;
}

#[async_trait::async_trait]
impl<T: super::CustomerService> CustomerService for T {
    async fn list_accessible_customers(
        &self,
        req: model::ListAccessibleCustomersRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::ListAccessibleCustomersResponse>> {
        <T as super::CustomerService>::list_accessible_customers(self, req, options).await
    }
}
