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

//! Traits to mock the clients in this library.
//!
//! Application developers may need to mock the clients in this library to test
//! how their application works with different (and sometimes hard to trigger)
//! client and service behavior. Such test can define mocks implementing the
//! trait(s) defined in this module, initialize the client with an instance of
//! this mock in their tests, and verify their application responds as expected.

#![allow(rustdoc::broken_intra_doc_links)]

pub(crate) mod dynamic;

use crate::model;
use crate::streaming::Streaming;
use gax::options::RequestOptions;
use gax::response::Response;

/// Defines the trait used to implement [super::client::CampaignService].
///
/// Application developers may need to implement this trait to mock
/// `client::CampaignService`. In other use-cases, application developers only
/// use `client::CampaignService` and need not be concerned with this trait or
/// its implementations.
///
/// Services gain new RPCs routinely. Consequently, this trait gains new methods
/// too. To avoid breaking applications the trait provides a default
/// implementation of each method. These implementations return an error.
pub trait CampaignService: std::fmt::Debug + Send + Sync {
    /// Implements [super::client::CampaignService::mutate_campaigns].
    fn mutate_campaigns(
        &self,
        _req: model::MutateCampaignsRequest,
        _options: RequestOptions,
    ) -> impl std::future::Future<Output = crate::Result<Response<model::MutateCampaignsResponse>>>
    + Send {
        unimplemented_stub("MutateCampaigns")
    }
}

/// Defines the trait used to implement [super::client::AdGroupService].
///
/// Application developers may need to implement this trait to mock
/// `client::AdGroupService`. In other use-cases, application developers only
/// use `client::AdGroupService` and need not be concerned with this trait or
/// its implementations.
pub trait AdGroupService: std::fmt::Debug + Send + Sync {
    /// Implements [super::client::AdGroupService::mutate_ad_groups].
    fn mutate_ad_groups(
        &self,
        _req: model::MutateAdGroupsRequest,
        _options: RequestOptions,
    ) -> impl std::future::Future<Output = crate::Result<Response<model::MutateAdGroupsResponse>>>
    + Send {
        unimplemented_stub("MutateAdGroups")
    }
}

/// Defines the trait used to implement [super::client::GoogleAdsService].
///
/// Application developers may need to implement this trait to mock
/// `client::GoogleAdsService`. In other use-cases, application developers only
/// use `client::GoogleAdsService` and need not be concerned with this trait or
/// its implementations.
pub trait GoogleAdsService: std::fmt::Debug + Send + Sync {
    /// Implements [super::client::GoogleAdsService::search].
    fn search(
        &self,
        _req: model::SearchGoogleAdsRequest,
        _options: RequestOptions,
    ) -> impl std::future::Future<Output = crate::Result<Response<model::SearchGoogleAdsResponse>>>
    + Send {
        unimplemented_stub("Search")
    }

    /// Implements [super::client::GoogleAdsService::search_stream].
    fn search_stream(
        &self,
        _req: model::SearchGoogleAdsStreamRequest,
        _options: RequestOptions,
    ) -> impl std::future::Future<
        Output = crate::Result<Response<Streaming<model::SearchGoogleAdsStreamResponse>>>,
    > + Send {
        unimplemented_stub("SearchStream")
    }

    /// Implements [super::client::GoogleAdsService::mutate].
    fn mutate(
        &self,
        _req: model::MutateGoogleAdsRequest,
        _options: RequestOptions,
    ) -> impl std::future::Future<Output = crate::Result<Response<model::MutateGoogleAdsResponse>>>
    + Send {
        unimplemented_stub("Mutate")
    }
}

/// Defines the trait used to implement [super::client::CustomerService].
///
/// Application developers may need to implement this trait to mock
/// `client::CustomerService`. In other use-cases, application developers only
/// use `client::CustomerService` and need not be concerned with this trait or
/// its implementations.
pub trait CustomerService: std::fmt::Debug + Send + Sync {
    /// Implements [super::client::CustomerService::list_accessible_customers].
    fn list_accessible_customers(
        &self,
        _req: model::ListAccessibleCustomersRequest,
        _options: RequestOptions,
    ) -> impl std::future::Future<
        Output = crate::Result<Response<model::ListAccessibleCustomersResponse>>,
    > + Send {
        unimplemented_stub("ListAccessibleCustomers")
    }
}

async fn unimplemented_stub<T: Send>(method: &'static str) -> crate::Result<T> {
    Err(crate::Error::other(format!(
        "{method} is not implemented by this stub"
    )))
}
