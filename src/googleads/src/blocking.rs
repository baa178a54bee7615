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

//! Blocking clients for applications without an async runtime.
//!
//! Each blocking client owns a current-thread Tokio runtime and runs one
//! request at a time with `block_on`. Do not use these clients from inside an
//! async runtime, `block_on` panics in that case.
//!
//! The request methods take a closure that configures the request builder of
//! the async client:
//!
//! ```no_run
//! # use google_ads::blocking::GoogleAdsClient;
//! # use google_ads::config::Config;
//! # fn sample() -> anyhow::Result<()> {
//! let client = GoogleAdsClient::from_config(Config::load_from_env()?)?;
//! let rows = client.google_ads_service().search_rows(|b| {
//!     b.set_customer_id("1234567890")
//!         .set_query("SELECT campaign.id, campaign.name FROM campaign")
//! });
//! for row in rows {
//!     println!("{:?}", row?.campaign);
//! }
//! # Ok(()) }
//! ```

use crate::builder::{ad_group_service, campaign_service, customer_service, google_ads_service};
use crate::client;
use crate::config::Config;
use crate::model;
use crate::streaming::Streaming;
use futures::{Stream, StreamExt};
use gax::paginator::{ItemPaginator, Paginator};
use std::sync::Arc;
use tokio::runtime::Runtime;

/// The blocking version of [client::GoogleAdsClient].
#[derive(Clone, Debug)]
pub struct GoogleAdsClient {
    runtime: Arc<Runtime>,
    inner: client::GoogleAdsClient,
}

impl GoogleAdsClient {
    /// Creates a client using `config` and the default settings.
    pub fn from_config(config: Config) -> gax::client_builder::Result<Self> {
        Self::from_builder(client::GoogleAdsClient::builder().with_config(config))
    }

    /// Creates a client from a fully configured builder.
    pub fn from_builder(builder: client::ClientBuilder) -> gax::client_builder::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(gax::client_builder::Error::transport)?;
        let inner = runtime.block_on(builder.build())?;
        Ok(Self {
            runtime: Arc::new(runtime),
            inner,
        })
    }

    /// Returns a blocking client for `CampaignService`.
    pub fn campaign_service(&self) -> CampaignService {
        CampaignService {
            runtime: self.runtime.clone(),
            inner: self.inner.campaign_service(),
        }
    }

    /// Returns a blocking client for `AdGroupService`.
    pub fn ad_group_service(&self) -> AdGroupService {
        AdGroupService {
            runtime: self.runtime.clone(),
            inner: self.inner.ad_group_service(),
        }
    }

    /// Returns a blocking client for `GoogleAdsService`.
    pub fn google_ads_service(&self) -> GoogleAdsService {
        GoogleAdsService {
            runtime: self.runtime.clone(),
            inner: self.inner.google_ads_service(),
        }
    }

    /// Returns a blocking client for `CustomerService`.
    pub fn customer_service(&self) -> CustomerService {
        CustomerService {
            runtime: self.runtime.clone(),
            inner: self.inner.customer_service(),
        }
    }
}

/// The blocking version of [client::CampaignService].
#[derive(Clone, Debug)]
pub struct CampaignService {
    runtime: Arc<Runtime>,
    inner: client::CampaignService,
}

impl CampaignService {
    /// Creates, updates, or removes campaigns.
    pub fn mutate_campaigns<F>(&self, f: F) -> crate::Result<model::MutateCampaignsResponse>
    where
        F: FnOnce(campaign_service::MutateCampaigns) -> campaign_service::MutateCampaigns,
    {
        self.runtime
            .block_on(f(self.inner.mutate_campaigns()).send())
    }
}

/// The blocking version of [client::AdGroupService].
#[derive(Clone, Debug)]
pub struct AdGroupService {
    runtime: Arc<Runtime>,
    inner: client::AdGroupService,
}

impl AdGroupService {
    /// Creates, updates, or removes ad groups.
    pub fn mutate_ad_groups<F>(&self, f: F) -> crate::Result<model::MutateAdGroupsResponse>
    where
        F: FnOnce(ad_group_service::MutateAdGroups) -> ad_group_service::MutateAdGroups,
    {
        self.runtime
            .block_on(f(self.inner.mutate_ad_groups()).send())
    }
}

/// The blocking version of [client::GoogleAdsService].
#[derive(Clone, Debug)]
pub struct GoogleAdsService {
    runtime: Arc<Runtime>,
    inner: client::GoogleAdsService,
}

impl GoogleAdsService {
    /// Returns one page of rows matching the query.
    pub fn search<F>(&self, f: F) -> crate::Result<model::SearchGoogleAdsResponse>
    where
        F: FnOnce(google_ads_service::Search) -> google_ads_service::Search,
    {
        self.runtime.block_on(f(self.inner.search()).send())
    }

    /// Iterates over all the pages of rows matching the query.
    pub fn search_pages<F>(
        &self,
        f: F,
    ) -> BlockingStream<Paginator<model::SearchGoogleAdsResponse, crate::Error>>
    where
        F: FnOnce(google_ads_service::Search) -> google_ads_service::Search,
    {
        BlockingStream::new(self.runtime.clone(), f(self.inner.search()).by_page())
    }

    /// Iterates over all the rows matching the query.
    pub fn search_rows<F>(
        &self,
        f: F,
    ) -> BlockingStream<ItemPaginator<model::SearchGoogleAdsResponse, crate::Error>>
    where
        F: FnOnce(google_ads_service::Search) -> google_ads_service::Search,
    {
        BlockingStream::new(self.runtime.clone(), f(self.inner.search()).by_item())
    }

    /// Starts a streaming search and iterates over its batches.
    pub fn search_stream<F>(
        &self,
        f: F,
    ) -> crate::Result<BlockingStream<Streaming<model::SearchGoogleAdsStreamResponse>>>
    where
        F: FnOnce(google_ads_service::SearchStream) -> google_ads_service::SearchStream,
    {
        let stream = self
            .runtime
            .block_on(f(self.inner.search_stream()).send())?;
        Ok(BlockingStream::new(self.runtime.clone(), stream))
    }

    /// Creates, updates, or removes resources of any type.
    pub fn mutate<F>(&self, f: F) -> crate::Result<model::MutateGoogleAdsResponse>
    where
        F: FnOnce(google_ads_service::Mutate) -> google_ads_service::Mutate,
    {
        self.runtime.block_on(f(self.inner.mutate()).send())
    }
}

/// The blocking version of [client::CustomerService].
#[derive(Clone, Debug)]
pub struct CustomerService {
    runtime: Arc<Runtime>,
    inner: client::CustomerService,
}

impl CustomerService {
    /// Returns the resource names of the customers directly accessible by the
    /// user authenticating the call.
    pub fn list_accessible_customers(&self) -> crate::Result<model::ListAccessibleCustomersResponse> {
        self.list_accessible_customers_with(|b| b)
    }

    /// Like [list_accessible_customers][Self::list_accessible_customers], with
    /// per-request options.
    pub fn list_accessible_customers_with<F>(
        &self,
        f: F,
    ) -> crate::Result<model::ListAccessibleCustomersResponse>
    where
        F: FnOnce(
            customer_service::ListAccessibleCustomers,
        ) -> customer_service::ListAccessibleCustomers,
    {
        self.runtime
            .block_on(f(self.inner.list_accessible_customers()).send())
    }
}

/// Iterates over an async stream, blocking on each item.
pub struct BlockingStream<S> {
    runtime: Arc<Runtime>,
    stream: S,
}

impl<S> BlockingStream<S> {
    fn new(runtime: Arc<Runtime>, stream: S) -> Self {
        Self { runtime, stream }
    }
}

impl<S> Iterator for BlockingStream<S>
where
    S: Stream + Unpin,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.runtime.block_on(self.stream.next())
    }
}

impl<S> std::fmt::Debug for BlockingStream<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingStream").finish_non_exhaustive()
    }
}
