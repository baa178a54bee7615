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

//! The messages and enums used by the Google Ads API services.
//!
//! The Google Ads API defines thousands of messages. This module contains the
//! subset used by the services in this crate. The field numbers match the
//! `google.ads.googleads.{version}` protos, the messages are wire compatible
//! with every supported [ApiVersion][crate::ApiVersion].
//!
//! Fields that are `optional` in the protos are represented as [Option].
//! Enum fields are stored as `i32`, use the generated accessors (e.g.
//! [Campaign::status()]) to get the typed value.

use gax::paginator::PageableResponse;

mod enums;
mod errors;
mod services;
pub use enums::*;
pub use errors::*;
pub use services::*;

/// A campaign.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Campaign {
    /// The resource name, `customers/{customer_id}/campaigns/{campaign_id}`.
    #[prost(string, tag = "1")]
    pub resource_name: String,
    #[prost(enumeration = "CampaignStatus", tag = "5")]
    pub status: i32,
    #[prost(enumeration = "AdvertisingChannelType", tag = "9")]
    pub advertising_channel_type: i32,
    #[prost(string, optional, tag = "58")]
    pub name: Option<String>,
    /// The campaign id. Output only.
    #[prost(int64, optional, tag = "59")]
    pub id: Option<i64>,
    /// The resource name of the campaign budget.
    #[prost(string, optional, tag = "62")]
    pub campaign_budget: Option<String>,
    /// The start date in `YYYY-MM-DD` format.
    #[prost(string, optional, tag = "63")]
    pub start_date: Option<String>,
    /// The last day of the campaign in `YYYY-MM-DD` format.
    #[prost(string, optional, tag = "64")]
    pub end_date: Option<String>,
}

/// An ad group.
#[derive(Clone, PartialEq, prost::Message)]
pub struct AdGroup {
    /// The resource name, `customers/{customer_id}/adGroups/{ad_group_id}`.
    #[prost(string, tag = "1")]
    pub resource_name: String,
    #[prost(enumeration = "AdGroupStatus", tag = "5")]
    pub status: i32,
    /// Immutable after creation.
    #[prost(enumeration = "AdGroupType", tag = "12")]
    pub r#type: i32,
    #[prost(int64, optional, tag = "34")]
    pub id: Option<i64>,
    #[prost(string, optional, tag = "35")]
    pub name: Option<String>,
    /// The resource name of the campaign containing this ad group.
    #[prost(string, optional, tag = "38")]
    pub campaign: Option<String>,
    #[prost(int64, optional, tag = "39")]
    pub cpc_bid_micros: Option<i64>,
}

/// A customer, i.e. a Google Ads account.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Customer {
    #[prost(string, tag = "1")]
    pub resource_name: String,
    #[prost(int64, optional, tag = "19")]
    pub id: Option<i64>,
    #[prost(string, optional, tag = "20")]
    pub descriptive_name: Option<String>,
    #[prost(string, optional, tag = "21")]
    pub currency_code: Option<String>,
    #[prost(string, optional, tag = "22")]
    pub time_zone: Option<String>,
}

/// The access a user has to a customer.
///
/// The email fields are personal information, the client library masks them
/// in its logs.
#[derive(Clone, PartialEq, prost::Message)]
pub struct CustomerUserAccess {
    #[prost(string, tag = "1")]
    pub resource_name: String,
    #[prost(int64, tag = "2")]
    pub user_id: i64,
    #[prost(string, optional, tag = "3")]
    pub email_address: Option<String>,
    #[prost(enumeration = "AccessRole", tag = "4")]
    pub access_role: i32,
    /// In `yyyy-MM-dd HH:mm:ss` format.
    #[prost(string, optional, tag = "6")]
    pub access_creation_date_time: Option<String>,
    #[prost(string, optional, tag = "7")]
    pub inviter_user_email_address: Option<String>,
}

/// A change to a resource in the account.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ChangeEvent {
    /// The resource name,
    /// `customers/{customer_id}/changeEvents/{timestamp_micros}~{command_index}~{mutate_index}`.
    #[prost(string, tag = "1")]
    pub resource_name: String,
    #[prost(string, tag = "2")]
    pub change_date_time: String,
    #[prost(enumeration = "ChangeEventResourceType", tag = "3")]
    pub change_resource_type: i32,
    #[prost(string, tag = "4")]
    pub change_resource_name: String,
    /// The email of the user who made the change.
    #[prost(string, tag = "6")]
    pub user_email: String,
    #[prost(string, tag = "11")]
    pub campaign: String,
    #[prost(string, tag = "12")]
    pub ad_group: String,
}

/// Performance metrics.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Metrics {
    #[prost(int64, optional, tag = "131")]
    pub clicks: Option<i64>,
    #[prost(int64, optional, tag = "132")]
    pub cost_micros: Option<i64>,
    #[prost(int64, optional, tag = "139")]
    pub impressions: Option<i64>,
}

/// A row returned by a Google Ads Query Language query.
///
/// Only the resources named in the `SELECT` clause are populated.
#[derive(Clone, PartialEq, prost::Message)]
pub struct GoogleAdsRow {
    #[prost(message, optional, tag = "1")]
    pub customer: Option<Customer>,
    #[prost(message, optional, tag = "2")]
    pub campaign: Option<Campaign>,
    #[prost(message, optional, tag = "3")]
    pub ad_group: Option<AdGroup>,
    #[prost(message, optional, tag = "4")]
    pub metrics: Option<Metrics>,
    #[prost(message, optional, tag = "145")]
    pub change_event: Option<ChangeEvent>,
    #[prost(message, optional, tag = "146")]
    pub customer_user_access: Option<CustomerUserAccess>,
}

/// The `google.rpc.Status` message.
///
/// Mutate responses use this message to report partial failures.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Status {
    /// The status code, a `google.rpc.Code` value.
    #[prost(int32, tag = "1")]
    pub code: i32,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(message, repeated, tag = "3")]
    pub details: Vec<prost_types::Any>,
}

impl Status {
    /// Decodes the [GoogleAdsFailure] in the status details, if any.
    pub fn google_ads_failure(&self) -> gax::Result<Option<GoogleAdsFailure>> {
        use prost::Message;
        self.details
            .iter()
            .find(|any| any.type_url.ends_with(GOOGLE_ADS_FAILURE_SUFFIX))
            .map(|any| GoogleAdsFailure::decode(any.value.as_slice()))
            .transpose()
            .map_err(gax::error::Error::deser)
    }
}

const GOOGLE_ADS_FAILURE_SUFFIX: &str = ".errors.GoogleAdsFailure";

impl PageableResponse for SearchGoogleAdsResponse {
    type PageItem = GoogleAdsRow;

    fn items(self) -> Vec<Self::PageItem> {
        self.results
    }

    fn next_page_token(&self) -> String {
        self.next_page_token.clone()
    }
}
