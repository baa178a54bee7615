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

//! The request and response messages of the services.

use super::{
    AdGroup, Campaign, GoogleAdsFailure, GoogleAdsRow, ResponseContentType, Status,
    SummaryRowSetting,
};

/// The request message for `CampaignService.MutateCampaigns`.
#[derive(Clone, PartialEq, prost::Message)]
pub struct MutateCampaignsRequest {
    /// The id of the customer whose campaigns are being modified.
    #[prost(string, tag = "1")]
    pub customer_id: String,
    #[prost(message, repeated, tag = "2")]
    pub operations: Vec<CampaignOperation>,
    /// If true, successful operations are carried out and invalid operations
    /// return errors. Otherwise all operations are carried out in one
    /// transaction.
    #[prost(bool, tag = "3")]
    pub partial_failure: bool,
    /// If true, the request is validated but not executed.
    #[prost(bool, tag = "4")]
    pub validate_only: bool,
    #[prost(enumeration = "ResponseContentType", tag = "5")]
    pub response_content_type: i32,
}

/// A single operation (create, update, remove) on a campaign.
#[derive(Clone, PartialEq, prost::Message)]
pub struct CampaignOperation {
    /// Determines which fields are modified in an update.
    #[prost(message, optional, tag = "4")]
    pub update_mask: Option<prost_types::FieldMask>,
    #[prost(oneof = "campaign_operation::Operation", tags = "1, 2, 3")]
    pub operation: Option<campaign_operation::Operation>,
}

/// Nested types for [CampaignOperation].
pub mod campaign_operation {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Operation {
        /// Create a new campaign.
        #[prost(message, tag = "1")]
        Create(super::Campaign),
        /// Update a campaign, the resource name identifies the campaign.
        #[prost(message, tag = "2")]
        Update(super::Campaign),
        /// Remove the campaign with this resource name.
        #[prost(string, tag = "3")]
        Remove(String),
    }
}

/// The response message for `CampaignService.MutateCampaigns`.
#[derive(Clone, PartialEq, prost::Message)]
pub struct MutateCampaignsResponse {
    /// Errors for the failed operations, when `partial_failure` is set.
    #[prost(message, optional, tag = "3")]
    pub partial_failure_error: Option<Status>,
    #[prost(message, repeated, tag = "2")]
    pub results: Vec<MutateCampaignResult>,
}

/// The result of a campaign mutate.
#[derive(Clone, PartialEq, prost::Message)]
pub struct MutateCampaignResult {
    #[prost(string, tag = "1")]
    pub resource_name: String,
    /// Only set if `response_content_type` is `MUTABLE_RESOURCE`.
    #[prost(message, optional, tag = "2")]
    pub campaign: Option<Campaign>,
}

/// The request message for `AdGroupService.MutateAdGroups`.
#[derive(Clone, PartialEq, prost::Message)]
pub struct MutateAdGroupsRequest {
    #[prost(string, tag = "1")]
    pub customer_id: String,
    #[prost(message, repeated, tag = "2")]
    pub operations: Vec<AdGroupOperation>,
    #[prost(bool, tag = "3")]
    pub partial_failure: bool,
    #[prost(bool, tag = "4")]
    pub validate_only: bool,
    #[prost(enumeration = "ResponseContentType", tag = "5")]
    pub response_content_type: i32,
}

/// A single operation (create, update, remove) on an ad group.
#[derive(Clone, PartialEq, prost::Message)]
pub struct AdGroupOperation {
    #[prost(message, optional, tag = "4")]
    pub update_mask: Option<prost_types::FieldMask>,
    #[prost(oneof = "ad_group_operation::Operation", tags = "1, 2, 3")]
    pub operation: Option<ad_group_operation::Operation>,
}

/// Nested types for [AdGroupOperation].
pub mod ad_group_operation {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Operation {
        #[prost(message, tag = "1")]
        Create(super::AdGroup),
        #[prost(message, tag = "2")]
        Update(super::AdGroup),
        #[prost(string, tag = "3")]
        Remove(String),
    }
}

/// The response message for `AdGroupService.MutateAdGroups`.
#[derive(Clone, PartialEq, prost::Message)]
pub struct MutateAdGroupsResponse {
    #[prost(message, optional, tag = "3")]
    pub partial_failure_error: Option<Status>,
    #[prost(message, repeated, tag = "2")]
    pub results: Vec<MutateAdGroupResult>,
}

/// The result of an ad group mutate.
#[derive(Clone, PartialEq, prost::Message)]
pub struct MutateAdGroupResult {
    #[prost(string, tag = "1")]
    pub resource_name: String,
    #[prost(message, optional, tag = "2")]
    pub ad_group: Option<AdGroup>,
}

/// The request message for `GoogleAdsService.Search`.
#[derive(Clone, PartialEq, prost::Message)]
pub struct SearchGoogleAdsRequest {
    /// The id of the customer being queried.
    #[prost(string, tag = "1")]
    pub customer_id: String,
    /// The Google Ads Query Language query.
    #[prost(string, tag = "2")]
    pub query: String,
    /// The token of the page to retrieve. Empty for the first page.
    #[prost(string, tag = "3")]
    pub page_token: String,
    #[prost(bool, tag = "5")]
    pub validate_only: bool,
    /// If true, the response includes the total number of matching rows,
    /// ignoring the `LIMIT` clause.
    #[prost(bool, tag = "7")]
    pub return_total_results_count: bool,
    #[prost(enumeration = "SummaryRowSetting", tag = "8")]
    pub summary_row_setting: i32,
}

/// The response message for `GoogleAdsService.Search`.
#[derive(Clone, PartialEq, prost::Message)]
pub struct SearchGoogleAdsResponse {
    #[prost(message, repeated, tag = "1")]
    pub results: Vec<GoogleAdsRow>,
    /// The token for the next page. Empty on the last page.
    #[prost(string, tag = "2")]
    pub next_page_token: String,
    #[prost(int64, tag = "3")]
    pub total_results_count: i64,
    /// The fields requested in the query.
    #[prost(message, optional, tag = "5")]
    pub field_mask: Option<prost_types::FieldMask>,
    #[prost(message, optional, tag = "6")]
    pub summary_row: Option<GoogleAdsRow>,
}

/// The request message for `GoogleAdsService.SearchStream`.
#[derive(Clone, PartialEq, prost::Message)]
pub struct SearchGoogleAdsStreamRequest {
    #[prost(string, tag = "1")]
    pub customer_id: String,
    #[prost(string, tag = "2")]
    pub query: String,
    #[prost(enumeration = "SummaryRowSetting", tag = "3")]
    pub summary_row_setting: i32,
}

/// A batch of rows returned by `GoogleAdsService.SearchStream`.
#[derive(Clone, PartialEq, prost::Message)]
pub struct SearchGoogleAdsStreamResponse {
    #[prost(message, repeated, tag = "1")]
    pub results: Vec<GoogleAdsRow>,
    #[prost(message, optional, tag = "2")]
    pub field_mask: Option<prost_types::FieldMask>,
    /// Only present in the last batch, if requested.
    #[prost(message, optional, tag = "3")]
    pub summary_row: Option<GoogleAdsRow>,
    #[prost(string, tag = "4")]
    pub request_id: String,
}

/// The request message for `GoogleAdsService.Mutate`.
#[derive(Clone, PartialEq, prost::Message)]
pub struct MutateGoogleAdsRequest {
    #[prost(string, tag = "1")]
    pub customer_id: String,
    /// The operations, applied in order. Operations may reference resources
    /// created by earlier operations using temporary (negative) ids.
    #[prost(message, repeated, tag = "2")]
    pub mutate_operations: Vec<MutateOperation>,
    #[prost(bool, tag = "3")]
    pub partial_failure: bool,
    #[prost(bool, tag = "4")]
    pub validate_only: bool,
    #[prost(enumeration = "ResponseContentType", tag = "5")]
    pub response_content_type: i32,
}

/// An operation on any resource type.
#[derive(Clone, PartialEq, prost::Message)]
pub struct MutateOperation {
    #[prost(oneof = "mutate_operation::Operation", tags = "5, 10")]
    pub operation: Option<mutate_operation::Operation>,
}

/// Nested types for [MutateOperation].
pub mod mutate_operation {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Operation {
        #[prost(message, tag = "5")]
        AdGroupOperation(super::AdGroupOperation),
        #[prost(message, tag = "10")]
        CampaignOperation(super::CampaignOperation),
    }
}

/// The response message for `GoogleAdsService.Mutate`.
#[derive(Clone, PartialEq, prost::Message)]
pub struct MutateGoogleAdsResponse {
    #[prost(message, optional, tag = "3")]
    pub partial_failure_error: Option<Status>,
    /// One response per operation, in the same order.
    #[prost(message, repeated, tag = "1")]
    pub mutate_operation_responses: Vec<MutateOperationResponse>,
}

/// The result of a single [MutateOperation].
#[derive(Clone, PartialEq, prost::Message)]
pub struct MutateOperationResponse {
    #[prost(oneof = "mutate_operation_response::Response", tags = "5, 10")]
    pub response: Option<mutate_operation_response::Response>,
}

/// Nested types for [MutateOperationResponse].
pub mod mutate_operation_response {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Response {
        #[prost(message, tag = "5")]
        AdGroupResult(super::MutateAdGroupResult),
        #[prost(message, tag = "10")]
        CampaignResult(super::MutateCampaignResult),
    }
}

/// The request message for `CustomerService.ListAccessibleCustomers`.
#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct ListAccessibleCustomersRequest {}

/// The response message for `CustomerService.ListAccessibleCustomers`.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ListAccessibleCustomersResponse {
    /// The resource names of the customers directly accessible by the user
    /// authenticating the call.
    #[prost(string, repeated, tag = "1")]
    pub resource_names: Vec<String>,
}

macro_rules! partial_failure {
    ($($response:ty),*) => {
        $(
        impl $response {
            /// Decodes the partial failure errors, if any.
            ///
            /// Returns `None` if all operations succeeded, or if the request
            /// did not enable partial failures.
            pub fn partial_failure(&self) -> gax::Result<Option<GoogleAdsFailure>> {
                match &self.partial_failure_error {
                    None => Ok(None),
                    Some(status) => status.google_ads_failure(),
                }
            }
        }
        )*
    };
}

partial_failure!(
    MutateCampaignsResponse,
    MutateAdGroupsResponse,
    MutateGoogleAdsResponse
);
