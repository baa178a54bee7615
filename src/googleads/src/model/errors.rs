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

//! The messages describing failed Google Ads API requests.

use super::QuotaRateScope;

/// Describes how a Google Ads API request failed.
///
/// The service returns this message in the
/// `google.ads.googleads.{version}.errors.googleadsfailure-bin` trailer of
/// failed requests, and in the `partial_failure_error` field of mutate
/// responses when partial failures are enabled.
#[derive(Clone, PartialEq, prost::Message)]
pub struct GoogleAdsFailure {
    /// The list of errors that occurred.
    #[prost(message, repeated, tag = "1")]
    pub errors: Vec<GoogleAdsError>,
    /// The unique id for the request, useful for debugging.
    #[prost(string, tag = "2")]
    pub request_id: String,
}

/// An error in a Google Ads API request.
#[derive(Clone, PartialEq, prost::Message)]
pub struct GoogleAdsError {
    /// An enum value indicating the kind of error.
    #[prost(message, optional, tag = "1")]
    pub error_code: Option<ErrorCode>,
    /// A human-readable description of the error.
    #[prost(string, tag = "2")]
    pub message: String,
    /// The value that triggered the error.
    #[prost(message, optional, tag = "3")]
    pub trigger: Option<Value>,
    /// Describes the part of the request proto that caused the error.
    #[prost(message, optional, tag = "4")]
    pub location: Option<ErrorLocation>,
    #[prost(message, optional, tag = "5")]
    pub details: Option<ErrorDetails>,
}

/// The error reason, one of the per-category error enums.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ErrorCode {
    #[prost(
        oneof = "error_code::ErrorCode",
        tags = "1, 2, 3, 4, 5, 7, 8, 9, 10, 11, 12, 13, 14, 15, 17"
    )]
    pub error_code: Option<error_code::ErrorCode>,
}

/// Nested types for [ErrorCode].
pub mod error_code {
    /// The error category and its enum value.
    ///
    /// The values are the numeric value of the per-category error enum, e.g.
    /// `QuotaErrorEnum.QuotaError.RESOURCE_EXHAUSTED` is `2`.
    #[derive(Clone, Copy, PartialEq, prost::Oneof)]
    pub enum ErrorCode {
        #[prost(int32, tag = "1")]
        RequestError(i32),
        #[prost(int32, tag = "2")]
        BiddingStrategyError(i32),
        #[prost(int32, tag = "3")]
        UrlFieldError(i32),
        #[prost(int32, tag = "4")]
        ListOperationError(i32),
        #[prost(int32, tag = "5")]
        QueryError(i32),
        #[prost(int32, tag = "7")]
        MutateError(i32),
        #[prost(int32, tag = "8")]
        FieldMaskError(i32),
        #[prost(int32, tag = "9")]
        AuthorizationError(i32),
        #[prost(int32, tag = "10")]
        InternalError(i32),
        #[prost(int32, tag = "11")]
        QuotaError(i32),
        #[prost(int32, tag = "12")]
        AdError(i32),
        #[prost(int32, tag = "13")]
        AdGroupError(i32),
        #[prost(int32, tag = "14")]
        CampaignBudgetError(i32),
        #[prost(int32, tag = "15")]
        CampaignError(i32),
        #[prost(int32, tag = "17")]
        AuthenticationError(i32),
    }

    impl ErrorCode {
        /// The name of the error category, e.g. `quota_error`.
        pub fn category(&self) -> &'static str {
            match self {
                Self::RequestError(_) => "request_error",
                Self::BiddingStrategyError(_) => "bidding_strategy_error",
                Self::UrlFieldError(_) => "url_field_error",
                Self::ListOperationError(_) => "list_operation_error",
                Self::QueryError(_) => "query_error",
                Self::MutateError(_) => "mutate_error",
                Self::FieldMaskError(_) => "field_mask_error",
                Self::AuthorizationError(_) => "authorization_error",
                Self::InternalError(_) => "internal_error",
                Self::QuotaError(_) => "quota_error",
                Self::AdError(_) => "ad_error",
                Self::AdGroupError(_) => "ad_group_error",
                Self::CampaignBudgetError(_) => "campaign_budget_error",
                Self::CampaignError(_) => "campaign_error",
                Self::AuthenticationError(_) => "authentication_error",
            }
        }
    }
}

/// A generic data container, used as the error trigger.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Value {
    #[prost(oneof = "value::Value", tags = "1, 2, 3, 4, 5")]
    pub value: Option<value::Value>,
}

/// Nested types for [Value][struct@Value].
pub mod value {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Value {
        #[prost(bool, tag = "1")]
        BooleanValue(bool),
        #[prost(int64, tag = "2")]
        Int64Value(i64),
        #[prost(float, tag = "3")]
        FloatValue(f32),
        #[prost(double, tag = "4")]
        DoubleValue(f64),
        #[prost(string, tag = "5")]
        StringValue(String),
    }
}

/// Describes the part of the request proto that caused the error.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ErrorLocation {
    /// The path from the root of the request to the field.
    #[prost(message, repeated, tag = "2")]
    pub field_path_elements: Vec<FieldPathElement>,
}

impl GoogleAdsError {
    /// The path of the field that caused the error, empty if unknown.
    pub fn location_path(&self) -> String {
        self.location
            .as_ref()
            .map(ErrorLocation::path)
            .unwrap_or_default()
    }
}

impl ErrorLocation {
    /// Formats the location as a path, e.g. `operations[1].create.name`.
    pub fn path(&self) -> String {
        self.field_path_elements
            .iter()
            .map(|e| match e.index {
                Some(i) => format!("{}[{i}]", e.field_name),
                None => e.field_name.clone(),
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// A part of a field path.
#[derive(Clone, PartialEq, prost::Message)]
pub struct FieldPathElement {
    #[prost(string, tag = "1")]
    pub field_name: String,
    /// The index of the field in a repeated field, if any.
    #[prost(int32, optional, tag = "3")]
    pub index: Option<i32>,
}

/// Additional error details.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ErrorDetails {
    /// The error code that should have been returned, but wasn't. Used when
    /// the error code is not yet published.
    #[prost(string, tag = "1")]
    pub unpublished_error_code: String,
    #[prost(message, optional, tag = "4")]
    pub quota_error_details: Option<QuotaErrorDetails>,
}

/// Details of a quota error.
#[derive(Clone, PartialEq, prost::Message)]
pub struct QuotaErrorDetails {
    #[prost(enumeration = "QuotaRateScope", tag = "1")]
    pub rate_scope: i32,
    /// The high level description of the quota bucket, e.g.
    /// `Requests per developer token per day`.
    #[prost(string, tag = "2")]
    pub rate_name: String,
    /// How long to wait before retrying the request.
    #[prost(message, optional, tag = "3")]
    pub retry_delay: Option<prost_types::Duration>,
}
