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

/// The possible statuses of a campaign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum CampaignStatus {
    /// Not specified.
    Unspecified = 0,
    /// Used for return value only. Represents a value unknown in this version.
    Unknown = 1,
    Enabled = 2,
    Paused = 3,
    Removed = 4,
}

impl CampaignStatus {
    /// The value name, as used in the proto definition.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::Unspecified => "UNSPECIFIED",
            Self::Unknown => "UNKNOWN",
            Self::Enabled => "ENABLED",
            Self::Paused => "PAUSED",
            Self::Removed => "REMOVED",
        }
    }

    /// Creates an enum from its proto name.
    pub fn from_str_name(value: &str) -> Option<Self> {
        match value {
            "UNSPECIFIED" => Some(Self::Unspecified),
            "UNKNOWN" => Some(Self::Unknown),
            "ENABLED" => Some(Self::Enabled),
            "PAUSED" => Some(Self::Paused),
            "REMOVED" => Some(Self::Removed),
            _ => None,
        }
    }
}

/// The possible statuses of an ad group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum AdGroupStatus {
    Unspecified = 0,
    Unknown = 1,
    Enabled = 2,
    Paused = 3,
    Removed = 4,
}

impl AdGroupStatus {
    /// The value name, as used in the proto definition.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::Unspecified => "UNSPECIFIED",
            Self::Unknown => "UNKNOWN",
            Self::Enabled => "ENABLED",
            Self::Paused => "PAUSED",
            Self::Removed => "REMOVED",
        }
    }

    /// Creates an enum from its proto name.
    pub fn from_str_name(value: &str) -> Option<Self> {
        match value {
            "UNSPECIFIED" => Some(Self::Unspecified),
            "UNKNOWN" => Some(Self::Unknown),
            "ENABLED" => Some(Self::Enabled),
            "PAUSED" => Some(Self::Paused),
            "REMOVED" => Some(Self::Removed),
            _ => None,
        }
    }
}

/// The type of an ad group.
///
/// The type determines which ads and criteria the ad group accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum AdGroupType {
    Unspecified = 0,
    Unknown = 1,
    /// The default ad group type for Search campaigns.
    SearchStandard = 2,
    /// The default ad group type for Display campaigns.
    DisplayStandard = 3,
    /// The ad group type for Shopping campaigns serving standard product ads.
    ShoppingProductAds = 4,
    HotelAds = 6,
    ShoppingSmartAds = 7,
    VideoBumper = 8,
    VideoTrueViewInStream = 9,
    VideoTrueViewInDisplay = 10,
    VideoNonSkippableInStream = 11,
    SearchDynamicAds = 13,
    ShoppingComparisonListingAds = 14,
    PromotedHotelAds = 15,
    VideoResponsive = 16,
    VideoEfficientReach = 17,
    SmartCampaignAds = 18,
    TravelAds = 19,
}

impl AdGroupType {
    /// The value name, as used in the proto definition.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::Unspecified => "UNSPECIFIED",
            Self::Unknown => "UNKNOWN",
            Self::SearchStandard => "SEARCH_STANDARD",
            Self::DisplayStandard => "DISPLAY_STANDARD",
            Self::ShoppingProductAds => "SHOPPING_PRODUCT_ADS",
            Self::HotelAds => "HOTEL_ADS",
            Self::ShoppingSmartAds => "SHOPPING_SMART_ADS",
            Self::VideoBumper => "VIDEO_BUMPER",
            Self::VideoTrueViewInStream => "VIDEO_TRUE_VIEW_IN_STREAM",
            Self::VideoTrueViewInDisplay => "VIDEO_TRUE_VIEW_IN_DISPLAY",
            Self::VideoNonSkippableInStream => "VIDEO_NON_SKIPPABLE_IN_STREAM",
            Self::SearchDynamicAds => "SEARCH_DYNAMIC_ADS",
            Self::ShoppingComparisonListingAds => "SHOPPING_COMPARISON_LISTING_ADS",
            Self::PromotedHotelAds => "PROMOTED_HOTEL_ADS",
            Self::VideoResponsive => "VIDEO_RESPONSIVE",
            Self::VideoEfficientReach => "VIDEO_EFFICIENT_REACH",
            Self::SmartCampaignAds => "SMART_CAMPAIGN_ADS",
            Self::TravelAds => "TRAVEL_ADS",
        }
    }
}

/// The primary serving target for the ads in a campaign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum AdvertisingChannelType {
    Unspecified = 0,
    Unknown = 1,
    Search = 2,
    Display = 3,
    Shopping = 4,
    Hotel = 5,
    Video = 6,
    /// App campaigns. Also used for App Campaigns for Engagement.
    MultiChannel = 7,
    Local = 8,
    Smart = 9,
    PerformanceMax = 10,
    LocalServices = 11,
    Travel = 13,
    DemandGen = 14,
}

impl AdvertisingChannelType {
    /// The value name, as used in the proto definition.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::Unspecified => "UNSPECIFIED",
            Self::Unknown => "UNKNOWN",
            Self::Search => "SEARCH",
            Self::Display => "DISPLAY",
            Self::Shopping => "SHOPPING",
            Self::Hotel => "HOTEL",
            Self::Video => "VIDEO",
            Self::MultiChannel => "MULTI_CHANNEL",
            Self::Local => "LOCAL",
            Self::Smart => "SMART",
            Self::PerformanceMax => "PERFORMANCE_MAX",
            Self::LocalServices => "LOCAL_SERVICES",
            Self::Travel => "TRAVEL",
            Self::DemandGen => "DEMAND_GEN",
        }
    }
}

/// Controls what a mutate response returns for each operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ResponseContentType {
    /// The service returns only the resource name. This is the default.
    Unspecified = 0,
    ResourceNameOnly = 1,
    /// The service returns the full resource, with all its mutable fields.
    MutableResource = 2,
}

impl ResponseContentType {
    /// The value name, as used in the proto definition.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::Unspecified => "UNSPECIFIED",
            Self::ResourceNameOnly => "RESOURCE_NAME_ONLY",
            Self::MutableResource => "MUTABLE_RESOURCE",
        }
    }
}

/// The level of access a user has to a customer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum AccessRole {
    Unspecified = 0,
    Unknown = 1,
    Admin = 2,
    Standard = 3,
    ReadOnly = 4,
    EmailOnly = 5,
}

impl AccessRole {
    /// The value name, as used in the proto definition.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::Unspecified => "UNSPECIFIED",
            Self::Unknown => "UNKNOWN",
            Self::Admin => "ADMIN",
            Self::Standard => "STANDARD",
            Self::ReadOnly => "READ_ONLY",
            Self::EmailOnly => "EMAIL_ONLY",
        }
    }
}

/// Whether a search returns a summary row with the totals of its metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum SummaryRowSetting {
    Unspecified = 0,
    Unknown = 1,
    NoSummaryRow = 2,
    SummaryRowWithResults = 3,
    SummaryRowOnly = 4,
}

impl SummaryRowSetting {
    /// The value name, as used in the proto definition.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::Unspecified => "UNSPECIFIED",
            Self::Unknown => "UNKNOWN",
            Self::NoSummaryRow => "NO_SUMMARY_ROW",
            Self::SummaryRowWithResults => "SUMMARY_ROW_WITH_RESULTS",
            Self::SummaryRowOnly => "SUMMARY_ROW_ONLY",
        }
    }
}

/// The type of resource changed in a [ChangeEvent][super::ChangeEvent].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ChangeEventResourceType {
    Unspecified = 0,
    Unknown = 1,
    Ad = 2,
    AdGroup = 3,
    AdGroupCriterion = 4,
    Campaign = 5,
    CampaignBudget = 6,
    AdGroupBidModifier = 7,
    CampaignCriterion = 8,
    Feed = 9,
    FeedItem = 10,
    CampaignFeed = 11,
    AdGroupFeed = 12,
    AdGroupAd = 13,
    Asset = 14,
    CustomerAsset = 15,
    CampaignAsset = 16,
    AdGroupAsset = 17,
}

/// The scope of a rate limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum QuotaRateScope {
    Unspecified = 0,
    Unknown = 1,
    Account = 2,
    DeveloperToken = 3,
}
