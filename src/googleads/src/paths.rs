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

//! Resource name builders and parsers.
//!
//! Each resource has a function to build its resource name from the ids, and
//! a function to parse a resource name back into its ids. The two are
//! inverses.
//!
//! # Example
//! ```
//! # use google_ads::paths::*;
//! let name = campaign_path("1234567890", "456");
//! assert_eq!(name, "customers/1234567890/campaigns/456");
//! let parsed = parse_campaign_path(&name);
//! assert_eq!(
//!     parsed,
//!     Some(CampaignPath {
//!         customer_id: "1234567890".to_string(),
//!         campaign_id: "456".to_string(),
//!     })
//! );
//! assert_eq!(parse_campaign_path("customers/1234567890/adGroups/456"), None);
//! ```

use gaxi::path_template::{Error as TemplateError, PathTemplate};
use lazy_static::lazy_static;

macro_rules! resource_path {
    (
        $(#[$doc:meta])*
        $ty:ident, $build:ident, $parse:ident, $template:ident = $format:literal, [$($field:ident),+]
    ) => {
        lazy_static! {
            static ref $template: Result<PathTemplate, TemplateError> = PathTemplate::new($format);
        }

        $(#[$doc])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $ty {
            $(pub $field: String,)+
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, $format, $($field = self.$field),+)
            }
        }

        #[doc = concat!("Returns a `", $format, "` resource name.")]
        pub fn $build($($field: &str),+) -> String {
            format!($format, $($field = $field),+)
        }

        #[doc = concat!("Parses a `", $format, "` resource name.")]
        ///
        /// Returns `None` if `path` does not match the template.
        pub fn $parse(path: &str) -> Option<$ty> {
            let values = $template.as_ref().ok()?.parse(path)?;
            let mut values = values.into_iter().map(|(_, v)| v.to_string());
            Some($ty {
                $($field: values.next()?,)+
            })
        }
    };
}

resource_path!(
    /// The ids in a customer resource name.
    CustomerPath, customer_path, parse_customer_path,
    CUSTOMER = "customers/{customer_id}",
    [customer_id]
);

resource_path!(
    /// The ids in a campaign resource name.
    CampaignPath, campaign_path, parse_campaign_path,
    CAMPAIGN = "customers/{customer_id}/campaigns/{campaign_id}",
    [customer_id, campaign_id]
);

resource_path!(
    /// The ids in a campaign budget resource name.
    CampaignBudgetPath, campaign_budget_path, parse_campaign_budget_path,
    CAMPAIGN_BUDGET = "customers/{customer_id}/campaignBudgets/{campaign_budget_id}",
    [customer_id, campaign_budget_id]
);

resource_path!(
    /// The ids in an ad group resource name.
    AdGroupPath, ad_group_path, parse_ad_group_path,
    AD_GROUP = "customers/{customer_id}/adGroups/{ad_group_id}",
    [customer_id, ad_group_id]
);

resource_path!(
    /// The ids in an ad group ad resource name.
    AdGroupAdPath, ad_group_ad_path, parse_ad_group_ad_path,
    AD_GROUP_AD = "customers/{customer_id}/adGroupAds/{ad_group_id}~{ad_id}",
    [customer_id, ad_group_id, ad_id]
);

resource_path!(
    /// The ids in an ad group criterion resource name.
    AdGroupCriterionPath, ad_group_criterion_path, parse_ad_group_criterion_path,
    AD_GROUP_CRITERION = "customers/{customer_id}/adGroupCriteria/{ad_group_id}~{criterion_id}",
    [customer_id, ad_group_id, criterion_id]
);

resource_path!(
    /// The ids in a customer user access resource name.
    CustomerUserAccessPath, customer_user_access_path, parse_customer_user_access_path,
    CUSTOMER_USER_ACCESS = "customers/{customer_id}/customerUserAccesses/{user_id}",
    [customer_id, user_id]
);

resource_path!(
    /// The ids in a change event resource name.
    ChangeEventPath, change_event_path, parse_change_event_path,
    CHANGE_EVENT = "customers/{customer_id}/changeEvents/{timestamp_micros}~{command_index}~{mutate_index}",
    [customer_id, timestamp_micros, command_index, mutate_index]
);

/// Returns the customer id in a `customers/{customer_id}/...` resource name.
pub(crate) fn customer_id_of(resource_name: &str) -> Option<&str> {
    let mut segments = resource_name.split('/');
    match (segments.next(), segments.next()) {
        (Some("customers"), Some(id)) if !id.is_empty() => Some(id),
        _ => None,
    }
}
