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

//! Masks personal information in logged messages.

use crate::model::*;

pub(crate) const REDACTED: &str = "REDACTED";

/// Messages that may be logged.
///
/// The default implementation keeps the message unchanged. Messages with
/// personal information, or containing messages with personal information,
/// mask those fields.
pub(crate) trait Redact: Clone + std::fmt::Debug {
    fn redact(&mut self) {}

    /// Returns a copy of the message suitable for logging.
    fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.redact();
        copy
    }
}

fn mask(field: &mut String) {
    if !field.is_empty() {
        *field = REDACTED.to_string();
    }
}

impl Redact for CustomerUserAccess {
    fn redact(&mut self) {
        self.email_address.iter_mut().for_each(mask);
        self.inviter_user_email_address.iter_mut().for_each(mask);
    }
}

impl Redact for ChangeEvent {
    fn redact(&mut self) {
        mask(&mut self.user_email);
    }
}

impl Redact for GoogleAdsRow {
    fn redact(&mut self) {
        self.customer_user_access.iter_mut().for_each(Redact::redact);
        self.change_event.iter_mut().for_each(Redact::redact);
    }
}

impl Redact for SearchGoogleAdsResponse {
    fn redact(&mut self) {
        self.results.iter_mut().for_each(Redact::redact);
        self.summary_row.iter_mut().for_each(Redact::redact);
    }
}

impl Redact for SearchGoogleAdsStreamResponse {
    fn redact(&mut self) {
        self.results.iter_mut().for_each(Redact::redact);
        self.summary_row.iter_mut().for_each(Redact::redact);
    }
}

impl Redact for MutateCampaignsRequest {}
impl Redact for MutateCampaignsResponse {}
impl Redact for MutateAdGroupsRequest {}
impl Redact for MutateAdGroupsResponse {}
impl Redact for SearchGoogleAdsRequest {}
impl Redact for SearchGoogleAdsStreamRequest {}
impl Redact for MutateGoogleAdsRequest {}
impl Redact for MutateGoogleAdsResponse {}
impl Redact for ListAccessibleCustomersRequest {}
impl Redact for ListAccessibleCustomersResponse {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn user_access() -> CustomerUserAccess {
        CustomerUserAccess {
            resource_name: "customers/1234567890/customerUserAccesses/42".into(),
            user_id: 42,
            email_address: Some("user@example.com".into()),
            access_role: AccessRole::Admin as i32,
            inviter_user_email_address: Some("inviter@example.com".into()),
            ..Default::default()
        }
    }

    fn change_event() -> ChangeEvent {
        ChangeEvent {
            resource_name: "customers/1234567890/changeEvents/1~2~3".into(),
            user_email: "editor@example.com".into(),
            ..Default::default()
        }
    }

    #[test]
    fn customer_user_access() {
        let got = user_access().redacted();
        assert_eq!(got.email_address.as_deref(), Some(REDACTED));
        assert_eq!(got.inviter_user_email_address.as_deref(), Some(REDACTED));
        assert_eq!(got.user_id, 42);

        let unset = CustomerUserAccess::default().redacted();
        assert_eq!(unset.email_address, None);
    }

    #[test]
    fn change_event_email() {
        let got = change_event().redacted();
        assert_eq!(got.user_email, REDACTED);
        assert_eq!(got.resource_name, change_event().resource_name);
        assert_eq!(ChangeEvent::default().redacted().user_email, "");
    }

    #[test]
    fn nested_rows() {
        let row = GoogleAdsRow {
            customer_user_access: Some(user_access()),
            change_event: Some(change_event()),
            campaign: Some(Campaign {
                name: Some("Interplanetary Cruise".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let response = SearchGoogleAdsResponse {
            results: vec![row.clone()],
            summary_row: Some(row.clone()),
            ..Default::default()
        };
        let got = response.redacted();
        let debug = format!("{got:?}");
        assert!(!debug.contains("@example.com"), "{debug}");
        assert!(debug.contains("Interplanetary Cruise"), "{debug}");

        let stream = SearchGoogleAdsStreamResponse {
            results: vec![row],
            ..Default::default()
        };
        let debug = format!("{:?}", stream.redacted());
        assert!(!debug.contains("@example.com"), "{debug}");
    }

    #[test]
    fn unchanged() {
        let request = SearchGoogleAdsRequest {
            customer_id: "1234567890".into(),
            query: "SELECT change_event.user_email FROM change_event".into(),
            ..Default::default()
        };
        assert_eq!(request.redacted(), request);
    }
}
