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

/// A problem with the arguments used to prepare a request.
///
/// Every RPC accepts either a complete request object, or a handful of
/// "flattened" fields that are copied into a new request. Setting both is
/// ambiguous and rejected before the request is sent.
///
/// # Example
/// ```
/// # use google_ads_gax::error::{Error, binding::BindingError};
/// let e = Error::binding(BindingError::RequestAndFlattenedFields);
/// assert!(e.is_binding());
/// assert!(e.to_string().contains("none of the individual field arguments"), "{e}");
/// ```
#[derive(thiserror::Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum BindingError {
    /// Both a request object and at least one flattened field were supplied.
    #[error(
        "If the `request` argument is set, then none of the individual field arguments should be set."
    )]
    RequestAndFlattenedFields,

    /// A field required to route the request is missing or empty.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
}

/// Tracks how the fields of a request were supplied.
///
/// Request builders record each [with_request] call and each flattened
/// setter. [check] rejects the combination of both.
///
/// [with_request]: RequestSource::set_request
/// [check]: RequestSource::check
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RequestSource {
    request: bool,
    flattened: bool,
}

impl RequestSource {
    /// Records that a complete request object was supplied.
    pub fn set_request(&mut self) {
        self.request = true;
    }

    /// Records that a flattened field was supplied.
    pub fn set_flattened(&mut self) {
        self.flattened = true;
    }

    /// Returns an error if both a request and flattened fields were supplied.
    pub fn check(&self) -> Result<(), BindingError> {
        if self.request && self.flattened {
            return Err(BindingError::RequestAndFlattenedFields);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(false, false, true)]
    #[test_case(true, false, true)]
    #[test_case(false, true, true)]
    #[test_case(true, true, false)]
    fn check(request: bool, flattened: bool, ok: bool) {
        let mut source = RequestSource::default();
        if request {
            source.set_request();
        }
        if flattened {
            source.set_flattened();
        }
        assert_eq!(source.check().is_ok(), ok, "{source:?}");
    }

    #[test]
    fn message() {
        let got = BindingError::RequestAndFlattenedFields.to_string();
        assert_eq!(
            got,
            "If the `request` argument is set, then none of the individual field arguments should be set."
        );
        let got = BindingError::MissingField("customer_id").to_string();
        assert!(got.contains("customer_id"), "{got}");
    }
}
