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

//! Helper functions to format the `x-goog-request-params` header.
//!
//! Requests carry the fields used to route them in this header, for example
//! `customer_id=1234567890`. Values are form-encoded: spaces become `+`, `/`
//! is left as-is so resource names remain readable, and other reserved
//! characters are percent-encoded.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// The characters escaped in routing parameter values.
///
/// This matches `application/x-www-form-urlencoded` with `/` as a safe
/// character.
const ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Format a routing parameter key value pair.
///
/// # Example
/// ```
/// # use google_ads_gax_internal::routing_parameter::format;
/// assert_eq!(format(("customer_id", "1234567890")), "customer_id=1234567890");
/// assert_eq!(format(("name", "a b/c")), "name=a+b/c");
/// ```
pub fn format((k, v): (&str, &str)) -> String {
    let v = utf8_percent_encode(v, ENCODE_SET).to_string();
    format!("{k}={}", v.replace("%20", "+"))
}

/// Joins several routing parameters into a single header value.
///
/// # Example
/// ```
/// # use google_ads_gax_internal::routing_parameter::join;
/// let value = join([("customer_id", "123"), ("resource_name", "customers/123")]);
/// assert_eq!(value, "customer_id=123&resource_name=customers/123");
/// ```
pub fn join<'a, I>(params: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    params
        .into_iter()
        .map(format)
        .collect::<Vec<_>>()
        .join("&")
}
