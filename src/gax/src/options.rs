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
//! Per-request options.
//!
//! Every request builder implements [RequestOptionsBuilder]. Use it to change
//! the timeout, the retry behavior, or the metadata of a single call.
//!
//! # Example
//! ```
//! # use google_ads_gax::options::RequestOptions;
//! use std::time::Duration;
//! let mut options = RequestOptions::default();
//! options.set_attempt_timeout(Duration::from_secs(30));
//! options.set_login_customer_id("9876543210");
//! assert_eq!(options.headers()[0].1, "9876543210");
//! ```

use crate::backoff_policy::{BackoffPolicy, BackoffPolicyArg};
use crate::retry_policy::{RetryPolicy, RetryPolicyArg};
use std::sync::Arc;
use std::time::Duration;

/// The metadata key naming the manager account used to access a customer.
pub const LOGIN_CUSTOMER_ID: &str = "login-customer-id";

/// The metadata key naming the linked account of a third-party app analytics
/// provider.
pub const LINKED_CUSTOMER_ID: &str = "linked-customer-id";

/// The options for a single request.
///
/// Applications rarely use this type directly. The request builders set it
/// through [RequestOptionsBuilder].
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    idempotent: Option<bool>,
    attempt_timeout: Option<Duration>,
    retry_policy: Option<Arc<dyn RetryPolicy>>,
    backoff_policy: Option<Arc<dyn BackoffPolicy>>,
    headers: Vec<(String, String)>,
}

impl RequestOptions {
    /// Whether the request may be retried after reaching the service.
    ///
    /// `None` means the method default applies: searches are idempotent,
    /// mutates are not.
    pub fn idempotent(&self) -> Option<bool> {
        self.idempotent
    }

    pub fn set_idempotency(&mut self, value: bool) {
        self.idempotent = Some(value);
    }

    pub fn attempt_timeout(&self) -> &Option<Duration> {
        &self.attempt_timeout
    }

    /// Limits each attempt. The retry policy limits the request as a whole.
    pub fn set_attempt_timeout<T: Into<Duration>>(&mut self, v: T) {
        self.attempt_timeout = Some(v.into());
    }

    /// The retry policy for this request, overriding the client's.
    pub fn retry_policy(&self) -> &Option<Arc<dyn RetryPolicy>> {
        &self.retry_policy
    }

    pub fn set_retry_policy<V: Into<RetryPolicyArg>>(&mut self, v: V) {
        self.retry_policy = Some(v.into().into());
    }

    /// The backoff policy for this request, overriding the client's.
    pub fn backoff_policy(&self) -> &Option<Arc<dyn BackoffPolicy>> {
        &self.backoff_policy
    }

    pub fn set_backoff_policy<V: Into<BackoffPolicyArg>>(&mut self, v: V) {
        self.backoff_policy = Some(v.into().into());
    }

    /// Adds a metadata entry sent with the request.
    ///
    /// An entry with the same key as one set by the client, such as
    /// `developer-token`, replaces the client's value.
    pub fn insert_header<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.headers.push((key.into(), value.into()));
    }

    /// Sends this request on behalf of a different manager account.
    ///
    /// Dashes are removed, `123-456-7890` is sent as `1234567890`.
    pub fn set_login_customer_id<V: AsRef<str>>(&mut self, v: V) {
        self.insert_header(LOGIN_CUSTOMER_ID, digits(v.as_ref()));
    }

    /// Sends this request with a linked customer id.
    pub fn set_linked_customer_id<V: AsRef<str>>(&mut self, v: V) {
        self.insert_header(LINKED_CUSTOMER_ID, digits(v.as_ref()));
    }

    /// The additional metadata entries, in insertion order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

fn digits(v: &str) -> String {
    v.chars().filter(|c| *c != '-').collect()
}

/// Setters for [RequestOptions], implemented by every request builder.
pub trait RequestOptionsBuilder: internal::RequestBuilder {
    /// Treats the request as idempotent, or not, overriding the method
    /// default.
    fn with_idempotency(self, v: bool) -> Self;

    fn with_attempt_timeout<V: Into<Duration>>(self, v: V) -> Self;

    fn with_retry_policy<V: Into<RetryPolicyArg>>(self, v: V) -> Self;

    fn with_backoff_policy<V: Into<BackoffPolicyArg>>(self, v: V) -> Self;

    /// Adds a metadata entry to the request.
    fn with_header<K: Into<String>, V: Into<String>>(self, key: K, value: V) -> Self;

    /// Overrides the client's `login-customer-id` for this request.
    fn with_login_customer_id<V: AsRef<str>>(self, v: V) -> Self;

    /// Overrides the client's `linked-customer-id` for this request.
    fn with_linked_customer_id<V: AsRef<str>>(self, v: V) -> Self;
}

#[doc(hidden)]
pub mod internal {
    //! Implementation details, not part of the public API.
    use super::RequestOptions;

    /// Gives [super::RequestOptionsBuilder] access to a builder's options.
    pub trait RequestBuilder {
        fn request_options(&mut self) -> &mut RequestOptions;
    }

    /// Applies the method default unless the application chose already.
    pub fn set_default_idempotency(mut options: RequestOptions, default: bool) -> RequestOptions {
        options.idempotent.get_or_insert(default);
        options
    }
}

impl<T: internal::RequestBuilder> RequestOptionsBuilder for T {
    fn with_idempotency(mut self, v: bool) -> Self {
        self.request_options().set_idempotency(v);
        self
    }

    fn with_attempt_timeout<V: Into<Duration>>(mut self, v: V) -> Self {
        self.request_options().set_attempt_timeout(v);
        self
    }

    fn with_retry_policy<V: Into<RetryPolicyArg>>(mut self, v: V) -> Self {
        self.request_options().set_retry_policy(v);
        self
    }

    fn with_backoff_policy<V: Into<BackoffPolicyArg>>(mut self, v: V) -> Self {
        self.request_options().set_backoff_policy(v);
        self
    }

    fn with_header<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.request_options().insert_header(key, value);
        self
    }

    fn with_login_customer_id<V: AsRef<str>>(mut self, v: V) -> Self {
        self.request_options().set_login_customer_id(v);
        self
    }

    fn with_linked_customer_id<V: AsRef<str>>(mut self, v: V) -> Self {
        self.request_options().set_linked_customer_id(v);
        self
    }
}
