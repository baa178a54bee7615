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

//! Defines traits for retry policies and some common implementations.
//!
//! The Google Ads client libraries do not retry requests unless the
//! application configures a retry policy. Applications can use the policies in
//! this module, or implement their own.
//!
//! # Example
//! ```
//! # use google_ads_gax::retry_policy::*;
//! # use google_ads_gax::error::rpc::Code;
//! use std::time::Duration;
//! let policy = RetryableCodes::new([Code::Unavailable, Code::DeadlineExceeded])
//!     .with_time_limit(Duration::from_secs(60))
//!     .with_attempt_limit(5);
//! ```

use crate::error::Error;
use crate::error::rpc::Code;
use crate::retry_result::RetryResult;
use crate::retry_state::RetryState;
use std::sync::Arc;
use std::time::Duration;

/// Determines how errors are handled in the retry loop.
pub trait RetryPolicy: Send + Sync + std::fmt::Debug {
    /// Query the retry policy after an error.
    ///
    /// # Parameters
    /// * `state` - the idempotency of the request, when the loop started, and
    ///   how many attempts were made.
    /// * `error` - the last error when attempting the request.
    #[must_use]
    fn on_error(&self, state: &RetryState, error: Error) -> RetryResult;

    /// The remaining time in the retry policy.
    ///
    /// Time based policies return the remaining time, the retry loop uses it
    /// to adjust the timeout of the next attempt. Other policies return
    /// `None`.
    fn remaining_time(&self, _state: &RetryState) -> Option<Duration> {
        None
    }
}

/// A helper type to use [RetryPolicy] in client and request options.
#[derive(Clone, Debug)]
pub struct RetryPolicyArg(Arc<dyn RetryPolicy>);

impl<T> From<T> for RetryPolicyArg
where
    T: RetryPolicy + 'static,
{
    fn from(value: T) -> Self {
        Self(Arc::new(value))
    }
}

impl From<Arc<dyn RetryPolicy>> for RetryPolicyArg {
    fn from(value: Arc<dyn RetryPolicy>) -> Self {
        Self(value)
    }
}

impl From<RetryPolicyArg> for Arc<dyn RetryPolicy> {
    fn from(value: RetryPolicyArg) -> Arc<dyn RetryPolicy> {
        value.0
    }
}

/// Decorators for retry policies.
pub trait RetryPolicyExt: RetryPolicy + Sized {
    /// Stops the loop once `maximum_duration` has elapsed since the first
    /// attempt.
    fn with_time_limit(self, maximum_duration: Duration) -> LimitedElapsedTime<Self> {
        LimitedElapsedTime::custom(self, maximum_duration)
    }

    /// Stops the loop after `maximum_attempts` attempts.
    fn with_attempt_limit(self, maximum_attempts: u32) -> LimitedAttemptCount<Self> {
        LimitedAttemptCount::custom(self, maximum_attempts)
    }
}

impl<T: RetryPolicy> RetryPolicyExt for T {}

/// Errors that happen before the request is sent are safe to retry, even for
/// non-idempotent requests.
fn before_rpc(error: &Error) -> bool {
    error.is_transient_and_before_rpc()
}

/// Retries only if the request failed before reaching the service.
///
/// This is the default policy of the Google Ads clients. It only retries
/// transient problems creating the authentication headers.
#[derive(Clone, Debug)]
pub struct NeverRetry;

impl RetryPolicy for NeverRetry {
    fn on_error(&self, _state: &RetryState, error: Error) -> RetryResult {
        if before_rpc(&error) {
            return RetryResult::Continue(error);
        }
        RetryResult::Permanent(error)
    }
}

/// Retries every error of an idempotent request.
///
/// Non-idempotent requests are only retried if they failed before reaching
/// the service. Use this policy only with a time or attempt limit.
#[derive(Clone, Debug)]
pub struct AlwaysRetry;

impl RetryPolicy for AlwaysRetry {
    fn on_error(&self, state: &RetryState, error: Error) -> RetryResult {
        if state.idempotent || before_rpc(&error) {
            return RetryResult::Continue(error);
        }
        RetryResult::Permanent(error)
    }
}

/// Retries idempotent requests that fail with one of the configured codes.
///
/// Broken connections of idempotent requests are also retried. Errors in the
/// request arguments, or in encoding and decoding messages, are never retried.
#[derive(Clone, Debug)]
pub struct RetryableCodes {
    codes: Vec<Code>,
}

impl RetryableCodes {
    /// Creates a policy retrying the given codes.
    pub fn new<I: IntoIterator<Item = Code>>(codes: I) -> Self {
        Self {
            codes: codes.into_iter().collect(),
        }
    }
}

impl Default for RetryableCodes {
    /// Retries `UNAVAILABLE` and `DEADLINE_EXCEEDED` errors.
    fn default() -> Self {
        Self::new([Code::Unavailable, Code::DeadlineExceeded])
    }
}

impl RetryPolicy for RetryableCodes {
    fn on_error(&self, state: &RetryState, error: Error) -> RetryResult {
        if before_rpc(&error) {
            return RetryResult::Continue(error);
        }
        if !state.idempotent {
            return RetryResult::Permanent(error);
        }
        if error.is_io() {
            return RetryResult::Continue(error);
        }
        match error.status() {
            Some(status) if self.codes.contains(&status.code) => RetryResult::Continue(error),
            _ => RetryResult::Permanent(error),
        }
    }
}

/// A retry policy decorator that limits the total time in the retry loop.
///
/// Once the loop exceeds its duration limit, this policy stops the loop.
/// Before the limit, the decision is taken by the inner policy.
#[derive(Debug)]
pub struct LimitedElapsedTime<P = NeverRetry>
where
    P: RetryPolicy,
{
    inner: P,
    maximum_duration: Duration,
}

impl LimitedElapsedTime {
    /// Creates a new instance, with the default inner policy.
    pub fn new(maximum_duration: Duration) -> Self {
        Self::custom(NeverRetry, maximum_duration)
    }
}

impl<P: RetryPolicy> LimitedElapsedTime<P> {
    /// Creates a new instance with a custom inner policy.
    pub fn custom(inner: P, maximum_duration: Duration) -> Self {
        Self {
            inner,
            maximum_duration,
        }
    }

    fn error_if_exhausted(&self, state: &RetryState, error: Error) -> RetryResult {
        if state.elapsed() < self.maximum_duration {
            RetryResult::Continue(error)
        } else {
            RetryResult::Exhausted(Error::exhausted(ExhaustedError::elapsed(
                self.maximum_duration,
                error,
            )))
        }
    }
}

impl<P: RetryPolicy> RetryPolicy for LimitedElapsedTime<P> {
    fn on_error(&self, state: &RetryState, error: Error) -> RetryResult {
        match self.inner.on_error(state, error) {
            RetryResult::Continue(e) => self.error_if_exhausted(state, e),
            RetryResult::Exhausted(e) => RetryResult::Exhausted(e),
            RetryResult::Permanent(e) => RetryResult::Permanent(e),
        }
    }

    fn remaining_time(&self, state: &RetryState) -> Option<Duration> {
        let remaining = self.maximum_duration.saturating_sub(state.elapsed());
        match self.inner.remaining_time(state) {
            Some(inner) => Some(std::cmp::min(remaining, inner)),
            None => Some(remaining),
        }
    }
}

/// A retry policy decorator that limits the number of attempts.
#[derive(Debug)]
pub struct LimitedAttemptCount<P = NeverRetry>
where
    P: RetryPolicy,
{
    inner: P,
    maximum_attempts: u32,
}

impl LimitedAttemptCount {
    /// Creates a new instance, with the default inner policy.
    pub fn new(maximum_attempts: u32) -> Self {
        Self::custom(NeverRetry, maximum_attempts)
    }
}

impl<P: RetryPolicy> LimitedAttemptCount<P> {
    /// Creates a new instance with a custom inner policy.
    pub fn custom(inner: P, maximum_attempts: u32) -> Self {
        Self {
            inner,
            maximum_attempts,
        }
    }
}

impl<P: RetryPolicy> RetryPolicy for LimitedAttemptCount<P> {
    fn on_error(&self, state: &RetryState, error: Error) -> RetryResult {
        match self.inner.on_error(state, error) {
            RetryResult::Continue(e) if state.attempt_count >= self.maximum_attempts => {
                RetryResult::Exhausted(Error::exhausted(ExhaustedError::attempts(
                    self.maximum_attempts,
                    e,
                )))
            }
            result => result,
        }
    }

    fn remaining_time(&self, state: &RetryState) -> Option<Duration> {
        self.inner.remaining_time(state)
    }
}

/// The source of [Error::exhausted] errors created by the retry policies.
#[derive(thiserror::Error, Debug)]
#[error("retry policy exhausted {limit}, last error: {source}")]
pub struct ExhaustedError {
    limit: String,
    #[source]
    source: Error,
}

impl ExhaustedError {
    fn elapsed(maximum: Duration, source: Error) -> Self {
        let limit = format!("after {maximum:?}");
        Self { limit, source }
    }

    fn attempts(maximum: u32, source: Error) -> Self {
        let limit = format!("after {maximum} attempts");
        Self { limit, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CredentialsError;
    use crate::error::binding::BindingError;
    use crate::error::rpc::Status;
    use std::error::Error as _;
    use test_case::test_case;

    fn service(code: Code) -> Error {
        Error::service(Status::default().set_code(code).set_message("test-only"))
    }

    fn io() -> Error {
        Error::io("broken connection")
    }

    fn transient_auth() -> Error {
        Error::authentication(CredentialsError::from_msg(true, "try again"))
    }

    #[test_case(true)]
    #[test_case(false)]
    fn never_retry(idempotent: bool) {
        let p = NeverRetry;
        let state = RetryState::new(idempotent);
        assert!(p.on_error(&state, service(Code::Unavailable)).is_permanent());
        assert!(p.on_error(&state, io()).is_permanent());
        assert!(p.on_error(&state, transient_auth()).is_continue());
        assert!(p.remaining_time(&state).is_none());
    }

    #[test]
    fn always_retry() {
        let p = AlwaysRetry;
        let state = RetryState::new(true);
        assert!(p.on_error(&state, service(Code::PermissionDenied)).is_continue());
        assert!(p.on_error(&state, io()).is_continue());
        assert!(p.on_error(&state, transient_auth()).is_continue());
    }

    #[test]
    fn always_retry_non_idempotent() {
        let p = AlwaysRetry;
        let state = RetryState::new(false);
        assert!(p.on_error(&state, service(Code::Unavailable)).is_permanent());
        assert!(p.on_error(&state, io()).is_permanent());
        assert!(p.on_error(&state, transient_auth()).is_continue());
    }

    #[test_case(Code::Unavailable, true)]
    #[test_case(Code::DeadlineExceeded, true)]
    #[test_case(Code::Internal, false)]
    #[test_case(Code::InvalidArgument, false)]
    #[test_case(Code::ResourceExhausted, false)]
    fn retryable_codes_default(code: Code, want: bool) {
        let p = RetryableCodes::default();
        let got = p.on_error(&RetryState::new(true), service(code));
        assert_eq!(got.is_continue(), want, "{got:?}");
        let got = p.on_error(&RetryState::new(false), service(code));
        assert!(got.is_permanent(), "{got:?}");
    }

    #[test]
    fn retryable_codes_other_errors() {
        let p = RetryableCodes::new([Code::Aborted]);
        assert!(
            p.on_error(&RetryState::new(true), service(Code::Aborted))
                .is_continue()
        );
        assert!(p.on_error(&RetryState::new(true), io()).is_continue());
        assert!(p.on_error(&RetryState::new(false), io()).is_permanent());
        assert!(
            p.on_error(&RetryState::new(false), transient_auth())
                .is_continue()
        );
        let binding = Error::binding(BindingError::RequestAndFlattenedFields);
        assert!(p.on_error(&RetryState::new(true), binding).is_permanent());
        let deser = Error::deser("bad bytes");
        assert!(p.on_error(&RetryState::new(true), deser).is_permanent());
    }

    #[test]
    fn attempt_limit() {
        let p = AlwaysRetry.with_attempt_limit(3);
        let state = RetryState::new(true).set_attempt_count(2_u32);
        assert!(p.on_error(&state, io()).is_continue());

        let state = RetryState::new(true).set_attempt_count(3_u32);
        let got = p.on_error(&state, io());
        let RetryResult::Exhausted(e) = got else {
            panic!("expected exhausted, got={got:?}");
        };
        assert!(e.is_exhausted(), "{e:?}");
        assert!(e.to_string().contains("after 3 attempts"), "{e}");
        assert!(e.source().is_some(), "{e:?}");
    }

    #[test]
    fn attempt_limit_permanent() {
        let p = NeverRetry.with_attempt_limit(3);
        let state = RetryState::new(true).set_attempt_count(5_u32);
        assert!(p.on_error(&state, io()).is_permanent());
    }

    #[tokio::test(start_paused = true)]
    async fn time_limit() {
        let p = AlwaysRetry.with_time_limit(Duration::from_secs(10));
        let state = RetryState::new(true);
        assert!(p.on_error(&state, io()).is_continue());
        assert_eq!(p.remaining_time(&state), Some(Duration::from_secs(10)));

        tokio::time::advance(Duration::from_secs(4)).await;
        assert_eq!(p.remaining_time(&state), Some(Duration::from_secs(6)));

        tokio::time::advance(Duration::from_secs(6)).await;
        assert_eq!(p.remaining_time(&state), Some(Duration::ZERO));
        let got = p.on_error(&state, io());
        assert!(got.is_exhausted(), "{got:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn time_limit_nested() {
        let p = AlwaysRetry
            .with_time_limit(Duration::from_secs(5))
            .with_time_limit(Duration::from_secs(10));
        let state = RetryState::new(true);
        assert_eq!(p.remaining_time(&state), Some(Duration::from_secs(5)));
    }

    #[test]
    fn time_limit_constructor() {
        let p = LimitedElapsedTime::new(Duration::from_secs(10));
        let got = p.on_error(&RetryState::new(true), io());
        assert!(got.is_permanent(), "{got:?}");
        let p = LimitedAttemptCount::new(2);
        let got = p.on_error(&RetryState::new(true), io());
        assert!(got.is_permanent(), "{got:?}");
    }

    #[test]
    fn retry_policy_arg() {
        let arg = RetryPolicyArg::from(AlwaysRetry);
        let policy: Arc<dyn RetryPolicy> = arg.into();
        let _ = RetryPolicyArg::from(policy);
    }
}
