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
//! The state of a retry loop, as seen by the retry and backoff policies.

use std::time::{Duration, Instant};

/// A snapshot of the retry loop, passed to the policies on each error.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct RetryState {
    /// The request is safe to retry after it reached the service.
    ///
    /// Searches are idempotent. Mutates are not, unless the application says
    /// otherwise.
    pub idempotent: bool,

    /// When the first attempt started.
    pub start: Instant,

    /// Attempts made so far, including the one that just failed.
    pub attempt_count: u32,

    /// The backoff delay before the most recent attempt, if any.
    pub last_delay: Option<Duration>,
}

impl RetryState {
    pub fn new(idempotent: bool) -> Self {
        Self {
            idempotent,
            start: now(),
            attempt_count: 0,
            last_delay: None,
        }
    }

    /// Time since the first attempt started.
    ///
    /// Uses the tokio clock, so paused-time tests can advance it.
    pub fn elapsed(&self) -> Duration {
        now().saturating_duration_since(self.start)
    }

    pub fn set_start<T: Into<Instant>>(mut self, v: T) -> Self {
        self.start = v.into();
        self
    }

    pub fn set_attempt_count<T: Into<u32>>(mut self, v: T) -> Self {
        self.attempt_count = v.into();
        self
    }

    pub(crate) fn record_delay(&mut self, delay: Duration) {
        self.last_delay = Some(delay);
    }
}

impl Default for RetryState {
    fn default() -> Self {
        Self::new(false)
    }
}

fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn elapsed() {
        let state = RetryState::new(true);
        assert_eq!(state.elapsed(), Duration::ZERO);
        tokio::time::advance(Duration::from_secs(3)).await;
        assert_eq!(state.elapsed(), Duration::from_secs(3));
    }

    #[test]
    fn setters() {
        let mut state = RetryState::default().set_attempt_count(2_u32);
        assert!(!state.idempotent);
        assert_eq!(state.attempt_count, 2);
        assert_eq!(state.last_delay, None);
        state.record_delay(Duration::from_millis(250));
        assert_eq!(state.last_delay, Some(Duration::from_millis(250)));
    }
}
