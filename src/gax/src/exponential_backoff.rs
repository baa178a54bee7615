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
//! Truncated [exponential backoff] with full jitter.
//!
//! This is the default backoff policy of the Google Ads clients: the first
//! retry waits up to one second, each following retry up to twice as long,
//! and no retry waits more than a minute.
//!
//! [exponential backoff]: https://en.wikipedia.org/wiki/Exponential_backoff

use crate::backoff_policy::BackoffPolicy;
use crate::retry_state::RetryState;
use std::time::Duration;

const MIN_INITIAL: Duration = Duration::from_millis(1);
const MIN_MAXIMUM: Duration = Duration::from_secs(1);
const MAX_MAXIMUM: Duration = Duration::from_secs(24 * 60 * 60);
const MAX_SCALING: f64 = 32.0;

/// The parameters given to [ExponentialBackoffBuilder] are inconsistent.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("the scaling value ({0}) should be >= 1.0")]
    InvalidScalingFactor(f64),
    #[error("the initial delay ({0:?}) should be greater than zero")]
    InvalidInitialDelay(Duration),
    #[error("the maximum delay ({maximum:?}) is shorter than the initial delay ({initial:?})")]
    EmptyRange { maximum: Duration, initial: Duration },
}

/// Builds [ExponentialBackoff] policies.
///
/// # Example
/// ```
/// # use google_ads_gax::exponential_backoff::{Error, ExponentialBackoffBuilder};
/// use std::time::Duration;
/// let policy = ExponentialBackoffBuilder::new()
///     .with_initial_delay(Duration::from_millis(500))
///     .with_maximum_delay(Duration::from_secs(30))
///     .with_scaling(1.5)
///     .build()?;
/// # Ok::<(), Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct ExponentialBackoffBuilder(ExponentialBackoff);

impl ExponentialBackoffBuilder {
    pub fn new() -> Self {
        Self(ExponentialBackoff {
            initial_delay: Duration::from_secs(1),
            maximum_delay: Duration::from_secs(60),
            scaling: 2.0,
        })
    }

    pub fn with_initial_delay<V: Into<Duration>>(mut self, v: V) -> Self {
        self.0.initial_delay = v.into();
        self
    }

    pub fn with_maximum_delay<V: Into<Duration>>(mut self, v: V) -> Self {
        self.0.maximum_delay = v.into();
        self
    }

    /// The growth factor between consecutive delays.
    pub fn with_scaling<V: Into<f64>>(mut self, v: V) -> Self {
        self.0.scaling = v.into();
        self
    }

    /// Returns the policy, or an error if the parameters are inconsistent.
    pub fn build(self) -> Result<ExponentialBackoff, Error> {
        let p = self.0;
        if p.scaling < 1.0 {
            return Err(Error::InvalidScalingFactor(p.scaling));
        }
        if p.initial_delay.is_zero() {
            return Err(Error::InvalidInitialDelay(p.initial_delay));
        }
        if p.maximum_delay < p.initial_delay {
            return Err(Error::EmptyRange {
                maximum: p.maximum_delay,
                initial: p.initial_delay,
            });
        }
        Ok(p)
    }

    /// Returns the policy, forcing the parameters into their valid ranges.
    ///
    /// The maximum delay is clamped to `[1s, 24h]`, then the initial delay to
    /// `[1ms, maximum]`, and the scaling factor to `[1.0, 32.0]`.
    pub fn clamp(self) -> ExponentialBackoff {
        let p = self.0;
        let maximum_delay = p.maximum_delay.clamp(MIN_MAXIMUM, MAX_MAXIMUM);
        ExponentialBackoff {
            initial_delay: p.initial_delay.clamp(MIN_INITIAL, maximum_delay),
            maximum_delay,
            scaling: p.scaling.clamp(1.0, MAX_SCALING),
        }
    }
}

impl Default for ExponentialBackoffBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Truncated exponential backoff with full jitter.
///
/// After the `n`-th failed attempt the policy waits a random time in
/// `[0, min(initial * scaling^(n-1), maximum)]`.
#[derive(Clone, Debug)]
pub struct ExponentialBackoff {
    initial_delay: Duration,
    maximum_delay: Duration,
    scaling: f64,
}

impl ExponentialBackoff {
    /// The upper bound of the delay after `attempt_count` attempts.
    fn ceiling(&self, attempt_count: u32) -> Duration {
        let exponent = i32::try_from(attempt_count.saturating_sub(1)).unwrap_or(i32::MAX);
        let factor = self.scaling.powi(exponent);
        // Compare in f64 first, mul_f64() panics on overflow.
        if factor >= self.maximum_delay.div_duration_f64(self.initial_delay) {
            return self.maximum_delay;
        }
        self.initial_delay.mul_f64(factor)
    }

    fn jittered(&self, attempt_count: u32, rng: &mut impl rand::Rng) -> Duration {
        rng.random_range(Duration::ZERO..=self.ceiling(attempt_count))
    }
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        ExponentialBackoffBuilder::new().clamp()
    }
}

impl BackoffPolicy for ExponentialBackoff {
    fn on_failure(&self, state: &RetryState) -> Duration {
        self.jittered(state.attempt_count, &mut rand::rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn policy(initial: u64, maximum: u64) -> ExponentialBackoffBuilder {
        ExponentialBackoffBuilder::new()
            .with_initial_delay(Duration::from_secs(initial))
            .with_maximum_delay(Duration::from_secs(maximum))
    }

    #[test]
    fn rejects_bad_parameters() {
        let got = policy(0, 5).build();
        assert!(matches!(got, Err(Error::InvalidInitialDelay(_))), "{got:?}");
        let got = policy(10, 5).build();
        assert!(matches!(got, Err(Error::EmptyRange { .. })), "{got:?}");
        let got = ExponentialBackoffBuilder::new().with_scaling(0.5).build();
        assert!(matches!(got, Err(Error::InvalidScalingFactor(_))), "{got:?}");
    }

    #[test]
    fn accepts_extremes() {
        let got = ExponentialBackoffBuilder::new()
            .with_initial_delay(Duration::from_nanos(1))
            .with_maximum_delay(Duration::MAX)
            .with_scaling(1.0)
            .build();
        assert!(got.is_ok(), "{got:?}");
        assert!(ExponentialBackoffBuilder::default().build().is_ok());
    }

    #[test_case(1, u64::MAX, 0.5; "scaling too small")]
    #[test_case(1, u64::MAX, 1e6; "scaling too large")]
    #[test_case(1, 0, 8.0; "maximum too small")]
    #[test_case(10, 0, 8.0; "initial above maximum")]
    #[test_case(0, 0, 8.0; "initial too small")]
    fn clamp(initial: u64, maximum: u64, scaling: f64) {
        let got = policy(initial, maximum).with_scaling(scaling).clamp();
        assert!((1.0..=MAX_SCALING).contains(&got.scaling), "{got:?}");
        assert!((MIN_MAXIMUM..=MAX_MAXIMUM).contains(&got.maximum_delay), "{got:?}");
        assert!((MIN_INITIAL..=got.maximum_delay).contains(&got.initial_delay), "{got:?}");
    }

    #[test_case(1, 1)]
    #[test_case(2, 2)]
    #[test_case(3, 4)]
    #[test_case(4, 4)]
    #[test_case(u32::MAX, 4)]
    fn ceiling(attempt: u32, want: u64) -> anyhow::Result<()> {
        let backoff = policy(1, 4).with_scaling(2.0).build()?;
        assert_eq!(backoff.ceiling(attempt), Duration::from_secs(want));
        let state = RetryState::new(true).set_attempt_count(attempt);
        let got = backoff.on_failure(&state);
        assert!(got <= Duration::from_secs(want), "{got:?}");
        Ok(())
    }

    #[test]
    fn jitter_stays_in_range() -> anyhow::Result<()> {
        let backoff = policy(10, 10).build()?;
        let mut rng = rand::rng();
        for _ in 0..100 {
            let got = backoff.jittered(3, &mut rng);
            assert!(got <= Duration::from_secs(10), "{got:?}");
        }
        Ok(())
    }

    #[test]
    fn default_grows_to_a_minute() {
        let backoff = ExponentialBackoff::default();
        assert_eq!(backoff.ceiling(1), Duration::from_secs(1));
        assert_eq!(backoff.ceiling(2), Duration::from_secs(2));
        assert_eq!(backoff.ceiling(10), Duration::from_secs(60));
    }
}
