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
use crate::credentials::Result;
use crate::errors::CredentialsError;
use crate::token::{Token, TokenProvider};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Caches an access token and refreshes it shortly before it expires.
///
/// Only one refresh runs at a time. Callers that queue behind a refresh get
/// its outcome, including a failure, instead of starting another one.
#[derive(Debug)]
pub(crate) struct TokenCache<T> {
    state: Arc<Mutex<State>>,
    refresh: Arc<Mutex<()>>,
    inner: Arc<T>,
}

#[derive(Debug)]
struct State {
    latest: Result<Token>,
    // Incremented after each refresh.
    generation: u64,
}

impl<T> Clone for TokenCache<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            refresh: self.refresh.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<T: TokenProvider> TokenCache<T> {
    pub(crate) fn new(inner: T) -> Self {
        let state = State {
            latest: Err(CredentialsError::from_msg(true, "no token in the cache")),
            generation: 0,
        };
        Self {
            state: Arc::new(Mutex::new(state)),
            refresh: Arc::new(Mutex::new(())),
            inner: Arc::new(inner),
        }
    }
}

#[async_trait::async_trait]
impl<T: TokenProvider + 'static> TokenProvider for TokenCache<T> {
    async fn token(&self) -> Result<Token> {
        let seen = {
            let state = self.state.lock().await;
            match &state.latest {
                Ok(token) if !token.needs_refresh() => return Ok(token.clone()),
                _ => state.generation,
            }
        };

        let _refreshing = self.refresh.lock().await;
        {
            let state = self.state.lock().await;
            if state.generation != seen {
                return state.latest.clone();
            }
        }
        let latest = self.inner.token().await;
        let mut state = self.state.lock().await;
        state.generation += 1;
        state.latest = latest.clone();
        latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::REFRESH_MARGIN;
    use crate::token::tests::MockTokenProvider;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::Instant;

    const LIFETIME: Duration = Duration::from_secs(3600);

    fn bearer(token: &str, expires_at: Option<Instant>) -> Token {
        Token {
            token: token.to_string(),
            token_type: "Bearer".to_string(),
            expires_at,
        }
    }

    fn sequence(tokens: Vec<Result<Token>>) -> MockTokenProvider {
        let mut seq = mockall::Sequence::new();
        let mut mock = MockTokenProvider::new();
        for t in tokens {
            mock.expect_token()
                .once()
                .in_sequence(&mut seq)
                .return_once(move || t);
        }
        mock
    }

    #[tokio::test]
    async fn caches_tokens_without_expiration() -> anyhow::Result<()> {
        let token = bearer("ya29.first", None);
        let cache = TokenCache::new(sequence(vec![Ok(token.clone())]));
        assert_eq!(cache.token().await?, token);
        assert_eq!(cache.clone().token().await?, token);
        Ok(())
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let cache = TokenCache::new(sequence(vec![
            Err(CredentialsError::from_msg(false, "invalid_grant")),
            Err(CredentialsError::from_msg(true, "unavailable")),
        ]));
        let e = cache.token().await.unwrap_err();
        assert!(!e.is_transient(), "{e:?}");
        let e = cache.token().await.unwrap_err();
        assert!(e.is_transient(), "{e:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn refreshes_within_the_margin() -> anyhow::Result<()> {
        let now = Instant::now();
        let first = bearer("ya29.first", Some(now + LIFETIME));
        let second = bearer("ya29.second", Some(now + 2 * LIFETIME));
        let cache = TokenCache::new(sequence(vec![Ok(first.clone()), Ok(second.clone())]));
        assert_eq!(cache.token().await?, first);

        tokio::time::advance(LIFETIME - 2 * REFRESH_MARGIN).await;
        assert_eq!(cache.token().await?, first);

        tokio::time::advance(REFRESH_MARGIN + Duration::from_secs(1)).await;
        assert_eq!(cache.token().await?, second);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn expired_token_is_not_returned() -> anyhow::Result<()> {
        let first = bearer("ya29.first", Some(Instant::now() + LIFETIME));
        let cache = TokenCache::new(sequence(vec![
            Ok(first.clone()),
            Err(CredentialsError::from_msg(false, "fail")),
        ]));
        assert_eq!(cache.token().await?, first);
        tokio::time::advance(LIFETIME).await;
        assert!(cache.token().await.is_err());
        Ok(())
    }

    /// Counts the refreshes, each one slow enough for callers to queue.
    #[derive(Debug)]
    struct Slow {
        result: Result<Token>,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl TokenProvider for Slow {
        async fn token(&self) -> Result<Token> {
            tokio::time::sleep(Duration::from_millis(50)).await;
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    async fn herd(result: Result<Token>) -> anyhow::Result<(Vec<Result<Token>>, usize)> {
        let cache = TokenCache::new(Slow {
            result,
            calls: AtomicUsize::new(0),
        });
        let tasks = (0..100)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.token().await })
            })
            .collect::<Vec<_>>();
        let mut results = Vec::new();
        for t in tasks {
            results.push(t.await?);
        }
        Ok((results, cache.inner.calls.load(Ordering::SeqCst)))
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_callers_share_a_refresh() -> anyhow::Result<()> {
        let token = bearer("ya29.shared", None);
        let (results, calls) = herd(Ok(token.clone())).await?;
        for r in results {
            assert_eq!(r?, token);
        }
        assert_eq!(calls, 1);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_callers_share_a_failure() -> anyhow::Result<()> {
        let error = CredentialsError::from_msg(false, "epic fail");
        let (results, calls) = herd(Err(error)).await?;
        for r in results {
            let e = r.unwrap_err().to_string();
            assert!(e.contains("epic fail"), "{e}");
        }
        // Callers that arrive after the failed refresh start a new one.
        assert!(calls < 100, "{calls}");
        Ok(())
    }
}
