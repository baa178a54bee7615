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

//! The results of server streaming RPCs.

use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::task::{Context, Poll};

/// The messages returned by a server streaming RPC, such as
/// `GoogleAdsService.SearchStream`.
///
/// The stream ends after the last message, or after the first error.
///
/// # Example
/// ```
/// # use google_ads::streaming::Streaming;
/// # use google_ads::model::SearchGoogleAdsStreamResponse;
/// # tokio_test::block_on(async {
/// let mut stream = Streaming::new(futures::stream::iter([
///     Ok(SearchGoogleAdsStreamResponse::default()),
/// ]));
/// while let Some(batch) = stream.next_message().await {
///     let batch = batch?;
///     println!("{} rows", batch.results.len());
/// }
/// # google_ads::Result::<()>::Ok(()) });
/// ```
pub struct Streaming<T> {
    inner: BoxStream<'static, crate::Result<T>>,
}

impl<T> Streaming<T> {
    /// Creates a new stream, applications use this in mocks.
    ///
    /// The new stream ends after the first error in `inner`.
    pub fn new<S>(inner: S) -> Self
    where
        S: Stream<Item = crate::Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        let inner = inner.scan(false, |failed, item| {
            if *failed {
                return futures::future::ready(None);
            }
            *failed = item.is_err();
            futures::future::ready(Some(item))
        });
        Self {
            inner: inner.fuse().boxed(),
        }
    }

    /// Returns the next message, `None` when the stream is complete.
    pub async fn next_message(&mut self) -> Option<crate::Result<T>> {
        self.inner.next().await
    }
}

impl<T> std::fmt::Debug for Streaming<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Streaming").finish_non_exhaustive()
    }
}

impl<T> Stream for Streaming<T> {
    type Item = crate::Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}
