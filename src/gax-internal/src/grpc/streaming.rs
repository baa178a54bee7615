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

use super::to_gax_error;
use futures::Stream;
use pin_project::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};

/// The messages returned by a server streaming RPC.
///
/// Errors are converted with [to_gax_error], they keep the trailing metadata
/// sent by the service.
#[pin_project]
#[derive(Debug)]
pub struct ServerStream<T> {
    #[pin]
    inner: tonic::Streaming<T>,
}

impl<T> ServerStream<T> {
    pub(crate) fn new(inner: tonic::Streaming<T>) -> Self {
        Self { inner }
    }

    /// Returns the next message, `None` when the stream is complete.
    pub async fn next_message(&mut self) -> Option<gax::Result<T>> {
        self.inner
            .message()
            .await
            .map_err(to_gax_error)
            .transpose()
    }
}

impl<T> Stream for ServerStream<T> {
    type Item = gax::Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project()
            .inner
            .poll_next(cx)
            .map(|item| item.map(|r| r.map_err(to_gax_error)))
    }
}
