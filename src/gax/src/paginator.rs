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

//! Adapters to consume paginated RPCs as streams.
//!
//! Paginated RPCs, such as `GoogleAdsService.Search`, return one page of
//! results per call. Each page includes a token to request the next page,
//! an empty token means there are no more pages.

use futures::stream::{BoxStream, unfold};
use futures::{Stream, StreamExt};
use pin_project::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A response from a paginated RPC.
pub trait PageableResponse {
    type PageItem: Send;

    /// Consumes the page and returns its items.
    fn items(self) -> Vec<Self::PageItem>;

    /// The token to fetch the next page. Empty on the last page.
    fn next_page_token(&self) -> String;
}

type ControlFlow = std::ops::ControlFlow<(), String>;

/// Streams the pages of a paginated RPC.
///
/// Iteration stops after the first error, or after a page with an empty
/// `next_page_token`.
#[pin_project]
pub struct Paginator<T, E> {
    #[pin]
    stream: BoxStream<'static, Result<T, E>>,
}

impl<T, E> Paginator<T, E>
where
    T: PageableResponse + Send + 'static,
    E: Send + 'static,
{
    /// Creates a new paginator given the initial page token and a function to
    /// fetch a page given its token.
    pub fn new<F>(seed_token: String, execute: impl Fn(String) -> F + Clone + Send + 'static) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        let stream = unfold(ControlFlow::Continue(seed_token), move |state| {
            let execute = execute.clone();
            async move {
                let token = match state {
                    ControlFlow::Continue(token) => token,
                    ControlFlow::Break(_) => return None,
                };
                match execute(token).await {
                    Ok(page) => {
                        let token = page.next_page_token();
                        let next = if token.is_empty() {
                            ControlFlow::Break(())
                        } else {
                            ControlFlow::Continue(token)
                        };
                        Some((Ok(page), next))
                    }
                    Err(e) => Some((Err(e), ControlFlow::Break(()))),
                }
            }
        });
        Self {
            stream: Box::pin(stream),
        }
    }

    /// Returns the next page.
    pub fn next(&mut self) -> futures::stream::Next<'_, Self> {
        StreamExt::next(self)
    }

    /// Converts this paginator into a stream over the items in each page.
    pub fn by_item(self) -> ItemPaginator<T, E> {
        ItemPaginator {
            pages: self,
            current: Vec::new().into_iter(),
        }
    }
}

impl<T, E> Stream for Paginator<T, E> {
    type Item = Result<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project().stream.poll_next(cx)
    }
}

/// Streams the items of a paginated RPC, fetching pages as needed.
pub struct ItemPaginator<T, E>
where
    T: PageableResponse,
{
    pages: Paginator<T, E>,
    current: std::vec::IntoIter<T::PageItem>,
}

impl<T, E> ItemPaginator<T, E>
where
    T: PageableResponse + Send + 'static,
    E: Send + 'static,
{
    /// Returns the next item.
    pub fn next(&mut self) -> futures::stream::Next<'_, Self> {
        StreamExt::next(self)
    }
}

// Neither field is structurally pinned.
impl<T: PageableResponse, E> Unpin for ItemPaginator<T, E> {}

impl<T, E> Stream for ItemPaginator<T, E>
where
    T: PageableResponse,
{
    type Item = Result<T::PageItem, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = Pin::into_inner(self);
        loop {
            if let Some(item) = this.current.next() {
                return Poll::Ready(Some(Ok(item)));
            }
            match this.pages.stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(page))) => this.current = page.items().into_iter(),
                Poll::Ready(Some(Err(e))) => return Poll::Ready(Some(Err(e))),
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
