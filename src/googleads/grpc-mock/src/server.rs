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

//! `tonic` services dispatching each RPC to a mock.

use crate::mocks;
use crate::mocks::{
    AdGroupService as _, CampaignService as _, CustomerService as _, GoogleAdsService as _,
};
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::codegen::{Body, BoxFuture, Context, Poll, Service, StdError};

type HttpResponse = http::Response<tonic::body::Body>;

/// Adapts a closure into a unary `tonic` service.
struct Unary<F>(F);

impl<F, Fut, Req, Resp> tonic::server::UnaryService<Req> for Unary<F>
where
    F: FnMut(tonic::Request<Req>) -> Fut,
    Fut: Future<Output = tonic::Result<tonic::Response<Resp>>> + Send + 'static,
{
    type Response = Resp;
    type Future = BoxFuture<tonic::Response<Resp>, tonic::Status>;

    fn call(&mut self, request: tonic::Request<Req>) -> Self::Future {
        Box::pin((self.0)(request))
    }
}

fn unary<B, Req, Resp, F, Fut>(req: http::Request<B>, f: F) -> BoxFuture<HttpResponse, Infallible>
where
    B: Body + Send + 'static,
    B::Error: Into<StdError> + Send + 'static,
    Req: prost::Message + Default + Send + 'static,
    Resp: prost::Message + Send + 'static,
    F: FnMut(tonic::Request<Req>) -> Fut + Send + 'static,
    Fut: Future<Output = tonic::Result<tonic::Response<Resp>>> + Send + 'static,
{
    Box::pin(async move {
        let codec = tonic_prost::ProstCodec::<Resp, Req>::default();
        let mut grpc = tonic::server::Grpc::new(codec);
        Ok(grpc.unary(Unary(f), req).await)
    })
}

fn unimplemented(path: &str) -> BoxFuture<HttpResponse, Infallible> {
    let status = tonic::Status::unimplemented(format!("{path} is not served by this mock"));
    Box::pin(async move { Ok(status.into_http()) })
}

macro_rules! server {
    ($server:ident, $service:literal) => {
        #[derive(Debug)]
        pub struct $server<T> {
            inner: Arc<T>,
        }

        impl<T> $server<T> {
            pub fn new(inner: T) -> Self {
                Self {
                    inner: Arc::new(inner),
                }
            }
        }

        impl<T> Clone for $server<T> {
            fn clone(&self) -> Self {
                Self {
                    inner: self.inner.clone(),
                }
            }
        }

        impl<T> tonic::server::NamedService for $server<T> {
            const NAME: &'static str = concat!("google.ads.googleads.v22.services.", $service);
        }
    };
}

server!(CampaignServiceServer, "CampaignService");
server!(AdGroupServiceServer, "AdGroupService");
server!(GoogleAdsServiceServer, "GoogleAdsService");
server!(CustomerServiceServer, "CustomerService");

impl<T, B> Service<http::Request<B>> for CampaignServiceServer<T>
where
    T: mocks::CampaignService,
    B: Body + Send + 'static,
    B::Error: Into<StdError> + Send + 'static,
{
    type Response = HttpResponse;
    type Error = Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        let inner = self.inner.clone();
        match req.uri().path() {
            "/google.ads.googleads.v22.services.CampaignService/MutateCampaigns" => {
                unary(req, move |r| {
                    let inner = inner.clone();
                    async move { inner.mutate_campaigns(r).await }
                })
            }
            path => unimplemented(path),
        }
    }
}

impl<T, B> Service<http::Request<B>> for AdGroupServiceServer<T>
where
    T: mocks::AdGroupService,
    B: Body + Send + 'static,
    B::Error: Into<StdError> + Send + 'static,
{
    type Response = HttpResponse;
    type Error = Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        let inner = self.inner.clone();
        match req.uri().path() {
            "/google.ads.googleads.v22.services.AdGroupService/MutateAdGroups" => {
                unary(req, move |r| {
                    let inner = inner.clone();
                    async move { inner.mutate_ad_groups(r).await }
                })
            }
            path => unimplemented(path),
        }
    }
}

/// Serves `SearchStream` from the receiver returned by the mock.
struct SearchStreamSvc<T>(Arc<T>);

impl<T: mocks::GoogleAdsService>
    tonic::server::ServerStreamingService<google_ads::model::SearchGoogleAdsStreamRequest>
    for SearchStreamSvc<T>
{
    type Response = google_ads::model::SearchGoogleAdsStreamResponse;
    type ResponseStream = ReceiverStream<tonic::Result<Self::Response>>;
    type Future = BoxFuture<tonic::Response<Self::ResponseStream>, tonic::Status>;

    fn call(
        &mut self,
        request: tonic::Request<google_ads::model::SearchGoogleAdsStreamRequest>,
    ) -> Self::Future {
        let inner = self.0.clone();
        Box::pin(async move {
            let response = inner.search_stream(request).await?;
            Ok(response.map(ReceiverStream::<tonic::Result<Self::Response>>::new))
        })
    }
}

impl<T, B> Service<http::Request<B>> for GoogleAdsServiceServer<T>
where
    T: mocks::GoogleAdsService,
    B: Body + Send + 'static,
    B::Error: Into<StdError> + Send + 'static,
{
    type Response = HttpResponse;
    type Error = Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        let inner = self.inner.clone();
        match req.uri().path() {
            "/google.ads.googleads.v22.services.GoogleAdsService/Search" => unary(req, move |r| {
                let inner = inner.clone();
                async move { inner.search(r).await }
            }),
            "/google.ads.googleads.v22.services.GoogleAdsService/Mutate" => unary(req, move |r| {
                let inner = inner.clone();
                async move { inner.mutate(r).await }
            }),
            "/google.ads.googleads.v22.services.GoogleAdsService/SearchStream" => {
                Box::pin(async move {
                    let codec = tonic_prost::ProstCodec::<
                        google_ads::model::SearchGoogleAdsStreamResponse,
                        google_ads::model::SearchGoogleAdsStreamRequest,
                    >::default();
                    let mut grpc = tonic::server::Grpc::new(codec);
                    Ok(grpc.server_streaming(SearchStreamSvc(inner), req).await)
                })
            }
            path => unimplemented(path),
        }
    }
}

impl<T, B> Service<http::Request<B>> for CustomerServiceServer<T>
where
    T: mocks::CustomerService,
    B: Body + Send + 'static,
    B::Error: Into<StdError> + Send + 'static,
{
    type Response = HttpResponse;
    type Error = Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        let inner = self.inner.clone();
        match req.uri().path() {
            "/google.ads.googleads.v22.services.CustomerService/ListAccessibleCustomers" => {
                unary(req, move |r| {
                    let inner = inner.clone();
                    async move { inner.list_accessible_customers(r).await }
                })
            }
            path => unimplemented(path),
        }
    }
}

/// Creates a stream response from a list of batches.
pub fn stream_response<T: Send + 'static>(
    items: Vec<tonic::Result<T>>,
) -> tonic::Response<mpsc::Receiver<tonic::Result<T>>> {
    let (tx, rx) = mpsc::channel(items.len().max(1));
    for item in items {
        // The capacity fits all the items.
        let _ = tx.try_send(item);
    }
    tonic::Response::new(rx)
}
