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

//! A stub decorator logging each request.
//!
//! Each request produces a one line summary, at `INFO` level on success and
//! at `WARN` level on failure. The full request and response are logged at
//! `DEBUG` level, with personal information and the developer token
//! redacted.

use crate::ApiVersion;
use crate::metadata::{AdsMetadata, redacted_headers};
use crate::methods::{Rpc, method_info};
use crate::model::{self, ad_group_operation, campaign_operation, mutate_operation};
use crate::paths::customer_id_of;
use crate::redact::Redact;
use crate::streaming::Streaming;
use gax::options::RequestOptions;
use gax::response::Response;
use std::sync::Arc;
use tracing::Instrument;

/// Decorates a stub with logging.
#[derive(Clone, Debug)]
pub(crate) struct Logging<T> {
    inner: T,
    host: String,
    version: ApiVersion,
    metadata: Arc<AdsMetadata>,
    spans: bool,
}

impl<T> Logging<T> {
    /// Wraps `inner`.
    ///
    /// If `spans` is set each request also runs in its own `tracing` span.
    pub(crate) fn new(
        inner: T,
        host: impl Into<String>,
        version: ApiVersion,
        metadata: Arc<AdsMetadata>,
        spans: bool,
    ) -> Self {
        Self {
            inner,
            host: host.into(),
            version,
            metadata,
            spans,
        }
    }

    fn start<R: LoggedRequest>(&self, rpc: Rpc, req: &R, options: &RequestOptions) -> Call {
        let method = method_info(self.version, rpc)
            .map(|i| i.path.as_str())
            .unwrap_or(rpc.name());
        let call = Call {
            method,
            host: self.host.clone(),
            customer_id: req.customer_id(),
        };
        tracing::debug!(
            "Request\n-------\nMethod: {}\nHost: {}\nHeaders: {:?}\nRequest: {:?}\n",
            call.method,
            call.host,
            redacted_headers(options, &self.metadata),
            req.redacted()
        );
        call
    }

    fn span(&self, call: &Call) -> tracing::Span {
        if !self.spans {
            return tracing::Span::none();
        }
        tracing::info_span!(
            "google_ads_request",
            method = call.method,
            customer_id = call.customer_id.as_deref().unwrap_or_default()
        )
    }
}

/// The information logged for a single request.
#[derive(Clone, Debug)]
struct Call {
    method: &'static str,
    host: String,
    customer_id: Option<String>,
}

impl Call {
    fn summary(&self, request_id: Option<&str>, fault: Option<&str>) -> String {
        format!(
            "Request made: ClientCustomerId: {}, Host: {}, Method: {}, RequestId: {}, IsFault: {}, FaultMessage: {}",
            self.customer_id.as_deref().unwrap_or("None"),
            self.host,
            self.method,
            request_id.unwrap_or("None"),
            fault.is_some(),
            fault.unwrap_or("None"),
        )
    }

    fn finish<R: Redact>(&self, result: &crate::Result<Response<R>>) {
        match result {
            Ok(response) => {
                self.succeeded(response.request_id());
                tracing::debug!(
                    "Response\n-------\nHeaders: {:?}\nResponse: {:?}\n",
                    response.headers(),
                    response.body().redacted()
                );
            }
            Err(e) => self.failed(e),
        }
    }

    fn succeeded(&self, request_id: Option<&str>) {
        tracing::info!("{}", self.summary(request_id, None));
    }

    fn failed(&self, error: &crate::Error) {
        let fault = crate::error::fault_message(error);
        let request_id = error.request_id();
        tracing::warn!("{}", self.summary(request_id, Some(&fault)));
        tracing::debug!(
            "Response\n-------\nHeaders: {:?}\nFault: {}\n",
            error.http_headers(),
            error
        );
    }
}

/// A streaming call in progress.
///
/// The summary is logged once: on the first error, or when the stream is
/// complete or dropped.
struct StreamLog<T> {
    stream: Streaming<T>,
    call: Call,
    request_id: Option<String>,
    failed: bool,
}

impl<T> Drop for StreamLog<T> {
    fn drop(&mut self) {
        if !self.failed {
            self.call.succeeded(self.request_id.as_deref());
        }
    }
}

/// Requests, with the customer id used in the log summary.
trait LoggedRequest: Redact {
    fn customer_id(&self) -> Option<String>;
}

fn customer_id_or<'a, I>(customer_id: &str, resource_names: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    if !customer_id.is_empty() {
        return Some(customer_id.to_string());
    }
    resource_names
        .into_iter()
        .find_map(customer_id_of)
        .map(str::to_string)
}

fn campaign_operation_name(op: &model::CampaignOperation) -> Option<&str> {
    match op.operation.as_ref()? {
        campaign_operation::Operation::Create(c) | campaign_operation::Operation::Update(c) => {
            Some(&c.resource_name)
        }
        campaign_operation::Operation::Remove(name) => Some(name),
    }
}

fn ad_group_operation_name(op: &model::AdGroupOperation) -> Option<&str> {
    match op.operation.as_ref()? {
        ad_group_operation::Operation::Create(g) | ad_group_operation::Operation::Update(g) => {
            Some(&g.resource_name)
        }
        ad_group_operation::Operation::Remove(name) => Some(name),
    }
}

impl LoggedRequest for model::MutateCampaignsRequest {
    fn customer_id(&self) -> Option<String> {
        customer_id_or(
            &self.customer_id,
            self.operations.iter().filter_map(campaign_operation_name),
        )
    }
}

impl LoggedRequest for model::MutateAdGroupsRequest {
    fn customer_id(&self) -> Option<String> {
        customer_id_or(
            &self.customer_id,
            self.operations.iter().filter_map(ad_group_operation_name),
        )
    }
}

impl LoggedRequest for model::SearchGoogleAdsRequest {
    fn customer_id(&self) -> Option<String> {
        customer_id_or(&self.customer_id, std::iter::empty())
    }
}

impl LoggedRequest for model::SearchGoogleAdsStreamRequest {
    fn customer_id(&self) -> Option<String> {
        customer_id_or(&self.customer_id, std::iter::empty())
    }
}

impl LoggedRequest for model::MutateGoogleAdsRequest {
    fn customer_id(&self) -> Option<String> {
        let names = self
            .mutate_operations
            .iter()
            .filter_map(|op| match op.operation.as_ref()? {
                mutate_operation::Operation::CampaignOperation(o) => campaign_operation_name(o),
                mutate_operation::Operation::AdGroupOperation(o) => ad_group_operation_name(o),
            });
        customer_id_or(&self.customer_id, names)
    }
}

impl LoggedRequest for model::ListAccessibleCustomersRequest {
    fn customer_id(&self) -> Option<String> {
        None
    }
}

impl<T: crate::stub::CampaignService> crate::stub::CampaignService for Logging<T> {
    async fn mutate_campaigns(
        &self,
        req: model::MutateCampaignsRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::MutateCampaignsResponse>> {
        let call = self.start(Rpc::MutateCampaigns, &req, &options);
        let result = self
            .inner
            .mutate_campaigns(req, options)
            .instrument(self.span(&call))
            .await;
        call.finish(&result);
        result
    }
}

impl<T: crate::stub::AdGroupService> crate::stub::AdGroupService for Logging<T> {
    async fn mutate_ad_groups(
        &self,
        req: model::MutateAdGroupsRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::MutateAdGroupsResponse>> {
        let call = self.start(Rpc::MutateAdGroups, &req, &options);
        let result = self
            .inner
            .mutate_ad_groups(req, options)
            .instrument(self.span(&call))
            .await;
        call.finish(&result);
        result
    }
}

impl<T: crate::stub::GoogleAdsService> crate::stub::GoogleAdsService for Logging<T> {
    async fn search(
        &self,
        req: model::SearchGoogleAdsRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::SearchGoogleAdsResponse>> {
        let call = self.start(Rpc::Search, &req, &options);
        let result = self
            .inner
            .search(req, options)
            .instrument(self.span(&call))
            .await;
        call.finish(&result);
        result
    }

    async fn search_stream(
        &self,
        req: model::SearchGoogleAdsStreamRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<Streaming<model::SearchGoogleAdsStreamResponse>>> {
        let call = self.start(Rpc::SearchStream, &req, &options);
        let result = self
            .inner
            .search_stream(req, options)
            .instrument(self.span(&call))
            .await;
        let response = match result {
            Ok(r) => r,
            Err(e) => {
                call.failed(&e);
                return Err(e);
            }
        };
        let request_id = response.request_id().map(str::to_string);
        let (parts, stream) = response.into_parts();
        tracing::debug!("Response\n-------\nHeaders: {:?}\n", parts.headers);
        let log = StreamLog {
            stream,
            call,
            request_id,
            failed: false,
        };
        let stream = futures::stream::unfold(log, |mut log| async move {
            let item = log.stream.next_message().await?;
            match &item {
                Ok(batch) => tracing::debug!("Response: {:?}", batch.redacted()),
                Err(e) => {
                    log.failed = true;
                    log.call.failed(e);
                }
            }
            Some((item, log))
        });
        Ok(Response::from_parts(parts, Streaming::new(stream)))
    }

    async fn mutate(
        &self,
        req: model::MutateGoogleAdsRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::MutateGoogleAdsResponse>> {
        let call = self.start(Rpc::Mutate, &req, &options);
        let result = self
            .inner
            .mutate(req, options)
            .instrument(self.span(&call))
            .await;
        call.finish(&result);
        result
    }
}

impl<T: crate::stub::CustomerService> crate::stub::CustomerService for Logging<T> {
    async fn list_accessible_customers(
        &self,
        req: model::ListAccessibleCustomersRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::ListAccessibleCustomersResponse>> {
        let call = self.start(Rpc::ListAccessibleCustomers, &req, &options);
        let result = self
            .inner
            .list_accessible_customers(req, options)
            .instrument(self.span(&call))
            .await;
        call.finish(&result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::tests::{test_error, test_failure, test_headers};
    use gax::error::rpc::Code;
    use pretty_assertions::assert_eq;
    use prost::Message;
    use std::sync::Mutex;

    mockall::mock! {
        #[derive(Debug)]
        GoogleAdsService {}
        impl crate::stub::GoogleAdsService for GoogleAdsService {
            async fn search(
                &self,
                req: model::SearchGoogleAdsRequest,
                options: RequestOptions,
            ) -> crate::Result<Response<model::SearchGoogleAdsResponse>>;
            async fn search_stream(
                &self,
                req: model::SearchGoogleAdsStreamRequest,
                options: RequestOptions,
            ) -> crate::Result<Response<Streaming<model::SearchGoogleAdsStreamResponse>>>;
            async fn mutate(
                &self,
                req: model::MutateGoogleAdsRequest,
                options: RequestOptions,
            ) -> crate::Result<Response<model::MutateGoogleAdsResponse>>;
        }
    }

    mockall::mock! {
        #[derive(Debug)]
        CampaignService {}
        impl crate::stub::CampaignService for CampaignService {
            async fn mutate_campaigns(
                &self,
                req: model::MutateCampaignsRequest,
                options: RequestOptions,
            ) -> crate::Result<Response<model::MutateCampaignsResponse>>;
        }
    }

    mockall::mock! {
        #[derive(Debug)]
        CustomerService {}
        impl crate::stub::CustomerService for CustomerService {
            async fn list_accessible_customers(
                &self,
                req: model::ListAccessibleCustomersRequest,
                options: RequestOptions,
            ) -> crate::Result<Response<model::ListAccessibleCustomersResponse>>;
        }
    }

    /// Captures the formatted log output.
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn contents(&self) -> String {
            let buf = self.0.lock().expect("never poisoned");
            String::from_utf8_lossy(&buf).to_string()
        }
    }

    impl std::io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("never poisoned").extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn capture_logs() -> (Capture, tracing::subscriber::DefaultGuard) {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        (capture, tracing::subscriber::set_default(subscriber))
    }

    fn decorate<T>(inner: T) -> Logging<T> {
        let config = Config {
            login_customer_id: Some("1111111111".into()),
            ..Config::new("secret-developer-token")
        };
        Logging::new(
            inner,
            "googleads.googleapis.com",
            ApiVersion::V22,
            Arc::new(AdsMetadata::from_config(&config)),
            true,
        )
    }

    fn with_request_id<T>(body: T) -> Response<T> {
        let mut headers = http::HeaderMap::new();
        headers.insert("request-id", http::HeaderValue::from_static("req-123"));
        Response::from_parts(gax::response::Parts::new().set_headers(headers), body)
    }

    fn sensitive_row() -> model::GoogleAdsRow {
        model::GoogleAdsRow {
            change_event: Some(model::ChangeEvent {
                user_email: "editor@example.com".into(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn search_success() -> anyhow::Result<()> {
        let (logs, _guard) = capture_logs();
        let mut mock = MockGoogleAdsService::new();
        mock.expect_search().return_once(|_, _| {
            Ok(with_request_id(model::SearchGoogleAdsResponse {
                results: vec![sensitive_row()],
                ..Default::default()
            }))
        });
        let stub = decorate(mock);
        let request = model::SearchGoogleAdsRequest {
            customer_id: "1234567890".into(),
            query: "SELECT change_event.user_email FROM change_event".into(),
            ..Default::default()
        };
        let response = crate::stub::GoogleAdsService::search(&stub, request, RequestOptions::default()).await?;
        // The application receives the unredacted response.
        assert_eq!(response.body().results, vec![sensitive_row()]);

        let logs = logs.contents();
        assert!(
            logs.contains("Request made: ClientCustomerId: 1234567890, Host: googleads.googleapis.com, Method: /google.ads.googleads.v22.services.GoogleAdsService/Search, RequestId: req-123, IsFault: false, FaultMessage: None"),
            "{logs}"
        );
        assert!(logs.contains(" INFO "), "{logs}");
        assert!(!logs.contains("editor@example.com"), "{logs}");
        assert!(logs.contains("REDACTED"), "{logs}");
        assert!(!logs.contains("secret-developer-token"), "{logs}");
        assert!(logs.contains("1111111111"), "{logs}");
        Ok(())
    }

    #[tokio::test]
    async fn search_fault() -> anyhow::Result<()> {
        let (logs, _guard) = capture_logs();
        let mut mock = MockGoogleAdsService::new();
        mock.expect_search().return_once(|_, _| {
            let headers = test_headers(ApiVersion::V22, &test_failure().encode_to_vec());
            Err(test_error(Code::InvalidArgument, headers))
        });
        let stub = decorate(mock);
        let request = model::SearchGoogleAdsRequest {
            customer_id: "1234567890".into(),
            ..Default::default()
        };
        let err = crate::stub::GoogleAdsService::search(&stub, request, RequestOptions::default())
            .await
            .unwrap_err();
        assert!(err.status().is_some(), "{err:?}");

        let logs = logs.contents();
        assert!(
            logs.contains("RequestId: abc123, IsFault: true, FaultMessage: The campaign name is already in use."),
            "{logs}"
        );
        assert!(logs.contains(" WARN "), "{logs}");
        Ok(())
    }

    #[tokio::test]
    async fn search_stream_redacts_batches() -> anyhow::Result<()> {
        let (logs, _guard) = capture_logs();
        let mut mock = MockGoogleAdsService::new();
        mock.expect_search_stream().return_once(|_, _| {
            let batch = model::SearchGoogleAdsStreamResponse {
                results: vec![sensitive_row()],
                ..Default::default()
            };
            let stream = Streaming::new(futures::stream::iter([Ok(batch)]));
            Ok(with_request_id(stream))
        });
        let stub = decorate(mock);
        let request = model::SearchGoogleAdsStreamRequest {
            customer_id: "1234567890".into(),
            ..Default::default()
        };
        let mut stream =
            crate::stub::GoogleAdsService::search_stream(&stub, request, RequestOptions::default())
                .await?
                .into_body();
        let batch = stream.next_message().await.transpose()?;
        assert_eq!(batch.map(|b| b.results), Some(vec![sensitive_row()]));
        let contents = logs.contents();
        assert!(!contents.contains("Request made"), "{contents}");

        assert!(stream.next_message().await.is_none());
        let contents = logs.contents();
        assert!(contents.contains("SearchStream, RequestId: req-123, IsFault: false"), "{contents}");
        assert!(!contents.contains("editor@example.com"), "{contents}");
        assert_eq!(contents.matches("Request made").count(), 1, "{contents}");
        Ok(())
    }

    #[tokio::test]
    async fn search_stream_fails_mid_stream() -> anyhow::Result<()> {
        let (logs, _guard) = capture_logs();
        let mut mock = MockGoogleAdsService::new();
        mock.expect_search_stream().return_once(|_, _| {
            let headers = test_headers(ApiVersion::V22, &test_failure().encode_to_vec());
            let stream = Streaming::new(futures::stream::iter([
                Ok(model::SearchGoogleAdsStreamResponse::default()),
                Err(test_error(Code::InvalidArgument, headers)),
            ]));
            Ok(with_request_id(stream))
        });
        let stub = decorate(mock);
        let request = model::SearchGoogleAdsStreamRequest {
            customer_id: "1234567890".into(),
            ..Default::default()
        };
        let mut stream =
            crate::stub::GoogleAdsService::search_stream(&stub, request, RequestOptions::default())
                .await?
                .into_body();
        assert!(matches!(stream.next_message().await, Some(Ok(_))));
        assert!(matches!(stream.next_message().await, Some(Err(_))));
        assert!(stream.next_message().await.is_none());
        drop(stream);

        let contents = logs.contents();
        assert!(contents.contains("IsFault: true, FaultMessage: The campaign name is already in use."), "{contents}");
        assert!(!contents.contains("IsFault: false"), "{contents}");
        assert_eq!(contents.matches("Request made").count(), 1, "{contents}");
        Ok(())
    }

    #[tokio::test]
    async fn search_stream_dropped_early() -> anyhow::Result<()> {
        let (logs, _guard) = capture_logs();
        let mut mock = MockGoogleAdsService::new();
        mock.expect_search_stream().return_once(|_, _| {
            let stream = Streaming::new(futures::stream::iter([
                Ok(model::SearchGoogleAdsStreamResponse::default()),
                Ok(model::SearchGoogleAdsStreamResponse::default()),
            ]));
            Ok(with_request_id(stream))
        });
        let stub = decorate(mock);
        let mut stream = crate::stub::GoogleAdsService::search_stream(
            &stub,
            model::SearchGoogleAdsStreamRequest::default(),
            RequestOptions::default(),
        )
        .await?
        .into_body();
        assert!(matches!(stream.next_message().await, Some(Ok(_))));
        drop(stream);

        let contents = logs.contents();
        assert!(contents.contains("RequestId: req-123, IsFault: false"), "{contents}");
        Ok(())
    }

    #[tokio::test]
    async fn customer_id_from_resource_name() -> anyhow::Result<()> {
        let (logs, _guard) = capture_logs();
        let mut mock = MockCampaignService::new();
        mock.expect_mutate_campaigns()
            .return_once(|_, _| Ok(Response::from(model::MutateCampaignsResponse::default())));
        let stub = decorate(mock);
        let request = model::MutateCampaignsRequest {
            operations: vec![model::CampaignOperation {
                operation: Some(campaign_operation::Operation::Remove(
                    "customers/5555555555/campaigns/42".into(),
                )),
                ..Default::default()
            }],
            ..Default::default()
        };
        crate::stub::CampaignService::mutate_campaigns(&stub, request, RequestOptions::default())
            .await?;
        let logs = logs.contents();
        assert!(
            logs.contains("ClientCustomerId: 5555555555, Host: googleads.googleapis.com, Method: /google.ads.googleads.v22.services.CampaignService/MutateCampaigns, RequestId: None"),
            "{logs}"
        );
        Ok(())
    }

    #[tokio::test]
    async fn no_customer_id() -> anyhow::Result<()> {
        let (logs, _guard) = capture_logs();
        let mut mock = MockCustomerService::new();
        mock.expect_list_accessible_customers().return_once(|_, _| {
            Ok(Response::from(model::ListAccessibleCustomersResponse {
                resource_names: vec!["customers/1234567890".into()],
            }))
        });
        let stub = decorate(mock);
        crate::stub::CustomerService::list_accessible_customers(
            &stub,
            model::ListAccessibleCustomersRequest::default(),
            RequestOptions::default(),
        )
        .await?;
        let logs = logs.contents();
        assert!(logs.contains("Request made: ClientCustomerId: None"), "{logs}");
        Ok(())
    }

    #[test]
    fn mutate_customer_id() {
        let request = model::MutateGoogleAdsRequest {
            mutate_operations: vec![model::MutateOperation {
                operation: Some(mutate_operation::Operation::AdGroupOperation(
                    model::AdGroupOperation {
                        operation: Some(ad_group_operation::Operation::Update(model::AdGroup {
                            resource_name: "customers/7777777777/adGroups/1".into(),
                            ..Default::default()
                        })),
                        ..Default::default()
                    },
                )),
            }],
            ..Default::default()
        };
        assert_eq!(request.customer_id().as_deref(), Some("7777777777"));

        let request = model::MutateGoogleAdsRequest {
            customer_id: "1234567890".into(),
            ..request
        };
        assert_eq!(request.customer_id().as_deref(), Some("1234567890"));
        assert_eq!(model::MutateGoogleAdsRequest::default().customer_id(), None);
    }
}
