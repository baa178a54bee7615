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

//! Request builders.
//!
//! Each RPC has a request builder, returned by the corresponding client
//! method. The builder sets the request fields, either as a complete request
//! object with `with_request()` or field by field with the flattened setters,
//! and the per-request options. `send()` makes the request.
//!
//! Setting a complete request and any flattened field is an error, detected
//! by `send()` before the request is made.

use gax::error::binding::RequestSource;
use gax::options::RequestOptions;
use std::sync::Arc;

/// The state shared by all request builders.
pub(crate) struct RequestBuilder<S: ?Sized, R> {
    stub: Arc<S>,
    request: R,
    options: RequestOptions,
    source: RequestSource,
}

impl<S: ?Sized, R: Default> RequestBuilder<S, R> {
    pub(crate) fn new(stub: Arc<S>) -> Self {
        Self {
            stub,
            request: R::default(),
            options: RequestOptions::default(),
            source: RequestSource::default(),
        }
    }

    fn set_request(&mut self, request: R) {
        self.request = request;
        self.source.set_request();
    }

    fn flattened(&mut self) -> &mut R {
        self.source.set_flattened();
        &mut self.request
    }

    /// Validates the arguments and returns the request and its options.
    fn into_parts(self) -> crate::Result<(Arc<S>, R, RequestOptions)> {
        self.source.check().map_err(crate::Error::binding)?;
        Ok((self.stub, self.request, self.options))
    }
}

impl<S: ?Sized, R: Clone> Clone for RequestBuilder<S, R> {
    fn clone(&self) -> Self {
        Self {
            stub: self.stub.clone(),
            request: self.request.clone(),
            options: self.options.clone(),
            source: self.source,
        }
    }
}

impl<S: ?Sized + std::fmt::Debug, R: std::fmt::Debug> std::fmt::Debug for RequestBuilder<S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("stub", &self.stub)
            .field("request", &self.request)
            .field("options", &self.options)
            .field("source", &self.source)
            .finish()
    }
}

/// Request builders for [CampaignService][crate::client::CampaignService].
pub mod campaign_service {
    use super::RequestBuilder;
    use crate::model;
    use crate::stub::dynamic;
    use gax::options::RequestOptions;
    use std::sync::Arc;

    /// The request builder for [CampaignService::mutate_campaigns][crate::client::CampaignService::mutate_campaigns] calls.
    ///
    /// # Example
    /// ```no_run
    /// # use google_ads::builder::campaign_service::MutateCampaigns;
    /// # use google_ads::model::{Campaign, CampaignOperation, campaign_operation::Operation};
    /// # async fn sample(builder: MutateCampaigns) -> google_ads::Result<()> {
    /// let campaign = Campaign { name: Some("Interplanetary Cruise".into()), ..Default::default() };
    /// let response = builder
    ///     .set_customer_id("1234567890")
    ///     .set_operations([CampaignOperation {
    ///         operation: Some(Operation::Create(campaign)),
    ///         ..Default::default()
    ///     }])
    ///     .set_partial_failure(true)
    ///     .send()
    ///     .await?;
    /// if let Some(failure) = response.partial_failure()? {
    ///     println!("some operations failed: {failure:?}");
    /// }
    /// # Ok(()) }
    /// ```
    #[derive(Clone, Debug)]
    pub struct MutateCampaigns(
        RequestBuilder<dyn dynamic::CampaignService, model::MutateCampaignsRequest>,
    );

    impl MutateCampaigns {
        pub(crate) fn new(stub: Arc<dyn dynamic::CampaignService>) -> Self {
            Self(RequestBuilder::new(stub))
        }

        /// Sets the full request, replacing any prior values.
        ///
        /// Do not combine with the flattened setters, `send()` rejects the
        /// request.
        pub fn with_request<V: Into<model::MutateCampaignsRequest>>(mut self, v: V) -> Self {
            self.0.set_request(v.into());
            self
        }

        /// Sets all the options, replacing any prior values.
        pub fn with_options<V: Into<RequestOptions>>(mut self, v: V) -> Self {
            self.0.options = v.into();
            self
        }

        /// Sends the request.
        pub async fn send(self) -> crate::Result<model::MutateCampaignsResponse> {
            let (stub, req, options) = self.0.into_parts()?;
            stub.mutate_campaigns(req, options)
                .await
                .map(gax::response::Response::into_body)
        }

        /// Sets the value of [customer_id][model::MutateCampaignsRequest::customer_id].
        pub fn set_customer_id<T: Into<String>>(mut self, v: T) -> Self {
            self.0.flattened().customer_id = v.into();
            self
        }

        /// Sets the value of [operations][model::MutateCampaignsRequest::operations].
        pub fn set_operations<T, V>(mut self, v: T) -> Self
        where
            T: IntoIterator<Item = V>,
            V: Into<model::CampaignOperation>,
        {
            self.0.flattened().operations = v.into_iter().map(Into::into).collect();
            self
        }

        /// Sets the value of [partial_failure][model::MutateCampaignsRequest::partial_failure].
        pub fn set_partial_failure(mut self, v: bool) -> Self {
            self.0.request.partial_failure = v;
            self
        }

        /// Sets the value of [validate_only][model::MutateCampaignsRequest::validate_only].
        pub fn set_validate_only(mut self, v: bool) -> Self {
            self.0.request.validate_only = v;
            self
        }

        /// Sets the value of [response_content_type][model::MutateCampaignsRequest::response_content_type].
        pub fn set_response_content_type(mut self, v: model::ResponseContentType) -> Self {
            self.0.request.response_content_type = v as i32;
            self
        }
    }

    #[doc(hidden)]
    impl gax::options::internal::RequestBuilder for MutateCampaigns {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.0.options
        }
    }
}

/// Request builders for [AdGroupService][crate::client::AdGroupService].
pub mod ad_group_service {
    use super::RequestBuilder;
    use crate::model;
    use crate::stub::dynamic;
    use gax::options::RequestOptions;
    use std::sync::Arc;

    /// The request builder for [AdGroupService::mutate_ad_groups][crate::client::AdGroupService::mutate_ad_groups] calls.
    #[derive(Clone, Debug)]
    pub struct MutateAdGroups(
        RequestBuilder<dyn dynamic::AdGroupService, model::MutateAdGroupsRequest>,
    );

    impl MutateAdGroups {
        pub(crate) fn new(stub: Arc<dyn dynamic::AdGroupService>) -> Self {
            Self(RequestBuilder::new(stub))
        }

        /// Sets the full request, replacing any prior values.
        pub fn with_request<V: Into<model::MutateAdGroupsRequest>>(mut self, v: V) -> Self {
            self.0.set_request(v.into());
            self
        }

        /// Sets all the options, replacing any prior values.
        pub fn with_options<V: Into<RequestOptions>>(mut self, v: V) -> Self {
            self.0.options = v.into();
            self
        }

        /// Sends the request.
        pub async fn send(self) -> crate::Result<model::MutateAdGroupsResponse> {
            let (stub, req, options) = self.0.into_parts()?;
            stub.mutate_ad_groups(req, options)
                .await
                .map(gax::response::Response::into_body)
        }

        /// Sets the value of [customer_id][model::MutateAdGroupsRequest::customer_id].
        pub fn set_customer_id<T: Into<String>>(mut self, v: T) -> Self {
            self.0.flattened().customer_id = v.into();
            self
        }

        /// Sets the value of [operations][model::MutateAdGroupsRequest::operations].
        pub fn set_operations<T, V>(mut self, v: T) -> Self
        where
            T: IntoIterator<Item = V>,
            V: Into<model::AdGroupOperation>,
        {
            self.0.flattened().operations = v.into_iter().map(Into::into).collect();
            self
        }

        /// Sets the value of [partial_failure][model::MutateAdGroupsRequest::partial_failure].
        pub fn set_partial_failure(mut self, v: bool) -> Self {
            self.0.request.partial_failure = v;
            self
        }

        /// Sets the value of [validate_only][model::MutateAdGroupsRequest::validate_only].
        pub fn set_validate_only(mut self, v: bool) -> Self {
            self.0.request.validate_only = v;
            self
        }

        /// Sets the value of [response_content_type][model::MutateAdGroupsRequest::response_content_type].
        pub fn set_response_content_type(mut self, v: model::ResponseContentType) -> Self {
            self.0.request.response_content_type = v as i32;
            self
        }
    }

    #[doc(hidden)]
    impl gax::options::internal::RequestBuilder for MutateAdGroups {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.0.options
        }
    }
}

/// Request builders for [GoogleAdsService][crate::client::GoogleAdsService].
pub mod google_ads_service {
    use super::RequestBuilder;
    use crate::model;
    use crate::streaming::Streaming;
    use crate::stub::dynamic;
    use gax::paginator::{ItemPaginator, Paginator};
    use gax::options::RequestOptions;
    use std::sync::Arc;

    /// The request builder for [GoogleAdsService::search][crate::client::GoogleAdsService::search] calls.
    ///
    /// `send()` returns a single page. Use `by_page()` or `by_item()` to
    /// iterate over all the results.
    ///
    /// # Example
    /// ```no_run
    /// # use google_ads::builder::google_ads_service::Search;
    /// # async fn sample(builder: Search) -> google_ads::Result<()> {
    /// let mut pages = builder
    ///     .set_customer_id("1234567890")
    ///     .set_query("SELECT campaign.id FROM campaign")
    ///     .by_page();
    /// while let Some(page) = pages.next().await {
    ///     let page = page?;
    ///     println!("{} rows", page.results.len());
    /// }
    /// # Ok(()) }
    /// ```
    #[derive(Clone, Debug)]
    pub struct Search(RequestBuilder<dyn dynamic::GoogleAdsService, model::SearchGoogleAdsRequest>);

    impl Search {
        pub(crate) fn new(stub: Arc<dyn dynamic::GoogleAdsService>) -> Self {
            Self(RequestBuilder::new(stub))
        }

        /// Sets the full request, replacing any prior values.
        pub fn with_request<V: Into<model::SearchGoogleAdsRequest>>(mut self, v: V) -> Self {
            self.0.set_request(v.into());
            self
        }

        /// Sets all the options, replacing any prior values.
        pub fn with_options<V: Into<RequestOptions>>(mut self, v: V) -> Self {
            self.0.options = v.into();
            self
        }

        /// Sends the request, returning one page of results.
        pub async fn send(self) -> crate::Result<model::SearchGoogleAdsResponse> {
            let (stub, req, options) = self.0.into_parts()?;
            stub.search(req, options)
                .await
                .map(gax::response::Response::into_body)
        }

        /// Streams each page in the results.
        ///
        /// The `page_token` of each request is the `next_page_token` of the
        /// previous response.
        pub fn by_page(self) -> Paginator<model::SearchGoogleAdsResponse, crate::Error> {
            let token = self.0.request.page_token.clone();
            let execute = move |token: String| {
                let mut builder = self.clone();
                builder.0.request.page_token = token;
                builder.send()
            };
            Paginator::new(token, execute)
        }

        /// Streams each row in the results.
        pub fn by_item(self) -> ItemPaginator<model::SearchGoogleAdsResponse, crate::Error> {
            self.by_page().by_item()
        }

        /// Sets the value of [customer_id][model::SearchGoogleAdsRequest::customer_id].
        pub fn set_customer_id<T: Into<String>>(mut self, v: T) -> Self {
            self.0.flattened().customer_id = v.into();
            self
        }

        /// Sets the value of [query][model::SearchGoogleAdsRequest::query].
        pub fn set_query<T: Into<String>>(mut self, v: T) -> Self {
            self.0.flattened().query = v.into();
            self
        }

        /// Sets the value of [page_token][model::SearchGoogleAdsRequest::page_token].
        pub fn set_page_token<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.page_token = v.into();
            self
        }

        /// Sets the value of [validate_only][model::SearchGoogleAdsRequest::validate_only].
        pub fn set_validate_only(mut self, v: bool) -> Self {
            self.0.request.validate_only = v;
            self
        }

        /// Sets the value of [return_total_results_count][model::SearchGoogleAdsRequest::return_total_results_count].
        pub fn set_return_total_results_count(mut self, v: bool) -> Self {
            self.0.request.return_total_results_count = v;
            self
        }

        /// Sets the value of [summary_row_setting][model::SearchGoogleAdsRequest::summary_row_setting].
        pub fn set_summary_row_setting(mut self, v: model::SummaryRowSetting) -> Self {
            self.0.request.summary_row_setting = v as i32;
            self
        }
    }

    #[doc(hidden)]
    impl gax::options::internal::RequestBuilder for Search {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.0.options
        }
    }

    /// The request builder for [GoogleAdsService::search_stream][crate::client::GoogleAdsService::search_stream] calls.
    ///
    /// # Example
    /// ```no_run
    /// # use google_ads::builder::google_ads_service::SearchStream;
    /// # async fn sample(builder: SearchStream) -> google_ads::Result<()> {
    /// let mut stream = builder
    ///     .set_customer_id("1234567890")
    ///     .set_query("SELECT campaign.id FROM campaign")
    ///     .send()
    ///     .await?;
    /// while let Some(batch) = stream.next_message().await {
    ///     for row in batch?.results {
    ///         println!("{row:?}");
    ///     }
    /// }
    /// # Ok(()) }
    /// ```
    #[derive(Clone, Debug)]
    pub struct SearchStream(
        RequestBuilder<dyn dynamic::GoogleAdsService, model::SearchGoogleAdsStreamRequest>,
    );

    impl SearchStream {
        pub(crate) fn new(stub: Arc<dyn dynamic::GoogleAdsService>) -> Self {
            Self(RequestBuilder::new(stub))
        }

        /// Sets the full request, replacing any prior values.
        pub fn with_request<V: Into<model::SearchGoogleAdsStreamRequest>>(mut self, v: V) -> Self {
            self.0.set_request(v.into());
            self
        }

        /// Sets all the options, replacing any prior values.
        pub fn with_options<V: Into<RequestOptions>>(mut self, v: V) -> Self {
            self.0.options = v.into();
            self
        }

        /// Starts the stream.
        pub async fn send(self) -> crate::Result<Streaming<model::SearchGoogleAdsStreamResponse>> {
            let (stub, req, options) = self.0.into_parts()?;
            stub.search_stream(req, options)
                .await
                .map(gax::response::Response::into_body)
        }

        /// Sets the value of [customer_id][model::SearchGoogleAdsStreamRequest::customer_id].
        pub fn set_customer_id<T: Into<String>>(mut self, v: T) -> Self {
            self.0.flattened().customer_id = v.into();
            self
        }

        /// Sets the value of [query][model::SearchGoogleAdsStreamRequest::query].
        pub fn set_query<T: Into<String>>(mut self, v: T) -> Self {
            self.0.flattened().query = v.into();
            self
        }

        /// Sets the value of [summary_row_setting][model::SearchGoogleAdsStreamRequest::summary_row_setting].
        pub fn set_summary_row_setting(mut self, v: model::SummaryRowSetting) -> Self {
            self.0.request.summary_row_setting = v as i32;
            self
        }
    }

    #[doc(hidden)]
    impl gax::options::internal::RequestBuilder for SearchStream {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.0.options
        }
    }

    /// The request builder for [GoogleAdsService::mutate][crate::client::GoogleAdsService::mutate] calls.
    #[derive(Clone, Debug)]
    pub struct Mutate(RequestBuilder<dyn dynamic::GoogleAdsService, model::MutateGoogleAdsRequest>);

    impl Mutate {
        pub(crate) fn new(stub: Arc<dyn dynamic::GoogleAdsService>) -> Self {
            Self(RequestBuilder::new(stub))
        }

        /// Sets the full request, replacing any prior values.
        pub fn with_request<V: Into<model::MutateGoogleAdsRequest>>(mut self, v: V) -> Self {
            self.0.set_request(v.into());
            self
        }

        /// Sets all the options, replacing any prior values.
        pub fn with_options<V: Into<RequestOptions>>(mut self, v: V) -> Self {
            self.0.options = v.into();
            self
        }

        /// Sends the request.
        pub async fn send(self) -> crate::Result<model::MutateGoogleAdsResponse> {
            let (stub, req, options) = self.0.into_parts()?;
            stub.mutate(req, options)
                .await
                .map(gax::response::Response::into_body)
        }

        /// Sets the value of [customer_id][model::MutateGoogleAdsRequest::customer_id].
        pub fn set_customer_id<T: Into<String>>(mut self, v: T) -> Self {
            self.0.flattened().customer_id = v.into();
            self
        }

        /// Sets the value of [mutate_operations][model::MutateGoogleAdsRequest::mutate_operations].
        pub fn set_mutate_operations<T, V>(mut self, v: T) -> Self
        where
            T: IntoIterator<Item = V>,
            V: Into<model::MutateOperation>,
        {
            self.0.flattened().mutate_operations = v.into_iter().map(Into::into).collect();
            self
        }

        /// Sets the value of [partial_failure][model::MutateGoogleAdsRequest::partial_failure].
        pub fn set_partial_failure(mut self, v: bool) -> Self {
            self.0.request.partial_failure = v;
            self
        }

        /// Sets the value of [validate_only][model::MutateGoogleAdsRequest::validate_only].
        pub fn set_validate_only(mut self, v: bool) -> Self {
            self.0.request.validate_only = v;
            self
        }

        /// Sets the value of [response_content_type][model::MutateGoogleAdsRequest::response_content_type].
        pub fn set_response_content_type(mut self, v: model::ResponseContentType) -> Self {
            self.0.request.response_content_type = v as i32;
            self
        }
    }

    #[doc(hidden)]
    impl gax::options::internal::RequestBuilder for Mutate {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.0.options
        }
    }
}

/// Request builders for [CustomerService][crate::client::CustomerService].
pub mod customer_service {
    use super::RequestBuilder;
    use crate::model;
    use crate::stub::dynamic;
    use gax::options::RequestOptions;
    use std::sync::Arc;

    /// The request builder for [CustomerService::list_accessible_customers][crate::client::CustomerService::list_accessible_customers] calls.
    ///
    /// This RPC has no flattened fields.
    #[derive(Clone, Debug)]
    pub struct ListAccessibleCustomers(
        RequestBuilder<dyn dynamic::CustomerService, model::ListAccessibleCustomersRequest>,
    );

    impl ListAccessibleCustomers {
        pub(crate) fn new(stub: Arc<dyn dynamic::CustomerService>) -> Self {
            Self(RequestBuilder::new(stub))
        }

        /// Sets the full request, replacing any prior values.
        pub fn with_request<V: Into<model::ListAccessibleCustomersRequest>>(
            mut self,
            v: V,
        ) -> Self {
            self.0.set_request(v.into());
            self
        }

        /// Sets all the options, replacing any prior values.
        pub fn with_options<V: Into<RequestOptions>>(mut self, v: V) -> Self {
            self.0.options = v.into();
            self
        }

        /// Sends the request.
        pub async fn send(self) -> crate::Result<model::ListAccessibleCustomersResponse> {
            let (stub, req, options) = self.0.into_parts()?;
            stub.list_accessible_customers(req, options)
                .await
                .map(gax::response::Response::into_body)
        }
    }

    #[doc(hidden)]
    impl gax::options::internal::RequestBuilder for ListAccessibleCustomers {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.0.options
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model;
    use crate::streaming::Streaming;
    use gax::options::RequestOptionsBuilder;
    use gax::response::Response;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

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

    fn page(names: &[&str], token: &str) -> model::SearchGoogleAdsResponse {
        model::SearchGoogleAdsResponse {
            results: names
                .iter()
                .map(|n| model::GoogleAdsRow {
                    campaign: Some(model::Campaign {
                        name: Some(n.to_string()),
                        ..Default::default()
                    }),
                    ..Default::default()
                })
                .collect(),
            next_page_token: token.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn flattened_fields() -> anyhow::Result<()> {
        let mut mock = MockCampaignService::new();
        mock.expect_mutate_campaigns()
            .withf(|req, options| {
                req.customer_id == "1234567890"
                    && req.operations.len() == 1
                    && req.partial_failure
                    && req.response_content_type == model::ResponseContentType::MutableResource as i32
                    && options.attempt_timeout() == &Some(Duration::from_secs(5))
            })
            .return_once(|_, _| Ok(Response::from(model::MutateCampaignsResponse::default())));
        let stub: Arc<dyn crate::stub::dynamic::CampaignService> = Arc::new(mock);
        let response = campaign_service::MutateCampaigns::new(stub)
            .set_customer_id("1234567890")
            .set_operations([model::CampaignOperation::default()])
            .set_partial_failure(true)
            .set_response_content_type(model::ResponseContentType::MutableResource)
            .with_attempt_timeout(Duration::from_secs(5))
            .send()
            .await?;
        assert_eq!(response, model::MutateCampaignsResponse::default());
        Ok(())
    }

    #[tokio::test]
    async fn request_and_flattened_conflict() {
        let mut mock = MockCampaignService::new();
        mock.expect_mutate_campaigns().never();
        let stub: Arc<dyn crate::stub::dynamic::CampaignService> = Arc::new(mock);
        let err = campaign_service::MutateCampaigns::new(stub.clone())
            .with_request(model::MutateCampaignsRequest::default())
            .set_customer_id("1234567890")
            .send()
            .await
            .unwrap_err();
        assert!(err.is_binding(), "{err:?}");
        assert!(
            err.to_string().contains(
                "If the `request` argument is set, then none of the individual field arguments should be set."
            ),
            "{err}"
        );

        // The order does not matter.
        let err = campaign_service::MutateCampaigns::new(stub)
            .set_operations([model::CampaignOperation::default()])
            .with_request(model::MutateCampaignsRequest::default())
            .send()
            .await
            .unwrap_err();
        assert!(err.is_binding(), "{err:?}");
    }

    #[tokio::test]
    async fn request_with_other_fields() -> anyhow::Result<()> {
        let mut mock = MockGoogleAdsService::new();
        mock.expect_mutate()
            .withf(|req, _| req.customer_id == "1234567890" && req.partial_failure && req.validate_only)
            .return_once(|_, _| Ok(Response::from(model::MutateGoogleAdsResponse::default())));
        let stub: Arc<dyn crate::stub::dynamic::GoogleAdsService> = Arc::new(mock);
        let request = model::MutateGoogleAdsRequest {
            customer_id: "1234567890".into(),
            ..Default::default()
        };
        google_ads_service::Mutate::new(stub)
            .with_request(request)
            .set_partial_failure(true)
            .set_validate_only(true)
            .send()
            .await?;
        Ok(())
    }

    #[tokio::test]
    async fn search_by_page() -> anyhow::Result<()> {
        let mut seq = mockall::Sequence::new();
        let mut mock = MockGoogleAdsService::new();
        mock.expect_search()
            .withf(|req, _| req.page_token.is_empty() && req.query == "SELECT campaign.name FROM campaign")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(Response::from(page(&["a", "b"], "token-1"))));
        mock.expect_search()
            .withf(|req, _| req.page_token == "token-1" && req.customer_id == "1234567890")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(Response::from(page(&["c"], ""))));
        let stub: Arc<dyn crate::stub::dynamic::GoogleAdsService> = Arc::new(mock);

        let mut pages = google_ads_service::Search::new(stub)
            .set_customer_id("1234567890")
            .set_query("SELECT campaign.name FROM campaign")
            .by_page();
        let mut tokens = Vec::new();
        while let Some(p) = pages.next().await {
            tokens.push(p?.next_page_token);
        }
        assert_eq!(tokens, vec!["token-1", ""]);
        Ok(())
    }

    #[tokio::test]
    async fn search_by_item() -> anyhow::Result<()> {
        let mut mock = MockGoogleAdsService::new();
        mock.expect_search().returning(|req, _| match req.page_token.as_str() {
            "" => Ok(Response::from(page(&["a", "b"], "token-1"))),
            "token-1" => Ok(Response::from(page(&[], "token-2"))),
            _ => Ok(Response::from(page(&["c"], ""))),
        });
        let stub: Arc<dyn crate::stub::dynamic::GoogleAdsService> = Arc::new(mock);
        let mut rows = google_ads_service::Search::new(stub)
            .set_customer_id("1234567890")
            .by_item();
        let mut names = Vec::new();
        while let Some(row) = rows.next().await {
            names.push(row?.campaign.and_then(|c| c.name).unwrap_or_default());
        }
        assert_eq!(names, vec!["a", "b", "c"]);
        Ok(())
    }

    #[tokio::test]
    async fn search_by_page_error_stops() -> anyhow::Result<()> {
        let mut mock = MockGoogleAdsService::new();
        mock.expect_search()
            .times(1)
            .returning(|_, _| Err(crate::Error::io("connection reset")));
        let stub: Arc<dyn crate::stub::dynamic::GoogleAdsService> = Arc::new(mock);
        let mut pages = google_ads_service::Search::new(stub)
            .set_customer_id("1234567890")
            .by_page();
        let first = pages.next().await;
        assert!(matches!(first, Some(Err(ref e)) if e.is_io()), "{first:?}");
        assert!(pages.next().await.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn search_conflict_in_pager() {
        let mock = MockGoogleAdsService::new();
        let stub: Arc<dyn crate::stub::dynamic::GoogleAdsService> = Arc::new(mock);
        let mut pages = google_ads_service::Search::new(stub)
            .with_request(model::SearchGoogleAdsRequest::default())
            .set_query("SELECT campaign.id FROM campaign")
            .by_page();
        let first = pages.next().await;
        assert!(matches!(first, Some(Err(ref e)) if e.is_binding()), "{first:?}");
    }

    #[tokio::test]
    async fn search_stream() -> anyhow::Result<()> {
        let mut mock = MockGoogleAdsService::new();
        mock.expect_search_stream()
            .withf(|req, _| {
                req.summary_row_setting == model::SummaryRowSetting::SummaryRowWithResults as i32
            })
            .return_once(|_, _| {
                let batches = [
                    Ok(model::SearchGoogleAdsStreamResponse::default()),
                    Ok(model::SearchGoogleAdsStreamResponse {
                        request_id: "last".into(),
                        ..Default::default()
                    }),
                ];
                Ok(Response::from(Streaming::new(futures::stream::iter(batches))))
            });
        let stub: Arc<dyn crate::stub::dynamic::GoogleAdsService> = Arc::new(mock);
        let mut stream = google_ads_service::SearchStream::new(stub)
            .set_customer_id("1234567890")
            .set_query("SELECT campaign.id FROM campaign")
            .set_summary_row_setting(model::SummaryRowSetting::SummaryRowWithResults)
            .send()
            .await?;
        let mut ids = Vec::new();
        while let Some(batch) = stream.next_message().await {
            ids.push(batch?.request_id);
        }
        assert_eq!(ids, vec!["", "last"]);
        Ok(())
    }

    #[tokio::test]
    async fn options_headers() -> anyhow::Result<()> {
        let mut mock = MockGoogleAdsService::new();
        mock.expect_mutate()
            .withf(|_, options| {
                options.headers() == [("login-customer-id".to_string(), "2222222222".to_string())]
                    && options.idempotent() == Some(true)
            })
            .return_once(|_, _| Ok(Response::from(model::MutateGoogleAdsResponse::default())));
        let stub: Arc<dyn crate::stub::dynamic::GoogleAdsService> = Arc::new(mock);
        google_ads_service::Mutate::new(stub)
            .set_customer_id("1234567890")
            .with_login_customer_id("222-222-2222")
            .with_idempotency(true)
            .send()
            .await?;
        Ok(())
    }
}
