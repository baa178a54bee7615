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

//! End-to-end tests against a mock Google Ads API server.

use google_ads::client::GoogleAdsClient;
use google_ads::config::Config;
use google_ads::error::GoogleAdsException;
use google_ads::model;
use googleads_grpc_mock::{Mocks, failure_status, start, stream_response};
use gax::error::rpc::Code;
use pretty_assertions::assert_eq;

type MetadataCheck = fn(&tonic::metadata::MetadataMap) -> bool;

fn header<'a>(metadata: &'a tonic::metadata::MetadataMap, name: &str) -> Option<&'a str> {
    metadata.get(name).and_then(|v| v.to_str().ok())
}

async fn test_client(endpoint: String) -> anyhow::Result<GoogleAdsClient> {
    let mut config = Config::new("test-developer-token");
    config.login_customer_id = Some("2222222222".into());
    let client = GoogleAdsClient::builder()
        .with_config(config)
        .with_endpoint(endpoint)
        .with_credentials(auth::credentials::anonymous::Builder::new().build())
        .build()
        .await?;
    Ok(client)
}

fn campaign_row(name: &str) -> model::GoogleAdsRow {
    model::GoogleAdsRow {
        campaign: Some(model::Campaign {
            name: Some(name.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[tokio::test]
async fn mutate_campaigns_headers() -> anyhow::Result<()> {
    let check: MetadataCheck = |m| {
        header(m, "x-goog-request-params") == Some("customer_id=1234567890")
            && header(m, "developer-token") == Some("test-developer-token")
            && header(m, "login-customer-id") == Some("2222222222")
            && header(m, "linked-customer-id").is_none()
            && header(m, "x-goog-api-client").is_some_and(|v| v.contains("gapic/"))
    };
    let mut mocks = Mocks::default();
    mocks
        .campaign_service
        .expect_mutate_campaigns()
        .withf(move |r| {
            check(r.metadata())
                && r.get_ref().customer_id == "1234567890"
                && r.get_ref().partial_failure
                && r.get_ref().operations.len() == 2
        })
        .return_once(|_| {
            Ok(tonic::Response::new(model::MutateCampaignsResponse {
                results: vec![
                    model::MutateCampaignResult {
                        resource_name: "customers/1234567890/campaigns/1".into(),
                        ..Default::default()
                    },
                    model::MutateCampaignResult {
                        resource_name: "customers/1234567890/campaigns/2".into(),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            }))
        });
    let (endpoint, _server) = start("127.0.0.1:0", mocks).await?;
    let client = test_client(endpoint).await?;

    let response = client
        .campaign_service()
        .mutate_campaigns()
        .set_customer_id("1234567890")
        .set_operations([
            model::CampaignOperation::default(),
            model::CampaignOperation::default(),
        ])
        .set_partial_failure(true)
        .send()
        .await?;
    let names = response
        .results
        .iter()
        .map(|r| r.resource_name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![
            "customers/1234567890/campaigns/1",
            "customers/1234567890/campaigns/2"
        ]
    );
    Ok(())
}

#[tokio::test]
async fn list_accessible_customers_has_no_routing() -> anyhow::Result<()> {
    let mut mocks = Mocks::default();
    mocks
        .customer_service
        .expect_list_accessible_customers()
        .withf(|r| header(r.metadata(), "x-goog-request-params").is_none())
        .return_once(|_| {
            Ok(tonic::Response::new(model::ListAccessibleCustomersResponse {
                resource_names: vec!["customers/1234567890".into()],
            }))
        });
    let (endpoint, _server) = start("127.0.0.1:0", mocks).await?;
    let client = test_client(endpoint).await?;

    let response = client
        .customer_service()
        .list_accessible_customers()
        .send()
        .await?;
    assert_eq!(response.resource_names, vec!["customers/1234567890"]);
    Ok(())
}

#[tokio::test]
async fn search_pagination() -> anyhow::Result<()> {
    let mut mocks = Mocks::default();
    mocks
        .google_ads_service
        .expect_search()
        .times(3)
        .returning(|r| {
            let page = match r.get_ref().page_token.as_str() {
                "" => model::SearchGoogleAdsResponse {
                    results: vec![campaign_row("a"), campaign_row("b")],
                    next_page_token: "page-2".into(),
                    ..Default::default()
                },
                "page-2" => model::SearchGoogleAdsResponse {
                    results: vec![campaign_row("c")],
                    next_page_token: "page-3".into(),
                    ..Default::default()
                },
                _ => model::SearchGoogleAdsResponse {
                    results: vec![campaign_row("d")],
                    ..Default::default()
                },
            };
            Ok(tonic::Response::new(page))
        });
    let (endpoint, _server) = start("127.0.0.1:0", mocks).await?;
    let client = test_client(endpoint).await?;

    let mut rows = client
        .google_ads_service()
        .search()
        .set_customer_id("1234567890")
        .set_query("SELECT campaign.name FROM campaign")
        .by_item();
    let mut names = Vec::new();
    while let Some(row) = rows.next().await {
        names.push(row?.campaign.and_then(|c| c.name).unwrap_or_default());
    }
    assert_eq!(names, vec!["a", "b", "c", "d"]);
    Ok(())
}

#[tokio::test]
async fn search_stream() -> anyhow::Result<()> {
    let mut mocks = Mocks::default();
    mocks
        .google_ads_service
        .expect_search_stream()
        .withf(|r| {
            header(r.metadata(), "x-goog-request-params") == Some("customer_id=1234567890")
        })
        .return_once(|_| {
            Ok(stream_response(vec![
                Ok(model::SearchGoogleAdsStreamResponse {
                    results: vec![campaign_row("a"), campaign_row("b")],
                    ..Default::default()
                }),
                Ok(model::SearchGoogleAdsStreamResponse {
                    results: vec![campaign_row("c")],
                    request_id: "stream-request".into(),
                    ..Default::default()
                }),
            ]))
        });
    let (endpoint, _server) = start("127.0.0.1:0", mocks).await?;
    let client = test_client(endpoint).await?;

    let mut stream = client
        .google_ads_service()
        .search_stream()
        .set_customer_id("1234567890")
        .set_query("SELECT campaign.name FROM campaign")
        .send()
        .await?;
    let mut sizes = Vec::new();
    let mut request_id = String::new();
    while let Some(batch) = stream.next_message().await {
        let batch = batch?;
        sizes.push(batch.results.len());
        request_id = batch.request_id;
    }
    assert_eq!(sizes, vec![2, 1]);
    assert_eq!(request_id, "stream-request");
    Ok(())
}

#[tokio::test]
async fn failure_decoding() -> anyhow::Result<()> {
    let failure = model::GoogleAdsFailure {
        errors: vec![model::GoogleAdsError {
            message: "Error in query: unrecognized field.".into(),
            error_code: Some(model::ErrorCode {
                error_code: Some(model::error_code::ErrorCode::QueryError(40)),
            }),
            ..Default::default()
        }],
        request_id: "abc123".into(),
    };
    let response = failure.clone();
    let mut mocks = Mocks::default();
    mocks
        .google_ads_service
        .expect_search()
        .return_once(move |_| {
            Err(failure_status(
                tonic::Code::InvalidArgument,
                "Request contains an invalid argument.",
                &response,
            ))
        });
    let (endpoint, _server) = start("127.0.0.1:0", mocks).await?;
    let client = test_client(endpoint).await?;

    let err = client
        .google_ads_service()
        .search()
        .set_customer_id("1234567890")
        .set_query("SELECT campaign.nope FROM campaign")
        .send()
        .await
        .unwrap_err();
    assert_eq!(err.status().map(|s| s.code), Some(Code::InvalidArgument));
    let exception = GoogleAdsException::try_from(&err)?;
    assert_eq!(exception.failure(), &failure);
    assert_eq!(exception.request_id(), Some("abc123"));
    assert_eq!(exception.code(), Code::InvalidArgument);
    assert_eq!(exception.version(), google_ads::ApiVersion::V22);
    Ok(())
}

#[tokio::test]
async fn internal_errors_are_not_converted() -> anyhow::Result<()> {
    let mut mocks = Mocks::default();
    mocks
        .google_ads_service
        .expect_mutate()
        .return_once(|_| {
            Err(failure_status(
                tonic::Code::Internal,
                "internal error",
                &model::GoogleAdsFailure::default(),
            ))
        });
    let (endpoint, _server) = start("127.0.0.1:0", mocks).await?;
    let client = test_client(endpoint).await?;

    let err = client
        .google_ads_service()
        .mutate()
        .set_customer_id("1234567890")
        .send()
        .await
        .unwrap_err();
    assert_eq!(err.status().map(|s| s.code), Some(Code::Internal));
    assert!(GoogleAdsException::try_from(&err).is_err(), "{err:?}");
    Ok(())
}

#[tokio::test]
async fn request_and_flattened_conflict() -> anyhow::Result<()> {
    let mut mocks = Mocks::default();
    mocks.ad_group_service.expect_mutate_ad_groups().never();
    let (endpoint, _server) = start("127.0.0.1:0", mocks).await?;
    let client = test_client(endpoint).await?;

    let err = client
        .ad_group_service()
        .mutate_ad_groups()
        .with_request(model::MutateAdGroupsRequest {
            customer_id: "1234567890".into(),
            ..Default::default()
        })
        .set_operations([model::AdGroupOperation::default()])
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
    Ok(())
}

#[tokio::test]
async fn missing_customer_id() -> anyhow::Result<()> {
    let mut mocks = Mocks::default();
    mocks.google_ads_service.expect_mutate().never();
    let (endpoint, _server) = start("127.0.0.1:0", mocks).await?;
    let client = test_client(endpoint).await?;

    let err = client
        .google_ads_service()
        .mutate()
        .set_mutate_operations([model::MutateOperation::default()])
        .send()
        .await
        .unwrap_err();
    assert!(err.is_binding(), "{err:?}");
    assert!(err.to_string().contains("customer_id"), "{err}");
    Ok(())
}

/// Starts an HTTP proxy that accepts `CONNECT` requests and reports each
/// request line.
async fn start_tunnel_proxy()
-> anyhow::Result<(String, tokio::sync::mpsc::UnboundedReceiver<String>)> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    tokio::spawn(async move {
        while let Ok((mut downstream, _)) = listener.accept().await {
            let tx = tx.clone();
            tokio::spawn(async move {
                // Read one byte at a time, the tunneled bytes follow the head.
                let mut head = Vec::new();
                let mut byte = [0_u8; 1];
                while !head.ends_with(b"\r\n\r\n") {
                    if downstream.read_exact(&mut byte).await.is_err() {
                        return;
                    }
                    head.push(byte[0]);
                }
                let head = String::from_utf8_lossy(&head).to_string();
                let request_line = head.lines().next().unwrap_or_default().to_string();
                let target = request_line
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or_default()
                    .to_string();
                let _ = tx.send(request_line);
                let Ok(mut upstream) = tokio::net::TcpStream::connect(&target).await else {
                    return;
                };
                if downstream
                    .write_all(b"HTTP/1.1 200 Connection established\r\n\r\n")
                    .await
                    .is_err()
                {
                    return;
                }
                let _ = tokio::io::copy_bidirectional(&mut downstream, &mut upstream).await;
            });
        }
    });
    Ok((format!("http://{addr}"), rx))
}

#[tokio::test]
async fn http_proxy_from_config() -> anyhow::Result<()> {
    let mut mocks = Mocks::default();
    mocks
        .customer_service
        .expect_list_accessible_customers()
        .return_once(|_| {
            Ok(tonic::Response::new(model::ListAccessibleCustomersResponse {
                resource_names: vec!["customers/1234567890".into()],
            }))
        });
    let (endpoint, _server) = start("127.0.0.1:0", mocks).await?;
    let (proxy, mut requests) = start_tunnel_proxy().await?;

    let mut config = Config::new("test-developer-token");
    config.http_proxy = Some(proxy);
    let client = GoogleAdsClient::builder()
        .with_config(config)
        .with_endpoint(endpoint.clone())
        .with_credentials(auth::credentials::anonymous::Builder::new().build())
        .build()
        .await?;

    let response = client
        .customer_service()
        .list_accessible_customers()
        .send()
        .await?;
    assert_eq!(response.resource_names, vec!["customers/1234567890"]);

    let authority = endpoint.trim_start_matches("http://").trim_end_matches('/');
    let request_line = requests.try_recv()?;
    assert_eq!(request_line, format!("CONNECT {authority} HTTP/1.1"));
    Ok(())
}

#[tokio::test]
async fn http_proxy_invalid() -> anyhow::Result<()> {
    let mut config = Config::new("test-developer-token");
    config.http_proxy = Some("socks5://127.0.0.1:1080".into());
    let err = GoogleAdsClient::builder()
        .with_config(config)
        .with_endpoint("http://127.0.0.1:1")
        .with_credentials(auth::credentials::anonymous::Builder::new().build())
        .build()
        .await
        .unwrap_err();
    assert!(err.is_config(), "{err:?}");
    Ok(())
}
