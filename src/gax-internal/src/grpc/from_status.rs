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

use crate::google;
use bytes::Bytes;
use gax::error::Error;
use gax::error::rpc::{Status, StatusDetail};
use prost::Message;
use std::error::Error as _;

fn to_gax_status(status: &tonic::Status) -> Status {
    let details = google::rpc::Status::decode(status.details())
        .map(|pb| pb.details)
        .unwrap_or_default();
    Status::default()
        .set_code(status.code() as i32)
        .set_message(status.message())
        .set_details(
            details
                .into_iter()
                .map(|any| StatusDetail::new(any.type_url, any.value)),
        )
}

fn as_inner<T>(status: &tonic::Status) -> Option<&T>
where
    T: std::error::Error + 'static,
{
    let mut e = status.source()?;
    // Guard against cycles in the `source()` chain.
    for _ in 0..32 {
        if let Some(value) = e.downcast_ref::<T>() {
            return Some(value);
        }
        e = e.source()?;
    }
    None
}

/// Converts a [tonic::Status] into the client library error type.
///
/// Service errors keep the response metadata, the Google Ads API returns the
/// request id and the `GoogleAdsFailure` in it.
pub fn to_gax_error(status: tonic::Status) -> Error {
    if as_inner::<tonic::TimeoutExpired>(&status).is_some() {
        return Error::timeout(status);
    }
    if as_inner::<tonic::ConnectError>(&status).is_some() {
        return Error::io(status);
    }
    let headers = status.metadata().clone().into_headers();
    if as_inner::<tonic::transport::Error>(&status).is_some() {
        return Error::transport(headers, status);
    }

    let content_type = headers.get("content-type").map(|v| v.as_bytes());
    if content_type.is_some_and(|v| !v.starts_with(b"application/grpc")) {
        return Error::transport(headers, GrpcError::BadContentType(status));
    }

    let gax_status = to_gax_status(&status);
    Error::service_full(gax_status, None, Some(headers), Some(Box::new(status)))
}

/// Returns the decoded value of a binary (`-bin`) metadata entry.
///
/// gRPC sends binary metadata base64-encoded, with or without padding.
pub fn binary_metadata(headers: &http::HeaderMap, key: &str) -> Option<Bytes> {
    let metadata = tonic::metadata::MetadataMap::from_headers(headers.clone());
    metadata.get_bin(key).and_then(|v| v.to_bytes().ok())
}

#[derive(Debug, thiserror::Error)]
enum GrpcError {
    #[error(
        "unexpected value in content-type header, should start with application/grpc. This is a common problem when using an invalid endpoint, or an endpoint that does not support the target gRPC service."
    )]
    BadContentType(#[source] tonic::Status),
}
