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

use serde::{Deserialize, Serialize};

/// The status of a failed RPC.
///
/// The Google Ads API returns a `google.rpc.Status` with each error. The
/// `details` field contains zero or more `google.protobuf.Any` messages. The
/// Ads-specific `GoogleAdsFailure` is also sent in the response metadata, the
/// `google-ads` crate decodes it from there.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Status {
    /// The status code.
    pub code: Code,

    /// A developer-facing error message, in English.
    pub message: String,

    /// The error details, in their encoded form.
    pub details: Vec<StatusDetail>,
}

impl Status {
    /// Sets the value for [code][Status::code].
    pub fn set_code<T: Into<Code>>(mut self, v: T) -> Self {
        self.code = v.into();
        self
    }

    /// Sets the value for [message][Status::message].
    pub fn set_message<T: Into<String>>(mut self, v: T) -> Self {
        self.message = v.into();
        self
    }

    /// Sets the value for [details][Status::details].
    pub fn set_details<T, I>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = I>,
        I: Into<StatusDetail>,
    {
        self.details = v.into_iter().map(|v| v.into()).collect();
        self
    }
}

/// An encoded `google.protobuf.Any` attached to a [Status].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct StatusDetail {
    /// Identifies the message type, e.g.
    /// `type.googleapis.com/google.ads.googleads.v22.errors.GoogleAdsFailure`.
    pub type_url: String,

    /// The serialized message.
    pub value: bytes::Bytes,
}

impl StatusDetail {
    /// Creates a new detail from its type URL and serialized value.
    pub fn new<T: Into<String>, V: Into<bytes::Bytes>>(type_url: T, value: V) -> Self {
        Self {
            type_url: type_url.into(),
            value: value.into(),
        }
    }

    /// The message name, i.e. the type URL without the domain prefix.
    pub fn type_name(&self) -> &str {
        self.type_url
            .rsplit_once('/')
            .map(|(_, name)| name)
            .unwrap_or(self.type_url.as_str())
    }
}

/// The canonical gRPC status codes.
///
/// See [gRPC status codes] for the full description of each code.
///
/// [gRPC status codes]: https://grpc.github.io/grpc/core/md_doc_statuscodes.html
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Code {
    /// Not an error; returned on success.
    Ok = 0,
    /// The operation was cancelled, typically by the caller.
    Cancelled = 1,
    /// Unknown error.
    #[default]
    Unknown = 2,
    /// The client specified an invalid argument.
    InvalidArgument = 3,
    /// The deadline expired before the operation could complete.
    DeadlineExceeded = 4,
    /// Some requested entity was not found.
    NotFound = 5,
    /// The entity that a client attempted to create already exists.
    AlreadyExists = 6,
    /// The caller does not have permission to execute the operation.
    PermissionDenied = 7,
    /// Some resource has been exhausted, e.g. a quota.
    ResourceExhausted = 8,
    /// The system is not in a state required for the operation's execution.
    FailedPrecondition = 9,
    /// The operation was aborted, typically due to a concurrency issue.
    Aborted = 10,
    /// The operation was attempted past the valid range.
    OutOfRange = 11,
    /// The operation is not implemented or not supported.
    Unimplemented = 12,
    /// Internal errors.
    Internal = 13,
    /// The service is currently unavailable.
    ///
    /// This is most likely a transient condition.
    Unavailable = 14,
    /// Unrecoverable data loss or corruption.
    DataLoss = 15,
    /// The request does not have valid authentication credentials.
    Unauthenticated = 16,
}

impl Code {
    /// The canonical name of the code, e.g. `NOT_FOUND`.
    pub fn name(&self) -> &'static str {
        match self {
            Code::Ok => "OK",
            Code::Cancelled => "CANCELLED",
            Code::Unknown => "UNKNOWN",
            Code::InvalidArgument => "INVALID_ARGUMENT",
            Code::DeadlineExceeded => "DEADLINE_EXCEEDED",
            Code::NotFound => "NOT_FOUND",
            Code::AlreadyExists => "ALREADY_EXISTS",
            Code::PermissionDenied => "PERMISSION_DENIED",
            Code::ResourceExhausted => "RESOURCE_EXHAUSTED",
            Code::FailedPrecondition => "FAILED_PRECONDITION",
            Code::Aborted => "ABORTED",
            Code::OutOfRange => "OUT_OF_RANGE",
            Code::Unimplemented => "UNIMPLEMENTED",
            Code::Internal => "INTERNAL",
            Code::Unavailable => "UNAVAILABLE",
            Code::DataLoss => "DATA_LOSS",
            Code::Unauthenticated => "UNAUTHENTICATED",
        }
    }
}

impl From<i32> for Code {
    fn from(value: i32) -> Self {
        match value {
            0 => Code::Ok,
            1 => Code::Cancelled,
            2 => Code::Unknown,
            3 => Code::InvalidArgument,
            4 => Code::DeadlineExceeded,
            5 => Code::NotFound,
            6 => Code::AlreadyExists,
            7 => Code::PermissionDenied,
            8 => Code::ResourceExhausted,
            9 => Code::FailedPrecondition,
            10 => Code::Aborted,
            11 => Code::OutOfRange,
            12 => Code::Unimplemented,
            13 => Code::Internal,
            14 => Code::Unavailable,
            15 => Code::DataLoss,
            16 => Code::Unauthenticated,
            _ => Code::default(),
        }
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<&str> for Code {
    type Error = String;
    fn try_from(value: &str) -> Result<Code, Self::Error> {
        (0..=16)
            .map(Code::from)
            .find(|c| c.name() == value)
            .ok_or_else(|| format!("unknown status code value {value}"))
    }
}

impl Serialize for Code {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(*self as i32)
    }
}

impl<'de> Deserialize<'de> for Code {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        i32::deserialize(deserializer).map(Code::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn setters() {
        let status = Status::default()
            .set_code(Code::Unavailable)
            .set_message("try again")
            .set_details([StatusDetail::new("type.googleapis.com/test.Detail", "abc")]);
        assert_eq!(status.code, Code::Unavailable);
        assert_eq!(status.message, "try again");
        assert_eq!(status.details.len(), 1);
        assert_eq!(status.details[0].type_name(), "test.Detail");

        let status = Status::default().set_code(Code::NotFound as i32);
        assert_eq!(status.code, Code::NotFound);
    }

    #[test]
    fn type_name_without_prefix() {
        let detail = StatusDetail::new("test.Detail", bytes::Bytes::new());
        assert_eq!(detail.type_name(), "test.Detail");
    }

    #[test_case(Code::Ok)]
    #[test_case(Code::Cancelled)]
    #[test_case(Code::Unknown)]
    #[test_case(Code::InvalidArgument)]
    #[test_case(Code::DeadlineExceeded)]
    #[test_case(Code::NotFound)]
    #[test_case(Code::AlreadyExists)]
    #[test_case(Code::PermissionDenied)]
    #[test_case(Code::ResourceExhausted)]
    #[test_case(Code::FailedPrecondition)]
    #[test_case(Code::Aborted)]
    #[test_case(Code::OutOfRange)]
    #[test_case(Code::Unimplemented)]
    #[test_case(Code::Internal)]
    #[test_case(Code::Unavailable)]
    #[test_case(Code::DataLoss)]
    #[test_case(Code::Unauthenticated)]
    fn code_roundtrip(code: Code) -> anyhow::Result<()> {
        assert_eq!(Code::from(code as i32), code);
        let got = Code::try_from(code.name()).map_err(anyhow::Error::msg)?;
        assert_eq!(got, code);
        assert_eq!(code.to_string(), code.name());
        let json = serde_json::to_value(code)?;
        assert_eq!(json, serde_json::json!(code as i32));
        let got = serde_json::from_value::<Code>(json)?;
        assert_eq!(got, code);
        Ok(())
    }

    #[test]
    fn code_unknown_values() {
        assert_eq!(Code::from(42), Code::Unknown);
        assert!(Code::try_from("NOT-A-CODE").is_err());
    }
}
