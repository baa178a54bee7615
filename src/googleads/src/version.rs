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

//! The supported versions of the Google Ads API.

/// A version of the Google Ads API.
///
/// The version selects the gRPC package used by the services, e.g.
/// `google.ads.googleads.v22.services`, and the metadata key carrying the
/// [GoogleAdsFailure][crate::model::GoogleAdsFailure] of failed requests.
///
/// # Example
/// ```
/// # use google_ads::ApiVersion;
/// let version: ApiVersion = "v21".parse()?;
/// assert_eq!(version, ApiVersion::V21);
/// assert_eq!(ApiVersion::default(), ApiVersion::V22);
/// # Ok::<(), google_ads::version::UnknownVersionError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum ApiVersion {
    V19,
    V20,
    V21,
    #[default]
    V22,
}

impl ApiVersion {
    /// All the supported versions, oldest first.
    pub const ALL: [ApiVersion; 4] = [Self::V19, Self::V20, Self::V21, Self::V22];

    /// The version name, e.g. `v22`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::V19 => "v19",
            Self::V20 => "v20",
            Self::V21 => "v21",
            Self::V22 => "v22",
        }
    }

    /// The protobuf package of the services in this version.
    pub fn services_package(&self) -> String {
        format!("google.ads.googleads.{}.services", self.name())
    }

    /// The trailing metadata key carrying the serialized `GoogleAdsFailure`.
    pub fn failure_metadata_key(&self) -> String {
        format!(
            "google.ads.googleads.{}.errors.googleadsfailure-bin",
            self.name()
        )
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ApiVersion {
    type Err = UnknownVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|v| v.name() == name)
            .ok_or_else(|| UnknownVersionError(s.to_string()))
    }
}

/// The result of parsing an unsupported API version.
#[derive(thiserror::Error, Debug, PartialEq)]
#[error("Specified Google Ads API version \"{0}\" does not exist. Valid API versions are: \"v19\", \"v20\", \"v21\", \"v22\"")]
pub struct UnknownVersionError(String);

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("v19", ApiVersion::V19)]
    #[test_case("v20", ApiVersion::V20)]
    #[test_case("v21", ApiVersion::V21)]
    #[test_case("v22", ApiVersion::V22)]
    #[test_case("V22", ApiVersion::V22)]
    fn parse(input: &str, want: ApiVersion) -> anyhow::Result<()> {
        let got = input.parse::<ApiVersion>()?;
        assert_eq!(got, want);
        assert_eq!(got.to_string(), input.to_ascii_lowercase());
        Ok(())
    }

    #[test_case("v18")]
    #[test_case("v23")]
    #[test_case("")]
    #[test_case("22")]
    fn parse_error(input: &str) {
        let err = input.parse::<ApiVersion>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(&format!("\"{input}\"")), "{msg}");
        assert!(msg.contains("\"v19\", \"v20\", \"v21\", \"v22\""), "{msg}");
    }

    #[test]
    fn names() {
        assert_eq!(ApiVersion::default(), ApiVersion::V22);
        assert_eq!(
            ApiVersion::V20.services_package(),
            "google.ads.googleads.v20.services"
        );
        assert_eq!(
            ApiVersion::V22.failure_metadata_key(),
            "google.ads.googleads.v22.errors.googleadsfailure-bin"
        );
    }

    #[test]
    fn ordering() {
        let mut sorted = ApiVersion::ALL;
        sorted.sort();
        assert_eq!(sorted, ApiVersion::ALL);
        assert_eq!(ApiVersion::ALL.last(), Some(&ApiVersion::default()));
    }
}
