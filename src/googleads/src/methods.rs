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

//! The per-method configuration of each RPC.
//!
//! The table is built on first use and never changes afterwards.

use crate::ApiVersion;
use std::collections::HashMap;
use std::time::Duration;

/// The RPCs supported by this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Rpc {
    MutateCampaigns,
    MutateAdGroups,
    Search,
    SearchStream,
    Mutate,
    ListAccessibleCustomers,
}

impl Rpc {
    pub(crate) const ALL: [Rpc; 6] = [
        Rpc::MutateCampaigns,
        Rpc::MutateAdGroups,
        Rpc::Search,
        Rpc::SearchStream,
        Rpc::Mutate,
        Rpc::ListAccessibleCustomers,
    ];

    /// The service name, without the package.
    pub(crate) fn service(self) -> &'static str {
        match self {
            Rpc::MutateCampaigns => "CampaignService",
            Rpc::MutateAdGroups => "AdGroupService",
            Rpc::Search | Rpc::SearchStream | Rpc::Mutate => "GoogleAdsService",
            Rpc::ListAccessibleCustomers => "CustomerService",
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Rpc::MutateCampaigns => "MutateCampaigns",
            Rpc::MutateAdGroups => "MutateAdGroups",
            Rpc::Search => "Search",
            Rpc::SearchStream => "SearchStream",
            Rpc::Mutate => "Mutate",
            Rpc::ListAccessibleCustomers => "ListAccessibleCustomers",
        }
    }

    // Mutations are never retried without the application opting in.
    fn idempotent(self) -> bool {
        matches!(
            self,
            Rpc::Search | Rpc::SearchStream | Rpc::ListAccessibleCustomers
        )
    }
}

/// The static configuration of one RPC in one API version.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct MethodInfo {
    /// The fully qualified service name, e.g.
    /// `google.ads.googleads.v22.services.GoogleAdsService`.
    pub service: String,
    pub method: &'static str,
    /// The gRPC path, e.g. `/google.ads.googleads.v22.services.GoogleAdsService/Search`.
    pub path: String,
    pub idempotent: bool,
    pub timeout: Option<Duration>,
}

lazy_static::lazy_static! {
    static ref METHODS: HashMap<(ApiVersion, Rpc), MethodInfo> = {
        let mut map = HashMap::new();
        for version in ApiVersion::ALL {
            for rpc in Rpc::ALL {
                let service = format!("{}.{}", version.services_package(), rpc.service());
                let path = format!("/{service}/{}", rpc.name());
                let info = MethodInfo {
                    service,
                    method: rpc.name(),
                    path,
                    idempotent: rpc.idempotent(),
                    timeout: None,
                };
                map.insert((version, rpc), info);
            }
        }
        map
    };
}

/// Returns the configuration for `rpc` in `version`.
pub(crate) fn method_info(version: ApiVersion, rpc: Rpc) -> crate::Result<&'static MethodInfo> {
    METHODS.get(&(version, rpc)).ok_or_else(|| {
        crate::Error::other(format!(
            "{} is not available in Google Ads API {version}",
            rpc.name()
        ))
    })
}

/// Applies the defaults in the method table to the request options.
pub(crate) fn apply_defaults(
    info: &MethodInfo,
    options: gax::options::RequestOptions,
) -> gax::options::RequestOptions {
    let mut options = gax::options::internal::set_default_idempotency(options, info.idempotent);
    if let (None, Some(timeout)) = (options.attempt_timeout(), info.timeout) {
        options.set_attempt_timeout(timeout);
    }
    options
}
