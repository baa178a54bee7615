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

pub use auth::credentials::Credentials;
pub use gax::client_builder::internal::ClientCertificate;

/// The client configuration for [crate::grpc::Client].
pub type ClientConfig = gax::client_builder::internal::ClientConfig<Credentials>;

pub(crate) const TRACING_VAR: &str = "GOOGLE_ADS_RUST_TRACING";

/// Returns true if the environment or client configuration enables tracing.
pub fn tracing_enabled(config: &ClientConfig) -> bool {
    if config.tracing {
        return true;
    }
    std::env::var(TRACING_VAR)
        .map(|v| v == "true")
        .unwrap_or(false)
}
