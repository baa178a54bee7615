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

//! Google Ads API client library for Rust.
//!
//! This crate contains the clients for the Google Ads API services, the
//! message types used by these clients, and the functions to load the client
//! configuration.
//!
//! # Example
//! ```no_run
//! # use google_ads::client::GoogleAdsClient;
//! # use google_ads::config::Config;
//! # async fn sample() -> anyhow::Result<()> {
//! let config = Config::load_from_storage(None::<&str>)?;
//! let client = GoogleAdsClient::from_config(config).await?;
//! let mut rows = client
//!     .google_ads_service()
//!     .search()
//!     .set_customer_id("1234567890")
//!     .set_query("SELECT campaign.id, campaign.name FROM campaign")
//!     .by_item();
//! while let Some(row) = rows.next().await {
//!     let row = row?;
//!     println!("{:?}", row.campaign);
//! }
//! # Ok(()) }
//! ```
//!
//! The clients log a one line summary of each request with [tracing]. Install
//! a `tracing` subscriber to see them. The `debug` level includes the full
//! request and response, with sensitive fields redacted.

/// An alias of [std::result::Result] where the error is always [Error].
pub use gax::Result;
/// The error type used by the clients.
pub use gax::error::Error;

pub mod model;

pub mod version;
pub use version::ApiVersion;

pub mod blocking;
pub mod builder;
pub mod client;
pub mod config;
pub mod error;
pub mod paths;
pub mod streaming;
pub mod stub;

pub(crate) mod logging;
pub(crate) mod metadata;
pub(crate) mod methods;
pub(crate) mod redact;
pub(crate) mod transport;

/// The default host for the Google Ads API.
pub const DEFAULT_HOST: &str = "googleads.googleapis.com";

mod info {
    const NAME: &str = env!("CARGO_PKG_NAME");
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    lazy_static::lazy_static! {
        pub(crate) static ref X_GOOG_API_CLIENT_HEADER: String = {
            let ac = gaxi::api_header::XGoogApiClient{
                name:          NAME,
                version:       VERSION,
                library_type:  gaxi::api_header::GAPIC,
            };
            ac.grpc_header_value()
        };
    }
}
