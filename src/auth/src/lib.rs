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

//! Google Ads API Client Library for Rust - Authentication Components
//!
//! This crate contains types and functions used to authenticate applications
//! calling the Google Ads API. The clients consume a
//! [credentials::Credentials] and use it to authenticate each RPC issued by
//! the application.
//!
//! The Google Ads API requires OAuth2 access tokens with the
//! [ADWORDS_SCOPE][constants::ADWORDS_SCOPE] scope. The tokens may be
//! obtained through an OAuth2 refresh token ([credentials::user_account]) or
//! a service account key ([credentials::service_account]).
//!
//! [OAuth2 for the Google Ads API] describes how to obtain these credentials.
//!
//! [OAuth2 for the Google Ads API]: https://developers.google.com/google-ads/api/docs/oauth/overview

pub mod build_errors;
pub mod constants;
pub mod credentials;
pub mod errors;

/// Types and functions to work with OAuth2 access tokens.
pub mod token;

/// The token cache
pub(crate) mod token_cache;

pub(crate) mod headers_util;
