// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client for the Congregação backend.
//!
//! [`ApiClient`] attaches the stored access token to every request. When the
//! backend answers 401 it exchanges the refresh token for a new access token,
//! stores it, and replays the rejected request once. A failed refresh ends
//! the session and hands control to the [`Navigator`].
//!
//! The resource services ([`ApiClient::users`], [`ApiClient::commons`],
//! [`ApiClient::churches`]) go through the same path. [`feedback`] maps
//! errors to localized messages.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use congregacao_api::{ApiClient, Credentials, NoopNavigator};
//! use congregacao_config::ApiConfig;
//! use congregacao_session::MemorySessionStore;
//!
//! # async fn run() -> congregacao_api::Result<()> {
//! let client = ApiClient::new(
//! 	ApiConfig::default(),
//! 	Arc::new(MemorySessionStore::new()),
//! 	Arc::new(NoopNavigator),
//! )?;
//! client.login(&Credentials::new("ana@example.org", "s3nha")).await?;
//! let churches = client.churches().list().await?;
//! # let _ = churches;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod churches;
pub mod client;
pub mod commons;
pub mod error;
pub mod feedback;
pub mod navigator;
pub mod request;
pub mod users;

pub use auth::{Credentials, LoginResponse};
pub use churches::{Church, Churches, CreateChurch, UpdateChurch};
pub use client::ApiClient;
pub use commons::{Common, Commons, CreateCommon, UpdateCommon};
pub use error::{ApiError, ErrorPayload, Result};
pub use feedback::{present_error, Notifier};
pub use navigator::{Navigator, NoopNavigator};
pub use request::{ApiRequest, ApiResponse};
pub use users::{CreateUser, UpdateUser, Users};
