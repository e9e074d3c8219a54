// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session-aware HTTP client.

use std::sync::Arc;

use congregacao_common_secret::SecretString;
use congregacao_config::ApiConfig;
use congregacao_session::{SessionKey, SessionStore, SessionStoreExt};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::auth::RefreshResponse;
use crate::error::{ApiError, Result};
use crate::navigator::Navigator;
use crate::request::{bearer_header, ApiRequest, ApiResponse};

/// Client for the Congregação backend.
///
/// Every request goes out with the stored access token. A 401 triggers a
/// single refresh handshake followed by one replay of the rejected request;
/// if the refresh cannot complete, the session is torn down and the
/// [`Navigator`] is asked to return to the login screen.
///
/// Cloning is cheap; clones share the HTTP connection pool, the session
/// store and the navigator.
#[derive(Debug, Clone)]
pub struct ApiClient {
	http: Client,
	config: ApiConfig,
	store: Arc<dyn SessionStore>,
	navigator: Arc<dyn Navigator>,
}

impl ApiClient {
	pub fn new(
		config: ApiConfig,
		store: Arc<dyn SessionStore>,
		navigator: Arc<dyn Navigator>,
	) -> Result<Self> {
		let http = congregacao_common_http::build_client(config.timeout).map_err(ApiError::Client)?;

		info!(
			base_url = %config.base_url,
			login_path = %config.login_path,
			refresh_path = %config.refresh_path,
			"API client initialized"
		);

		Ok(Self {
			http,
			config,
			store,
			navigator,
		})
	}

	pub fn config(&self) -> &ApiConfig {
		&self.config
	}

	pub fn store(&self) -> &Arc<dyn SessionStore> {
		&self.store
	}

	/// Absolute URL for a backend path.
	pub fn url(&self, path: &str) -> String {
		let base = self.config.base_url.as_str().trim_end_matches('/');
		if path.starts_with('/') {
			format!("{base}{path}")
		} else {
			format!("{base}/{path}")
		}
	}

	/// Send once with the stored access token. No refresh on 401.
	#[instrument(skip_all, fields(method = %request.method(), path = %request.path()))]
	pub async fn send_once(&self, mut request: ApiRequest) -> Result<ApiResponse> {
		self.authorize(&mut request).await;
		self.dispatch(&request).await
	}

	/// Send, refreshing the access token and replaying once on a 401.
	#[instrument(skip_all, fields(method = %request.method(), path = %request.path()))]
	pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
		let pending = request.clone();
		match self.send_once(request).await {
			Err(err) if err.is_unauthorized() => self.refresh_and_replay(pending, err).await,
			result => result,
		}
	}

	pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
		self.send(ApiRequest::get(path)).await?.json()
	}

	pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
	where
		B: Serialize + ?Sized,
		T: DeserializeOwned,
	{
		self.send(ApiRequest::post(path).json(body)?).await?.json()
	}

	pub async fn patch_json<B, T>(&self, path: &str, body: &B) -> Result<T>
	where
		B: Serialize + ?Sized,
		T: DeserializeOwned,
	{
		self.send(ApiRequest::patch(path).json(body)?).await?.json()
	}

	/// PATCH where the response body is not needed.
	pub async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
		self.send(ApiRequest::patch(path).json(body)?).await?;
		Ok(())
	}

	pub async fn delete(&self, path: &str) -> Result<()> {
		self.send(ApiRequest::delete(path)).await?;
		Ok(())
	}

	/// Clear the session and send the user back to login.
	///
	/// Store failures are logged; teardown itself never fails.
	pub async fn teardown(&self) {
		for key in [SessionKey::AccessToken, SessionKey::User, SessionKey::RefreshToken] {
			if let Err(e) = self.store.remove(key).await {
				warn!(key = %key, error = %e, "failed to remove session entry");
			}
		}
		info!("session ended");
		self.navigator.redirect_to_login();
	}

	/// Overwrites `Authorization` with the stored access token. A missing
	/// token or a failed read leaves the request unauthenticated.
	async fn authorize(&self, request: &mut ApiRequest) {
		match self.store.access_token().await {
			Ok(Some(token)) => {
				if let Err(e) = request.set_bearer(token.expose()) {
					warn!(error = %e, "stored access token is unusable, sending without it");
				}
			}
			Ok(None) => debug!("no access token stored"),
			Err(e) => warn!(error = %e, "failed to read access token, sending without it"),
		}
	}

	/// Put the request on the wire exactly as described.
	pub(crate) async fn dispatch(&self, request: &ApiRequest) -> Result<ApiResponse> {
		let url = self.url(request.path());
		let mut builder = self
			.http
			.request(request.method().clone(), &url)
			.headers(request.headers().clone());
		if let Some(body) = request.body() {
			builder = builder.json(body);
		}

		let response = builder.send().await.map_err(|e| {
			warn!(url = %url, error = %e, "backend unreachable");
			ApiError::Unreachable(e)
		})?;

		let status = response.status();
		let body = response.bytes().await.map_err(ApiError::Unreachable)?;

		if status.is_success() {
			debug!(status = %status, "request succeeded");
			Ok(ApiResponse { status, body })
		} else {
			debug!(status = %status, "backend rejected request");
			Err(ApiError::from_status(status, &body))
		}
	}

	async fn refresh_and_replay(&self, mut pending: ApiRequest, rejected: ApiError) -> Result<ApiResponse> {
		let refresh_token = match self.store.refresh_token().await {
			Ok(Some(token)) => token,
			Ok(None) => {
				info!("access token rejected and no refresh token stored");
				self.teardown().await;
				return Err(rejected);
			}
			Err(e) => {
				warn!(error = %e, "failed to read refresh token");
				self.teardown().await;
				return Err(rejected);
			}
		};

		let access_token = match self.refresh(&refresh_token).await {
			Ok(token) => token,
			Err(e) => {
				warn!(error = %e, "token refresh failed");
				self.teardown().await;
				return Err(ApiError::RefreshFailed(Box::new(e)));
			}
		};

		debug!("replaying request with refreshed token");
		pending.set_bearer(access_token.expose())?;
		self.send_once(pending).await
	}

	/// Exchange the refresh token for a new access token and persist it.
	///
	/// Goes straight to [`Self::dispatch`] so the stored access token is
	/// never attached and a 401 here is final.
	#[instrument(skip_all, fields(path = %self.config.refresh_path))]
	async fn refresh(&self, refresh_token: &SecretString) -> Result<SecretString> {
		let mut request = ApiRequest::post(self.config.refresh_path.clone());
		request.set_bearer(refresh_token.expose())?;

		let response = self.dispatch(&request).await?;
		let access_token = response.json::<RefreshResponse>()?.into_access_token()?;

		// Reject tokens that cannot travel in a header.
		bearer_header(access_token.expose())?;
		self.store
			.set(SessionKey::AccessToken, access_token.expose())
			.await?;

		info!("access token refreshed");
		Ok(access_token)
	}
}
