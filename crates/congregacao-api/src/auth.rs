// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Login, logout and the token payloads exchanged with the backend.

use congregacao_common_secret::SecretString;
use congregacao_session::{SessionKey, SessionStoreExt, UserProfile};
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::client::ApiClient;
use crate::error::{ApiError, Result};
use crate::request::ApiRequest;

/// E-mail and password for `login`.
#[derive(Debug, Clone)]
pub struct Credentials {
	pub email: String,
	pub password: SecretString,
}

impl Credentials {
	pub fn new(email: impl Into<String>, password: impl Into<SecretString>) -> Self {
		Self {
			email: email.into(),
			password: password.into(),
		}
	}
}

/// Successful login body.
///
/// Older backends spell the access token key `acessToken`; both are
/// accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
	#[serde(alias = "acessToken")]
	pub access_token: SecretString,
	#[serde(default)]
	pub refresh_token: Option<SecretString>,
	pub user: UserProfile,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshResponse {
	#[serde(default, alias = "acessToken")]
	access_token: Option<SecretString>,
}

impl RefreshResponse {
	pub(crate) fn into_access_token(self) -> Result<SecretString> {
		match self.access_token {
			Some(token) if !token.is_blank() => Ok(token),
			_ => Err(ApiError::InvalidResponse(
				"refresh response has no access token".into(),
			)),
		}
	}
}

impl ApiClient {
	/// Authenticate and persist the new session.
	///
	/// The request is sent without any stored token and a rejection is
	/// returned as-is; login failures never trigger a refresh.
	#[instrument(skip_all, fields(path = %self.config().login_path))]
	pub async fn login(&self, credentials: &Credentials) -> Result<UserProfile> {
		let request = ApiRequest::post(self.config().login_path.clone()).json(&serde_json::json!({
			"email": credentials.email,
			"password": credentials.password.expose(),
		}))?;

		let login: LoginResponse = self.dispatch(&request).await?.json()?;
		if login.access_token.is_blank() {
			return Err(ApiError::InvalidResponse(
				"login response has no access token".into(),
			));
		}

		self.persist_login(&login).await?;
		info!(user_id = %login.user.id, role = %login.user.role, "logged in");
		Ok(login.user)
	}

	/// End the session locally and return to login.
	pub async fn logout(&self) {
		self.teardown().await;
	}

	async fn persist_login(&self, login: &LoginResponse) -> Result<()> {
		let store = self.store();
		store
			.set(SessionKey::AccessToken, login.access_token.expose())
			.await?;

		match login.refresh_token.as_ref().filter(|t| !t.is_blank()) {
			Some(token) => store.set(SessionKey::RefreshToken, token.expose()).await?,
			None => {
				debug!("login response has no refresh token, clearing any stale one");
				store.remove(SessionKey::RefreshToken).await?;
			}
		}

		store.set_user(&login.user).await?;
		Ok(())
	}
}
