// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Typed accessors over the raw session entries.

use async_trait::async_trait;
use congregacao_common_secret::SecretString;

use crate::error::SessionError;
use crate::key::SessionKey;
use crate::profile::UserProfile;
use crate::store::SessionStore;

/// Point-in-time view of all three session entries.
#[derive(Debug, Clone, Default)]
pub struct Session {
	pub access_token: Option<SecretString>,
	pub refresh_token: Option<SecretString>,
	pub user: Option<UserProfile>,
}

/// Typed helpers available on every [`SessionStore`].
///
/// Empty token entries read as absent.
#[async_trait]
pub trait SessionStoreExt: SessionStore {
	async fn access_token(&self) -> Result<Option<SecretString>, SessionError> {
		read_token(self, SessionKey::AccessToken).await
	}

	async fn refresh_token(&self) -> Result<Option<SecretString>, SessionError> {
		read_token(self, SessionKey::RefreshToken).await
	}

	/// The stored profile; a corrupt entry is an error, not an absent user.
	async fn user(&self) -> Result<Option<UserProfile>, SessionError> {
		match self.get(SessionKey::User).await? {
			Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
			None => Ok(None),
		}
	}

	async fn set_user(&self, user: &UserProfile) -> Result<(), SessionError> {
		let raw = serde_json::to_string(user)?;
		self.set(SessionKey::User, &raw).await
	}

	/// An access token is present. Store failures count as signed out.
	async fn is_authenticated(&self) -> bool {
		matches!(self.access_token().await, Ok(Some(_)))
	}

	async fn snapshot(&self) -> Result<Session, SessionError> {
		Ok(Session {
			access_token: self.access_token().await?,
			refresh_token: self.refresh_token().await?,
			user: self.user().await?,
		})
	}
}

impl<S: SessionStore + ?Sized> SessionStoreExt for S {}

async fn read_token<S: SessionStore + ?Sized>(
	store: &S,
	key: SessionKey,
) -> Result<Option<SecretString>, SessionError> {
	Ok(store
		.get(key)
		.await?
		.filter(|value| !value.trim().is_empty())
		.map(SecretString::new))
}
