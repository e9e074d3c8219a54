// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User registration and profile updates (`/users`).

use congregacao_common_secret::SecretString;
use congregacao_session::{SessionStoreExt, UserProfile};
use serde::{Serialize, Serializer};
use tracing::{info, instrument};

use crate::client::ApiClient;
use crate::error::Result;

const USERS_PATH: &str = "/users";

/// Sign-up payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
	pub name: String,
	pub email: String,
	#[serde(serialize_with = "expose")]
	pub password: SecretString,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub city: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub common_id: Option<String>,
}

/// Profile changes; unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub city: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub common_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none", serialize_with = "expose_opt")]
	pub password: Option<SecretString>,
}

impl UpdateUser {
	pub fn is_empty(&self) -> bool {
		self.name.is_none()
			&& self.phone.is_none()
			&& self.state.is_none()
			&& self.city.is_none()
			&& self.common_id.is_none()
			&& self.password.is_none()
	}
}

// Passwords are sent in clear to the backend; SecretString's own
// Serialize impl would send the redaction marker.
fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> std::result::Result<S::Ok, S::Error> {
	serializer.serialize_str(secret.expose())
}

fn expose_opt<S: Serializer>(
	secret: &Option<SecretString>,
	serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
	match secret {
		Some(secret) => expose(secret, serializer),
		None => serializer.serialize_none(),
	}
}

#[derive(Debug, Clone, Copy)]
pub struct Users<'a> {
	client: &'a ApiClient,
}

impl ApiClient {
	pub fn users(&self) -> Users<'_> {
		Users { client: self }
	}
}

impl Users<'_> {
	#[instrument(skip_all)]
	pub async fn register(&self, user: &CreateUser) -> Result<UserProfile> {
		let created: UserProfile = self.client.post_json(USERS_PATH, user).await?;
		info!(user_id = %created.id, "user registered");
		Ok(created)
	}

	/// Update a profile. When it is the signed-in user's own profile the
	/// result replaces the session user; other profiles leave the session
	/// alone.
	#[instrument(skip_all, fields(user_id = %id))]
	pub async fn update(&self, id: &str, changes: &UpdateUser) -> Result<UserProfile> {
		let updated: UserProfile = self
			.client
			.patch_json(&format!("{USERS_PATH}/{id}"), changes)
			.await?;

		let store = self.client.store();
		let is_session_user = store
			.user()
			.await?
			.is_some_and(|current| current.id == updated.id);
		if is_session_user {
			store.set_user(&updated).await?;
			info!("profile updated");
		} else {
			info!("another user's profile updated");
		}
		Ok(updated)
	}

	/// The signed-in user, read from the session without contacting the
	/// backend.
	pub async fn current_user(&self) -> Result<Option<UserProfile>> {
		Ok(self.client.store().user().await?)
	}
}
