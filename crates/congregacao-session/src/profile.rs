// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The signed-in user's profile as returned by login and profile updates.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role assigned to a user by the backend.
///
/// Unknown roles are preserved verbatim so a stored profile round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
	SystemAdmin,
	Assistant,
	#[default]
	User,
	Other(String),
}

impl UserRole {
	pub fn as_str(&self) -> &str {
		match self {
			UserRole::SystemAdmin => "SYSTEM_ADMIN",
			UserRole::Assistant => "ASSISTANT",
			UserRole::User => "USER",
			UserRole::Other(role) => role,
		}
	}

	/// Church records may only be created or edited by assistants and
	/// system administrators.
	pub fn can_manage_churches(&self) -> bool {
		matches!(self, UserRole::SystemAdmin | UserRole::Assistant)
	}
}

impl From<String> for UserRole {
	fn from(value: String) -> Self {
		match value.as_str() {
			"SYSTEM_ADMIN" => UserRole::SystemAdmin,
			"ASSISTANT" => UserRole::Assistant,
			"USER" => UserRole::User,
			_ => UserRole::Other(value),
		}
	}
}

impl From<UserRole> for String {
	fn from(role: UserRole) -> Self {
		role.as_str().to_string()
	}
}

impl fmt::Display for UserRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Reference to the congregation a user belongs to, when the backend embeds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonRef {
	pub id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
}

/// User profile stored under the `user` session key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
	pub id: String,
	pub name: String,
	pub email: String,
	#[serde(default)]
	pub role: UserRole,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub city: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub common_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub common: Option<CommonRef>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub identity_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub identity_provider: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub created_at: Option<DateTime<Utc>>,
}

impl UserProfile {
	/// Congregation id, from the embedded reference or the flat field.
	pub fn common_id(&self) -> Option<&str> {
		self
			.common
			.as_ref()
			.map(|c| c.id.as_str())
			.or(self.common_id.as_deref())
	}

	/// Name shown in greetings: the first word of the full name.
	pub fn first_name(&self) -> &str {
		self.name.split_whitespace().next().unwrap_or(&self.name)
	}
}
