// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;

/// The three entries that make up a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
	AccessToken,
	RefreshToken,
	User,
}

impl SessionKey {
	pub const ALL: [SessionKey; 3] = [
		SessionKey::AccessToken,
		SessionKey::RefreshToken,
		SessionKey::User,
	];

	/// Storage name of the entry.
	pub fn as_str(&self) -> &'static str {
		match self {
			SessionKey::AccessToken => "accessToken",
			SessionKey::RefreshToken => "refreshToken",
			SessionKey::User => "user",
		}
	}
}

impl fmt::Display for SessionKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn storage_names_match_wire_names() {
		let names: Vec<_> = SessionKey::ALL.iter().map(SessionKey::as_str).collect();
		assert_eq!(names, ["accessToken", "refreshToken", "user"]);
	}
}
