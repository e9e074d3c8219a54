// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Turning client errors into user-facing messages.

use congregacao_common_i18n::t;

use crate::error::ApiError;

/// Destination for user-facing messages (toasts, stderr, ...).
pub trait Notifier {
	fn error(&self, text: &str);
	fn success(&self, text: &str);
}

/// Backend validation messages that have a localized rendition.
const KNOWN_MESSAGES: &[(&str, &str)] = &[
	// users
	("User with email already exists", "client.error.user.duplicated_email"),
	("Password is invalid credentials", "client.error.user.invalid_credentials"),
	("Email is invalid credentials", "client.error.user.invalid_credentials"),
	// churches and commons
	("A church with the name already exists", "client.error.church.duplicated_name"),
];

/// Catalog key for a backend message, if it is one we know.
pub fn known_message_key(message: &str) -> Option<&'static str> {
	KNOWN_MESSAGES
		.iter()
		.find(|(backend, _)| *backend == message.trim())
		.map(|(_, key)| *key)
}

/// The texts to show for `err`, in order and without repeats.
///
/// `fallback_key` is the catalog key of the caller's generic message
/// ("could not load churches", ...).
pub fn error_messages(err: &ApiError, fallback_key: &str, locale: &str) -> Vec<String> {
	match err {
		ApiError::Unreachable(_) => vec![t(locale, "client.error.unreachable")],
		ApiError::RefreshFailed(inner) if matches!(**inner, ApiError::Unreachable(_)) => {
			vec![t(locale, "client.error.unreachable")]
		}
		ApiError::Status { payload, .. } if !payload.messages().is_empty() => {
			let mut texts: Vec<String> = Vec::new();
			for message in payload.messages() {
				let key = known_message_key(message).unwrap_or(fallback_key);
				let text = t(locale, key);
				if !texts.contains(&text) {
					texts.push(text);
				}
			}
			texts
		}
		_ => vec![t(locale, fallback_key)],
	}
}

/// Show `err` through `notifier`.
pub fn present_error(err: &ApiError, fallback_key: &str, locale: &str, notifier: &dyn Notifier) {
	tracing::debug!(error = %err, fallback_key, "presenting error");
	for text in error_messages(err, fallback_key, locale) {
		notifier.error(&text);
	}
}
