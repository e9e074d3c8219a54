// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the backend client.

use congregacao_session::SessionError;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by [`crate::ApiClient`] and the resource services.
#[derive(Debug, Error)]
pub enum ApiError {
	/// No response was received: connection refused, DNS failure, timeout.
	#[error("backend unreachable: {0}")]
	Unreachable(#[source] reqwest::Error),

	/// The backend answered with a non-2xx status.
	#[error("backend returned {status}{}", describe(.payload))]
	Status {
		status: StatusCode,
		payload: ErrorPayload,
		body: String,
	},

	/// The refresh handshake failed; the session has been torn down.
	#[error("token refresh failed: {0}")]
	RefreshFailed(#[source] Box<ApiError>),

	/// Reading or writing the persisted session failed.
	#[error("session store error: {0}")]
	Session(#[from] SessionError),

	/// A 2xx body did not have the expected shape.
	#[error("invalid response body: {0}")]
	Decode(#[from] serde_json::Error),

	/// The backend response was well-formed JSON but unusable.
	#[error("invalid response: {0}")]
	InvalidResponse(String),

	/// The request could not be built.
	#[error("invalid request: {0}")]
	InvalidRequest(String),

	/// The HTTP client could not be constructed.
	#[error("failed to build HTTP client: {0}")]
	Client(#[source] reqwest::Error),
}

impl ApiError {
	/// Status code of a backend rejection, if this is one.
	pub fn status(&self) -> Option<StatusCode> {
		match self {
			ApiError::Status { status, .. } => Some(*status),
			_ => None,
		}
	}

	pub fn is_unauthorized(&self) -> bool {
		self.status() == Some(StatusCode::UNAUTHORIZED)
	}

	/// Backend-provided messages, in the order the backend sent them.
	pub fn messages(&self) -> &[String] {
		match self {
			ApiError::Status { payload, .. } => payload.messages(),
			_ => &[],
		}
	}

	pub(crate) fn from_status(status: StatusCode, body: &[u8]) -> Self {
		ApiError::Status {
			status,
			payload: ErrorPayload::parse(body),
			body: String::from_utf8_lossy(body).into_owned(),
		}
	}
}

fn describe(payload: &ErrorPayload) -> String {
	match payload.messages() {
		[] => String::new(),
		messages => format!(": {}", messages.join("; ")),
	}
}

/// Shape of a backend error body.
///
/// The backend sends `{"message": "..."}` or `{"message": ["...", "..."]}`;
/// anything else is `Unknown`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ErrorPayload {
	SingleMessage(String),
	MultiMessage(Vec<String>),
	#[default]
	Unknown,
}

#[derive(Deserialize)]
struct Envelope {
	message: Option<MessageField>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MessageField {
	One(String),
	Many(Vec<String>),
}

impl ErrorPayload {
	/// Classify a raw response body.
	pub fn parse(body: &[u8]) -> Self {
		match serde_json::from_slice::<Envelope>(body) {
			Ok(Envelope {
				message: Some(MessageField::One(message)),
			}) => ErrorPayload::SingleMessage(message),
			Ok(Envelope {
				message: Some(MessageField::Many(messages)),
			}) => ErrorPayload::MultiMessage(messages),
			_ => ErrorPayload::Unknown,
		}
	}

	/// Normalized, ordered message list.
	pub fn messages(&self) -> &[String] {
		match self {
			ErrorPayload::SingleMessage(message) => std::slice::from_ref(message),
			ErrorPayload::MultiMessage(messages) => messages,
			ErrorPayload::Unknown => &[],
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn single_message() {
		let payload = ErrorPayload::parse(br#"{"message":"User with email already exists"}"#);
		assert_eq!(
			payload,
			ErrorPayload::SingleMessage("User with email already exists".into())
		);
		assert_eq!(payload.messages(), ["User with email already exists"]);
	}

	#[test]
	fn multi_message_keeps_order() {
		let payload = ErrorPayload::parse(
			br#"{"message":["name should not be empty","state must be a string"],"statusCode":400}"#,
		);
		assert_eq!(
			payload.messages(),
			["name should not be empty", "state must be a string"]
		);
	}

	#[test]
	fn unknown_shapes() {
		assert_eq!(ErrorPayload::parse(b""), ErrorPayload::Unknown);
		assert_eq!(ErrorPayload::parse(b"<html>502</html>"), ErrorPayload::Unknown);
		assert_eq!(ErrorPayload::parse(br#"{"error":"nope"}"#), ErrorPayload::Unknown);
		assert_eq!(ErrorPayload::parse(br#"{"message":42}"#), ErrorPayload::Unknown);
		assert!(ErrorPayload::Unknown.messages().is_empty());
	}

	#[test]
	fn status_error_display_includes_messages() {
		let err = ApiError::from_status(
			StatusCode::CONFLICT,
			br#"{"message":"A church with the name already exists"}"#,
		);
		assert_eq!(
			err.to_string(),
			"backend returned 409 Conflict: A church with the name already exists"
		);
		assert!(!err.is_unauthorized());
		assert_eq!(err.messages().len(), 1);
	}

	#[test]
	fn unauthorized_detection() {
		let err = ApiError::from_status(StatusCode::UNAUTHORIZED, b"{}");
		assert!(err.is_unauthorized());
		assert!(err.messages().is_empty());
		assert_eq!(err.to_string(), "backend returned 401 Unauthorized");
	}

	proptest! {
		#[test]
		fn multi_message_normalization_preserves_order(messages in proptest::collection::vec("[a-zA-Z ]{0,20}", 0..6)) {
			let body = serde_json::json!({ "message": messages }).to_string();
			let payload = ErrorPayload::parse(body.as_bytes());
			prop_assert_eq!(payload.messages(), messages.as_slice());
		}
	}
}
