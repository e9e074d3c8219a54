// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Outbound request descriptors and raw responses.

use std::fmt;

use bytes::Bytes;
use congregacao_common_secret::REDACTED;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, Result};

/// A request to the backend, kept around so it can be replayed after a
/// token refresh.
///
/// Only the `Authorization` header is rewritten between the first attempt
/// and the replay.
#[derive(Clone)]
pub struct ApiRequest {
	method: Method,
	path: String,
	headers: HeaderMap,
	body: Option<Value>,
}

impl ApiRequest {
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self {
			method,
			path: path.into(),
			headers: HeaderMap::new(),
			body: None,
		}
	}

	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::GET, path)
	}

	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::POST, path)
	}

	pub fn patch(path: impl Into<String>) -> Self {
		Self::new(Method::PATCH, path)
	}

	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::DELETE, path)
	}

	/// Attach a JSON body.
	pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
		let value = serde_json::to_value(body)
			.map_err(|e| ApiError::InvalidRequest(format!("body is not serializable: {e}")))?;
		self.body = Some(value);
		Ok(self)
	}

	/// Add an extra header.
	pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);
		self
	}

	pub fn method(&self) -> &Method {
		&self.method
	}

	pub fn path(&self) -> &str {
		&self.path
	}

	pub fn headers(&self) -> &HeaderMap {
		&self.headers
	}

	pub fn body(&self) -> Option<&Value> {
		self.body.as_ref()
	}

	/// Current `Authorization` header, if any.
	pub fn authorization(&self) -> Option<&str> {
		self.headers
			.get(AUTHORIZATION)
			.and_then(|value| value.to_str().ok())
	}

	/// Set `Authorization: Bearer <token>`, replacing any existing value.
	pub fn set_bearer(&mut self, token: &str) -> Result<()> {
		self.headers.insert(AUTHORIZATION, bearer_header(token)?);
		Ok(())
	}
}

impl fmt::Debug for ApiRequest {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let headers: Vec<(&str, &str)> = self
			.headers
			.iter()
			.map(|(name, value)| {
				if name == AUTHORIZATION {
					(name.as_str(), REDACTED)
				} else {
					(name.as_str(), value.to_str().unwrap_or("<binary>"))
				}
			})
			.collect();

		f.debug_struct("ApiRequest")
			.field("method", &self.method)
			.field("path", &self.path)
			.field("headers", &headers)
			.field("has_body", &self.body.is_some())
			.finish()
	}
}

/// `Bearer <token>` as a sensitive header value.
pub(crate) fn bearer_header(token: &str) -> Result<HeaderValue> {
	let mut value = HeaderValue::try_from(format!("Bearer {token}"))
		.map_err(|_| ApiError::InvalidRequest("token is not a valid header value".into()))?;
	value.set_sensitive(true);
	Ok(value)
}

/// A successful (2xx) backend response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
	pub status: StatusCode,
	pub body: Bytes,
}

impl ApiResponse {
	/// Decode the body as JSON.
	pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
		Ok(serde_json::from_slice(&self.body)?)
	}
}
