// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder};

/// Creates a client builder with the standard User-Agent header.
///
/// The User-Agent format is: `congregacao/{os}-{arch}/{version}`
/// Example: `congregacao/linux-x86_64/0.1.0`
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Like [`builder`], with `Content-Type: application/json` and
/// `Accept: application/json` sent on every request.
pub fn json_builder() -> ClientBuilder {
	let mut headers = HeaderMap::new();
	headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
	headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
	builder().default_headers(headers)
}

/// Builds a JSON client, optionally bounded by a request timeout.
///
/// No timeout is applied when `timeout` is `None`; hung calls are then
/// bounded only by the transport.
pub fn build_client(timeout: Option<Duration>) -> Result<Client, reqwest::Error> {
	let mut builder = json_builder();
	if let Some(timeout) = timeout {
		tracing::debug!(timeout_ms = timeout.as_millis() as u64, "building HTTP client with timeout");
		builder = builder.timeout(timeout);
	}
	builder.build()
}

/// Returns the standard User-Agent string.
pub fn user_agent() -> String {
	format!(
		"congregacao/{}-{}/{}",
		std::env::consts::OS,
		std::env::consts::ARCH,
		env!("CARGO_PKG_VERSION")
	)
}
