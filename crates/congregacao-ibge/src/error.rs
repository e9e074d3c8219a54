// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Failures behind an empty lookup result. Only construction surfaces one;
/// lookups log them.
#[derive(Debug, Error)]
pub enum IbgeError {
	#[error("failed to build HTTP client: {0}")]
	Client(#[source] reqwest::Error),

	#[error("IBGE request failed: {0}")]
	Request(#[source] reqwest::Error),

	#[error("IBGE returned {0}")]
	Status(reqwest::StatusCode),

	#[error("invalid state code '{0}'")]
	InvalidUf(String),
}
