// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use congregacao_config::IbgeConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::IbgeError;

/// A federative unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IbgeState {
	pub id: u64,
	/// Two-letter code (UF), e.g. `SP`.
	pub sigla: String,
	pub nome: String,
}

/// A municipality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IbgeCity {
	pub id: u64,
	pub nome: String,
}

/// Unauthenticated client for the IBGE localities API.
#[derive(Debug, Clone)]
pub struct IbgeClient {
	http: Client,
	base_url: String,
}

impl IbgeClient {
	pub fn new(config: &IbgeConfig) -> Result<Self, IbgeError> {
		let mut builder = congregacao_common_http::builder();
		if let Some(timeout) = config.timeout {
			builder = builder.timeout(timeout);
		}
		let http = builder.build().map_err(IbgeError::Client)?;

		Ok(Self {
			http,
			base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
		})
	}

	/// All states; empty on failure.
	#[instrument(skip(self))]
	pub async fn states(&self) -> Vec<IbgeState> {
		match self.fetch("/localidades/estados").await {
			Ok(states) => states,
			Err(e) => {
				warn!(error = %e, "failed to fetch states");
				Vec::new()
			}
		}
	}

	/// Cities of the state `uf`; empty on failure.
	#[instrument(skip(self))]
	pub async fn cities(&self, uf: &str) -> Vec<IbgeCity> {
		let result = match normalize_uf(uf) {
			Ok(uf) => self.fetch(&format!("/localidades/estados/{uf}/municipios")).await,
			Err(e) => Err(e),
		};
		match result {
			Ok(cities) => cities,
			Err(e) => {
				warn!(error = %e, "failed to fetch cities");
				Vec::new()
			}
		}
	}

	async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, IbgeError> {
		let url = format!("{}{path}", self.base_url);
		debug!(url = %url, "querying IBGE");

		let response = self.http.get(&url).send().await.map_err(IbgeError::Request)?;
		let status = response.status();
		if !status.is_success() {
			return Err(IbgeError::Status(status));
		}
		response.json().await.map_err(IbgeError::Request)
	}
}

fn normalize_uf(uf: &str) -> Result<String, IbgeError> {
	let uf = uf.trim();
	if uf.len() == 2 && uf.chars().all(|c| c.is_ascii_alphabetic()) {
		Ok(uf.to_ascii_uppercase())
	} else {
		Err(IbgeError::InvalidUf(uf.to_string()))
	}
}
