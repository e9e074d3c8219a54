// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration registry - manages sources and merges layers.

use tracing::{debug, info, warn};

use crate::layer::ConfigLayer;
use crate::paths::PathsConfig;
use crate::runtime::ClientConfig;
use crate::sources::ConfigSource;
use crate::ConfigError;

/// Registry that manages configuration sources and merges them.
pub struct ConfigRegistry {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigRegistry {
	pub fn new() -> Self {
		Self {
			sources: Vec::new(),
		}
	}

	pub fn register(&mut self, source: Box<dyn ConfigSource>) {
		debug!(source = source.name(), precedence = ?source.precedence(), "registering config source");
		self.sources.push(source);
	}

	/// Load configuration from all sources and resolve it.
	///
	/// Sources are merged lowest precedence first. A source that fails to
	/// load is skipped with a warning unless it is required; the resolved
	/// values are still validated.
	pub fn load(&self, paths: PathsConfig) -> Result<ClientConfig, ConfigError> {
		let mut sorted_sources: Vec<_> = self.sources.iter().collect();
		sorted_sources.sort_by_key(|s| s.precedence());

		let mut merged = ConfigLayer::default();
		for source in &sorted_sources {
			match source.load() {
				Ok(layer) => {
					debug!(source = source.name(), "merging config layer");
					merged.merge(layer);
				}
				Err(e) if source.is_required() => {
					warn!(source = source.name(), error = %e, "failed to load required config source");
					return Err(e);
				}
				Err(e) => {
					warn!(source = source.name(), error = %e, "failed to load config source, skipping");
				}
			}
		}

		let config = ClientConfig::from_layer(merged, paths)?;

		info!(
			api_url = %config.api.base_url,
			session_file = %config.session.file.display(),
			log_level = ?config.logging.level,
			"configuration loaded"
		);

		Ok(config)
	}

	pub fn source_count(&self) -> usize {
		self.sources.len()
	}
}

impl Default for ConfigRegistry {
	fn default() -> Self {
		Self::new()
	}
}
