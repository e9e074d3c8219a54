// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: files, environment, CLI, defaults.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::layer::ConfigLayer;
use crate::paths::PathsConfig;
use crate::ConfigError;

/// Prefix shared by every environment override.
pub const ENV_PREFIX: &str = "CONGREGACAO_";

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	UserFile = 30,
	Environment = 50,
	Cli = 60,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	/// Name for logging
	fn name(&self) -> &'static str;

	/// Precedence level
	fn precedence(&self) -> Precedence;

	/// Load configuration layer from this source
	fn load(&self) -> Result<ConfigLayer, ConfigError>;

	/// Whether a load failure aborts configuration instead of skipping the
	/// source.
	fn is_required(&self) -> bool {
		false
	}
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading defaults");
		// Defaults are applied when the runtime config is resolved
		Ok(ConfigLayer::default())
	}
}

/// File-based configuration source (TOML).
pub struct FileSource {
	path: PathBuf,
	precedence: Precedence,
	name: &'static str,
	required: bool,
}

impl FileSource {
	/// User config: ~/.config/congregacao/config.toml
	pub fn user(paths: &PathsConfig) -> Self {
		Self {
			path: paths.user_config_file.clone(),
			precedence: Precedence::UserFile,
			name: "user-config",
			required: false,
		}
	}

	/// Explicitly named file with specified precedence. It must exist and
	/// parse.
	pub fn custom(path: PathBuf, precedence: Precedence, name: &'static str) -> Self {
		Self {
			path,
			precedence,
			name,
			required: true,
		}
	}
}

impl ConfigSource for FileSource {
	fn name(&self) -> &'static str {
		self.name
	}
	fn precedence(&self) -> Precedence {
		self.precedence
	}

	fn is_required(&self) -> bool {
		self.required
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		if !self.path.exists() {
			if self.required {
				return Err(ConfigError::FileNotFound(self.path.clone()));
			}
			debug!(path = %self.path.display(), source = self.name, "config file not found, skipping");
			return Ok(ConfigLayer::default());
		}

		debug!(path = %self.path.display(), source = self.name, "loading config file");

		let content = std::fs::read_to_string(&self.path)?;
		let layer: ConfigLayer = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		trace!(source = self.name, "parsed config layer");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// `CONGREGACAO_API_URL` is the backend override; the remaining
/// `CONGREGACAO_*` variables mirror the config file fields.
pub struct EnvSource {
	vars: Vec<(String, String)>,
}

impl EnvSource {
	/// Snapshot the `CONGREGACAO_*` variables of the current process.
	pub fn from_process() -> Self {
		Self::from_vars(std::env::vars())
	}

	/// Build from explicit pairs.
	pub fn from_vars<I, K, V>(vars: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			vars: vars
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.filter(|(k, _)| k.starts_with(ENV_PREFIX))
				.collect(),
		}
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading environment variables");
		let mut layer = ConfigLayer::default();

		for (key, value) in &self.vars {
			let value = value.trim().to_string();
			if value.is_empty() {
				continue;
			}

			trace!(key = %key, "processing env var");

			match key.as_str() {
				"CONGREGACAO_API_URL" => layer.api_mut().base_url = Some(value),
				"CONGREGACAO_LOGIN_PATH" => layer.api_mut().login_path = Some(value),
				"CONGREGACAO_REFRESH_PATH" => layer.api_mut().refresh_path = Some(value),
				"CONGREGACAO_API_TIMEOUT_SECS" => {
					layer.api_mut().timeout_secs = Some(parse_secs(key, &value)?);
				}
				"CONGREGACAO_IBGE_URL" => layer.ibge_mut().base_url = Some(value),
				"CONGREGACAO_IBGE_TIMEOUT_SECS" => {
					layer.ibge_mut().timeout_secs = Some(parse_secs(key, &value)?);
				}
				"CONGREGACAO_SESSION_FILE" => layer.session_mut().file = Some(PathBuf::from(value)),
				"CONGREGACAO_LOCALE" => layer.locale = Some(value),
				"CONGREGACAO_LOG_LEVEL" => layer.logging_mut().level = Some(value),
				"CONGREGACAO_LOG_FORMAT" => layer.logging_mut().format = Some(value),
				_ => trace!(key = %key, "ignoring unknown env var"),
			}
		}

		Ok(layer)
	}
}

fn parse_secs(key: &str, value: &str) -> Result<u64, ConfigError> {
	value
		.parse()
		.map_err(|_| ConfigError::invalid_value(key, format!("'{value}' is not a number of seconds")))
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
	pub config_file: Option<PathBuf>,
	pub api_url: Option<String>,
	pub session_file: Option<PathBuf>,
	pub locale: Option<String>,
	pub log_level: Option<String>,
	pub log_format: Option<String>,
}

/// Command-line source.
pub struct CliSource {
	overrides: CliOverrides,
}

impl CliSource {
	pub fn new(overrides: CliOverrides) -> Self {
		Self { overrides }
	}
}

impl ConfigSource for CliSource {
	fn name(&self) -> &'static str {
		"cli"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Cli
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		let cli = &self.overrides;
		let mut layer = ConfigLayer::default();

		if let Some(url) = &cli.api_url {
			layer.api_mut().base_url = Some(url.clone());
		}
		if let Some(file) = &cli.session_file {
			layer.session_mut().file = Some(file.clone());
		}
		if let Some(level) = &cli.log_level {
			layer.logging_mut().level = Some(level.clone());
		}
		if let Some(format) = &cli.log_format {
			layer.logging_mut().format = Some(format.clone());
		}
		layer.locale = cli.locale.clone();

		Ok(layer)
	}
}
