// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Runtime configuration types with resolved defaults.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::layer::ConfigLayer;
use crate::paths::PathsConfig;
use crate::ConfigError;

/// Backend address used when nothing overrides it.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Public IBGE localities service.
pub const DEFAULT_IBGE_URL: &str = "https://servicodados.ibge.gov.br/api/v1";

const DEFAULT_LOGIN_PATH: &str = "/auth/login";
const DEFAULT_REFRESH_PATH: &str = "/auth/refresh";

/// The final, validated configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
	pub api: ApiConfig,
	pub ibge: IbgeConfig,
	pub session: SessionConfig,
	pub logging: LoggingConfig,
	/// Preferred message locale, if configured.
	pub locale: Option<String>,
	pub paths: PathsConfig,
}

/// Backend REST API settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
	pub base_url: Url,
	pub login_path: String,
	pub refresh_path: String,
	/// Per-request timeout; `None` leaves requests unbounded.
	pub timeout: Option<Duration>,
}

impl ApiConfig {
	/// Settings for `base_url` with the current auth routes.
	pub fn new(base_url: Url) -> Self {
		Self {
			base_url,
			login_path: DEFAULT_LOGIN_PATH.to_string(),
			refresh_path: DEFAULT_REFRESH_PATH.to_string(),
			timeout: None,
		}
	}

	/// Use the older `/users/login` and `/users/refresh` routes.
	pub fn with_legacy_auth_routes(mut self) -> Self {
		self.login_path = "/users/login".to_string();
		self.refresh_path = "/users/refresh".to_string();
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self::new(Url::parse(DEFAULT_API_URL).expect("default API URL is valid"))
	}
}

/// IBGE lookup settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IbgeConfig {
	pub base_url: Url,
	pub timeout: Option<Duration>,
}

impl IbgeConfig {
	pub fn new(base_url: Url) -> Self {
		Self {
			base_url,
			timeout: None,
		}
	}
}

impl Default for IbgeConfig {
	fn default() -> Self {
		Self::new(Url::parse(DEFAULT_IBGE_URL).expect("default IBGE URL is valid"))
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
	pub file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
	pub level: LogLevel,
	pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
	Trace,
	Debug,
	Info,
	Warn,
	Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
	Pretty,
	Compact,
	Json,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: LogLevel::Warn,
			format: LogFormat::Compact,
		}
	}
}

impl ClientConfig {
	/// Resolve a merged layer into the final configuration.
	pub fn from_layer(layer: ConfigLayer, paths: PathsConfig) -> Result<Self, ConfigError> {
		let api_layer = layer.api.unwrap_or_default();
		let mut api = ApiConfig::new(parse_url(
			"api.base_url",
			api_layer.base_url.as_deref().unwrap_or(DEFAULT_API_URL),
		)?);
		if let Some(path) = api_layer.login_path {
			api.login_path = parse_path("api.login_path", path)?;
		}
		if let Some(path) = api_layer.refresh_path {
			api.refresh_path = parse_path("api.refresh_path", path)?;
		}
		api.timeout = parse_timeout("api.timeout_secs", api_layer.timeout_secs)?;

		let ibge_layer = layer.ibge.unwrap_or_default();
		let mut ibge = IbgeConfig::new(parse_url(
			"ibge.base_url",
			ibge_layer.base_url.as_deref().unwrap_or(DEFAULT_IBGE_URL),
		)?);
		ibge.timeout = parse_timeout("ibge.timeout_secs", ibge_layer.timeout_secs)?;

		let session = SessionConfig {
			file: layer
				.session
				.and_then(|s| s.file)
				.unwrap_or_else(|| paths.session_file()),
		};

		let logging_layer = layer.logging.unwrap_or_default();
		let defaults = LoggingConfig::default();
		let logging = LoggingConfig {
			level: parse_log_level(logging_layer.level.as_deref()).unwrap_or(defaults.level),
			format: parse_log_format(logging_layer.format.as_deref()).unwrap_or(defaults.format),
		};

		Ok(Self {
			api,
			ibge,
			session,
			logging,
			locale: layer.locale.filter(|l| !l.trim().is_empty()),
			paths,
		})
	}
}

fn parse_url(field: &str, raw: &str) -> Result<Url, ConfigError> {
	let url = Url::parse(raw.trim()).map_err(|e| ConfigError::invalid_value(field, e.to_string()))?;
	match url.scheme() {
		"http" | "https" => Ok(url),
		other => Err(ConfigError::invalid_value(
			field,
			format!("unsupported scheme '{other}', expected http or https"),
		)),
	}
}

fn parse_path(field: &str, raw: String) -> Result<String, ConfigError> {
	let trimmed = raw.trim();
	if trimmed.is_empty() {
		return Err(ConfigError::invalid_value(field, "path cannot be empty"));
	}
	if trimmed.starts_with('/') {
		Ok(trimmed.to_string())
	} else {
		Ok(format!("/{trimmed}"))
	}
}

fn parse_timeout(field: &str, secs: Option<u64>) -> Result<Option<Duration>, ConfigError> {
	match secs {
		Some(0) => Err(ConfigError::invalid_value(field, "timeout must be positive")),
		Some(secs) => Ok(Some(Duration::from_secs(secs))),
		None => Ok(None),
	}
}

pub(crate) fn parse_log_level(s: Option<&str>) -> Option<LogLevel> {
	match s?.trim().to_ascii_lowercase().as_str() {
		"error" => Some(LogLevel::Error),
		"warn" => Some(LogLevel::Warn),
		"info" => Some(LogLevel::Info),
		"debug" => Some(LogLevel::Debug),
		"trace" => Some(LogLevel::Trace),
		_ => None,
	}
}

pub(crate) fn parse_log_format(s: Option<&str>) -> Option<LogFormat> {
	match s?.trim().to_ascii_lowercase().as_str() {
		"json" => Some(LogFormat::Json),
		"compact" => Some(LogFormat::Compact),
		"pretty" => Some(LogFormat::Pretty),
		_ => None,
	}
}
