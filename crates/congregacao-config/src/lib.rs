// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for the Congregação clients.
//!
//! This crate provides:
//! - XDG Base Directory compliant path resolution
//! - Layered configuration from multiple sources
//! - TOML configuration file parsing
//! - Environment variable overrides (`CONGREGACAO_API_URL` and friends)
//! - Validation of the resolved backend addresses

pub mod error;
pub mod layer;
pub mod paths;
pub mod registry;
pub mod runtime;
pub mod sources;

pub use error::ConfigError;
pub use layer::ConfigLayer;
pub use paths::PathsConfig;
pub use registry::ConfigRegistry;
pub use runtime::{
	ApiConfig, ClientConfig, IbgeConfig, LogFormat, LogLevel, LoggingConfig, SessionConfig,
	DEFAULT_API_URL, DEFAULT_IBGE_URL,
};
pub use sources::{CliOverrides, ConfigSource, Precedence};

/// Load configuration from defaults, the user file, the environment and the
/// command line, in increasing precedence.
///
/// `cli.config_file` replaces the user file when given.
pub fn load_config(cli: CliOverrides) -> Result<ClientConfig, ConfigError> {
	let paths = paths::resolve_xdg_paths()?;

	let mut registry = ConfigRegistry::new();
	registry.register(Box::new(sources::DefaultsSource));
	match cli.config_file.clone() {
		Some(path) => registry.register(Box::new(sources::FileSource::custom(
			path,
			Precedence::UserFile,
			"cli-config",
		))),
		None => registry.register(Box::new(sources::FileSource::user(&paths))),
	}
	registry.register(Box::new(sources::EnvSource::from_process()));
	registry.register(Box::new(sources::CliSource::new(cli)));

	registry.load(paths)
}
