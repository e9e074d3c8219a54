// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! XDG Base Directory compliant path resolution.

use std::path::PathBuf;

use crate::ConfigError;

/// Resolved XDG paths.
#[derive(Debug, Clone)]
pub struct PathsConfig {
	/// User config file: ~/.config/congregacao/config.toml
	pub user_config_file: PathBuf,
	/// Data directory: ~/.local/share/congregacao/
	pub data_dir: PathBuf,
}

impl PathsConfig {
	/// Default location of the persisted session.
	pub fn session_file(&self) -> PathBuf {
		self.data_dir.join("session.json")
	}
}

impl Default for PathsConfig {
	fn default() -> Self {
		Self {
			user_config_file: PathBuf::from("~/.config/congregacao/config.toml"),
			data_dir: PathBuf::from("~/.local/share/congregacao"),
		}
	}
}

/// Resolve XDG paths.
///
/// Uses `XDG_CONFIG_HOME` / `XDG_DATA_HOME` when set, otherwise
/// `~/.config` and `~/.local/share`.
pub fn resolve_xdg_paths() -> Result<PathsConfig, ConfigError> {
	let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;

	let config_home = std::env::var_os("XDG_CONFIG_HOME")
		.map(PathBuf::from)
		.unwrap_or_else(|| home.join(".config"));

	let data_home = std::env::var_os("XDG_DATA_HOME")
		.map(PathBuf::from)
		.unwrap_or_else(|| home.join(".local/share"));

	tracing::debug!(
		config_home = %config_home.display(),
		data_home = %data_home.display(),
		"resolved XDG paths"
	);

	Ok(PathsConfig {
		user_config_file: config_home.join("congregacao/config.toml"),
		data_dir: data_home.join("congregacao"),
	})
}
