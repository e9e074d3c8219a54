// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration layer for merging from multiple sources.

use std::path::PathBuf;

use serde::Deserialize;

/// Partial configuration layer - all fields are Option for merging.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
	#[serde(default)]
	pub api: Option<ApiLayer>,
	#[serde(default)]
	pub ibge: Option<IbgeLayer>,
	#[serde(default)]
	pub session: Option<SessionLayer>,
	#[serde(default)]
	pub logging: Option<LoggingLayer>,
	#[serde(default)]
	pub locale: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiLayer {
	#[serde(default)]
	pub base_url: Option<String>,
	#[serde(default)]
	pub login_path: Option<String>,
	#[serde(default)]
	pub refresh_path: Option<String>,
	#[serde(default)]
	pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IbgeLayer {
	#[serde(default)]
	pub base_url: Option<String>,
	#[serde(default)]
	pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionLayer {
	#[serde(default)]
	pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingLayer {
	#[serde(default)]
	pub level: Option<String>,
	#[serde(default)]
	pub format: Option<String>,
}

impl ConfigLayer {
	/// Merge another layer into this one. Other layer takes precedence.
	pub fn merge(&mut self, other: ConfigLayer) {
		merge_option(&mut self.api, other.api, ApiLayer::merge);
		merge_option(&mut self.ibge, other.ibge, IbgeLayer::merge);
		merge_option(&mut self.session, other.session, SessionLayer::merge);
		merge_option(&mut self.logging, other.logging, LoggingLayer::merge);
		if other.locale.is_some() {
			self.locale = other.locale;
		}
	}

	pub(crate) fn api_mut(&mut self) -> &mut ApiLayer {
		self.api.get_or_insert_with(ApiLayer::default)
	}

	pub(crate) fn ibge_mut(&mut self) -> &mut IbgeLayer {
		self.ibge.get_or_insert_with(IbgeLayer::default)
	}

	pub(crate) fn session_mut(&mut self) -> &mut SessionLayer {
		self.session.get_or_insert_with(SessionLayer::default)
	}

	pub(crate) fn logging_mut(&mut self) -> &mut LoggingLayer {
		self.logging.get_or_insert_with(LoggingLayer::default)
	}
}

fn merge_option<T, F>(target: &mut Option<T>, source: Option<T>, merge_fn: F)
where
	F: FnOnce(&mut T, T),
{
	match (target.as_mut(), source) {
		(Some(t), Some(s)) => merge_fn(t, s),
		(None, Some(s)) => *target = Some(s),
		_ => {}
	}
}

impl ApiLayer {
	fn merge(&mut self, other: ApiLayer) {
		if other.base_url.is_some() {
			self.base_url = other.base_url;
		}
		if other.login_path.is_some() {
			self.login_path = other.login_path;
		}
		if other.refresh_path.is_some() {
			self.refresh_path = other.refresh_path;
		}
		if other.timeout_secs.is_some() {
			self.timeout_secs = other.timeout_secs;
		}
	}
}

impl IbgeLayer {
	fn merge(&mut self, other: IbgeLayer) {
		if other.base_url.is_some() {
			self.base_url = other.base_url;
		}
		if other.timeout_secs.is_some() {
			self.timeout_secs = other.timeout_secs;
		}
	}
}

impl SessionLayer {
	fn merge(&mut self, other: SessionLayer) {
		if other.file.is_some() {
			self.file = other.file;
		}
	}
}

impl LoggingLayer {
	fn merge(&mut self, other: LoggingLayer) {
		if other.level.is_some() {
			self.level = other.level;
		}
		if other.format.is_some() {
			self.format = other.format;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn overlay_wins_and_keeps_unset_fields() {
		let mut base: ConfigLayer = toml::from_str(
			r#"
			[api]
			base_url = "http://base:3000"
			login_path = "/users/login"
			"#,
		)
		.unwrap();

		let overlay: ConfigLayer = toml::from_str(
			r#"
			locale = "en"
			[api]
			base_url = "https://api.example.org"
			"#,
		)
		.unwrap();

		base.merge(overlay);

		let api = base.api.unwrap();
		assert_eq!(api.base_url.as_deref(), Some("https://api.example.org"));
		assert_eq!(api.login_path.as_deref(), Some("/users/login"));
		assert_eq!(base.locale.as_deref(), Some("en"));
	}

	#[test]
	fn empty_overlay_changes_nothing() {
		let mut base = ConfigLayer::default();
		base.logging_mut().level = Some("debug".into());

		base.merge(ConfigLayer::default());

		assert_eq!(base.logging.unwrap().level.as_deref(), Some("debug"));
	}

	#[test]
	fn unknown_sections_are_rejected() {
		let parsed: Result<ConfigLayer, _> = toml::from_str("[providers]\nx = 1\n");
		assert!(parsed.is_err());
	}
}
