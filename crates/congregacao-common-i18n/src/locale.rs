// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Supported locales.

/// Metadata about a supported locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleInfo {
	/// BCP 47 tag (e.g., "pt-BR", "en")
	pub code: &'static str,
	/// English name of the language
	pub name: &'static str,
	/// Native name of the language
	pub native_name: &'static str,
}

/// Default locale used as fallback.
pub const DEFAULT_LOCALE: &str = "pt-BR";

/// All supported locales.
pub const LOCALES: &[LocaleInfo] = &[
	LocaleInfo {
		code: "pt-BR",
		name: "Brazilian Portuguese",
		native_name: "Português (Brasil)",
	},
	LocaleInfo {
		code: "en",
		name: "English",
		native_name: "English",
	},
];

/// Codes of all supported locales.
pub fn available_locales() -> Vec<&'static str> {
	LOCALES.iter().map(|l| l.code).collect()
}

/// Maps loose spellings (`pt`, `pt_BR`, `en-US`, `EN`) onto a supported code.
pub fn normalize_locale(raw: &str) -> Option<&'static str> {
	let lang = raw.split(['_', '-', '.']).next()?.trim().to_ascii_lowercase();
	match lang.as_str() {
		"pt" => Some("pt-BR"),
		"en" => Some("en"),
		_ => None,
	}
}

/// Whether `locale` resolves to a supported catalog.
pub fn is_supported(locale: &str) -> bool {
	normalize_locale(locale).is_some()
}
