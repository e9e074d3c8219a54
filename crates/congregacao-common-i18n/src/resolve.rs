// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale resolution logic.

use crate::locale::{normalize_locale, DEFAULT_LOCALE};

/// Resolve the effective locale.
///
/// Resolution order (highest to lowest priority):
/// 1. Explicitly configured locale (if supported)
/// 2. Locale reported by the system (if supported)
/// 3. [`DEFAULT_LOCALE`]
///
/// ```
/// use congregacao_common_i18n::resolve_locale;
///
/// assert_eq!(resolve_locale(Some("en"), Some("pt_BR")), "en");
/// assert_eq!(resolve_locale(None, Some("en_US.UTF-8")), "en");
/// assert_eq!(resolve_locale(Some("xx"), None), "pt-BR");
/// ```
pub fn resolve_locale(configured: Option<&str>, system: Option<&str>) -> &'static str {
	configured
		.and_then(normalize_locale)
		.or_else(|| system.and_then(normalize_locale))
		.unwrap_or(DEFAULT_LOCALE)
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn configured_takes_priority() {
		assert_eq!(resolve_locale(Some("pt"), Some("en")), "pt-BR");
	}

	#[test]
	fn falls_back_to_system_then_default() {
		assert_eq!(resolve_locale(Some("de"), Some("en")), "en");
		assert_eq!(resolve_locale(None, None), DEFAULT_LOCALE);
	}

	proptest! {
		#[test]
		fn always_resolves_to_supported(configured in ".*", system in ".*") {
			let locale = resolve_locale(Some(&configured), Some(&system));
			prop_assert!(crate::is_supported(locale));
		}
	}
}
