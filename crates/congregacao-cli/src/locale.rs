// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::OnceLock;

use congregacao_common_i18n::resolve_locale;

static LOCALE: OnceLock<&'static str> = OnceLock::new();

/// Fix the message locale for this process: the configured one if it is
/// supported, else the system locale, else Brazilian Portuguese.
pub fn init_locale(configured: Option<&str>) -> &'static str {
	LOCALE.get_or_init(|| resolve_locale(configured, sys_locale::get_locale().as_deref()))
}

/// The locale chosen by [`init_locale`], or the system default if it has
/// not run yet.
pub fn get_locale() -> &'static str {
	init_locale(None)
}
