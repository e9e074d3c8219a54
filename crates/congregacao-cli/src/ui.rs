// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Terminal implementations of the client's notification hooks.

use congregacao_api::{Navigator, Notifier};
use congregacao_common_i18n::t;

use crate::locale::get_locale;

/// Writes notifications to stderr so stdout stays machine-readable.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
	fn error(&self, text: &str) {
		eprintln!("error: {text}");
	}

	fn success(&self, text: &str) {
		eprintln!("{text}");
	}
}

/// There is no login screen to return to; tell the user to sign in again.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
	fn redirect_to_login(&self) {
		eprintln!("{}", t(get_locale(), "client.auth.session_expired"));
	}
}

const ELLIPSIS: &str = "...";

/// Pad or cut `text` to exactly `width` characters.
pub fn cell(text: &str, width: usize) -> String {
	let count = text.chars().count();
	if count <= width {
		format!("{text:<width$}")
	} else if width < ELLIPSIS.len() {
		text.chars().take(width).collect()
	} else {
		let cut: String = text.chars().take(width - ELLIPSIS.len()).collect();
		format!("{cut}{ELLIPSIS}")
	}
}
