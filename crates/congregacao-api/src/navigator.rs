// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt::Debug;

/// Sends the user back to the unauthenticated entry point once the session
/// has been torn down.
pub trait Navigator: Send + Sync + Debug {
	fn redirect_to_login(&self);
}

/// Navigator that does nothing; for headless callers and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
	fn redirect_to_login(&self) {
		tracing::trace!("session ended, no navigator attached");
	}
}
