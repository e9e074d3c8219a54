// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User-facing message catalogs.
//!
//! Messages are addressed by hierarchical dot-notation keys:
//!
//! - `client.error.` for notifications raised from backend failures
//! - `client.auth.` for login/logout/session messages
//! - `client.cli.` for console output
//!
//! Brazilian Portuguese is the default catalog; English is provided for
//! operators. Missing keys fall back to the default catalog, then to the key.
//!
//! ```
//! use congregacao_common_i18n::{t, t_fmt};
//!
//! assert_eq!(t("pt-BR", "client.error.user.duplicated_email"), "Usuário com e-mail já existe");
//! let greeting = t_fmt("en", "client.cli.greeting", &[("name", "Maria")]);
//! assert_eq!(greeting, "Hello, Maria");
//! ```

mod catalog;
mod locale;
mod resolve;

pub use catalog::{t, t_fmt};
pub use locale::{available_locales, is_supported, normalize_locale, LocaleInfo};
pub use locale::{DEFAULT_LOCALE, LOCALES};
pub use resolve::resolve_locale;
