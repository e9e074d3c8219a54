// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Persisted client session.
//!
//! A session is three independent entries: the access token, the refresh
//! token and the JSON-encoded user profile. They live in a [`SessionStore`]
//! that is injected into the HTTP client and into anything that needs to show
//! the current user.
//!
//! # Consistency
//!
//! Every operation is atomic for the single key it touches and readers observe
//! the most recently completed write. No operation spans several keys, so a
//! crash between two writes can leave a partially updated session; all writes
//! are plain overwrites, which makes repeating them harmless.
//!
//! # Example
//!
//! ```rust
//! use congregacao_session::{MemorySessionStore, SessionKey, SessionStore, SessionStoreExt};
//!
//! # tokio_test::block_on(async {
//! let store = MemorySessionStore::new();
//! store.set(SessionKey::AccessToken, "A").await.unwrap();
//!
//! let token = store.access_token().await.unwrap().unwrap();
//! assert_eq!(token.expose(), "A");
//! # });
//! ```

mod error;
mod ext;
mod key;
mod profile;
mod store;

pub use error::SessionError;
pub use ext::{Session, SessionStoreExt};
pub use key::SessionKey;
pub use profile::{CommonRef, UserProfile, UserRole};
pub use store::{FileSessionStore, MemorySessionStore, PersistedSession, SessionStore};
