// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session storage backends.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::error::SessionError;
use crate::key::SessionKey;

/// On-disk session format: storage name to raw value.
pub type PersistedSession = HashMap<String, String>;

/// Key-value store holding the session entries.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug {
	/// Read an entry.
	async fn get(&self, key: SessionKey) -> Result<Option<String>, SessionError>;

	/// Overwrite an entry.
	async fn set(&self, key: SessionKey, value: &str) -> Result<(), SessionError>;

	/// Remove an entry. Removing a missing entry is not an error.
	async fn remove(&self, key: SessionKey) -> Result<(), SessionError>;

	/// Remove every session entry.
	async fn clear(&self) -> Result<(), SessionError> {
		for key in SessionKey::ALL {
			self.remove(key).await?;
		}
		Ok(())
	}
}

/// Session persisted as a JSON object in a file.
///
/// The file is rewritten through a temporary file and a rename, with 0600
/// permissions on Unix. A missing file is an empty session.
#[derive(Debug)]
pub struct FileSessionStore {
	path: PathBuf,
	write_lock: Mutex<()>,
}

impl FileSessionStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			write_lock: Mutex::new(()),
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Read the whole session file.
	pub async fn read_session(&self) -> Result<PersistedSession, SessionError> {
		if !fs::try_exists(&self.path).await? {
			return Ok(HashMap::new());
		}

		let contents = fs::read_to_string(&self.path).await?;
		if contents.trim().is_empty() {
			return Ok(HashMap::new());
		}
		Ok(serde_json::from_str(&contents)?)
	}

	async fn write_session(&self, session: &PersistedSession) -> Result<(), SessionError> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent).await?;
		}

		let contents = serde_json::to_string_pretty(session)?;

		let temp_path = self.path.with_extension("tmp");
		// A leftover temp file keeps its old mode when reopened.
		match fs::remove_file(&temp_path).await {
			Ok(()) => debug!(path = ?temp_path, "removed stale session temp file"),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
			Err(e) => return Err(e.into()),
		}

		let mut options = fs::OpenOptions::new();
		options.write(true).create_new(true);
		#[cfg(unix)]
		options.mode(0o600);
		let mut file = options.open(&temp_path).await?;
		file.write_all(contents.as_bytes()).await?;
		file.sync_all().await?;
		drop(file);

		fs::rename(&temp_path, &self.path).await?;

		debug!(path = ?self.path, entries = session.len(), "session file written");
		Ok(())
	}

	async fn update<F>(&self, apply: F) -> Result<(), SessionError>
	where
		F: FnOnce(&mut PersistedSession) + Send,
	{
		let _guard = self.write_lock.lock().await;
		let mut session = self.read_session().await?;
		apply(&mut session);
		self.write_session(&session).await
	}
}

#[async_trait]
impl SessionStore for FileSessionStore {
	async fn get(&self, key: SessionKey) -> Result<Option<String>, SessionError> {
		let mut session = self.read_session().await?;
		Ok(session.remove(key.as_str()))
	}

	async fn set(&self, key: SessionKey, value: &str) -> Result<(), SessionError> {
		let value = value.to_string();
		self
			.update(move |session| {
				session.insert(key.as_str().to_string(), value);
			})
			.await
	}

	async fn remove(&self, key: SessionKey) -> Result<(), SessionError> {
		self
			.update(move |session| {
				session.remove(key.as_str());
			})
			.await
	}

	async fn clear(&self) -> Result<(), SessionError> {
		self
			.update(|session| {
				for key in SessionKey::ALL {
					session.remove(key.as_str());
				}
			})
			.await
	}
}

/// In-memory session store for tests and one-shot processes.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
	entries: RwLock<HashMap<SessionKey, String>>,
}

impl MemorySessionStore {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl SessionStore for MemorySessionStore {
	async fn get(&self, key: SessionKey) -> Result<Option<String>, SessionError> {
		Ok(self.entries.read().await.get(&key).cloned())
	}

	async fn set(&self, key: SessionKey, value: &str) -> Result<(), SessionError> {
		self.entries.write().await.insert(key, value.to_string());
		Ok(())
	}

	async fn remove(&self, key: SessionKey) -> Result<(), SessionError> {
		self.entries.write().await.remove(&key);
		Ok(())
	}
}
