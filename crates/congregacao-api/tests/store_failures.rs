// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session store failures during the refresh handshake and teardown.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use congregacao_api::{ApiClient, ApiError, ApiRequest, Navigator};
use congregacao_config::ApiConfig;
use congregacao_session::{MemorySessionStore, SessionError, SessionKey, SessionStore};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Memory store whose reads or removals fail for chosen keys.
#[derive(Debug, Default)]
struct FailingStore {
	inner: MemorySessionStore,
	failing_reads: HashSet<SessionKey>,
	failing_removes: HashSet<SessionKey>,
}

impl FailingStore {
	fn failing_reads(keys: &[SessionKey]) -> Self {
		Self {
			failing_reads: keys.iter().copied().collect(),
			..Default::default()
		}
	}

	fn failing_removes(keys: &[SessionKey]) -> Self {
		Self {
			failing_removes: keys.iter().copied().collect(),
			..Default::default()
		}
	}

	async fn peek(&self, key: SessionKey) -> Option<String> {
		self.inner.get(key).await.unwrap()
	}
}

#[async_trait]
impl SessionStore for FailingStore {
	async fn get(&self, key: SessionKey) -> Result<Option<String>, SessionError> {
		if self.failing_reads.contains(&key) {
			return Err(SessionError::Io(format!("cannot read {key}")));
		}
		self.inner.get(key).await
	}

	async fn set(&self, key: SessionKey, value: &str) -> Result<(), SessionError> {
		self.inner.set(key, value).await
	}

	async fn remove(&self, key: SessionKey) -> Result<(), SessionError> {
		if self.failing_removes.contains(&key) {
			return Err(SessionError::Io(format!("cannot remove {key}")));
		}
		self.inner.remove(key).await
	}
}

#[derive(Debug, Default)]
struct CountingNavigator {
	redirects: AtomicUsize,
}

impl Navigator for CountingNavigator {
	fn redirect_to_login(&self) {
		self.redirects.fetch_add(1, Ordering::SeqCst);
	}
}

async fn client_with(
	server: &MockServer,
	store: FailingStore,
) -> (ApiClient, Arc<FailingStore>, Arc<CountingNavigator>) {
	store.inner.set(SessionKey::AccessToken, "A1").await.unwrap();
	store.inner.set(SessionKey::RefreshToken, "R1").await.unwrap();
	store
		.inner
		.set(SessionKey::User, r#"{"id":"u1","name":"Ana","email":"ana@example.org"}"#)
		.await
		.unwrap();

	let store = Arc::new(store);
	let navigator = Arc::new(CountingNavigator::default());
	let client = ApiClient::new(
		ApiConfig::new(server.uri().parse().unwrap()),
		store.clone(),
		navigator.clone(),
	)
	.unwrap();
	(client, store, navigator)
}

async fn reject_churches(server: &MockServer) {
	Mock::given(method("GET"))
		.and(path("/churchs"))
		.respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthorized"})))
		.expect(1)
		.mount(server)
		.await;
}

#[tokio::test]
async fn unreadable_refresh_token_tears_down_and_returns_original_401() {
	let server = MockServer::start().await;
	let (client, store, navigator) =
		client_with(&server, FailingStore::failing_reads(&[SessionKey::RefreshToken])).await;

	reject_churches(&server).await;
	Mock::given(method("POST"))
		.and(path("/auth/refresh"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "A2"})))
		.expect(0)
		.mount(&server)
		.await;

	let err = client.send(ApiRequest::get("/churchs")).await.unwrap_err();

	assert!(matches!(err, ApiError::Status { .. }));
	assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
	assert_eq!(err.messages(), ["Unauthorized"]);
	assert_eq!(store.peek(SessionKey::AccessToken).await, None);
	assert_eq!(store.peek(SessionKey::User).await, None);
	assert_eq!(store.peek(SessionKey::RefreshToken).await, None);
	assert_eq!(navigator.redirects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn teardown_keeps_going_when_a_removal_fails() {
	let server = MockServer::start().await;
	let (client, store, navigator) =
		client_with(&server, FailingStore::failing_removes(&[SessionKey::AccessToken])).await;

	reject_churches(&server).await;
	Mock::given(method("POST"))
		.and(path("/auth/refresh"))
		.respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Refresh token expired"})))
		.expect(1)
		.mount(&server)
		.await;

	let err = client.send(ApiRequest::get("/churchs")).await.unwrap_err();

	assert!(matches!(err, ApiError::RefreshFailed(_)));
	assert_eq!(store.peek(SessionKey::AccessToken).await.as_deref(), Some("A1"));
	assert_eq!(store.peek(SessionKey::User).await, None);
	assert_eq!(store.peek(SessionKey::RefreshToken).await, None);
	assert_eq!(navigator.redirects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn logout_redirects_even_if_the_store_fails() {
	let server = MockServer::start().await;
	let (client, store, navigator) =
		client_with(&server, FailingStore::failing_removes(&SessionKey::ALL)).await;

	client.logout().await;

	assert_eq!(store.peek(SessionKey::RefreshToken).await.as_deref(), Some("R1"));
	assert_eq!(navigator.redirects.load(Ordering::SeqCst), 1);
}
