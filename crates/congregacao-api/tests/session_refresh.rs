// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication flow against a mock backend: bearer injection, the
//! refresh-and-replay handshake, teardown and login.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use congregacao_api::{ApiClient, ApiError, ApiRequest, Credentials, Navigator};
use congregacao_config::ApiConfig;
use congregacao_session::{MemorySessionStore, SessionKey, SessionStore, SessionStoreExt};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER: &str = r#"{"id":"u1","name":"Ana Souza","email":"ana@example.org","role":"SYSTEM_ADMIN"}"#;

#[derive(Debug, Default)]
struct CountingNavigator {
	redirects: AtomicUsize,
}

impl CountingNavigator {
	fn redirects(&self) -> usize {
		self.redirects.load(Ordering::SeqCst)
	}
}

impl Navigator for CountingNavigator {
	fn redirect_to_login(&self) {
		self.redirects.fetch_add(1, Ordering::SeqCst);
	}
}

struct Harness {
	client: ApiClient,
	store: Arc<MemorySessionStore>,
	navigator: Arc<CountingNavigator>,
}

fn harness_with(config: ApiConfig) -> Harness {
	let store = Arc::new(MemorySessionStore::new());
	let navigator = Arc::new(CountingNavigator::default());
	let client = ApiClient::new(config, store.clone(), navigator.clone()).unwrap();
	Harness {
		client,
		store,
		navigator,
	}
}

fn harness(server: &MockServer) -> Harness {
	harness_with(ApiConfig::new(server.uri().parse().unwrap()))
}

async fn seed(store: &MemorySessionStore, access: &str, refresh: Option<&str>) {
	store.set(SessionKey::AccessToken, access).await.unwrap();
	if let Some(refresh) = refresh {
		store.set(SessionKey::RefreshToken, refresh).await.unwrap();
	}
	store.set(SessionKey::User, USER).await.unwrap();
}

async fn stored(store: &MemorySessionStore, key: SessionKey) -> Option<String> {
	store.get(key).await.unwrap()
}

fn unauthorized() -> ResponseTemplate {
	ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthorized", "statusCode": 401}))
}

#[tokio::test]
async fn stored_token_is_sent_as_bearer_on_every_request() {
	let server = MockServer::start().await;
	let h = harness(&server);
	seed(&h.store, "A1", Some("R1")).await;

	Mock::given(method("GET"))
		.and(path("/churchs"))
		.and(header("authorization", "Bearer A1"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
		.expect(2)
		.mount(&server)
		.await;

	h.client.send(ApiRequest::get("/churchs")).await.unwrap();
	h.client.send(ApiRequest::get("/churchs")).await.unwrap();
}

#[tokio::test]
async fn no_token_sends_unauthenticated() {
	let server = MockServer::start().await;
	let h = harness(&server);

	Mock::given(method("GET"))
		.and(path("/commons"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
		.expect(1)
		.mount(&server)
		.await;

	h.client.send_once(ApiRequest::get("/commons")).await.unwrap();

	let requests = server.received_requests().await.unwrap();
	assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn expired_token_is_refreshed_and_request_replayed_once() {
	let server = MockServer::start().await;
	let h = harness(&server);
	seed(&h.store, "A1", Some("R1")).await;

	Mock::given(method("GET"))
		.and(path("/churchs"))
		.and(header("authorization", "Bearer A1"))
		.respond_with(unauthorized())
		.expect(1)
		.mount(&server)
		.await;
	Mock::given(method("POST"))
		.and(path("/auth/refresh"))
		.and(header("authorization", "Bearer R1"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "A2"})))
		.expect(1)
		.mount(&server)
		.await;
	Mock::given(method("GET"))
		.and(path("/churchs"))
		.and(header("authorization", "Bearer A2"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!([
			{"id": "c1", "name": "Central", "state": "SP", "city": "Campinas"}
		])))
		.expect(1)
		.mount(&server)
		.await;

	let churches = h.client.churches().list().await.unwrap();

	assert_eq!(churches.len(), 1);
	assert_eq!(stored(&h.store, SessionKey::AccessToken).await.as_deref(), Some("A2"));
	assert_eq!(stored(&h.store, SessionKey::RefreshToken).await.as_deref(), Some("R1"));
	assert!(h.store.user().await.unwrap().is_some());
	assert_eq!(h.navigator.redirects(), 0);
}

#[tokio::test]
async fn replay_rejection_is_returned_without_second_refresh() {
	let server = MockServer::start().await;
	let h = harness(&server);
	seed(&h.store, "A1", Some("R1")).await;

	Mock::given(method("GET"))
		.and(path("/commons"))
		.respond_with(unauthorized())
		.expect(2)
		.mount(&server)
		.await;
	Mock::given(method("POST"))
		.and(path("/auth/refresh"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "A2"})))
		.expect(1)
		.mount(&server)
		.await;

	let err = h.client.commons().list().await.unwrap_err();

	assert!(err.is_unauthorized(), "unexpected error: {err:?}");
	assert_eq!(stored(&h.store, SessionKey::AccessToken).await.as_deref(), Some("A2"));
	assert_eq!(h.navigator.redirects(), 0);
}

#[tokio::test]
async fn failed_refresh_tears_down_and_surfaces_refresh_error() {
	let server = MockServer::start().await;
	let h = harness(&server);
	seed(&h.store, "A1", Some("R1")).await;

	Mock::given(method("GET"))
		.and(path("/churchs"))
		.respond_with(unauthorized())
		.expect(1)
		.mount(&server)
		.await;
	Mock::given(method("POST"))
		.and(path("/auth/refresh"))
		.respond_with(
			ResponseTemplate::new(401).set_body_json(json!({"message": "Refresh token expired"})),
		)
		.expect(1)
		.mount(&server)
		.await;

	let err = h.client.send(ApiRequest::get("/churchs")).await.unwrap_err();

	match err {
		ApiError::RefreshFailed(inner) => {
			assert_eq!(inner.status(), Some(StatusCode::UNAUTHORIZED));
			assert_eq!(inner.messages(), ["Refresh token expired"]);
		}
		other => panic!("expected RefreshFailed, got {other:?}"),
	}
	assert_eq!(stored(&h.store, SessionKey::AccessToken).await, None);
	assert_eq!(stored(&h.store, SessionKey::User).await, None);
	assert_eq!(stored(&h.store, SessionKey::RefreshToken).await, None);
	assert_eq!(h.navigator.redirects(), 1);
}

#[tokio::test]
async fn malformed_refresh_body_is_a_refresh_failure() {
	let server = MockServer::start().await;
	let h = harness(&server);
	seed(&h.store, "A1", Some("R1")).await;

	Mock::given(method("GET"))
		.and(path("/churchs"))
		.respond_with(unauthorized())
		.expect(1)
		.mount(&server)
		.await;
	Mock::given(method("POST"))
		.and(path("/auth/refresh"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "A2"})))
		.expect(1)
		.mount(&server)
		.await;

	let err = h.client.send(ApiRequest::get("/churchs")).await.unwrap_err();

	assert!(matches!(err, ApiError::RefreshFailed(ref inner) if matches!(**inner, ApiError::InvalidResponse(_))));
	assert_eq!(stored(&h.store, SessionKey::AccessToken).await, None);
	assert_eq!(h.navigator.redirects(), 1);
}

#[tokio::test]
async fn missing_refresh_token_skips_refresh_and_returns_original_401() {
	let server = MockServer::start().await;
	let h = harness(&server);
	seed(&h.store, "A1", None).await;

	Mock::given(method("GET"))
		.and(path("/churchs"))
		.respond_with(unauthorized())
		.expect(1)
		.mount(&server)
		.await;
	Mock::given(method("POST"))
		.and(path("/auth/refresh"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "A2"})))
		.expect(0)
		.mount(&server)
		.await;

	let err = h.client.send(ApiRequest::get("/churchs")).await.unwrap_err();

	assert!(err.is_unauthorized());
	assert_eq!(err.messages(), ["Unauthorized"]);
	assert_eq!(stored(&h.store, SessionKey::AccessToken).await, None);
	assert_eq!(stored(&h.store, SessionKey::User).await, None);
	assert_eq!(h.navigator.redirects(), 1);
}

#[tokio::test]
async fn other_errors_pass_through_untouched() {
	let server = MockServer::start().await;
	let h = harness(&server);
	seed(&h.store, "A1", Some("R1")).await;

	Mock::given(method("POST"))
		.and(path("/churchs"))
		.respond_with(ResponseTemplate::new(409).set_body_json(json!({
			"message": "A church with the name already exists"
		})))
		.expect(1)
		.mount(&server)
		.await;
	Mock::given(method("POST"))
		.and(path("/auth/refresh"))
		.respond_with(ResponseTemplate::new(200))
		.expect(0)
		.mount(&server)
		.await;

	let err = h
		.client
		.send(ApiRequest::post("/churchs").json(&json!({"name": "Central"})).unwrap())
		.await
		.unwrap_err();

	assert_eq!(err.status(), Some(StatusCode::CONFLICT));
	assert_eq!(err.messages(), ["A church with the name already exists"]);
	assert_eq!(stored(&h.store, SessionKey::AccessToken).await.as_deref(), Some("A1"));
	assert_eq!(h.navigator.redirects(), 0);
}

#[tokio::test]
async fn send_once_never_refreshes() {
	let server = MockServer::start().await;
	let h = harness(&server);
	seed(&h.store, "A1", Some("R1")).await;

	Mock::given(method("GET"))
		.and(path("/commons"))
		.respond_with(unauthorized())
		.expect(1)
		.mount(&server)
		.await;
	Mock::given(method("POST"))
		.and(path("/auth/refresh"))
		.respond_with(ResponseTemplate::new(200))
		.expect(0)
		.mount(&server)
		.await;

	let err = h.client.send_once(ApiRequest::get("/commons")).await.unwrap_err();
	assert!(err.is_unauthorized());
	assert_eq!(stored(&h.store, SessionKey::AccessToken).await.as_deref(), Some("A1"));
}

#[tokio::test]
async fn login_persists_session_and_next_request_uses_it() {
	let server = MockServer::start().await;
	let h = harness(&server);
	h.store.set(SessionKey::AccessToken, "stale").await.unwrap();

	Mock::given(method("POST"))
		.and(path("/auth/login"))
		.and(body_json(json!({"email": "ana@example.org", "password": "s3nha"})))
		.respond_with(ResponseTemplate::new(201).set_body_string(format!(
			r#"{{"accessToken":"A","refreshToken":"R","user":{USER}}}"#
		)))
		.expect(1)
		.mount(&server)
		.await;
	Mock::given(method("GET"))
		.and(path("/commons"))
		.and(header("authorization", "Bearer A"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
		.expect(1)
		.mount(&server)
		.await;

	let user = h
		.client
		.login(&Credentials::new("ana@example.org", "s3nha"))
		.await
		.unwrap();
	assert_eq!(user.name, "Ana Souza");
	assert!(user.role.can_manage_churches());

	let session = h.store.snapshot().await.unwrap();
	assert_eq!(session.access_token.unwrap().expose(), "A");
	assert_eq!(session.refresh_token.unwrap().expose(), "R");
	assert_eq!(session.user.unwrap(), user);

	h.client.commons().list().await.unwrap();

	let requests = server.received_requests().await.unwrap();
	assert!(
		requests[0].headers.get("authorization").is_none(),
		"login must not carry a stored token"
	);
}

#[tokio::test]
async fn legacy_login_without_refresh_token_clears_stale_one() {
	let server = MockServer::start().await;
	let h = harness_with(
		ApiConfig::new(server.uri().parse().unwrap()).with_legacy_auth_routes(),
	);
	h.store.set(SessionKey::RefreshToken, "old").await.unwrap();

	Mock::given(method("POST"))
		.and(path("/users/login"))
		.respond_with(
			ResponseTemplate::new(200).set_body_string(format!(r#"{{"acessToken":"A","user":{USER}}}"#)),
		)
		.expect(1)
		.mount(&server)
		.await;

	h.client
		.login(&Credentials::new("ana@example.org", "s3nha"))
		.await
		.unwrap();

	assert_eq!(stored(&h.store, SessionKey::AccessToken).await.as_deref(), Some("A"));
	assert_eq!(stored(&h.store, SessionKey::RefreshToken).await, None);
}

#[tokio::test]
async fn rejected_login_surfaces_backend_message_without_refresh() {
	let server = MockServer::start().await;
	let h = harness(&server);
	seed(&h.store, "A1", Some("R1")).await;

	Mock::given(method("POST"))
		.and(path("/auth/login"))
		.respond_with(
			ResponseTemplate::new(401).set_body_json(json!({"message": "Password is invalid credentials"})),
		)
		.expect(1)
		.mount(&server)
		.await;
	Mock::given(method("POST"))
		.and(path("/auth/refresh"))
		.respond_with(ResponseTemplate::new(200))
		.expect(0)
		.mount(&server)
		.await;

	let err = h
		.client
		.login(&Credentials::new("ana@example.org", "wrong"))
		.await
		.unwrap_err();

	assert!(err.is_unauthorized());
	assert_eq!(err.messages(), ["Password is invalid credentials"]);
	assert_eq!(h.navigator.redirects(), 0);
}

#[tokio::test]
async fn legacy_refresh_route_is_used_when_configured() {
	let server = MockServer::start().await;
	let h = harness_with(
		ApiConfig::new(server.uri().parse().unwrap()).with_legacy_auth_routes(),
	);
	seed(&h.store, "A1", Some("R1")).await;

	Mock::given(method("GET"))
		.and(path("/churchs"))
		.and(header("authorization", "Bearer A1"))
		.respond_with(unauthorized())
		.mount(&server)
		.await;
	Mock::given(method("POST"))
		.and(path("/users/refresh"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"acessToken": "A2"})))
		.expect(1)
		.mount(&server)
		.await;
	Mock::given(method("GET"))
		.and(path("/churchs"))
		.and(header("authorization", "Bearer A2"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
		.expect(1)
		.mount(&server)
		.await;

	h.client.churches().list().await.unwrap();
	assert_eq!(stored(&h.store, SessionKey::AccessToken).await.as_deref(), Some("A2"));
}

#[tokio::test]
async fn concurrent_rejections_both_finish_and_last_refresh_wins() {
	let server = MockServer::start().await;
	let h = harness(&server);
	seed(&h.store, "A1", Some("R1")).await;

	Mock::given(method("GET"))
		.and(path("/churchs"))
		.and(header("authorization", "Bearer A1"))
		.respond_with(unauthorized())
		.mount(&server)
		.await;
	Mock::given(method("POST"))
		.and(path("/auth/refresh"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "A2"})))
		.up_to_n_times(1)
		.mount(&server)
		.await;
	Mock::given(method("POST"))
		.and(path("/auth/refresh"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "A3"})))
		.mount(&server)
		.await;
	for token in ["A2", "A3"] {
		Mock::given(method("GET"))
			.and(path("/churchs"))
			.and(header("authorization", format!("Bearer {token}").as_str()))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
			.mount(&server)
			.await;
	}

	let first = h.client.clone();
	let second = h.client.clone();
	let (a, b) = futures::join!(
		async move { first.churches().list().await },
		async move { second.churches().list().await },
	);

	assert!(a.is_ok(), "first call failed: {a:?}");
	assert!(b.is_ok(), "second call failed: {b:?}");
	let token = stored(&h.store, SessionKey::AccessToken).await.unwrap();
	assert!(token == "A2" || token == "A3", "unexpected token {token}");
	assert_eq!(h.navigator.redirects(), 0);
}

#[tokio::test]
async fn logout_clears_every_key_and_redirects() {
	let server = MockServer::start().await;
	let h = harness(&server);
	seed(&h.store, "A1", Some("R1")).await;

	h.client.logout().await;

	for key in SessionKey::ALL {
		assert_eq!(stored(&h.store, key).await, None, "{key} survived logout");
	}
	assert!(!h.store.is_authenticated().await);
	assert_eq!(h.navigator.redirects(), 1);
}

#[tokio::test]
async fn unreachable_backend_keeps_session() {
	let h = harness_with(ApiConfig::new("http://127.0.0.1:1".parse().unwrap()));
	seed(&h.store, "A1", Some("R1")).await;

	let err = h.client.send(ApiRequest::get("/churchs")).await.unwrap_err();

	assert!(matches!(err, ApiError::Unreachable(_)));
	assert_eq!(stored(&h.store, SessionKey::AccessToken).await.as_deref(), Some("A1"));
	assert_eq!(h.navigator.redirects(), 0);
}
