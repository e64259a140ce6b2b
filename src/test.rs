use std::sync::Arc;

use argon2::Argon2;
pub use axum::http::header::AUTHORIZATION;
use axum::http::HeaderValue;
pub use axum_test::TestServer;
pub use serde_json::{json, Value};

use crate::{store::MemoryStore, token::Keys, State};

/// Builds a test server backed by a fresh, empty store.
pub fn app() -> TestServer {
	let state = State {
		store: Arc::new(MemoryStore::new()),
		hasher: Argon2::default(),
		keys: Keys::new(b"test-secret"),
	};

	TestServer::new(crate::app(state)).expect("failed to build test server")
}

pub fn bearer(token: &str) -> HeaderValue {
	HeaderValue::from_str(&format!("Bearer {token}")).expect("token is ASCII")
}

/// Registers a user, asserting success.
pub async fn register(app: &TestServer, username: &str, password: &str) {
	let response = app
		.post("/api/auth/register")
		.json(&json!({ "username": username, "password": password }))
		.await;

	assert_eq!(response.status_code(), 201);
}

/// Registers a user and logs them in, returning their bearer token.
pub async fn register_and_login(app: &TestServer, username: &str, password: &str) -> String {
	register(app, username, password).await;

	let response = app
		.post("/api/auth/login")
		.json(&json!({ "username": username, "password": password }))
		.await;

	assert_eq!(response.status_code(), 200);

	response.json::<Value>()["token"]
		.as_str()
		.expect("login response carries a token")
		.to_owned()
}

/// Creates a post as the given user, asserting success.
pub async fn create_post(app: &TestServer, token: &str, title: &str, content: &str) {
	let response = app
		.post("/api/posts")
		.add_header(AUTHORIZATION, bearer(token))
		.json(&json!({ "title": title, "content": content }))
		.await;

	assert_eq!(response.status_code(), 201);
}
