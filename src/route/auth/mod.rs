use aide::axum::{
	routing::{get_with, post_with},
	ApiRouter,
};
use axum::http::StatusCode;

use crate::{error, AppState};

pub mod model;
pub mod route;

/// An error that can occur during authentication.
///
/// Note that the messages are presented to the client, so they should not
/// contain sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("invalid username or password")]
	InvalidUsernameOrPassword,
	#[error("password hashing error")]
	Argon(#[from] argon2::password_hash::Error),
	#[error("username already taken")]
	UsernameTaken,
	#[error("authentication required")]
	MissingToken,
	#[error("invalid token")]
	InvalidToken,
}

pub type RouteError = error::RouteError<Error>;

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route("/register", post_with(register, register_docs))
		.api_route("/login", post_with(login, login_docs))
		.api_route("/me", get_with(get_me, get_me_docs))
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::InvalidUsernameOrPassword | Self::MissingToken => StatusCode::UNAUTHORIZED,
			Self::InvalidToken => StatusCode::FORBIDDEN,
			Self::UsernameTaken => StatusCode::BAD_REQUEST,
			Self::Argon(..) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn errors(&self) -> Vec<error::Message<'_>> {
		vec![error::Message {
			content: self.to_string().into(),
			field: None,
			details: None,
		}]
	}
}

#[cfg(test)]
mod test {
	use crate::test::*;

	#[tokio::test]
	async fn test_signup_flow() {
		let app = app();

		let response = app
			.post("/api/auth/register")
			.json(&json!({
				"username": "john",
				"password": "hunter2hunter",
			}))
			.await;

		assert_eq!(response.status_code(), 201);
		assert_eq!(
			response.json::<Value>()["message"],
			"User created successfully"
		);

		let response = app
			.post("/api/auth/login")
			.json(&json!({
				"username": "john",
				"password": "hunter2hunter",
			}))
			.await;

		assert_eq!(response.status_code(), 200);

		let body = response.json::<Value>();

		assert!(body["token"].is_string());
		assert_eq!(body["user"]["id"], 1);
		assert_eq!(body["user"]["username"], "john");
	}

	#[tokio::test]
	async fn test_register_rejects_taken_username() {
		let app = app();

		let response = app
			.post("/api/auth/register")
			.json(&json!({
				"username": "john",
				"password": "hunter2hunter",
			}))
			.await;

		assert_eq!(response.status_code(), 201);

		let response = app
			.post("/api/auth/register")
			.json(&json!({
				"username": "john",
				"password": "other-password",
			}))
			.await;

		assert_eq!(response.status_code(), 400);
	}

	#[tokio::test]
	async fn test_login_rejects_wrong_password() {
		let app = app();

		register(&app, "john", "hunter2hunter").await;

		let response = app
			.post("/api/auth/login")
			.json(&json!({
				"username": "john",
				"password": "not-the-password",
			}))
			.await;

		assert_eq!(response.status_code(), 401);
	}

	#[tokio::test]
	async fn test_login_rejects_unknown_username() {
		let app = app();

		let response = app
			.post("/api/auth/login")
			.json(&json!({
				"username": "nobody",
				"password": "hunter2hunter",
			}))
			.await;

		assert_eq!(response.status_code(), 401);
	}

	#[tokio::test]
	async fn test_me_returns_authenticated_user() {
		let app = app();

		let token = register_and_login(&app, "john", "hunter2hunter").await;

		let response = app
			.get("/api/auth/me")
			.add_header(AUTHORIZATION, bearer(&token))
			.await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<Value>()["username"], "john");
	}

	#[tokio::test]
	async fn test_me_requires_token() {
		let app = app();

		let response = app.get("/api/auth/me").await;

		assert_eq!(response.status_code(), 401);

		let response = app
			.get("/api/auth/me")
			.add_header(AUTHORIZATION, bearer("not-a-token"))
			.await;

		assert_eq!(response.status_code(), 403);
	}
}
