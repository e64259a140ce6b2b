use aide::axum::IntoApiResponse;
use argon2::{
	password_hash::{rand_core::OsRng, PasswordHash, SaltString},
	PasswordHasher, PasswordVerifier,
};
use axum::{extract::State, http::StatusCode};
use macros::route;

use crate::{
	extract::{Json, Token},
	openapi::tag,
	route::model::Confirmation,
	store::StoreError,
	token::Claims,
	AppState, Store,
};

use super::{model, Error, RouteError};

/// Register account
/// Creates a new account. The username must not already be taken.
#[route(tag = tag::AUTH, response(status = 201, description = "Account created.", shape = "Json<Confirmation>"))]
pub async fn register(
	State(state): State<AppState>,
	Json(input): Json<model::RegisterInput>,
) -> Result<impl IntoApiResponse, RouteError> {
	let salt = SaltString::generate(&mut OsRng);
	let hash = state
		.hasher
		.hash_password(input.password.as_bytes(), &salt)
		.map_err(Error::Argon)?
		.to_string();

	let user = state
		.store
		.create_user(&input.username, &hash)
		.map_err(|e| match e {
			StoreError::UsernameTaken => Error::UsernameTaken.into(),
			e => RouteError::App(e.into()),
		})?;

	tracing::debug!(id = user.id, username = %user.username, "registered user");

	Ok((
		StatusCode::CREATED,
		Json(Confirmation::new("User created successfully")),
	))
}

/// Log in
/// Authenticates with a username and password, returning a signed bearer token.
#[route(tag = tag::AUTH, response(status = 200, description = "Logged in successfully.", shape = "Json<model::AuthResponse>"))]
pub async fn login(
	State(state): State<AppState>,
	Json(input): Json<model::LoginInput>,
) -> Result<Json<model::AuthResponse>, RouteError> {
	let Some(user) = state.store.user_by_username(&input.username) else {
		return Err(Error::InvalidUsernameOrPassword.into());
	};

	let hash = PasswordHash::new(&user.password).map_err(Error::Argon)?;

	if state
		.hasher
		.verify_password(input.password.as_bytes(), &hash)
		.is_err()
	{
		return Err(Error::InvalidUsernameOrPassword.into());
	}

	let token = state
		.keys
		.sign(&Claims {
			sub: user.id,
			username: user.username.clone(),
		})
		.map_err(|e| RouteError::App(e.into()))?;

	Ok(Json(model::AuthResponse { token, user }))
}

/// Get user
/// Returns the authenticated user.
#[route(tag = tag::AUTH)]
pub async fn get_me(
	State(store): State<Store>,
	token: Token,
) -> Result<Json<model::User>, RouteError> {
	let user = store
		.user_by_id(token.claims.sub)
		.ok_or(Error::InvalidToken)?;

	Ok(Json(user))
}
