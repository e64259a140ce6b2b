use aide::OperationInput;
use axum::{
	extract::{FromRef, FromRequestParts},
	http::{header, request},
};

use crate::{
	openapi::SECURITY_SCHEME_BEARER,
	route::auth,
	token::{Claims, Keys},
};

pub const AUTHORIZATION_PREFIX: &str = "Bearer ";

/// Extracts and verifies the bearer token from the request.
///
/// If the `Authorization` header is absent, a [`auth::Error::MissingToken`]
/// is returned. If the token does not verify, a
/// [`auth::Error::InvalidToken`] is returned.
///
/// ```rust
/// async fn route(token: Token) {
///   println!("{:?}", token.claims);
/// }
/// ```
#[derive(Debug)]
pub struct Token {
	pub claims: Claims,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Token
where
	Keys: FromRef<S>,
	S: Sync + Send,
{
	type Rejection = auth::RouteError;

	async fn from_request_parts(
		parts: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		let header = parts
			.headers
			.get(header::AUTHORIZATION)
			.ok_or(auth::Error::MissingToken)?;

		let header = header.to_str().map_err(|_| auth::Error::InvalidToken)?;

		let Some(token) = header.strip_prefix(AUTHORIZATION_PREFIX) else {
			return Err(auth::Error::InvalidToken.into());
		};

		let keys = Keys::from_ref(state);
		let claims = keys.verify(token).map_err(|_| auth::Error::InvalidToken)?;

		Ok(Self { claims })
	}
}

impl OperationInput for Token {
	/// Adds the bearer security requirement to the `OpenAPI` operation.
	fn operation_input(_ctx: &mut aide::gen::GenContext, operation: &mut aide::openapi::Operation) {
		operation.security.push(
			[(SECURITY_SCHEME_BEARER.to_string(), Vec::new())]
				.into_iter()
				.collect(),
		);
	}
}

/// Like [`Token`], but a missing or unverifiable token degrades to `None`
/// instead of rejecting the request.
#[derive(Debug)]
pub struct MaybeToken(pub Option<Claims>);

#[axum::async_trait]
impl<S> FromRequestParts<S> for MaybeToken
where
	Keys: FromRef<S>,
	S: Sync + Send,
{
	type Rejection = std::convert::Infallible;

	async fn from_request_parts(
		parts: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		let claims = parts
			.headers
			.get(header::AUTHORIZATION)
			.and_then(|header| header.to_str().ok())
			.and_then(|header| header.strip_prefix(AUTHORIZATION_PREFIX))
			.and_then(|token| Keys::from_ref(state).verify(token).ok());

		Ok(Self(claims))
	}
}

impl OperationInput for MaybeToken {}
