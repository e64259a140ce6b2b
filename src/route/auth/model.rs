use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

fn validate_username(username: &str) -> Result<(), ValidationError> {
	if username.chars().any(|c| !c.is_alphanumeric()) {
		return Err(ValidationError::new("username must be alphanumeric"));
	}

	Ok(())
}

/// A single user.
///
/// The password hash is never serialized to the client.
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
	/// The unique identifier of the user.
	pub id: i64,
	/// The hashed password, in PHC string format.
	#[serde(skip)]
	pub password: String,
	/// The username that is displayed to the public.
	pub username: String,
	/// The creation time of the user.
	pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A signed bearer token and the public projection of the user it
/// authenticates.
#[derive(Debug, Serialize, JsonSchema)]
pub struct AuthResponse {
	pub token: String,
	pub user: User,
}

#[derive(Deserialize, Validate, JsonSchema)]
pub struct RegisterInput {
	/// The username that is displayed to the public.
	#[validate(length(min = 3, max = 32), custom(function = "validate_username"))]
	pub username: String,
	#[validate(length(min = 3, max = 128))]
	pub password: String,
}

#[derive(Deserialize, Validate, JsonSchema)]
pub struct LoginInput {
	pub username: String,
	pub password: String,
}
