use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by a bearer token: the user's id and username.
///
/// Tokens are issued without an `exp` claim and stay valid until the
/// signing secret changes. There is no revocation path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
	pub sub: i64,
	pub username: String,
}

/// The signing and verification keys for bearer tokens, derived from a
/// single shared secret.
#[derive(Clone)]
pub struct Keys {
	encoding: EncodingKey,
	decoding: DecodingKey,
	validation: Validation,
}

impl Keys {
	#[must_use]
	pub fn new(secret: &[u8]) -> Self {
		let mut validation = Validation::new(Algorithm::HS256);
		validation.validate_exp = false;
		validation.required_spec_claims.clear();

		Self {
			encoding: EncodingKey::from_secret(secret),
			decoding: DecodingKey::from_secret(secret),
			validation,
		}
	}

	/// Reads the secret from `JWT_SECRET`, falling back to a development
	/// value when unset.
	#[must_use]
	pub fn from_env() -> Self {
		let secret =
			std::env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());

		Self::new(secret.as_bytes())
	}

	pub fn sign(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
		jsonwebtoken::encode(&Header::default(), claims, &self.encoding)
	}

	pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
		jsonwebtoken::decode(token, &self.decoding, &self.validation).map(|data| data.claims)
	}
}

#[cfg(test)]
mod test {
	use super::{Claims, Keys};

	#[test]
	fn test_sign_and_verify() {
		let keys = Keys::new(b"secret");
		let token = keys
			.sign(&Claims {
				sub: 7,
				username: "alice".into(),
			})
			.unwrap();

		let claims = keys.verify(&token).unwrap();

		assert_eq!(claims.sub, 7);
		assert_eq!(claims.username, "alice");
	}

	#[test]
	fn test_verify_rejects_other_secret() {
		let token = Keys::new(b"one")
			.sign(&Claims {
				sub: 1,
				username: "alice".into(),
			})
			.unwrap();

		assert!(Keys::new(b"two").verify(&token).is_err());
	}
}
