use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Path parameters selecting a single resource by its numeric id.
#[derive(Deserialize, Validate, JsonSchema)]
pub struct IdInput {
	pub id: i64,
}

/// A plain confirmation message.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Confirmation {
	pub message: String,
}

impl Confirmation {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}
}
