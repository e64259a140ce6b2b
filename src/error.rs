use std::borrow::Cow;

use axum::{
	body::Body,
	extract::rejection,
	http::{Response, StatusCode},
	response::IntoResponse,
};
use schemars::JsonSchema;
use serde::Serialize;

pub type Map = serde_json::Map<String, serde_json::Value>;

/// A single error message presented to the client.
///
/// `field` is set when the message concerns one input field, and `details`
/// carries machine-readable context such as the offending resource id.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Message<'e> {
	pub content: Cow<'e, str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub field: Option<Cow<'e, str>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<Map>,
}

/// The body of every error response.
#[derive(Debug, Serialize, JsonSchema)]
pub struct ErrorResponse<'e> {
	pub success: bool,
	pub errors: Vec<Message<'e>>,
}

/// Maps a domain error to an HTTP status code and a set of client-safe
/// messages. Every route-group error enum implements this.
///
/// Note that the messages are presented to the client, so they should not
/// contain sensitive information.
pub trait ErrorShape {
	fn status(&self) -> StatusCode;
	fn errors(&self) -> Vec<Message<'_>>;
}

fn respond<E: ErrorShape>(error: &E) -> Response<Body> {
	(
		error.status(),
		axum::Json(ErrorResponse {
			success: false,
			errors: error.errors(),
		}),
	)
		.into_response()
}

/// Errors that any route can produce, regardless of its group.
///
/// The Display trait is not sent to the client, so it can show
/// sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
	#[error("validation error")]
	Validation(#[from] validator::ValidationErrors),
	#[error("json rejection")]
	Json(axum_jsonschema::JsonSchemaRejection),
	#[error("path rejection: {0}")]
	Path(#[from] rejection::PathRejection),
	#[error("token error: {0}")]
	Token(#[from] jsonwebtoken::errors::Error),
	#[error("rate limited: {0}")]
	RateLimited(#[from] tower_governor::GovernorError),
	#[error("store fault: {0}")]
	Store(#[from] crate::store::StoreError),
}

impl From<axum_jsonschema::JsonSchemaRejection> for AppError {
	fn from(rejection: axum_jsonschema::JsonSchemaRejection) -> Self {
		Self::Json(rejection)
	}
}

impl ErrorShape for AppError {
	fn status(&self) -> StatusCode {
		match self {
			Self::Validation(..) | Self::Json(..) | Self::Path(..) => StatusCode::BAD_REQUEST,
			Self::RateLimited(tower_governor::GovernorError::TooManyRequests { .. }) => {
				StatusCode::TOO_MANY_REQUESTS
			}
			Self::Token(..) | Self::Store(..) | Self::RateLimited(..) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}

	fn errors(&self) -> Vec<Message<'_>> {
		match self {
			Self::Validation(errors) => errors
				.field_errors()
				.into_iter()
				.flat_map(|(field, errors)| {
					errors.iter().map(move |error| Message {
						content: error.code.clone(),
						field: Some(Cow::Borrowed(field)),
						details: None,
					})
				})
				.collect(),
			Self::Json(..) => vec![Message {
				content: "invalid json body".into(),
				field: None,
				details: None,
			}],
			Self::Path(error) => vec![Message {
				content: error.to_string().into(),
				field: None,
				details: None,
			}],
			Self::RateLimited(tower_governor::GovernorError::TooManyRequests { .. }) => {
				vec![Message {
					content: "too many requests".into(),
					field: None,
					details: None,
				}]
			}
			Self::Token(..) | Self::Store(..) | Self::RateLimited(..) => Vec::new(),
		}
	}
}

impl IntoResponse for AppError {
	fn into_response(self) -> Response<Body> {
		if self.status().is_server_error() {
			tracing::error!(error = %self, "internal error");
		}

		respond(&self)
	}
}

/// Either a route-group error or an application-level one.
///
/// Handlers return `Result<_, RouteError<Error>>` with their group's
/// `Error`; `?` lifts the group error and `RouteError::App` wraps
/// everything else.
#[derive(Debug)]
pub enum RouteError<E: ErrorShape> {
	Route(E),
	App(AppError),
}

impl<E: ErrorShape> From<E> for RouteError<E> {
	fn from(error: E) -> Self {
		Self::Route(error)
	}
}

impl<E: ErrorShape> IntoResponse for RouteError<E> {
	fn into_response(self) -> Response<Body> {
		match self {
			Self::Route(error) => respond(&error),
			Self::App(error) => error.into_response(),
		}
	}
}

impl<E: ErrorShape> aide::OperationOutput for RouteError<E> {
	type Inner = Self;
}
