use aide::axum::IntoApiResponse;
use axum::{extract::State, http::StatusCode};
use macros::route;

use crate::{
	extract::{Json, MaybeToken, Path, Token},
	openapi::tag,
	route::model::{Confirmation, IdInput},
	store::StoreError,
	Store,
};

use super::{model, Error, RouteError};

/// Get all posts
/// Returns every post in insertion order. With a valid bearer token the
/// response also carries the requester's own vote on each post; otherwise
/// `userVote` is 0.
#[route(tag = tag::POST)]
pub async fn get_posts(
	State(store): State<Store>,
	MaybeToken(claims): MaybeToken,
) -> Json<Vec<model::PostView>> {
	let viewer = claims.map(|claims| claims.sub);

	Json(
		store
			.posts()
			.into_iter()
			.map(|post| post.into_view(viewer))
			.collect(),
	)
}

/// Create post
/// Creates a new post authored by the authenticated user.
#[route(tag = tag::POST, response(status = 201, description = "The created post.", shape = "Json<model::Post>"))]
pub async fn create_post(
	State(store): State<Store>,
	token: Token,
	Json(input): Json<model::CreatePostInput>,
) -> impl IntoApiResponse {
	let post = store.create_post(
		token.claims.sub,
		&token.claims.username,
		input.title,
		input.content,
	);

	(StatusCode::CREATED, Json(post))
}

/// Delete post
/// Deletes a post permanently, along with its votes. Only the author of a
/// post may delete it.
#[route(tag = tag::POST)]
pub async fn delete_post(
	State(store): State<Store>,
	token: Token,
	Path(path): Path<IdInput>,
) -> Result<Json<Confirmation>, RouteError> {
	store
		.delete_post(path.id, token.claims.sub)
		.map_err(|e| match e {
			StoreError::UnknownPost(id) => Error::UnknownPost(id).into(),
			StoreError::NotAuthor(id) => Error::NotPostAuthor(id).into(),
			e => RouteError::App(e.into()),
		})?;

	Ok(Json(Confirmation::new("Post deleted successfully")))
}

/// Vote on post
/// Casts or replaces the authenticated user's vote on a post. Voting in the
/// same direction twice leaves the aggregate unchanged.
#[route(tag = tag::POST)]
pub async fn vote(
	State(store): State<Store>,
	token: Token,
	Path(path): Path<IdInput>,
	Json(input): Json<model::VoteInput>,
) -> Result<Json<Confirmation>, RouteError> {
	store
		.vote(path.id, token.claims.sub, input.vote_type.value())
		.map_err(|e| match e {
			StoreError::UnknownPost(id) => Error::UnknownPost(id).into(),
			e => RouteError::App(e.into()),
		})?;

	Ok(Json(Confirmation::new("Vote recorded")))
}
