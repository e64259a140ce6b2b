use aide::axum::{
	routing::{delete_with, get_with, post_with},
	ApiRouter,
};
use axum::http::StatusCode;
use serde_json::json;

use crate::{error, AppState};

pub mod model;
pub mod route;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("unknown post {0}")]
	UnknownPost(i64),
	#[error("post {0} belongs to another user")]
	NotPostAuthor(i64),
}

pub type RouteError = error::RouteError<Error>;

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route(
			"/",
			get_with(get_posts, get_posts_docs).post_with(create_post, create_post_docs),
		)
		.api_route("/:id", delete_with(delete_post, delete_post_docs))
		.api_route("/:id/vote", post_with(vote, vote_docs))
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnknownPost(..) => StatusCode::NOT_FOUND,
			Self::NotPostAuthor(..) => StatusCode::FORBIDDEN,
		}
	}

	fn errors(&self) -> Vec<error::Message<'_>> {
		match self {
			Self::UnknownPost(post) => vec![error::Message {
				content: "unknown_post".into(),
				field: None,
				details: Some({
					let mut map = error::Map::new();
					map.insert("post".into(), json!(post));
					map
				}),
			}],
			Self::NotPostAuthor(post) => vec![error::Message {
				content: "not_post_author".into(),
				field: None,
				details: Some({
					let mut map = error::Map::new();
					map.insert("post".into(), json!(post));
					map
				}),
			}],
		}
	}
}

#[cfg(test)]
mod test {
	use crate::test::*;

	#[tokio::test]
	async fn test_post_and_vote_scenario() {
		let app = app();

		let token = register_and_login(&app, "alice", "pw1").await;

		let response = app
			.post("/api/posts")
			.add_header(AUTHORIZATION, bearer(&token))
			.json(&json!({ "title": "T", "content": "C" }))
			.await;

		assert_eq!(response.status_code(), 201);

		let post = response.json::<Value>();

		assert_eq!(post["id"], 1);
		assert_eq!(post["username"], "alice");
		assert_eq!(post["votes"], json!([]));

		// No votes cast yet, with or without a token.
		let response = app.get("/api/posts").await;

		assert_eq!(response.status_code(), 200);

		let posts = response.json::<Value>();

		assert_eq!(posts[0]["votes"], 0);
		assert_eq!(posts[0]["userVote"], 0);

		let response = app
			.post("/api/posts/1/vote")
			.add_header(AUTHORIZATION, bearer(&token))
			.json(&json!({ "voteType": "up" }))
			.await;

		assert_eq!(response.status_code(), 200);

		let response = app
			.get("/api/posts")
			.add_header(AUTHORIZATION, bearer(&token))
			.await;
		let posts = response.json::<Value>();

		assert_eq!(posts[0]["votes"], 1);
		assert_eq!(posts[0]["userVote"], 1);

		let response = app
			.post("/api/posts/1/vote")
			.add_header(AUTHORIZATION, bearer(&token))
			.json(&json!({ "voteType": "down" }))
			.await;

		assert_eq!(response.status_code(), 200);

		let response = app
			.get("/api/posts")
			.add_header(AUTHORIZATION, bearer(&token))
			.await;
		let posts = response.json::<Value>();

		assert_eq!(posts[0]["votes"], -1);
		assert_eq!(posts[0]["userVote"], -1);
	}

	#[tokio::test]
	async fn test_repeated_vote_does_not_change_aggregate() {
		let app = app();

		let token = register_and_login(&app, "alice", "pw1").await;

		create_post(&app, &token, "T", "C").await;

		for _ in 0..2 {
			let response = app
				.post("/api/posts/1/vote")
				.add_header(AUTHORIZATION, bearer(&token))
				.json(&json!({ "voteType": "up" }))
				.await;

			assert_eq!(response.status_code(), 200);
		}

		let posts = app.get("/api/posts").await.json::<Value>();

		assert_eq!(posts[0]["votes"], 1);
	}

	#[tokio::test]
	async fn test_vote_on_unknown_post() {
		let app = app();

		let token = register_and_login(&app, "alice", "pw1").await;

		let response = app
			.post("/api/posts/42/vote")
			.add_header(AUTHORIZATION, bearer(&token))
			.json(&json!({ "voteType": "up" }))
			.await;

		assert_eq!(response.status_code(), 404);
	}

	#[tokio::test]
	async fn test_anonymous_listing_hides_user_vote() {
		let app = app();

		let token = register_and_login(&app, "alice", "pw1").await;

		create_post(&app, &token, "T", "C").await;

		let response = app
			.post("/api/posts/1/vote")
			.add_header(AUTHORIZATION, bearer(&token))
			.json(&json!({ "voteType": "up" }))
			.await;

		assert_eq!(response.status_code(), 200);

		let posts = app.get("/api/posts").await.json::<Value>();

		assert_eq!(posts[0]["votes"], 1);
		assert_eq!(posts[0]["userVote"], 0);

		// An invalid token degrades the same way instead of failing.
		let response = app
			.get("/api/posts")
			.add_header(AUTHORIZATION, bearer("garbage"))
			.await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<Value>()[0]["userVote"], 0);
	}

	#[tokio::test]
	async fn test_create_requires_token() {
		let app = app();

		let response = app
			.post("/api/posts")
			.json(&json!({ "title": "T", "content": "C" }))
			.await;

		assert_eq!(response.status_code(), 401);

		let response = app
			.post("/api/posts")
			.add_header(AUTHORIZATION, bearer("garbage"))
			.json(&json!({ "title": "T", "content": "C" }))
			.await;

		assert_eq!(response.status_code(), 403);
	}

	#[tokio::test]
	async fn test_delete_requires_author() {
		let app = app();

		let alice = register_and_login(&app, "alice", "pw1").await;
		let bob = register_and_login(&app, "bob", "pw2").await;

		create_post(&app, &alice, "T", "C").await;

		let response = app
			.delete("/api/posts/1")
			.add_header(AUTHORIZATION, bearer(&bob))
			.await;

		assert_eq!(response.status_code(), 403);

		// The post is still present.
		let posts = app.get("/api/posts").await.json::<Value>();

		assert_eq!(posts.as_array().unwrap().len(), 1);

		let response = app
			.delete("/api/posts/1")
			.add_header(AUTHORIZATION, bearer(&alice))
			.await;

		assert_eq!(response.status_code(), 200);

		let posts = app.get("/api/posts").await.json::<Value>();

		assert!(posts.as_array().unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_delete_unknown_post() {
		let app = app();

		let token = register_and_login(&app, "alice", "pw1").await;

		let response = app
			.delete("/api/posts/42")
			.add_header(AUTHORIZATION, bearer(&token))
			.await;

		assert_eq!(response.status_code(), 404);
	}

	#[tokio::test]
	async fn test_posts_keep_insertion_order() {
		let app = app();

		let token = register_and_login(&app, "alice", "pw1").await;

		create_post(&app, &token, "first", "a").await;
		create_post(&app, &token, "second", "b").await;

		let posts = app.get("/api/posts").await.json::<Value>();

		assert_eq!(posts[0]["id"], 1);
		assert_eq!(posts[0]["title"], "first");
		assert_eq!(posts[1]["id"], 2);
		assert_eq!(posts[1]["title"], "second");
	}
}
