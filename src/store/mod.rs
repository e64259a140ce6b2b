pub mod memory;

pub use memory::MemoryStore;

use crate::route::{auth::model::User, post::model::Post};

/// Faults surfaced by a [`BoardStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
	#[error("username already exists")]
	UsernameTaken,
	#[error("unknown post {0}")]
	UnknownPost(i64),
	#[error("post {0} has a different author")]
	NotAuthor(i64),
}

/// Storage for users, posts and their votes.
///
/// Handlers only ever see this interface, so the process-memory
/// implementation can later be swapped for a durable one without touching
/// route logic. Every method is atomic: author checks and mutations happen
/// under a single lock acquisition.
pub trait BoardStore: Send + Sync {
	/// Stores a new user. Fails with [`StoreError::UsernameTaken`] if the
	/// username is already present.
	fn create_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError>;

	fn user_by_username(&self, username: &str) -> Option<User>;

	fn user_by_id(&self, id: i64) -> Option<User>;

	/// Every post, in insertion order.
	fn posts(&self) -> Vec<Post>;

	fn create_post(
		&self,
		author_id: i64,
		author_username: &str,
		title: String,
		content: String,
	) -> Post;

	/// Removes a post and its votes. Fails with [`StoreError::NotAuthor`]
	/// when the requester did not create the post.
	fn delete_post(&self, id: i64, requester: i64) -> Result<(), StoreError>;

	/// Casts or replaces the requester's vote on a post. A later vote
	/// overwrites the stored value, it never removes the record.
	fn vote(&self, post_id: i64, voter: i64, value: i32) -> Result<(), StoreError>;
}
