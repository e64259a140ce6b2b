use std::sync::{
	atomic::{AtomicI64, Ordering},
	PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
};

use chrono::Utc;

use super::{BoardStore, StoreError};
use crate::route::{
	auth::model::User,
	post::model::{Post, Vote},
};

/// Volatile storage with a lifecycle of process start to process exit.
///
/// Ids are monotonic and process-scoped, starting at 1. Nothing is ever
/// persisted; a restart loses all users, posts and votes.
pub struct MemoryStore {
	users: RwLock<Vec<User>>,
	posts: RwLock<Vec<Post>>,
	next_user_id: AtomicI64,
	next_post_id: AtomicI64,
}

impl MemoryStore {
	#[must_use]
	pub fn new() -> Self {
		Self {
			users: RwLock::new(Vec::new()),
			posts: RwLock::new(Vec::new()),
			next_user_id: AtomicI64::new(1),
			next_post_id: AtomicI64::new(1),
		}
	}

	fn read_users(&self) -> RwLockReadGuard<'_, Vec<User>> {
		self.users.read().unwrap_or_else(PoisonError::into_inner)
	}

	fn write_users(&self) -> RwLockWriteGuard<'_, Vec<User>> {
		self.users.write().unwrap_or_else(PoisonError::into_inner)
	}

	fn read_posts(&self) -> RwLockReadGuard<'_, Vec<Post>> {
		self.posts.read().unwrap_or_else(PoisonError::into_inner)
	}

	fn write_posts(&self) -> RwLockWriteGuard<'_, Vec<Post>> {
		self.posts.write().unwrap_or_else(PoisonError::into_inner)
	}
}

impl Default for MemoryStore {
	fn default() -> Self {
		Self::new()
	}
}

impl BoardStore for MemoryStore {
	fn create_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
		let mut users = self.write_users();

		if users.iter().any(|user| user.username == username) {
			return Err(StoreError::UsernameTaken);
		}

		let user = User {
			id: self.next_user_id.fetch_add(1, Ordering::Relaxed),
			username: username.to_owned(),
			password: password_hash.to_owned(),
			created_at: Utc::now(),
		};

		users.push(user.clone());
		Ok(user)
	}

	fn user_by_username(&self, username: &str) -> Option<User> {
		self.read_users()
			.iter()
			.find(|user| user.username == username)
			.cloned()
	}

	fn user_by_id(&self, id: i64) -> Option<User> {
		self.read_users().iter().find(|user| user.id == id).cloned()
	}

	fn posts(&self) -> Vec<Post> {
		self.read_posts().clone()
	}

	fn create_post(
		&self,
		author_id: i64,
		author_username: &str,
		title: String,
		content: String,
	) -> Post {
		let post = Post {
			id: self.next_post_id.fetch_add(1, Ordering::Relaxed),
			user_id: author_id,
			username: author_username.to_owned(),
			title,
			content,
			created_at: Utc::now(),
			votes: Vec::new(),
		};

		self.write_posts().push(post.clone());
		post
	}

	fn delete_post(&self, id: i64, requester: i64) -> Result<(), StoreError> {
		let mut posts = self.write_posts();
		let index = posts
			.iter()
			.position(|post| post.id == id)
			.ok_or(StoreError::UnknownPost(id))?;

		if posts[index].user_id != requester {
			return Err(StoreError::NotAuthor(id));
		}

		posts.remove(index);
		Ok(())
	}

	fn vote(&self, post_id: i64, voter: i64, value: i32) -> Result<(), StoreError> {
		let mut posts = self.write_posts();
		let post = posts
			.iter_mut()
			.find(|post| post.id == post_id)
			.ok_or(StoreError::UnknownPost(post_id))?;

		match post.votes.iter_mut().find(|vote| vote.user_id == voter) {
			Some(vote) => vote.value = value,
			None => post.votes.push(Vote {
				user_id: voter,
				value,
			}),
		}

		Ok(())
	}
}
