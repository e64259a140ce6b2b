use macros::model;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single vote cast on a post. `value` is +1 or -1.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
	pub user_id: i64,
	pub value: i32,
}

/// A single post, created by a user.
#[model]
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Post {
	/// The unique identifier of the post.
	#[serde(skip_deserializing)]
	pub id: i64,
	/// The user that created the post.
	#[serde(skip_deserializing)]
	pub user_id: i64,
	/// The author's username, denormalized for display.
	#[serde(skip_deserializing)]
	pub username: String,
	/// The title of the post.
	#[validate(length(min = 1, max = 300))]
	pub title: String,
	/// The content of the post.
	#[validate(length(min = 1, max = 10000))]
	pub content: String,
	/// The creation time of the post.
	#[serde(skip_deserializing)]
	pub created_at: chrono::DateTime<chrono::Utc>,
	/// Every vote cast on the post.
	#[serde(skip_deserializing)]
	pub votes: Vec<Vote>,
}

/// A post as rendered in the listing: the vote collection collapsed to its
/// aggregate, plus the requesting user's own vote.
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
	pub id: i64,
	pub user_id: i64,
	pub username: String,
	pub title: String,
	pub content: String,
	pub created_at: chrono::DateTime<chrono::Utc>,
	/// Sum of all vote values.
	pub votes: i64,
	/// The requester's own vote, or 0 when anonymous or no vote was cast.
	pub user_vote: i64,
}

impl Post {
	/// Collapses the vote collection for a viewer.
	#[must_use]
	pub fn into_view(self, viewer: Option<i64>) -> PostView {
		let votes = self.votes.iter().map(|vote| i64::from(vote.value)).sum();
		let user_vote = viewer
			.and_then(|id| self.votes.iter().find(|vote| vote.user_id == id))
			.map_or(0, |vote| i64::from(vote.value));

		PostView {
			id: self.id,
			user_id: self.user_id,
			username: self.username,
			title: self.title,
			content: self.content,
			created_at: self.created_at,
			votes,
			user_vote,
		}
	}
}

/// The direction of a vote.
#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
	Up,
	Down,
}

impl VoteType {
	#[must_use]
	pub fn value(self) -> i32 {
		match self {
			Self::Up => 1,
			Self::Down => -1,
		}
	}
}

#[derive(Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteInput {
	pub vote_type: VoteType,
}

#[cfg(test)]
mod test {
	use chrono::Utc;

	use super::{Post, Vote};

	fn post_with_votes(votes: Vec<Vote>) -> Post {
		Post {
			id: 1,
			user_id: 1,
			username: "alice".into(),
			title: "title".into(),
			content: "content".into(),
			created_at: Utc::now(),
			votes,
		}
	}

	#[test]
	fn test_view_aggregates_votes() {
		let post = post_with_votes(vec![
			Vote { user_id: 1, value: 1 },
			Vote { user_id: 2, value: 1 },
			Vote {
				user_id: 3,
				value: -1,
			},
		]);

		let view = post.into_view(Some(3));

		assert_eq!(view.votes, 1);
		assert_eq!(view.user_vote, -1);
	}

	#[test]
	fn test_view_without_viewer_has_no_user_vote() {
		let post = post_with_votes(vec![Vote { user_id: 1, value: 1 }]);

		let view = post.into_view(None);

		assert_eq!(view.votes, 1);
		assert_eq!(view.user_vote, 0);
	}
}
