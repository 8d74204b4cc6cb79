//! Subreddits and their membership.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{PostId, SubredditId, User, UserId};

/// A community that posts are filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subreddit {
    /// Engine-assigned id.
    pub id: SubredditId,

    /// Display name. Not required to be unique.
    pub name: String,

    /// Free-form description.
    pub description: String,

    /// The user that created the subreddit, as supplied by the caller.
    pub creator_id: UserId,

    /// Members keyed by user id. Empty at creation.
    pub members: HashMap<UserId, User>,

    /// Posts filed under this subreddit, in creation order.
    pub posts: Vec<PostId>,

    /// When the subreddit was created.
    pub created_at: DateTime<Utc>,
}

impl Subreddit {
    /// Create a subreddit with no members and no posts.
    #[must_use]
    pub fn new(
        id: SubredditId,
        name: impl Into<String>,
        description: impl Into<String>,
        creator_id: UserId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            creator_id,
            members: HashMap::new(),
            posts: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Whether the given user is a member.
    #[must_use]
    pub fn is_member(&self, user_id: &UserId) -> bool {
        self.members.contains_key(user_id)
    }

    /// Add (or refresh) a member.
    pub fn add_member(&mut self, user: User) {
        self.members.insert(user.id.clone(), user);
    }
}
