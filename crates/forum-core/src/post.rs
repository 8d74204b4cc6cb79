//! Posts and threaded comments.
//!
//! The comment tree is stored as id lists: a post lists its root comments and
//! each comment lists its direct replies. The engine keeps the comment records
//! themselves in a flat table keyed by [`CommentId`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CommentId, PostId, SubredditId, UserId};

/// A post filed under a subreddit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Engine-assigned id.
    pub id: PostId,

    /// Title line.
    pub title: String,

    /// Body text.
    pub content: String,

    /// Author, as supplied by the caller. Never empty.
    pub author_id: UserId,

    /// Subreddit, as supplied by the caller. Never empty.
    pub subreddit_id: SubredditId,

    /// Upvote count.
    pub upvotes: u64,

    /// Downvote count.
    pub downvotes: u64,

    /// Root comments only, in creation order.
    pub comments: Vec<CommentId>,

    /// When the post was created.
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a post with zeroed vote counts and no comments.
    #[must_use]
    pub fn new(
        id: PostId,
        title: impl Into<String>,
        content: impl Into<String>,
        author_id: UserId,
        subreddit_id: SubredditId,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            author_id,
            subreddit_id,
            upvotes: 0,
            downvotes: 0,
            comments: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Record one vote.
    pub fn record_vote(&mut self, is_upvote: bool) {
        if is_upvote {
            self.upvotes += 1;
        } else {
            self.downvotes += 1;
        }
    }
}

/// A comment on a post, possibly a reply to another comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Engine-assigned id.
    pub id: CommentId,

    /// Body text.
    pub content: String,

    /// Author, as supplied by the caller.
    pub author_id: UserId,

    /// The post this comment belongs to.
    pub post_id: PostId,

    /// Parent comment; empty for a root comment.
    pub parent_id: CommentId,

    /// Direct replies, in creation order.
    pub children: Vec<CommentId>,

    /// Upvote count.
    pub upvotes: u64,

    /// Downvote count.
    pub downvotes: u64,

    /// When the comment was created.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a comment with no replies and zeroed vote counts.
    #[must_use]
    pub fn new(
        id: CommentId,
        content: impl Into<String>,
        author_id: UserId,
        post_id: PostId,
        parent_id: CommentId,
    ) -> Self {
        Self {
            id,
            content: content.into(),
            author_id,
            post_id,
            parent_id,
            children: Vec::new(),
            upvotes: 0,
            downvotes: 0,
            created_at: Utc::now(),
        }
    }

    /// Whether this comment attaches directly to its post.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_id.is_empty()
    }

    /// Record one vote.
    pub fn record_vote(&mut self, is_upvote: bool) {
        if is_upvote {
            self.upvotes += 1;
        } else {
            self.downvotes += 1;
        }
    }
}

/// One comment in a flattened thread.
///
/// A thread is listed depth-first: every comment is followed by its replies,
/// and `depth` is 0 for root comments and one more than the parent's for
/// replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadEntry {
    /// Reply depth; 0 for a root comment.
    pub depth: usize,

    /// The comment itself.
    pub comment: Comment,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> Post {
        Post::new(
            PostId::new("p1"),
            "hi",
            "body",
            UserId::new("alice"),
            SubredditId::new("s1"),
        )
    }

    #[test]
    fn new_post_has_no_votes() {
        let post = post();
        assert_eq!(post.upvotes, 0);
        assert_eq!(post.downvotes, 0);
        assert!(post.comments.is_empty());
    }

    #[test]
    fn votes_move_one_counter() {
        let mut post = post();
        post.record_vote(true);
        post.record_vote(true);
        post.record_vote(false);

        assert_eq!(post.upvotes, 2);
        assert_eq!(post.downvotes, 1);
    }

    #[test]
    fn comment_without_parent_is_root() {
        let root = Comment::new(
            CommentId::new("c1"),
            "nice",
            UserId::new("bob"),
            PostId::new("p1"),
            CommentId::default(),
        );
        let reply = Comment::new(
            CommentId::new("c2"),
            "agreed",
            UserId::new("carol"),
            PostId::new("p1"),
            CommentId::new("c1"),
        );

        assert!(root.is_root());
        assert!(!reply.is_root());
    }
}
