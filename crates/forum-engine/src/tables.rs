//! The domain tables and the handlers that mutate them.
//!
//! Everything here is synchronous and runs under the engine's table lock, so
//! each handler observes and leaves a consistent view of every table.
//!
//! Comments live in a flat table keyed by id alongside the tree links. Vote
//! resolution therefore costs two hash lookups (posts, then comments) instead of
//! a scan over every post's comments; the lookup order and outcome are the same.

use std::collections::HashMap;

use forum_core::{
    Ack, Command, Comment, CommentId, CreateComment, CreatePost, CreateSubreddit, DirectMessage,
    EngineError, IdGenerator, JoinSubreddit, Post, PostId, RegisterUser, Result, SendDirectMessage,
    Subreddit, SubredditId, ThreadEntry, User, UserId, Vote, VoteReceipt, VoteTarget,
};

/// Every table the engine owns.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    ids: IdGenerator,
    users: HashMap<UserId, User>,
    subreddits: HashMap<SubredditId, Subreddit>,
    posts: HashMap<PostId, Post>,
    comments: HashMap<CommentId, Comment>,
    comments_by_post: HashMap<PostId, Vec<CommentId>>,
    inboxes: HashMap<UserId, Vec<DirectMessage>>,
}

impl Tables {
    /// Apply one command.
    pub(crate) fn apply(&mut self, command: Command) -> Result<Ack> {
        match command {
            Command::RegisterUser(cmd) => Ok(self.register_user(cmd)),
            Command::CreateSubreddit(cmd) => Ok(self.create_subreddit(cmd)),
            Command::JoinSubreddit(cmd) => self.join_subreddit(cmd),
            Command::CreatePost(cmd) => self.create_post(cmd),
            Command::CreateComment(cmd) => self.create_comment(cmd),
            Command::Vote(cmd) => self.vote(&cmd),
            Command::SendDirectMessage(cmd) => Ok(self.send_direct_message(cmd)),
            unhandled @ Command::GetFeed(_) => Err(EngineError::Unhandled {
                kind: unhandled.kind(),
            }),
        }
    }

    fn register_user(&mut self, cmd: RegisterUser) -> Ack {
        let user = User::new(self.ids.next_id(), cmd.username);
        self.users.insert(user.id.clone(), user.clone());
        Ack::UserRegistered(user)
    }

    fn create_subreddit(&mut self, cmd: CreateSubreddit) -> Ack {
        let subreddit = Subreddit::new(
            self.ids.next_id(),
            cmd.name,
            cmd.description,
            cmd.creator_id,
        );
        self.subreddits.insert(subreddit.id.clone(), subreddit.clone());
        Ack::SubredditCreated(subreddit)
    }

    fn join_subreddit(&mut self, cmd: JoinSubreddit) -> Result<Ack> {
        let user = self
            .users
            .get(&cmd.user_id)
            .cloned()
            .ok_or(EngineError::UserNotFound {
                user_id: cmd.user_id,
            })?;
        let subreddit = self
            .subreddits
            .get_mut(&cmd.subreddit_id)
            .ok_or(EngineError::SubredditNotFound {
                subreddit_id: cmd.subreddit_id,
            })?;

        subreddit.add_member(user);
        Ok(Ack::SubredditJoined(subreddit.clone()))
    }

    fn create_post(&mut self, cmd: CreatePost) -> Result<Ack> {
        if cmd.author_id.is_empty() {
            return Err(EngineError::MissingField { field: "author_id" });
        }
        if cmd.subreddit_id.is_empty() {
            return Err(EngineError::MissingField {
                field: "subreddit_id",
            });
        }

        let post = Post::new(
            self.ids.next_id(),
            cmd.title,
            cmd.content,
            cmd.author_id,
            cmd.subreddit_id,
        );
        // Unknown subreddits are tolerated; the post just isn't listed anywhere.
        if let Some(subreddit) = self.subreddits.get_mut(&post.subreddit_id) {
            subreddit.posts.push(post.id.clone());
        }
        self.posts.insert(post.id.clone(), post.clone());
        Ok(Ack::PostCreated(post))
    }

    fn create_comment(&mut self, cmd: CreateComment) -> Result<Ack> {
        if !self.posts.contains_key(&cmd.post_id) {
            return Err(EngineError::PostNotFound {
                post_id: cmd.post_id,
            });
        }

        let comment = Comment::new(
            self.ids.next_id(),
            cmd.content,
            cmd.author_id,
            cmd.post_id,
            cmd.parent_id,
        );
        let id = comment.id.clone();
        let post_id = comment.post_id.clone();
        let parent_id = comment.parent_id.clone();

        // Indexed by post before linking; stays reachable even if linking fails.
        self.comments_by_post
            .entry(post_id.clone())
            .or_default()
            .push(id.clone());
        self.comments.insert(id.clone(), comment);

        if parent_id.is_empty() {
            if let Some(post) = self.posts.get_mut(&post_id) {
                post.comments.push(id.clone());
            }
        } else {
            let parent = self
                .comments
                .get_mut(&parent_id)
                .filter(|parent| parent.post_id == post_id)
                .ok_or_else(|| EngineError::ParentNotFound {
                    comment_id: id.clone(),
                    parent_id: parent_id.clone(),
                    post_id: post_id.clone(),
                })?;
            parent.children.push(id.clone());
        }

        Ok(Ack::CommentCreated(self.comments[&id].clone()))
    }

    fn vote(&mut self, cmd: &Vote) -> Result<Ack> {
        let target_id = cmd.target_id.as_str();

        if let Some(post) = self.posts.get_mut(target_id) {
            post.record_vote(cmd.is_upvote);
            return Ok(Ack::Voted(VoteReceipt {
                target_id: cmd.target_id.clone(),
                target: VoteTarget::Post,
                upvotes: post.upvotes,
                downvotes: post.downvotes,
            }));
        }

        if let Some(comment) = self.comments.get_mut(target_id) {
            comment.record_vote(cmd.is_upvote);
            return Ok(Ack::Voted(VoteReceipt {
                target_id: cmd.target_id.clone(),
                target: VoteTarget::Comment,
                upvotes: comment.upvotes,
                downvotes: comment.downvotes,
            }));
        }

        Err(EngineError::TargetNotFound {
            target_id: cmd.target_id.clone(),
        })
    }

    fn send_direct_message(&mut self, cmd: SendDirectMessage) -> Ack {
        let message = DirectMessage::new(
            self.ids.next_id(),
            cmd.from_user_id,
            cmd.to_user_id,
            cmd.content,
        );
        self.inboxes
            .entry(message.to_user_id.clone())
            .or_default()
            .push(message.clone());
        Ack::MessageSent(message)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub(crate) fn user(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    pub(crate) fn user_count(&self) -> usize {
        self.users.len()
    }

    pub(crate) fn subreddit(&self, id: &str) -> Option<&Subreddit> {
        self.subreddits.get(id)
    }

    pub(crate) fn post(&self, id: &str) -> Option<&Post> {
        self.posts.get(id)
    }

    pub(crate) fn comment(&self, id: &str) -> Option<&Comment> {
        self.comments.get(id)
    }

    /// Every comment indexed under a post, linked or not, in creation order.
    pub(crate) fn comments_for_post(&self, post_id: &str) -> Vec<Comment> {
        self.comments_by_post
            .get(post_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.comments.get(id))
            .cloned()
            .collect()
    }

    /// The linked comment tree of a post, flattened depth-first.
    pub(crate) fn thread(&self, post_id: &str) -> Option<Vec<ThreadEntry>> {
        let post = self.posts.get(post_id)?;

        // Explicit stack; reply chains can be arbitrarily deep.
        let mut entries = Vec::new();
        let mut stack: Vec<(usize, &CommentId)> =
            post.comments.iter().rev().map(|id| (0, id)).collect();
        while let Some((depth, id)) = stack.pop() {
            let Some(comment) = self.comments.get(id) else {
                continue;
            };
            stack.extend(comment.children.iter().rev().map(|child| (depth + 1, child)));
            entries.push(ThreadEntry {
                depth,
                comment: comment.clone(),
            });
        }
        Some(entries)
    }

    pub(crate) fn inbox(&self, user_id: &str) -> Vec<DirectMessage> {
        self.inboxes.get(user_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forum_core::TargetId;

    fn register(tables: &mut Tables, name: &str) -> User {
        match tables
            .apply(RegisterUser {
                username: name.into(),
            }
            .into())
            .unwrap()
        {
            Ack::UserRegistered(user) => user,
            other => panic!("unexpected ack: {other:?}"),
        }
    }

    fn subreddit(tables: &mut Tables, name: &str) -> Subreddit {
        match tables
            .apply(
                CreateSubreddit {
                    name: name.into(),
                    description: "desc".into(),
                    creator_id: UserId::new("alice-id"),
                }
                .into(),
            )
            .unwrap()
        {
            Ack::SubredditCreated(subreddit) => subreddit,
            other => panic!("unexpected ack: {other:?}"),
        }
    }

    fn post(tables: &mut Tables, subreddit_id: &SubredditId) -> Post {
        match tables
            .apply(
                CreatePost {
                    title: "hi".into(),
                    content: "body".into(),
                    author_id: UserId::new("alice-id"),
                    subreddit_id: subreddit_id.clone(),
                }
                .into(),
            )
            .unwrap()
        {
            Ack::PostCreated(post) => post,
            other => panic!("unexpected ack: {other:?}"),
        }
    }

    fn comment(tables: &mut Tables, post_id: &PostId, parent_id: &str) -> Result<Ack> {
        tables.apply(
            CreateComment {
                content: "nice".into(),
                author_id: UserId::new("bob-id"),
                post_id: post_id.clone(),
                parent_id: CommentId::new(parent_id),
            }
            .into(),
        )
    }

    fn vote(tables: &mut Tables, target: &str, is_upvote: bool) -> Result<Ack> {
        tables.apply(
            Vote {
                user_id: UserId::new("carol-id"),
                target_id: TargetId::new(target),
                is_upvote,
            }
            .into(),
        )
    }

    #[test]
    fn registration_assigns_distinct_ids() {
        let mut tables = Tables::default();
        let a = register(&mut tables, "alice");
        let b = register(&mut tables, "alice");

        assert_ne!(a.id, b.id);
        assert_eq!(tables.user_count(), 2);
        assert_eq!(tables.user(a.id.as_str()).unwrap().username, "alice");
    }

    #[test]
    fn post_requires_author_and_subreddit() {
        let mut tables = Tables::default();

        let missing_author = tables.apply(
            CreatePost {
                title: "t".into(),
                content: "c".into(),
                author_id: UserId::default(),
                subreddit_id: SubredditId::new("s1"),
            }
            .into(),
        );
        let missing_subreddit = tables.apply(
            CreatePost {
                title: "t".into(),
                content: "c".into(),
                author_id: UserId::new("alice-id"),
                subreddit_id: SubredditId::default(),
            }
            .into(),
        );

        assert_eq!(
            missing_author.unwrap_err(),
            EngineError::MissingField { field: "author_id" }
        );
        assert_eq!(
            missing_subreddit.unwrap_err(),
            EngineError::MissingField {
                field: "subreddit_id"
            }
        );
        assert!(tables.posts.is_empty());
    }

    #[test]
    fn post_is_listed_under_existing_subreddit() {
        let mut tables = Tables::default();
        let sub = subreddit(&mut tables, "tech");
        let post = post(&mut tables, &sub.id);

        assert_eq!(tables.subreddit(sub.id.as_str()).unwrap().posts, vec![post.id]);
    }

    #[test]
    fn post_under_unknown_subreddit_is_still_created() {
        let mut tables = Tables::default();
        let post = post(&mut tables, &SubredditId::new("subreddit-1"));

        assert!(tables.post(post.id.as_str()).is_some());
    }

    #[test]
    fn root_comment_attaches_to_post() {
        let mut tables = Tables::default();
        let post = post(&mut tables, &SubredditId::new("s1"));

        let Ack::CommentCreated(root) = comment(&mut tables, &post.id, "").unwrap() else {
            panic!("expected comment");
        };

        assert!(root.is_root());
        assert_eq!(tables.post(post.id.as_str()).unwrap().comments, vec![root.id]);
    }

    #[test]
    fn reply_attaches_to_parent_only() {
        let mut tables = Tables::default();
        let post = post(&mut tables, &SubredditId::new("s1"));
        let Ack::CommentCreated(root) = comment(&mut tables, &post.id, "").unwrap() else {
            panic!("expected comment");
        };

        let Ack::CommentCreated(reply) = comment(&mut tables, &post.id, root.id.as_str()).unwrap()
        else {
            panic!("expected comment");
        };

        let post = tables.post(post.id.as_str()).unwrap();
        assert_eq!(post.comments, vec![root.id.clone()]);
        assert_eq!(
            tables.comment(root.id.as_str()).unwrap().children,
            vec![reply.id]
        );
    }

    #[test]
    fn reply_to_missing_parent_is_indexed_but_unlinked() {
        let mut tables = Tables::default();
        let post = post(&mut tables, &SubredditId::new("s1"));

        let err = comment(&mut tables, &post.id, "no-such-comment").unwrap_err();

        let EngineError::ParentNotFound { comment_id, .. } = err else {
            panic!("expected ParentNotFound, got {err:?}");
        };
        assert!(tables.post(post.id.as_str()).unwrap().comments.is_empty());
        let indexed = tables.comments_for_post(post.id.as_str());
        assert_eq!(indexed.len(), 1);
        assert_eq!(indexed[0].id, comment_id);
    }

    #[test]
    fn parent_must_belong_to_the_same_post() {
        let mut tables = Tables::default();
        let first = post(&mut tables, &SubredditId::new("s1"));
        let second = post(&mut tables, &SubredditId::new("s1"));
        let Ack::CommentCreated(on_first) = comment(&mut tables, &first.id, "").unwrap() else {
            panic!("expected comment");
        };

        let result = comment(&mut tables, &second.id, on_first.id.as_str());

        assert!(matches!(result, Err(EngineError::ParentNotFound { .. })));
        assert!(tables.comment(on_first.id.as_str()).unwrap().children.is_empty());
    }

    #[test]
    fn comment_on_missing_post_is_rejected() {
        let mut tables = Tables::default();

        let result = comment(&mut tables, &PostId::new("nope"), "");

        assert!(matches!(result, Err(EngineError::PostNotFound { .. })));
        assert!(tables.comments.is_empty());
        assert!(tables.comments_by_post.is_empty());
    }

    #[test]
    fn vote_resolves_post_then_comment() {
        let mut tables = Tables::default();
        let post = post(&mut tables, &SubredditId::new("s1"));
        let Ack::CommentCreated(root) = comment(&mut tables, &post.id, "").unwrap() else {
            panic!("expected comment");
        };

        let on_post = vote(&mut tables, post.id.as_str(), true).unwrap();
        let on_comment = vote(&mut tables, root.id.as_str(), false).unwrap();

        let Ack::Voted(on_post) = on_post else {
            panic!("expected vote receipt");
        };
        let Ack::Voted(on_comment) = on_comment else {
            panic!("expected vote receipt");
        };
        assert_eq!(on_post.target, VoteTarget::Post);
        assert_eq!((on_post.upvotes, on_post.downvotes), (1, 0));
        assert_eq!(on_comment.target, VoteTarget::Comment);
        assert_eq!((on_comment.upvotes, on_comment.downvotes), (0, 1));
    }

    #[test]
    fn vote_reaches_unlinked_comment() {
        let mut tables = Tables::default();
        let post = post(&mut tables, &SubredditId::new("s1"));
        let Err(EngineError::ParentNotFound { comment_id, .. }) =
            comment(&mut tables, &post.id, "missing")
        else {
            panic!("expected ParentNotFound");
        };

        assert!(vote(&mut tables, comment_id.as_str(), true).is_ok());
        assert_eq!(tables.comment(comment_id.as_str()).unwrap().upvotes, 1);
    }

    #[test]
    fn vote_on_unknown_target_changes_nothing() {
        let mut tables = Tables::default();
        let post = post(&mut tables, &SubredditId::new("s1"));

        let result = vote(&mut tables, "ghost", true);

        assert!(matches!(result, Err(EngineError::TargetNotFound { .. })));
        let post = tables.post(post.id.as_str()).unwrap();
        assert_eq!((post.upvotes, post.downvotes), (0, 0));
    }

    #[test]
    fn join_requires_user_and_subreddit() {
        let mut tables = Tables::default();
        let user = register(&mut tables, "bob");
        let sub = subreddit(&mut tables, "tech");

        let missing_user = tables.apply(
            JoinSubreddit {
                user_id: UserId::new("ghost"),
                subreddit_id: sub.id.clone(),
            }
            .into(),
        );
        let missing_sub = tables.apply(
            JoinSubreddit {
                user_id: user.id.clone(),
                subreddit_id: SubredditId::new("ghost"),
            }
            .into(),
        );
        let joined = tables.apply(
            JoinSubreddit {
                user_id: user.id.clone(),
                subreddit_id: sub.id.clone(),
            }
            .into(),
        );

        assert!(matches!(missing_user, Err(EngineError::UserNotFound { .. })));
        assert!(matches!(
            missing_sub,
            Err(EngineError::SubredditNotFound { .. })
        ));
        assert!(matches!(joined, Ok(Ack::SubredditJoined(_))));
        assert!(tables.subreddit(sub.id.as_str()).unwrap().is_member(&user.id));
    }

    #[test]
    fn messages_land_in_recipient_inbox_in_order() {
        let mut tables = Tables::default();
        for content in ["one", "two"] {
            tables
                .apply(
                    SendDirectMessage {
                        from_user_id: UserId::new("alice-id"),
                        to_user_id: UserId::new("bob-id"),
                        content: content.into(),
                    }
                    .into(),
                )
                .unwrap();
        }

        let inbox = tables.inbox("bob-id");
        assert_eq!(inbox.len(), 2);
        assert_eq!(inbox[0].content, "one");
        assert_eq!(inbox[1].content, "two");
        assert!(tables.inbox("alice-id").is_empty());
    }

    #[test]
    fn feed_is_unhandled() {
        let mut tables = Tables::default();

        let result = tables.apply(
            forum_core::GetFeed {
                user_id: UserId::new("alice-id"),
            }
            .into(),
        );

        assert!(matches!(result, Err(EngineError::Unhandled { .. })));
    }

    #[test]
    fn thread_nests_replies() {
        let mut tables = Tables::default();
        let post = post(&mut tables, &SubredditId::new("s1"));
        let Ack::CommentCreated(root) = comment(&mut tables, &post.id, "").unwrap() else {
            panic!("expected comment");
        };
        comment(&mut tables, &post.id, root.id.as_str()).unwrap();
        comment(&mut tables, &post.id, "").unwrap();

        let thread = tables.thread(post.id.as_str()).unwrap();

        let shape: Vec<_> = thread
            .iter()
            .map(|entry| (entry.depth, entry.comment.id.clone()))
            .collect();
        assert_eq!(shape.len(), 3);
        assert_eq!(shape[0], (0, root.id.clone()));
        assert_eq!(shape[1].0, 1);
        assert_eq!(thread[1].comment.parent_id, root.id);
        assert_eq!(shape[2].0, 0);
        assert!(tables.thread("ghost").is_none());
    }

    #[test]
    fn thread_survives_very_deep_reply_chain() {
        const DEPTH: usize = 100_000;
        let mut tables = Tables::default();
        let post = post(&mut tables, &SubredditId::new("s1"));

        let mut parent = String::new();
        for _ in 0..DEPTH {
            let Ack::CommentCreated(reply) = comment(&mut tables, &post.id, &parent).unwrap()
            else {
                panic!("expected comment");
            };
            parent = reply.id.to_string();
        }

        let thread = tables.thread(post.id.as_str()).unwrap();

        assert_eq!(thread.len(), DEPTH);
        assert_eq!(thread[0].depth, 0);
        assert_eq!(thread[DEPTH - 1].depth, DEPTH - 1);
        assert_eq!(thread[DEPTH - 1].comment.id.as_str(), parent);
        let json = serde_json::to_string(&thread).unwrap();
        assert!(json.starts_with('['));
    }
}
