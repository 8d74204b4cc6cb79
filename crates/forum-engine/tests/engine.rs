//! Engine behaviour under direct, concurrent use.

use std::collections::HashSet;
use std::sync::Arc;

use forum_core::{
    Ack, CreateComment, CreatePost, CreateSubreddit, EngineError, PostId, RegisterUser,
    SendDirectMessage, SubredditId, TargetId, UserId, Vote,
};
use forum_engine::{Engine, EngineConfig};

fn engine() -> Arc<Engine> {
    Engine::shared(EngineConfig::default())
}

async fn create_post(engine: &Engine, author: &str, subreddit: &SubredditId) -> PostId {
    match engine
        .apply(
            CreatePost {
                title: "hi".into(),
                content: "body".into(),
                author_id: UserId::new(author),
                subreddit_id: subreddit.clone(),
            }
            .into(),
        )
        .await
    {
        Ok(Ack::PostCreated(post)) => post.id,
        other => panic!("unexpected outcome: {other:?}"),
    }
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn user_table_matches_successful_registrations() {
    let engine = engine();

    for name in ["alice", "bob", "alice"] {
        engine
            .apply(
                RegisterUser {
                    username: name.into(),
                }
                .into(),
            )
            .await
            .unwrap();
    }

    assert_eq!(engine.user_count().await, 3);
    assert_eq!(engine.metrics().await.active_users, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_registrations_lose_no_updates() {
    const N: usize = 500;
    let engine = engine();

    let tasks: Vec<_> = (0..N)
        .map(|i| {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move {
                engine
                    .apply(
                        RegisterUser {
                            username: format!("user-{i}"),
                        }
                        .into(),
                    )
                    .await
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for task in futures::future::join_all(tasks).await {
        match task.unwrap() {
            Ok(Ack::UserRegistered(user)) => {
                ids.insert(user.id);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    assert_eq!(ids.len(), N);
    assert_eq!(engine.user_count().await, N);
    assert_eq!(engine.metrics().await.active_users, N as u64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_votes_are_all_counted() {
    let engine = engine();
    let post_id = create_post(&engine, "alice-id", &SubredditId::new("s1")).await;

    let tasks: Vec<_> = (0..200)
        .map(|i| {
            let engine = Arc::clone(&engine);
            let target_id = TargetId::new(post_id.as_str());
            tokio::spawn(async move {
                engine
                    .send(
                        Vote {
                            user_id: UserId::new(format!("voter-{i}")),
                            target_id,
                            is_upvote: i % 4 != 0,
                        }
                        .into(),
                    )
                    .await;
            })
        })
        .collect();
    for task in futures::future::join_all(tasks).await {
        task.unwrap();
    }

    let post = engine.post(post_id.as_str()).await.unwrap();
    assert_eq!(post.upvotes, 150);
    assert_eq!(post.downvotes, 50);
    assert_eq!(engine.metrics().await.total_votes, 200);
}

// ============================================================================
// Posts and comments
// ============================================================================

#[tokio::test]
async fn post_without_references_is_never_created() {
    let engine = engine();

    for (author, subreddit) in [("", "s1"), ("alice-id", ""), ("", "")] {
        let result = engine
            .apply(
                CreatePost {
                    title: "t".into(),
                    content: "c".into(),
                    author_id: UserId::new(author),
                    subreddit_id: SubredditId::new(subreddit),
                }
                .into(),
            )
            .await;
        assert!(matches!(result, Err(EngineError::MissingField { .. })));
    }

    assert_eq!(engine.metrics().await.total_posts, 0);
}

#[tokio::test]
async fn reply_links_under_parent_and_counts_once() {
    let engine = engine();
    let post_id = create_post(&engine, "alice-id", &SubredditId::new("s1")).await;

    let Ok(Ack::CommentCreated(root)) = engine
        .apply(
            CreateComment {
                content: "root".into(),
                author_id: UserId::new("bob-id"),
                post_id: post_id.clone(),
                parent_id: "".into(),
            }
            .into(),
        )
        .await
    else {
        panic!("expected root comment");
    };
    let before = engine.metrics().await.total_comments;

    let Ok(Ack::CommentCreated(reply)) = engine
        .apply(
            CreateComment {
                content: "reply".into(),
                author_id: UserId::new("carol-id"),
                post_id: post_id.clone(),
                parent_id: root.id.clone(),
            }
            .into(),
        )
        .await
    else {
        panic!("expected reply");
    };

    assert_eq!(engine.metrics().await.total_comments, before + 1);
    let post = engine.post(post_id.as_str()).await.unwrap();
    assert_eq!(post.comments, vec![root.id.clone()]);
    let root = engine.comment(root.id.as_str()).await.unwrap();
    assert_eq!(root.children, vec![reply.id]);
}

#[tokio::test]
async fn reply_to_unknown_parent_does_not_count() {
    let engine = engine();
    let post_id = create_post(&engine, "alice-id", &SubredditId::new("s1")).await;

    let result = engine
        .apply(
            CreateComment {
                content: "lost".into(),
                author_id: UserId::new("bob-id"),
                post_id: post_id.clone(),
                parent_id: "no-such-comment".into(),
            }
            .into(),
        )
        .await;

    assert!(matches!(result, Err(EngineError::ParentNotFound { .. })));
    assert_eq!(engine.metrics().await.total_comments, 0);
    assert!(engine.post(post_id.as_str()).await.unwrap().comments.is_empty());
}

#[tokio::test]
async fn vote_on_unknown_target_changes_no_counters() {
    let engine = engine();
    let post_id = create_post(&engine, "alice-id", &SubredditId::new("s1")).await;

    let result = engine
        .apply(
            Vote {
                user_id: UserId::new("carol-id"),
                target_id: TargetId::new("ghost"),
                is_upvote: false,
            }
            .into(),
        )
        .await;

    assert!(matches!(result, Err(EngineError::TargetNotFound { .. })));
    let post = engine.post(post_id.as_str()).await.unwrap();
    assert_eq!((post.upvotes, post.downvotes), (0, 0));
    assert_eq!(engine.metrics().await.total_votes, 0);
}

#[tokio::test]
async fn direct_messages_fill_recipient_inbox() {
    let engine = engine();

    engine
        .send(
            SendDirectMessage {
                from_user_id: UserId::new("alice-id"),
                to_user_id: UserId::new("bob-id"),
                content: "hey".into(),
            }
            .into(),
        )
        .await;

    let inbox = engine.inbox("bob-id").await;
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].from_user_id, UserId::new("alice-id"));
    assert_eq!(engine.metrics().await.total_messages, 1);
}

// ============================================================================
// End to end
// ============================================================================

#[tokio::test]
async fn register_post_comment_vote_scenario() {
    let engine = engine();

    engine
        .apply(
            RegisterUser {
                username: "alice".into(),
            }
            .into(),
        )
        .await
        .unwrap();
    let Ok(Ack::SubredditCreated(subreddit)) = engine
        .apply(
            CreateSubreddit {
                name: "tech".into(),
                description: "desc".into(),
                creator_id: UserId::new("alice-id"),
            }
            .into(),
        )
        .await
    else {
        panic!("expected subreddit");
    };
    let post_id = create_post(&engine, "alice-id", &subreddit.id).await;
    engine
        .apply(
            CreateComment {
                content: "nice".into(),
                author_id: UserId::new("bob-id"),
                post_id: post_id.clone(),
                parent_id: "".into(),
            }
            .into(),
        )
        .await
        .unwrap();
    engine
        .apply(
            Vote {
                user_id: UserId::new("carol-id"),
                target_id: TargetId::new(post_id.as_str()),
                is_upvote: true,
            }
            .into(),
        )
        .await
        .unwrap();

    let post = engine.post(post_id.as_str()).await.unwrap();
    assert_eq!(post.comments.len(), 1);
    assert_eq!(post.upvotes, 1);
    assert_eq!(post.downvotes, 0);

    let thread = engine.thread(post_id.as_str()).await.unwrap();
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0].depth, 0);
    assert_eq!(thread[0].comment.content, "nice");

    let metrics = engine.metrics().await;
    assert_eq!(metrics.total_posts, 1);
    assert_eq!(metrics.total_comments, 1);
    assert_eq!(metrics.total_votes, 1);
    assert_eq!(metrics.active_users, 1);
    assert_eq!(metrics.total_messages, 0);
}
