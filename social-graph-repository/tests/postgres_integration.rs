//! Integration tests for the PostgreSQL repositories.
//!
//! These tests require a real PostgreSQL database and use SQLx test macros
//! to ensure proper test isolation and cleanup.
//!
//! Run with: `DATABASE_URL=postgres://... cargo test --test postgres_integration -- --ignored`

use social_graph_repository::{
    CreateOutcome, FollowsRepository, NotificationsRepository, PostgresFollowsRepository,
    PostgresNotificationsRepository, PostgresPostsRepository, PostgresUsersRepository,
    PostsRepository, RepositoryError, UsersRepository,
};
use social_graph_shared::types::{FollowChangeset, NewPost, NewUser, NotificationKind, User};

fn new_user(external_id: &str, username: &str) -> NewUser {
    NewUser {
        external_id: external_id.to_string(),
        username: username.to_string(),
        name: Some("Test User".to_string()),
        email: Some(format!("{username}@example.com")),
        image: None,
    }
}

async fn create(users: &PostgresUsersRepository, external_id: &str, username: &str) -> User {
    match users.create_user(&new_user(external_id, username)).await.unwrap() {
        CreateOutcome::Created(user) => user,
        CreateOutcome::AlreadyExists => panic!("user {external_id} already exists"),
    }
}

// ============================================================================
// Users Tests
// ============================================================================

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_create_user_is_idempotent_on_external_id(pool: sqlx::PgPool) {
    let users = PostgresUsersRepository::new(pool.clone());

    let created = create(&users, "ext_1", "ada").await;
    let outcome = users.create_user(&new_user("ext_1", "ada_again")).await.unwrap();

    assert_eq!(outcome, CreateOutcome::AlreadyExists);
    let found = users.find_by_external_id("ext_1").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.username, "ada");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_create_user_with_taken_username_fails(pool: sqlx::PgPool) {
    let users = PostgresUsersRepository::new(pool);

    create(&users, "ext_1", "ada").await;
    let err = users.create_user(&new_user("ext_2", "ada")).await.unwrap_err();

    assert!(err.is_unique_violation());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_sample_unconnected_excludes_viewer_and_followed(pool: sqlx::PgPool) {
    let users = PostgresUsersRepository::new(pool.clone());
    let follows = PostgresFollowsRepository::new(pool);

    let viewer = create(&users, "ext_v", "viewer").await;
    let followed = create(&users, "ext_f", "followed").await;
    let stranger = create(&users, "ext_s", "stranger").await;
    follows.persist_follow(&FollowChangeset::new(viewer.id, followed.id)).await.unwrap();

    let sample = users.sample_unconnected(viewer.id, 3).await.unwrap();

    assert_eq!(sample.len(), 1);
    assert_eq!(sample[0].id, stranger.id);
    assert!(users.sample_unconnected(viewer.id, 0).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_profile_counts(pool: sqlx::PgPool) {
    let users = PostgresUsersRepository::new(pool.clone());
    let follows = PostgresFollowsRepository::new(pool.clone());
    let posts = PostgresPostsRepository::new(pool);

    let a = create(&users, "ext_a", "a").await;
    let b = create(&users, "ext_b", "b").await;
    follows.persist_follow(&FollowChangeset::new(a.id, b.id)).await.unwrap();
    posts
        .create_post(&NewPost {
            author_id: b.id,
            content: Some("hello".to_string()),
            image: None,
        })
        .await
        .unwrap();

    let profile = users.profile_by_external_id("ext_b").await.unwrap().unwrap();

    assert_eq!(profile.followers, 1);
    assert_eq!(profile.following, 0);
    assert_eq!(profile.posts, 1);
}

// ============================================================================
// Follows Tests
// ============================================================================

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_persist_follow_writes_edge_and_notification(pool: sqlx::PgPool) {
    let users = PostgresUsersRepository::new(pool.clone());
    let follows = PostgresFollowsRepository::new(pool.clone());
    let notifications = PostgresNotificationsRepository::new(pool);

    let a = create(&users, "ext_a", "a").await;
    let b = create(&users, "ext_b", "b").await;
    follows.persist_follow(&FollowChangeset::new(a.id, b.id)).await.unwrap();

    assert!(follows.follow_exists(a.id, b.id).await.unwrap());
    assert!(!follows.follow_exists(b.id, a.id).await.unwrap());

    let listed = notifications.notifications_for(b.id, 10).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].kind, NotificationKind::Follow);
    assert_eq!(listed[0].creator_id, a.id);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_follow_is_unique_violation(pool: sqlx::PgPool) {
    let users = PostgresUsersRepository::new(pool.clone());
    let follows = PostgresFollowsRepository::new(pool.clone());
    let notifications = PostgresNotificationsRepository::new(pool);

    let a = create(&users, "ext_a", "a").await;
    let b = create(&users, "ext_b", "b").await;
    follows.persist_follow(&FollowChangeset::new(a.id, b.id)).await.unwrap();

    let err = follows.persist_follow(&FollowChangeset::new(a.id, b.id)).await.unwrap_err();

    assert!(err.is_unique_violation());
    assert_eq!(notifications.notifications_for(b.id, 10).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_failed_notification_rolls_back_edge(pool: sqlx::PgPool) {
    let users = PostgresUsersRepository::new(pool.clone());
    let follows = PostgresFollowsRepository::new(pool.clone());
    let notifications = PostgresNotificationsRepository::new(pool);

    let a = create(&users, "ext_a", "a").await;
    let b = create(&users, "ext_b", "b").await;
    let first = FollowChangeset::new(a.id, b.id);
    follows.persist_follow(&first).await.unwrap();
    assert!(follows.delete_follow(a.id, b.id).await.unwrap());

    let mut second = FollowChangeset::new(a.id, b.id);
    second.notification.id = first.notification.id;
    let err = follows.persist_follow(&second).await.unwrap_err();

    assert!(err.is_unique_violation());
    assert!(!follows.follow_exists(a.id, b.id).await.unwrap());
    assert_eq!(notifications.notifications_for(b.id, 10).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_self_follow_violates_check(pool: sqlx::PgPool) {
    let users = PostgresUsersRepository::new(pool.clone());
    let follows = PostgresFollowsRepository::new(pool);

    let a = create(&users, "ext_a", "a").await;
    let err = follows.persist_follow(&FollowChangeset::new(a.id, a.id)).await.unwrap_err();

    assert!(matches!(err, RepositoryError::CheckViolation(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_delete_follow_reports_removed_rows(pool: sqlx::PgPool) {
    let users = PostgresUsersRepository::new(pool.clone());
    let follows = PostgresFollowsRepository::new(pool);

    let a = create(&users, "ext_a", "a").await;
    let b = create(&users, "ext_b", "b").await;
    follows.persist_follow(&FollowChangeset::new(a.id, b.id)).await.unwrap();

    assert!(follows.delete_follow(a.id, b.id).await.unwrap());
    assert!(!follows.delete_follow(a.id, b.id).await.unwrap());
}
