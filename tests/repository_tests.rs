//! 用户仓库集成测试

use travel_portal::{error::AppError, repository::UserRepository};

mod common;
use common::{create_test_config, setup_test_db};

async fn repo() -> UserRepository {
    let config = create_test_config();
    UserRepository::new(setup_test_db(&config).await)
}

#[tokio::test]
async fn test_create_applies_bootstrap_admin() {
    let repo = repo().await;
    assert_eq!(repo.list().await.unwrap().len(), 0);

    let first = repo.create("alice", "hash-a").await.unwrap();
    let second = repo.create("bob", "hash-b").await.unwrap();

    assert!(first.is_admin);
    assert!(!second.is_admin);
    assert!(!first.is_blocked && !second.is_blocked);
    assert!(second.id > first.id);
    assert_eq!(repo.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_unique_username_enforced() {
    let repo = repo().await;
    repo.create("alice", "hash-a").await.unwrap();

    let result = repo.create("alice", "hash-b").await;
    assert!(matches!(result, Err(AppError::UsernameTaken)));
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_find_by_username_and_id() {
    let repo = repo().await;
    let created = repo.create("alice", "hash-a").await.unwrap();

    let by_name = repo.find_by_username("alice").await.unwrap().unwrap();
    assert_eq!(by_name.id, created.id);
    assert_eq!(by_name.password_hash, "hash-a");

    let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(by_id.username, "alice");

    assert!(repo.find_by_username("Alice").await.unwrap().is_none());
    assert!(repo.find_by_id(created.id + 1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_toggles_flip_flags() {
    let repo = repo().await;
    repo.create("alice", "hash-a").await.unwrap();
    let bob = repo.create("bob", "hash-b").await.unwrap();

    let blocked = repo.toggle_blocked(bob.id).await.unwrap().unwrap();
    assert!(blocked.is_blocked);
    let unblocked = repo.toggle_blocked(bob.id).await.unwrap().unwrap();
    assert!(!unblocked.is_blocked);

    let promoted = repo.toggle_admin(bob.id).await.unwrap().unwrap();
    assert!(promoted.is_admin);
    assert!(!promoted.is_blocked);

    assert!(repo.toggle_blocked(999).await.unwrap().is_none());
    assert!(repo.toggle_admin(999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_bootstrap_only_for_empty_table() {
    let repo = repo().await;
    let alice = repo.create("alice", "hash-a").await.unwrap();

    // 唯一的管理员被撤销后，新用户也不会自动成为管理员
    repo.toggle_admin(alice.id).await.unwrap();
    let bob = repo.create("bob", "hash-b").await.unwrap();
    assert!(!bob.is_admin);
}

#[tokio::test]
async fn test_list_in_id_order() {
    let repo = repo().await;
    for name in ["carol", "alice", "bob"] {
        repo.create(name, "hash").await.unwrap();
    }

    let names: Vec<String> = repo
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.username)
        .collect();
    assert_eq!(names, vec!["carol", "alice", "bob"]);
}
