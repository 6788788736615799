//! # 用户服务集成测试

use admin_hub::models::UpdateUser;
use admin_hub::services::avatar::avatar_url;
use admin_hub::testing::{UserFixture, create_test_context};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_create_hashes_password_and_round_trips() {
    let ctx = create_test_context().await.unwrap();
    let users = &ctx.services.users;

    let user = users
        .create(UserFixture::new().named("alice").password("s3cret!").build())
        .await
        .unwrap();

    assert_ne!(user.password, "s3cret!");
    assert!(user.password.starts_with("$2"));
    assert!(user.password_changed_at.is_some());
    assert!(users.verify_password(&user, "s3cret!").await.unwrap());
    assert!(!users.verify_password(&user, "wrong").await.unwrap());

    let fetched = users.get(&user.id).await.unwrap().unwrap();
    assert_eq!(fetched.email, "alice@example.com");
    assert_eq!(fetched.username, "alice");
    assert_eq!(fetched.first_name, "Test");
    assert_eq!(fetched.language, "en");
    assert_eq!(fetched.password, user.password);
}

#[tokio::test]
async fn test_avatar_derived_when_absent() {
    let ctx = create_test_context().await.unwrap();
    let user = ctx
        .services
        .users
        .create(UserFixture::new().named("bob").build())
        .await
        .unwrap();

    assert_eq!(
        user.avatar.as_deref(),
        Some(avatar_url("bob@example.com", "bob").as_str())
    );
    assert!(user.avatar.unwrap().starts_with("https://www.gravatar.com/avatar/"));
}

#[tokio::test]
async fn test_duplicate_email_and_username_conflict() {
    let ctx = create_test_context().await.unwrap();
    let users = &ctx.services.users;
    users
        .create(UserFixture::new().named("carol").build())
        .await
        .unwrap();

    let mut same_email = UserFixture::new().named("carol2").build();
    same_email.email = "carol@example.com".to_string();
    let err = users.create(same_email).await.unwrap_err();
    assert!(err.is_conflict());
    assert!(err.to_string().contains("email"));

    let mut same_username = UserFixture::new().named("carol3").build();
    same_username.username = "carol".to_string();
    let err = users.create(same_username).await.unwrap_err();
    assert!(err.is_conflict());
    assert!(err.to_string().contains("username"));
}

#[tokio::test]
async fn test_lookup_by_email_and_username() {
    let ctx = create_test_context().await.unwrap();
    let users = &ctx.services.users;
    let user = users
        .create(UserFixture::new().named("dave").build())
        .await
        .unwrap();

    let by_email = users.get_by_email("dave@example.com").await.unwrap().unwrap();
    let by_name = users.get_by_username("dave").await.unwrap().unwrap();
    assert_eq!(by_email.id, user.id);
    assert_eq!(by_name.id, user.id);
    assert!(users.get_by_username("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_rehashes_new_password() {
    let ctx = create_test_context().await.unwrap();
    let users = &ctx.services.users;
    let user = users
        .create(UserFixture::new().named("erin").password("old-pass").build())
        .await
        .unwrap();

    let updated = users
        .update(
            &user.id,
            UpdateUser {
                password: Some("new-pass".to_string()),
                first_name: Some("Erin".to_string()),
                ..UpdateUser::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.first_name, "Erin");
    assert_eq!(updated.email, user.email);
    assert!(users.verify_password(&updated, "new-pass").await.unwrap());
    assert!(!users.verify_password(&updated, "old-pass").await.unwrap());
    assert!(updated.password_changed_at >= user.password_changed_at);
}

#[tokio::test]
async fn test_update_to_taken_username_conflicts() {
    let ctx = create_test_context().await.unwrap();
    let users = &ctx.services.users;
    users.create(UserFixture::new().named("frank").build()).await.unwrap();
    let grace = users.create(UserFixture::new().named("grace").build()).await.unwrap();

    let err = users
        .update(
            &grace.id,
            UpdateUser {
                username: Some("frank".to_string()),
                ..UpdateUser::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_conflict());

    // 保持自身用户名不视为冲突
    let same = users
        .update(
            &grace.id,
            UpdateUser {
                username: Some("grace".to_string()),
                ..UpdateUser::default()
            },
        )
        .await
        .unwrap();
    assert!(same.is_some());
}

#[tokio::test]
async fn test_add_and_remove_role_are_idempotent() {
    let ctx = create_test_context().await.unwrap();
    let users = &ctx.services.users;
    let user = users
        .create(UserFixture::new().named("heidi").roles(&["viewer"]).build())
        .await
        .unwrap();

    let once = users.add_role(&user.id, "admin").await.unwrap();
    let twice = users.add_role(&user.id, "admin").await.unwrap();
    assert_eq!(once.roles.as_slice(), ["viewer", "admin"]);
    assert_eq!(twice.roles, once.roles);
    assert_eq!(twice.updated_at, once.updated_at);

    let removed = users.remove_role(&user.id, "viewer").await.unwrap();
    let removed_again = users.remove_role(&user.id, "viewer").await.unwrap();
    assert_eq!(removed.roles.as_slice(), ["admin"]);
    assert_eq!(removed_again.roles, removed.roles);

    let err = users.add_role("missing", "admin").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_record_login() {
    let ctx = create_test_context().await.unwrap();
    let users = &ctx.services.users;
    let user = users.create(UserFixture::new().named("ivan").build()).await.unwrap();
    assert!(user.last_login.is_none());

    let logged = users
        .record_login(&user.id, Some("10.0.0.1".to_string()))
        .await
        .unwrap()
        .unwrap();
    assert!(logged.last_login.is_some());
    assert_eq!(logged.last_ip_address.as_deref(), Some("10.0.0.1"));
}

#[tokio::test]
async fn test_empty_password_rejected() {
    let ctx = create_test_context().await.unwrap();
    let err = ctx
        .services
        .users
        .create(UserFixture::new().named("judy").password("").build())
        .await
        .unwrap_err();
    assert!(err.is_validation());
}
