//! # 角色与权限集成测试

use admin_hub::models::{CreatePermission, UpdatePermission, UpdateRole};
use admin_hub::testing::{create_test_context, menu_payload, read_permission, role_payload};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_role_name_unique() {
    let ctx = create_test_context().await.unwrap();
    let roles = &ctx.services.roles;
    roles.create(role_payload("Admin")).await.unwrap();

    let err = roles.create(role_payload("Admin")).await.unwrap_err();
    assert!(err.is_conflict());
    assert!(err.to_string().contains("name"));

    let found = roles.get_by_name("Admin").await.unwrap().unwrap();
    assert_eq!(found.name, "Admin");
    assert!(roles.get_by_name("Nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_role_rename_checks_uniqueness() {
    let ctx = create_test_context().await.unwrap();
    let roles = &ctx.services.roles;
    roles.create(role_payload("Admin")).await.unwrap();
    let editor = roles.create(role_payload("Editor")).await.unwrap();

    let err = roles
        .update(
            &editor.id,
            UpdateRole {
                name: Some("Admin".to_string()),
                ..UpdateRole::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_conflict());
}

#[tokio::test]
async fn test_permission_lookup_and_duplicate() {
    let ctx = create_test_context().await.unwrap();
    let admin = ctx.services.roles.create(role_payload("Admin")).await.unwrap();
    let permissions = &ctx.services.permissions;

    let created = permissions
        .create(read_permission("F1", &admin.id))
        .await
        .unwrap();
    assert!(created.read);
    assert!(!created.create);
    assert!(created.is_active);

    let found = permissions
        .get_by_function_and_role("F1", &admin.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, created.id);

    let err = permissions
        .create(read_permission("F1", &admin.id))
        .await
        .unwrap_err();
    assert!(err.is_conflict());
    assert!(err.to_string().contains("function_id/role_id"));

    assert_eq!(permissions.get_by_function("F1").await.unwrap().len(), 1);
    assert_eq!(permissions.get_by_role(&admin.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_permission_requires_existing_role() {
    let ctx = create_test_context().await.unwrap();
    let err = ctx
        .services
        .permissions
        .create(CreatePermission {
            function_id: "F1".to_string(),
            role_id: "ghost".to_string(),
            ..CreatePermission::default()
        })
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_permission_update_flags() {
    let ctx = create_test_context().await.unwrap();
    let admin = ctx.services.roles.create(role_payload("Admin")).await.unwrap();
    let permission = ctx
        .services
        .permissions
        .create(read_permission("F2", &admin.id))
        .await
        .unwrap();

    let updated = ctx
        .services
        .permissions
        .update(
            &permission.id,
            UpdatePermission {
                change: Some(true),
                administer: Some(true),
                ..UpdatePermission::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert!(updated.read);
    assert!(updated.change);
    assert!(updated.administer);
    assert!(!updated.delete);
}

#[tokio::test]
async fn test_role_delete_cascades_permissions() {
    let ctx = create_test_context().await.unwrap();
    let roles = &ctx.services.roles;
    let permissions = &ctx.services.permissions;

    let admin = roles.create(role_payload("Admin")).await.unwrap();
    let viewer = roles.create(role_payload("Viewer")).await.unwrap();
    permissions.create(read_permission("F1", &admin.id)).await.unwrap();
    permissions.create(read_permission("F2", &admin.id)).await.unwrap();
    permissions.create(read_permission("F1", &viewer.id)).await.unwrap();

    assert!(roles.delete(&admin.id).await.unwrap());

    assert!(roles.get(&admin.id).await.unwrap().is_none());
    assert!(permissions.get_by_role(&admin.id).await.unwrap().is_empty());
    assert_eq!(permissions.get_by_role(&viewer.id).await.unwrap().len(), 1);
    assert!(!roles.delete(&admin.id).await.unwrap());
}

#[tokio::test]
async fn test_menus_by_role_follow_active_permissions() {
    let ctx = create_test_context().await.unwrap();
    let menus = &ctx.services.menus;
    let permissions = &ctx.services.permissions;
    let role = ctx.services.roles.create(role_payload("Ops")).await.unwrap();

    let dashboard = menus.create(menu_payload("/dashboard", None, Some(2))).await.unwrap();
    let reports = menus.create(menu_payload("/reports", None, Some(1))).await.unwrap();
    let hidden = menus.create(menu_payload("/hidden", None, Some(0))).await.unwrap();
    let unsorted = menus.create(menu_payload("/audit", None, None)).await.unwrap();

    permissions.create(read_permission(&dashboard.id, &role.id)).await.unwrap();
    permissions.create(read_permission(&reports.id, &role.id)).await.unwrap();
    permissions.create(read_permission(&unsorted.id, &role.id)).await.unwrap();
    permissions
        .create(CreatePermission {
            is_active: false,
            ..read_permission(&hidden.id, &role.id)
        })
        .await
        .unwrap();
    permissions
        .create(read_permission("deleted-menu", &role.id))
        .await
        .unwrap();

    let visible = menus.get_menus_by_role(&role.id).await.unwrap();
    let paths: Vec<&str> = visible.iter().map(|m| m.path.as_str()).collect();
    assert_eq!(paths, vec!["/reports", "/dashboard", "/audit"]);

    assert!(menus.get_menus_by_role("no-role").await.unwrap().is_empty());
}
