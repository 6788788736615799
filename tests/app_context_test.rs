//! # 启动流程与应用信息集成测试

use std::sync::Arc;

use admin_hub::AppContext;
use admin_hub::config::{AppConfig, StorageConfig};
use admin_hub::models::ApplicationInfo;
use admin_hub::repository::Filter;
use admin_hub::storage::{ProviderKind, create_provider};
use admin_hub::testing::{create_test_context, test_config};
use futures::future::join_all;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_bootstrap_records_schema_and_info() {
    let ctx = create_test_context().await.unwrap();
    assert_eq!(ctx.provider.kind(), ProviderKind::Relational);
    assert!(ctx.provider.is_connected());
    ctx.provider.ping().await.unwrap();

    let migrations = ctx.services.migrations.find_many(&Filter::new()).await.unwrap();
    assert_eq!(migrations.len(), 7);
    assert!(migrations.iter().all(|m| m.db_provider == "sqlite"));

    let info = ctx.services.application_info.get_application_info().await.unwrap();
    assert_eq!(info.app_version, env!("CARGO_PKG_VERSION"));
    assert_eq!(info.database_provider, "sqlite");
    assert_eq!(info.cache_provider, "memory");
    assert!(!info.database_version.is_empty());
    assert_eq!(
        info.database_migration,
        ctx.services.migrations.latest().await.unwrap()
    );
}

#[tokio::test]
async fn test_application_info_first_call_upserts_then_caches() {
    let ctx = create_test_context().await.unwrap();
    let service = &ctx.services.application_info;
    let repo = ctx
        .repositories
        .get_repository::<ApplicationInfo>()
        .unwrap();

    assert!(repo.delete_many(&Filter::new()).await.unwrap());
    service.invalidate();

    let first = service.get_application_info().await.unwrap();
    assert_eq!(repo.count(&Filter::new()).await.unwrap(), 1);

    // 存储被清空后仍从缓存返回
    repo.delete_many(&Filter::new()).await.unwrap();
    let second = service.get_application_info().await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(repo.count(&Filter::new()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_concurrent_first_reads_load_once() {
    let ctx = create_test_context().await.unwrap();
    let service = &ctx.services.application_info;
    let repo = ctx
        .repositories
        .get_repository::<ApplicationInfo>()
        .unwrap();

    repo.delete_many(&Filter::new()).await.unwrap();
    service.invalidate();

    let results = join_all((0..16).map(|_| service.get_application_info())).await;
    let infos: Vec<Arc<ApplicationInfo>> = results.into_iter().map(Result::unwrap).collect();

    assert!(infos.iter().all(|info| Arc::ptr_eq(info, &infos[0])));
    assert_eq!(repo.count(&Filter::new()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_set_application_info_keeps_single_row() {
    let ctx = create_test_context().await.unwrap();
    let service = &ctx.services.application_info;
    let before = service.get_application_info().await.unwrap();

    let after = service.set_application_info().await.unwrap();
    assert_eq!(after.id, before.id);
    assert!(after.updated_at > before.updated_at);

    let repo = ctx
        .repositories
        .get_repository::<ApplicationInfo>()
        .unwrap();
    assert_eq!(repo.count(&Filter::new()).await.unwrap(), 1);
    let cached = service.get_application_info().await.unwrap();
    assert!(Arc::ptr_eq(&after, &cached));
}

#[tokio::test]
async fn test_rebootstrap_on_file_database_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config();
    config.storage.url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("admin.db").display()
    );

    let first = AppContext::bootstrap(config.clone()).await.unwrap();
    let first_info = first.services.application_info.get_application_info().await.unwrap();
    first.shutdown().await.unwrap();

    let second = AppContext::bootstrap(config).await.unwrap();
    let migrations = second.services.migrations.find_many(&Filter::new()).await.unwrap();
    assert_eq!(migrations.len(), 7);

    let second_info = second.services.application_info.get_application_info().await.unwrap();
    assert_eq!(second_info.id, first_info.id);
    second.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_provider_fails_at_construction() {
    let config = StorageConfig {
        provider: "cassandra".to_string(),
        ..StorageConfig::default()
    };
    assert!(create_provider(&config).is_err());

    let app = AppConfig {
        storage: config,
        ..AppConfig::default()
    };
    assert!(app.validate().is_err());
}

#[tokio::test]
async fn test_provider_before_connect_fails_soft() {
    let provider = create_provider(&test_config().storage).unwrap();
    assert!(!provider.is_connected());
    assert!(provider.get_database().is_err());
    assert!(provider.ping().await.is_err());
    assert_eq!(provider.get_database_name().await, "");
    provider.close().await.unwrap();
}
