//! # 系统设置集成测试

use admin_hub::models::{CreateSetting, Setting, SettingType, SettingValue, UpdateSetting};
use admin_hub::repository::Filter;
use admin_hub::testing::{create_test_context, select_setting_payload, setting_payload};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_group_section_and_public_lookups() {
    let ctx = create_test_context().await.unwrap();
    let settings = &ctx.services.settings;

    settings
        .create(setting_payload("theme", Some("ui"), Some("appearance")))
        .await
        .unwrap();
    settings
        .create(setting_payload("font_size", Some("ui"), Some("typography")))
        .await
        .unwrap();
    settings
        .create(setting_payload("smtp_host", Some("mail"), Some("appearance")))
        .await
        .unwrap();
    settings
        .create(CreateSetting {
            public: true,
            ..setting_payload("site_name", None, None)
        })
        .await
        .unwrap();

    assert_eq!(settings.get_by_group("ui").await.unwrap().len(), 2);
    assert_eq!(settings.get_by_section("appearance").await.unwrap().len(), 2);

    let scoped = settings
        .get_by_group_and_section("ui", "appearance")
        .await
        .unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].name, "theme");

    let public: Vec<String> = settings
        .get_public_settings()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(public, vec!["site_name".to_string()]);

    let by_name = settings.get_by_name("site_name").await.unwrap().unwrap();
    assert_eq!(by_name.value, Some(SettingValue::Text("site_name-value".to_string())));
    assert!(settings.get_by_name("theme").await.unwrap().is_none());
}

#[tokio::test]
async fn test_name_group_section_unique() {
    let ctx = create_test_context().await.unwrap();
    let settings = &ctx.services.settings;

    settings.create(setting_payload("theme", Some("ui"), None)).await.unwrap();
    settings.create(setting_payload("theme", Some("mail"), None)).await.unwrap();
    settings.create(setting_payload("theme", None, None)).await.unwrap();

    let err = settings
        .create(setting_payload("theme", Some("ui"), None))
        .await
        .unwrap_err();
    assert!(err.is_conflict());
    assert!(err.to_string().contains("name/group/section"));

    let err = settings
        .create(setting_payload("theme", None, None))
        .await
        .unwrap_err();
    assert!(err.is_conflict());
}

#[tokio::test]
async fn test_select_requires_options() {
    let ctx = create_test_context().await.unwrap();
    let settings = &ctx.services.settings;

    let err = settings
        .create(CreateSetting {
            setting_type: SettingType::Select,
            ..setting_payload("language", None, None)
        })
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let created = settings
        .create(select_setting_payload("language", &["en", "zh"]))
        .await
        .unwrap();
    assert_eq!(created.options.as_ref().map(|o| o.0.len()), Some(2));

    let err = settings
        .update(
            &created.id,
            UpdateSetting {
                setting_type: Some(SettingType::MultiSelect),
                options: Some(Default::default()),
                ..UpdateSetting::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn test_value_variants_and_clearing() {
    let ctx = create_test_context().await.unwrap();
    let settings = &ctx.services.settings;

    let flag = settings
        .create(CreateSetting {
            setting_type: SettingType::Boolean,
            value: Some(SettingValue::Bool(true)),
            ..setting_payload("maintenance", Some("system"), None)
        })
        .await
        .unwrap();
    assert_eq!(
        settings.get(&flag.id).await.unwrap().unwrap().value,
        Some(SettingValue::Bool(true))
    );

    let list = settings
        .update(
            &flag.id,
            UpdateSetting {
                value: Some(Some(SettingValue::List(vec!["a".into(), "b".into()]))),
                ..UpdateSetting::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        list.value,
        Some(SettingValue::List(vec!["a".to_string(), "b".to_string()]))
    );

    let cleared = settings
        .update(
            &flag.id,
            UpdateSetting {
                value: Some(None),
                ..UpdateSetting::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cleared.value, None);
}

#[tokio::test]
async fn test_store_rejects_duplicate_ungrouped_setting() {
    let ctx = create_test_context().await.unwrap();
    let repo = ctx.repositories.get_repository::<Setting>().unwrap();

    repo.insert_one(setting_payload("site_name", None, None))
        .await
        .unwrap();
    let err = repo
        .insert_one(setting_payload("site_name", None, None))
        .await
        .unwrap_err();
    assert!(err.is_conflict());

    repo.insert_one(setting_payload("site_name", Some("ui"), None))
        .await
        .unwrap();
    let err = repo
        .insert_one(setting_payload("site_name", Some("ui"), None))
        .await
        .unwrap_err();
    assert!(err.is_conflict());

    let total = repo
        .count(&Filter::new().eq("name", "site_name"))
        .await
        .unwrap();
    assert_eq!(total, 2);
}

#[tokio::test]
async fn test_concurrent_creates_keep_single_setting() {
    let ctx = create_test_context().await.unwrap();
    let settings = &ctx.services.settings;

    let (first, second) = tokio::join!(
        settings.create(setting_payload("site_name", None, None)),
        settings.create(setting_payload("site_name", None, None)),
    );

    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(admin_hub::AdminError::is_conflict)
    );
    assert_eq!(
        settings
            .count(&Filter::new().eq("name", "site_name"))
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn test_update_clears_group_and_section() {
    let ctx = create_test_context().await.unwrap();
    let settings = &ctx.services.settings;

    let scoped = settings
        .create(setting_payload("theme", Some("ui"), Some("appearance")))
        .await
        .unwrap();

    let moved = settings
        .update(
            &scoped.id,
            UpdateSetting {
                group: Some(None),
                section: Some(None),
                ..UpdateSetting::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.group, None);
    assert_eq!(moved.section, None);
    assert_eq!(settings.get_by_name("theme").await.unwrap().unwrap().id, scoped.id);

    let again = settings
        .create(setting_payload("theme", Some("ui"), Some("appearance")))
        .await
        .unwrap();
    let err = settings
        .update(
            &again.id,
            UpdateSetting {
                group: Some(None),
                section: Some(None),
                ..UpdateSetting::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_conflict());
}

#[tokio::test]
async fn test_get_by_key_matches_missing_parts_as_empty() {
    let ctx = create_test_context().await.unwrap();
    let settings = &ctx.services.settings;

    let ungrouped = settings.create(setting_payload("theme", None, None)).await.unwrap();
    let grouped = settings
        .create(setting_payload("theme", Some("ui"), None))
        .await
        .unwrap();
    let scoped = settings
        .create(setting_payload("theme", Some("ui"), Some("appearance")))
        .await
        .unwrap();

    let lookup = [
        (None, None, Some(ungrouped.id)),
        (Some("ui"), None, Some(grouped.id)),
        (Some("ui"), Some("appearance"), Some(scoped.id)),
        (None, Some("appearance"), None),
    ];
    for (group, section, expected) in lookup {
        let found = settings.get_by_key("theme", group, section).await.unwrap();
        assert_eq!(found.map(|s| s.id), expected);
    }
}
