//! # 实体定义测试

use sea_orm::{ActiveEnum, EntityName, Iterable, Set};
use serde_json::json;

use crate::common::{SelectOption, SelectOptions, SettingType, SettingValue, StringList};
use crate::{menus, permissions, roles, settings, users};

#[tokio::test]
async fn test_entity_creation() {
    let user = users::ActiveModel {
        id: Set("u-1".to_string()),
        email: Set("alice@example.com".to_string()),
        username: Set("alice".to_string()),
        roles: Set(StringList(vec!["admin".to_string()])),
        is_active: Set(true),
        ..Default::default()
    };

    assert_eq!(user.username.as_ref(), "alice");
    assert_eq!(user.email.as_ref(), "alice@example.com");
    assert!(user.roles.as_ref().contains("admin"));
}

#[test]
fn test_table_names() {
    assert_eq!(users::Entity.table_name(), "users");
    assert_eq!(roles::Entity.table_name(), "roles");
    assert_eq!(permissions::Entity.table_name(), "permissions");
    assert_eq!(menus::Entity.table_name(), "menus");
    assert_eq!(settings::Entity.table_name(), "settings");
}

#[test]
fn test_permission_columns_include_operation_flags() {
    let names: Vec<String> = permissions::Column::iter()
        .map(|c| sea_orm::IdenStatic::as_str(&c).to_string())
        .collect();
    for flag in ["create", "read", "change", "delete", "administer", "is_active"] {
        assert!(names.iter().any(|n| n == flag), "missing column {flag}");
    }
}

#[test]
fn test_setting_type_wire_names() {
    assert_eq!(SettingType::MultiSelect.to_value(), "multiSelect");
    assert_eq!(SettingType::Text.to_value(), "string");
    assert_eq!(
        serde_json::to_value(SettingType::MultiSelect).unwrap(),
        json!("multiSelect")
    );
    let parsed: SettingType = serde_json::from_value(json!("boolean")).unwrap();
    assert_eq!(parsed, SettingType::Boolean);
    assert!(SettingType::Select.is_select_like());
    assert!(!SettingType::Int.is_select_like());
}

#[test]
fn test_setting_value_untagged() {
    let values: Vec<SettingValue> =
        serde_json::from_value(json!([true, 42, "dark", ["a", "b"]])).unwrap();
    assert_eq!(values[0], SettingValue::Bool(true));
    assert_eq!(values[1], SettingValue::Int(42));
    assert_eq!(values[2], SettingValue::Text("dark".to_string()));
    assert_eq!(
        values[3],
        SettingValue::List(vec!["a".to_string(), "b".to_string()])
    );
}

#[test]
fn test_select_options_transparent() {
    let options = SelectOptions(vec![SelectOption {
        value: "en".to_string(),
        label: "English".to_string(),
    }]);
    assert_eq!(
        serde_json::to_value(&options).unwrap(),
        json!([{ "value": "en", "label": "English" }])
    );
}
