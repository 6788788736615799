//! 记录构造与部分更新的合并逻辑，两种后端共用

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::Record;
use crate::error::{AdminError, Result};

/// 更新时不可被覆盖的字段
const IMMUTABLE_FIELDS: &[&str] = &["id", "created_at", "created_by"];

/// 当前时间，截断到微秒以保证各后端往返一致
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// 严格晚于 `previous` 的新时间戳
#[must_use]
pub fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now();
    let floor = previous + Duration::microseconds(1);
    if now > previous { now } else { floor }
}

/// 生成新的记录 ID
#[must_use]
pub fn new_id() -> String {
    Uuid::now_v7().to_string()
}

fn to_object<S: Serialize>(value: &S) -> Result<Map<String, Value>> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(AdminError::internal(format!(
            "记录载荷必须序列化为对象，实际为: {other}"
        ))),
    }
}

/// 由创建载荷构造完整记录：补齐 ID 与审计字段
pub fn build_record<T: Record>(data: &T::Create) -> Result<T> {
    let mut object = to_object(data)?;
    let id = match object.get("id") {
        Some(Value::String(id)) if !id.trim().is_empty() => id.clone(),
        _ => new_id(),
    };
    let timestamp = serde_json::to_value(now())?;
    let created_by = object.get("created_by").cloned().unwrap_or(Value::Null);

    object.insert("id".to_string(), Value::String(id));
    object.insert("created_at".to_string(), timestamp.clone());
    object.insert("updated_at".to_string(), timestamp);
    object.insert("created_by".to_string(), created_by.clone());
    object.insert("updated_by".to_string(), created_by);

    Ok(serde_json::from_value(Value::Object(object))?)
}

/// 将部分更新合并到当前记录，并推进 `updated_at`
pub fn apply_patch<T: Record>(current: &T, patch: &T::Update) -> Result<T> {
    let mut object = to_object(current)?;
    for (key, value) in to_object(patch)? {
        if IMMUTABLE_FIELDS.contains(&key.as_str()) {
            continue;
        }
        object.insert(key, value);
    }
    object.insert(
        "updated_at".to_string(),
        serde_json::to_value(next_timestamp(current.updated_at()))?,
    );
    Ok(serde_json::from_value(Value::Object(object))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateRole, UpdateRole};
    use entity::roles;

    #[test]
    fn test_build_record_assigns_id_and_audit_fields() {
        let role: roles::Model = build_record::<roles::Model>(&CreateRole {
            name: "admin".to_string(),
            created_by: Some("root".to_string()),
            ..CreateRole::default()
        })
        .unwrap();

        assert!(!role.id.is_empty());
        assert_eq!(role.created_at, role.updated_at);
        assert_eq!(role.updated_by.as_deref(), Some("root"));
        assert!(role.is_active);
    }

    #[test]
    fn test_build_record_keeps_supplied_id() {
        let role: roles::Model = build_record::<roles::Model>(&CreateRole {
            id: Some("fixed-id".to_string()),
            name: "ops".to_string(),
            ..CreateRole::default()
        })
        .unwrap();
        assert_eq!(role.id, "fixed-id");
    }

    #[test]
    fn test_apply_patch_touches_only_given_fields() {
        let role: roles::Model = build_record::<roles::Model>(&CreateRole {
            name: "admin".to_string(),
            description: Some("all access".to_string()),
            ..CreateRole::default()
        })
        .unwrap();

        let patched = apply_patch(
            &role,
            &UpdateRole {
                is_active: Some(false),
                updated_by: Some("alice".to_string()),
                ..UpdateRole::default()
            },
        )
        .unwrap();

        assert_eq!(patched.id, role.id);
        assert_eq!(patched.name, "admin");
        assert_eq!(patched.description.as_deref(), Some("all access"));
        assert!(!patched.is_active);
        assert_eq!(patched.created_at, role.created_at);
        assert!(patched.updated_at > role.updated_at);
        assert_eq!(patched.updated_by.as_deref(), Some("alice"));
    }

    #[test]
    fn test_next_timestamp_strictly_increases() {
        let future = now() + Duration::seconds(5);
        assert!(next_timestamp(future) > future);
    }
}
