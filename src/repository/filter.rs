//! 字段等值过滤条件
//!
//! 同一个 `Filter` 可以转换为 Sea-ORM 条件或 BSON 查询文档，`id` 在文档型存储中映射为 `_id`。

use mongodb::bson::{Bson, Document};
use sea_orm::{ColumnTrait, Condition, EntityTrait};
use std::fmt;
use std::str::FromStr;

use crate::error::{AdminError, Result};

/// 过滤值
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for FilterValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl<T: Into<Self>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// 等值条件的合取，空过滤匹配全部记录
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<(String, FilterValue)>,
}

impl Filter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `field = value`
    #[must_use]
    pub fn eq(mut self, field: &str, value: impl Into<FilterValue>) -> Self {
        self.conditions.push((field.to_string(), value.into()));
        self
    }

    /// `field IS NULL`
    #[must_use]
    pub fn is_null(self, field: &str) -> Self {
        self.eq(field, FilterValue::Null)
    }

    #[must_use]
    pub fn by_id(id: &str) -> Self {
        Self::new().eq("id", id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    #[must_use]
    pub fn conditions(&self) -> &[(String, FilterValue)] {
        &self.conditions
    }

    /// 转换为 Sea-ORM 条件，未知字段返回校验错误
    pub fn to_condition<E: EntityTrait>(&self) -> Result<Condition> {
        let mut condition = Condition::all();
        for (field, value) in &self.conditions {
            let column = E::Column::from_str(field).map_err(|_| {
                AdminError::validation(format!("未知的过滤字段: {field}"), Some(field))
            })?;
            condition = condition.add(match value {
                FilterValue::Null => column.is_null(),
                FilterValue::Bool(b) => column.eq(*b),
                FilterValue::Int(i) => column.eq(*i),
                FilterValue::Text(s) => column.eq(s.clone()),
            });
        }
        Ok(condition)
    }

    /// 转换为 BSON 查询文档
    #[must_use]
    pub fn to_document(&self) -> Document {
        let mut document = Document::new();
        for (field, value) in &self.conditions {
            let key = if field == "id" { "_id" } else { field.as_str() };
            let bson = match value {
                FilterValue::Null => Bson::Null,
                FilterValue::Bool(b) => Bson::Boolean(*b),
                FilterValue::Int(i) => Bson::Int64(*i),
                FilterValue::Text(s) => Bson::String(s.clone()),
            };
            document.insert(key, bson);
        }
        document
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conditions.is_empty() {
            return f.write_str("{}");
        }
        f.write_str("{")?;
        for (i, (field, value)) in self.conditions.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match value {
                FilterValue::Null => write!(f, "{field}: null")?,
                FilterValue::Bool(b) => write!(f, "{field}: {b}")?,
                FilterValue::Int(n) => write!(f, "{field}: {n}")?,
                FilterValue::Text(s) => write!(f, "{field}: {s:?}")?,
            }
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;
    use sea_orm::{DbBackend, QueryFilter, QueryTrait};

    #[test]
    fn test_to_document_maps_id() {
        let filter = Filter::by_id("abc").eq("is_active", true).is_null("parent_id");
        assert_eq!(
            filter.to_document(),
            doc! { "_id": "abc", "is_active": true, "parent_id": null }
        );
    }

    #[test]
    fn test_display() {
        let filter = Filter::new().eq("name", "admin").eq("sorter", 3);
        assert_eq!(filter.to_string(), r#"{name: "admin", sorter: 3}"#);
        assert_eq!(Filter::new().to_string(), "{}");
    }

    #[test]
    fn test_option_into_filter_value() {
        let group: Option<String> = None;
        let filter = Filter::new().eq("group", group);
        assert_eq!(filter.conditions()[0].1, FilterValue::Null);
    }

    #[test]
    fn test_to_condition_builds_sql() {
        let filter = Filter::new().eq("name", "admin").is_null("description");
        let condition = filter.to_condition::<entity::roles::Entity>().unwrap();
        let sql = entity::roles::Entity::find()
            .filter(condition)
            .build(DbBackend::Sqlite)
            .to_string();
        assert!(sql.contains(r#""roles"."name" = 'admin'"#), "{sql}");
        assert!(sql.contains(r#""roles"."description" IS NULL"#), "{sql}");
    }

    #[test]
    fn test_to_condition_rejects_unknown_field() {
        let err = Filter::new()
            .eq("nope", 1)
            .to_condition::<entity::roles::Entity>()
            .unwrap_err();
        assert!(err.is_validation());
    }
}
