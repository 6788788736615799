//! 菜单载荷与菜单树节点

use serde::{Deserialize, Serialize};

use super::Menu;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMenu {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub path: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub component: Option<String>,
    #[serde(default)]
    pub redirect: Option<String>,
    #[serde(default = "super::default_true")]
    pub layout: bool,
    #[serde(default)]
    pub exact: Option<bool>,
    #[serde(default)]
    pub sort_order: Option<i32>,
    #[serde(default)]
    pub hide_in_menu: bool,
    #[serde(default)]
    pub hide_children_in_menu: bool,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub authority: Vec<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

impl Default for CreateMenu {
    fn default() -> Self {
        Self {
            id: None,
            path: String::new(),
            parent_id: None,
            name: None,
            icon: None,
            component: None,
            redirect: None,
            layout: true,
            exact: None,
            sort_order: None,
            hide_in_menu: false,
            hide_children_in_menu: false,
            is_active: true,
            authority: Vec::new(),
            created_by: None,
        }
    }
}

/// 部分更新菜单；`parent_id: Some(None)` 表示移动到根级
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMenu {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub parent_id: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_in_menu: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_children_in_menu: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

/// 菜单树节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuNode {
    #[serde(flatten)]
    pub menu: Menu,
    pub children: Vec<MenuNode>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_menu_parent_tristate() {
        let untouched: UpdateMenu = serde_json::from_value(json!({ "name": "x" })).unwrap();
        assert_eq!(untouched.parent_id, None);
        assert!(!serde_json::to_value(&untouched).unwrap().as_object().unwrap().contains_key("parent_id"));

        let cleared: UpdateMenu = serde_json::from_value(json!({ "parent_id": null })).unwrap();
        assert_eq!(cleared.parent_id, Some(None));
        assert_eq!(serde_json::to_value(&cleared).unwrap()["parent_id"], json!(null));

        let moved: UpdateMenu = serde_json::from_value(json!({ "parent_id": "m1" })).unwrap();
        assert_eq!(moved.parent_id, Some(Some("m1".to_string())));
    }
}
