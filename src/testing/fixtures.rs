//! # 测试数据 Fixtures
//!
//! 提供创建载荷的预设数据

use crate::models::{
    CreateMenu, CreatePermission, CreateRole, CreateSetting, CreateUser, SelectOption,
    SelectOptions, SettingType, SettingValue,
};

/// 用户测试数据构建器
pub struct UserFixture {
    data: CreateUser,
}

impl Default for UserFixture {
    fn default() -> Self {
        Self {
            data: CreateUser {
                email: "test@example.com".to_string(),
                username: "test_user".to_string(),
                password: "password123".to_string(),
                first_name: "Test".to_string(),
                last_name: "User".to_string(),
                ..CreateUser::default()
            },
        }
    }
}

impl UserFixture {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 以同一前缀设置用户名与邮箱
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.data.username = name.to_string();
        self.data.email = format!("{name}@example.com");
        self
    }

    #[must_use]
    pub fn password(mut self, password: &str) -> Self {
        self.data.password = password.to_string();
        self
    }

    #[must_use]
    pub fn roles(mut self, roles: &[&str]) -> Self {
        self.data.roles = roles.iter().map(|r| (*r).to_string()).collect();
        self
    }

    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.data.is_active = false;
        self
    }

    #[must_use]
    pub fn build(self) -> CreateUser {
        self.data
    }
}

#[must_use]
pub fn role_payload(name: &str) -> CreateRole {
    CreateRole {
        name: name.to_string(),
        description: Some(format!("{name} role")),
        ..CreateRole::default()
    }
}

#[must_use]
pub fn menu_payload(path: &str, parent_id: Option<&str>, sort_order: Option<i32>) -> CreateMenu {
    CreateMenu {
        path: path.to_string(),
        parent_id: parent_id.map(str::to_string),
        name: Some(path.trim_start_matches('/').replace('/', ".")),
        sort_order,
        ..CreateMenu::default()
    }
}

/// 仅开放读取的权限
#[must_use]
pub fn read_permission(function_id: &str, role_id: &str) -> CreatePermission {
    CreatePermission {
        function_id: function_id.to_string(),
        role_id: role_id.to_string(),
        read: true,
        ..CreatePermission::default()
    }
}

#[must_use]
pub fn setting_payload(name: &str, group: Option<&str>, section: Option<&str>) -> CreateSetting {
    CreateSetting {
        name: name.to_string(),
        setting_type: SettingType::Text,
        value: Some(SettingValue::Text(format!("{name}-value"))),
        group: group.map(str::to_string),
        section: section.map(str::to_string),
        ..CreateSetting::default()
    }
}

#[must_use]
pub fn select_setting_payload(name: &str, choices: &[&str]) -> CreateSetting {
    CreateSetting {
        name: name.to_string(),
        setting_type: SettingType::Select,
        options: Some(SelectOptions(
            choices
                .iter()
                .map(|c| SelectOption {
                    value: (*c).to_string(),
                    label: c.to_uppercase(),
                })
                .collect(),
        )),
        ..CreateSetting::default()
    }
}
