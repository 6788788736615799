//! # 用户服务
//!
//! 密码在入库前哈希，邮箱与用户名唯一，头像缺省时由邮箱推导。

use std::ops::Deref;
use std::sync::Arc;

use tracing::{debug, info};

use super::avatar::avatar_url;
use super::base::EntityService;
use crate::error::{AdminError, Result};
use crate::models::{CreateUser, UpdateUser, User};
use crate::repository::{Filter, Repository, now};

pub struct UserService {
    base: EntityService<User>,
    bcrypt_cost: u32,
}

impl Deref for UserService {
    type Target = EntityService<User>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl UserService {
    #[must_use]
    pub fn new(repository: Arc<dyn Repository<User>>, bcrypt_cost: u32) -> Self {
        Self {
            base: EntityService::new(repository),
            bcrypt_cost,
        }
    }

    /// 创建用户
    pub async fn create(&self, mut data: CreateUser) -> Result<User> {
        crate::ensure_validation!(!data.email.trim().is_empty(), "email", "邮箱不能为空");
        crate::ensure_validation!(!data.username.trim().is_empty(), "username", "用户名不能为空");
        crate::ensure_validation!(!data.password.is_empty(), "password", "密码不能为空");

        self.ensure_unique("email", &data.email, None).await?;
        self.ensure_unique("username", &data.username, None).await?;

        data.password = self.hash_password(&data.password).await?;
        data.password_changed_at = Some(now());
        if data.avatar.as_deref().is_none_or(|a| a.trim().is_empty()) {
            data.avatar = Some(avatar_url(&data.email, &data.username));
        }

        let user = self.base.create(data).await?;
        info!(user_id = %user.id, username = %user.username, "用户已创建");
        Ok(user)
    }

    /// 部分更新用户，提供新密码时重新哈希
    pub async fn update(&self, id: &str, mut data: UpdateUser) -> Result<Option<User>> {
        if let Some(email) = &data.email {
            self.ensure_unique("email", email, Some(id)).await?;
        }
        if let Some(username) = &data.username {
            self.ensure_unique("username", username, Some(id)).await?;
        }
        if let Some(password) = data.password.take() {
            crate::ensure_validation!(!password.is_empty(), "password", "密码不能为空");
            data.password = Some(self.hash_password(&password).await?);
            data.password_changed_at = Some(now());
        }
        self.base.update(id, data).await
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        self.base.find_one(&Filter::new().eq("email", email)).await
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        self.base
            .find_one(&Filter::new().eq("username", username))
            .await
    }

    /// 追加角色，已拥有时原样返回
    pub async fn add_role(&self, id: &str, role: &str) -> Result<User> {
        let user = self.require(id).await?;
        if user.roles.contains(role) {
            debug!(user_id = %id, role = %role, "用户已拥有该角色");
            return Ok(user);
        }

        let mut roles = user.roles.0.clone();
        roles.push(role.to_string());
        self.replace_roles(id, roles).await
    }

    /// 移除角色，未拥有时原样返回
    pub async fn remove_role(&self, id: &str, role: &str) -> Result<User> {
        let user = self.require(id).await?;
        if !user.roles.contains(role) {
            debug!(user_id = %id, role = %role, "用户未拥有该角色");
            return Ok(user);
        }

        let roles = user.roles.0.iter().filter(|r| *r != role).cloned().collect();
        self.replace_roles(id, roles).await
    }

    /// 校验明文密码
    pub async fn verify_password(&self, user: &User, candidate: &str) -> Result<bool> {
        let hash = user.password.clone();
        let candidate = candidate.to_string();
        tokio::task::spawn_blocking(move || bcrypt::verify(candidate, &hash))
            .await
            .map_err(|e| AdminError::internal_with_source("密码校验任务失败", e))?
            .map_err(AdminError::from)
    }

    /// 记录登录时间与来源地址
    pub async fn record_login(&self, id: &str, ip_address: Option<String>) -> Result<Option<User>> {
        let data = UpdateUser {
            last_login: Some(now()),
            last_ip_address: ip_address,
            ..UpdateUser::default()
        };
        self.base.update(id, data).await
    }

    async fn require(&self, id: &str) -> Result<User> {
        self.base
            .get(id)
            .await?
            .ok_or_else(|| AdminError::not_found("user", id))
    }

    async fn replace_roles(&self, id: &str, roles: Vec<String>) -> Result<User> {
        let data = UpdateUser {
            roles: Some(roles),
            ..UpdateUser::default()
        };
        self.base
            .update(id, data)
            .await?
            .ok_or_else(|| AdminError::not_found("user", id))
    }

    async fn ensure_unique(&self, field: &str, value: &str, except_id: Option<&str>) -> Result<()> {
        if self
            .base
            .is_taken(&Filter::new().eq(field, value), except_id)
            .await?
        {
            return Err(AdminError::conflict("users", field, value));
        }
        Ok(())
    }

    async fn hash_password(&self, password: &str) -> Result<String> {
        let cost = self.bcrypt_cost;
        let password = password.to_string();
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AdminError::internal_with_source("密码哈希任务失败", e))?
            .map_err(AdminError::from)
    }
}
