//! 系统设置服务

use std::ops::Deref;
use std::sync::Arc;

use super::base::EntityService;
use crate::error::{AdminError, Result};
use crate::models::{CreateSetting, SelectOptions, Setting, SettingType, UpdateSetting};
use crate::repository::{Filter, Repository};

pub struct SettingService {
    base: EntityService<Setting>,
}

impl Deref for SettingService {
    type Target = EntityService<Setting>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl SettingService {
    #[must_use]
    pub fn new(repository: Arc<dyn Repository<Setting>>) -> Self {
        Self {
            base: EntityService::new(repository),
        }
    }

    pub async fn create(&self, data: CreateSetting) -> Result<Setting> {
        crate::ensure_validation!(!data.name.trim().is_empty(), "name", "设置名不能为空");
        validate_options(data.setting_type, data.options.as_ref())?;
        self.ensure_unique(
            &data.name,
            data.group.as_deref(),
            data.section.as_deref(),
            None,
        )
        .await?;
        self.base.create(data).await
    }

    pub async fn update(&self, id: &str, data: UpdateSetting) -> Result<Option<Setting>> {
        let touches_key = data.name.is_some() || data.group.is_some() || data.section.is_some();
        let touches_type = data.setting_type.is_some() || data.options.is_some();

        if touches_key || touches_type {
            let Some(current) = self.base.get(id).await? else {
                return Ok(None);
            };
            if touches_type {
                let setting_type = data.setting_type.unwrap_or(current.setting_type);
                let options = data.options.as_ref().or(current.options.as_ref());
                validate_options(setting_type, options)?;
            }
            if touches_key {
                let name = data.name.as_deref().unwrap_or(&current.name);
                crate::ensure_validation!(!name.trim().is_empty(), "name", "设置名不能为空");
                let group = data
                    .group
                    .as_ref()
                    .map_or(current.group.as_deref(), Option::as_deref);
                let section = data
                    .section
                    .as_ref()
                    .map_or(current.section.as_deref(), Option::as_deref);
                self.ensure_unique(name, group, section, Some(id)).await?;
            }
        }
        self.base.update(id, data).await
    }

    /// 未分组、未分节的设置
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Setting>> {
        self.get_by_key(name, None, None).await
    }

    /// 按完整键查找，缺省的分组或分节匹配空值
    pub async fn get_by_key(
        &self,
        name: &str,
        group: Option<&str>,
        section: Option<&str>,
    ) -> Result<Option<Setting>> {
        self.base.find_one(&key_filter(name, group, section)).await
    }

    pub async fn get_by_group(&self, group: &str) -> Result<Vec<Setting>> {
        self.base.find_many(&Filter::new().eq("group", group)).await
    }

    pub async fn get_by_section(&self, section: &str) -> Result<Vec<Setting>> {
        self.base
            .find_many(&Filter::new().eq("section", section))
            .await
    }

    pub async fn get_by_group_and_section(
        &self,
        group: &str,
        section: &str,
    ) -> Result<Vec<Setting>> {
        self.base
            .find_many(&Filter::new().eq("group", group).eq("section", section))
            .await
    }

    pub async fn get_public_settings(&self) -> Result<Vec<Setting>> {
        self.base.find_many(&Filter::new().eq("public", true)).await
    }

    async fn ensure_unique(
        &self,
        name: &str,
        group: Option<&str>,
        section: Option<&str>,
        except_id: Option<&str>,
    ) -> Result<()> {
        if self
            .base
            .is_taken(&key_filter(name, group, section), except_id)
            .await?
        {
            return Err(AdminError::conflict(
                "settings",
                "name/group/section",
                format!(
                    "{name}/{}/{}",
                    group.unwrap_or_default(),
                    section.unwrap_or_default()
                ),
            ));
        }
        Ok(())
    }
}

fn key_filter(name: &str, group: Option<&str>, section: Option<&str>) -> Filter {
    let filter = Filter::new().eq("name", name);
    let filter = match group {
        Some(group) => filter.eq("group", group),
        None => filter.is_null("group"),
    };
    match section {
        Some(section) => filter.eq("section", section),
        None => filter.is_null("section"),
    }
}

fn validate_options(setting_type: SettingType, options: Option<&SelectOptions>) -> Result<()> {
    if setting_type.is_select_like() && options.is_none_or(|o| o.0.is_empty()) {
        return Err(AdminError::validation(
            "选择类设置必须提供可选项",
            Some("options"),
        ));
    }
    Ok(())
}
