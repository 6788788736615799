//! # 菜单服务
//!
//! 菜单只保存 `parent_id`，树形结构在读取时构建。
//! 修改父级时自新父级向上遍历，拒绝形成环。

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::ops::Deref;
use std::sync::Arc;

use tracing::debug;

use super::PermissionService;
use super::base::EntityService;
use crate::error::{AdminError, Result};
use crate::models::{CreateMenu, Menu, MenuNode, UpdateMenu};
use crate::repository::{Filter, Repository};

pub struct MenuService {
    base: EntityService<Menu>,
    permissions: Arc<PermissionService>,
}

impl Deref for MenuService {
    type Target = EntityService<Menu>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl MenuService {
    #[must_use]
    pub fn new(
        repository: Arc<dyn Repository<Menu>>,
        permissions: Arc<PermissionService>,
    ) -> Self {
        Self {
            base: EntityService::new(repository),
            permissions,
        }
    }

    pub async fn create(&self, data: CreateMenu) -> Result<Menu> {
        crate::ensure_validation!(!data.path.trim().is_empty(), "path", "菜单路径不能为空");
        self.ensure_unique_path(&data.path, None).await?;
        if let Some(parent_id) = &data.parent_id {
            self.ensure_parent_exists(parent_id).await?;
        }
        self.base.create(data).await
    }

    pub async fn update(&self, id: &str, data: UpdateMenu) -> Result<Option<Menu>> {
        if let Some(path) = &data.path {
            crate::ensure_validation!(!path.trim().is_empty(), "path", "菜单路径不能为空");
            self.ensure_unique_path(path, Some(id)).await?;
        }
        if let Some(Some(parent_id)) = &data.parent_id {
            self.ensure_parent_exists(parent_id).await?;
            self.ensure_no_cycle(id, parent_id).await?;
        }
        self.base.update(id, data).await
    }

    pub async fn get_by_path(&self, path: &str) -> Result<Option<Menu>> {
        self.base.find_one(&Filter::new().eq("path", path)).await
    }

    pub async fn get_by_parent_id(&self, parent_id: &str) -> Result<Vec<Menu>> {
        self.base
            .find_many(&Filter::new().eq("parent_id", parent_id))
            .await
    }

    pub async fn get_root_menus(&self) -> Result<Vec<Menu>> {
        self.base
            .find_many(&Filter::new().is_null("parent_id"))
            .await
    }

    /// 角色有效权限对应的菜单，按排序号与路径排列
    pub async fn get_menus_by_role(&self, role_id: &str) -> Result<Vec<Menu>> {
        let permissions = self.permissions.get_active_by_role(role_id).await?;

        let mut seen = HashSet::new();
        let mut menus = Vec::new();
        for permission in permissions {
            if !seen.insert(permission.function_id.clone()) {
                continue;
            }
            match self.base.get(&permission.function_id).await? {
                Some(menu) => menus.push(menu),
                None => debug!(
                    role_id = %role_id,
                    function_id = %permission.function_id,
                    "权限指向的菜单不存在，跳过"
                ),
            }
        }

        menus.sort_by(menu_order);
        Ok(menus)
    }

    /// 全部菜单组成的树；父级不存在的菜单视为根
    pub async fn get_tree(&self) -> Result<Vec<MenuNode>> {
        let menus = self.base.find_many(&Filter::new()).await?;
        Ok(build_tree(menus))
    }

    async fn ensure_unique_path(&self, path: &str, except_id: Option<&str>) -> Result<()> {
        if self
            .base
            .is_taken(&Filter::new().eq("path", path), except_id)
            .await?
        {
            return Err(AdminError::conflict("menus", "path", path));
        }
        Ok(())
    }

    async fn ensure_parent_exists(&self, parent_id: &str) -> Result<()> {
        if self.base.get(parent_id).await?.is_none() {
            return Err(AdminError::validation(
                format!("父级菜单不存在: {parent_id}"),
                Some("parent_id"),
            ));
        }
        Ok(())
    }

    async fn ensure_no_cycle(&self, id: &str, new_parent_id: &str) -> Result<()> {
        let mut visited = HashSet::new();
        let mut cursor = Some(new_parent_id.to_string());

        while let Some(current) = cursor {
            if current == id {
                return Err(AdminError::validation(
                    "菜单不能成为自身或其子菜单的子级",
                    Some("parent_id"),
                ));
            }
            if !visited.insert(current.clone()) {
                break;
            }
            cursor = self.base.get(&current).await?.and_then(|m| m.parent_id);
        }
        Ok(())
    }
}

fn menu_order(a: &Menu, b: &Menu) -> Ordering {
    let key = |m: &Menu| m.sort_order.unwrap_or(i32::MAX);
    key(a).cmp(&key(b)).then_with(|| a.path.cmp(&b.path))
}

fn build_tree(menus: Vec<Menu>) -> Vec<MenuNode> {
    let ids: HashSet<String> = menus.iter().map(|m| m.id.clone()).collect();
    let mut children: HashMap<String, Vec<Menu>> = HashMap::new();
    let mut roots = Vec::new();

    for menu in menus {
        match menu.parent_id.clone() {
            Some(parent) if ids.contains(&parent) && parent != menu.id => {
                children.entry(parent).or_default().push(menu);
            }
            _ => roots.push(menu),
        }
    }

    roots.sort_by(menu_order);
    roots
        .into_iter()
        .map(|menu| attach_children(menu, &mut children))
        .collect()
}

fn attach_children(menu: Menu, children: &mut HashMap<String, Vec<Menu>>) -> MenuNode {
    let mut direct = children.remove(&menu.id).unwrap_or_default();
    direct.sort_by(menu_order);
    let nodes = direct
        .into_iter()
        .map(|child| attach_children(child, children))
        .collect();
    MenuNode {
        menu,
        children: nodes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::now;
    use pretty_assertions::assert_eq;

    fn menu(id: &str, path: &str, parent: Option<&str>, sort_order: Option<i32>) -> Menu {
        let ts = now();
        Menu {
            id: id.to_string(),
            path: path.to_string(),
            parent_id: parent.map(str::to_string),
            name: None,
            icon: None,
            component: None,
            redirect: None,
            layout: true,
            exact: None,
            sort_order,
            hide_in_menu: false,
            hide_children_in_menu: false,
            is_active: true,
            authority: Vec::new().into(),
            created_at: ts,
            updated_at: ts,
            created_by: None,
            updated_by: None,
        }
    }

    #[test]
    fn test_build_tree_nests_and_orders() {
        let tree = build_tree(vec![
            menu("c2", "/a/z", Some("a"), None),
            menu("a", "/a", None, Some(2)),
            menu("b", "/b", None, Some(1)),
            menu("c1", "/a/y", Some("a"), Some(5)),
            menu("orphan", "/o", Some("gone"), None),
        ]);

        let roots: Vec<&str> = tree.iter().map(|n| n.menu.id.as_str()).collect();
        assert_eq!(roots, vec!["b", "a", "orphan"]);

        let children: Vec<&str> = tree[1].children.iter().map(|n| n.menu.id.as_str()).collect();
        assert_eq!(children, vec!["c1", "c2"]);
        assert!(tree[0].children.is_empty());
    }

    #[test]
    fn test_menu_order_falls_back_to_path() {
        let mut menus = vec![
            menu("1", "/z", None, None),
            menu("2", "/a", None, None),
            menu("3", "/m", None, Some(0)),
        ];
        menus.sort_by(menu_order);
        let paths: Vec<&str> = menus.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(paths, vec!["/m", "/a", "/z"]);
    }
}
