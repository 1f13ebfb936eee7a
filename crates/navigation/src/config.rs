//! 导航服务配置

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 导航服务配置
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct NavigationServiceConfig {
    /// 路由前缀
    ///
    /// 导航路由会挂载在该前缀之下，例如 "/api" 对应 `/api/history`、`/api/visit` 等。
    #[serde(default = "default_route_prefix")]
    pub route_prefix: String,

    /// 可供访问的页面菜单
    ///
    /// 仅作为 UI 的静态配置随每个响应返回（`all_pages`），
    /// visit 本身接受任意非空页面标识。
    #[serde(default = "default_pages")]
    pub pages: Vec<String>,
}

impl Default for NavigationServiceConfig {
    fn default() -> Self {
        Self {
            route_prefix: default_route_prefix(),
            pages: default_pages(),
        }
    }
}

fn default_route_prefix() -> String {
    "/api".to_string()
}

fn default_pages() -> Vec<String> {
    [
        "Home", "About", "Services", "Products", "Blog", "Contact", "Gallery", "FAQ",
    ]
    .iter()
    .map(|page| page.to_string())
    .collect()
}

impl NavigationServiceConfig {
    /// 校验配置，返回所有发现的问题
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.route_prefix.starts_with('/') {
            errors.push(format!(
                "services.navigation.route_prefix '{}' must start with '/'",
                self.route_prefix
            ));
        }
        if self.route_prefix.len() > 1 && self.route_prefix.ends_with('/') {
            errors.push(format!(
                "services.navigation.route_prefix '{}' must not end with '/'",
                self.route_prefix
            ));
        }

        if self.pages.is_empty() {
            errors.push(
                "Warning: services.navigation.pages is empty, the UI will have no page menu"
                    .to_string(),
            );
        }

        let mut seen = HashSet::new();
        for page in &self.pages {
            if page.trim().is_empty() {
                errors.push("services.navigation.pages must not contain empty entries".to_string());
            } else if !seen.insert(page.as_str()) {
                errors.push(format!(
                    "services.navigation.pages contains duplicate entry '{page}'"
                ));
            }
        }

        errors
    }

    /// 路由是否挂载在根路径
    pub fn is_root_mounted(&self) -> bool {
        self.route_prefix == "/"
    }
}
