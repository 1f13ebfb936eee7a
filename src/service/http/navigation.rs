//! 导航 HTTP 服务实现
//!
//! 将导航状态机的路由挂载到主 HTTP 服务器

use crate::service::{HttpRouterService, info::ServiceInfo};
use anyhow::Result;
use async_trait::async_trait;
use axum::Router;
use navigation::{NavigationServiceConfig, create_navigation_state, create_router};
use navstack_common::NavstackConfig;
use tracing::info;

/// 导航 HTTP 服务实现
#[derive(Debug)]
pub struct NavigationHttpService {
    info: ServiceInfo,
    config: NavigationServiceConfig,
}

impl NavigationHttpService {
    pub fn new(config: &NavstackConfig) -> Self {
        Self {
            info: ServiceInfo::new(
                "Navigation Service",
                Some("浏览历史导航 - back/forward 双栈与访问日志".to_string()),
            ),
            config: config.services.navigation.clone(),
        }
    }
}

#[async_trait]
impl HttpRouterService for NavigationHttpService {
    fn info(&self) -> &ServiceInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut ServiceInfo {
        &mut self.info
    }

    async fn build_router(&mut self) -> Result<Router> {
        info!("Building navigation router");

        // 每次构建都会得到一份全新的（空的）导航状态
        let state = create_navigation_state(&self.config);
        let router = create_router(state);

        info!("Navigation router built successfully");
        Ok(router)
    }

    fn route_prefix(&self) -> &str {
        &self.config.route_prefix
    }
}
