//! 服务配置集合

use navigation::NavigationServiceConfig;
use serde::{Deserialize, Serialize};

/// 所有服务的配置集合
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ServicesConfig {
    /// 导航服务配置
    #[serde(default)]
    pub navigation: NavigationServiceConfig,
}
