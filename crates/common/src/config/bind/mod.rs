pub mod http;

pub use crate::config::bind::http::HttpBindConfig;
use serde::{Deserialize, Serialize};

/// 网络绑定配置
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct BindConfig {
    /// HTTP 服务绑定配置
    ///
    /// 导航 API 与 /metrics 端点共用同一个 HTTP 监听器。
    #[serde(default)]
    pub http: HttpBindConfig,
}
