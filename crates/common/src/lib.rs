//! navstack 基础设施库
//!
//! 为导航服务提供配置加载与校验、Prometheus 指标等公共组件

pub mod config;
pub mod error;
pub mod metrics;

pub use config::{NavstackConfig, ObservabilityConfig};
pub use error::ConfigError;
