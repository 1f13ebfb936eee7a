//! Prometheus 监控指标模块
//!
//! 提供全局指标注册和导出功能

use lazy_static::lazy_static;
use prometheus::{IntGaugeVec, Opts, Registry};
use std::sync::Once;
use tracing::error;

static METRICS_INIT: Once = Once::new();

lazy_static! {
    /// 全局 Prometheus Registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// 实例信息（值恒为 1）
    pub static ref INSTANCE_INFO: IntGaugeVec = IntGaugeVec::new(
        Opts::new("instance_info", "Static information about the running instance")
            .namespace("navstack"),
        &["name", "env", "version"]
    ).unwrap();
}

/// 注册所有指标到全局 Registry
///
/// This function is idempotent - calling it multiple times is safe.
/// Only the first call will actually register the metrics.
pub fn register_metrics() -> Result<(), prometheus::Error> {
    let mut result = Ok(());

    METRICS_INIT.call_once(|| {
        let register_result = (|| {
            REGISTRY.register(Box::new(INSTANCE_INFO.clone()))?;
            navigation::register_navigation_metrics(&REGISTRY)?;
            Ok::<(), prometheus::Error>(())
        })();

        if let Err(e) = register_result {
            result = Err(e);
        }
    });

    result
}

/// 记录实例信息
pub fn set_instance_info(name: &str, env: &str) {
    INSTANCE_INFO
        .with_label_values(&[name, env, env!("CARGO_PKG_VERSION")])
        .set(1);
}

/// 导出 Prometheus 格式的指标
pub fn export_metrics() -> String {
    use prometheus::Encoder;
    let encoder = prometheus::TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        error!("Failed to encode metrics: {}", e);
        return String::new();
    }

    String::from_utf8(buffer).unwrap_or_default()
}
