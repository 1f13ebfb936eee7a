//! 统一配置管理系统
//!
//! 本模块是 navstack 服务配置的"单一真理之源"。
//! 所有配置项的定义、文档、默认值都在这里统一管理。

pub mod bind;
pub mod services;

pub use crate::config::bind::{BindConfig, HttpBindConfig};
pub use crate::config::services::ServicesConfig;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// navstack 服务的主配置结构体
///
/// 配置文件使用 TOML 格式，所有配置段都有默认值。
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NavstackConfig {
    /// 服务器实例名称
    ///
    /// 用于在日志中标识不同的实例，如：navstack-01, navstack-demo 等。
    #[serde(default = "default_name")]
    pub name: String,

    /// 运行环境标识
    ///
    /// - "dev": 开发环境
    /// - "prod": 生产环境，对宽松的绑定配置给出警告
    /// - "test": 测试环境，用于自动化测试
    #[serde(default = "default_env")]
    pub env: String,

    /// PID 文件路径
    ///
    /// 未配置时使用默认路径 "logs/navstack.pid"，PID 文件总会被写入
    /// （见 [`NavstackConfig::get_pid_path`]）。
    pub pid: Option<String>,

    /// 网络绑定配置
    #[serde(default)]
    pub bind: BindConfig,

    /// 服务配置集合
    #[serde(default)]
    pub services: ServicesConfig,

    /// 可观测性配置（日志）
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// 可观测性配置
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ObservabilityConfig {
    /// 过滤级别
    ///
    /// 支持 EnvFilter 语法（如 "info,hyper=warn"）。默认值 "info"。
    #[serde(default = "default_filter_level")]
    pub filter_level: String,

    #[serde(default)]
    pub log: LogConfig,
}

/// 日志配置
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogConfig {
    /// 日志输出目标
    ///
    /// - "console": 仅输出到控制台（默认）
    /// - "file": 输出到文件
    #[serde(default = "default_log_output")]
    pub output: String,

    /// 日志轮转开关
    ///
    /// 当 output = "file" 时有效：
    /// - true: 按天轮转日志文件
    /// - false: 追加到单个文件
    #[serde(default)]
    pub rotate: bool,

    /// 日志文件目录
    ///
    /// 当 output = "file" 时有效
    #[serde(default = "default_log_path")]
    pub path: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            filter_level: default_filter_level(),
            log: LogConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            output: default_log_output(),
            rotate: false,
            path: default_log_path(),
        }
    }
}

fn default_name() -> String {
    "navstack-default".to_string()
}

fn default_env() -> String {
    "dev".to_string()
}

fn default_log_output() -> String {
    "console".to_string()
}

fn default_log_path() -> String {
    "logs/".to_string()
}

fn default_filter_level() -> String {
    "info".to_string()
}

impl Default for NavstackConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            env: default_env(),
            pid: Some("logs/navstack.pid".to_string()),
            bind: BindConfig::default(),
            services: ServicesConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl NavstackConfig {
    /// 获取 PID 文件路径，如果没有配置则使用默认值
    pub fn get_pid_path(&self) -> Option<String> {
        self.pid
            .clone()
            .or_else(|| Some("logs/navstack.pid".to_string()))
    }

    /// 返回日志配置引用
    pub fn log_config(&self) -> &LogConfig {
        &self.observability.log
    }

    /// 检查是否应该轮转日志
    pub fn should_rotate_logs(&self) -> bool {
        self.observability.log.output == "file" && self.observability.log.rotate
    }

    /// 获取日志过滤级别，优先使用 RUST_LOG
    pub fn get_filter_level(&self) -> String {
        std::env::var("RUST_LOG")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| self.observability.filter_level.clone())
    }

    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(ConfigError::FileNotFound {
                path: path_ref.display().to_string(),
            });
        }

        if !path_ref.is_file() {
            return Err(ConfigError::NotAFile {
                path: path_ref.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path_ref)?;
        Self::from_toml(&content)
    }

    /// 从 TOML 字符串加载配置
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// 将配置序列化为 TOML 字符串
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// 验证配置有效性
    ///
    /// 收集所有问题后一次性返回；以 "Warning:" 开头的条目仅为提示，不阻止启动。
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("Instance name cannot be empty".to_string());
        }

        if !["dev", "prod", "test"].contains(&self.env.as_str()) {
            errors.push(format!(
                "Invalid environment '{}', must be one of: dev, prod, test",
                self.env
            ));
        }

        // 验证过滤级别（EnvFilter 语法）
        {
            let main_level = self
                .observability
                .filter_level
                .split(',')
                .next()
                .unwrap_or("")
                .trim();
            if !["trace", "debug", "info", "warn", "error"].contains(&main_level) {
                errors.push(format!(
                    "Invalid filter level '{}', must start with one of: trace, debug, info, warn, error",
                    self.observability.filter_level
                ));
            }
        }

        if !["console", "file"].contains(&self.observability.log.output.as_str()) {
            errors.push(format!(
                "Invalid log output '{}' (observability.log.output), must be 'console' or 'file'",
                self.observability.log.output
            ));
        }

        if self.observability.log.output == "file" && self.observability.log.path.trim().is_empty()
        {
            errors.push("observability.log.path cannot be empty when output = 'file'".to_string());
        }

        let http = &self.bind.http;
        if let Err(e) = http.socket_addr() {
            errors.push(format!("Invalid bind.http.ip '{}': {e}", http.ip));
        } else if self.env == "prod" && http.ip == "0.0.0.0" {
            errors.push(
                "Warning: bind.http.ip is 0.0.0.0 in prod, the navigation API is reachable on all interfaces"
                    .to_string(),
            );
        }

        if http.domain_name.trim().is_empty() {
            errors.push("bind.http.domain_name cannot be empty".to_string());
        }

        errors.extend(self.services.navigation.validate());

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = NavstackConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind.http.port, 5000);
        assert_eq!(config.services.navigation.route_prefix, "/api");
    }

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config = NavstackConfig::from_toml("name = \"navstack-min\"").unwrap();
        assert_eq!(config.name, "navstack-min");
        assert_eq!(config.env, "dev");
        assert!(config.pid.is_none());
        assert_eq!(config.get_pid_path().as_deref(), Some("logs/navstack.pid"));
        assert_eq!(config.observability.log.output, "console");
        assert_eq!(config.services.navigation.pages.len(), 8);
    }

    #[test]
    fn test_full_toml() {
        let content = r#"
name = "navstack-01"
env = "test"
pid = "/tmp/navstack.pid"

[bind.http]
domain_name = "nav.local"
ip = "127.0.0.1"
port = 18080

[services.navigation]
route_prefix = "/nav"
pages = ["Home", "Docs"]

[observability]
filter_level = "debug,hyper=warn"

[observability.log]
output = "file"
rotate = true
path = "/tmp/navstack-logs"
"#;
        let config = NavstackConfig::from_toml(content).unwrap();
        assert_eq!(config.bind.http.socket_addr().unwrap().port(), 18080);
        assert_eq!(config.services.navigation.pages, vec!["Home", "Docs"]);
        assert!(config.should_rotate_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let result = NavstackConfig::from_toml("name = \"broken\"\nenv = [\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validate_collects_errors() {
        let mut config = NavstackConfig::default();
        config.name = "  ".to_string();
        config.env = "staging".to_string();
        config.observability.filter_level = "verbose".to_string();
        config.observability.log.output = "syslog".to_string();
        config.bind.http.ip = "localhost".to_string();
        config.services.navigation.route_prefix = "api".to_string();

        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("Instance name")));
        assert!(errors.iter().any(|e| e.contains("Invalid environment")));
        assert!(errors.iter().any(|e| e.contains("Invalid filter level")));
        assert!(errors.iter().any(|e| e.contains("Invalid log output")));
        assert!(errors.iter().any(|e| e.contains("bind.http.ip")));
        assert!(errors.iter().any(|e| e.contains("route_prefix")));
        assert!(errors.iter().all(|e| !e.starts_with("Warning:")));
    }

    #[test]
    fn test_prod_wildcard_bind_is_warning() {
        let mut config = NavstackConfig::default();
        config.env = "prod".to_string();

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Warning:"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert!(matches!(
            NavstackConfig::from_file(&path),
            Err(ConfigError::FileNotFound { .. })
        ));
        assert!(matches!(
            NavstackConfig::from_file(dir.path()),
            Err(ConfigError::NotAFile { .. })
        ));

        let config = NavstackConfig::default();
        std::fs::write(&path, config.to_toml().unwrap()).unwrap();
        let loaded = NavstackConfig::from_file(&path).unwrap();
        assert_eq!(loaded.name, config.name);
        assert_eq!(loaded.services.navigation, config.services.navigation);
    }

    #[test]
    #[serial]
    fn test_rust_log_overrides_filter_level() {
        let config = NavstackConfig::default();

        unsafe { std::env::set_var("RUST_LOG", "debug") };
        assert_eq!(config.get_filter_level(), "debug");

        unsafe { std::env::set_var("RUST_LOG", "  ") };
        assert_eq!(config.get_filter_level(), "info");

        unsafe { std::env::remove_var("RUST_LOG") };
        assert_eq!(config.get_filter_level(), "info");
    }
}
