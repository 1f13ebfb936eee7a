//! navstack 主程序
//!
//! 加载配置，启动导航 HTTP 服务并处理优雅关闭

mod cli;
mod error;
mod observability;
mod process;

use clap::Parser;
use navstack::service::{NavigationHttpService, ServiceManager};
use navstack_common::NavstackConfig;
use observability::init_observability;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

macro_rules! bootstrap_info {
    ($($arg:tt)*) => {
        println!($($arg)*);
    };
}

macro_rules! bootstrap_error {
    ($($arg:tt)*) => {
        eprintln!($($arg)*);
    };
}

use cli::{Cli, Commands};
use error::{Error, Result};

/// Application launcher utilities
struct ApplicationLauncher;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Test { config_file }) => {
            let config_path =
                ApplicationLauncher::find_config_file(config_file.as_ref().unwrap_or(&cli.config))?;
            ApplicationLauncher::test_config_file(&config_path)
        }
        None => {
            let config_path = ApplicationLauncher::find_config_file(&cli.config)?;

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;

            runtime.block_on(ApplicationLauncher::run_application(&config_path))
        }
    }
}

impl ApplicationLauncher {
    /// Find config file with fallback locations
    fn find_config_file(provided_path: &PathBuf) -> Result<PathBuf> {
        // An explicit (non-default) path must exist
        if provided_path != Path::new("config.toml") {
            if provided_path.exists() {
                bootstrap_info!("Using provided config file: {:?}", provided_path);
                return Ok(provided_path.clone());
            } else {
                bootstrap_error!("Provided config file not found: {:?}", provided_path);
                return Err(Error::custom(format!(
                    "Config file not found: {provided_path:?}"
                )));
            }
        }

        let fallback_paths = vec![
            PathBuf::from("config.toml"),
            PathBuf::from("/etc/navstack/config.toml"),
        ];

        bootstrap_info!("Searching for config file in default locations...");

        for path in &fallback_paths {
            if path.exists() {
                bootstrap_info!("Found config file: {:?}", path);
                return Ok(path.clone());
            } else {
                bootstrap_info!("Config not found at: {:?}", path);
            }
        }

        bootstrap_error!("No configuration file found!");
        bootstrap_error!("Please create a config file in one of these locations:");
        for (i, path) in fallback_paths.iter().enumerate() {
            bootstrap_error!("  {}. {:?}", i + 1, path);
        }
        bootstrap_error!("Or specify a custom path with: navstack --config <path>");

        Err(Error::custom(
            "No configuration file found. Please create one or specify path with --config",
        ))
    }

    /// 测试配置文件是否有效
    fn test_config_file(config_path: &Path) -> Result<()> {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .init();

        match NavstackConfig::from_file(config_path) {
            Ok(config) => {
                info!("✅ 配置文件解析成功: {:?}", config_path);

                if let Err(errors) = config.validate() {
                    Self::report_validation_errors(&errors);
                    if has_critical_errors(&errors) {
                        return Err(Error::service_validation("配置验证失败".to_string()));
                    }
                }

                info!("✅ 配置验证通过");
                Ok(())
            }
            Err(e) => {
                error!("❌ 配置文件解析失败: {}", e);
                Err(Error::service_validation(format!("配置解析失败: {e}")))
            }
        }
    }

    fn report_validation_errors(errors: &[String]) {
        error!("❌ 配置验证发现问题:");
        for (i, err) in errors.iter().enumerate() {
            if err.starts_with("Warning:") {
                warn!("  {}. ⚠️  {}", i + 1, err);
            } else {
                error!("  {}. ❌ {}", i + 1, err);
            }
        }
    }

    /// 加载并验证配置文件
    fn load_config(config_path: &Path) -> Result<NavstackConfig> {
        bootstrap_info!("📄 加载配置文件: {:?}", config_path);

        let config = match NavstackConfig::from_file(config_path) {
            Ok(config) => config,
            Err(e) => {
                bootstrap_error!("❌ 配置加载失败: {}", e);
                return Err(e.into());
            }
        };
        bootstrap_info!("✅ 配置加载成功");

        if let Err(errors) = config.validate() {
            bootstrap_error!("❌ 配置验证发现问题:");
            for (i, err) in errors.iter().enumerate() {
                if err.starts_with("Warning:") {
                    bootstrap_info!("  {}. ⚠️  {}", i + 1, err);
                } else {
                    bootstrap_error!("  {}. ❌ {}", i + 1, err);
                }
            }
            if has_critical_errors(&errors) {
                return Err(Error::custom("配置验证失败，请修复上述错误".to_string()));
            }
        }

        Ok(config)
    }

    /// 运行应用程序的主入口
    async fn run_application(config_path: &Path) -> Result<()> {
        let config = Self::load_config(config_path)?;

        // 初始化日志
        let _observability_guard = init_observability(&config)?;

        let pid_path = process::ProcessManager::write_pid_file(config.get_pid_path().as_deref())?;
        let _pid_guard = process::PidFileGuard::new(pid_path);

        Self::run_services(config).await
    }

    async fn run_services(config: NavstackConfig) -> Result<()> {
        info!(
            "🚀 启动 navstack 导航服务 (name: {}, env: {})",
            config.name, config.env
        );

        if let Err(e) = navstack_common::metrics::register_metrics() {
            warn!(
                "Prometheus metrics registration warning (may already be registered): {}",
                e
            );
        }
        navstack_common::metrics::set_instance_info(&config.name, &config.env);
        info!("✅ Prometheus metrics registry 初始化成功");

        let (shutdown_tx, _) = tokio::sync::broadcast::channel::<()>(10);
        setup_ctrl_c_handler(shutdown_tx.clone()).await;

        let mut service_manager = ServiceManager::new(config.clone(), shutdown_tx.clone());
        info!(
            "  - Navigation Service ({})",
            config.services.navigation.route_prefix
        );
        service_manager.add_service(Box::new(NavigationHttpService::new(&config)));

        let server = service_manager
            .start_all()
            .await
            .map_err(|e| Error::service_startup(format!("HTTP 服务启动失败: {e}")))?;

        Self::display_service_info(&config, server.local_addr);

        if let Err(e) = server.handle.await {
            error!("HTTP server task terminated unexpectedly: {}", e);
            let _ = shutdown_tx.send(());
        }
        service_manager.stop_all().await?;

        info!("🛑 所有服务已安全关闭");
        Ok(())
    }

    /// 显示服务信息
    fn display_service_info(config: &NavstackConfig, local_addr: SocketAddr) {
        let base_url = format!("http://{local_addr}");
        let prefix = config.services.navigation.route_prefix.trim_end_matches('/');

        info!("✅ 所有服务已启动");
        info!("📡 HTTP 服务器监听在: {}", base_url);
        info!("🔧 可用的API端点:");
        info!("  - GET  {}{}/history", base_url, prefix);
        info!("  - POST {}{}/visit", base_url, prefix);
        info!("  - POST {}{}/back", base_url, prefix);
        info!("  - POST {}{}/forward", base_url, prefix);
        info!("  - POST {}{}/clear", base_url, prefix);
        info!("  - GET  {}{}/health", base_url, prefix);
        info!("  - GET  {}/metrics", base_url);
    }
}

/// 是否存在非警告级别的验证错误
fn has_critical_errors(errors: &[String]) -> bool {
    errors.iter().any(|e| !e.starts_with("Warning:"))
}

/// 设置Ctrl-C信号处理程序
async fn setup_ctrl_c_handler(shutdown_tx: tokio::sync::broadcast::Sender<()>) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("无法监听Ctrl-C信号: {}", e);
            return;
        }
        info!("收到Ctrl-C信号，开始优雅关闭...");
        let _ = shutdown_tx.send(());
    });
}
