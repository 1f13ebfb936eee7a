//! 服务管理器模块 - 负责合并 HTTP 路由服务并管理 HTTP 服务器的生命周期

use super::HttpRouterService;
use anyhow::{Context, Result};
use axum::Router;
use navstack_common::NavstackConfig;
use std::net::SocketAddr;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use url::Url;

/// 已启动的 HTTP 服务器
#[derive(Debug)]
pub struct RunningServer {
    /// 实际绑定的地址（配置端口为 0 时由系统分配）
    pub local_addr: SocketAddr,
    pub handle: JoinHandle<()>,
}

/// 服务管理器，负责管理多个 HTTP 路由服务的生命周期
#[derive(Debug)]
pub struct ServiceManager {
    services: Vec<Box<dyn HttpRouterService>>,
    shutdown_tx: tokio::sync::broadcast::Sender<()>,
    config: NavstackConfig,
}

impl ServiceManager {
    /// 创建新的服务管理器
    pub fn new(config: NavstackConfig, shutdown_tx: tokio::sync::broadcast::Sender<()>) -> Self {
        Self {
            services: Vec::new(),
            shutdown_tx,
            config,
        }
    }

    /// 添加服务到管理器
    pub fn add_service(&mut self, service: Box<dyn HttpRouterService>) {
        info!("Adding service '{}' to manager", service.info().name);
        self.services.push(service);
    }

    /// 已注册的服务
    pub fn services(&self) -> &[Box<dyn HttpRouterService>] {
        &self.services
    }

    /// 启动 HTTP 服务器，合并所有 HTTP 路由服务
    pub async fn start_all(&mut self) -> Result<RunningServer> {
        if self.services.is_empty() {
            return Err(anyhow::anyhow!("No HTTP router service registered"));
        }

        let http_config = &self.config.bind.http;
        let bind_addr = http_config
            .socket_addr()
            .map_err(|e| anyhow::anyhow!("Invalid bind address '{}': {e}", http_config.ip))?;

        info!(
            "Starting HTTP server with {} route services (environment: {})",
            self.services.len(),
            self.config.env
        );

        let listener = tokio::net::TcpListener::bind(bind_addr)
            .await
            .with_context(|| format!("Failed to bind to address '{bind_addr}'"))?;
        let local_addr = listener
            .local_addr()
            .context("Failed to read bound address")?;

        let public_url = Url::parse(&http_config.public_url(local_addr.port()))
            .map_err(|e| anyhow::anyhow!("Failed to parse HTTP URL: {e}"))?;

        // 构建合并的路由器
        let mut app = Router::new();

        for service in &mut self.services {
            let route_prefix = service.route_prefix().to_string();
            let service_name = service.info().name.clone();

            let router = service
                .build_router()
                .await
                .with_context(|| format!("Failed to build router for service '{service_name}'"))?;

            info!(
                "Adding route '{}' for service '{}'",
                route_prefix, service_name
            );
            // axum 不支持在根路径 nest
            app = if route_prefix == "/" {
                app.merge(router)
            } else {
                app.nest(&route_prefix, router)
            };

            let service_url = public_url
                .join(route_prefix.trim_start_matches('/'))
                .map_err(|e| anyhow::anyhow!("Failed to build service URL: {e}"))?;
            if let Err(e) = service.on_start(service_url).await {
                error!("Failed to start service '{}': {:?}", service_name, e);
                service.info_mut().set_error(e.to_string());
            }
        }

        info!("Adding /metrics endpoint for Prometheus");
        app = app.route("/metrics", axum::routing::get(metrics_handler));

        // 添加全局中间件层
        app = app
            .layer(super::trace::http_trace_layer())
            .layer(CorsLayer::permissive()); // UI 与 API 不同源

        info!("HTTP server listening on {}", local_addr);

        let shutdown_tx = self.shutdown_tx.clone();
        let mut shutdown_rx = shutdown_tx.subscribe();
        let handle = tokio::spawn(async move {
            let server = axum::serve(listener, app.into_make_service()).with_graceful_shutdown(
                async move {
                    let _ = shutdown_rx.recv().await;
                    info!("HTTP server received shutdown signal");
                },
            );
            if let Err(e) = server.await {
                error!("HTTP server error: {}", e);
                let _ = shutdown_tx.send(());
            }
            info!("HTTP server stopped");
        });

        Ok(RunningServer { local_addr, handle })
    }

    /// Stop all services
    pub async fn stop_all(&mut self) -> Result<()> {
        info!("Stopping all services");

        let _ = self.shutdown_tx.send(());
        for service in &mut self.services {
            service.on_stop().await?;
        }

        info!("All services stopped");
        Ok(())
    }
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> String {
    navstack_common::metrics::export_metrics()
}
