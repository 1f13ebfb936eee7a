//! 导航服务 HTTP 处理器

use crate::{
    config::NavigationServiceConfig,
    error::NavigationError,
    state::{NavigationState, Transition},
    types::{NavigationResponse, VisitRequest},
};
use axum::{
    Router,
    extract::{Json, State, rejection::JsonRejection},
    routing::{get, post},
};
use lazy_static::lazy_static;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

lazy_static! {
    /// 导航操作指标（operation: visit/back/forward/clear, outcome: applied/noop/rejected）
    static ref NAV_OPERATIONS: IntCounterVec = IntCounterVec::new(
        Opts::new("navigation_operations_total", "Total number of navigation operations")
            .namespace("navstack"),
        &["operation", "outcome"]
    ).unwrap();

    static ref NAV_REQUEST_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new("request_duration_seconds", "HTTP request duration in seconds")
            .namespace("navstack")
            .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]),
        &["service", "method", "path", "status"]
    ).unwrap();

    static ref NAV_REQUESTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("requests_total", "Total number of HTTP requests")
            .namespace("navstack"),
        &["service", "method", "path", "status"]
    ).unwrap();
}

/// 注册导航服务 metrics 到全局 registry
pub fn register_navigation_metrics(
    registry: &prometheus::Registry,
) -> Result<(), prometheus::Error> {
    registry.register(Box::new(NAV_OPERATIONS.clone()))?;
    registry.register(Box::new(NAV_REQUEST_DURATION.clone()))?;
    registry.register(Box::new(NAV_REQUESTS_TOTAL.clone()))?;
    Ok(())
}

fn record_request(method: &str, path: &str, status: u16, start_time: Instant) {
    let status = status.to_string();
    let duration = start_time.elapsed().as_secs_f64();
    NAV_REQUEST_DURATION
        .with_label_values(&["navigation", method, path, &status])
        .observe(duration);
    NAV_REQUESTS_TOTAL
        .with_label_values(&["navigation", method, path, &status])
        .inc();
}

fn record_operation(operation: &str, outcome: &str) {
    NAV_OPERATIONS
        .with_label_values(&[operation, outcome])
        .inc();
}

fn transition_outcome(transition: Transition) -> &'static str {
    if transition.is_moved() {
        "applied"
    } else {
        "noop"
    }
}

/// 导航服务状态
///
/// 整个进程只有一份导航状态，所有变更都在同一把锁内串行执行。
#[derive(Clone)]
pub struct NavigationServiceState {
    navigation: Arc<Mutex<NavigationState>>,
    pages: Arc<Vec<String>>,
}

impl NavigationServiceState {
    pub fn new(pages: Vec<String>) -> Self {
        Self {
            navigation: Arc::new(Mutex::new(NavigationState::new())),
            pages: Arc::new(pages),
        }
    }

    /// 当前导航状态的响应视图
    pub async fn current(&self) -> NavigationResponse {
        let navigation = self.navigation.lock().await;
        NavigationResponse::from_snapshot(navigation.snapshot(), &self.pages)
    }

    pub async fn visit(&self, page: &str) -> Result<NavigationResponse, NavigationError> {
        let mut navigation = self.navigation.lock().await;
        let snapshot = navigation.visit(page)?;
        Ok(NavigationResponse::from_snapshot(snapshot, &self.pages))
    }

    pub async fn back(&self) -> (Transition, NavigationResponse) {
        let mut navigation = self.navigation.lock().await;
        let transition = navigation.back();
        let response = NavigationResponse::from_snapshot(navigation.snapshot(), &self.pages);
        (transition, response)
    }

    pub async fn forward(&self) -> (Transition, NavigationResponse) {
        let mut navigation = self.navigation.lock().await;
        let transition = navigation.forward();
        let response = NavigationResponse::from_snapshot(navigation.snapshot(), &self.pages);
        (transition, response)
    }

    pub async fn clear(&self) -> NavigationResponse {
        let mut navigation = self.navigation.lock().await;
        navigation.clear();
        NavigationResponse::from_snapshot(navigation.snapshot(), &self.pages)
    }
}

/// 从导航配置创建服务状态
pub fn create_navigation_state(config: &NavigationServiceConfig) -> NavigationServiceState {
    info!(
        "Initializing navigation state with {} menu pages",
        config.pages.len()
    );
    NavigationServiceState::new(config.pages.clone())
}

/// 创建导航服务的路由
pub fn create_router(state: NavigationServiceState) -> Router {
    Router::new()
        .route("/history", get(history_handler))
        .route("/visit", post(visit_handler))
        .route("/back", post(back_handler))
        .route("/forward", post(forward_handler))
        .route("/clear", post(clear_handler))
        .route("/health", get(health_check_handler))
        .with_state(state)
}

async fn history_handler(
    State(app_state): State<NavigationServiceState>,
) -> Json<NavigationResponse> {
    let start_time = Instant::now();
    debug!("History snapshot requested");

    let response = app_state.current().await;

    record_request("GET", "/history", 200, start_time);
    Json(response)
}

async fn visit_handler(
    State(app_state): State<NavigationServiceState>,
    payload: Result<Json<VisitRequest>, JsonRejection>,
) -> Result<Json<NavigationResponse>, NavigationError> {
    let start_time = Instant::now();

    let result = match payload {
        Ok(Json(VisitRequest { page: Some(page) })) => app_state.visit(&page).await,
        Ok(Json(VisitRequest { page: None })) => {
            Err(NavigationError::invalid_argument("missing field `page`"))
        }
        Err(rejection) => Err(NavigationError::invalid_argument(rejection.body_text())),
    };

    match result {
        Ok(response) => {
            record_operation("visit", "applied");
            record_request("POST", "/visit", 200, start_time);
            info!(
                "Visited page '{}' (back: {}, history: {})",
                response.current_page,
                response.back_stack.len(),
                response.history.len()
            );
            Ok(Json(response))
        }
        Err(e) => {
            record_operation("visit", "rejected");
            record_request("POST", "/visit", 400, start_time);
            warn!("Rejected visit request: {}", e);
            Err(e)
        }
    }
}

async fn back_handler(State(app_state): State<NavigationServiceState>) -> Json<NavigationResponse> {
    let start_time = Instant::now();

    let (transition, response) = app_state.back().await;
    record_operation("back", transition_outcome(transition));
    record_request("POST", "/back", 200, start_time);

    if transition.is_moved() {
        info!("Navigated back to '{}'", response.current_page);
    } else {
        debug!("Back requested with empty back stack, state unchanged");
    }
    Json(response)
}

async fn forward_handler(
    State(app_state): State<NavigationServiceState>,
) -> Json<NavigationResponse> {
    let start_time = Instant::now();

    let (transition, response) = app_state.forward().await;
    record_operation("forward", transition_outcome(transition));
    record_request("POST", "/forward", 200, start_time);

    if transition.is_moved() {
        info!("Navigated forward to '{}'", response.current_page);
    } else {
        debug!("Forward requested with empty forward stack, state unchanged");
    }
    Json(response)
}

async fn clear_handler(State(app_state): State<NavigationServiceState>) -> Json<NavigationResponse> {
    let start_time = Instant::now();

    let response = app_state.clear().await;
    record_operation("clear", "applied");
    record_request("POST", "/clear", 200, start_time);

    info!("Navigation history cleared");
    Json(response)
}

async fn health_check_handler(
    State(app_state): State<NavigationServiceState>,
) -> Json<serde_json::Value> {
    debug!("Health check requested");

    let current = app_state.current().await;

    let response = serde_json::json!({
        "status": "healthy",
        "service": "navigation",
        "current_page": current.current_page,
        "history_len": current.history.len(),
        "timestamp": std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    });

    Json(response)
}
