//! 浏览历史导航服务
//!
//! 以两个栈（后退栈/前进栈）加一个当前页面指针模拟浏览器导航：
//! 1. visit：当前页入后退栈，记录访问日志，清空前进栈
//! 2. back / forward：在两个栈之间移动当前页，栈为空时为 no-op
//! 3. clear：重置全部状态
//! 4. 通过 axum 路由对外提供 `/history`、`/visit`、`/back`、`/forward`、`/clear`

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use config::NavigationServiceConfig;
pub use error::{NavigationError, NavigationResult};
pub use handlers::{
    NavigationServiceState, create_navigation_state, create_router, register_navigation_metrics,
};
pub use state::{NavigationSnapshot, NavigationState, Transition};
pub use types::{NavigationResponse, VisitRequest};
