//! # navstack
//!
//! 栈式浏览历史导航服务：以 back/forward 双栈和访问日志模拟浏览器导航，
//! 通过 HTTP API 供 UI 调用

pub mod service;

// Re-export commonly used types
pub use navstack_common::config::NavstackConfig;
pub use service::{NavigationHttpService, ServiceManager};
