//! HTTP服务模块
//!
//! 管理HTTP相关的服务

mod navigation;

pub use navigation::NavigationHttpService;
