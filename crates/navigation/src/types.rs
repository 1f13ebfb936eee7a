//! 导航服务请求/响应数据类型定义

use crate::state::NavigationSnapshot;
use serde::{Deserialize, Serialize};

/// 访问页面请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisitRequest {
    /// 页面标识；缺失或为 null 时反序列化为 None，由处理器拒绝
    #[serde(default)]
    pub page: Option<String>,
}

impl VisitRequest {
    pub fn new(page: impl Into<String>) -> Self {
        Self {
            page: Some(page.into()),
        }
    }
}

/// 所有导航端点的统一响应
///
/// 字段名是对外契约，UI 直接按这些名字读取。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationResponse {
    /// 按时间顺序记录的全部访问
    pub history: Vec<String>,
    /// 当前页面；首次访问之前为空字符串
    pub current_page: String,
    pub back_stack: Vec<String>,
    pub forward_stack: Vec<String>,
    /// 可供访问的页面菜单（静态配置）
    #[serde(default)]
    pub all_pages: Vec<String>,
}

impl NavigationResponse {
    pub fn from_snapshot(snapshot: NavigationSnapshot, all_pages: &[String]) -> Self {
        Self {
            history: snapshot.history,
            current_page: snapshot.current_page.unwrap_or_default(),
            back_stack: snapshot.back_stack,
            forward_stack: snapshot.forward_stack,
            all_pages: all_pages.to_vec(),
        }
    }
}
