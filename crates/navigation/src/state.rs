//! 导航状态机
//!
//! 维护当前页面、后退栈、前进栈以及只追加的访问日志：
//!
//! ```text
//!   back_stack (栈顶在末尾)     current_page     forward_stack (栈顶在末尾)
//!   [A, B, C] ──── back() ───▶      D       ◀── forward() ──── [F, E]
//! ```
//!
//! - `visit` 是唯一会写入 `history` 并清空前进栈的操作
//! - `back`/`forward` 只在两个栈之间移动游标，栈为空时为 no-op
//! - `clear` 回到初始状态

use crate::error::{NavigationError, NavigationResult};
use serde::{Deserialize, Serialize};

/// back/forward 的执行结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// 游标发生了移动
    Moved,
    /// 对应的栈为空，状态未改变
    Unchanged,
}

impl Transition {
    pub fn is_moved(self) -> bool {
        matches!(self, Transition::Moved)
    }
}

/// 导航状态的完整只读视图
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationSnapshot {
    pub current_page: Option<String>,
    pub back_stack: Vec<String>,
    pub forward_stack: Vec<String>,
    pub history: Vec<String>,
}

impl NavigationSnapshot {
    pub fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward_stack.is_empty()
    }

    /// 当前跟踪的导航槽位数：后退栈 + 当前页 + 前进栈
    pub fn depth(&self) -> usize {
        self.back_stack.len() + usize::from(self.current_page.is_some()) + self.forward_stack.len()
    }
}

/// 浏览历史导航状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    current_page: Option<String>,
    back_stack: Vec<String>,
    forward_stack: Vec<String>,
    history: Vec<String>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 访问新页面
    ///
    /// 空字符串会被拒绝，状态保持不变；其余任意字符串（包括仅含空白的）原样记录。
    /// 连续访问同一页面是允许的，每次都会被记录。
    pub fn visit(&mut self, page: impl Into<String>) -> NavigationResult<NavigationSnapshot> {
        let page = page.into();
        if page.is_empty() {
            return Err(NavigationError::invalid_argument(
                "page must be a non-empty identifier",
            ));
        }

        if let Some(current) = self.current_page.take() {
            self.back_stack.push(current);
        }
        self.history.push(page.clone());
        self.current_page = Some(page);
        // 新的导航使前进历史失效
        self.forward_stack.clear();

        Ok(self.snapshot())
    }

    /// 后退一页；后退栈为空时不做任何改变
    pub fn back(&mut self) -> Transition {
        let Some(previous) = self.back_stack.pop() else {
            return Transition::Unchanged;
        };

        if let Some(current) = self.current_page.replace(previous) {
            self.forward_stack.push(current);
        }
        Transition::Moved
    }

    /// 前进一页；前进栈为空时不做任何改变
    pub fn forward(&mut self) -> Transition {
        let Some(next) = self.forward_stack.pop() else {
            return Transition::Unchanged;
        };

        if let Some(current) = self.current_page.replace(next) {
            self.back_stack.push(current);
        }
        Transition::Moved
    }

    /// 重置为初始状态
    pub fn clear(&mut self) {
        self.current_page = None;
        self.back_stack.clear();
        self.forward_stack.clear();
        self.history.clear();
    }

    pub fn snapshot(&self) -> NavigationSnapshot {
        NavigationSnapshot {
            current_page: self.current_page.clone(),
            back_stack: self.back_stack.clone(),
            forward_stack: self.forward_stack.clone(),
            history: self.history.clone(),
        }
    }

    pub fn current_page(&self) -> Option<&str> {
        self.current_page.as_deref()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(pages: &[&str]) -> Vec<String> {
        pages.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_initial_state_is_empty() {
        let state = NavigationState::new();
        let snapshot = state.snapshot();

        assert_eq!(snapshot, NavigationSnapshot::default());
        assert!(!snapshot.can_go_back());
        assert!(!snapshot.can_go_forward());
        assert_eq!(snapshot.depth(), 0);
    }

    #[test]
    fn test_visit_pushes_current_onto_back_stack() {
        let mut state = NavigationState::new();
        state.visit("Home").unwrap();
        let snapshot = state.visit("About").unwrap();

        assert_eq!(snapshot.current_page.as_deref(), Some("About"));
        assert_eq!(snapshot.back_stack, strings(&["Home"]));
        assert!(snapshot.forward_stack.is_empty());
        assert_eq!(snapshot.history, strings(&["Home", "About"]));
    }

    #[test]
    fn test_back_then_forward_round_trip() {
        let mut state = NavigationState::new();
        state.visit("A").unwrap();
        state.visit("B").unwrap();

        assert_eq!(state.back(), Transition::Moved);
        let snapshot = state.snapshot();
        assert_eq!(snapshot.current_page.as_deref(), Some("A"));
        assert!(snapshot.back_stack.is_empty());
        assert_eq!(snapshot.forward_stack, strings(&["B"]));

        assert_eq!(state.forward(), Transition::Moved);
        let snapshot = state.snapshot();
        assert_eq!(snapshot.current_page.as_deref(), Some("B"));
        assert_eq!(snapshot.back_stack, strings(&["A"]));
        assert!(snapshot.forward_stack.is_empty());
        assert_eq!(snapshot.history, strings(&["A", "B"]));
    }

    #[test]
    fn test_back_on_empty_stack_is_noop() {
        let mut state = NavigationState::new();
        assert_eq!(state.back(), Transition::Unchanged);
        assert_eq!(state.snapshot(), NavigationSnapshot::default());

        state.visit("A").unwrap();
        let before = state.snapshot();
        assert_eq!(state.back(), Transition::Unchanged);
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_forward_on_empty_stack_is_noop() {
        let mut state = NavigationState::new();
        state.visit("A").unwrap();
        state.visit("B").unwrap();

        let before = state.snapshot();
        assert_eq!(state.forward(), Transition::Unchanged);
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_visit_after_back_discards_forward_entries() {
        let mut state = NavigationState::new();
        state.visit("A").unwrap();
        state.visit("B").unwrap();
        state.back();
        let snapshot = state.visit("C").unwrap();

        assert_eq!(snapshot.current_page.as_deref(), Some("C"));
        assert_eq!(snapshot.back_stack, strings(&["A"]));
        assert!(snapshot.forward_stack.is_empty());
        assert_eq!(snapshot.history, strings(&["A", "B", "C"]));
    }

    #[test]
    fn test_visit_back_noop_then_visit() {
        let mut state = NavigationState::new();
        state.visit("A").unwrap();
        assert_eq!(state.back(), Transition::Unchanged);
        let snapshot = state.visit("B").unwrap();

        assert_eq!(snapshot.current_page.as_deref(), Some("B"));
        assert_eq!(snapshot.back_stack, strings(&["A"]));
        assert!(snapshot.forward_stack.is_empty());
        assert_eq!(snapshot.history, strings(&["A", "B"]));
    }

    #[test]
    fn test_multi_step_back_and_forward_ordering() {
        let mut state = NavigationState::new();
        for page in ["Home", "About", "Blog", "FAQ"] {
            state.visit(page).unwrap();
        }

        state.back();
        state.back();
        let snapshot = state.snapshot();
        assert_eq!(snapshot.current_page.as_deref(), Some("About"));
        assert_eq!(snapshot.back_stack, strings(&["Home"]));
        // 栈顶在末尾：下一次 forward 应回到 Blog
        assert_eq!(snapshot.forward_stack, strings(&["FAQ", "Blog"]));
        assert_eq!(snapshot.depth(), 4);

        state.forward();
        assert_eq!(state.current_page(), Some("Blog"));
        assert_eq!(state.snapshot().forward_stack, strings(&["FAQ"]));
        assert_eq!(state.history_len(), 4);
    }

    #[test]
    fn test_duplicate_visits_are_recorded() {
        let mut state = NavigationState::new();
        state.visit("Home").unwrap();
        let snapshot = state.visit("Home").unwrap();

        assert_eq!(snapshot.back_stack, strings(&["Home"]));
        assert_eq!(snapshot.history, strings(&["Home", "Home"]));
    }

    #[test]
    fn test_empty_page_is_rejected_without_mutation() {
        let mut state = NavigationState::new();
        state.visit("A").unwrap();
        state.visit("B").unwrap();
        state.back();
        let before = state.snapshot();

        assert!(matches!(
            state.visit(""),
            Err(NavigationError::InvalidArgument(_))
        ));
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_whitespace_page_is_accepted_verbatim() {
        let mut state = NavigationState::new();
        state.visit("A").unwrap();

        let snapshot = state.visit("   ").unwrap();
        assert_eq!(snapshot.current_page.as_deref(), Some("   "));
        assert_eq!(snapshot.back_stack, strings(&["A"]));
        assert_eq!(snapshot.history, strings(&["A", "   "]));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut state = NavigationState::new();
        state.visit("A").unwrap();
        state.visit("B").unwrap();
        state.visit("C").unwrap();
        state.back();
        state.clear();

        assert_eq!(state.snapshot(), NavigationSnapshot::default());
        assert_eq!(state.current_page(), None);

        // clear 之后可以重新开始导航
        let snapshot = state.visit("D").unwrap();
        assert!(snapshot.back_stack.is_empty());
        assert_eq!(snapshot.history, strings(&["D"]));
    }

    #[test]
    fn test_history_untouched_by_back_and_forward() {
        let mut state = NavigationState::new();
        state.visit("A").unwrap();
        state.visit("B").unwrap();
        state.visit("C").unwrap();

        for _ in 0..5 {
            state.back();
        }
        for _ in 0..2 {
            state.forward();
        }

        let snapshot = state.snapshot();
        assert_eq!(snapshot.history, strings(&["A", "B", "C"]));
        assert_eq!(snapshot.depth(), 3);
        assert!(snapshot.back_stack.iter().all(|p| !p.is_empty()));
        assert!(snapshot.forward_stack.iter().all(|p| !p.is_empty()));
    }
}
