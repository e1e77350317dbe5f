//! 输出槽：detail 查询结果的唯一展示位
//!
//! 只有「当前代次」的提交可以写入；旧提交的迟到响应在这里被丢弃，
//! 不会覆盖更新的结果（源实现允许任意迟到响应覆盖，这里按代次拦截）。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// 单槽输出状态，可廉价 clone 共享
#[derive(Debug, Clone, Default)]
pub struct OutputState {
    text: Arc<RwLock<Option<String>>>,
    /// 最近一次成功写入的代次
    committed: Arc<AtomicU64>,
}

impl OutputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前内容快照
    pub fn snapshot(&self) -> Option<String> {
        self.text.read().ok().and_then(|g| g.clone())
    }

    /// 按代次写入：只接受不早于已提交代次的写入，返回是否生效
    pub fn commit(&self, generation: u64, text: String) -> bool {
        let Ok(mut guard) = self.text.write() else {
            return false;
        };
        // 写锁内比较并推进，避免两个提交交错时旧代次插队
        if generation < self.committed.load(Ordering::Acquire) {
            tracing::debug!(generation, "stale detail response discarded");
            return false;
        }
        self.committed.store(generation, Ordering::Release);
        *guard = Some(text);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_and_snapshot() {
        let output = OutputState::new();
        assert_eq!(output.snapshot(), None);
        assert!(output.commit(1, "first".into()));
        assert_eq!(output.snapshot().as_deref(), Some("first"));
    }

    #[test]
    fn test_stale_generation_discarded() {
        let output = OutputState::new();
        assert!(output.commit(5, "newer".into()));
        assert!(!output.commit(3, "late".into()));
        assert_eq!(output.snapshot().as_deref(), Some("newer"));
    }

    #[test]
    fn test_same_generation_overwrites() {
        let output = OutputState::new();
        assert!(output.commit(2, "a".into()));
        assert!(output.commit(2, "b".into()));
        assert_eq!(output.snapshot().as_deref(), Some("b"));
    }
}
