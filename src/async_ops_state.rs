//! 异步操作状态管理
//!
//! 远程请求在后台线程执行，结果通过 channel 送回主循环。
//! 每个结果带上发起时的 epoch；登出会让 epoch 加一，旧结果到达后直接丢弃。

use std::sync::mpsc;

use crate::error::ApiError;
use crate::model::{AuthResponse, Todo, User};

/// 后台操作结果
#[derive(Debug)]
pub enum BgResult {
    Restore {
        token: String,
        result: Result<User, ApiError>,
    },
    Login(Result<AuthResponse, ApiError>),
    Register(Result<AuthResponse, ApiError>),
    Loaded(Result<Vec<Todo>, ApiError>),
    Created(Result<Todo, ApiError>),
    Toggled {
        id: String,
        result: Result<Todo, ApiError>,
    },
    Updated {
        id: String,
        result: Result<Todo, ApiError>,
    },
    Deleted {
        id: String,
        result: Result<(), ApiError>,
    },
}

/// 带 epoch 的结果
#[derive(Debug)]
pub struct BgMessage {
    pub epoch: u64,
    pub result: BgResult,
}

/// 异步操作状态
#[derive(Debug)]
pub struct AsyncOpsState {
    tx: mpsc::Sender<BgMessage>,
    rx: mpsc::Receiver<BgMessage>,
    /// 当前会话代数
    epoch: u64,
    /// 进行中的请求数
    in_flight: usize,
    /// Loading 消息（后台操作进行中时显示）
    pub loading_message: Option<String>,
}

impl Default for AsyncOpsState {
    fn default() -> Self {
        Self::new()
    }
}

impl AsyncOpsState {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            epoch: 0,
            in_flight: 0,
            loading_message: None,
        }
    }

    #[cfg(test)]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// 使所有进行中的请求失效
    pub fn invalidate(&mut self) {
        self.epoch += 1;
        self.in_flight = 0;
        self.loading_message = None;
    }

    /// 在后台线程执行 job，结果带上当前 epoch 送回
    pub fn spawn<F>(&mut self, message: impl Into<String>, job: F)
    where
        F: FnOnce() -> BgResult + Send + 'static,
    {
        let tx = self.tx.clone();
        let epoch = self.epoch;
        self.in_flight += 1;
        self.loading_message = Some(message.into());
        std::thread::spawn(move || {
            let result = job();
            // 接收端已销毁说明程序正在退出
            let _ = tx.send(BgMessage { epoch, result });
        });
    }

    /// 取出一个当前 epoch 的结果；过期结果直接丢弃
    pub fn try_recv(&mut self) -> Option<BgResult> {
        while let Ok(msg) = self.rx.try_recv() {
            if let Some(result) = self.accept(msg) {
                return Some(result);
            }
        }
        None
    }

    /// 阻塞等待一个当前 epoch 的结果
    #[cfg(test)]
    pub fn recv_timeout(&mut self, timeout: std::time::Duration) -> Option<BgResult> {
        let deadline = std::time::Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(std::time::Instant::now());
            let msg = self.rx.recv_timeout(remaining).ok()?;
            if let Some(result) = self.accept(msg) {
                return Some(result);
            }
        }
    }

    fn accept(&mut self, msg: BgMessage) -> Option<BgResult> {
        if msg.epoch != self.epoch {
            tracing::debug!(epoch = msg.epoch, current = self.epoch, "dropping stale result");
            return None;
        }
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.in_flight == 0 {
            self.loading_message = None;
        }
        Some(msg.result)
    }

    /// 检查是否有活跃的异步操作
    pub fn has_active_operation(&self) -> bool {
        self.in_flight > 0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_new_creates_default_state() {
        let state = AsyncOpsState::new();
        assert_eq!(state.epoch(), 0);
        assert!(!state.has_active_operation());
        assert!(state.loading_message.is_none());
    }

    #[test]
    fn test_spawn_and_receive() {
        let mut state = AsyncOpsState::new();
        state.spawn("Loading tasks…", || BgResult::Loaded(Ok(Vec::new())));
        assert!(state.has_active_operation());
        assert_eq!(state.loading_message.as_deref(), Some("Loading tasks…"));

        let result = state.recv_timeout(Duration::from_secs(5));
        assert!(matches!(result, Some(BgResult::Loaded(Ok(ref v))) if v.is_empty()));
        assert!(!state.has_active_operation());
        assert!(state.loading_message.is_none());
    }

    #[test]
    fn test_stale_results_are_dropped() {
        let mut state = AsyncOpsState::new();
        state.spawn("Deleting…", || BgResult::Deleted {
            id: "1".to_string(),
            result: Ok(()),
        });
        state.invalidate();
        assert_eq!(state.epoch(), 1);
        assert!(state.recv_timeout(Duration::from_millis(300)).is_none());
        assert!(state.try_recv().is_none());
    }
}
