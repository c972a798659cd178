//! UI 状态管理
//!
//! 管理与显示相关的状态：主题、颜色、Toast。

use std::time::{Duration, Instant};

use crate::notice::{Notice, NoticeLevel};
use crate::theme::{get_theme_colors, Theme, ThemeColors};

/// Toast 消息
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: NoticeLevel,
    pub expires_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, level: NoticeLevel, duration: Duration) -> Self {
        Self {
            message: message.into(),
            level,
            expires_at: expiry(Instant::now(), duration),
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// 过大的时长视为一直显示（约一年）
fn expiry(now: Instant, duration: Duration) -> Instant {
    now.checked_add(duration)
        .or_else(|| now.checked_add(Duration::from_secs(365 * 24 * 3600)))
        .unwrap_or(now)
}

/// UI 状态
#[derive(Debug)]
pub struct UiState {
    /// Toast 提示
    pub toast: Option<Toast>,
    /// Toast 显示时长
    pub toast_duration: Duration,
    /// 当前主题
    pub theme: Theme,
    /// 当前颜色方案
    pub colors: ThemeColors,
}

impl UiState {
    pub fn new(theme: Theme, toast_duration: Duration) -> Self {
        Self {
            toast: None,
            toast_duration,
            theme,
            colors: get_theme_colors(theme),
        }
    }

    /// 显示通知；错误提示停留更久
    pub fn show_notice(&mut self, notice: Notice) {
        let duration = match notice.level {
            NoticeLevel::Success => self.toast_duration,
            NoticeLevel::Error => self.toast_duration.saturating_add(Duration::from_secs(1)),
        };
        self.toast = Some(Toast::new(notice.message, notice.level, duration));
    }

    /// 清除过期的 Toast
    pub fn clear_expired_toast(&mut self) {
        if let Some(ref toast) = self.toast {
            if toast.is_expired() {
                self.toast = None;
            }
        }
    }

    /// 更新主题
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.colors = get_theme_colors(theme);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(level: NoticeLevel, message: &str) -> Notice {
        Notice {
            level,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_new_creates_default_state() {
        let state = UiState::new(Theme::Nord, Duration::from_secs(2));
        assert!(state.toast.is_none());
        assert_eq!(state.theme, Theme::Nord);
    }

    #[test]
    fn test_show_notice_latest_wins() {
        let mut state = UiState::new(Theme::Dark, Duration::from_secs(2));
        state.show_notice(notice(NoticeLevel::Success, "Task created"));
        state.show_notice(notice(NoticeLevel::Error, "Failed to delete task"));
        let toast = state.toast.as_ref().unwrap();
        assert_eq!(toast.message, "Failed to delete task");
        assert!(toast.is_error());
    }

    #[test]
    fn test_toast_expiry() {
        let toast = Toast::new("Test", NoticeLevel::Success, Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(2));
        assert!(toast.is_expired());
    }

    #[test]
    fn test_clear_expired_toast() {
        let mut state = UiState::new(Theme::Dark, Duration::from_millis(1));
        state.show_notice(notice(NoticeLevel::Success, "Signed out"));
        assert!(state.toast.is_some());

        std::thread::sleep(Duration::from_millis(5));
        state.clear_expired_toast();
        assert!(state.toast.is_none());
    }

    #[test]
    fn test_huge_toast_duration_does_not_overflow() {
        let mut state = UiState::new(Theme::Dark, Duration::from_secs(u64::MAX));
        state.show_notice(notice(NoticeLevel::Error, "Failed to load tasks"));
        state.show_notice(notice(NoticeLevel::Success, "Task created"));
        let toast = state.toast.as_ref().unwrap();
        assert!(!toast.is_expired());
    }

    #[test]
    fn test_set_theme() {
        let mut state = UiState::new(Theme::Dark, Duration::from_secs(2));
        state.set_theme(Theme::Catppuccin);
        assert_eq!(state.theme, Theme::Catppuccin);
    }
}
