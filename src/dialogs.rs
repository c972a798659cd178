//! 对话框状态管理
//!
//! 新建任务弹窗的数据在 TaskView 中（草稿需要在关闭后保留），这里只管确认框和帮助面板。

pub use crate::ui::components::confirm_dialog::ConfirmType;

/// 对话框状态
#[derive(Debug, Default)]
pub struct DialogState {
    /// 是否显示帮助面板
    pub show_help: bool,
    /// 确认弹窗
    pub confirm_dialog: Option<ConfirmType>,
}

impl DialogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 关闭所有对话框
    pub fn close_all(&mut self) {
        self.show_help = false;
        self.confirm_dialog = None;
    }
}
