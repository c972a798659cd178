/// 截断字符串到指定最大长度，超出部分用省略号替代
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        format!("{}…", s.chars().take(max_len.saturating_sub(1)).collect::<String>())
    }
}

pub mod auth_form;
pub mod confirm_dialog;
pub mod dialog_utils;
pub mod empty_state;
pub mod footer;
pub mod header;
pub mod help_panel;
pub mod logo;
pub mod new_task_dialog;
pub mod search_bar;
pub mod stats;
pub mod task_list;
pub mod toast;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Buy milk", 20), "Buy milk");
        assert_eq!(truncate("Buy milk and eggs", 8), "Buy mil…");
    }
}
