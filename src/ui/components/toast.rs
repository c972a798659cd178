use std::time::{SystemTime, UNIX_EPOCH};

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::ThemeColors;
use crate::ui_state::Toast;

const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// 在屏幕底部居中显示 Toast 消息（错误用错误色边框）
pub fn render(frame: &mut Frame, toast: &Toast, colors: &ThemeColors) {
    let border = if toast.is_error() {
        colors.error
    } else {
        colors.success
    };
    render_box(frame, &toast.message, border, colors);
}

/// 在屏幕底部居中显示 Loading Toast（带 spinner 动画）
pub fn render_loading(frame: &mut Frame, message: &str, colors: &ThemeColors) {
    // 选择 spinner 帧（基于时间，每 100ms 切换）
    let tick = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
        / 100;
    let spinner = SPINNER_FRAMES[(tick as usize) % SPINNER_FRAMES.len()];
    let display = format!("{} {}", spinner, message);
    render_box(frame, &display, colors.highlight, colors);
}

fn render_box(frame: &mut Frame, message: &str, border: Color, colors: &ThemeColors) {
    let area = frame.area();
    if area.width < 8 || area.height < 6 {
        return;
    }

    let toast_width = (message.chars().count() + 6).min(area.width as usize - 4) as u16;
    let toast_height = 3;
    let toast_x = (area.width - toast_width) / 2;
    let toast_y = area.height - toast_height - 3;

    let toast_area = Rect::new(toast_x, toast_y, toast_width, toast_height);

    frame.render_widget(Clear, toast_area);

    let toast = Paragraph::new(message)
        .style(
            Style::default()
                .fg(colors.text)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .style(Style::default().bg(colors.bg)),
        );

    frame.render_widget(toast, toast_area);
}
