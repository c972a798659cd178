use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme::ThemeColors;

/// Header 总高度：上边框 + 标题行
pub const HEADER_HEIGHT: u16 = 2;

/// 渲染顶部区域（应用名 + 问候语）
pub fn render(frame: &mut Frame, area: Rect, user_name: Option<&str>, colors: &ThemeColors) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(colors.border));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let left = Span::styled(
        " ✓ Kiki Todo",
        Style::default()
            .fg(colors.highlight)
            .add_modifier(Modifier::BOLD),
    );

    let right = Span::styled(
        match user_name {
            Some(name) => format!("Hi, {} ", name),
            None => String::new(),
        },
        Style::default().fg(colors.muted),
    );

    // 计算中间填充空格
    let total_width = inner_area.width as usize;
    let used_width = left.width() + right.width();
    let padding = " ".repeat(total_width.saturating_sub(used_width));

    let line = Line::from(vec![left, Span::raw(padding), right]);
    frame.render_widget(Paragraph::new(line), inner_area);
}
