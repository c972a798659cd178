//! 弹窗公用的布局与边框

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::ThemeColors;

/// 在 `outer` 中居中放置 width x height 的区域，超出时缩到 `outer` 大小
pub fn center_dialog(outer: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(outer.width);
    let height = height.min(outer.height);
    Rect {
        x: outer.x + (outer.width - width) / 2,
        y: outer.y + (outer.height - height) / 2,
        width,
        height,
    }
}

/// 清空区域并画出带标题的边框，返回边框内的区域
pub fn render_dialog_frame(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    accent: Color,
    colors: &ThemeColors,
) -> Rect {
    let accent_style = Style::default().fg(accent);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(accent_style)
        .title(title)
        .title_alignment(Alignment::Center)
        .title_style(accent_style.add_modifier(Modifier::BOLD))
        .style(Style::default().bg(colors.bg));

    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);
    inner
}

/// 底部按键提示：`Enter create  Esc cancel`
pub fn render_hint(frame: &mut Frame, area: Rect, hints: &[(&str, &str)], colors: &ThemeColors) {
    let key_style = Style::default().fg(colors.highlight);
    let text_style = Style::default().fg(colors.muted);

    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, &(key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", text_style));
        }
        spans.push(Span::styled(key, key_style));
        spans.push(Span::styled(format!(" {}", action), text_style));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_dialog_fits_and_centers() {
        let outer = Rect::new(0, 0, 100, 40);
        assert_eq!(center_dialog(outer, 60, 10), Rect::new(20, 15, 60, 10));
    }

    #[test]
    fn test_center_dialog_shrinks_to_small_terminal() {
        let outer = Rect::new(2, 1, 30, 8);
        assert_eq!(center_dialog(outer, 64, 11), Rect::new(2, 1, 30, 8));
    }
}
