use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::ThemeColors;

/// 渲染空状态；有搜索词时提示无结果，否则引导创建
pub fn render(frame: &mut Frame, area: Rect, searching: bool, colors: &ThemeColors) {
    let (message, hint) = get_hint_text(searching);

    let mut lines = vec![
        Line::from(Span::styled(
            message,
            Style::default()
                .fg(colors.text)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(hint, Style::default().fg(colors.muted))),
    ];
    if !searching {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(colors.text)),
            Span::styled(
                " n ",
                Style::default()
                    .fg(colors.highlight)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("to add a task", Style::default().fg(colors.text)),
        ]));
    }

    // 垂直居中
    let height = lines.len() as u16;
    let y_offset = area.height.saturating_sub(height) / 2;
    let centered_area = Rect {
        x: area.x,
        y: area.y + y_offset,
        width: area.width,
        height: height.min(area.height),
    };

    let hint_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(hint_widget, centered_area);
}

fn get_hint_text(searching: bool) -> (&'static str, &'static str) {
    if searching {
        ("No tasks", "No results found")
    } else {
        ("No tasks", "Create your first task to get started")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_text() {
        assert_eq!(get_hint_text(true).1, "No results found");
        assert_eq!(get_hint_text(false).1, "Create your first task to get started");
    }
}
