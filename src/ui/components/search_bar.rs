//! 过滤栏组件：搜索框 + 优先级过滤 + 是否显示已完成

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::model::{PriorityFilter, TaskFilter};
use crate::theme::ThemeColors;

/// 渲染过滤栏
/// is_editing: 是否正在输入（显示光标）
pub fn render(
    frame: &mut Frame,
    area: Rect,
    filter: &TaskFilter,
    is_editing: bool,
    colors: &ThemeColors,
) {
    let mut spans = vec![Span::styled(" /", Style::default().fg(colors.highlight))];

    if filter.search.is_empty() && !is_editing {
        spans.push(Span::styled(
            "Search tasks…",
            Style::default().fg(colors.muted),
        ));
    } else {
        spans.push(Span::styled(
            filter.search.as_str(),
            Style::default().fg(colors.text),
        ));
    }

    // 只在输入模式显示闪烁光标
    if is_editing {
        spans.push(Span::styled(
            "█",
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::SLOW_BLINK),
        ));
    }

    let priority_color = match filter.priority {
        PriorityFilter::All => colors.muted,
        PriorityFilter::Only(p) => colors.priority(p),
    };
    let checkbox = if filter.show_completed { "[x]" } else { "[ ]" };

    spans.push(Span::raw("    "));
    spans.push(Span::styled("p ", Style::default().fg(colors.highlight)));
    spans.push(Span::styled(
        filter.priority.label(),
        Style::default().fg(priority_color),
    ));
    spans.push(Span::raw("    "));
    spans.push(Span::styled("c ", Style::default().fg(colors.highlight)));
    spans.push(Span::styled(
        format!("{} Show completed", checkbox),
        Style::default().fg(colors.text),
    ));

    let paragraph =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(colors.bg_secondary));
    frame.render_widget(paragraph, area);
}
