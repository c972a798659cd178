//! New Task 弹窗组件

use ratatui::{
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::model::{Draft, Priority};
use crate::task_view::DraftField;
use crate::theme::ThemeColors;

use super::dialog_utils::{center_dialog, render_dialog_frame, render_hint};

/// 渲染 New Task 弹窗
pub fn render(frame: &mut Frame, draft: &Draft, field: DraftField, colors: &ThemeColors) {
    let width = 64u16.min(frame.area().width.saturating_sub(4));
    let area = center_dialog(frame.area(), width, 11);
    let inner_area = render_dialog_frame(frame, area, " New Task ", colors.highlight, colors);

    // 空行 + 标题 + 空行 + 描述 + 空行 + 优先级 + 弹性 + 提示行
    let [_, title_area, _, desc_area, _, priority_area, _, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(inner_area);

    frame.render_widget(
        Paragraph::new(text_line(
            "Title",
            &draft.title,
            field == DraftField::Title,
            colors,
        )),
        title_area,
    );

    let description = if draft.description.is_empty() && field != DraftField::Description {
        "(optional)"
    } else {
        draft.description.as_str()
    };
    frame.render_widget(
        Paragraph::new(text_line(
            "Details",
            description,
            field == DraftField::Description,
            colors,
        )),
        desc_area,
    );

    frame.render_widget(
        Paragraph::new(priority_line(
            draft.priority,
            field == DraftField::Priority,
            colors,
        )),
        priority_area,
    );

    let hints: &[(&str, &str)] = if field == DraftField::Priority {
        &[("←/→", "priority"), ("Tab", "next"), ("Enter", "create"), ("Esc", "cancel")]
    } else {
        &[("Tab", "next"), ("Enter", "create"), ("Esc", "cancel")]
    };
    render_hint(frame, hint_area, hints, colors);
}

fn label_style(active: bool, colors: &ThemeColors) -> Style {
    if active {
        Style::default()
            .fg(colors.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.muted)
    }
}

fn text_line<'a>(label: &'a str, value: &'a str, active: bool, colors: &ThemeColors) -> Line<'a> {
    let mut spans = vec![
        Span::styled(format!("  {:<9}", label), label_style(active, colors)),
        Span::styled(value, Style::default().fg(colors.text)),
    ];
    if active {
        spans.push(Span::styled("█", Style::default().fg(colors.highlight)));
    }
    Line::from(spans)
}

/// 三个优先级并排，当前值加粗
fn priority_line(current: Priority, active: bool, colors: &ThemeColors) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("  {:<9}", "Priority"),
        label_style(active, colors),
    )];
    for &p in Priority::all() {
        let style = if p == current {
            Style::default()
                .fg(colors.priority(p))
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(colors.muted)
        };
        spans.push(Span::styled(format!(" {} ", p.label()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}
