use chrono::Local;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::model::Todo;
use crate::theme::ThemeColors;

use super::truncate;

/// 渲染任务表格
pub fn render(
    frame: &mut Frame,
    area: Rect,
    todos: &[&Todo],
    selected_index: Option<usize>,
    colors: &ThemeColors,
) {
    // 表头
    let header = Row::new(vec![
        Cell::from(""), // 选择指示器
        Cell::from(""), // 完成状态
        Cell::from("TASK"),
        Cell::from("DESCRIPTION"),
        Cell::from("PRIORITY"),
        Cell::from("CREATED"),
    ])
    .style(Style::default().fg(colors.muted))
    .height(1)
    .bottom_margin(1);

    // 描述列按可用宽度截断
    let desc_width = (area.width as usize / 3).max(8);

    let rows: Vec<Row> = todos
        .iter()
        .enumerate()
        .map(|(i, todo)| {
            let is_selected = selected_index == Some(i);
            let selector = if is_selected { "❯" } else { " " };
            let (checkbox, check_style) = if todo.completed {
                ("[✓]", Style::default().fg(colors.success))
            } else {
                ("[ ]", Style::default().fg(colors.muted))
            };

            let title_style = if todo.completed {
                Style::default()
                    .fg(colors.muted)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(colors.text)
            };

            let created = todo
                .created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d")
                .to_string();

            Row::new(vec![
                Cell::from(selector).style(Style::default().fg(colors.highlight)),
                Cell::from(checkbox).style(check_style),
                Cell::from(todo.title.clone()).style(title_style),
                Cell::from(truncate(&todo.description, desc_width))
                    .style(Style::default().fg(colors.muted)),
                Cell::from(todo.priority.label())
                    .style(Style::default().fg(colors.priority(todo.priority))),
                Cell::from(created).style(Style::default().fg(colors.muted)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(2),  // 选择器
        Constraint::Length(4),  // 完成状态
        Constraint::Fill(2),    // TASK (flex)
        Constraint::Fill(3),    // DESCRIPTION (flex)
        Constraint::Length(9),  // PRIORITY
        Constraint::Length(11), // CREATED
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::RIGHT)
                .border_style(Style::default().fg(colors.border)),
        )
        .row_highlight_style(
            Style::default()
                .bg(colors.bg_secondary)
                .add_modifier(Modifier::BOLD),
        );

    let mut table_state = TableState::default();
    table_state.select(selected_index);

    frame.render_stateful_widget(table, area, &mut table_state);
}
