//! 任务页渲染

use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    widgets::{Block, Borders, Widget},
    Frame,
};

use crate::api::TodoApi;
use crate::app::App;
use crate::storage::token::TokenStore;

use super::components::{
    confirm_dialog, empty_state, footer, header, help_panel, new_task_dialog, search_bar, stats,
    task_list,
};

/// 渲染任务页
pub fn render<A: TodoApi, S: TokenStore>(frame: &mut Frame, app: &App<A, S>) {
    let area = frame.area();
    let colors = &app.ui.colors;
    let view = &app.tasks;

    // 填充整个背景
    Block::default()
        .style(Style::default().bg(colors.bg))
        .render(area, frame.buffer_mut());

    let [header_area, stats_area, filter_area, content_area, footer_area] = Layout::vertical([
        Constraint::Length(header::HEADER_HEIGHT),
        Constraint::Length(stats::STATS_HEIGHT),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(3),
    ])
    .areas(area);

    header::render(
        frame,
        header_area,
        app.session.user().map(|u| u.name.as_str()),
        colors,
    );
    stats::render(frame, stats_area, &view.stats(), colors);
    search_bar::render(frame, filter_area, &view.filter, view.search_mode, colors);

    let visible = view.visible();
    // Loading 阶段由 spinner toast 占位
    if !view.is_loading() {
        if visible.is_empty() {
            let block = Block::default()
                .borders(Borders::LEFT | Borders::RIGHT)
                .border_style(Style::default().fg(colors.border));
            let inner = block.inner(content_area);
            frame.render_widget(block, content_area);
            empty_state::render(frame, inner, view.filter.is_searching(), colors);
        } else {
            task_list::render(frame, content_area, &visible, view.selected, colors);
        }
    }

    footer::render(
        frame,
        footer_area,
        !visible.is_empty(),
        view.search_mode,
        colors,
    );

    // 弹窗
    if view.form_open {
        new_task_dialog::render(frame, &view.draft, view.draft_field, colors);
    }
    if let Some(ref confirm) = app.dialogs.confirm_dialog {
        confirm_dialog::render(frame, confirm, colors);
    }
    if app.dialogs.show_help {
        help_panel::render(frame, colors);
    }
}
