//! 登录页与会话恢复页

use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
    Frame,
};

use crate::api::TodoApi;
use crate::app::App;
use crate::storage::token::TokenStore;

use super::components::{auth_form, logo};

/// 渲染登录 / 注册页
pub fn render<A: TodoApi, S: TokenStore>(frame: &mut Frame, app: &App<A, S>) {
    let colors = &app.ui.colors;
    Block::default()
        .style(Style::default().bg(colors.bg))
        .render(frame.area(), frame.buffer_mut());

    // Logo 放在表单上方，空间不足时省略
    let form_height = 13;
    if frame.area().height >= form_height + logo::LOGO_HEIGHT * 2 + 2 {
        let [_, logo_area, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(logo::LOGO_HEIGHT),
            Constraint::Length(form_height + logo::LOGO_HEIGHT + 2),
        ])
        .areas(frame.area());
        logo::render(frame, logo_area, colors);
    }

    auth_form::render(frame, &app.auth, colors);
}

/// 渲染启动时的会话恢复页
pub fn render_restoring<A: TodoApi, S: TokenStore>(frame: &mut Frame, app: &App<A, S>) {
    let colors = &app.ui.colors;
    let area = frame.area();
    Block::default()
        .style(Style::default().bg(colors.bg))
        .render(area, frame.buffer_mut());

    let [_, logo_area, _, text_area, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(logo::LOGO_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);

    logo::render(frame, logo_area, colors);
    let text = Paragraph::new(Line::from(Span::styled(
        "Checking your session…",
        Style::default().fg(colors.muted),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(text, text_area);
}
