//! 界面渲染

pub mod auth;
pub mod components;
pub mod tasks;

use ratatui::Frame;

use crate::api::TodoApi;
use crate::app::{App, Screen};
use crate::storage::token::TokenStore;

use components::toast;

/// 按当前页面渲染，Toast 叠加在最上层
pub fn render<A: TodoApi, S: TokenStore>(frame: &mut Frame, app: &App<A, S>) {
    match app.screen {
        Screen::Restoring if app.session.is_loading() => auth::render_restoring(frame, app),
        Screen::Restoring => auth::render(frame, app),
        Screen::Auth => auth::render(frame, app),
        Screen::Tasks => tasks::render(frame, app),
    }

    let colors = &app.ui.colors;
    if app.async_ops.has_active_operation() {
        toast::render_loading(frame, app.loading_message().unwrap_or("Working…"), colors);
    } else if let Some(ref t) = app.ui.toast {
        if !t.is_expired() {
            toast::render(frame, t, colors);
        }
    }
}
