use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::api::TodoApi;
use crate::app::{App, Screen};
use crate::storage::token::TokenStore;
use crate::task_view::DraftField;

/// 处理事件，返回 true 表示应该继续运行
pub fn handle_events<A: TodoApi, S: TokenStore>(app: &mut App<A, S>) -> io::Result<bool> {
    // 合并后台结果，更新 Toast 状态
    app.poll_bg_result();

    // 轮询事件（100ms 超时）
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            // 只处理按下事件
            if key.kind != KeyEventKind::Press {
                return Ok(true);
            }
            handle_key(app, key);
        }
    }

    Ok(!app.should_quit)
}

pub(crate) fn handle_key<A: TodoApi, S: TokenStore>(app: &mut App<A, S>, key: KeyEvent) {
    // Ctrl+C 任何时候都退出
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match app.screen {
        Screen::Restoring => {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                app.quit();
            }
        }
        Screen::Auth => handle_auth_key(app, key),
        Screen::Tasks => handle_tasks_key(app, key),
    }
}

/// 登录页
fn handle_auth_key<A: TodoApi, S: TokenStore>(app: &mut App<A, S>, key: KeyEvent) {
    if app.auth.submitting {
        if key.code == KeyCode::Esc {
            app.quit();
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.quit(),
        KeyCode::Enter => app.submit_auth(),
        KeyCode::Tab | KeyCode::Down | KeyCode::Up => app.auth.next_field(),
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.auth.toggle_mode();
        }
        KeyCode::Backspace => app.auth.delete_char(),
        KeyCode::Char(c) => app.auth.input_char(c),
        _ => {}
    }
}

/// 任务页
fn handle_tasks_key<A: TodoApi, S: TokenStore>(app: &mut App<A, S>, key: KeyEvent) {
    // 优先处理弹窗事件

    // 帮助面板
    if app.dialogs.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.toggle_help();
        }
        return;
    }

    // 确认弹窗
    if app.dialogs.confirm_dialog.is_some() {
        handle_confirm_dialog_key(app, key);
        return;
    }

    // New Task 弹窗
    if app.tasks.form_open {
        handle_new_task_dialog_key(app, key);
        return;
    }

    // 搜索模式
    if app.tasks.search_mode {
        handle_search_key(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),

        // 导航
        KeyCode::Char('j') | KeyCode::Down => app.tasks.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.tasks.select_previous(),

        // 完成 / 取消完成
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected(),

        KeyCode::Char('n') => app.tasks.open_form(),
        KeyCode::Char('d') | KeyCode::Char('x') => app.request_delete(),
        KeyCode::Char('P') => app.cycle_selected_priority(),

        // 过滤
        KeyCode::Char('/') => app.tasks.enter_search_mode(),
        KeyCode::Char('p') => app.tasks.cycle_priority_filter(),
        KeyCode::Char('c') => app.tasks.toggle_show_completed(),
        KeyCode::Esc if app.tasks.filter.is_searching() => app.tasks.clear_search(),

        KeyCode::Char('r') => app.reload_tasks(),
        KeyCode::Char('t') => app.cycle_theme(),
        KeyCode::Char('L') => app.logout(),
        KeyCode::Char('?') => app.toggle_help(),
        _ => {}
    }
}

fn handle_confirm_dialog_key<A: TodoApi, S: TokenStore>(app: &mut App<A, S>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_action(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_confirm(),
        _ => {}
    }
}

fn handle_new_task_dialog_key<A: TodoApi, S: TokenStore>(app: &mut App<A, S>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.tasks.close_form(),
        KeyCode::Enter => app.submit_new_task(),
        KeyCode::Tab => app.tasks.next_draft_field(),
        KeyCode::Left if app.tasks.draft_field == DraftField::Priority => {
            app.tasks.cycle_draft_priority(false);
        }
        KeyCode::Right if app.tasks.draft_field == DraftField::Priority => {
            app.tasks.cycle_draft_priority(true);
        }
        KeyCode::Backspace => app.tasks.draft_pop(),
        KeyCode::Char(c) => app.tasks.draft_push(c),
        _ => {}
    }
}

fn handle_search_key<A: TodoApi, S: TokenStore>(app: &mut App<A, S>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.tasks.clear_search(),
        KeyCode::Enter => app.tasks.exit_search_mode(),
        KeyCode::Backspace => app.tasks.search_pop(),
        KeyCode::Char(c) => app.tasks.search_push(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{todo, FakeApi};
    use crate::model::{Priority, PriorityFilter};
    use crate::session::Session;
    use crate::storage::config::Config;
    use crate::storage::token::MemoryTokenStore;
    use crate::ui::components::auth_form::AuthMode;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str<A: TodoApi, S: TokenStore>(app: &mut App<A, S>, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c)));
        }
    }

    fn tasks_app() -> App<FakeApi, MemoryTokenStore> {
        let fake = FakeApi::new().with_todos(vec![todo("1", "Buy milk"), todo("2", "Walk dog")]);
        let mut app = App::new(
            Session::new(fake, MemoryTokenStore::new()),
            Config::default(),
            None,
        );
        app.screen = Screen::Tasks;
        app.tasks.todos = vec![todo("1", "Buy milk"), todo("2", "Walk dog")];
        app.tasks.phase = crate::task_view::Phase::Ready;
        app
    }

    #[test]
    fn test_auth_typing_and_mode_toggle() {
        let mut app = tasks_app();
        app.screen = Screen::Auth;
        type_str(&mut app, "ana@example.com");
        handle_key(&mut app, key(KeyCode::Tab));
        type_str(&mut app, "pw");
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
        );
        assert_eq!(app.auth.email, "ana@example.com");
        assert_eq!(app.auth.password, "pw");
        assert_eq!(app.auth.mode, AuthMode::Register);
    }

    #[test]
    fn test_search_mode_captures_keys() {
        let mut app = tasks_app();
        handle_key(&mut app, key(KeyCode::Char('/')));
        type_str(&mut app, "milk");
        assert_eq!(app.tasks.filter.search, "milk");
        assert!(!app.should_quit);
        assert_eq!(app.tasks.visible().len(), 1);

        handle_key(&mut app, key(KeyCode::Enter));
        assert!(!app.tasks.search_mode);
        assert_eq!(app.tasks.filter.search, "milk");

        handle_key(&mut app, key(KeyCode::Esc));
        assert!(app.tasks.filter.search.is_empty());
    }

    #[test]
    fn test_filter_keys() {
        let mut app = tasks_app();
        handle_key(&mut app, key(KeyCode::Char('p')));
        assert_eq!(app.tasks.filter.priority, PriorityFilter::Only(Priority::High));
        handle_key(&mut app, key(KeyCode::Char('c')));
        assert!(!app.tasks.filter.show_completed);
    }

    #[test]
    fn test_new_task_dialog_keys() {
        let mut app = tasks_app();
        handle_key(&mut app, key(KeyCode::Char('n')));
        assert!(app.tasks.form_open);
        type_str(&mut app, "quit?");
        assert!(!app.should_quit);
        assert_eq!(app.tasks.draft.title, "quit?");

        handle_key(&mut app, key(KeyCode::Tab));
        handle_key(&mut app, key(KeyCode::Tab));
        handle_key(&mut app, key(KeyCode::Left));
        assert_eq!(app.tasks.draft.priority, Priority::Medium.prev());

        handle_key(&mut app, key(KeyCode::Esc));
        assert!(!app.tasks.form_open);
        assert_eq!(app.tasks.draft.title, "quit?");
    }

    #[test]
    fn test_delete_opens_confirm_and_cancel() {
        let mut app = tasks_app();
        handle_key(&mut app, key(KeyCode::Char('j')));
        handle_key(&mut app, key(KeyCode::Char('d')));
        assert!(app.dialogs.confirm_dialog.is_some());
        handle_key(&mut app, key(KeyCode::Char('n')));
        assert!(app.dialogs.confirm_dialog.is_none());
        assert!(!app.tasks.form_open);
    }

    #[test]
    fn test_quit() {
        let mut app = tasks_app();
        handle_key(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }
}
