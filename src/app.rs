use std::path::PathBuf;
use std::time::Duration;

use crate::api::TodoApi;
use crate::async_ops_state::{AsyncOpsState, BgResult};
use crate::dialogs::{ConfirmType, DialogState};
use crate::notice::Notices;
use crate::session::Session;
use crate::storage::config::Config;
use crate::storage::save_toml;
use crate::storage::token::TokenStore;
use crate::task_view::TaskView;
use crate::theme::Theme;
use crate::ui::components::auth_form::{AuthForm, AuthMode};
use crate::ui_state::UiState;

/// 当前页面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// 正在校验保存的 token
    Restoring,
    Auth,
    Tasks,
}

/// 全局应用状态
pub struct App<A: TodoApi, S: TokenStore> {
    /// 是否应该退出
    pub should_quit: bool,
    pub screen: Screen,
    pub session: Session<A, S>,
    pub tasks: TaskView,
    pub auth: AuthForm,
    /// 等待显示的通知
    pub notices: Notices,
    pub ui: UiState,
    pub dialogs: DialogState,
    pub async_ops: AsyncOpsState,
    pub config: Config,
    /// 主题切换后写回的配置文件（None 表示不写）
    config_path: Option<PathBuf>,
}

impl<A: TodoApi, S: TokenStore> App<A, S> {
    pub fn new(session: Session<A, S>, config: Config, config_path: Option<PathBuf>) -> Self {
        let theme = Theme::from_name(&config.theme.name);
        let ui = UiState::new(theme, Duration::from_secs(config.ui.toast_secs));
        Self {
            should_quit: false,
            screen: Screen::Restoring,
            session,
            tasks: TaskView::new(),
            auth: AuthForm::default(),
            notices: Notices::new(),
            ui,
            dialogs: DialogState::new(),
            async_ops: AsyncOpsState::new(),
            config,
            config_path,
        }
    }

    // ========== Session ==========

    /// 启动：有保存的 token 则后台校验，否则直接进入登录页
    pub fn start(&mut self) {
        match self.session.begin_restore() {
            Some(token) => {
                self.screen = Screen::Restoring;
                let mut probe = self.session.api().clone();
                probe.set_token(Some(token.clone()));
                self.async_ops.spawn("Restoring session…", move || {
                    let result = probe.me();
                    BgResult::Restore { token, result }
                });
            }
            None => self.screen = Screen::Auth,
        }
    }

    /// 提交登录 / 注册表单
    pub fn submit_auth(&mut self) {
        if self.auth.submitting {
            return;
        }
        if let Err(message) = self.auth.validate() {
            self.notices.error(message);
            self.flush_notices();
            return;
        }
        self.auth.submitting = true;
        let api = self.session.api().clone();
        let email = self.auth.email.trim().to_string();
        let password = self.auth.password.clone();
        match self.auth.mode {
            AuthMode::Login => {
                self.async_ops.spawn("Signing in…", move || {
                    BgResult::Login(api.login(&email, &password))
                });
            }
            AuthMode::Register => {
                let name = self.auth.name.trim().to_string();
                self.async_ops.spawn("Creating account…", move || {
                    BgResult::Register(api.register(&email, &password, &name))
                });
            }
        }
    }

    /// 登出：丢弃进行中的请求和任务列表，回到登录页
    pub fn logout(&mut self) {
        self.session.logout(&mut self.notices);
        self.async_ops.invalidate();
        self.tasks = TaskView::new();
        self.auth.reset_keep_email();
        self.dialogs.close_all();
        self.screen = Screen::Auth;
        self.flush_notices();
    }

    fn enter_tasks(&mut self) {
        self.screen = Screen::Tasks;
        self.tasks = TaskView::new();
        self.auth.password.clear();
        self.reload_tasks();
    }

    // ========== Tasks ==========

    pub fn reload_tasks(&mut self) {
        self.tasks.phase = crate::task_view::Phase::Loading;
        let api = self.session.api().clone();
        self.async_ops
            .spawn("Loading tasks…", move || BgResult::Loaded(api.list_todos()));
    }

    /// 提交新建弹窗
    pub fn submit_new_task(&mut self) {
        let Some(request) = self.tasks.prepare_create(&mut self.notices) else {
            self.flush_notices();
            return;
        };
        let api = self.session.api().clone();
        self.async_ops.spawn("Creating task…", move || {
            BgResult::Created(api.create_todo(&request))
        });
    }

    pub fn toggle_selected(&mut self) {
        let Some(id) = self.tasks.selected_todo().map(|t| t.id.clone()) else {
            return;
        };
        let Some(update) = self.tasks.prepare_toggle(&id) else {
            return;
        };
        let api = self.session.api().clone();
        self.async_ops.spawn("Updating task…", move || {
            let result = api.update_todo(&id, &update);
            BgResult::Toggled { id, result }
        });
    }

    pub fn cycle_selected_priority(&mut self) {
        let Some(id) = self.tasks.selected_todo().map(|t| t.id.clone()) else {
            return;
        };
        let Some(update) = self.tasks.prepare_cycle_priority(&id) else {
            return;
        };
        let api = self.session.api().clone();
        self.async_ops.spawn("Updating task…", move || {
            let result = api.update_todo(&id, &update);
            BgResult::Updated { id, result }
        });
    }

    /// 打开删除确认框
    pub fn request_delete(&mut self) {
        if let Some(todo) = self.tasks.selected_todo() {
            self.dialogs.confirm_dialog = Some(ConfirmType::DeleteTask {
                id: todo.id.clone(),
                title: todo.title.clone(),
            });
        }
    }

    pub fn confirm_action(&mut self) {
        let Some(confirm) = self.dialogs.confirm_dialog.take() else {
            return;
        };
        match confirm {
            ConfirmType::DeleteTask { id, .. } => {
                let api = self.session.api().clone();
                self.async_ops.spawn("Deleting task…", move || {
                    let result = api.delete_todo(&id);
                    BgResult::Deleted { id, result }
                });
            }
        }
    }

    pub fn cancel_confirm(&mut self) {
        self.dialogs.confirm_dialog = None;
    }

    // ========== Background results ==========

    /// 每个 tick 调用：合并后台结果并刷新 Toast
    pub fn poll_bg_result(&mut self) {
        while let Some(result) = self.async_ops.try_recv() {
            self.apply(result);
        }
        self.flush_notices();
        self.ui.clear_expired_toast();
    }

    fn apply(&mut self, result: BgResult) {
        match result {
            BgResult::Restore { token, result } => {
                if self.session.finish_restore(token, result) {
                    self.enter_tasks();
                } else {
                    self.screen = Screen::Auth;
                }
            }
            BgResult::Login(result) => {
                self.auth.submitting = false;
                if self.session.finish_login(result, &mut self.notices).is_ok() {
                    self.enter_tasks();
                }
            }
            BgResult::Register(result) => {
                self.auth.submitting = false;
                if self.session.finish_register(result, &mut self.notices).is_ok() {
                    self.enter_tasks();
                }
            }
            BgResult::Loaded(result) => self.tasks.finish_load(result, &mut self.notices),
            BgResult::Created(result) => {
                self.tasks.finish_create(result, &mut self.notices);
            }
            BgResult::Toggled { id, result } => {
                self.tasks.finish_toggle(&id, result, &mut self.notices);
            }
            BgResult::Updated { id, result } => {
                self.tasks.finish_update(&id, result, &mut self.notices);
            }
            BgResult::Deleted { id, result } => {
                self.tasks.finish_delete(&id, result, &mut self.notices);
            }
        }
    }

    /// 通知转为 Toast，最新的覆盖旧的
    fn flush_notices(&mut self) {
        for notice in self.notices.drain() {
            self.ui.show_notice(notice);
        }
    }

    /// 后台操作进行中时显示的消息
    pub fn loading_message(&self) -> Option<&str> {
        self.async_ops.loading_message.as_deref()
    }

    // ========== Misc ==========

    /// 切换到下一个主题并写回配置
    pub fn cycle_theme(&mut self) {
        let theme = self.ui.theme.next();
        self.ui.set_theme(theme);
        self.config.theme.name = theme.label().to_string();
        if let Some(path) = &self.config_path {
            if let Err(e) = save_toml(path, &self.config) {
                tracing::warn!(error = %e, "failed to save theme");
            }
        }
        self.notices.success(format!("Theme: {}", theme.label()));
        self.flush_notices();
    }

    pub fn toggle_help(&mut self) {
        self.dialogs.show_help = !self.dialogs.show_help;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

// ============================================================================
// Tests
// ============================================================================
