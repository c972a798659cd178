//! 任务视图状态
//!
//! 保存任务列表和本地 UI 状态（搜索、优先级过滤、是否显示已完成、新建草稿）。
//! 列表只在服务端确认后才修改；失败的操作只产生一条错误通知。

use crate::api::TodoApi;
use crate::error::ApiError;
use crate::model::{
    filter_tasks, CreateTodo, Draft, Priority, TaskFilter, TaskStats, Todo, UpdateTodo,
};
use crate::notice::Notices;

/// 加载阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
}

/// 新建弹窗中的输入框
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftField {
    #[default]
    Title,
    Description,
    Priority,
}

impl DraftField {
    pub fn next(&self) -> Self {
        match self {
            DraftField::Title => DraftField::Description,
            DraftField::Description => DraftField::Priority,
            DraftField::Priority => DraftField::Title,
        }
    }
}

#[derive(Debug)]
pub struct TaskView {
    /// 完整列表（最新创建的在前）
    pub todos: Vec<Todo>,
    pub filter: TaskFilter,
    pub draft: Draft,
    pub draft_field: DraftField,
    /// 新建弹窗是否打开
    pub form_open: bool,
    /// 搜索输入模式
    pub search_mode: bool,
    pub phase: Phase,
    /// 在可见列表中的选中位置
    pub selected: Option<usize>,
}

impl Default for TaskView {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskView {
    pub fn new() -> Self {
        Self {
            todos: Vec::new(),
            filter: TaskFilter::default(),
            draft: Draft::default(),
            draft_field: DraftField::Title,
            form_open: false,
            search_mode: false,
            phase: Phase::Loading,
            selected: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    // ========== Derived ==========

    /// 过滤后的可见列表
    pub fn visible(&self) -> Vec<&Todo> {
        filter_tasks(&self.todos, &self.filter)
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::from_todos(&self.todos)
    }

    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn selected_todo(&self) -> Option<&Todo> {
        let index = self.selected?;
        self.visible().get(index).copied()
    }

    // ========== Load ==========

    pub fn load_tasks<A: TodoApi>(&mut self, api: &A, notices: &mut Notices) {
        let result = api.list_todos();
        self.finish_load(result, notices);
    }

    pub fn finish_load(&mut self, result: Result<Vec<Todo>, ApiError>, notices: &mut Notices) {
        match result {
            Ok(todos) => {
                tracing::info!(count = todos.len(), "tasks loaded");
                self.todos = todos;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load tasks");
                notices.error(e.user_message("Failed to load tasks"));
            }
        }
        self.phase = Phase::Ready;
        self.clamp_selection();
    }

    // ========== Create ==========

    /// 校验草稿；标题为空时通知并返回 None
    pub fn prepare_create(&self, notices: &mut Notices) -> Option<CreateTodo> {
        let request = self.draft.to_request();
        if request.is_none() {
            notices.error("Title is required");
        }
        request
    }

    pub fn create_task<A: TodoApi>(&mut self, api: &A, notices: &mut Notices) -> bool {
        let Some(request) = self.prepare_create(notices) else {
            return false;
        };
        let result = api.create_todo(&request);
        self.finish_create(result, notices)
    }

    pub fn finish_create(&mut self, result: Result<Todo, ApiError>, notices: &mut Notices) -> bool {
        match result {
            Ok(todo) => {
                tracing::info!(id = %todo.id, "task created");
                self.todos.insert(0, todo);
                self.draft = Draft::default();
                self.draft_field = DraftField::Title;
                self.form_open = false;
                notices.success("Task created");
                self.clamp_selection();
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to create task");
                notices.error(e.user_message("Failed to create task"));
                false
            }
        }
    }

    // ========== Toggle / Update ==========

    /// 计算切换完成状态的请求；id 不存在时返回 None
    pub fn prepare_toggle(&self, id: &str) -> Option<UpdateTodo> {
        self.get(id).map(|t| UpdateTodo::completed(!t.completed))
    }

    pub fn toggle_complete<A: TodoApi>(&mut self, api: &A, id: &str, notices: &mut Notices) -> bool {
        let Some(update) = self.prepare_toggle(id) else {
            return false;
        };
        let result = api.update_todo(id, &update);
        self.finish_toggle(id, result, notices)
    }

    pub fn finish_toggle(
        &mut self,
        id: &str,
        result: Result<Todo, ApiError>,
        notices: &mut Notices,
    ) -> bool {
        match result {
            Ok(todo) => {
                let message = if todo.completed {
                    "Task completed"
                } else {
                    "Task pending"
                };
                self.replace(id, todo);
                notices.success(message);
                true
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "failed to toggle task");
                notices.error(e.user_message("Failed to update task"));
                false
            }
        }
    }

    /// 通用的部分更新（CLI 与优先级切换使用）
    pub fn update_task<A: TodoApi>(
        &mut self,
        api: &A,
        id: &str,
        update: &UpdateTodo,
        notices: &mut Notices,
    ) -> bool {
        let result = api.update_todo(id, update);
        self.finish_update(id, result, notices)
    }

    pub fn finish_update(
        &mut self,
        id: &str,
        result: Result<Todo, ApiError>,
        notices: &mut Notices,
    ) -> bool {
        match result {
            Ok(todo) => {
                self.replace(id, todo);
                notices.success("Task updated");
                true
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "failed to update task");
                notices.error(e.user_message("Failed to update task"));
                false
            }
        }
    }

    /// 下一个优先级的请求（High -> Medium -> Low -> High）
    pub fn prepare_cycle_priority(&self, id: &str) -> Option<UpdateTodo> {
        self.get(id).map(|t| UpdateTodo::priority(t.priority.next()))
    }

    fn replace(&mut self, id: &str, todo: Todo) {
        if let Some(slot) = self.todos.iter_mut().find(|t| t.id == id) {
            *slot = todo;
        }
        self.clamp_selection();
    }

    // ========== Delete ==========

    /// `confirm` 返回 false 时不发请求
    pub fn delete_task<A, F>(&mut self, api: &A, id: &str, confirm: F, notices: &mut Notices) -> bool
    where
        A: TodoApi,
        F: FnOnce(&Todo) -> bool,
    {
        let Some(todo) = self.get(id) else {
            return false;
        };
        if !confirm(todo) {
            return false;
        }
        let result = api.delete_todo(id);
        self.finish_delete(id, result, notices)
    }

    pub fn finish_delete(
        &mut self,
        id: &str,
        result: Result<(), ApiError>,
        notices: &mut Notices,
    ) -> bool {
        match result {
            Ok(()) => {
                if let Some(pos) = self.todos.iter().position(|t| t.id == id) {
                    self.todos.remove(pos);
                }
                tracing::info!(id, "task deleted");
                notices.success("Task deleted");
                self.clamp_selection();
                true
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "failed to delete task");
                notices.error(e.user_message("Failed to delete task"));
                false
            }
        }
    }

    // ========== Draft ==========

    pub fn open_form(&mut self) {
        self.form_open = true;
        self.draft_field = DraftField::Title;
    }

    /// 关闭弹窗，草稿保留到创建成功为止
    pub fn close_form(&mut self) {
        self.form_open = false;
    }

    pub fn next_draft_field(&mut self) {
        self.draft_field = self.draft_field.next();
    }

    pub fn draft_push(&mut self, c: char) {
        match self.draft_field {
            DraftField::Title => self.draft.title.push(c),
            DraftField::Description => self.draft.description.push(c),
            DraftField::Priority => match c {
                'h' | 'H' => self.draft.priority = Priority::High,
                'm' | 'M' => self.draft.priority = Priority::Medium,
                'l' | 'L' => self.draft.priority = Priority::Low,
                _ => {}
            },
        }
    }

    pub fn draft_pop(&mut self) {
        match self.draft_field {
            DraftField::Title => {
                self.draft.title.pop();
            }
            DraftField::Description => {
                self.draft.description.pop();
            }
            DraftField::Priority => {}
        }
    }

    pub fn cycle_draft_priority(&mut self, forward: bool) {
        self.draft.priority = if forward {
            self.draft.priority.next()
        } else {
            self.draft.priority.prev()
        };
    }

    // ========== Filter ==========

    pub fn enter_search_mode(&mut self) {
        self.search_mode = true;
    }

    pub fn exit_search_mode(&mut self) {
        self.search_mode = false;
    }

    pub fn search_push(&mut self, c: char) {
        self.filter.search.push(c);
        self.clamp_selection();
    }

    pub fn search_pop(&mut self) {
        self.filter.search.pop();
        self.clamp_selection();
    }

    /// 清空搜索并退出搜索模式
    pub fn clear_search(&mut self) {
        self.filter.search.clear();
        self.search_mode = false;
        self.clamp_selection();
    }

    pub fn cycle_priority_filter(&mut self) {
        self.filter.priority = self.filter.priority.next();
        self.clamp_selection();
    }

    pub fn toggle_show_completed(&mut self) {
        self.filter.show_completed = !self.filter.show_completed;
        self.clamp_selection();
    }

    // ========== Selection ==========

    pub fn select_next(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        let current = self.selected.unwrap_or(0);
        self.selected = Some((current + 1) % len);
    }

    pub fn select_previous(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        let current = self.selected.unwrap_or(0);
        self.selected = Some(if current == 0 { len - 1 } else { current - 1 });
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.selected = match (len, self.selected) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(i)) => Some(i.min(len - 1)),
        };
    }
}
