//! 任务相关子命令

use std::io::Write;

use crate::api::TodoApi;
use crate::error::{KikiError, Result};
use crate::model::{Draft, Priority, TaskFilter, TaskStats, Todo, UpdateTodo};
use crate::notice::Notices;
use crate::session::Session;
use crate::storage::token::TokenStore;
use crate::task_view::TaskView;

use super::auth::require_session;
use super::report;

/// 恢复会话并加载任务列表
fn load_view<A: TodoApi, S: TokenStore>(session: &mut Session<A, S>) -> Result<TaskView> {
    require_session(session)?;
    let mut view = TaskView::new();
    let mut notices = Notices::new();
    view.load_tasks(session.api(), &mut notices);
    if let Some(notice) = notices.drain().into_iter().find(|n| n.is_error()) {
        return Err(KikiError::Failed(notice.message));
    }
    Ok(view)
}

pub fn list<A: TodoApi, S: TokenStore, W: Write>(
    session: &mut Session<A, S>,
    filter: TaskFilter,
    out: &mut W,
) -> Result<()> {
    let mut view = load_view(session)?;
    view.filter = filter;

    let visible = view.visible();
    if visible.is_empty() {
        writeln!(out, "No tasks")?;
        if view.filter.is_searching() {
            writeln!(out, "No results found")?;
        } else {
            writeln!(out, "Create your first task to get started")?;
        }
    } else {
        for todo in &visible {
            write_row(out, todo)?;
        }
    }
    writeln!(out)?;
    write_stats(out, &view.stats())?;
    Ok(())
}

pub fn add<A: TodoApi, S: TokenStore, W: Write>(
    session: &mut Session<A, S>,
    title: &str,
    description: Option<String>,
    priority: Option<Priority>,
    out: &mut W,
) -> Result<()> {
    require_session(session)?;
    let mut view = TaskView::new();
    view.draft = Draft {
        title: title.to_string(),
        description: description.unwrap_or_default(),
        priority: priority.unwrap_or_default(),
    };
    let mut notices = Notices::new();
    let ok = view.create_task(session.api(), &mut notices);
    if let Some(todo) = view.todos.first() {
        writeln!(out, "{}", todo.id)?;
    }
    report(&mut notices, ok, out)
}

pub fn set_completed<A: TodoApi, S: TokenStore, W: Write>(
    session: &mut Session<A, S>,
    id: &str,
    completed: bool,
    out: &mut W,
) -> Result<()> {
    let mut view = load_view(session)?;
    if view.get(id).is_none() {
        return Err(KikiError::Failed(format!("Task not found: {}", id)));
    }
    if view.get(id).is_some_and(|t| t.completed == completed) {
        writeln!(out, "Nothing to do")?;
        return Ok(());
    }
    let mut notices = Notices::new();
    let ok = view.toggle_complete(session.api(), id, &mut notices);
    report(&mut notices, ok, out)
}

/// 部分修改：只发送给出的字段
pub fn edit<A: TodoApi, S: TokenStore, W: Write>(
    session: &mut Session<A, S>,
    id: &str,
    update: UpdateTodo,
    out: &mut W,
) -> Result<()> {
    if update == UpdateTodo::default() {
        writeln!(out, "Nothing to do")?;
        return Ok(());
    }
    if update.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(KikiError::Failed("Title is required".to_string()));
    }
    let mut view = load_view(session)?;
    if view.get(id).is_none() {
        return Err(KikiError::Failed(format!("Task not found: {}", id)));
    }
    let mut notices = Notices::new();
    let ok = view.update_task(session.api(), id, &update, &mut notices);
    report(&mut notices, ok, out)
}

/// 删除任务；`confirm` 返回 false 时什么都不做
pub fn remove<A, S, W, F>(
    session: &mut Session<A, S>,
    id: &str,
    confirm: F,
    out: &mut W,
) -> Result<()>
where
    A: TodoApi,
    S: TokenStore,
    W: Write,
    F: FnOnce(&Todo) -> bool,
{
    let mut view = load_view(session)?;
    if view.get(id).is_none() {
        return Err(KikiError::Failed(format!("Task not found: {}", id)));
    }
    let mut confirmed = false;
    let mut notices = Notices::new();
    let ok = view.delete_task(
        session.api(),
        id,
        |todo| {
            confirmed = confirm(todo);
            confirmed
        },
        &mut notices,
    );
    if !confirmed {
        writeln!(out, "Cancelled")?;
        return Ok(());
    }
    report(&mut notices, ok, out)
}

pub fn stats<A: TodoApi, S: TokenStore, W: Write>(
    session: &mut Session<A, S>,
    out: &mut W,
) -> Result<()> {
    let view = load_view(session)?;
    write_stats(out, &view.stats())?;
    Ok(())
}

fn write_row<W: Write>(out: &mut W, todo: &Todo) -> Result<()> {
    let check = if todo.completed { "[x]" } else { "[ ]" };
    write!(
        out,
        "{} {:<12} {:<7} {}",
        check,
        todo.id,
        todo.priority.label(),
        todo.title
    )?;
    if !todo.description.is_empty() {
        write!(out, "  - {}", todo.description)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_stats<W: Write>(out: &mut W, stats: &TaskStats) -> Result<()> {
    writeln!(
        out,
        "Total: {}  Completed: {}  Pending: {}  High priority: {}",
        stats.total, stats.completed, stats.pending, stats.high_pending
    )?;
    Ok(())
}
