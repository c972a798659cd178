//! 任务过滤与统计
//!
//! 纯函数：每次渲染都从完整列表重新计算，不做缓存。

use std::fmt;
use std::str::FromStr;

use super::todo::{Priority, Todo};

/// 优先级过滤条件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    pub fn matches(&self, priority: Priority) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(p) => *p == priority,
        }
    }

    /// All -> High -> Medium -> Low -> All
    pub fn next(&self) -> Self {
        match self {
            PriorityFilter::All => PriorityFilter::Only(Priority::High),
            PriorityFilter::Only(Priority::High) => PriorityFilter::Only(Priority::Medium),
            PriorityFilter::Only(Priority::Medium) => PriorityFilter::Only(Priority::Low),
            PriorityFilter::Only(Priority::Low) => PriorityFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriorityFilter::All => "All priorities",
            PriorityFilter::Only(p) => p.label(),
        }
    }
}

impl fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PriorityFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "todas" | "" => Ok(PriorityFilter::All),
            other => other.parse::<Priority>().map(PriorityFilter::Only),
        }
    }
}

/// 过滤条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFilter {
    /// 搜索关键词（标题或描述，大小写不敏感）
    pub search: String,
    /// 优先级过滤
    pub priority: PriorityFilter,
    /// 是否显示已完成任务
    pub show_completed: bool,
}

impl Default for TaskFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            priority: PriorityFilter::All,
            show_completed: true,
        }
    }
}

impl TaskFilter {
    pub fn matches(&self, todo: &Todo) -> bool {
        let query = self.search.to_lowercase();
        let matches_search = todo.title.to_lowercase().contains(&query)
            || todo.description.to_lowercase().contains(&query);
        let matches_priority = self.priority.matches(todo.priority);
        let matches_completed = self.show_completed || !todo.completed;

        matches_search && matches_priority && matches_completed
    }

    pub fn is_searching(&self) -> bool {
        !self.search.is_empty()
    }
}

/// 按过滤条件筛选，保持原列表顺序
pub fn filter_tasks<'a>(todos: &'a [Todo], filter: &TaskFilter) -> Vec<&'a Todo> {
    todos.iter().filter(|t| filter.matches(t)).collect()
}

/// 统计数据（基于完整列表）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// 未完成的高优先级任务
    pub high_pending: usize,
}

impl TaskStats {
    pub fn from_todos(todos: &[Todo]) -> Self {
        Self {
            total: todos.len(),
            completed: todos.iter().filter(|t| t.completed).count(),
            pending: todos.iter().filter(|t| !t.completed).count(),
            high_pending: todos
                .iter()
                .filter(|t| t.priority == Priority::High && !t.completed)
                .count(),
        }
    }
}
