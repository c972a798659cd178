//! CLI 模块

pub mod auth;
pub mod tasks;

use std::io::Write;

use clap::{Parser, Subcommand};

use crate::api::TodoApi;
use crate::error::{KikiError, Result};
use crate::model::{Priority, PriorityFilter, TaskFilter, UpdateTodo};
use crate::notice::{NoticeLevel, Notices};
use crate::session::Session;
use crate::storage::token::TokenStore;

#[derive(Parser)]
#[command(name = "kiki")]
#[command(version)]
#[command(about = "Terminal client for the Kiki Todo service")]
pub struct Cli {
    /// Service base URL (overrides KIKI_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: Option<String>,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List tasks
    List {
        /// Only tasks whose title or description contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// all, high, medium or low
        #[arg(short, long, default_value = "all")]
        priority: PriorityFilter,
        #[arg(long)]
        hide_completed: bool,
    },
    /// Create a task
    Add {
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        /// high, medium or low (defaults to medium)
        #[arg(short, long)]
        priority: Option<Priority>,
    },
    /// Change a task's title, description or priority
    Edit {
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// high, medium or low
        #[arg(short, long)]
        priority: Option<Priority>,
    },
    /// Mark a task as completed
    Done { id: String },
    /// Mark a task as pending again
    Undo { id: String },
    /// Delete a task
    Rm {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show task counters
    Stats,
}

/// 执行子命令（`Commands` 中除 TUI 外的所有命令）
pub fn execute<A: TodoApi, S: TokenStore>(
    command: Commands,
    session: &mut Session<A, S>,
) -> Result<()> {
    let mut out = std::io::stdout();
    match command {
        Commands::Login { email } => {
            let email = auth::prompt_if_missing(email, "Email")?;
            let password = rpassword::prompt_password("Password: ")?;
            auth::login(session, &email, &password, &mut out)
        }
        Commands::Register { email, name } => {
            let email = auth::prompt_if_missing(email, "Email")?;
            let name = auth::prompt_if_missing(name, "Name")?;
            let password = rpassword::prompt_password("Password: ")?;
            auth::register(session, &email, &password, &name, &mut out)
        }
        Commands::Logout => auth::logout(session, &mut out),
        Commands::Whoami => auth::whoami(session, &mut out),
        Commands::List {
            search,
            priority,
            hide_completed,
        } => {
            let filter = TaskFilter {
                search: search.unwrap_or_default(),
                priority,
                show_completed: !hide_completed,
            };
            tasks::list(session, filter, &mut out)
        }
        Commands::Add {
            title,
            description,
            priority,
        } => tasks::add(session, &title, description, priority, &mut out),
        Commands::Edit {
            id,
            title,
            description,
            priority,
        } => {
            let update = UpdateTodo {
                title: title.map(|t| t.trim().to_string()),
                description,
                priority,
                completed: None,
            };
            tasks::edit(session, &id, update, &mut out)
        }
        Commands::Done { id } => tasks::set_completed(session, &id, true, &mut out),
        Commands::Undo { id } => tasks::set_completed(session, &id, false, &mut out),
        Commands::Rm { id, yes } => {
            tasks::remove(session, &id, |todo| yes || confirm_delete(&todo.title), &mut out)
        }
        Commands::Stats => tasks::stats(session, &mut out),
    }
}

/// 在终端询问是否删除
fn confirm_delete(title: &str) -> bool {
    print!("Delete \"{}\"? [y/N] ", title);
    let _ = std::io::stdout().flush();
    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}

/// 打印通知：成功写到 out，错误转为 `KikiError::Failed`
pub(crate) fn report<W: Write>(notices: &mut Notices, ok: bool, out: &mut W) -> Result<()> {
    let mut failure = None;
    for notice in notices.drain() {
        match notice.level {
            NoticeLevel::Success => writeln!(out, "{}", notice.message)?,
            NoticeLevel::Error => failure = Some(notice.message),
        }
    }
    match (ok, failure) {
        (true, _) => Ok(()),
        (false, Some(message)) => Err(KikiError::Failed(message)),
        (false, None) => Err(KikiError::Failed("Operation failed".to_string())),
    }
}
