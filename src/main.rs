mod api;
mod app;
mod async_ops_state;
mod cli;
mod dialogs;
mod error;
mod event;
mod model;
mod notice;
mod session;
mod storage;
mod task_view;
mod theme;
mod ui;
mod ui_state;

use std::fs::OpenOptions;
use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use ratatui::DefaultTerminal;
use tracing_subscriber::{fmt, EnvFilter};

use api::{ApiClient, TodoApi};
use app::App;
use cli::Cli;
use session::Session;
use storage::config::{self, Config};
use storage::token::{FileTokenStore, TokenStore};

/// 日志过滤环境变量
const LOG_ENV: &str = "KIKI_LOG";

/// TUI 占用终端，日志写到 ~/.kiki-todo/kiki.log
fn init_file_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let file = storage::ensure_kiki_dir().and_then(|dir| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("kiki.log"))
    });
    // 日志文件打不开时不记录，TUI 照常运行
    if let Ok(file) = file {
        let _ = fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
    }
}

/// 子命令日志写到 stderr，默认只显示 warn
fn init_stderr_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// 按 flag > KIKI_API_URL > 配置文件 的顺序创建会话
fn build_session(
    api_url: Option<&str>,
    config: &Config,
) -> error::Result<Session<ApiClient, FileTokenStore>> {
    let env_url = std::env::var("KIKI_API_URL").ok();
    let base_url = config::resolve_base_url(api_url, env_url.as_deref(), config)?;
    let api = ApiClient::new(&base_url, config.api.timeout());
    tracing::info!(base_url = %api.base_url(), "using service");
    Ok(Session::new(api, FileTokenStore::default()))
}

/// 启动 TUI 界面
fn run_tui(
    session: Session<ApiClient, FileTokenStore>,
    config: Config,
    config_path: Option<PathBuf>,
) -> io::Result<()> {
    let mut app = App::new(session, config, config_path);
    app.start();

    // 初始化终端
    let mut terminal = ratatui::init();

    // 运行主循环
    let result = run(&mut terminal, &mut app);

    // 恢复终端
    ratatui::restore();

    result
}

fn run<A: TodoApi, S: TokenStore>(
    terminal: &mut DefaultTerminal,
    app: &mut App<A, S>,
) -> io::Result<()> {
    loop {
        // 渲染界面
        terminal.draw(|frame| ui::render(frame, app))?;

        // 处理事件（内部会先合并后台结果）
        if !event::handle_events(app)? {
            break;
        }
    }

    Ok(())
}

fn main() -> io::Result<()> {
    // Set up panic hook to restore terminal state on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    // 解析命令行参数
    let cli = Cli::parse();
    match cli.command {
        None => init_file_logging(),
        Some(_) => init_stderr_logging(),
    }

    // 配置文件损坏时用默认值运行，且不写回
    let (config, config_path) = match config::load_config() {
        Ok(config) => (config, Some(config::config_path())),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable config, settings will not be saved");
            (Config::default(), None)
        }
    };
    let mut session = match build_session(cli.api_url.as_deref(), &config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        None => run_tui(session, config, config_path)?,
        Some(command) => {
            if let Err(e) = cli::execute(command, &mut session) {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
