//! 账号相关子命令

use std::io::{self, Write};

use crate::api::TodoApi;
use crate::error::{KikiError, Result};
use crate::notice::Notices;
use crate::session::Session;
use crate::storage::token::TokenStore;

use super::report;

/// 参数缺失时从 stdin 读取
pub fn prompt_if_missing(value: Option<String>, label: &str) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

pub fn login<A: TodoApi, S: TokenStore, W: Write>(
    session: &mut Session<A, S>,
    email: &str,
    password: &str,
    out: &mut W,
) -> Result<()> {
    let mut notices = Notices::new();
    let ok = session.login(email.trim(), password, &mut notices).is_ok();
    report(&mut notices, ok, out)
}

pub fn register<A: TodoApi, S: TokenStore, W: Write>(
    session: &mut Session<A, S>,
    email: &str,
    password: &str,
    name: &str,
    out: &mut W,
) -> Result<()> {
    let mut notices = Notices::new();
    let ok = session
        .register(email.trim(), password, name.trim(), &mut notices)
        .is_ok();
    report(&mut notices, ok, out)
}

pub fn logout<A: TodoApi, S: TokenStore, W: Write>(
    session: &mut Session<A, S>,
    out: &mut W,
) -> Result<()> {
    let mut notices = Notices::new();
    session.logout(&mut notices);
    report(&mut notices, true, out)
}

pub fn whoami<A: TodoApi, S: TokenStore, W: Write>(
    session: &mut Session<A, S>,
    out: &mut W,
) -> Result<()> {
    require_session(session)?;
    if let Some(user) = session.user() {
        writeln!(out, "{} <{}>", user.name, user.email)?;
    }
    Ok(())
}

/// 恢复会话，失败时返回 `NotSignedIn`
pub fn require_session<A: TodoApi, S: TokenStore>(session: &mut Session<A, S>) -> Result<()> {
    if session.restore() && session.is_authenticated() {
        Ok(())
    } else {
        Err(KikiError::NotSignedIn)
    }
}
