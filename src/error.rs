//! Kiki 统一错误类型定义
//!
//! `ApiError` 覆盖所有远程调用的失败情形，`KikiError` 用于本地（配置、存储、CLI）。

use std::io;

use serde_json::Value;
use thiserror::Error;

/// 远程调用错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 网络 / 传输层失败（连接拒绝、DNS、I/O）
    #[error("network error: {0}")]
    Transport(String),

    /// 认证被拒绝（凭证错误或 token 过期）
    #[error("unauthorized ({status}){}", fmt_detail(.detail))]
    Unauthorized { status: u16, detail: Option<String> },

    /// 输入校验失败
    #[error("invalid request ({status}){}", fmt_detail(.detail))]
    Validation { status: u16, detail: Option<String> },

    /// 资源不存在（过期的 id）
    #[error("not found{}", fmt_detail(.detail))]
    NotFound { detail: Option<String> },

    /// 其他非 2xx 响应
    #[error("server error ({status}){}", fmt_detail(.detail))]
    Server { status: u16, detail: Option<String> },

    /// 成功响应但 body 无法解析
    #[error("unexpected response: {0}")]
    Decode(String),
}

fn fmt_detail(detail: &Option<String>) -> String {
    match detail {
        Some(d) => format!(": {}", d),
        None => String::new(),
    }
}

impl ApiError {
    /// Map a non-2xx status and its raw body to an error variant.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = extract_detail(body);
        match status {
            401 | 403 => ApiError::Unauthorized { status, detail },
            400 | 422 => ApiError::Validation { status, detail },
            404 => ApiError::NotFound { detail },
            _ => ApiError::Server { status, detail },
        }
    }

    /// Service-provided message, if the response carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { detail, .. }
            | ApiError::Validation { detail, .. }
            | ApiError::NotFound { detail }
            | ApiError::Server { detail, .. } => detail.as_deref(),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }

    /// Message shown to the user: the service detail, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

/// Pull `detail` out of an error body.
///
/// Accepts `{"detail": "msg"}` and the validation form
/// `{"detail": [{"msg": "..."}, ...]}` (messages joined by `; `).
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        _ => None,
    }
}

/// Kiki 本地错误类型
#[derive(Debug, Error)]
pub enum KikiError {
    /// I/O 错误（文件读写、目录操作等）
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// TOML 解析错误
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML 序列化错误
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// 远程调用错误
    #[error(transparent)]
    Api(#[from] ApiError),

    /// 配置错误
    #[error("Config error: {0}")]
    Config(String),

    /// 需要登录
    #[error("Not signed in")]
    NotSignedIn,

    /// 操作失败，消息已转换为面向用户的文字
    #[error("{0}")]
    Failed(String),
}

/// Kiki Result 类型别名
pub type Result<T> = std::result::Result<T, KikiError>;

impl KikiError {
    /// 创建 Config 错误
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
