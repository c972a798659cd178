//! 登录凭证持久化
//!
//! 只保存一个字符串：固定键 `token`。

use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use super::{kiki_dir, load_toml, save_private_toml};

/// 凭证存储
pub trait TokenStore {
    /// 读取已保存的 token（不存在或不可读时返回 None）
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> crate::error::Result<()>;
    fn clear(&self) -> crate::error::Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

/// 文件存储：~/.kiki-todo/session.toml
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileTokenStore {
    fn default() -> Self {
        Self::new(kiki_dir().join("session.toml"))
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        if !self.path.exists() {
            return None;
        }
        match load_toml::<SessionFile>(&self.path) {
            Ok(file) => file.token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "unreadable session file");
                None
            }
        }
    }

    fn save(&self, token: &str) -> crate::error::Result<()> {
        let file = SessionFile {
            token: Some(token.to_string()),
        };
        save_private_toml(&self.path, &file)?;
        // 已存在的文件不受 mode 影响，再收紧一次
        restrict_permissions(&self.path)?;
        Ok(())
    }

    fn clear(&self) -> crate::error::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// 内存存储，克隆后共享同一份数据
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    token: Arc<Mutex<Option<String>>>,
}

#[cfg(test)]
impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        *store.lock() = Some(token.to_string());
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        // 持锁期间不会 panic，中毒时直接取回数据
        self.token.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.lock().clone()
    }

    fn save(&self, token: &str) -> crate::error::Result<()> {
        *self.lock() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> crate::error::Result<()> {
        *self.lock() = None;
        Ok(())
    }
}
