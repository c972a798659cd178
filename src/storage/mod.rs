pub mod config;
pub mod token;

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// 获取 ~/.kiki-todo/ 目录路径（`KIKI_HOME` 可覆盖）
pub fn kiki_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("KIKI_HOME") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".kiki-todo")
}

/// 确保目录存在
pub fn ensure_kiki_dir() -> io::Result<PathBuf> {
    let dir = kiki_dir();
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// 从 TOML 文件加载反序列化数据
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> crate::error::Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// 将数据序列化后保存到 TOML 文件
pub fn save_toml<T: serde::Serialize>(path: &Path, data: &T) -> crate::error::Result<()> {
    write_toml(path, data, OpenOptions::new())
}

/// 同 `save_toml`，但新建的文件只有属主可读写（unix 下 0600）
pub fn save_private_toml<T: serde::Serialize>(path: &Path, data: &T) -> crate::error::Result<()> {
    let mut options = OpenOptions::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    write_toml(path, data, options)
}

fn write_toml<T: serde::Serialize>(
    path: &Path,
    data: &T,
    mut options: OpenOptions,
) -> crate::error::Result<()> {
    let content = toml::to_string_pretty(data)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = options.write(true).create(true).truncate(true).open(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn test_toml_roundtrip_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("sample.toml");
        let data = Sample {
            name: "kiki".to_string(),
            count: 3,
        };
        save_toml(&path, &data).unwrap();
        let loaded: Sample = load_toml(&path).unwrap();
        assert_eq!(loaded, data);
    }

    #[cfg(unix)]
    #[test]
    fn test_private_toml_created_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secret.toml");
        let data = Sample {
            name: "tok".to_string(),
            count: 1,
        };
        save_private_toml(&path, &data).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(load_toml::<Sample>(&path).unwrap(), data);
    }

    #[test]
    fn test_load_toml_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            load_toml::<Sample>(&missing),
            Err(crate::error::KikiError::Io(_))
        ));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "name = ").unwrap();
        assert!(matches!(
            load_toml::<Sample>(&broken),
            Err(crate::error::KikiError::TomlParse(_))
        ));
    }
}
