//! JSON 文件用户存储

use std::fs;
use std::io::{BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::StorageError;
use crate::models::User;

use super::UserStore;

/// JSON 文件用户存储
///
/// 文件不存在时视为空列表；保存时先写临时文件并 `sync_all`，再原子替换目标文件
#[derive(Debug, Clone)]
pub struct JsonFileUserStore {
    path: PathBuf,
}

impl JsonFileUserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl UserStore for JsonFileUserStore {
    fn load(&self) -> Result<Vec<User>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.display_path(), "用户文件不存在，使用空列表");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StorageError::io(self.display_path(), e)),
        };

        let users: Vec<User> = serde_json::from_str(&content)?;
        info!(path = %self.display_path(), count = users.len(), "用户列表加载完成");
        Ok(users)
    }

    fn save(&self, users: &[User]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(self.display_path(), e))?;
        }

        let temp = self.temp_path();
        let result = write_synced(&temp, users).and_then(|()| {
            fs::rename(&temp, &self.path).map_err(|e| StorageError::io(self.display_path(), e))
        });

        if let Err(e) = result {
            // 尽力清理临时文件
            let _ = fs::remove_file(&temp);
            return Err(e);
        }

        debug!(path = %self.display_path(), count = users.len(), "用户列表已保存");
        Ok(())
    }
}

/// 写入临时文件并刷到磁盘
fn write_synced(temp: &Path, users: &[User]) -> Result<(), StorageError> {
    let temp_display = || temp.display().to_string();

    let file = fs::File::create(temp).map_err(|e| StorageError::io(temp_display(), e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, users)?;
    let file = writer
        .into_inner()
        .map_err(|e| StorageError::io(temp_display(), e.into_error()))?;
    file.sync_all()
        .map_err(|e| StorageError::io(temp_display(), e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileUserStore::new(dir.path().join("users.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileUserStore::new(dir.path().join("nested").join("users.json"));

        let mut ana = User::new("USER1", "Ana");
        ana.credit(24);
        let users = vec![ana, User::new("USER2", "Bruno")];

        store.save(&users).unwrap();
        assert_eq!(store.load().unwrap(), users);
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_save_overwrites_whole_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileUserStore::new(dir.path().join("users.json"));

        store
            .save(&[User::new("USER1", "Ana"), User::new("USER2", "Bruno")])
            .unwrap();
        store.save(&[User::new("USER1", "Ana")]).unwrap();

        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupted_file_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        fs::write(&path, "not json").unwrap();

        let err = JsonFileUserStore::new(path).load().unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[test]
    fn test_unreadable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // 目录本身无法作为文件读取
        let err = JsonFileUserStore::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }

    #[test]
    fn test_overwrite_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        let store = JsonFileUserStore::new(&path);

        store.save(&[User::new("USER1", "Ana")]).unwrap();
        let mut bruno = User::new("USER2", "Bruno");
        bruno.credit(30);
        let users = vec![User::new("USER1", "Ana"), bruno];
        store.save(&users).unwrap();

        assert!(!dir.path().join("users.json.tmp").exists());
        assert_eq!(store.load().unwrap(), users);
        let raw: Vec<User> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw, users);
    }

    #[test]
    fn test_failed_save_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // 目标路径是非空目录，rename 必然失败
        let path = dir.path().join("users.json");
        fs::create_dir_all(path.join("occupied")).unwrap();
        let store = JsonFileUserStore::new(&path);

        let err = store.save(&[User::new("USER1", "Ana")]).unwrap_err();

        assert!(matches!(err, StorageError::Io { .. }));
        assert!(!store.temp_path().exists());
        assert!(path.join("occupied").is_dir());
    }

    #[test]
    fn test_failed_temp_write_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        let store = JsonFileUserStore::new(&path);
        store.save(&[User::new("USER1", "Ana")]).unwrap();

        // 临时文件路径被目录占用，创建失败
        fs::create_dir(store.temp_path()).unwrap();
        let err = store
            .save(&[User::new("USER1", "Ana"), User::new("USER2", "Bruno")])
            .unwrap_err();

        assert!(matches!(err, StorageError::Io { .. }));
        assert_eq!(store.load().unwrap(), vec![User::new("USER1", "Ana")]);
    }
}
