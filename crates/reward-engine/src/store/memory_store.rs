//! 内存用户存储
//!
//! 适用于测试和不需要持久化的临时运行。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::error::StorageError;
use crate::models::User;

use super::UserStore;

/// 内存用户存储
///
/// 克隆后共享同一份数据，便于测试中从外部观察保存结果
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<Mutex<Vec<User>>>,
    failing: Arc<AtomicBool>,
    saves: Arc<Mutex<usize>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用已有用户初始化
    pub fn with_users(users: Vec<User>) -> Self {
        let store = Self::default();
        *store.users.lock() = users;
        store
    }

    /// 切换故障模式，开启后 load/save 均返回 `StorageError::Unavailable`
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// 当前保存的用户快照
    pub fn snapshot(&self) -> Vec<User> {
        self.users.lock().clone()
    }

    /// 成功保存的次数
    pub fn save_count(&self) -> usize {
        *self.saves.lock()
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("内存存储处于故障模式".to_string()));
        }
        Ok(())
    }
}

impl UserStore for MemoryUserStore {
    fn load(&self) -> Result<Vec<User>, StorageError> {
        self.check_available()?;
        Ok(self.snapshot())
    }

    fn save(&self, users: &[User]) -> Result<(), StorageError> {
        self.check_available()?;
        *self.users.lock() = users.to_vec();
        *self.saves.lock() += 1;
        Ok(())
    }
}
