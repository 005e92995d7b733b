//! 用户存储
//!
//! 定义用户列表的加载/保存接口，服务层依赖抽象而非具体实现，支持 mock 测试。
//!
//! - `file_store`: JSON 文件存储
//! - `memory_store`: 内存存储，适用于测试和临时运行

mod file_store;
mod memory_store;

pub use file_store::JsonFileUserStore;
pub use memory_store::MemoryUserStore;

use crate::error::StorageError;
use crate::models::User;

/// 用户存储接口
///
/// 启动时整体加载一次，变更后整体重写
#[cfg_attr(test, mockall::automock)]
pub trait UserStore: Send + Sync {
    fn load(&self) -> Result<Vec<User>, StorageError>;
    fn save(&self, users: &[User]) -> Result<(), StorageError>;
}
