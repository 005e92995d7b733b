//! CLI 模块
//!
//! - `user add|list|show` - 用户管理
//! - `bins` - 列出回收箱
//! - `rates` - 列出奖励表
//! - `deposit` - 投放回收物
//!
//! # 使用示例
//!
//! ```bash
//! eco-reward user add Ana
//! eco-reward deposit --user USER1 --bin metal --weight 2.0
//! eco-reward --json user show USER1
//! ```

pub mod commands;
pub mod runner;

pub use commands::{Cli, Commands, UserCommands};
pub use runner::CommandRunner;
