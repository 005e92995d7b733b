//! 回收奖励命令行工具
//!
//! 提供用户管理、回收箱查询与投放等子命令，数据保存在 JSON 用户文件中。

pub mod cli;
