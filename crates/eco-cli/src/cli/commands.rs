//! CLI 命令定义
//!
//! 使用 clap derive 宏定义命令行接口结构。

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// 回收奖励命令行工具
#[derive(Parser, Debug)]
#[command(name = "eco-reward")]
#[command(version, about = "智能回收箱奖励系统")]
#[command(propagate_version = true)]
pub struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)，覆盖配置文件
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// 用户数据文件路径，覆盖配置文件中的 storage.users_file
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// 以 JSON 格式输出
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 子命令枚举
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 用户管理
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// 列出回收箱及其容量、奖励单价
    Bins,

    /// 列出奖励表
    Rates,

    /// 向回收箱投放一件回收物
    ///
    /// 回收箱拒绝（材料不符、超过容量）时返回错误；
    /// 重量低于 0.1kg 的回收物会被接收但校验不通过，不发放奖励。
    Deposit {
        /// 用户 ID
        #[arg(short, long)]
        user: String,

        /// 回收箱材料类型
        #[arg(short, long)]
        bin: String,

        /// 回收物材料类型，默认与回收箱相同
        #[arg(short, long)]
        material: Option<String>,

        /// 重量（千克）
        #[arg(short, long, allow_negative_numbers = true)]
        weight: f64,
    },
}

/// 用户子命令
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// 创建用户
    Add {
        /// 用户名称
        name: String,
    },

    /// 列出所有用户
    List,

    /// 查看用户余额
    Show {
        /// 用户 ID
        id: String,
    },
}

// ============================================================================
// 单元测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_user() {
        let cli = Cli::parse_from(["eco-reward", "user", "add", "Ana"]);
        match cli.command {
            Commands::User {
                command: UserCommands::Add { name },
            } => assert_eq!(name, "Ana"),
            _ => panic!("预期 user add 命令"),
        }
        assert!(cli.log_level.is_none());
        assert!(cli.data_file.is_none());
        assert!(!cli.json);

        let cli = Cli::parse_from(["eco-reward", "user", "show", "USER1", "--json"]);
        match cli.command {
            Commands::User {
                command: UserCommands::Show { id },
            } => assert_eq!(id, "USER1"),
            _ => panic!("预期 user show 命令"),
        }
        assert!(cli.json);
    }

    #[test]
    fn test_cli_parse_deposit() {
        let cli = Cli::parse_from([
            "eco-reward",
            "--data-file",
            "/tmp/users.json",
            "deposit",
            "--user",
            "USER1",
            "--bin",
            "metal",
            "--weight",
            "2.5",
        ]);
        match cli.command {
            Commands::Deposit {
                user,
                bin,
                material,
                weight,
            } => {
                assert_eq!(user, "USER1");
                assert_eq!(bin, "metal");
                assert!(material.is_none());
                assert_eq!(weight, 2.5);
            }
            _ => panic!("预期 Deposit 命令"),
        }
        assert_eq!(cli.data_file, Some(PathBuf::from("/tmp/users.json")));

        let cli = Cli::parse_from([
            "eco-reward", "deposit", "-u", "USER2", "-b", "PLASTIC", "-m", "GLASS", "-w", "-1",
        ]);
        match cli.command {
            Commands::Deposit {
                material, weight, ..
            } => {
                assert_eq!(material.as_deref(), Some("GLASS"));
                assert_eq!(weight, -1.0);
            }
            _ => panic!("预期 Deposit 命令"),
        }
    }

    #[test]
    fn test_cli_rejects_malformed_weight() {
        let result = Cli::try_parse_from([
            "eco-reward", "deposit", "-u", "USER1", "-b", "METAL", "-w", "heavy",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_listing() {
        assert!(matches!(
            Cli::parse_from(["eco-reward", "bins"]).command,
            Commands::Bins
        ));
        assert!(matches!(
            Cli::parse_from(["eco-reward", "-l", "debug", "rates"]).command,
            Commands::Rates
        ));
    }
}
