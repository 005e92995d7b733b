//! 命令执行器
//!
//! 负责执行各 CLI 子命令的具体逻辑，返回待输出的文本（纯文本或 JSON）。

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use eco_shared::config::AppConfig;
use reward_engine::{
    JsonFileUserStore, MaterialType, RecyclingService, RewardRegistry, User,
};

/// 回收箱列表行
#[derive(Debug, Serialize)]
struct BinRow<'a> {
    material: &'a str,
    capacity_kg: f64,
    /// 未登记奖励的材料为 None
    coins_per_kg: Option<u32>,
}

/// 奖励表行
#[derive(Debug, Serialize)]
struct RateRow {
    material: MaterialType,
    coins_per_kg: u32,
}

/// 命令执行器
///
/// 持有回收服务，作为 CLI 与业务逻辑之间的桥梁
#[derive(Debug)]
pub struct CommandRunner {
    service: RecyclingService,
}

impl CommandRunner {
    /// 按配置打开用户文件并创建回收箱
    ///
    /// `data_file` 非空时覆盖配置中的 storage.users_file
    pub fn open(config: &AppConfig, data_file: Option<PathBuf>) -> Result<Self> {
        let path = data_file.unwrap_or_else(|| config.storage.users_file.clone());
        info!(path = %path.display(), "加载用户数据");

        let store = JsonFileUserStore::new(&path);
        let service = RecyclingService::open(Box::new(store), &config.bins)
            .with_context(|| format!("初始化回收服务失败: {}", path.display()))?;

        Ok(Self::with_service(service))
    }

    pub fn with_service(service: RecyclingService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &RecyclingService {
        &self.service
    }

    /// 执行 user add 命令
    pub fn run_user_add(&mut self, name: &str) -> Result<String> {
        let user = self.service.create_user(name).context("创建用户失败")?;
        Ok(format!("已创建用户 {} ({})", user.id(), user.name()))
    }

    /// 执行 user list 命令
    pub fn run_user_list(&self, json: bool) -> Result<String> {
        let users = self.service.users();
        if json {
            return Ok(serde_json::to_string_pretty(users)?);
        }
        if users.is_empty() {
            return Ok("暂无用户".to_string());
        }

        let mut out = String::new();
        for user in users {
            writeln!(out, "{}", render_user(user))?;
        }
        Ok(out.trim_end().to_string())
    }

    /// 执行 user show 命令
    pub fn run_user_show(&self, id: &str, json: bool) -> Result<String> {
        let user = self
            .service
            .user(id)
            .with_context(|| format!("用户不存在: {}", id))?;

        if json {
            Ok(serde_json::to_string_pretty(user)?)
        } else {
            Ok(render_user(user))
        }
    }

    /// 执行 bins 命令
    pub fn run_bins(&self, json: bool) -> Result<String> {
        let rows: Vec<BinRow<'_>> = self
            .service
            .bins()
            .iter()
            .map(|bin| BinRow {
                material: bin.material(),
                capacity_kg: bin.capacity_kg(),
                coins_per_kg: registered_rate(bin.material()),
            })
            .collect();

        if json {
            return Ok(serde_json::to_string_pretty(&rows)?);
        }

        let mut out = String::new();
        for row in &rows {
            let rate = row
                .coins_per_kg
                .map(|c| format!("{} 币/kg", c))
                .unwrap_or_else(|| "无奖励".to_string());
            writeln!(out, "{:<8} 容量 {:>6.1}kg  {}", row.material, row.capacity_kg, rate)?;
        }
        Ok(out.trim_end().to_string())
    }

    /// 执行 rates 命令
    pub fn run_rates(&self, json: bool) -> Result<String> {
        let rows: Vec<RateRow> = RewardRegistry::global()
            .registered_types()
            .into_iter()
            .map(|material| RateRow {
                material,
                coins_per_kg: material.coins_per_kg(),
            })
            .collect();

        if json {
            return Ok(serde_json::to_string_pretty(&rows)?);
        }

        let mut out = String::new();
        for row in &rows {
            writeln!(out, "{:<8} {:>3} 币/kg", row.material.as_str(), row.coins_per_kg)?;
        }
        Ok(out.trim_end().to_string())
    }

    /// 执行 deposit 命令
    ///
    /// 回收物材料缺省时与回收箱相同
    pub fn run_deposit(
        &mut self,
        user_id: &str,
        bin: &str,
        material: Option<&str>,
        weight_kg: f64,
        json: bool,
    ) -> Result<String> {
        let material = material.unwrap_or(bin);
        let report = self
            .service
            .deposit(user_id, bin, material, weight_kg)
            .context("投放失败")?;

        if json {
            return Ok(serde_json::to_string_pretty(&report)?);
        }

        Ok(format!(
            "{} 投放 {} {}kg -> {}，获得 {} 币，当前余额 {} 币",
            report.user_id, report.material, report.weight_kg, report.state, report.coins,
            report.balance
        ))
    }
}

/// 已登记材料的奖励单价
fn registered_rate(material: &str) -> Option<u32> {
    let material = material.parse::<MaterialType>().ok()?;
    RewardRegistry::global()
        .contains(material)
        .then(|| material.coins_per_kg())
}

fn render_user(user: &User) -> String {
    format!("{:<8} {:<16} {:>6} 币", user.id(), user.name(), user.balance())
}
