//! 回收服务
//!
//! 组合用户列表、回收箱与用户存储，提供用户创建和完整投放流程：
//! 回收箱投放（校验 + 即时发放） -> 显式奖励请求（幂等） -> 持久化余额。

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use eco_shared::config::BinConfig;
use eco_shared::observability::metrics;

use crate::error::{Result, ServiceError};
use crate::models::{Item, ItemState, User, canonical_material};
use crate::notifier::LoggingListener;
use crate::smart_bin::Bin;
use crate::store::UserStore;

/// 投放结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepositReport {
    pub user_id: String,
    pub item_id: uuid::Uuid,
    pub material: String,
    pub weight_kg: f64,
    pub state: ItemState,
    /// 本次投放发放的奖励币数
    pub coins: u64,
    /// 投放后的用户余额
    pub balance: u64,
}

/// 回收服务
pub struct RecyclingService {
    store: Box<dyn UserStore>,
    users: Vec<User>,
    bins: Vec<Bin>,
}

impl RecyclingService {
    /// 加载用户列表并按配置创建回收箱
    ///
    /// 每个回收箱都会订阅一个日志订阅者
    pub fn open(store: Box<dyn UserStore>, bin_configs: &[BinConfig]) -> Result<Self> {
        let users = store.load()?;

        let mut bins: Vec<Bin> = Vec::with_capacity(bin_configs.len());
        for config in bin_configs {
            let bin = Bin::from_config(config)?;
            if bins.iter().any(|b| b.material() == bin.material()) {
                warn!(material = %bin.material(), "重复的回收箱配置，已忽略");
                continue;
            }
            bin.subscribe(Arc::new(LoggingListener));
            bins.push(bin);
        }

        info!(
            user_count = users.len(),
            bin_count = bins.len(),
            "回收服务初始化完成"
        );

        Ok(Self { store, users, bins })
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id() == user_id)
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// 按材料查找回收箱（不区分大小写）
    pub fn bin(&self, material: &str) -> Option<&Bin> {
        let material = canonical_material(material);
        self.bins.iter().find(|b| b.material() == material)
    }

    /// 创建用户
    ///
    /// ID 形如 `USER{n}`，n 为当前用户数 + 1（冲突时递增）。
    /// 创建后整体保存用户列表；保存失败时撤销本次创建。
    #[instrument(skip(self))]
    pub fn create_user(&mut self, name: &str) -> Result<User> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::InvalidUserName);
        }

        let id = self.next_user_id();
        let user = User::new(id, name);
        self.users.push(user.clone());

        if let Err(e) = self.store.save(&self.users) {
            self.users.pop();
            warn!(user_id = %user.id(), error = %e, "用户保存失败，已撤销创建");
            return Err(e.into());
        }

        metrics::record_user_created();
        info!(user_id = %user.id(), name = %user.name(), "新用户创建成功");
        Ok(user)
    }

    fn next_user_id(&self) -> String {
        let mut n = self.users.len() + 1;
        loop {
            let id = format!("USER{}", n);
            if self.user(&id).is_none() {
                return id;
            }
            n += 1;
        }
    }

    /// 投放
    ///
    /// 回收箱拒绝时不修改任何状态。获得奖励后保存用户列表，
    /// 保存失败时撤销本次奖励并返回存储错误。
    #[instrument(skip(self))]
    pub fn deposit(
        &mut self,
        user_id: &str,
        bin_material: &str,
        item_material: &str,
        weight_kg: f64,
    ) -> Result<DepositReport> {
        let bin_index = self
            .bins
            .iter()
            .position(|b| b.material() == canonical_material(bin_material))
            .ok_or_else(|| ServiceError::BinNotFound(canonical_material(bin_material)))?;
        let user_index = self
            .users
            .iter()
            .position(|u| u.id() == user_id)
            .ok_or_else(|| ServiceError::UserNotFound(user_id.to_string()))?;

        let bin = &self.bins[bin_index];
        let user = &mut self.users[user_index];
        let before = user.clone();

        let mut item = Item::new(item_material, weight_kg);
        let state = bin.deposit(&mut item, user)?;

        // 外层的显式奖励请求；即时发放后此处为幂等空操作
        let outcome = bin.state_machine().process_reward(&mut item, user);
        debug!(item_id = %item.item_id(), outcome = ?outcome, "奖励请求处理完成");

        let report = DepositReport {
            user_id: user.id().to_string(),
            item_id: item.item_id(),
            material: item.material().to_string(),
            weight_kg: item.weight_kg(),
            state,
            coins: user.balance() - before.balance(),
            balance: user.balance(),
        };

        if report.coins > 0 {
            if let Err(e) = self.store.save(&self.users) {
                self.users[user_index] = before;
                warn!(
                    user_id = %report.user_id,
                    coins = report.coins,
                    error = %e,
                    "余额保存失败，已撤销本次奖励"
                );
                return Err(e.into());
            }
        }

        Ok(report)
    }
}

impl std::fmt::Debug for RecyclingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecyclingService")
            .field("users", &self.users.len())
            .field("bins", &self.bins)
            .finish()
    }
}
