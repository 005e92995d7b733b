//! 智能回收箱
//!
//! 校验材料与容量后接收投放物，通知订阅者，再交由状态机校验和发放奖励。

use std::sync::Arc;

use tracing::{debug, instrument};

use eco_shared::config::BinConfig;
use eco_shared::observability::metrics;

use crate::error::BinError;
use crate::models::{Item, ItemState, MaterialType, User, canonical_material};
use crate::notifier::{DepositEvent, DepositListener, DepositNotifier, SubscriptionId};
use crate::state_machine::ItemStateMachine;

/// 回收箱
///
/// 材料类型与容量在创建后不可修改
#[derive(Debug)]
pub struct Bin {
    material: String,
    capacity_kg: f64,
    notifier: DepositNotifier,
    state_machine: ItemStateMachine,
}

impl Bin {
    /// 创建使用默认状态机的回收箱
    pub fn new(material: impl AsRef<str>, capacity_kg: f64) -> Result<Self, BinError> {
        Self::with_state_machine(material, capacity_kg, ItemStateMachine::default())
    }

    pub fn with_state_machine(
        material: impl AsRef<str>,
        capacity_kg: f64,
        state_machine: ItemStateMachine,
    ) -> Result<Self, BinError> {
        let material = canonical_material(material.as_ref());
        if material.is_empty() {
            return Err(BinError::InvalidConfig("材料类型不能为空".to_string()));
        }
        if !(capacity_kg.is_finite() && capacity_kg > 0.0) {
            return Err(BinError::InvalidConfig(format!(
                "容量必须为正数: {}",
                capacity_kg
            )));
        }

        Ok(Self {
            material,
            capacity_kg,
            notifier: DepositNotifier::new(),
            state_machine,
        })
    }

    /// 从配置创建回收箱
    pub fn from_config(config: &BinConfig) -> Result<Self, BinError> {
        Self::new(&config.material, config.capacity_kg)
    }

    pub fn material(&self) -> &str {
        &self.material
    }

    pub fn capacity_kg(&self) -> f64 {
        self.capacity_kg
    }

    /// 投放指标的材料标签，取自回收箱而非投放物
    pub fn metric_label(&self) -> &'static str {
        MaterialType::metric_label(&self.material)
    }

    pub fn state_machine(&self) -> &ItemStateMachine {
        &self.state_machine
    }

    pub fn subscribe(&self, listener: Arc<dyn DepositListener>) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// 检查投放物是否可被接收
    ///
    /// 校验顺序：材料 -> 容量
    pub fn check_acceptance(&self, item: &Item) -> Result<(), BinError> {
        if !item.is_material(&self.material) {
            return Err(BinError::WrongMaterial {
                bin_material: self.material.clone(),
                item_material: item.material().to_string(),
            });
        }

        if item.weight_kg() > self.capacity_kg {
            return Err(BinError::CapacityExceeded {
                weight_kg: item.weight_kg(),
                capacity_kg: self.capacity_kg,
            });
        }

        Ok(())
    }

    /// 投放
    ///
    /// 前置条件失败时直接返回错误，不通知订阅者、不修改任何状态。
    /// 接收后先通知订阅者（此时校验结果未知），再同步执行校验与奖励发放。
    #[instrument(
        skip(self, item, user),
        fields(bin = %self.material, item_id = %item.item_id(), user_id = %user.id())
    )]
    pub fn deposit(&self, item: &mut Item, user: &mut User) -> Result<ItemState, BinError> {
        if let Err(e) = self.check_acceptance(item) {
            metrics::record_deposit(self.metric_label(), e.error_code());
            debug!(error = %e, "投放被回收箱拒绝");
            return Err(e);
        }

        let event = DepositEvent::new(&self.material, item, user);
        self.notifier.notify_all(&event);

        let state = self.state_machine.validate(item, user);
        metrics::record_deposit(self.metric_label(), state.as_str());
        Ok(state)
    }
}
