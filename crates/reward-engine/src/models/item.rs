//! 投放物模型

use serde::Serialize;
use uuid::Uuid;

use super::enums::{ItemState, canonical_material};

/// 投放物
///
/// 用户投入回收箱的一件物品。状态与 `processed` 标记只能由状态机推进，
/// 外部只读。只支持序列化，不能从外部数据直接构造：
///
/// ```compile_fail
/// let item: reward_engine::Item =
///     serde_json::from_str(r#"{"state":"APPROVED","processed":false}"#).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    item_id: Uuid,
    /// 规范化后的材料名称（大写）
    material: String,
    /// 重量（千克）
    weight_kg: f64,
    state: ItemState,
    /// 是否已发放奖励
    processed: bool,
}

impl Item {
    /// 创建待校验的投放物
    ///
    /// 重量的合法性由校验链判定，此处不做拒绝
    pub fn new(material: impl AsRef<str>, weight_kg: f64) -> Self {
        Self {
            item_id: Uuid::new_v4(),
            material: canonical_material(material.as_ref()),
            weight_kg,
            state: ItemState::Pending,
            processed: false,
        }
    }

    pub fn item_id(&self) -> Uuid {
        self.item_id
    }

    pub fn material(&self) -> &str {
        &self.material
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn state(&self) -> ItemState {
        self.state
    }

    pub fn is_processed(&self) -> bool {
        self.processed
    }

    /// 判断材料是否与给定名称一致（不区分大小写）
    pub fn is_material(&self, material: &str) -> bool {
        self.material == canonical_material(material)
    }

    /// 状态迁移，只允许离开 Pending
    pub(crate) fn transition_to(&mut self, next: ItemState) {
        debug_assert!(next != ItemState::Pending, "投放物不能回到 Pending 状态");
        self.state = next;
    }

    pub(crate) fn mark_processed(&mut self) {
        self.processed = true;
    }
}
