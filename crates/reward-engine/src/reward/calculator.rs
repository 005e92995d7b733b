//! 奖励计算器 Trait 定义
//!
//! 每种材料一个计算器，把重量换算为整数奖励币

use crate::models::MaterialType;

/// 奖励计算器 Trait
///
/// 纯函数：相同的重量总是得到相同的奖励，不读写任何外部状态。
/// 通过 [`RewardRegistry`](super::RewardRegistry) 按材料类型统一路由。
pub trait RewardCalculator: Send + Sync {
    /// 返回此计算器负责的材料类型
    fn material_type(&self) -> MaterialType;

    /// 计算奖励币数
    fn calculate(&self, weight_kg: f64) -> u64;

    /// 计算器描述（用于日志）
    fn description(&self) -> String {
        format!("{} 奖励计算器", self.material_type())
    }
}

/// 按千克计费的计算器
///
/// `reward = floor(weight_kg * coins_per_kg)`，非正数或 NaN 结果记为 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerKgRate {
    material: MaterialType,
    coins_per_kg: u32,
}

impl PerKgRate {
    pub fn new(material: MaterialType, coins_per_kg: u32) -> Self {
        Self {
            material,
            coins_per_kg,
        }
    }

    pub fn coins_per_kg(&self) -> u32 {
        self.coins_per_kg
    }
}

impl From<MaterialType> for PerKgRate {
    fn from(material: MaterialType) -> Self {
        Self::new(material, material.coins_per_kg())
    }
}

impl RewardCalculator for PerKgRate {
    fn material_type(&self) -> MaterialType {
        self.material
    }

    fn calculate(&self, weight_kg: f64) -> u64 {
        let raw = weight_kg * f64::from(self.coins_per_kg);
        // `as` 转换对超大值饱和
        if raw > 0.0 { raw.floor() as u64 } else { 0 }
    }

    fn description(&self) -> String {
        format!("{} {} 币/kg", self.material, self.coins_per_kg)
    }
}
