//! 奖励计算器注册表
//!
//! 管理所有 RewardCalculator 实例，按材料类型索引，提供统一的查找接口。
//!
//! ## 设计说明
//!
//! 注册表采用 HashMap 存储计算器实例，以 MaterialType 为 key 进行路由。
//! 进程内共享一个只读实例，首次访问时通过 `OnceLock` 构建，之后不再变化。
//!
//! ## 使用示例
//!
//! ```
//! use reward_engine::reward::RewardRegistry;
//!
//! let registry = RewardRegistry::global();
//! assert_eq!(registry.get_reward("metal", 2.0), 24);
//! assert_eq!(registry.get_reward("wood", 2.0), 0);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::{debug, info};

use crate::models::MaterialType;

use super::calculator::{PerKgRate, RewardCalculator};

/// 全局注册表实例
static GLOBAL_REGISTRY: OnceLock<RewardRegistry> = OnceLock::new();

/// 奖励计算器注册表
///
/// 集中管理所有材料的奖励计算器，未登记的材料奖励为 0。
/// 线程安全，可在多个回收箱间共享。
pub struct RewardRegistry {
    calculators: HashMap<MaterialType, Arc<dyn RewardCalculator>>,
}

impl RewardRegistry {
    /// 创建空的注册表
    pub fn new() -> Self {
        Self {
            calculators: HashMap::new(),
        }
    }

    /// 进程内共享的注册表，首次访问时按默认奖励表构建
    pub fn global() -> &'static RewardRegistry {
        GLOBAL_REGISTRY.get_or_init(Self::with_defaults)
    }

    /// 注册一个计算器
    ///
    /// 计算器按其 `material_type()` 索引，同类型已存在时会被替换。
    pub fn register(&mut self, calculator: Arc<dyn RewardCalculator>) -> &mut Self {
        let material = calculator.material_type();
        debug!(
            material = %material,
            description = %calculator.description(),
            "注册奖励计算器"
        );
        self.calculators.insert(material, calculator);
        self
    }

    /// 获取指定材料的计算器
    pub fn get(&self, material: MaterialType) -> Option<Arc<dyn RewardCalculator>> {
        self.calculators.get(&material).cloned()
    }

    /// 按材料名称计算奖励
    ///
    /// 名称不区分大小写；未知材料返回 0，不报错
    pub fn get_reward(&self, material: &str, weight_kg: f64) -> u64 {
        let Ok(material) = material.parse::<MaterialType>() else {
            debug!(material = %material, "未登记的材料，奖励为 0");
            return 0;
        };

        self.calculators
            .get(&material)
            .map(|calculator| calculator.calculate(weight_kg))
            .unwrap_or(0)
    }

    pub fn contains(&self, material: MaterialType) -> bool {
        self.calculators.contains_key(&material)
    }

    /// 获取所有已注册的材料类型（按奖励表顺序）
    pub fn registered_types(&self) -> Vec<MaterialType> {
        MaterialType::ALL
            .into_iter()
            .filter(|m| self.contains(*m))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.calculators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calculators.is_empty()
    }

    /// 创建包含默认奖励表的注册表
    ///
    /// | 材料 | 币/kg |
    /// |---|---|
    /// | PLASTIC | 10 |
    /// | GLASS | 8 |
    /// | METAL | 12 |
    /// | PAPER | 6 |
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        for material in MaterialType::ALL {
            registry.register(Arc::new(PerKgRate::from(material)));
        }

        info!(
            calculator_count = registry.len(),
            types = ?registry.registered_types(),
            "默认奖励计算器初始化完成"
        );

        registry
    }
}

impl fmt::Debug for RewardRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RewardRegistry")
            .field("types", &self.registered_types())
            .finish()
    }
}

impl Default for RewardRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 测试用的固定奖励计算器
    struct FlatCalculator {
        material: MaterialType,
        coins: u64,
    }

    impl RewardCalculator for FlatCalculator {
        fn material_type(&self) -> MaterialType {
            self.material
        }

        fn calculate(&self, _weight_kg: f64) -> u64 {
            self.coins
        }
    }

    #[test]
    fn test_registry_new() {
        let registry = RewardRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.get_reward("PLASTIC", 2.0), 0);
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = RewardRegistry::with_defaults();
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.registered_types(), MaterialType::ALL.to_vec());
        assert_eq!(
            registry.get(MaterialType::Metal).unwrap().material_type(),
            MaterialType::Metal
        );
    }

    #[test]
    fn test_get_reward_table() {
        let registry = RewardRegistry::with_defaults();
        assert_eq!(registry.get_reward("PLASTIC", 2.0), 20);
        assert_eq!(registry.get_reward("plastic", 2.0), 20);
        assert_eq!(registry.get_reward("GLASS", 1.25), 10);
        assert_eq!(registry.get_reward("METAL", 2.0), 24);
        assert_eq!(registry.get_reward("Paper", 3.5), 21);
        assert_eq!(registry.get_reward("UNKNOWN", 5.0), 0);
        assert_eq!(registry.get_reward("", 5.0), 0);
    }

    #[test]
    fn test_register_replace() {
        let mut registry = RewardRegistry::with_defaults();
        registry.register(Arc::new(FlatCalculator {
            material: MaterialType::Glass,
            coins: 7,
        }));

        assert_eq!(registry.len(), 4);
        assert_eq!(registry.get_reward("glass", 100.0), 7);
    }

    #[test]
    fn test_partial_registry_unknown_is_zero() {
        let mut registry = RewardRegistry::new();
        registry.register(Arc::new(PerKgRate::from(MaterialType::Paper)));

        assert_eq!(registry.registered_types(), vec![MaterialType::Paper]);
        assert_eq!(registry.get_reward("PAPER", 1.0), 6);
        assert_eq!(registry.get_reward("METAL", 1.0), 0);
    }

    #[test]
    fn test_global_is_shared() {
        let a = RewardRegistry::global() as *const RewardRegistry;
        let b = RewardRegistry::global() as *const RewardRegistry;
        assert_eq!(a, b);
        assert_eq!(RewardRegistry::global().get_reward("METAL", 2.0), 24);
    }
}
