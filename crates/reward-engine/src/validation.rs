//! 投放物校验链
//!
//! 由若干具名规则按顺序组成，整体结果为所有规则的逻辑与。
//! 规则按成本从低到高排列，遇到第一个失败的规则即短路返回。

use std::fmt;

use crate::models::Item;

/// 最小有效重量（千克）
pub const MIN_WEIGHT_KG: f64 = 0.1;

/// 校验规则
///
/// 无状态谓词，只读取投放物，不产生副作用
#[derive(Clone, Copy)]
pub struct ValidationRule {
    name: &'static str,
    check: fn(&Item) -> bool,
}

impl ValidationRule {
    pub const fn new(name: &'static str, check: fn(&Item) -> bool) -> Self {
        Self { name, check }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn check(&self, item: &Item) -> bool {
        (self.check)(item)
    }
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValidationRule").field(&self.name).finish()
    }
}

/// 基础规则：重量必须为正数（NaN 不通过）
pub const POSITIVE_WEIGHT: ValidationRule = ValidationRule::new("positive_weight", positive_weight);

/// 材料名称不能为空
pub const MATERIAL_PRESENT: ValidationRule =
    ValidationRule::new("material_present", material_present);

/// 重量不低于 [`MIN_WEIGHT_KG`]
pub const MINIMUM_WEIGHT: ValidationRule = ValidationRule::new("minimum_weight", minimum_weight);

fn positive_weight(item: &Item) -> bool {
    item.weight_kg() > 0.0
}

fn material_present(item: &Item) -> bool {
    !item.material().is_empty()
}

fn minimum_weight(item: &Item) -> bool {
    item.weight_kg() >= MIN_WEIGHT_KG
}

/// 校验链
#[derive(Debug, Clone)]
pub struct ValidationChain {
    rules: Vec<ValidationRule>,
}

impl ValidationChain {
    /// 只包含基础规则的校验链
    pub fn basic() -> Self {
        Self {
            rules: vec![POSITIVE_WEIGHT],
        }
    }

    /// 追加一条规则
    pub fn with(mut self, rule: ValidationRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// 所有规则都通过时返回 true
    pub fn validate(&self, item: &Item) -> bool {
        self.rules.iter().all(|rule| rule.check(item))
    }

    /// 返回第一个未通过的规则名称，全部通过时返回 None
    pub fn first_failure(&self, item: &Item) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|rule| !rule.check(item))
            .map(ValidationRule::name)
    }

    /// 按执行顺序列出规则名称
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(ValidationRule::name).collect()
    }
}

impl Default for ValidationChain {
    /// 标准校验链：正重量 -> 材料非空 -> 最小重量
    fn default() -> Self {
        Self::basic().with(MATERIAL_PRESENT).with(MINIMUM_WEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_chain_order() {
        assert_eq!(
            ValidationChain::default().rule_names(),
            vec!["positive_weight", "material_present", "minimum_weight"]
        );
    }

    #[test]
    fn test_valid_item_passes() {
        let chain = ValidationChain::default();
        let item = Item::new("METAL", 2.0);
        assert!(chain.validate(&item));
        assert_eq!(chain.first_failure(&item), None);
    }

    #[test]
    fn test_non_positive_weight_fails() {
        let chain = ValidationChain::default();
        for weight in [0.0, -0.5, -100.0, f64::NAN] {
            let item = Item::new("PLASTIC", weight);
            assert!(!chain.validate(&item), "weight {weight} should fail");
            assert_eq!(chain.first_failure(&item), Some("positive_weight"));
        }
    }

    #[test]
    fn test_empty_material_fails() {
        let chain = ValidationChain::default();
        for material in ["", "   "] {
            let item = Item::new(material, 1.0);
            assert!(!chain.validate(&item));
            assert_eq!(chain.first_failure(&item), Some("material_present"));
        }
    }

    #[test]
    fn test_below_minimum_weight_fails() {
        let chain = ValidationChain::default();
        let item = Item::new("PAPER", 0.05);
        assert!(!chain.validate(&item));
        assert_eq!(chain.first_failure(&item), Some("minimum_weight"));

        assert!(chain.validate(&Item::new("PAPER", MIN_WEIGHT_KG)));
    }

    #[test]
    fn test_order_does_not_change_result() {
        let forward = ValidationChain::default();
        let reversed = ValidationChain {
            rules: vec![MINIMUM_WEIGHT, MATERIAL_PRESENT, POSITIVE_WEIGHT],
        };

        for item in [
            Item::new("GLASS", 0.05),
            Item::new("", 3.0),
            Item::new("GLASS", -1.0),
            Item::new("GLASS", 3.0),
        ] {
            assert_eq!(forward.validate(&item), reversed.validate(&item));
        }
    }

    #[test]
    fn test_basic_chain_only_checks_weight() {
        let chain = ValidationChain::basic();
        assert!(chain.validate(&Item::new("", 0.01)));
        assert!(!chain.validate(&Item::new("METAL", 0.0)));
    }
}
