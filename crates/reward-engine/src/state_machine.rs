//! 投放物状态机
//!
//! 驱动投放物从 Pending 迁移到 Approved / Rejected，并在通过后发放奖励。
//!
//! ## 状态迁移
//!
//! | 当前状态 | validate | process_reward |
//! |---|---|---|
//! | Pending | 执行校验链，迁移到 Approved 或 Rejected，随后立即处理奖励 | 未校验，无变化 |
//! | Validating | 无操作（保留给异步校验） | 未校验，无变化 |
//! | Approved | 无操作 | 首次发放奖励，之后无操作 |
//! | Rejected | 无操作 | 拒绝，无变化 |

use tracing::{debug, info, warn};

use eco_shared::observability::metrics;

use crate::models::{Item, ItemState, MaterialType, User};
use crate::reward::RewardRegistry;
use crate::validation::ValidationChain;

/// 奖励处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardOutcome {
    /// 已发放奖励
    Credited { coins: u64 },
    /// 投放物尚未校验
    NotValidated,
    /// 投放物已被拒绝，不发放奖励
    Rejected,
    /// 奖励已发放过，本次为空操作
    AlreadyProcessed,
}

impl RewardOutcome {
    /// 本次调用发放的奖励币数
    pub fn credited_coins(&self) -> u64 {
        match self {
            Self::Credited { coins } => *coins,
            _ => 0,
        }
    }
}

/// 投放物状态机
///
/// 持有校验链与奖励注册表的引用，本身无可变状态，可在多个回收箱间共享。
#[derive(Debug, Clone)]
pub struct ItemStateMachine {
    chain: ValidationChain,
    rewards: &'static RewardRegistry,
}

impl ItemStateMachine {
    pub fn new(chain: ValidationChain, rewards: &'static RewardRegistry) -> Self {
        Self { chain, rewards }
    }

    pub fn chain(&self) -> &ValidationChain {
        &self.chain
    }

    /// 校验投放物
    ///
    /// 只有 Pending 状态会真正执行校验，其余状态为幂等空操作。
    /// 迁移后立即为新状态处理奖励，返回最终状态。
    pub fn validate(&self, item: &mut Item, user: &mut User) -> ItemState {
        match item.state() {
            ItemState::Pending => {
                let next = match self.chain.first_failure(item) {
                    None => ItemState::Approved,
                    Some(rule) => {
                        info!(
                            item_id = %item.item_id(),
                            material = %item.material(),
                            weight_kg = item.weight_kg(),
                            rule = rule,
                            "投放物校验未通过"
                        );
                        ItemState::Rejected
                    }
                };
                item.transition_to(next);
                debug!(item_id = %item.item_id(), state = %next, "投放物状态迁移");

                self.process_reward(item, user);
                item.state()
            }
            ItemState::Validating | ItemState::Approved | ItemState::Rejected => item.state(),
        }
    }

    /// 处理奖励
    ///
    /// 每件投放物最多发放一次奖励，重复调用返回 `AlreadyProcessed` 且不改变余额。
    pub fn process_reward(&self, item: &mut Item, user: &mut User) -> RewardOutcome {
        match item.state() {
            ItemState::Pending | ItemState::Validating => {
                debug!(item_id = %item.item_id(), state = %item.state(), "投放物尚未校验");
                RewardOutcome::NotValidated
            }
            ItemState::Approved if item.is_processed() => {
                debug!(item_id = %item.item_id(), "奖励已发放，忽略重复请求");
                RewardOutcome::AlreadyProcessed
            }
            ItemState::Approved => {
                let coins = self.rewards.get_reward(item.material(), item.weight_kg());
                user.credit(coins);
                item.mark_processed();
                metrics::record_reward(MaterialType::metric_label(item.material()), coins);

                info!(
                    item_id = %item.item_id(),
                    user_id = %user.id(),
                    material = %item.material(),
                    weight_kg = item.weight_kg(),
                    coins = coins,
                    balance = user.balance(),
                    "奖励发放成功"
                );
                RewardOutcome::Credited { coins }
            }
            ItemState::Rejected => {
                warn!(item_id = %item.item_id(), user_id = %user.id(), "投放物已拒绝，无奖励");
                RewardOutcome::Rejected
            }
        }
    }
}

impl Default for ItemStateMachine {
    fn default() -> Self {
        Self::new(ValidationChain::default(), RewardRegistry::global())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new("USER1", "Ana")
    }

    #[test]
    fn test_pending_valid_item_is_approved_and_credited() {
        let machine = ItemStateMachine::default();
        let mut item = Item::new("METAL", 2.0);
        let mut user = user();

        assert_eq!(machine.validate(&mut item, &mut user), ItemState::Approved);
        assert!(item.is_processed());
        assert_eq!(user.balance(), 24);
    }

    #[test]
    fn test_pending_light_item_is_rejected() {
        let machine = ItemStateMachine::default();
        let mut item = Item::new("PAPER", 0.05);
        let mut user = user();

        assert_eq!(machine.validate(&mut item, &mut user), ItemState::Rejected);
        assert!(!item.is_processed());
        assert_eq!(user.balance(), 0);
        assert_eq!(
            machine.process_reward(&mut item, &mut user),
            RewardOutcome::Rejected
        );
        assert_eq!(user.balance(), 0);
    }

    #[test]
    fn test_process_reward_before_validation() {
        let machine = ItemStateMachine::default();
        let mut item = Item::new("GLASS", 1.0);
        let mut user = user();

        assert_eq!(
            machine.process_reward(&mut item, &mut user),
            RewardOutcome::NotValidated
        );
        assert_eq!(item.state(), ItemState::Pending);
        assert_eq!(user.balance(), 0);
    }

    #[test]
    fn test_process_reward_is_idempotent() {
        let machine = ItemStateMachine::default();
        let mut item = Item::new("PLASTIC", 2.0);
        let mut user = user();

        machine.validate(&mut item, &mut user);
        assert_eq!(user.balance(), 20);

        for _ in 0..3 {
            assert_eq!(
                machine.process_reward(&mut item, &mut user),
                RewardOutcome::AlreadyProcessed
            );
        }
        assert_eq!(user.balance(), 20);
    }

    #[test]
    fn test_validate_terminal_is_noop() {
        let machine = ItemStateMachine::default();
        let mut item = Item::new("METAL", 2.0);
        let mut user = user();

        machine.validate(&mut item, &mut user);
        assert_eq!(machine.validate(&mut item, &mut user), ItemState::Approved);
        assert_eq!(user.balance(), 24);

        let mut rejected = Item::new("METAL", 0.01);
        machine.validate(&mut rejected, &mut user);
        assert_eq!(
            machine.validate(&mut rejected, &mut user),
            ItemState::Rejected
        );
    }

    #[test]
    fn test_validating_is_noop() {
        let machine = ItemStateMachine::default();
        let mut item = Item::new("METAL", 2.0);
        item.transition_to(ItemState::Validating);
        let mut user = user();

        assert_eq!(machine.validate(&mut item, &mut user), ItemState::Validating);
        assert_eq!(
            machine.process_reward(&mut item, &mut user),
            RewardOutcome::NotValidated
        );
        assert_eq!(user.balance(), 0);
    }

    #[test]
    fn test_approved_unknown_material_credits_zero() {
        let machine = ItemStateMachine::default();
        let mut item = Item::new("WOOD", 3.0);
        let mut user = user();

        assert_eq!(machine.validate(&mut item, &mut user), ItemState::Approved);
        assert!(item.is_processed());
        assert_eq!(user.balance(), 0);
    }

    #[test]
    fn test_credited_coins() {
        assert_eq!(RewardOutcome::Credited { coins: 7 }.credited_coins(), 7);
        assert_eq!(RewardOutcome::AlreadyProcessed.credited_coins(), 0);
    }
}
