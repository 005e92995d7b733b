//! 奖励计算模块
//!
//! 采用策略模式，通过 `RewardCalculator` trait 定义统一接口，
//! 每种材料一个计算器；`RewardRegistry` 按材料类型路由到对应实现。

pub mod calculator;
pub mod registry;

pub use calculator::{PerKgRate, RewardCalculator};
pub use registry::RewardRegistry;
