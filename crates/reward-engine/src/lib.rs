//! 回收奖励引擎
//!
//! 用户把废弃物投入对应材料的回收箱，投放物经过校验后按材料和重量发放奖励币。
//!
//! ## 核心流程
//!
//! 1. **回收箱接收**：校验材料与容量，不满足时直接拒绝
//! 2. **投放通知**：同步通知所有订阅者（此时校验结果未知）
//! 3. **状态机校验**：执行校验链，迁移到 Approved / Rejected
//! 4. **奖励发放**：通过后查询奖励注册表并给用户记账，每件投放物最多一次
//!
//! ## 模块结构
//!
//! - `models`: 领域模型定义
//! - `error`: 错误类型定义
//! - `reward`: 奖励计算器与注册表
//! - `validation`: 投放物校验链
//! - `state_machine`: 投放物状态机
//! - `notifier`: 投放事件通知
//! - `smart_bin`: 回收箱
//! - `store`: 用户存储
//! - `service`: 回收服务

pub mod error;
pub mod models;
pub mod notifier;
pub mod reward;
pub mod service;
pub mod smart_bin;
pub mod state_machine;
pub mod store;
pub mod validation;

pub use error::{BinError, Result, ServiceError, StorageError};
pub use models::*;
pub use notifier::{DepositEvent, DepositListener, DepositNotifier, LoggingListener, SubscriptionId};
pub use reward::{PerKgRate, RewardCalculator, RewardRegistry};
pub use service::{DepositReport, RecyclingService};
pub use smart_bin::Bin;
pub use state_machine::{ItemStateMachine, RewardOutcome};
pub use store::{JsonFileUserStore, MemoryUserStore, UserStore};
pub use validation::{MIN_WEIGHT_KG, ValidationChain, ValidationRule};
