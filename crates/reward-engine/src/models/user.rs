//! 用户模型

use serde::{Deserialize, Serialize};

/// 用户
///
/// 余额只增不减，唯一的修改入口是奖励发放步骤
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: String,
    name: String,
    #[serde(default)]
    balance: u64,
}

impl User {
    /// 创建余额为 0 的用户
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            balance: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 当前奖励币余额
    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// 增加奖励币，溢出时饱和
    pub(crate) fn credit(&mut self, coins: u64) {
        self.balance = self.balance.saturating_add(coins);
    }
}
