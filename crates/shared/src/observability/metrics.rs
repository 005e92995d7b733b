//! 业务指标模块
//!
//! 基于 metrics crate 的门面宏记录投放与奖励指标。
//! 本 crate 不安装 exporter；未安装 recorder 时所有记录调用均为空操作。

/// 投放次数（按材料和结果分组）
pub const DEPOSITS_TOTAL: &str = "deposits_total";
/// 累计发放的奖励币数
pub const REWARD_COINS_TOTAL: &str = "rewards_credited_coins_total";
/// 新建用户数
pub const USERS_CREATED_TOTAL: &str = "users_created_total";

/// 注册指标描述
pub fn describe_metrics() {
    metrics::describe_counter!(
        DEPOSITS_TOTAL,
        "Total number of deposits by material and outcome"
    );
    metrics::describe_counter!(
        REWARD_COINS_TOTAL,
        "Total reward coins credited to users"
    );
    metrics::describe_counter!(USERS_CREATED_TOTAL, "Total number of users created");
}

/// 记录一次投放
///
/// `material` 取值：PLASTIC, GLASS, METAL, PAPER, OTHER（由调用方归一化，不直接使用用户输入）
/// `outcome` 取值：APPROVED, REJECTED, WRONG_MATERIAL, CAPACITY_EXCEEDED
pub fn record_deposit(material: &str, outcome: &str) {
    metrics::counter!(
        DEPOSITS_TOTAL,
        "material" => material.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// 记录奖励发放，`material` 标签取值同 [`record_deposit`]
pub fn record_reward(material: &str, coins: u64) {
    metrics::counter!(REWARD_COINS_TOTAL, "material" => material.to_string()).increment(coins);
}

/// 记录用户创建
pub fn record_user_created() {
    metrics::counter!(USERS_CREATED_TOTAL).increment(1);
}
