//! 回收领域枚举类型定义
//!
//! 所有枚举都支持 JSON（serde）序列化

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 材料类型
///
/// 奖励表中登记的可回收材料，每种材料对应固定的每千克奖励币数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaterialType {
    /// 塑料 - 10 币/kg
    Plastic,
    /// 玻璃 - 8 币/kg
    Glass,
    /// 金属 - 12 币/kg
    Metal,
    /// 纸类 - 6 币/kg
    Paper,
}

impl MaterialType {
    /// 全部材料类型，按奖励表顺序排列
    pub const ALL: [MaterialType; 4] = [Self::Plastic, Self::Glass, Self::Metal, Self::Paper];

    /// 每千克奖励币数
    pub const fn coins_per_kg(&self) -> u32 {
        match self {
            Self::Plastic => 10,
            Self::Glass => 8,
            Self::Metal => 12,
            Self::Paper => 6,
        }
    }

    /// 规范名称（大写）
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plastic => "PLASTIC",
            Self::Glass => "GLASS",
            Self::Metal => "METAL",
            Self::Paper => "PAPER",
        }
    }

    /// 指标标签：已登记材料取规范名称，其余统一为 `OTHER`
    pub fn metric_label(raw: &str) -> &'static str {
        raw.parse::<Self>().map(|m| m.as_str()).unwrap_or("OTHER")
    }
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 未登记的材料名称
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("未知的材料类型: {0}")]
pub struct UnknownMaterial(pub String);

impl FromStr for MaterialType {
    type Err = UnknownMaterial;

    /// 不区分大小写，忽略首尾空白
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical = canonical_material(s);
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == canonical)
            .ok_or(UnknownMaterial(canonical))
    }
}

/// 材料名称规范化：去除首尾空白并转为大写
pub fn canonical_material(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// 投放物状态
///
/// 只允许向前迁移：Pending -> Approved | Rejected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemState {
    /// 待校验 - 刚创建，尚未经过校验链
    #[default]
    Pending,
    /// 校验中 - 保留给异步校验，当前同步流程不会进入此状态
    Validating,
    /// 已通过 - 校验通过，可发放奖励
    Approved,
    /// 已拒绝 - 校验未通过，不发放奖励
    Rejected,
}

impl ItemState {
    /// 是否为终态
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Validating => "VALIDATING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
