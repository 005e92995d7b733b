//! 回收奖励引擎错误类型
//!
//! 定义回收箱投放、用户存储和服务层的业务错误与系统错误

use thiserror::Error;

/// 回收箱错误
///
/// 投放前置条件不满足时返回，返回前不修改任何状态
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BinError {
    #[error("投放物材料与回收箱不符: 回收箱={bin_material}, 投放物={item_material}")]
    WrongMaterial {
        bin_material: String,
        item_material: String,
    },

    #[error("超出回收箱容量: 重量={weight_kg}kg, 容量={capacity_kg}kg")]
    CapacityExceeded { weight_kg: f64, capacity_kg: f64 },

    #[error("回收箱配置无效: {0}")]
    InvalidConfig(String),
}

impl BinError {
    /// 获取错误码
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::WrongMaterial { .. } => "WRONG_MATERIAL",
            Self::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            Self::InvalidConfig(_) => "INVALID_BIN_CONFIG",
        }
    }
}

/// 用户存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("用户数据读写失败: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("用户数据序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("用户存储不可用: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "STORAGE_IO_ERROR",
            Self::Serialization(_) => "STORAGE_SERIALIZATION_ERROR",
            Self::Unavailable(_) => "STORAGE_UNAVAILABLE",
        }
    }
}

/// 回收服务错误
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("用户不存在: {0}")]
    UserNotFound(String),

    #[error("回收箱不存在: {0}")]
    BinNotFound(String),

    #[error("用户名不能为空")]
    InvalidUserName,

    #[error(transparent)]
    Bin(#[from] BinError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// 回收服务 Result 类型别名
pub type Result<T> = std::result::Result<T, ServiceError>;

impl ServiceError {
    /// 检查是否为业务错误（非系统错误）
    pub fn is_business_error(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }

    /// 获取错误码
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::BinNotFound(_) => "BIN_NOT_FOUND",
            Self::InvalidUserName => "INVALID_USER_NAME",
            Self::Bin(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
        }
    }
}
