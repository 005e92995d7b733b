//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 默认回收箱容量（千克）
pub const DEFAULT_BIN_CAPACITY_KG: f64 = 50.0;

/// 可观测性配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_level: String,
    /// 日志输出格式：json（结构化）或 pretty（人类可读）
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl ObservabilityConfig {
    /// 是否输出 JSON 格式日志
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

/// 用户数据存储配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// 用户列表文件路径
    pub users_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            users_file: PathBuf::from("data/users.json"),
        }
    }
}

/// 单个回收箱配置
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BinConfig {
    /// 可投放的材料类型（不区分大小写）
    pub material: String,
    /// 容量上限（千克），单次投放重量不得超过此值
    #[serde(default = "default_capacity")]
    pub capacity_kg: f64,
}

fn default_capacity() -> f64 {
    DEFAULT_BIN_CAPACITY_KG
}

impl BinConfig {
    pub fn new(material: impl Into<String>, capacity_kg: f64) -> Self {
        Self {
            material: material.into(),
            capacity_kg,
        }
    }
}

/// 默认回收箱：每种材料一个，容量 50kg
pub fn default_bins() -> Vec<BinConfig> {
    ["PLASTIC", "GLASS", "METAL", "PAPER"]
        .into_iter()
        .map(|material| BinConfig::new(material, DEFAULT_BIN_CAPACITY_KG))
        .collect()
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    pub observability: ObservabilityConfig,
    pub storage: StorageConfig,
    pub bins: Vec<BinConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: "eco-reward".to_string(),
            environment: "development".to_string(),
            observability: ObservabilityConfig::default(),
            storage: StorageConfig::default(),
            bins: default_bins(),
        }
    }
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. `.env` 文件（若存在，写入进程环境变量）
    /// 2. config/default.toml（默认配置）
    /// 3. config/{environment}.toml（环境特定配置）
    /// 4. 环境变量（ECO_ 前缀，层级用双下划线分隔，如 ECO_STORAGE__USERS_FILE -> storage.users_file）
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("ECO_ENV").unwrap_or_else(|_| "development".to_string());
        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        Self::load_from(service_name, &env, Path::new(&config_dir))
    }

    /// 从指定目录加载配置（不读取 `.env`）
    pub fn load_from(service_name: &str, env: &str, config_dir: &Path) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", env)?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join(format!("{}.toml", env))).required(false))
            .add_source(
                Environment::with_prefix("ECO")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
