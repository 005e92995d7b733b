//! 统一可观测性模块
//!
//! 提供 tracing 日志与 metrics 指标的统一初始化。
//! 所有入口（CLI、测试工具）通过单一入口点配置可观测性，确保一致的日志格式和指标命名。

pub mod metrics;
pub mod tracing;

use ::tracing::info;
use anyhow::Result;

pub use crate::config::ObservabilityConfig;

/// 统一初始化可观测性
///
/// 初始化顺序：
/// 1. Tracing（日志）
/// 2. Metrics（注册指标描述，未安装 recorder 时指标调用为空操作）
///
/// # Example
///
/// ```ignore
/// use eco_shared::config::AppConfig;
/// use eco_shared::observability::init;
///
/// fn main() -> anyhow::Result<()> {
///     let config = AppConfig::load("eco-reward")?;
///     init(&config.service_name, &config.observability)?;
///     Ok(())
/// }
/// ```
pub fn init(service_name: &str, config: &ObservabilityConfig) -> Result<()> {
    tracing::init(config)?;
    metrics::describe_metrics();

    info!(
        service = %service_name,
        log_level = %config.log_level,
        log_format = %config.log_format,
        "Observability initialized"
    );

    Ok(())
}
