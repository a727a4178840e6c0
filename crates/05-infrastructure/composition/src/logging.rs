//! 日志初始化

use infrastructure_common::InfrastructureError;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// 日志配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// 未设置 `RUST_LOG` 时使用的日志级别
    pub level: Level,
    pub show_target: bool,
    pub show_thread_ids: bool,
    pub show_file: bool,
    pub show_line_number: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::with_level(Level::INFO)
    }
}

impl LoggingConfig {
    /// 指定级别的紧凑文本日志
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }

    /// 开发环境：DEBUG 级别，带源码位置
    pub fn development() -> Self {
        Self {
            show_thread_ids: true,
            show_file: true,
            show_line_number: true,
            ..Self::with_level(Level::DEBUG)
        }
    }

    /// 生产环境：INFO 级别 JSON 日志
    pub fn production() -> Self {
        Self {
            show_target: false,
            json_format: true,
            ..Self::with_level(Level::INFO)
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level.as_str()))
    }
}

/// 初始化全局日志订阅者
///
/// 全局订阅者只能设置一次，重复调用返回 [`InfrastructureError::BootstrapFailed`]。
pub fn init_logging(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_target(config.show_target)
        .with_thread_ids(config.show_thread_ids)
        .with_file(config.show_file)
        .with_line_number(config.show_line_number);

    if config.json_format {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    }
    .map_err(|e| InfrastructureError::BootstrapFailed {
        message: format!("日志初始化失败: {}", e),
    })?;

    tracing::debug!("日志系统初始化完成: {:?}", config);
    Ok(())
}
