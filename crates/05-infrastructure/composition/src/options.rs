//! 事件溯源配置
//!
//! 配置来源按优先级从低到高：默认值、配置文件、`EVENT_SOURCING_` 前缀的环境变量。

use config::{Config, Environment, File};
use infrastructure_common::{ConfigError, Lifetime};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// 环境变量前缀
pub const ENV_PREFIX: &str = "EVENT_SOURCING";

/// 事件溯源配置选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventSourcingOptions {
    /// 是否扫描命令处理器
    pub scan_for_handlers: bool,
    /// 命令处理器绑定的生命周期
    pub handler_lifetime: Lifetime,
    pub state_connector_lifetime: Lifetime,
    pub command_dispatcher_lifetime: Lifetime,
    pub event_publisher_lifetime: Lifetime,
}

impl Default for EventSourcingOptions {
    fn default() -> Self {
        Self {
            scan_for_handlers: false,
            handler_lifetime: Lifetime::Transient,
            state_connector_lifetime: Lifetime::Transient,
            command_dispatcher_lifetime: Lifetime::Transient,
            event_publisher_lifetime: Lifetime::Singleton,
        }
    }
}

impl EventSourcingOptions {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 启用或关闭处理器扫描
    pub fn with_handler_scanning(mut self, enabled: bool) -> Self {
        self.scan_for_handlers = enabled;
        self
    }

    pub fn with_handler_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.handler_lifetime = lifetime;
        self
    }

    pub fn with_state_connector_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.state_connector_lifetime = lifetime;
        self
    }

    pub fn with_command_dispatcher_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.command_dispatcher_lifetime = lifetime;
        self
    }

    pub fn with_event_publisher_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.event_publisher_lifetime = lifetime;
        self
    }

    /// 加载配置
    ///
    /// 给出路径时文件必须存在，格式由扩展名决定（toml / json / yaml）。
    /// 环境变量以 `EVENT_SOURCING_` 开头，例如 `EVENT_SOURCING_SCAN_FOR_HANDLERS=true`。
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            debug!("加载配置文件: {}", path.display());
            builder = builder.add_source(File::from(path));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ConfigError::LoadError {
                source: Box::new(e),
            })?;

        let options: Self = settings
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError {
                source: Box::new(e),
            })?;

        debug!("事件溯源配置: {:?}", options);
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn toml_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_keep_scanning_off() {
        let options = EventSourcingOptions::default();

        assert!(!options.scan_for_handlers);
        assert_eq!(options.handler_lifetime, Lifetime::Transient);
        assert_eq!(options.event_publisher_lifetime, Lifetime::Singleton);
    }

    #[test]
    fn loads_partial_file_over_defaults() {
        let file = toml_file(
            r#"
scan_for_handlers = true
handler_lifetime = "singleton"
"#,
        );

        let options = EventSourcingOptions::load(Some(file.path())).unwrap();

        assert!(options.scan_for_handlers);
        assert_eq!(options.handler_lifetime, Lifetime::Singleton);
        assert_eq!(options.state_connector_lifetime, Lifetime::Transient);
        assert_eq!(options.event_publisher_lifetime, Lifetime::Singleton);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let error = EventSourcingOptions::load(Some(&path)).unwrap_err();
        assert!(matches!(error, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn invalid_lifetime_is_a_parse_error() {
        let file = toml_file("handler_lifetime = \"scoped\"\n");

        let error = EventSourcingOptions::load(Some(file.path())).unwrap_err();
        assert!(matches!(error, ConfigError::ParseError { .. }));
    }

    #[test]
    fn builder_setters() {
        let options = EventSourcingOptions::new()
            .with_handler_scanning(true)
            .with_command_dispatcher_lifetime(Lifetime::Singleton);

        assert!(options.scan_for_handlers);
        assert_eq!(options.command_dispatcher_lifetime, Lifetime::Singleton);
    }
}
