//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置加载失败: {source}")]
    LoadError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 依赖注入错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("组件未注册: {type_name}")]
    ComponentNotRegistered { type_name: String },

    #[error("组件创建失败: {type_name}, 原因: {source}")]
    ComponentCreationFailed {
        type_name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("循环依赖检测到: {dependency_chain}")]
    CircularDependency { dependency_chain: String },

    #[error("组件注册失败: {type_name}, 原因: {message}")]
    RegistrationError { type_name: String, message: String },

    #[error("重复注册: {service} 已绑定到 {existing}，拒绝绑定 {rejected}")]
    DuplicateRegistration {
        service: String,
        existing: String,
        rejected: String,
    },

    #[error("类型转换失败: 期望 {expected}, 实际实例来自 {actual}")]
    TypeMismatch { expected: String, actual: String },
}

impl DependencyError {
    /// 创建组件创建失败错误
    pub fn creation_failed(
        type_name: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ComponentCreationFailed {
            type_name: type_name.into(),
            source: source.into(),
        }
    }

    /// 创建注册失败错误
    pub fn registration_error(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RegistrationError {
            type_name: type_name.into(),
            message: message.into(),
        }
    }
}

/// 组件错误类型
#[derive(Error, Debug)]
pub enum ComponentError {
    #[error("模块扫描失败: {module}, 原因: {message}")]
    ScanError { module: String, message: String },
}

impl ComponentError {
    /// 创建扫描错误
    pub fn scan_error(module: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ScanError {
            module: module.into(),
            message: message.into(),
        }
    }
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("依赖注入错误: {source}")]
    DependencyError {
        #[from]
        source: DependencyError,
    },

    #[error("组件错误: {source}")]
    ComponentError {
        #[from]
        source: ComponentError,
    },

    #[error("基础设施启动失败: {message}")]
    BootstrapFailed { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_registration_names_both_implementations() {
        let error = DependencyError::DuplicateRegistration {
            service: "dyn CommandHandler<CreateOrder>".to_string(),
            existing: "CreateOrderHandler".to_string(),
            rejected: "LegacyOrderHandler".to_string(),
        };

        let message = error.to_string();
        assert!(message.contains("CreateOrderHandler"));
        assert!(message.contains("LegacyOrderHandler"));
    }

    #[test]
    fn infrastructure_error_wraps_dependency_error() {
        let error: InfrastructureError =
            DependencyError::registration_error("HandlerA", "参数个数不匹配").into();

        assert!(matches!(error, InfrastructureError::DependencyError { .. }));
        assert!(error.to_string().contains("HandlerA"));
    }
}
