//! 命令处理与分发错误

use infrastructure_common::DependencyError;
use thiserror::Error;

/// 命令处理器错误
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("命令被拒绝: {reason}")]
    Rejected { reason: String },

    #[error("命令处理失败: {message}")]
    Failed { message: String },
}

impl HandlerError {
    /// 创建拒绝错误
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }
}

/// 命令分发错误
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("无法解析命令处理器: {source}")]
    Resolution {
        #[from]
        source: DependencyError,
    },

    #[error("命令处理器执行失败: {source}")]
    Handler {
        #[from]
        source: HandlerError,
    },
}
