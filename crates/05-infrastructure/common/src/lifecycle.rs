//! 服务生命周期

use serde::{Deserialize, Serialize};
use std::fmt;

/// 服务生命周期类型
///
/// 作用域生命周期由宿主容器管理，不在这里建模。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifetime {
    /// 单例模式 - 每个注册只创建一个实例
    Singleton,
    /// 瞬时模式 - 每次解析都创建新实例
    #[default]
    Transient,
}

impl Lifetime {
    /// 是否为单例
    pub fn is_singleton(self) -> bool {
        matches!(self, Self::Singleton)
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Singleton => f.write_str("singleton"),
            Self::Transient => f.write_str("transient"),
        }
    }
}
