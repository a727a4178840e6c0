//! 类型元数据
//!
//! 以 `TypeId` 作为稳定标识，`type_name` 仅用于日志和错误信息。

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 类型信息
///
/// 相等性和哈希只看 `TypeId`。
#[derive(Debug, Clone)]
pub struct TypeInfo {
    /// 类型ID
    pub id: TypeId,
    /// 去掉模块路径的类型名称
    pub name: String,
    /// 完整类型名称（包含模块路径）
    pub full_name: &'static str,
}

impl TypeInfo {
    /// 从类型获取类型信息，支持 trait object 等非 Sized 类型
    pub fn of<T: ?Sized + 'static>() -> Self {
        let full_name = std::any::type_name::<T>();
        Self {
            id: TypeId::of::<T>(),
            name: strip_module_paths(full_name),
            full_name,
        }
    }

    /// 是否为指定类型
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// 获取简短的类型名称
    pub fn short_name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// 去掉类型名称中每一段路径的模块前缀，泛型参数同样处理
fn strip_module_paths(full_name: &str) -> String {
    let mut output = String::with_capacity(full_name.len());
    let mut segment_start = 0;
    let mut chars = full_name.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            output.truncate(segment_start);
        } else if c.is_alphanumeric() || c == '_' {
            output.push(c);
        } else {
            output.push(c);
            segment_start = output.len();
        }
    }

    output
}
