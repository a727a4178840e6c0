//! 编译时类型发现
//!
//! Rust 没有运行时反射，候选类型通过 [`TypeDescriptor`] 显式描述自己：
//! 类型种类、构造函数，以及实现的泛型能力（含其隐含的能力闭包）。

use crate::factory::{constructor_for, downcast_service, Instance, ServiceFactory};
use crate::resolver::ServiceResolver;
use infrastructure_common::{DependencyError, TypeInfo};
use std::fmt;
use std::sync::Arc;

/// 泛型契约描述符
///
/// 契约的身份由未参数化的名称和参数个数共同决定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContractDescriptor {
    name: &'static str,
    arity: usize,
}

impl ContractDescriptor {
    /// 创建契约描述符
    pub const fn new(name: &'static str, arity: usize) -> Self {
        Self { name, arity }
    }

    /// 契约名称
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 类型参数个数
    pub fn arity(&self) -> usize {
        self.arity
    }
}

impl fmt::Display for ContractDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}`{}", self.name, self.arity)
    }
}

/// 能力的类型实参
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeArg {
    /// 已绑定的具体类型
    Bound(TypeInfo),
    /// 尚未绑定的类型参数
    Parameter(&'static str),
}

impl TypeArg {
    /// 以具体类型创建实参
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::Bound(TypeInfo::of::<T>())
    }

    /// 未绑定的类型参数
    pub fn parameter(name: &'static str) -> Self {
        Self::Parameter(name)
    }

    /// 已绑定时返回类型信息
    pub fn as_bound(&self) -> Option<&TypeInfo> {
        match self {
            Self::Bound(info) => Some(info),
            Self::Parameter(_) => None,
        }
    }
}

/// 激活器：把构造出的具体实例（`Arc<T>`）转换为契约特化的服务实例（`Arc<S>`）
pub type Activator = Arc<dyn Fn(Instance) -> Result<Instance, DependencyError> + Send + Sync>;

/// 类型实现的一项泛型能力
///
/// `implies` 记录该能力隐含的其他能力，例如 supertrait 或组合标记能力。
#[derive(Clone)]
pub struct Capability {
    contract: ContractDescriptor,
    arguments: Vec<TypeArg>,
    service: Option<TypeInfo>,
    activator: Option<Activator>,
    implies: Vec<Capability>,
}

impl Capability {
    /// 标记能力，本身不能作为服务注册
    pub fn marker(contract: ContractDescriptor, arguments: Vec<TypeArg>) -> Self {
        Self {
            contract,
            arguments,
            service: None,
            activator: None,
            implies: Vec::new(),
        }
    }

    /// 可注册的能力：实现类型 `T` 通过 `upcast` 提供服务 `S`
    pub fn specialized<T, S>(
        contract: ContractDescriptor,
        arguments: Vec<TypeArg>,
        upcast: fn(Arc<T>) -> Arc<S>,
    ) -> Self
    where
        T: Send + Sync + 'static,
        S: ?Sized + Send + Sync + 'static,
    {
        let implementation = TypeInfo::of::<T>();
        let activator: Activator = Arc::new(move |instance: Instance| {
            let concrete = downcast_service::<T>(&instance, implementation.short_name())?;
            Ok(Arc::new(upcast(concrete)) as Instance)
        });

        Self {
            contract,
            arguments,
            service: Some(TypeInfo::of::<S>()),
            activator: Some(activator),
            implies: Vec::new(),
        }
    }

    /// 添加隐含能力
    pub fn implying(mut self, capability: Capability) -> Self {
        self.implies.push(capability);
        self
    }

    /// 契约
    pub fn contract(&self) -> &ContractDescriptor {
        &self.contract
    }

    /// 类型实参
    pub fn arguments(&self) -> &[TypeArg] {
        &self.arguments
    }

    /// 服务类型
    pub fn service(&self) -> Option<&TypeInfo> {
        self.service.as_ref()
    }

    /// 激活器
    pub fn activator(&self) -> Option<&Activator> {
        self.activator.as_ref()
    }

    /// 直接隐含的能力
    pub fn implies(&self) -> &[Capability] {
        &self.implies
    }

    /// 是否为指定契约的特化
    pub fn is_specialization_of(&self, contract: &ContractDescriptor) -> bool {
        self.contract == *contract && self.arguments.len() == contract.arity()
    }

    /// 所有实参都已绑定时返回具体类型列表
    pub fn bound_arguments(&self) -> Option<Vec<TypeInfo>> {
        self.arguments
            .iter()
            .map(|arg| arg.as_bound().cloned())
            .collect()
    }

    /// 深度优先遍历自身及全部隐含能力
    pub fn closure(&self) -> Vec<&Capability> {
        let mut visited = Vec::new();
        let mut stack = vec![self];
        while let Some(capability) = stack.pop() {
            visited.push(capability);
            stack.extend(capability.implies.iter().rev());
        }
        visited
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capability")
            .field("contract", &self.contract)
            .field("arguments", &self.arguments)
            .field("service", &self.service.as_ref().map(|s| &s.name))
            .field("activator", &self.activator.as_ref().map(|_| "<function>"))
            .field("implies", &self.implies)
            .finish()
    }
}

/// 类型种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// 可实例化的具体类型
    Concrete,
    /// 抽象类型（只作为其他类型的基础）
    Abstract,
    /// 接口（trait object）
    Interface,
    /// 仍带有未绑定类型参数的泛型定义
    OpenGeneric,
}

/// 类型描述符
#[derive(Clone)]
pub struct TypeDescriptor {
    type_info: TypeInfo,
    kind: TypeKind,
    constructor: Option<ServiceFactory>,
    capabilities: Vec<Capability>,
}

impl TypeDescriptor {
    /// 具体类型，使用给定构造函数
    pub fn concrete<T, F>(constructor: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&dyn ServiceResolver) -> Result<T, DependencyError> + Send + Sync + 'static,
    {
        Self {
            type_info: TypeInfo::of::<T>(),
            kind: TypeKind::Concrete,
            constructor: Some(constructor_for(constructor)),
            capabilities: Vec::new(),
        }
    }

    /// 具体类型，使用 `Default` 构造
    pub fn from_default<T>() -> Self
    where
        T: Default + Send + Sync + 'static,
    {
        Self::concrete::<T, _>(|_| Ok(T::default()))
    }

    /// 抽象类型
    pub fn abstract_type<T: ?Sized + 'static>() -> Self {
        Self::without_constructor(TypeInfo::of::<T>(), TypeKind::Abstract)
    }

    /// 接口类型
    pub fn interface<T: ?Sized + 'static>() -> Self {
        Self::without_constructor(TypeInfo::of::<T>(), TypeKind::Interface)
    }

    /// 开放泛型定义，`T` 为该定义的任意一个实例化，仅用于标识
    pub fn open_generic<T: ?Sized + 'static>() -> Self {
        Self::without_constructor(TypeInfo::of::<T>(), TypeKind::OpenGeneric)
    }

    fn without_constructor(type_info: TypeInfo, kind: TypeKind) -> Self {
        Self {
            type_info,
            kind,
            constructor: None,
            capabilities: Vec::new(),
        }
    }

    /// 声明实现的能力
    pub fn implements(mut self, capability: Capability) -> Self {
        self.capabilities.push(capability);
        self
    }

    /// 类型信息
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// 类型种类
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// 构造函数
    pub fn constructor(&self) -> Option<&ServiceFactory> {
        self.constructor.as_ref()
    }

    /// 直接声明的能力
    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    /// 是否为可构造的具体类型
    pub fn is_constructible(&self) -> bool {
        self.kind == TypeKind::Concrete && self.constructor.is_some()
    }

    /// 直接和传递实现的全部能力，按声明顺序深度优先
    pub fn capability_closure(&self) -> Vec<&Capability> {
        self.capabilities
            .iter()
            .flat_map(Capability::closure)
            .collect()
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type", &self.type_info.name)
            .field("kind", &self.kind)
            .field("constructor", &self.constructor.as_ref().map(|_| "<function>"))
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

/// 可自我描述的类型
///
/// 通常由 `#[derive(Describe)]` 生成。
pub trait Describe {
    /// 返回类型描述符
    fn describe() -> TypeDescriptor;
}
