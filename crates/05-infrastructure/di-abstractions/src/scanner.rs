//! 类型扫描器抽象接口
//!
//! 扫描输入是调用方显式给出的模块列表，不依赖任何进程级全局枚举。

use crate::discovery::{Activator, ContractDescriptor, Describe, TypeDescriptor};
use crate::factory::ServiceFactory;
use crate::registry::ServiceKey;
use infrastructure_common::{ComponentError, TypeInfo};
use std::fmt;
use std::hash::{Hash, Hasher};

/// 可被扫描的类型模块
pub trait TypeModule: Send + Sync {
    /// 模块名称
    fn name(&self) -> &str;

    /// 枚举模块中声明的全部类型
    fn types(&self) -> Result<Vec<TypeDescriptor>, ComponentError>;
}

/// 静态类型模块，类型列表在编译时确定
#[derive(Debug, Clone)]
pub struct StaticModule {
    name: String,
    types: Vec<TypeDescriptor>,
}

impl StaticModule {
    /// 创建空模块
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
        }
    }

    /// 添加类型描述符
    pub fn with_type(mut self, descriptor: TypeDescriptor) -> Self {
        self.types.push(descriptor);
        self
    }

    /// 添加可自我描述的类型
    pub fn with_described<T: Describe>(self) -> Self {
        self.with_type(T::describe())
    }
}

impl TypeModule for StaticModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn types(&self) -> Result<Vec<TypeDescriptor>, ComponentError> {
        Ok(self.types.clone())
    }
}

/// 契约特化：契约绑定到具体类型实参
///
/// 相等性只看契约和实参。
#[derive(Clone)]
pub struct Specialization {
    contract: ContractDescriptor,
    arguments: Vec<TypeInfo>,
    service: TypeInfo,
    activator: Activator,
}

impl Specialization {
    /// 创建契约特化
    pub fn new(
        contract: ContractDescriptor,
        arguments: Vec<TypeInfo>,
        service: TypeInfo,
        activator: Activator,
    ) -> Self {
        Self {
            contract,
            arguments,
            service,
            activator,
        }
    }

    /// 契约
    pub fn contract(&self) -> &ContractDescriptor {
        &self.contract
    }

    /// 全部类型实参
    pub fn arguments(&self) -> &[TypeInfo] {
        &self.arguments
    }

    /// 负载类型（第一个类型实参）
    pub fn payload(&self) -> Option<&TypeInfo> {
        self.arguments.first()
    }

    /// 特化后的服务类型
    pub fn service(&self) -> &TypeInfo {
        &self.service
    }

    /// 注册使用的服务键
    pub fn service_key(&self) -> ServiceKey {
        ServiceKey::from_type_info(self.service.clone())
    }

    /// 激活器
    pub fn activator(&self) -> &Activator {
        &self.activator
    }
}

impl PartialEq for Specialization {
    fn eq(&self, other: &Self) -> bool {
        self.contract == other.contract && self.arguments == other.arguments
    }
}

impl Eq for Specialization {}

impl Hash for Specialization {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.contract.hash(state);
        self.arguments.hash(state);
    }
}

impl fmt::Display for Specialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arguments: Vec<&str> = self.arguments.iter().map(TypeInfo::short_name).collect();
        write!(f, "{}<{}>", self.contract.name(), arguments.join(", "))
    }
}

impl fmt::Debug for Specialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Specialization")
            .field("contract", &self.contract)
            .field("arguments", &self.arguments)
            .field("service", &self.service.name)
            .finish()
    }
}

/// 扫描得到的候选类型
#[derive(Clone)]
pub struct CandidateType {
    type_info: TypeInfo,
    module: String,
    constructor: ServiceFactory,
}

impl CandidateType {
    /// 创建候选类型
    pub fn new(type_info: TypeInfo, module: impl Into<String>, constructor: ServiceFactory) -> Self {
        Self {
            type_info,
            module: module.into(),
            constructor,
        }
    }

    /// 类型信息
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// 所在模块
    pub fn module(&self) -> &str {
        &self.module
    }

    /// 构造函数
    pub fn constructor(&self) -> &ServiceFactory {
        &self.constructor
    }
}

impl PartialEq for CandidateType {
    fn eq(&self, other: &Self) -> bool {
        self.type_info == other.type_info
    }
}

impl Eq for CandidateType {}

impl Hash for CandidateType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_info.hash(state);
    }
}

impl fmt::Debug for CandidateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateType")
            .field("type", &self.type_info.name)
            .field("module", &self.module)
            .finish()
    }
}

/// 一条扫描结果：（契约特化, 候选类型）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScanMatch {
    pub specialization: Specialization,
    pub candidate: CandidateType,
}

/// 无法扫描而被跳过的模块
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedModule {
    pub name: String,
    pub reason: String,
}

/// 扫描报告
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// 去重后的扫描结果，按模块、类型、能力的声明顺序排列
    pub matches: Vec<ScanMatch>,
    /// 成功扫描的模块
    pub scanned_modules: Vec<String>,
    /// 被跳过的模块
    pub skipped_modules: Vec<SkippedModule>,
}

impl ScanReport {
    /// 结果数量
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// 是否没有任何结果
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// 提供了模块但没有一个能够扫描
    pub fn all_modules_failed(&self) -> bool {
        self.scanned_modules.is_empty() && !self.skipped_modules.is_empty()
    }
}

/// 类型扫描器 trait
pub trait TypeScanner: Send + Sync {
    /// 扫描模块，返回实现了指定契约的全部（特化, 候选类型）
    fn scan(&self, modules: &[&dyn TypeModule], contract: &ContractDescriptor) -> ScanReport;

    /// 获取扫描器名称
    fn name(&self) -> &str;
}
