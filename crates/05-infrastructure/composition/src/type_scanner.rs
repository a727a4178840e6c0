//! 泛型契约扫描
//!
//! 在调用方给出的模块中查找实现了指定泛型契约的具体类型，
//! 为每个（契约特化, 实现类型）产生一条结果。

use di_abstractions::{
    CandidateType, Capability, ContractDescriptor, ScanMatch, ScanReport, SkippedModule,
    Specialization, TypeDescriptor, TypeModule, TypeScanner,
};
use infrastructure_common::TypeInfo;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 泛型契约扫描器
///
/// 纯函数式扫描：同样的模块和契约总是得到同样顺序的结果。
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericContractScanner;

impl GenericContractScanner {
    /// 创建扫描器
    pub fn new() -> Self {
        Self
    }

    /// 扫描单个类型，返回其实现的全部契约特化
    pub fn scan_type(
        &self,
        module: &str,
        descriptor: &TypeDescriptor,
        contract: &ContractDescriptor,
    ) -> Vec<ScanMatch> {
        let type_info = descriptor.type_info();
        let constructor = match descriptor.constructor() {
            Some(constructor) if descriptor.is_constructible() => constructor,
            _ => {
                debug!("跳过不可构造的类型: {} ({:?})", type_info, descriptor.kind());
                return Vec::new();
            }
        };

        descriptor
            .capability_closure()
            .into_iter()
            .filter(|capability| capability.is_specialization_of(contract))
            .filter_map(|capability| specialize(type_info, capability))
            .map(|specialization| ScanMatch {
                specialization,
                candidate: CandidateType::new(type_info.clone(), module, Arc::clone(constructor)),
            })
            .collect()
    }
}

/// 将匹配的能力转换为契约特化，开放泛型或缺少激活器时返回 `None`
fn specialize(type_info: &TypeInfo, capability: &Capability) -> Option<Specialization> {
    let Some(arguments) = capability.bound_arguments() else {
        debug!("跳过开放泛型特化: {} 的 {}", type_info, capability.contract());
        return None;
    };

    match (capability.service(), capability.activator()) {
        (Some(service), Some(activator)) => Some(Specialization::new(
            *capability.contract(),
            arguments,
            service.clone(),
            Arc::clone(activator),
        )),
        _ => {
            warn!(
                "{} 声明了 {} 但没有激活器，无法绑定",
                type_info,
                capability.contract()
            );
            None
        }
    }
}

impl TypeScanner for GenericContractScanner {
    fn scan(&self, modules: &[&dyn TypeModule], contract: &ContractDescriptor) -> ScanReport {
        info!("开始扫描 {} 个模块，契约: {}", modules.len(), contract);

        let mut report = ScanReport::default();
        let mut seen: HashSet<(Specialization, TypeInfo)> = HashSet::new();

        for module in modules {
            let types = match module.types() {
                Ok(types) => types,
                Err(e) => {
                    warn!("模块 {} 无法扫描，已跳过: {}", module.name(), e);
                    report.skipped_modules.push(SkippedModule {
                        name: module.name().to_string(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let before = report.matches.len();
            for descriptor in &types {
                for found in self.scan_type(module.name(), descriptor, contract) {
                    let identity = (
                        found.specialization.clone(),
                        found.candidate.type_info().clone(),
                    );
                    if seen.insert(identity) {
                        report.matches.push(found);
                    }
                }
            }

            debug!(
                "模块 {} 扫描完成: {} 个类型，{} 个新绑定",
                module.name(),
                types.len(),
                report.matches.len() - before
            );
            report.scanned_modules.push(module.name().to_string());
        }

        if report.all_modules_failed() {
            warn!("提供的 {} 个模块都无法扫描", report.skipped_modules.len());
        }

        info!(
            "扫描完成，发现 {} 个绑定，跳过 {} 个模块",
            report.matches.len(),
            report.skipped_modules.len()
        );
        report
    }

    fn name(&self) -> &str {
        "GenericContractScanner"
    }
}
