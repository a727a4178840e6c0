//! 注册表扩展：事件溯源启动入口

use crate::binder::{FixedServices, HandlerBinder};
use crate::options::EventSourcingOptions;
use crate::type_scanner::GenericContractScanner;
use di_abstractions::{ServiceRegistry, SkippedModule, TypeModule, TypeScanner};
use event_sourcing::command_handler_contract;
use infrastructure_common::{InfrastructureError, Lifetime};
use tracing::{debug, info, warn};

/// 启动结果摘要
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupSummary {
    /// 固定服务注册数量
    pub fixed_bindings: usize,
    /// 命令处理器注册数量
    pub handler_bindings: usize,
    pub scanned_modules: Vec<String>,
    pub skipped_modules: Vec<SkippedModule>,
}

impl SetupSummary {
    /// 新增注册总数
    pub fn total(&self) -> usize {
        self.fixed_bindings + self.handler_bindings
    }
}

/// 事件溯源注册扩展
///
/// 对任意 [`ServiceRegistry`] 可用，调用方显式给出要扫描的模块。
pub trait EventSourcingRegistryExt: ServiceRegistry {
    /// 注册事件溯源服务
    ///
    /// 总是注册三个固定服务；`scan_for_handlers` 为真时再扫描模块并注册全部命令处理器。
    fn add_event_sourcing(
        &mut self,
        options: &EventSourcingOptions,
        modules: &[&dyn TypeModule],
    ) -> Result<SetupSummary, InfrastructureError> {
        info!("注册事件溯源服务，处理器扫描: {}", options.scan_for_handlers);

        let fixed_bindings = FixedServices::from_options(options).bind(&mut *self)?;
        let mut summary = if options.scan_for_handlers {
            self.scan_for_command_handlers(modules, options.handler_lifetime)?
        } else {
            SetupSummary::default()
        };
        summary.fixed_bindings = fixed_bindings;

        info!(
            "事件溯源服务注册完成: {} 个固定服务，{} 个命令处理器",
            summary.fixed_bindings, summary.handler_bindings
        );
        Ok(summary)
    }

    /// 扫描模块并注册全部命令处理器
    fn scan_for_command_handlers(
        &mut self,
        modules: &[&dyn TypeModule],
        lifetime: Lifetime,
    ) -> Result<SetupSummary, InfrastructureError> {
        if modules.is_empty() {
            warn!("启用了处理器扫描但没有提供任何模块");
        }

        let scanner = GenericContractScanner::new();
        debug!("使用扫描器 {} 查找命令处理器", scanner.name());
        let report = scanner.scan(modules, &command_handler_contract());
        let handler_bindings = HandlerBinder::new(lifetime).bind(&report.matches, self)?;

        Ok(SetupSummary {
            fixed_bindings: 0,
            handler_bindings,
            scanned_modules: report.scanned_modules,
            skipped_modules: report.skipped_modules,
        })
    }
}

impl<R: ServiceRegistry + ?Sized> EventSourcingRegistryExt for R {}
