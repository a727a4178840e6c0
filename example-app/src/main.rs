//! # 示例应用程序
//!
//! 演示如何扫描命令处理器、注册事件溯源服务并分发命令。

mod ledger;

use clap::Parser;
use di_abstractions::{ResolverExt, ServiceRegistry, TypeModule};
use di_impl::ServiceCollection;
use event_sourcing::{CommandDispatcher, EventPublisher};
use event_sourcing_composition::{
    init_logging, EventSourcingOptions, EventSourcingRegistryExt, LoggingConfig,
};
use std::path::PathBuf;
use tracing::{info, warn, Level};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "事件溯源绑定示例应用")]
struct Args {
    /// 配置文件路径
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 强制启用处理器扫描
    #[arg(long)]
    scan: bool,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: Level,

    /// 输出 JSON 日志
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut logging = LoggingConfig::with_level(args.log_level);
    logging.json_format = args.json_logs;
    init_logging(&logging)?;

    let mut options = EventSourcingOptions::load(args.config.as_deref())?;
    if args.scan {
        options.scan_for_handlers = true;
    }
    info!("启动示例应用: {:?}", options);

    let ledger = ledger::module();
    let modules: [&dyn TypeModule; 1] = [&ledger];

    let mut services = ServiceCollection::new();
    let summary = services.add_event_sourcing(&options, &modules)?;
    for module in &summary.skipped_modules {
        warn!("跳过模块 {}: {}", module.name, module.reason);
    }

    println!("已注册 {} 个服务:", services.len());
    for descriptor in services.descriptors() {
        println!(
            "  {} -> {} ({})",
            descriptor.key(),
            descriptor.implementation(),
            descriptor.lifetime()
        );
    }

    if summary.handler_bindings == 0 {
        println!("未注册任何命令处理器，使用 --scan 或配置 scan_for_handlers = true 启用扫描");
        return Ok(());
    }

    let provider = services.build_provider();
    let publisher = provider.resolve::<EventPublisher>()?;
    let mut events = publisher.subscribe();
    let dispatcher = provider.resolve::<CommandDispatcher>()?;

    dispatcher
        .dispatch(
            &provider,
            ledger::OpenAccount {
                owner: "alice".to_string(),
            },
        )
        .await?;
    dispatcher
        .dispatch(
            &provider,
            ledger::Deposit {
                owner: "alice".to_string(),
                amount: 120,
            },
        )
        .await?;
    if let Err(e) = dispatcher
        .dispatch(
            &provider,
            ledger::Deposit {
                owner: "alice".to_string(),
                amount: 0,
            },
        )
        .await
    {
        warn!("命令被拒绝: {}", e);
    }
    dispatcher
        .dispatch(
            &provider,
            ledger::CloseAccount {
                owner: "alice".to_string(),
            },
        )
        .await?;

    while let Ok(event) = events.try_recv() {
        println!("[{}] {:?}", event.event_type(), event);
    }

    info!("示例应用结束，共发布 {} 个事件", publisher.published_count());
    Ok(())
}
