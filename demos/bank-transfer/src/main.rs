//! # 银行转账示例
//!
//! 演示声明式配置、组件扫描和事务代理：转账服务经由事务代理调用，
//! 失败时账本回滚到转账前的状态

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use di_abstractions::BeanProvider;
use infrastructure_common::{ThreadBoundConnectionProvider, TransactionErrorPolicy};
use infrastructure_composition::{ApplicationContext, LoggingConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

mod account;
mod dao;
mod errors;
mod ledger;
mod service;

use crate::dao::AccountDao;
use crate::ledger::{shared_ledger, LedgerConnection};
use crate::service::TransferService;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "bank-transfer-demo")]
#[command(about = "Lorn Beans 银行转账示例")]
struct Args {
    /// bean 声明文件路径
    #[arg(short, long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/beans.toml"))]
    config: PathBuf,

    /// 使用组件扫描代替声明文件
    #[arg(long)]
    scan: bool,

    /// 转账失败时的事务处理
    #[arg(long, value_enum)]
    on_error: Option<OnError>,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 转账
    Transfer {
        /// 转出卡号
        #[arg(long)]
        from: String,
        /// 转入卡号
        #[arg(long)]
        to: String,
        /// 金额
        #[arg(long)]
        amount: i64,
    },
    /// 查看账户余额
    Accounts,
    /// 列出容器中的 bean
    Beans,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OnError {
    Rollback,
    LeaveOpen,
}

impl From<OnError> for TransactionErrorPolicy {
    fn from(value: OnError) -> Self {
        match value {
            OnError::Rollback => Self::Rollback,
            OnError::LeaveOpen => Self::LeaveOpen,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let logging = LoggingConfig {
        level: parse_log_level(&args.log_level),
        ..LoggingConfig::default()
    };
    let context = build_context(&args, Some(logging))?;

    match &args.command {
        Command::Transfer { from, to, amount } => {
            let service = context
                .get::<dyn TransferService>("transferService")
                .context("获取转账服务失败")?;
            if let Err(e) = service.transfer(from, to, *amount) {
                error!("转账失败: {}", e);
            }
            print_accounts(&context)?;
        }
        Command::Accounts => print_accounts(&context)?,
        Command::Beans => {
            for id in context.bean_ids() {
                if let Some(description) = context.describe(&id) {
                    println!(
                        "{:<16} {:<48} {:<12} transactional={}",
                        description.id,
                        description.type_name,
                        description.origin,
                        description.transactional
                    );
                }
            }
        }
    }

    Ok(())
}

/// 构建应用上下文
fn build_context(args: &Args, logging: Option<LoggingConfig>) -> anyhow::Result<ApplicationContext> {
    let mut builder = ApplicationContext::builder().with_connection_provider(Arc::new(
        ThreadBoundConnectionProvider::new(|| Ok(LedgerConnection::new(shared_ledger()))),
    ));
    if let Some(logging) = logging {
        builder = builder.with_logging(logging);
    }

    builder = if args.scan {
        builder.scan(module_path!())
    } else {
        builder
            .add_definitions_file(&args.config)
            .with_context(|| format!("无法读取 bean 声明文件 {}", args.config.display()))?
    };
    if let Some(on_error) = args.on_error {
        builder = builder.on_transaction_error(on_error.into());
    }

    let context = builder.build().context("应用上下文初始化失败")?;
    info!("初始化完成: {:?}", context.report());
    Ok(context)
}

fn print_accounts(context: &ApplicationContext) -> anyhow::Result<()> {
    let dao = context.get::<dyn AccountDao>("accountDao")?;
    for card_no in shared_ledger().accounts().iter().map(|a| a.card_no.clone()) {
        println!("{}", dao.query_account_by_card_no(&card_no)?);
    }
    Ok(())
}

/// 解析日志级别
fn parse_log_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
