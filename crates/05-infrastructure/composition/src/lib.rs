//! # 基础设施组合层
//!
//! 这个 crate 把声明式配置、组件扫描、依赖装配和事务代理组合成一个
//! 完整的初始化入口。
//!
//! ## 主要功能
//!
//! - **应用上下文构建器**: 收集配置源、扫描根和连接提供者
//! - **初始化编排**: 按 加载 → 扫描 → 装配 的顺序同步执行
//! - **日志初始化**: 按需初始化 `tracing-subscriber`
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use di_abstractions::BeanProvider;
//! use infrastructure_composition::{ApplicationContext, LoggingConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let context = ApplicationContext::builder()
//!         .add_definitions_file("beans.toml")?
//!         .scan("bank_transfer_demo")
//!         .with_logging(LoggingConfig::development())
//!         .build()?;
//!
//!     for id in context.bean_ids() {
//!         println!("{}", id);
//!     }
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;

// 重新导出主要类型
pub use builder::{ApplicationContextBuilder, LoggingConfig};
pub use context::{ApplicationContext, BootstrapReport};

// 重新导出错误类型
pub use infrastructure_common::InfrastructureError;
