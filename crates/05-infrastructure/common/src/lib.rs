//! # Infrastructure Common
//!
//! 这个 crate 提供了 bean 容器的公共契约和工具。
//!
//! ## 核心组件
//!
//! - [`Bean`] - 托管组件 trait
//! - [`Autowired`] - 只写一次的依赖槽
//! - [`TypeDescriptor`] - 类型发现源提供的类型描述
//! - [`NamingConventions`] - bean id 推导约定
//! - [`TransactionManager`] / [`TransactionalProxy`] - 线程绑定连接上的事务边界
//!
//! ## 设计原则
//!
//! - 注册表驱动，不依赖运行时反射
//! - 约定优于配置
//! - 初始化完成后只读

pub mod component;
pub mod conventions;
pub mod discovery;
pub mod errors;
pub mod metadata;
pub mod transaction;

pub use component::*;
pub use conventions::*;
pub use discovery::*;
pub use errors::*;
pub use metadata::*;
pub use transaction::*;

/// 宏生成代码使用的依赖，不属于公开 API
#[doc(hidden)]
pub mod __private {
    pub use ctor;
}
