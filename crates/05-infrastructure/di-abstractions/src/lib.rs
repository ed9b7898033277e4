//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义 bean 注册、类型发现和查找的核心接口。
//!
//! ## 核心接口
//!
//! - [`BeanRegistry`] - bean 注册表接口
//! - [`BeanDefinitionSource`] - 声明式配置源接口
//! - [`TypeDiscovery`] - 类型发现接口
//! - [`TypeResolver`] - 类型名称解析接口
//! - [`BeanProvider`] - bean 查找接口

pub mod container;
pub mod definition;
pub mod discovery;
pub mod factory;
pub mod registry;
pub mod scanner;

pub use container::*;
pub use definition::*;
pub use discovery::*;
pub use factory::*;
pub use registry::*;
pub use scanner::*;
