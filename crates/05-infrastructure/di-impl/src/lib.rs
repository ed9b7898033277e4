//! # 依赖注入具体实现
//!
//! 提供 bean 容器的各个阶段：
//!
//! - [`RegistryStore`] - 注册表存储与 id 冲突处理
//! - [`TypeRegistry`] - 声明式配置使用的类型名称登记表
//! - [`DeclarativeLoader`] - 按声明实例化 bean 并设置属性
//! - [`ComponentScanner`] - 扫描带组件标记的类型
//! - [`WiringEngine`] - 向带注入标记的字段写入依赖
//! - [`BeanFactory`] - 初始化完成后的查找入口
//!
//! 初始化顺序固定为 加载 → 扫描 → 装配，由组合层负责编排。

pub mod loader;
pub mod lookup;
pub mod registry;
pub mod scanner;
pub mod type_registry;
pub mod wiring;

#[cfg(test)]
mod test_support;

pub use loader::{DeclarativeLoader, LoadReport};
pub use lookup::{BeanDescription, BeanFactory};
pub use registry::RegistryStore;
pub use scanner::{CatalogDiscovery, ComponentScanner, ScanReport, SkippedType};
pub use type_registry::TypeRegistry;
pub use wiring::WiringEngine;
