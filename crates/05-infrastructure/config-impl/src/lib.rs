//! # Configuration Implementation
//!
//! bean 声明配置的具体实现。
//!
//! ## 主要组件
//!
//! - [`FileBeanDefinitionSource`] - TOML / JSON / YAML 文件配置源
//! - [`InMemoryBeanDefinitionSource`] - 代码声明的配置源
//! - [`BeanDocument`] - 三种格式共用的文档结构

pub mod document;
pub mod providers;

pub use document::*;
pub use providers::*;
