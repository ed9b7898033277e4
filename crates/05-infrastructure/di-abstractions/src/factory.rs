//! 类型解析抽象接口
//!
//! 把声明式配置里的类型名称解析为可构造的类型

use crate::definition::TypeReference;
use infrastructure_common::TypeDescriptor;
use std::sync::Arc;

/// 类型解析 trait
pub trait TypeResolver: Send + Sync {
    /// 解析类型引用
    fn resolve(&self, type_ref: &TypeReference) -> Option<Arc<TypeDescriptor>>;
}
