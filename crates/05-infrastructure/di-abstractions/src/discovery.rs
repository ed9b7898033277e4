//! 类型发现抽象接口
//!
//! 给定扫描根，返回带组件标记的类型及其字段、能力集信息

use crate::scanner::ScanRoot;
use infrastructure_common::TypeDescriptor;
use std::sync::Arc;

/// 类型发现 trait
pub trait TypeDiscovery: Send + Sync {
    /// 发现扫描根之下所有带组件标记的类型
    fn discover(&self, root: &ScanRoot) -> Vec<Arc<TypeDescriptor>>;

    /// 发现器名称
    fn name(&self) -> &str;
}
