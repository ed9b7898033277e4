//! 全局类型目录
//!
//! `#[derive(Bean)]` 生成的 `ctor` 函数在 `main` 之前把类型描述符登记到这里，
//! 组件扫描与声明式加载都从这里读取。

use crate::metadata::TypeDescriptor;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

static TYPE_CATALOG: Lazy<RwLock<Vec<Arc<TypeDescriptor>>>> = Lazy::new(|| RwLock::new(Vec::new()));

/// 登记类型描述符
///
/// 同名类型重复登记时保留后者
pub fn register_type(descriptor: TypeDescriptor) {
    let mut catalog = TYPE_CATALOG.write();
    catalog.retain(|existing| existing.type_name != descriptor.type_name);
    catalog.push(Arc::new(descriptor));
}

/// 所有已登记的类型，按类型名排序
pub fn registered_types() -> Vec<Arc<TypeDescriptor>> {
    let mut types = TYPE_CATALOG.read().clone();
    types.sort_by(|a, b| a.type_name.cmp(b.type_name));
    types
}

/// 按全限定名查找已登记的类型
pub fn find_type(type_name: &str) -> Option<Arc<TypeDescriptor>> {
    TYPE_CATALOG
        .read()
        .iter()
        .find(|descriptor| descriptor.type_name == type_name)
        .cloned()
}

/// 模块路径是否位于扫描根之下
///
/// 空的扫描根匹配所有模块
pub fn module_in_root(module_path: &str, root: &str) -> bool {
    root.is_empty()
        || module_path == root
        || module_path
            .strip_prefix(root)
            .is_some_and(|rest| rest.starts_with("::"))
}
