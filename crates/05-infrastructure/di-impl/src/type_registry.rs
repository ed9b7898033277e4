//! 类型注册表
//!
//! 类型名称到构造函数的登记表，代替按名称反射实例化

use di_abstractions::{TypeReference, TypeResolver};
use infrastructure_common::{registered_types, DependencyError, DependencyResult, TypeDescriptor};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// 类型注册表
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, Arc<TypeDescriptor>>,
}

impl TypeRegistry {
    /// 创建空的类型注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 从全局类型目录创建，包含所有 `#[derive(Bean)]` 类型及其别名
    pub fn from_catalog() -> Self {
        let mut registry = Self::new();
        for descriptor in registered_types() {
            registry.insert(descriptor);
        }
        debug!("从类型目录载入 {} 个类型名称", registry.types.len());
        registry
    }

    /// 手工登记类型
    pub fn register(&mut self, descriptor: TypeDescriptor) -> &mut Self {
        self.insert(Arc::new(descriptor));
        self
    }

    /// 为已登记类型添加别名
    pub fn register_alias(
        &mut self,
        alias: impl Into<String>,
        type_name: &str,
    ) -> DependencyResult<&mut Self> {
        let alias = alias.into();
        let descriptor = self
            .types
            .get(type_name)
            .cloned()
            .ok_or_else(|| DependencyError::UnknownType {
                id: alias.clone(),
                type_name: type_name.to_string(),
            })?;
        self.types.insert(alias, descriptor);
        Ok(self)
    }

    /// 已登记的名称数量（含别名）
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn insert(&mut self, descriptor: Arc<TypeDescriptor>) {
        for alias in &descriptor.aliases {
            self.types.insert((*alias).to_string(), Arc::clone(&descriptor));
        }
        self.types
            .insert(descriptor.type_name.to_string(), descriptor);
    }
}

impl TypeResolver for TypeRegistry {
    fn resolve(&self, type_ref: &TypeReference) -> Option<Arc<TypeDescriptor>> {
        self.types
            .get(type_ref.as_str())
            .or_else(|| self.types.get(&type_ref.to_rust_path()))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ledger_descriptor, Ledger};

    #[test]
    fn test_resolve_by_type_name_and_dotted_path() {
        let mut registry = TypeRegistry::new();
        registry.register(ledger_descriptor("fixtures"));

        let by_path = registry.resolve(&TypeReference::new(Ledger::TYPE_NAME)).unwrap();
        assert_eq!(by_path.type_name, Ledger::TYPE_NAME);

        let dotted = Ledger::TYPE_NAME.replace("::", ".");
        assert!(registry.resolve(&TypeReference::new(dotted)).is_some());
        assert!(registry.resolve(&TypeReference::new("nope::Missing")).is_none());
    }

    #[test]
    fn test_alias() {
        let mut registry = TypeRegistry::new();
        registry.register(ledger_descriptor("fixtures"));
        registry
            .register_alias("com.example.JdbcLedger", Ledger::TYPE_NAME)
            .unwrap();

        assert!(registry
            .resolve(&TypeReference::new("com.example.JdbcLedger"))
            .is_some());
        assert!(registry.register_alias("x", "nope::Missing").is_err());
    }

    #[test]
    fn test_descriptor_aliases_are_indexed() {
        let mut registry = TypeRegistry::new();
        registry.register(ledger_descriptor("fixtures").with_alias("legacy.Ledger"));
        assert!(registry.resolve(&TypeReference::new("legacy.Ledger")).is_some());
        assert_eq!(registry.len(), 2);
    }
}
