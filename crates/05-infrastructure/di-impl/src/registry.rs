//! bean 注册表实现

use di_abstractions::{BeanRegistry, CollisionPolicy, RegistryEntry};
use infrastructure_common::{BeanHandle, DependencyError, DependencyResult};
use std::collections::HashMap;
use tracing::{debug, error, warn};

/// 注册表存储
///
/// 初始化阶段通过 `&mut self` 写入，之后放入 `Arc` 只读共享
#[derive(Debug, Default)]
pub struct RegistryStore {
    entries: HashMap<String, RegistryEntry>,
    policy: CollisionPolicy,
}

impl RegistryStore {
    /// 创建使用默认冲突策略的注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建使用指定冲突策略的注册表
    pub fn with_policy(policy: CollisionPolicy) -> Self {
        Self {
            entries: HashMap::new(),
            policy,
        }
    }

    /// 冲突策略
    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }
}

impl BeanRegistry for RegistryStore {
    fn put(&mut self, entry: RegistryEntry) -> DependencyResult<()> {
        let Some(existing) = self.entries.get(entry.id()) else {
            debug!(
                "注册 bean: {} ({}, {})",
                entry.id(),
                entry.handle.type_name(),
                entry.origin
            );
            self.entries.insert(entry.id().to_string(), entry);
            return Ok(());
        };

        // 同一实例重新放回，等同于原地修改
        if existing.handle.same_instance(&entry.handle) {
            return Ok(());
        }

        match self.policy {
            CollisionPolicy::Reject => {
                error!(
                    "bean id 冲突: {} ({} 与 {})",
                    entry.id(),
                    existing.handle.type_name(),
                    entry.handle.type_name()
                );
                Err(DependencyError::DuplicateBeanId {
                    id: entry.id().to_string(),
                    existing: format!("{} [{}]", existing.handle.type_name(), existing.origin),
                    incoming: format!("{} [{}]", entry.handle.type_name(), entry.origin),
                })
            }
            CollisionPolicy::Overwrite => {
                warn!(
                    "bean id 冲突，{} 覆盖 {}: {}",
                    entry.handle.type_name(),
                    existing.handle.type_name(),
                    entry.id()
                );
                self.entries.insert(entry.id().to_string(), entry);
                Ok(())
            }
            CollisionPolicy::KeepFirst => {
                warn!(
                    "bean id 冲突，保留 {}，忽略 {}: {}",
                    existing.handle.type_name(),
                    entry.handle.type_name(),
                    entry.id()
                );
                Ok(())
            }
        }
    }

    fn get(&self, id: &str) -> Option<BeanHandle> {
        self.entries.get(id).map(|entry| entry.handle.clone())
    }

    fn entry(&self, id: &str) -> Option<&RegistryEntry> {
        self.entries.get(id)
    }

    fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.entries.keys().cloned().collect();
        ids.sort();
        ids
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
