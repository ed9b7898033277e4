//! bean 查找入口

use crate::registry::RegistryStore;
use di_abstractions::{BeanOrigin, BeanProvider, BeanRegistry, ServedBean};
use infrastructure_common::{DependencyError, DependencyResult, TransactionManager};
use std::sync::Arc;
use tracing::warn;

/// bean 的描述信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeanDescription {
    /// bean id
    pub id: String,
    /// 实例类型名
    pub type_name: String,
    /// 来源
    pub origin: BeanOrigin,
    /// 是否经由事务代理提供
    pub transactional: bool,
    /// 组件标记携带的附加元数据
    pub meta_data: Option<String>,
}

/// bean 工厂
///
/// 持有初始化完成后冻结的注册表，可在线程间共享
#[derive(Clone)]
pub struct BeanFactory {
    registry: Arc<RegistryStore>,
    transactions: Option<TransactionManager>,
}

impl BeanFactory {
    /// 创建 bean 工厂
    pub fn new(registry: RegistryStore, transactions: Option<TransactionManager>) -> Self {
        Self {
            registry: Arc::new(registry),
            transactions,
        }
    }

    /// 描述指定 bean
    pub fn describe(&self, id: &str) -> Option<BeanDescription> {
        self.registry.entry(id).map(|entry| BeanDescription {
            id: entry.id().to_string(),
            type_name: entry.handle.type_name().to_string(),
            origin: entry.origin,
            transactional: entry.handle.instance().is_transactional(),
            meta_data: entry.meta_data.clone(),
        })
    }

    /// bean 是否经由事务代理提供
    pub fn is_transactional(&self, id: &str) -> bool {
        self.registry
            .get(id)
            .is_some_and(|handle| handle.instance().is_transactional())
    }

    /// bean 数量
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

impl BeanProvider for BeanFactory {
    fn get_bean(&self, id: &str) -> DependencyResult<ServedBean> {
        match self.registry.get(id) {
            Some(handle) => Ok(ServedBean::new(handle, self.transactions.clone())),
            None => {
                warn!("查找的 bean 不存在: {}", id);
                Err(DependencyError::BeanNotFound { id: id.to_string() })
            }
        }
    }

    fn contains_bean(&self, id: &str) -> bool {
        self.registry.contains(id)
    }

    fn bean_ids(&self) -> Vec<String> {
        self.registry.ids()
    }
}

impl std::fmt::Debug for BeanFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BeanFactory")
            .field("beans", &self.registry.len())
            .field("transactions", &self.transactions.is_some())
            .finish()
    }
}
