//! bean 容器抽象接口
//!
//! 提供 bean 查找入口和容器设置

use crate::registry::CollisionPolicy;
use infrastructure_common::{
    capability_name, BeanHandle, DependencyError, DependencyResult, TransactionErrorPolicy,
    TransactionManager,
};
use serde::Deserialize;
use std::any::TypeId;
use std::sync::Arc;

/// 容器设置
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContainerSettings {
    /// 组件扫描根（模块路径）
    pub scan_root: Option<String>,
    /// id 冲突处理策略
    pub on_collision: CollisionPolicy,
    /// 事务内调用失败时的处理策略
    pub on_transaction_error: TransactionErrorPolicy,
}

/// 对外提供的 bean
///
/// 带事务标记的 bean 在转换为能力集时被包裹事务代理
#[derive(Debug, Clone)]
pub struct ServedBean {
    handle: BeanHandle,
    transactions: Option<TransactionManager>,
}

impl ServedBean {
    /// 创建对外提供的 bean
    pub fn new(handle: BeanHandle, transactions: Option<TransactionManager>) -> Self {
        Self {
            handle,
            transactions,
        }
    }

    /// bean id
    pub fn id(&self) -> &str {
        self.handle.id()
    }

    /// 底层 bean 引用
    pub fn handle(&self) -> &BeanHandle {
        &self.handle
    }

    /// 是否经由事务代理提供
    pub fn is_proxied(&self) -> bool {
        self.handle.instance().is_transactional()
    }

    /// 以指定能力集取出 bean
    ///
    /// 事务 bean 只能以其能力集（trait 对象）取出
    pub fn capability<T: ?Sized + 'static>(&self) -> DependencyResult<Arc<T>> {
        let instance = Arc::clone(self.handle.instance());
        let upcast = if instance.is_transactional() {
            let transactions =
                self.transactions
                    .as_ref()
                    .ok_or_else(|| DependencyError::TransactionManagerMissing {
                        id: self.id().to_string(),
                    })?;
            instance.upcast_transactional(TypeId::of::<T>(), transactions)
        } else {
            instance.upcast(TypeId::of::<T>())
        };

        upcast
            .and_then(|boxed| boxed.downcast::<Arc<T>>().ok())
            .map(|boxed| *boxed)
            .ok_or_else(|| DependencyError::CapabilityMismatch {
                id: self.id().to_string(),
                type_name: self.handle.type_name().to_string(),
                capability: capability_name::<T>(),
            })
    }
}

/// bean 查找 trait
pub trait BeanProvider: Send + Sync {
    /// 按 id 查找 bean，id 不存在时返回错误
    fn get_bean(&self, id: &str) -> DependencyResult<ServedBean>;

    /// 是否包含 id
    fn contains_bean(&self, id: &str) -> bool;

    /// 所有 bean id
    fn bean_ids(&self) -> Vec<String>;

    /// 按 id 查找 bean 并转换为指定能力集
    fn get<T: ?Sized + 'static>(&self, id: &str) -> DependencyResult<Arc<T>>
    where
        Self: Sized,
    {
        self.get_bean(id)?.capability::<T>()
    }
}
