//! 组件基础接口定义
//!
//! 容器只通过 [`Bean`] trait 与托管实例交互：能力集转换、属性设置和字段注入
//! 都是显式的方法调用，由 `#[derive(Bean)]` 生成，不依赖运行时反射。

use crate::errors::{DependencyError, DependencyResult};
use crate::metadata::capability_name;
use crate::transaction::TransactionManager;
use once_cell::sync::OnceCell;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// 托管组件 trait
///
/// 所有进入注册表的实例都必须实现此 trait
pub trait Bean: Any + Send + Sync {
    /// 实例的全限定类型名
    fn type_name(&self) -> &'static str;

    /// 类型是否带事务标记
    fn is_transactional(&self) -> bool {
        false
    }

    /// 把实例转换为指定能力集
    ///
    /// 返回值是装箱的 `Arc<T>`，`T` 为具体类型本身或其声明的 trait 对象
    fn upcast(self: Arc<Self>, capability: TypeId) -> Option<Box<dyn Any>>;

    /// 把实例转换为指定能力集，并包裹事务代理
    fn upcast_transactional(
        self: Arc<Self>,
        capability: TypeId,
        transactions: &TransactionManager,
    ) -> Option<Box<dyn Any>> {
        let _ = transactions;
        self.upcast(capability)
    }

    /// 是否存在与属性名匹配的 setter
    fn has_property(&self, name: &str) -> bool {
        let _ = name;
        false
    }

    /// 按名称调用 setter，返回是否找到匹配的 setter
    fn set_property(&self, name: &str, value: &BeanHandle) -> DependencyResult<bool> {
        let _ = (name, value);
        Ok(false)
    }

    /// 向带注入标记的字段写入依赖
    fn inject_field(&self, field: &str, value: &BeanHandle) -> DependencyResult<()> {
        let _ = value;
        Err(DependencyError::UnknownField {
            type_name: self.type_name().to_string(),
            field: field.to_string(),
        })
    }
}

/// 注册表中一个 bean 的引用
#[derive(Clone)]
pub struct BeanHandle {
    id: String,
    instance: Arc<dyn Bean>,
}

impl BeanHandle {
    /// 创建新的 bean 引用
    pub fn new(id: impl Into<String>, instance: Arc<dyn Bean>) -> Self {
        Self {
            id: id.into(),
            instance,
        }
    }

    /// bean id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// 底层实例
    pub fn instance(&self) -> &Arc<dyn Bean> {
        &self.instance
    }

    /// 实例类型名
    pub fn type_name(&self) -> &'static str {
        self.instance.type_name()
    }

    /// 以指定能力集取出实例（不经过事务代理）
    pub fn capability<T: ?Sized + 'static>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.instance)
            .upcast(TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast::<Arc<T>>().ok())
            .map(|boxed| *boxed)
    }

    /// 同 [`capability`](Self::capability)，找不到时返回类型不匹配错误
    pub fn require<T: ?Sized + 'static>(&self) -> DependencyResult<Arc<T>> {
        self.capability::<T>()
            .ok_or_else(|| DependencyError::CapabilityMismatch {
                id: self.id.clone(),
                type_name: self.type_name().to_string(),
                capability: capability_name::<T>(),
            })
    }

    /// 两个引用是否指向同一个实例
    pub fn same_instance(&self, other: &Self) -> bool {
        same_instance(&self.instance, &other.instance)
    }
}

impl fmt::Debug for BeanHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanHandle")
            .field("id", &self.id)
            .field("type_name", &self.type_name())
            .finish()
    }
}

/// 比较两个实例的数据指针
pub fn same_instance(a: &Arc<dyn Bean>, b: &Arc<dyn Bean>) -> bool {
    std::ptr::eq(Arc::as_ptr(a).cast::<()>(), Arc::as_ptr(b).cast::<()>())
}

/// 依赖槽
///
/// 带 `#[autowired]` 或 `#[property]` 的字段使用此类型。只能赋值一次，
/// 初始化完成后读取无需加锁。
pub struct Autowired<T: ?Sized> {
    slot: OnceCell<Arc<T>>,
}

impl<T: ?Sized> Default for Autowired<T> {
    fn default() -> Self {
        Self {
            slot: OnceCell::new(),
        }
    }
}

impl<T: ?Sized + 'static> Autowired<T> {
    /// 创建空的依赖槽
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取已注入的依赖
    pub fn get(&self) -> Option<&T> {
        self.slot.get().map(AsRef::as_ref)
    }

    /// 读取已注入依赖的共享引用
    pub fn shared(&self) -> Option<Arc<T>> {
        self.slot.get().cloned()
    }

    /// 是否已注入
    pub fn is_wired(&self) -> bool {
        self.slot.get().is_some()
    }

    /// 写入依赖
    pub fn set(&self, value: Arc<T>) -> DependencyResult<()> {
        self.slot
            .set(value)
            .map_err(|_| DependencyError::AlreadyWired {
                capability: capability_name::<T>(),
            })
    }

    /// 从注册表中的 bean 写入依赖
    pub fn wire(&self, source: &BeanHandle) -> DependencyResult<()> {
        let value = source.require::<T>()?;
        self.set(value)
    }
}

impl<T: ?Sized> fmt::Debug for Autowired<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Autowired")
            .field("capability", &std::any::type_name::<T>())
            .field("wired", &self.slot.get().is_some())
            .finish()
    }
}
