//! bean 注册表抽象接口

use infrastructure_common::{Bean, BeanHandle, DependencyResult};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// bean 的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeanOrigin {
    /// 声明式配置
    Declarative,
    /// 组件扫描
    Scanned,
}

impl fmt::Display for BeanOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declarative => f.write_str("declarative"),
            Self::Scanned => f.write_str("scanned"),
        }
    }
}

/// id 冲突处理策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// 拒绝，初始化失败
    #[default]
    Reject,
    /// 后注册者覆盖先注册者
    Overwrite,
    /// 保留先注册者
    KeepFirst,
}

/// 注册表条目
#[derive(Clone)]
pub struct RegistryEntry {
    /// bean 引用
    pub handle: BeanHandle,
    /// 来源
    pub origin: BeanOrigin,
    /// 组件标记携带的附加元数据
    pub meta_data: Option<String>,
}

impl RegistryEntry {
    /// 创建注册表条目
    pub fn new(id: impl Into<String>, instance: Arc<dyn Bean>, origin: BeanOrigin) -> Self {
        Self {
            handle: BeanHandle::new(id, instance),
            origin,
            meta_data: None,
        }
    }

    /// 设置附加元数据
    pub fn with_meta_data(mut self, meta_data: Option<String>) -> Self {
        self.meta_data = meta_data;
        self
    }

    /// bean id
    pub fn id(&self) -> &str {
        self.handle.id()
    }
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("id", &self.handle.id())
            .field("type_name", &self.handle.type_name())
            .field("origin", &self.origin)
            .field("meta_data", &self.meta_data)
            .finish()
    }
}

/// bean 注册表 trait
///
/// 只在初始化阶段写入，之后只读
pub trait BeanRegistry: Send + Sync {
    /// 插入条目
    fn put(&mut self, entry: RegistryEntry) -> DependencyResult<()>;

    /// 按 id 取出 bean
    fn get(&self, id: &str) -> Option<BeanHandle>;

    /// 按 id 取出完整条目
    fn entry(&self, id: &str) -> Option<&RegistryEntry>;

    /// 所有 id，按字典序
    fn ids(&self) -> Vec<String>;

    /// 条目数量
    fn len(&self) -> usize;

    /// 是否包含 id
    fn contains(&self, id: &str) -> bool {
        self.entry(id).is_some()
    }

    /// 是否为空
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 条目来源
    fn origin_of(&self, id: &str) -> Option<BeanOrigin> {
        self.entry(id).map(|entry| entry.origin)
    }
}
