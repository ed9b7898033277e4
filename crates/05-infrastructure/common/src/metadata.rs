//! 元数据定义
//!
//! 描述类型上的组件标记、字段上的注入标记，以及类型发现源为每个类型提供的描述符

use crate::component::Bean;
use crate::errors::BoxError;
use std::sync::Arc;

/// 组件标记元数据（`#[service]`）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentMarker {
    /// 显式指定的 bean id
    pub explicit_id: Option<String>,
    /// 附加元数据
    pub meta_data: Option<String>,
}

impl ComponentMarker {
    /// 创建不带显式 id 的组件标记
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置显式 id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.explicit_id = Some(id.into());
        self
    }

    /// 设置附加元数据
    pub fn with_meta_data(mut self, meta_data: impl Into<String>) -> Self {
        self.meta_data = Some(meta_data.into());
        self
    }

    /// 非空的显式 id
    pub fn id(&self) -> Option<&str> {
        self.explicit_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// 注入标记元数据（`#[autowired]`）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InjectMarker {
    /// 显式指定的目标 bean id
    pub explicit_target_id: Option<String>,
}

impl InjectMarker {
    /// 按字段名注入
    pub fn by_field_name() -> Self {
        Self::default()
    }

    /// 按显式 id 注入
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            explicit_target_id: Some(id.into()),
        }
    }

    /// 解析目标 id：显式 id 优先，否则使用字段名本身
    pub fn target_id<'a>(&'a self, field_name: &'a str) -> &'a str {
        self.explicit_target_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(field_name)
    }
}

/// 字段描述符
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// 字段名（与源码一致）
    pub name: &'static str,
    /// 注入标记
    pub inject: Option<InjectMarker>,
    /// 是否暴露为可由声明式配置设置的属性
    pub property: bool,
}

/// 组件构造函数
pub type BeanConstructor = fn() -> Result<Arc<dyn Bean>, BoxError>;

/// 类型描述符
///
/// 由 `#[derive(Bean)]` 生成并在进程启动时登记到全局类型目录
#[derive(Clone)]
pub struct TypeDescriptor {
    /// 全限定类型名
    pub type_name: &'static str,
    /// 模块路径
    pub module_path: &'static str,
    /// 声明式配置中可以使用的别名
    pub aliases: Vec<&'static str>,
    /// 组件标记
    pub component: Option<ComponentMarker>,
    /// 是否带事务标记
    pub transactional: bool,
    /// 能力集（trait）的全限定名称，保持声明顺序
    pub capabilities: Vec<String>,
    /// 字段描述
    pub fields: Vec<FieldDescriptor>,
    /// 默认构造
    pub constructor: BeanConstructor,
}

impl TypeDescriptor {
    /// 创建新的类型描述符
    pub fn new(type_name: &'static str, module_path: &'static str, constructor: BeanConstructor) -> Self {
        Self {
            type_name,
            module_path,
            aliases: Vec::new(),
            component: None,
            transactional: false,
            capabilities: Vec::new(),
            fields: Vec::new(),
            constructor,
        }
    }

    /// 设置组件标记
    pub fn with_component(mut self, marker: ComponentMarker) -> Self {
        self.component = Some(marker);
        self
    }

    /// 设置事务标记
    pub fn transactional(mut self) -> Self {
        self.transactional = true;
        self
    }

    /// 添加能力集
    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.push(capability.into());
        self
    }

    /// 添加别名
    pub fn with_alias(mut self, alias: &'static str) -> Self {
        self.aliases.push(alias);
        self
    }

    /// 添加字段
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// 是否带组件标记
    pub fn is_component(&self) -> bool {
        self.component.is_some()
    }

    /// 带注入标记的字段
    pub fn injected_fields(&self) -> impl Iterator<Item = (&FieldDescriptor, &InjectMarker)> {
        self.fields
            .iter()
            .filter_map(|field| field.inject.as_ref().map(|marker| (field, marker)))
    }

    /// 调用构造函数创建实例
    pub fn construct(&self) -> Result<Arc<dyn Bean>, BoxError> {
        (self.constructor)()
    }
}

impl std::fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_name", &self.type_name)
            .field("module_path", &self.module_path)
            .field("aliases", &self.aliases)
            .field("component", &self.component)
            .field("transactional", &self.transactional)
            .field("capabilities", &self.capabilities)
            .field("fields", &self.fields)
            .field("constructor", &"<function>")
            .finish()
    }
}

/// 能力集（trait 对象或具体类型）的全限定名称
///
/// `dyn crate::dao::AccountDao` 记为 `crate::dao::AccountDao`
pub fn capability_name<T: ?Sized>() -> String {
    let name = std::any::type_name::<T>();
    name.strip_prefix("dyn ").unwrap_or(name).to_string()
}
