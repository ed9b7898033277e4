//! 声明式配置抽象
//!
//! 外部配置源只需交付 bean 声明与属性引用，文件语法由具体实现决定

use crate::container::ContainerSettings;
use infrastructure_common::{ConfigError, ConfigResult, NamingConventions};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// 类型引用
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeReference(String);

impl TypeReference {
    /// 创建类型引用
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// 原始写法
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 把 `a.b.C` 写法转换为 `a::b::C`
    pub fn to_rust_path(&self) -> String {
        self.0.replace('.', "::")
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// bean 声明
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeanDefinition {
    /// bean id
    pub id: String,
    /// 类型引用
    pub type_ref: TypeReference,
}

impl BeanDefinition {
    /// 创建 bean 声明
    pub fn new(id: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            type_ref: TypeReference::new(type_name),
        }
    }
}

/// 属性引用：`owner_id` 的 `field_name` 属性持有 `target_id` 对应的 bean
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRef {
    /// 所属 bean
    pub owner_id: String,
    /// 属性名
    pub field_name: String,
    /// 目标 bean
    pub target_id: String,
}

impl PropertyRef {
    /// 创建属性引用
    pub fn new(
        owner_id: impl Into<String>,
        field_name: impl Into<String>,
        target_id: impl Into<String>,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            field_name: field_name.into(),
            target_id: target_id.into(),
        }
    }
}

/// 配置源交付的全部声明，保持声明顺序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeanDefinitions {
    /// bean 声明
    pub beans: Vec<BeanDefinition>,
    /// 属性引用
    pub properties: Vec<PropertyRef>,
}

impl BeanDefinitions {
    /// 创建空的声明集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 合并另一组声明，追加在末尾
    pub fn extend(&mut self, other: Self) {
        self.beans.extend(other.beans);
        self.properties.extend(other.properties);
    }

    /// 校验声明，一次性列出所有问题
    pub fn validate(&self) -> ConfigResult<()> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for bean in &self.beans {
            if bean.id.trim().is_empty() {
                errors.push(format!("bean 类型 {} 缺少 id", bean.type_ref));
            } else if !seen.insert(bean.id.as_str()) {
                errors.push(format!("bean id 重复声明: {}", bean.id));
            }
            if bean.type_ref.as_str().trim().is_empty() {
                errors.push(format!("bean {} 缺少类型", bean.id));
            }
        }

        let mut setters: HashMap<(&str, String), &str> = HashMap::new();
        for property in &self.properties {
            if property.field_name.trim().is_empty() {
                errors.push(format!("bean {} 的属性缺少名称", property.owner_id));
            } else {
                let key = (
                    property.owner_id.as_str(),
                    NamingConventions::property_key(&property.field_name),
                );
                match setters.entry(key) {
                    Entry::Occupied(first) => errors.push(format!(
                        "bean {} 的属性 {} 与 {} 对应同一个 setter",
                        property.owner_id,
                        first.get(),
                        property.field_name
                    )),
                    Entry::Vacant(slot) => {
                        slot.insert(property.field_name.as_str());
                    }
                }
            }
            if property.target_id.trim().is_empty() {
                errors.push(format!(
                    "bean {} 的属性 {} 缺少引用",
                    property.owner_id, property.field_name
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::ValidationFailed { errors })
        }
    }
}

/// 声明式配置源 trait
pub trait BeanDefinitionSource: Send + Sync {
    /// 配置源名称
    fn name(&self) -> &str;

    /// 读取全部声明
    fn load(&self) -> ConfigResult<BeanDefinitions>;

    /// 配置源中携带的容器设置
    fn settings(&self) -> ConfigResult<Option<ContainerSettings>> {
        Ok(None)
    }
}
