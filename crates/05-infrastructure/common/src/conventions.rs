//! 约定规范定义
//!
//! bean id 的推导规则与 setter 名称的匹配规则

use crate::metadata::TypeDescriptor;

/// 命名约定规范
#[derive(Debug)]
pub struct NamingConventions;

impl NamingConventions {
    /// 取全限定名的最后一段
    ///
    /// 同时支持 `a.b.C` 与 `a::b::C` 两种写法
    pub fn simple_name(name: &str) -> &str {
        let name = name.trim().strip_prefix("dyn ").unwrap_or(name.trim());
        name.rsplit(|c| c == '.' || c == ':')
            .find(|segment| !segment.is_empty())
            .unwrap_or(name)
    }

    /// 首字母小写的简单名称
    ///
    /// `com.example.AccountDao` -> `accountDao`
    pub fn to_hump(name: &str) -> String {
        let simple = Self::simple_name(name);
        let mut chars = simple.chars();
        match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// 推导类型在注册表中的 id
    ///
    /// 显式 id 优先；否则取第一个能力集的简单名称；再否则取类型自身的简单名称
    pub fn bean_id(descriptor: &TypeDescriptor) -> String {
        if let Some(id) = descriptor.component.as_ref().and_then(|marker| marker.id()) {
            return id.to_string();
        }

        match descriptor.capabilities.first() {
            Some(capability) => Self::to_hump(capability),
            None => Self::to_hump(descriptor.type_name),
        }
    }

    /// 配置中的属性名是否对应某个字段的 setter
    ///
    /// 配置写 `AccountDao` 时查找 `"set" + name`；字段 `account_dao` 的 setter 记为
    /// `set_account_dao`。比较时忽略大小写和下划线。
    pub fn setter_matches(property: &str, field: &str) -> bool {
        let wanted = Self::normalize(&format!("set{property}"));
        let setter = Self::normalize(&format!("set_{field}"));
        !property.is_empty() && wanted == setter
    }

    /// 属性名的比较键，忽略大小写和下划线
    ///
    /// 比较键相同的两个属性名匹配同一个 setter
    pub fn property_key(name: &str) -> String {
        Self::normalize(name)
    }

    fn normalize(name: &str) -> String {
        name.chars()
            .filter(|c| *c != '_')
            .flat_map(char::to_lowercase)
            .collect()
    }
}
