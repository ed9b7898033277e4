//! bean 声明文档
//!
//! 文档由可选的 `container` 段和 `beans` 列表组成，TOML、JSON、YAML 共用同一结构

use di_abstractions::{BeanDefinition, BeanDefinitions, ContainerSettings, PropertyRef};
use infrastructure_common::{BoxError, ConfigError, ConfigResult};
use serde::Deserialize;
use std::path::Path;

/// 文档格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// TOML
    Toml,
    /// JSON
    Json,
    /// YAML
    Yaml,
}

impl DocumentFormat {
    /// 按文件扩展名判断格式
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }

    /// 解析文档文本，`origin` 用于错误信息
    pub fn parse(self, content: &str, origin: &str) -> ConfigResult<BeanDocument> {
        let parsed: Result<BeanDocument, BoxError> = match self {
            Self::Toml => toml::from_str(content).map_err(BoxError::from),
            Self::Json => serde_json::from_str(content).map_err(BoxError::from),
            Self::Yaml => serde_yaml::from_str(content).map_err(BoxError::from),
        };
        parsed.map_err(|source| ConfigError::ParseError {
            path: origin.to_string(),
            source,
        })
    }
}

/// bean 声明文档
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BeanDocument {
    /// 容器设置
    pub container: Option<ContainerSettings>,
    /// bean 列表
    pub beans: Vec<BeanEntry>,
}

/// 单个 bean 的声明
#[derive(Debug, Clone, Deserialize)]
pub struct BeanEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub properties: Vec<PropertyEntry>,
}

/// 属性引用声明
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyEntry {
    pub name: String,
    #[serde(rename = "ref")]
    pub target: String,
}

impl BeanDocument {
    /// 转换为声明集合，保持文档顺序
    pub fn to_definitions(&self) -> BeanDefinitions {
        let mut definitions = BeanDefinitions::new();
        for bean in &self.beans {
            definitions
                .beans
                .push(BeanDefinition::new(bean.id.clone(), bean.type_name.clone()));
            definitions.properties.extend(
                bean.properties
                    .iter()
                    .map(|p| PropertyRef::new(bean.id.clone(), p.name.clone(), p.target.clone())),
            );
        }
        definitions
    }
}
