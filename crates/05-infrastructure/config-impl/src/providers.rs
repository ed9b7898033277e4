//! 声明式配置源实现

use crate::document::{BeanDocument, DocumentFormat};
use di_abstractions::{
    BeanDefinition, BeanDefinitionSource, BeanDefinitions, ContainerSettings, PropertyRef,
};
use infrastructure_common::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// 文件配置源
///
/// 按扩展名选择 TOML、JSON 或 YAML 解析，每次读取都重新解析文件
#[derive(Debug, Clone)]
pub struct FileBeanDefinitionSource {
    file_path: PathBuf,
    format: DocumentFormat,
    name: String,
}

impl FileBeanDefinitionSource {
    /// 创建文件配置源
    pub fn new<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let file_path = path.as_ref().to_path_buf();
        if !file_path.exists() {
            error!("配置文件不存在: {}", file_path.display());
            return Err(ConfigError::FileNotFound {
                path: file_path.display().to_string(),
            });
        }
        let format = DocumentFormat::from_path(&file_path)?;
        let name = format!("file:{}", file_path.display());

        Ok(Self {
            file_path,
            format,
            name,
        })
    }

    /// 文件路径
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// 文件格式
    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    fn read_document(&self) -> ConfigResult<BeanDocument> {
        debug!("加载 bean 声明文件: {}", self.file_path.display());
        let content = std::fs::read_to_string(&self.file_path)?;
        self.format
            .parse(&content, &self.file_path.display().to_string())
    }
}

impl BeanDefinitionSource for FileBeanDefinitionSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> ConfigResult<BeanDefinitions> {
        let definitions = self.read_document()?.to_definitions();
        definitions.validate()?;
        debug!(
            "bean 声明文件加载完成: {} 个 bean, {} 个属性",
            definitions.beans.len(),
            definitions.properties.len()
        );
        Ok(definitions)
    }

    fn settings(&self) -> ConfigResult<Option<ContainerSettings>> {
        Ok(self.read_document()?.container)
    }
}

/// 内存配置源
///
/// 在代码中声明 bean，主要用于测试和嵌入式场景
#[derive(Debug, Clone, Default)]
pub struct InMemoryBeanDefinitionSource {
    name: String,
    definitions: BeanDefinitions,
    settings: Option<ContainerSettings>,
}

impl InMemoryBeanDefinitionSource {
    /// 创建内存配置源
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// 声明 bean
    pub fn bean(mut self, id: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.definitions.beans.push(BeanDefinition::new(id, type_name));
        self
    }

    /// 声明属性引用
    pub fn property(
        mut self,
        owner_id: impl Into<String>,
        field_name: impl Into<String>,
        target_id: impl Into<String>,
    ) -> Self {
        self.definitions
            .properties
            .push(PropertyRef::new(owner_id, field_name, target_id));
        self
    }

    /// 设置容器设置
    pub fn with_settings(mut self, settings: ContainerSettings) -> Self {
        self.settings = Some(settings);
        self
    }
}

impl BeanDefinitionSource for InMemoryBeanDefinitionSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> ConfigResult<BeanDefinitions> {
        self.definitions.validate()?;
        Ok(self.definitions.clone())
    }

    fn settings(&self) -> ConfigResult<Option<ContainerSettings>> {
        Ok(self.settings.clone())
    }
}
