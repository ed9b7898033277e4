//! 声明式注册加载器
//!
//! 按声明顺序实例化 bean，再按属性引用调用 setter

use di_abstractions::{BeanDefinitions, BeanOrigin, BeanRegistry, RegistryEntry, TypeResolver};
use infrastructure_common::{DependencyError, DependencyResult};
use tracing::{debug, error, info, warn};

/// 加载结果统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// 实例化的 bean 数量
    pub beans: usize,
    /// 找到 setter 并完成设置的属性数量
    pub applied: usize,
    /// 没有对应 setter 而跳过的属性数量
    pub skipped: usize,
}

/// 声明式注册加载器
pub struct DeclarativeLoader<'a> {
    resolver: &'a dyn TypeResolver,
}

impl<'a> DeclarativeLoader<'a> {
    /// 使用类型解析器创建加载器
    pub fn new(resolver: &'a dyn TypeResolver) -> Self {
        Self { resolver }
    }

    /// 把声明写入注册表
    pub fn load<R>(&self, definitions: &BeanDefinitions, registry: &mut R) -> DependencyResult<LoadReport>
    where
        R: BeanRegistry + ?Sized,
    {
        info!(
            "开始加载声明式配置: {} 个 bean, {} 个属性",
            definitions.beans.len(),
            definitions.properties.len()
        );
        let mut report = LoadReport::default();

        for definition in &definitions.beans {
            let descriptor = self.resolver.resolve(&definition.type_ref).ok_or_else(|| {
                error!("无法解析 bean {} 的类型: {}", definition.id, definition.type_ref);
                DependencyError::UnknownType {
                    id: definition.id.clone(),
                    type_name: definition.type_ref.to_string(),
                }
            })?;

            let instance = descriptor.construct().map_err(|source| {
                error!("bean {} 实例化失败: {}", definition.id, source);
                DependencyError::ComponentCreationFailed {
                    type_name: descriptor.type_name.to_string(),
                    source,
                }
            })?;

            let meta_data = descriptor.component.as_ref().and_then(|c| c.meta_data.clone());
            registry.put(
                RegistryEntry::new(definition.id.clone(), instance, BeanOrigin::Declarative)
                    .with_meta_data(meta_data),
            )?;
            report.beans += 1;
        }

        for property in &definitions.properties {
            let owner = registry.get(&property.owner_id).ok_or_else(|| {
                error!("属性 {}.{} 的所属 bean 不存在", property.owner_id, property.field_name);
                DependencyError::MissingBean {
                    owner: property.owner_id.clone(),
                    field: property.field_name.clone(),
                    id: property.owner_id.clone(),
                }
            })?;

            if !owner.instance().has_property(&property.field_name) {
                debug!(
                    "{} 没有属性 {} 的 setter，跳过",
                    owner.type_name(),
                    property.field_name
                );
                report.skipped += 1;
                continue;
            }

            let target = registry.get(&property.target_id).ok_or_else(|| {
                error!(
                    "属性 {}.{} 引用的 bean 不存在: {}",
                    property.owner_id, property.field_name, property.target_id
                );
                DependencyError::MissingBean {
                    owner: property.owner_id.clone(),
                    field: property.field_name.clone(),
                    id: property.target_id.clone(),
                }
            })?;

            let matched = owner
                .instance()
                .set_property(&property.field_name, &target)
                .map_err(|e| e.in_field(&property.owner_id, &property.field_name))?;

            if matched {
                debug!(
                    "设置属性 {}.{} -> {}",
                    property.owner_id, property.field_name, property.target_id
                );
                report.applied += 1;
            } else {
                warn!(
                    "{} 声明了属性 {} 但 setter 未接受设置",
                    owner.type_name(),
                    property.field_name
                );
                report.skipped += 1;
                continue;
            }

            // 放回原条目，同一实例不会触发冲突
            if let Some(entry) = registry.entry(&property.owner_id).cloned() {
                registry.put(entry)?;
            }
        }

        info!(
            "声明式配置加载完成: {} 个 bean, 设置 {} 个属性, 跳过 {} 个",
            report.beans, report.applied, report.skipped
        );
        Ok(report)
    }
}
