//! 依赖装配引擎
//!
//! 在组件扫描之后执行：重新发现类型，向带注入标记的字段写入依赖

use di_abstractions::{BeanRegistry, ScanRoot, TypeDiscovery};
use infrastructure_common::{DependencyError, DependencyResult, NamingConventions};
use tracing::{debug, error, info};

/// 依赖装配引擎
pub struct WiringEngine<'a> {
    discovery: &'a dyn TypeDiscovery,
}

impl<'a> WiringEngine<'a> {
    /// 使用类型发现源创建装配引擎
    pub fn new(discovery: &'a dyn TypeDiscovery) -> Self {
        Self { discovery }
    }

    /// 为扫描根之下的组件注入依赖，返回注入的字段数量
    pub fn wire<R>(&self, root: &ScanRoot, registry: &R) -> DependencyResult<usize>
    where
        R: BeanRegistry + ?Sized,
    {
        let mut types = self.discovery.discover(root);
        types.sort_by(|a, b| a.type_name.cmp(b.type_name));
        info!("开始依赖装配: {}", root);

        let mut wired = 0;
        for descriptor in types {
            let owner_id = NamingConventions::bean_id(&descriptor);

            for (field, marker) in descriptor.injected_fields() {
                let target_id = marker.target_id(field.name);

                let owner = registry.get(&owner_id).ok_or_else(|| {
                    error!("装配 {}.{} 时所属 bean 不存在", owner_id, field.name);
                    DependencyError::MissingBean {
                        owner: owner_id.clone(),
                        field: field.name.to_string(),
                        id: owner_id.clone(),
                    }
                })?;
                let target = registry.get(target_id).ok_or_else(|| {
                    error!("装配 {}.{} 需要的 bean 不存在: {}", owner_id, field.name, target_id);
                    DependencyError::MissingBean {
                        owner: owner_id.clone(),
                        field: field.name.to_string(),
                        id: target_id.to_string(),
                    }
                })?;

                owner
                    .instance()
                    .inject_field(field.name, &target)
                    .map_err(|e| {
                        error!("装配 {}.{} 失败: {}", owner_id, field.name, e);
                        e.in_field(&owner_id, field.name)
                    })?;
                debug!("注入 {}.{} <- {}", owner_id, field.name, target_id);
                wired += 1;
            }
        }

        info!("依赖装配完成: 注入 {} 个字段", wired);
        Ok(wired)
    }
}
