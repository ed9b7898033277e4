//! 组件扫描器

use di_abstractions::{BeanOrigin, BeanRegistry, RegistryEntry, ScanRoot, TypeDiscovery};
use infrastructure_common::{registered_types, DependencyResult, NamingConventions, TypeDescriptor};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 基于全局类型目录的类型发现
#[derive(Debug, Default, Clone, Copy)]
pub struct CatalogDiscovery;

impl TypeDiscovery for CatalogDiscovery {
    fn discover(&self, root: &ScanRoot) -> Vec<Arc<TypeDescriptor>> {
        registered_types()
            .into_iter()
            .filter(|descriptor| descriptor.is_component() && root.contains(descriptor.module_path))
            .collect()
    }

    fn name(&self) -> &str {
        "CatalogDiscovery"
    }
}

/// 扫描时被跳过的类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedType {
    /// 类型名
    pub type_name: String,
    /// 原因
    pub reason: String,
}

/// 扫描结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// 注册的 bean id，按注册顺序
    pub registered: Vec<String>,
    /// 构造失败而跳过的类型
    pub skipped: Vec<SkippedType>,
}

/// 组件扫描器
pub struct ComponentScanner<'a> {
    discovery: &'a dyn TypeDiscovery,
}

impl<'a> ComponentScanner<'a> {
    /// 使用类型发现源创建扫描器
    pub fn new(discovery: &'a dyn TypeDiscovery) -> Self {
        Self { discovery }
    }

    /// 扫描并注册带组件标记的类型
    pub fn scan<R>(&self, root: &ScanRoot, registry: &mut R) -> DependencyResult<ScanReport>
    where
        R: BeanRegistry + ?Sized,
    {
        let mut types = self.discovery.discover(root);
        types.sort_by(|a, b| a.type_name.cmp(b.type_name));
        info!(
            "开始组件扫描: {} ({} 发现 {} 个组件)",
            root,
            self.discovery.name(),
            types.len()
        );

        let mut report = ScanReport::default();
        for descriptor in types {
            let instance = match descriptor.construct() {
                Ok(instance) => instance,
                Err(e) => {
                    warn!("组件 {} 实例化失败，跳过: {}", descriptor.type_name, e);
                    report.skipped.push(SkippedType {
                        type_name: descriptor.type_name.to_string(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let id = NamingConventions::bean_id(&descriptor);
            let meta_data = descriptor.component.as_ref().and_then(|c| c.meta_data.clone());
            registry.put(
                RegistryEntry::new(id.clone(), instance, BeanOrigin::Scanned).with_meta_data(meta_data),
            )?;
            debug!("扫描注册 {} -> {}", descriptor.type_name, id);
            report.registered.push(id);
        }

        info!(
            "组件扫描完成: 注册 {} 个, 跳过 {} 个",
            report.registered.len(),
            report.skipped.len()
        );
        Ok(report)
    }
}
