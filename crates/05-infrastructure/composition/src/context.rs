//! 应用上下文

use crate::builder::ApplicationContextBuilder;
use di_abstractions::{BeanProvider, ServedBean};
use di_impl::{BeanDescription, BeanFactory, LoadReport, ScanReport};
use infrastructure_common::DependencyResult;

/// 初始化过程的统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    /// 声明式加载结果
    pub load: LoadReport,
    /// 组件扫描结果
    pub scan: ScanReport,
    /// 注入的字段数量
    pub wired: usize,
    /// 注册表中的 bean 总数
    pub beans: usize,
}

/// 应用上下文
///
/// 只能由 [`ApplicationContextBuilder::build`] 创建，创建后不可变
#[derive(Debug, Clone)]
pub struct ApplicationContext {
    factory: BeanFactory,
    report: BootstrapReport,
}

impl ApplicationContext {
    /// 创建应用上下文构建器
    pub fn builder() -> ApplicationContextBuilder {
        ApplicationContextBuilder::new()
    }

    pub(crate) fn new(factory: BeanFactory, report: BootstrapReport) -> Self {
        Self { factory, report }
    }

    /// 底层 bean 工厂
    pub fn factory(&self) -> &BeanFactory {
        &self.factory
    }

    /// 初始化统计
    pub fn report(&self) -> &BootstrapReport {
        &self.report
    }

    /// 描述指定 bean
    pub fn describe(&self, id: &str) -> Option<BeanDescription> {
        self.factory.describe(id)
    }

    /// bean 是否经由事务代理提供
    pub fn is_transactional(&self, id: &str) -> bool {
        self.factory.is_transactional(id)
    }
}

impl BeanProvider for ApplicationContext {
    fn get_bean(&self, id: &str) -> DependencyResult<ServedBean> {
        self.factory.get_bean(id)
    }

    fn contains_bean(&self, id: &str) -> bool {
        self.factory.contains_bean(id)
    }

    fn bean_ids(&self) -> Vec<String> {
        self.factory.bean_ids()
    }
}
