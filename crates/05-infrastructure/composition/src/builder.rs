//! 应用上下文构建器

use crate::context::{ApplicationContext, BootstrapReport};
use config_impl::FileBeanDefinitionSource;
use di_abstractions::{
    BeanDefinitionSource, BeanDefinitions, BeanRegistry, CollisionPolicy, ContainerSettings,
    ScanRoot, TypeDiscovery,
};
use di_impl::{
    BeanFactory, CatalogDiscovery, ComponentScanner, DeclarativeLoader, RegistryStore,
    ScanReport, TypeRegistry, WiringEngine,
};
use infrastructure_common::{
    ConnectionProvider, InfrastructureError, InfrastructureResult, TransactionErrorPolicy,
    TransactionManager,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 应用上下文构建器
///
/// 收集配置源、扫描根、类型注册表和连接提供者，`build` 时按
/// 加载 → 扫描 → 装配 的顺序同步完成初始化
pub struct ApplicationContextBuilder {
    /// 声明式配置源，按添加顺序合并
    definition_sources: Vec<Box<dyn BeanDefinitionSource>>,
    /// 组件扫描根
    scan_root: Option<ScanRoot>,
    /// 类型注册表，未设置时使用全局类型目录
    type_registry: Option<TypeRegistry>,
    /// 类型发现源
    discovery: Box<dyn TypeDiscovery>,
    /// 事务代理使用的连接提供者
    connection_provider: Option<Arc<dyn ConnectionProvider>>,
    /// id 冲突策略
    on_collision: Option<CollisionPolicy>,
    /// 事务失败策略
    on_transaction_error: Option<TransactionErrorPolicy>,
    /// 是否启用日志初始化
    logging_enabled: bool,
    /// 日志配置
    logging_config: LoggingConfig,
}

impl ApplicationContextBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self {
            definition_sources: Vec::new(),
            scan_root: None,
            type_registry: None,
            discovery: Box::new(CatalogDiscovery),
            connection_provider: None,
            on_collision: None,
            on_transaction_error: None,
            logging_enabled: false, // 默认不启用日志初始化
            logging_config: LoggingConfig::default(),
        }
    }

    /// 添加 bean 声明文件（TOML / JSON / YAML）
    pub fn add_definitions_file<P: AsRef<Path>>(mut self, path: P) -> InfrastructureResult<Self> {
        let path = path.as_ref();
        info!("添加 bean 声明文件: {}", path.display());
        let source = FileBeanDefinitionSource::new(path)?;
        self.definition_sources.push(Box::new(source));
        Ok(self)
    }

    /// 添加自定义配置源
    pub fn add_definitions<T: BeanDefinitionSource + 'static>(mut self, source: T) -> Self {
        info!("添加声明式配置源: {}", source.name());
        self.definition_sources.push(Box::new(source));
        self
    }

    /// 设置组件扫描根
    pub fn scan<R: Into<ScanRoot>>(mut self, root: R) -> Self {
        self.scan_root = Some(root.into());
        self
    }

    /// 设置类型注册表
    pub fn with_type_registry(mut self, registry: TypeRegistry) -> Self {
        self.type_registry = Some(registry);
        self
    }

    /// 设置类型发现源
    pub fn with_discovery<T: TypeDiscovery + 'static>(mut self, discovery: T) -> Self {
        debug!("使用类型发现源: {}", discovery.name());
        self.discovery = Box::new(discovery);
        self
    }

    /// 设置连接提供者
    pub fn with_connection_provider(mut self, provider: Arc<dyn ConnectionProvider>) -> Self {
        self.connection_provider = Some(provider);
        self
    }

    /// 设置 id 冲突策略，优先于配置源中的设置
    pub fn on_collision(mut self, policy: CollisionPolicy) -> Self {
        self.on_collision = Some(policy);
        self
    }

    /// 设置事务失败策略，优先于配置源中的设置
    pub fn on_transaction_error(mut self, policy: TransactionErrorPolicy) -> Self {
        self.on_transaction_error = Some(policy);
        self
    }

    /// 一次性应用容器设置
    pub fn with_settings(mut self, settings: ContainerSettings) -> Self {
        if let Some(root) = settings.scan_root {
            self.scan_root = Some(ScanRoot::new(root));
        }
        self.on_collision = Some(settings.on_collision);
        self.on_transaction_error = Some(settings.on_transaction_error);
        self
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = config;
        self.logging_enabled = true;
        self
    }

    /// 构建应用上下文
    pub fn build(self) -> InfrastructureResult<ApplicationContext> {
        // 只有在明确配置了日志时才初始化日志
        if self.logging_enabled {
            self.logging_config.init()?;
        }
        info!("开始构建应用上下文");

        let settings = self.resolve_settings()?;
        let definitions = self.collect_definitions()?;
        let types = match self.type_registry {
            Some(types) => types,
            None => TypeRegistry::from_catalog(),
        };

        let mut store = RegistryStore::with_policy(settings.on_collision);
        let load = DeclarativeLoader::new(&types).load(&definitions, &mut store)?;

        let (scan, wired) = match settings.scan_root.as_deref().map(ScanRoot::new) {
            Some(root) => {
                let scan = ComponentScanner::new(self.discovery.as_ref()).scan(&root, &mut store)?;
                let wired = WiringEngine::new(self.discovery.as_ref()).wire(&root, &store)?;
                (scan, wired)
            }
            None => {
                info!("未配置扫描根，跳过组件扫描");
                (ScanReport::default(), 0)
            }
        };

        let transactions = self.connection_provider.map(|provider| {
            TransactionManager::new(provider).with_policy(settings.on_transaction_error)
        });
        if transactions.is_none() {
            let proxied: Vec<String> = store
                .ids()
                .into_iter()
                .filter(|id| {
                    store
                        .get(id)
                        .is_some_and(|handle| handle.instance().is_transactional())
                })
                .collect();
            if !proxied.is_empty() {
                warn!("以下事务 bean 没有可用的连接提供者: {:?}", proxied);
            }
        }

        let report = BootstrapReport {
            load,
            scan,
            wired,
            beans: store.len(),
        };
        info!("应用上下文构建完成: {} 个 bean", report.beans);
        Ok(ApplicationContext::new(BeanFactory::new(store, transactions), report))
    }

    /// 合并配置源中的容器设置，构建器上的设置优先
    fn resolve_settings(&self) -> InfrastructureResult<ContainerSettings> {
        let mut settings = ContainerSettings::default();
        for source in &self.definition_sources {
            if let Some(found) = source.settings()? {
                debug!("采用配置源 {} 中的容器设置", source.name());
                settings = found;
            }
        }

        if let Some(root) = &self.scan_root {
            settings.scan_root = Some(root.as_str().to_string());
        }
        if let Some(policy) = self.on_collision {
            settings.on_collision = policy;
        }
        if let Some(policy) = self.on_transaction_error {
            settings.on_transaction_error = policy;
        }
        Ok(settings)
    }

    fn collect_definitions(&self) -> InfrastructureResult<BeanDefinitions> {
        let mut definitions = BeanDefinitions::new();
        for source in &self.definition_sources {
            definitions.extend(source.load()?);
        }
        definitions.validate()?;
        Ok(definitions)
    }
}

impl Default for ApplicationContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: tracing::Level,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名
    pub show_file: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 创建开发环境日志配置
    pub fn development() -> Self {
        Self {
            level: tracing::Level::DEBUG,
            show_target: true,
            show_thread_ids: true,
            show_file: true,
            show_line_number: true,
            json_format: false,
        }
    }

    /// 创建生产环境日志配置
    pub fn production() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: false,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: true,
        }
    }

    /// 初始化全局日志订阅者，进程内只能成功一次
    pub fn init(&self) -> InfrastructureResult<()> {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(self.level)
            .with_target(self.show_target)
            .with_thread_ids(self.show_thread_ids)
            .with_file(self.show_file)
            .with_line_number(self.show_line_number);

        if self.json_format {
            subscriber.json().try_init()
        } else {
            subscriber.try_init()
        }
        .map_err(|e| InfrastructureError::BootstrapFailed {
            message: format!("日志初始化失败: {}", e),
        })?;

        info!("日志系统初始化完成");
        Ok(())
    }
}
