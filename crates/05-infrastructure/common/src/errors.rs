//! 错误类型定义

use thiserror::Error;

/// 通用的装箱错误类型，用于承载组件构造函数等外部代码返回的错误
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置文件读取失败: {source}")]
    FileReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("配置解析失败: {path}, 原因: {source}")]
    ParseError { path: String, source: BoxError },

    #[error("不支持的配置文件格式: {path}")]
    UnsupportedFormat { path: String },

    #[error("配置验证失败: {errors:?}")]
    ValidationFailed { errors: Vec<String> },
}

/// 依赖注入错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("Bean 不存在: {id}")]
    BeanNotFound { id: String },

    #[error("无法解析类型: {type_name} (bean: {id})")]
    UnknownType { id: String, type_name: String },

    #[error("组件创建失败: {type_name}, 原因: {source}")]
    ComponentCreationFailed { type_name: String, source: BoxError },

    #[error("Bean id 冲突: {id} (已由 {existing} 注册, 新类型 {incoming})")]
    DuplicateBeanId {
        id: String,
        existing: String,
        incoming: String,
    },

    #[error("依赖缺失: {owner}.{field} 需要的 bean {id} 不存在")]
    MissingBean {
        owner: String,
        field: String,
        id: String,
    },

    #[error("字段不可注入: {type_name}.{field}")]
    UnknownField { type_name: String, field: String },

    #[error("类型不匹配: bean {id} ({type_name}) 不提供 {capability}")]
    CapabilityMismatch {
        id: String,
        type_name: String,
        capability: String,
    },

    #[error("依赖已注入，不能重复赋值: {capability}")]
    AlreadyWired { capability: String },

    #[error("依赖注入失败: {owner}.{field}, 原因: {source}")]
    WiringFailed {
        owner: String,
        field: String,
        #[source]
        source: Box<DependencyError>,
    },

    #[error("bean {id} 需要事务代理，但容器未配置事务管理器")]
    TransactionManagerMissing { id: String },
}

/// 事务边界错误类型
#[derive(Error, Debug)]
pub enum TransactionError {
    #[error("获取当前线程连接失败: {message}")]
    ConnectionUnavailable { message: String },

    #[error("关闭自动提交失败: {message}")]
    BeginFailed { message: String },

    #[error("事务提交失败: {message}")]
    CommitFailed { message: String },
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("依赖注入错误: {source}")]
    DependencyError {
        #[from]
        source: DependencyError,
    },

    #[error("事务错误: {source}")]
    TransactionError {
        #[from]
        source: TransactionError,
    },

    #[error("基础设施启动失败: {message}")]
    BootstrapFailed { message: String },
}

impl DependencyError {
    /// 为字段注入错误附加所属 bean 与字段信息
    pub fn in_field(self, owner: impl Into<String>, field: impl Into<String>) -> Self {
        Self::WiringFailed {
            owner: owner.into(),
            field: field.into(),
            source: Box::new(self),
        }
    }
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type TransactionResult<T> = Result<T, TransactionError>;
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
