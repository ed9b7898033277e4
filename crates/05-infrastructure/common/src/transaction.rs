//! 连接资源与事务边界
//!
//! 事务边界绑定在调用线程的连接上：关闭自动提交、执行调用、提交。
//! 不同线程经由同一个代理的调用使用各自的连接，互不影响。

use crate::errors::{BoxError, TransactionError, TransactionResult};
use dashmap::DashMap;
use parking_lot::Mutex;
use serde::Deserialize;
use std::cell::RefCell;
use std::fmt;
use std::sync::{Arc, Weak};
use std::thread::ThreadId;
use tracing::{debug, error, warn};

/// 连接资源
pub trait Connection: Send {
    /// 设置自动提交模式
    fn set_auto_commit(&mut self, enabled: bool) -> Result<(), BoxError>;

    /// 提交
    fn commit(&mut self) -> Result<(), BoxError>;

    /// 回滚
    fn rollback(&mut self) -> Result<(), BoxError>;
}

/// 共享的连接句柄
pub type ConnectionHandle = Arc<Mutex<Box<dyn Connection>>>;

/// 连接提供者
pub trait ConnectionProvider: Send + Sync {
    /// 获取当前线程绑定的连接
    fn current_connection(&self) -> TransactionResult<ConnectionHandle>;
}

type ConnectionFactory = Box<dyn Fn() -> Result<Box<dyn Connection>, BoxError> + Send + Sync>;
type ConnectionMap = DashMap<ThreadId, ConnectionHandle>;

thread_local! {
    static BINDINGS: RefCell<Vec<Binding>> = RefCell::new(Vec::new());
}

/// 线程与连接的绑定记录，线程退出时释放连接
struct Binding {
    connections: Weak<ConnectionMap>,
    thread: ThreadId,
}

impl Drop for Binding {
    fn drop(&mut self) {
        if let Some(connections) = self.connections.upgrade() {
            connections.remove(&self.thread);
            debug!("线程 {:?} 退出，释放连接", self.thread);
        }
    }
}

/// 线程绑定的连接提供者
///
/// 每个线程第一次请求时通过工厂创建连接，之后复用。线程退出后连接随之释放，
/// 新线程总是拿到新连接。
pub struct ThreadBoundConnectionProvider {
    connections: Arc<ConnectionMap>,
    factory: ConnectionFactory,
}

impl ThreadBoundConnectionProvider {
    /// 使用连接工厂创建提供者
    pub fn new<F, C>(factory: F) -> Self
    where
        F: Fn() -> Result<C, BoxError> + Send + Sync + 'static,
        C: Connection + 'static,
    {
        Self {
            connections: Arc::new(DashMap::new()),
            factory: Box::new(move || factory().map(|c| Box::new(c) as Box<dyn Connection>)),
        }
    }

    /// 仍持有连接的存活线程数
    pub fn bound_connections(&self) -> usize {
        self.connections.len()
    }

    fn bind(&self, thread: ThreadId) -> bool {
        BINDINGS
            .try_with(|bindings| {
                let mut bindings = bindings.borrow_mut();
                bindings.retain(|binding| binding.connections.strong_count() > 0);
                bindings.push(Binding {
                    connections: Arc::downgrade(&self.connections),
                    thread,
                });
            })
            .is_ok()
    }
}

impl ConnectionProvider for ThreadBoundConnectionProvider {
    fn current_connection(&self) -> TransactionResult<ConnectionHandle> {
        let thread = std::thread::current().id();
        if let Some(existing) = self.connections.get(&thread) {
            return Ok(Arc::clone(existing.value()));
        }

        let connection = (self.factory)().map_err(|e| TransactionError::ConnectionUnavailable {
            message: e.to_string(),
        })?;
        let handle: ConnectionHandle = Arc::new(Mutex::new(connection));

        // 线程正在退出时无法登记绑定，连接只供本次使用
        if self.bind(thread) {
            debug!("为线程 {:?} 创建连接", thread);
            self.connections.insert(thread, Arc::clone(&handle));
        } else {
            warn!("线程 {:?} 正在退出，连接不做绑定", thread);
        }
        Ok(handle)
    }
}

impl fmt::Debug for ThreadBoundConnectionProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadBoundConnectionProvider")
            .field("bound_connections", &self.connections.len())
            .field("factory", &"<function>")
            .finish()
    }
}

/// 被包裹调用失败时的处理策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionErrorPolicy {
    /// 回滚后返回原始错误
    #[default]
    Rollback,
    /// 不回滚，事务保持未提交状态
    LeaveOpen,
}

/// 事务管理器
#[derive(Clone)]
pub struct TransactionManager {
    provider: Arc<dyn ConnectionProvider>,
    policy: TransactionErrorPolicy,
}

impl TransactionManager {
    /// 创建事务管理器
    pub fn new(provider: Arc<dyn ConnectionProvider>) -> Self {
        Self {
            provider,
            policy: TransactionErrorPolicy::default(),
        }
    }

    /// 设置失败处理策略
    pub fn with_policy(mut self, policy: TransactionErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 当前失败处理策略
    pub fn policy(&self) -> TransactionErrorPolicy {
        self.policy
    }

    /// 在事务边界内执行调用
    ///
    /// 调用期间不持有连接锁，被调用方可以再次获取当前线程的连接
    pub fn execute<R, E, F>(&self, call: F) -> Result<R, E>
    where
        F: FnOnce() -> Result<R, E>,
        E: From<TransactionError>,
    {
        let connection = self.provider.current_connection()?;
        connection
            .lock()
            .set_auto_commit(false)
            .map_err(|e| TransactionError::BeginFailed {
                message: e.to_string(),
            })?;
        debug!("事务开始");

        match call() {
            Ok(value) => {
                let committed = connection.lock().commit();
                match committed {
                    Ok(()) => {
                        debug!("事务提交");
                        Ok(value)
                    }
                    Err(e) => {
                        error!("事务提交失败: {}", e);
                        self.finish_failed(&connection);
                        Err(TransactionError::CommitFailed {
                            message: e.to_string(),
                        }
                        .into())
                    }
                }
            }
            Err(err) => {
                self.finish_failed(&connection);
                Err(err)
            }
        }
    }

    /// 按策略结束失败的事务
    fn finish_failed(&self, connection: &ConnectionHandle) {
        match self.policy {
            TransactionErrorPolicy::Rollback => {
                if let Err(e) = connection.lock().rollback() {
                    error!("事务回滚失败: {}", e);
                } else {
                    debug!("事务回滚");
                }
            }
            TransactionErrorPolicy::LeaveOpen => {
                warn!("调用失败，事务保持未提交状态");
            }
        }
    }
}

impl fmt::Debug for TransactionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionManager")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// 事务代理
///
/// 持有被包裹实例，对外实现同样的能力集。`#[transactional_capability]`
/// 为 `TransactionalProxy<dyn Trait>` 生成逐方法的委托实现。
pub struct TransactionalProxy<T: ?Sized> {
    inner: Arc<T>,
    transactions: TransactionManager,
}

impl<T: ?Sized> TransactionalProxy<T> {
    /// 包裹实例
    pub fn new(inner: Arc<T>, transactions: TransactionManager) -> Self {
        Self {
            inner,
            transactions,
        }
    }

    /// 被包裹的实例
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// 在事务边界内调用被包裹实例
    pub fn invoke<R, E, F>(&self, call: F) -> Result<R, E>
    where
        F: FnOnce(&T) -> Result<R, E>,
        E: From<TransactionError>,
    {
        self.transactions.execute(|| call(&self.inner))
    }
}

impl<T: ?Sized> fmt::Debug for TransactionalProxy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionalProxy")
            .field("capability", &std::any::type_name::<T>())
            .field("transactions", &self.transactions)
            .finish()
    }
}
