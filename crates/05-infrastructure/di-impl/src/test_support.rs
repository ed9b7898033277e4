//! 单元测试使用的手写 bean

use di_abstractions::{ScanRoot, TypeDiscovery};
use infrastructure_common::{
    capability_name, Autowired, Bean, BeanHandle, BoxError, ComponentMarker, Connection,
    DependencyError, DependencyResult, FieldDescriptor, InjectMarker, NamingConventions,
    TransactionError, TransactionManager, TransactionalProxy, TypeDescriptor,
};
use parking_lot::Mutex;
use std::any::{Any, TypeId};
use std::sync::Arc;

pub trait Store: Send + Sync {
    fn label(&self) -> String;
}

pub trait Cashier: Send + Sync {
    fn store_label(&self) -> Option<String>;
}

#[derive(Debug, thiserror::Error)]
pub enum SafeError {
    #[error("locked")]
    Locked,
    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

pub trait Safe: Send + Sync {
    fn open(&self, code: u32) -> Result<String, SafeError>;
}

impl Safe for TransactionalProxy<dyn Safe> {
    fn open(&self, code: u32) -> Result<String, SafeError> {
        self.invoke(move |inner| inner.open(code))
    }
}

#[derive(Debug, Default)]
pub struct Ledger;

impl Ledger {
    pub const TYPE_NAME: &'static str = "fixtures::Ledger";
}

impl Store for Ledger {
    fn label(&self) -> String {
        "ledger".to_string()
    }
}

impl Bean for Ledger {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn upcast(self: Arc<Self>, capability: TypeId) -> Option<Box<dyn Any>> {
        if capability == TypeId::of::<Self>() {
            return Some(Box::new(self));
        }
        if capability == TypeId::of::<dyn Store>() {
            let store: Arc<dyn Store> = self;
            return Some(Box::new(store));
        }
        None
    }
}

#[derive(Debug, Default)]
pub struct Clock;

impl Clock {
    pub const TYPE_NAME: &'static str = "fixtures::Clock";
}

impl Bean for Clock {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn upcast(self: Arc<Self>, capability: TypeId) -> Option<Box<dyn Any>> {
        (capability == TypeId::of::<Self>()).then(|| Box::new(self) as Box<dyn Any>)
    }
}

#[derive(Debug, Default)]
pub struct Teller {
    pub store: Autowired<dyn Store>,
}

impl Teller {
    pub const TYPE_NAME: &'static str = "fixtures::Teller";
}

impl Cashier for Teller {
    fn store_label(&self) -> Option<String> {
        self.store.get().map(Store::label)
    }
}

impl Bean for Teller {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn upcast(self: Arc<Self>, capability: TypeId) -> Option<Box<dyn Any>> {
        if capability == TypeId::of::<Self>() {
            return Some(Box::new(self));
        }
        if capability == TypeId::of::<dyn Cashier>() {
            let cashier: Arc<dyn Cashier> = self;
            return Some(Box::new(cashier));
        }
        None
    }

    fn has_property(&self, name: &str) -> bool {
        NamingConventions::setter_matches(name, "store")
    }

    fn set_property(&self, name: &str, value: &BeanHandle) -> DependencyResult<bool> {
        if NamingConventions::setter_matches(name, "store") {
            self.store.wire(value)?;
            return Ok(true);
        }
        Ok(false)
    }

    fn inject_field(&self, field: &str, value: &BeanHandle) -> DependencyResult<()> {
        match field {
            "store" => self.store.wire(value),
            _ => Err(DependencyError::UnknownField {
                type_name: Self::TYPE_NAME.to_string(),
                field: field.to_string(),
            }),
        }
    }
}

#[derive(Debug, Default)]
pub struct Vault;

impl Vault {
    pub const TYPE_NAME: &'static str = "fixtures::Vault";
}

impl Safe for Vault {
    fn open(&self, code: u32) -> Result<String, SafeError> {
        if code == 42 {
            Ok("gold".to_string())
        } else {
            Err(SafeError::Locked)
        }
    }
}

impl Bean for Vault {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn is_transactional(&self) -> bool {
        true
    }

    fn upcast(self: Arc<Self>, capability: TypeId) -> Option<Box<dyn Any>> {
        if capability == TypeId::of::<Self>() {
            return Some(Box::new(self));
        }
        if capability == TypeId::of::<dyn Safe>() {
            let safe: Arc<dyn Safe> = self;
            return Some(Box::new(safe));
        }
        None
    }

    fn upcast_transactional(
        self: Arc<Self>,
        capability: TypeId,
        transactions: &TransactionManager,
    ) -> Option<Box<dyn Any>> {
        if capability == TypeId::of::<dyn Safe>() {
            let inner: Arc<dyn Safe> = self;
            let proxy: Arc<dyn Safe> = Arc::new(TransactionalProxy::new(inner, transactions.clone()));
            return Some(Box::new(proxy));
        }
        None
    }
}

fn new_ledger() -> Result<Arc<dyn Bean>, BoxError> {
    Ok(Arc::new(Ledger))
}

fn new_clock() -> Result<Arc<dyn Bean>, BoxError> {
    Ok(Arc::new(Clock))
}

fn new_teller() -> Result<Arc<dyn Bean>, BoxError> {
    Ok(Arc::new(Teller::default()))
}

fn new_vault() -> Result<Arc<dyn Bean>, BoxError> {
    Ok(Arc::new(Vault))
}

fn new_broken() -> Result<Arc<dyn Bean>, BoxError> {
    Err("connection refused".into())
}

pub fn ledger_descriptor(module: &'static str) -> TypeDescriptor {
    TypeDescriptor::new(Ledger::TYPE_NAME, module, new_ledger)
        .with_capability(capability_name::<dyn Store>())
}

pub fn clock_descriptor(module: &'static str) -> TypeDescriptor {
    TypeDescriptor::new(Clock::TYPE_NAME, module, new_clock)
}

pub fn teller_descriptor(module: &'static str, inject: Option<InjectMarker>) -> TypeDescriptor {
    TypeDescriptor::new(Teller::TYPE_NAME, module, new_teller)
        .with_capability(capability_name::<dyn Cashier>())
        .with_field(FieldDescriptor {
            name: "store",
            inject,
            property: true,
        })
}

pub fn vault_descriptor(module: &'static str) -> TypeDescriptor {
    TypeDescriptor::new(Vault::TYPE_NAME, module, new_vault)
        .with_capability(capability_name::<dyn Safe>())
        .transactional()
}

pub fn broken_descriptor(module: &'static str) -> TypeDescriptor {
    TypeDescriptor::new("fixtures::Broken", module, new_broken)
}

/// 以 `#[service]` 标记描述符
pub fn service(descriptor: TypeDescriptor) -> TypeDescriptor {
    descriptor.with_component(ComponentMarker::new())
}

/// 固定类型集合的发现器
pub struct StaticDiscovery(pub Vec<Arc<TypeDescriptor>>);

impl StaticDiscovery {
    pub fn of(descriptors: Vec<TypeDescriptor>) -> Self {
        Self(descriptors.into_iter().map(Arc::new).collect())
    }
}

impl TypeDiscovery for StaticDiscovery {
    fn discover(&self, root: &ScanRoot) -> Vec<Arc<TypeDescriptor>> {
        self.0
            .iter()
            .filter(|d| d.is_component() && root.contains(d.module_path))
            .cloned()
            .collect()
    }

    fn name(&self) -> &str {
        "StaticDiscovery"
    }
}

#[derive(Debug, Default)]
pub struct Journal(Mutex<Vec<String>>);

impl Journal {
    pub fn push(&self, entry: &str) {
        self.0.lock().push(entry.to_string());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().clone()
    }
}

pub struct RecordingConnection(pub Arc<Journal>);

impl Connection for RecordingConnection {
    fn set_auto_commit(&mut self, enabled: bool) -> Result<(), BoxError> {
        self.0.push(&format!("auto_commit={enabled}"));
        Ok(())
    }

    fn commit(&mut self) -> Result<(), BoxError> {
        self.0.push("commit");
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), BoxError> {
        self.0.push("rollback");
        Ok(())
    }
}
