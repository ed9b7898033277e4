//! 声明式配置加事务代理的端到端测试

use component_macros::{transactional_capability, Bean};
use config_impl::InMemoryBeanDefinitionSource;
use di_abstractions::{BeanOrigin, BeanProvider};
use infrastructure_common::{
    Autowired, BoxError, Connection, DependencyError, InfrastructureError,
    ThreadBoundConnectionProvider, TransactionError, TransactionErrorPolicy,
};
use infrastructure_composition::ApplicationContext;
use std::cell::RefCell;
use std::sync::Arc;
use std::thread;

thread_local! {
    static JOURNAL: RefCell<Vec<String>> = RefCell::new(Vec::new());
}

fn record(entry: impl Into<String>) {
    JOURNAL.with(|journal| journal.borrow_mut().push(entry.into()));
}

fn take_journal() -> Vec<String> {
    JOURNAL.with(|journal| journal.take())
}

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("账户不存在: {0}")]
    NotFound(String),
    #[error("账户依赖未注入")]
    NotWired,
    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

pub trait AccountDao: Send + Sync {
    fn balance(&self, card_no: &str) -> Result<i64, AccountError>;
}

#[transactional_capability]
pub trait AccountService: Send + Sync {
    fn balance_of(&self, card_no: &str) -> Result<i64, AccountError>;
}

#[derive(Debug, Default, Bean)]
#[bean(implements(AccountDao), alias = "com.example.dao.JdbcAccountDaoImpl")]
pub struct JdbcAccountDaoImpl;

impl AccountDao for JdbcAccountDaoImpl {
    fn balance(&self, card_no: &str) -> Result<i64, AccountError> {
        match card_no {
            "6029621011000" => Ok(100),
            _ => Err(AccountError::NotFound(card_no.to_string())),
        }
    }
}

#[derive(Debug, Default, Bean)]
#[bean(
    implements(AccountService),
    alias = "com.example.service.AccountServiceImpl"
)]
#[transactional]
pub struct AccountServiceImpl {
    #[property]
    account_dao: Autowired<dyn AccountDao>,
}

impl AccountService for AccountServiceImpl {
    fn balance_of(&self, card_no: &str) -> Result<i64, AccountError> {
        record(format!("call(dao={})", self.account_dao.is_wired()));
        self.account_dao
            .get()
            .ok_or(AccountError::NotWired)?
            .balance(card_no)
    }
}

struct JournalConnection;

impl Connection for JournalConnection {
    fn set_auto_commit(&mut self, enabled: bool) -> Result<(), BoxError> {
        if !enabled {
            record("disableAutoCommit");
        }
        Ok(())
    }

    fn commit(&mut self) -> Result<(), BoxError> {
        record("commit");
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), BoxError> {
        record("rollback");
        Ok(())
    }
}

fn definitions() -> InMemoryBeanDefinitionSource {
    InMemoryBeanDefinitionSource::new("end-to-end")
        .bean("accountDao", "com.example.dao.JdbcAccountDaoImpl")
        .bean("accountService", "com.example.service.AccountServiceImpl")
        .property("accountService", "accountDao", "accountDao")
}

fn context(policy: TransactionErrorPolicy) -> ApplicationContext {
    ApplicationContext::builder()
        .add_definitions(definitions())
        .with_connection_provider(Arc::new(ThreadBoundConnectionProvider::new(|| {
            Ok(JournalConnection)
        })))
        .on_transaction_error(policy)
        .build()
        .unwrap()
}

#[test]
fn test_transactional_call_is_bracketed() {
    let context = context(TransactionErrorPolicy::Rollback);
    let service = context.get::<dyn AccountService>("accountService").unwrap();
    take_journal();

    assert_eq!(service.balance_of("6029621011000").unwrap(), 100);
    assert_eq!(
        take_journal(),
        vec!["disableAutoCommit", "call(dao=true)", "commit"]
    );
}

#[test]
fn test_failed_call_rolls_back() {
    let context = context(TransactionErrorPolicy::Rollback);
    let service = context.get::<dyn AccountService>("accountService").unwrap();
    take_journal();

    let err = service.balance_of("0").unwrap_err();
    assert!(matches!(err, AccountError::NotFound(card) if card == "0"));
    assert_eq!(
        take_journal(),
        vec!["disableAutoCommit", "call(dao=true)", "rollback"]
    );
}

#[test]
fn test_failed_call_left_open() {
    let context = context(TransactionErrorPolicy::LeaveOpen);
    let service = context.get::<dyn AccountService>("accountService").unwrap();
    take_journal();

    assert!(service.balance_of("0").is_err());
    assert_eq!(take_journal(), vec!["disableAutoCommit", "call(dao=true)"]);
}

#[test]
fn test_bootstrap_report() {
    let context = context(TransactionErrorPolicy::Rollback);
    let report = context.report();

    assert_eq!(report.load.beans, 2);
    assert_eq!(report.load.applied, 1);
    assert_eq!(report.wired, 0);
    assert_eq!(report.beans, 2);

    let service = context.describe("accountService").unwrap();
    assert_eq!(service.origin, BeanOrigin::Declarative);
    assert!(service.transactional);
    assert!(!context.is_transactional("accountDao"));
}

#[test]
fn test_unknown_id_is_an_error() {
    let context = context(TransactionErrorPolicy::Rollback);

    let err = context.get_bean("accountRepository").unwrap_err();
    assert!(matches!(err, DependencyError::BeanNotFound { id } if id == "accountRepository"));
}

#[test]
fn test_lookups_return_same_instance() {
    let context = context(TransactionErrorPolicy::Rollback);

    let first = context.get::<dyn AccountDao>("accountDao").unwrap();
    let second = context.get::<dyn AccountDao>("accountDao").unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let concrete = context.get::<JdbcAccountDaoImpl>("accountDao").unwrap();
    assert!(context
        .get_bean("accountDao")
        .unwrap()
        .handle()
        .same_instance(context.get_bean("accountDao").unwrap().handle()));
    assert_eq!(concrete.balance("6029621011000").unwrap(), 100);
}

#[test]
fn test_transactional_bean_is_not_served_as_concrete_type() {
    let context = context(TransactionErrorPolicy::Rollback);

    let err = context
        .get::<AccountServiceImpl>("accountService")
        .unwrap_err();
    assert!(matches!(err, DependencyError::CapabilityMismatch { .. }));
}

#[test]
fn test_missing_connection_provider() {
    let context = ApplicationContext::builder()
        .add_definitions(definitions())
        .build()
        .unwrap();

    let result = context.get::<dyn AccountService>("accountService");
    assert!(matches!(
        result,
        Err(DependencyError::TransactionManagerMissing { .. })
    ));
}

#[test]
fn test_unknown_property_target_fails_bootstrap() {
    let result = ApplicationContext::builder()
        .add_definitions(
            InMemoryBeanDefinitionSource::new("broken")
                .bean("accountService", "com.example.service.AccountServiceImpl")
                .property("accountService", "accountDao", "accountDao"),
        )
        .build();

    assert!(matches!(
        result,
        Err(InfrastructureError::DependencyError {
            source: DependencyError::MissingBean { .. }
        })
    ));
}

#[test]
fn test_property_without_setter_ignores_target() {
    let context = ApplicationContext::builder()
        .add_definitions(definitions().property("accountService", "AuditTrail", "auditTrail"))
        .build()
        .unwrap();

    assert_eq!(context.report().load.applied, 1);
    assert_eq!(context.report().load.skipped, 1);
    assert!(!context.contains_bean("auditTrail"));
}

#[test]
fn test_concurrent_lookups_share_instances() -> anyhow::Result<()> {
    let context = context(TransactionErrorPolicy::Rollback);
    let expected = context.get::<dyn AccountDao>("accountDao")?;

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    let dao = context.get::<dyn AccountDao>("accountDao").unwrap();
                    let service = context
                        .get::<dyn AccountService>("accountService")
                        .unwrap();
                    let balance = service.balance_of("6029621011000").unwrap();
                    (Arc::ptr_eq(&dao, &expected), balance, take_journal())
                })
            })
            .collect();

        for handle in handles {
            let (same, balance, journal) = handle.join().unwrap();
            assert!(same);
            assert_eq!(balance, 100);
            assert_eq!(journal, vec!["disableAutoCommit", "call(dao=true)", "commit"]);
        }
    });
    Ok(())
}
