//! 内存账本与账本连接
//!
//! 账本保存已提交的账户数据；连接关闭自动提交时记录快照，
//! 回滚时恢复快照，提交时丢弃快照

use crate::account::Account;
use infrastructure_common::{BoxError, Connection};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

type Accounts = BTreeMap<String, Account>;

/// 内存账本
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: Mutex<Accounts>,
}

impl Ledger {
    /// 使用指定账户创建账本
    pub fn with_accounts<I: IntoIterator<Item = Account>>(accounts: I) -> Self {
        Self {
            accounts: Mutex::new(
                accounts
                    .into_iter()
                    .map(|account| (account.card_no.clone(), account))
                    .collect(),
            ),
        }
    }

    /// 演示用的初始账户
    pub fn seeded() -> Self {
        Self::with_accounts([
            Account::new("6222000000000001", "张三", 10_000),
            Account::new("6222000000000002", "李四", 10_000),
        ])
    }

    /// 按卡号查询
    pub fn find(&self, card_no: &str) -> Option<Account> {
        self.accounts.lock().get(card_no).cloned()
    }

    /// 写入账户，卡号不存在时返回 false
    pub fn store(&self, account: &Account) -> bool {
        match self.accounts.lock().get_mut(&account.card_no) {
            Some(existing) => {
                *existing = account.clone();
                true
            }
            None => false,
        }
    }

    /// 所有账户
    pub fn accounts(&self) -> Vec<Account> {
        self.accounts.lock().values().cloned().collect()
    }

    fn snapshot(&self) -> Accounts {
        self.accounts.lock().clone()
    }

    fn restore(&self, snapshot: Accounts) {
        *self.accounts.lock() = snapshot;
    }
}

static SHARED_LEDGER: Lazy<Arc<Ledger>> = Lazy::new(|| Arc::new(Ledger::seeded()));

/// 进程内共享的账本
pub fn shared_ledger() -> Arc<Ledger> {
    Arc::clone(&SHARED_LEDGER)
}

/// 账本连接
#[derive(Debug)]
pub struct LedgerConnection {
    ledger: Arc<Ledger>,
    snapshot: Option<Accounts>,
}

impl LedgerConnection {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self {
            ledger,
            snapshot: None,
        }
    }
}

impl Connection for LedgerConnection {
    fn set_auto_commit(&mut self, enabled: bool) -> Result<(), BoxError> {
        if enabled {
            self.snapshot = None;
        } else {
            self.snapshot = Some(self.ledger.snapshot());
        }
        debug!("账本连接 auto_commit={}", enabled);
        Ok(())
    }

    fn commit(&mut self) -> Result<(), BoxError> {
        self.snapshot = None;
        debug!("账本提交");
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), BoxError> {
        match self.snapshot.take() {
            Some(snapshot) => {
                self.ledger.restore(snapshot);
                debug!("账本回滚");
                Ok(())
            }
            None => Err("没有进行中的事务".into()),
        }
    }
}
