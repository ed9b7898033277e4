//! 账户数据访问

use crate::account::Account;
use crate::errors::{BankError, BankResult};
use crate::ledger::{shared_ledger, Ledger};
use component_macros::Bean;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::debug;

/// 账户数据访问接口
pub trait AccountDao: Send + Sync {
    /// 按卡号查询账户
    fn query_account_by_card_no(&self, card_no: &str) -> BankResult<Account>;

    /// 按卡号更新账户
    fn update_account_by_card_no(&self, account: &Account) -> BankResult<()>;
}

/// 基于账本的账户数据访问实现
#[derive(Debug, Bean)]
#[bean(
    implements(AccountDao),
    alias = "bank.dao.JdbcAccountDaoImpl",
    init = "JdbcAccountDaoImpl::open"
)]
#[service(value = "accountDao", meta_data = "ledger")]
pub struct JdbcAccountDaoImpl {
    ledger: Arc<Ledger>,
}

impl JdbcAccountDaoImpl {
    /// 连接进程内共享账本
    pub fn open() -> Result<Self, Infallible> {
        Ok(Self::with_ledger(shared_ledger()))
    }

    pub fn with_ledger(ledger: Arc<Ledger>) -> Self {
        Self { ledger }
    }
}

impl AccountDao for JdbcAccountDaoImpl {
    fn query_account_by_card_no(&self, card_no: &str) -> BankResult<Account> {
        debug!("查询账户: {}", card_no);
        self.ledger
            .find(card_no)
            .ok_or_else(|| BankError::AccountNotFound {
                card_no: card_no.to_string(),
            })
    }

    fn update_account_by_card_no(&self, account: &Account) -> BankResult<()> {
        debug!("更新账户: {} -> {}", account.card_no, account.money);
        if self.ledger.store(account) {
            Ok(())
        } else {
            Err(BankError::AccountNotFound {
                card_no: account.card_no.clone(),
            })
        }
    }
}
