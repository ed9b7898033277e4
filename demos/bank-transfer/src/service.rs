//! 转账服务

use crate::dao::AccountDao;
use crate::errors::{BankError, BankResult};
use component_macros::{transactional_capability, Bean};
use infrastructure_common::Autowired;
use tracing::info;

/// 转账服务接口
#[transactional_capability]
pub trait TransferService: Send + Sync {
    /// 从 `from_card_no` 向 `to_card_no` 转账 `money`
    fn transfer(&self, from_card_no: &str, to_card_no: &str, money: i64) -> BankResult<()>;
}

/// 转账服务实现
///
/// 入账先于扣款写入，余额不足时由事务回滚撤销已写入的入账
#[derive(Debug, Default, Bean)]
#[bean(
    implements(TransferService),
    alias = "bank.service.TransferServiceImpl"
)]
#[service]
#[transactional]
pub struct TransferServiceImpl {
    #[autowired("accountDao")]
    #[property]
    account_dao: Autowired<dyn AccountDao>,
}

impl TransferService for TransferServiceImpl {
    fn transfer(&self, from_card_no: &str, to_card_no: &str, money: i64) -> BankResult<()> {
        if money <= 0 {
            return Err(BankError::InvalidAmount(money));
        }
        if from_card_no == to_card_no {
            return Err(BankError::SameAccount(from_card_no.to_string()));
        }
        let dao = self
            .account_dao
            .get()
            .ok_or(BankError::NotWired("accountDao"))?;

        let mut from = dao.query_account_by_card_no(from_card_no)?;
        let mut to = dao.query_account_by_card_no(to_card_no)?;

        to.money = to.money.checked_add(money).ok_or_else(|| BankError::BalanceOverflow {
            card_no: to.card_no.clone(),
            balance: to.money,
            amount: money,
        })?;
        dao.update_account_by_card_no(&to)?;

        if from.money < money {
            return Err(BankError::InsufficientFunds {
                card_no: from.card_no,
                balance: from.money,
                required: money,
            });
        }
        from.money -= money;
        dao.update_account_by_card_no(&from)?;

        info!("转账完成: {} -> {} 金额 {}", from_card_no, to_card_no, money);
        Ok(())
    }
}
