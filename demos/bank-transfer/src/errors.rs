//! 转账错误定义

use infrastructure_common::TransactionError;
use thiserror::Error;

/// 转账业务错误
#[derive(Error, Debug)]
pub enum BankError {
    #[error("账户不存在: {card_no}")]
    AccountNotFound { card_no: String },

    #[error("余额不足: 账户 {card_no} 余额 {balance}，需要 {required}")]
    InsufficientFunds {
        card_no: String,
        balance: i64,
        required: i64,
    },

    #[error("余额溢出: 账户 {card_no} 余额 {balance}，转入 {amount}")]
    BalanceOverflow {
        card_no: String,
        balance: i64,
        amount: i64,
    },

    #[error("转账金额必须为正数: {0}")]
    InvalidAmount(i64),

    #[error("不能向同一账户转账: {0}")]
    SameAccount(String),

    #[error("依赖未注入: {0}")]
    NotWired(&'static str),

    #[error("事务错误: {0}")]
    Transaction(#[from] TransactionError),
}

/// 转账结果类型
pub type BankResult<T> = Result<T, BankError>;
