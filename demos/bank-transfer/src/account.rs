//! 账户实体

use std::fmt;

/// 银行账户
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// 卡号
    pub card_no: String,
    /// 户名
    pub name: String,
    /// 余额（分）
    pub money: i64,
}

impl Account {
    pub fn new(card_no: impl Into<String>, name: impl Into<String>, money: i64) -> Self {
        Self {
            card_no: card_no.into(),
            name: name.into(),
            money,
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:<6} {:>10}", self.card_no, self.name, self.money)
    }
}
