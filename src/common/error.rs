use crate::common::money::Money;

#[derive(thiserror::Error, Debug)]
pub enum LedgerError {
    #[error("amount must be greater than zero, got {0}")]
    InvalidAmount(Money),
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Money, available: Money },
    #[error("no stored account with id {0}")]
    AccountNotFound(String),
    #[error("transaction tag {0} already exists in storage")]
    TagCollision(String),
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}
