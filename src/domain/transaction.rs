use crate::common::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxAction {
    Deposit,
    Withdraw,
}

impl TxAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxAction::Deposit => "deposit",
            TxAction::Withdraw => "withdraw",
        }
    }
}

impl std::str::FromStr for TxAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deposit" => Ok(TxAction::Deposit),
            "withdraw" => Ok(TxAction::Withdraw),
            other => Err(format!("unknown transaction action: {other}")),
        }
    }
}

impl std::fmt::Display for TxAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of an account's append-only log. Write-once: records are
/// created only as a side effect of a deposit or withdrawal and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Generated short alphanumeric tag, primary key in storage.
    pub tag: String,
    /// Local timestamp, `%Y-%m-%d %H:%M:%S`.
    pub date: String,
    pub action: TxAction,
    pub amount: Money,
    pub account_id: String,
}

impl TransactionRecord {
    pub fn new(
        tag: String,
        date: String,
        action: TxAction,
        amount: Money,
        account_id: String,
    ) -> Self {
        Self {
            tag,
            date,
            action,
            amount,
            account_id,
        }
    }
}
