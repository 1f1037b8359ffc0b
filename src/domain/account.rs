use crate::common::money::Money;

/// Account category. The kinds carry no behavioral difference today; the
/// field exists so stored rows keep their `type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    Savings,
    Checking,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Savings => "savings",
            AccountKind::Checking => "checking",
        }
    }
}

impl std::str::FromStr for AccountKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "savings" => Ok(AccountKind::Savings),
            "checking" => Ok(AccountKind::Checking),
            other => Err(format!("unknown account kind: {other}")),
        }
    }
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Unique account identifier.
    pub id: String,
    /// Owning user's identifier.
    pub user_id: String,
    pub kind: AccountKind,
    /// Current balance. Never driven negative by a withdrawal.
    pub balance: Money,
}

impl Account {
    pub fn new(id: impl Into<String>, user_id: impl Into<String>, kind: AccountKind, balance: Money) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            kind,
            balance,
        }
    }
}
