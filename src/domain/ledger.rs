use chrono::Local;

use crate::{
    common::{error::LedgerError, money::Money, tag},
    domain::{
        account::Account,
        transaction::{TransactionRecord, TxAction},
    },
    store::Store,
};

/// An account's balance plus its append-only transaction log, written
/// through to a borrowed [`Store`].
///
/// The store handle is injected rather than opened per instance, and the
/// exclusive borrow means one ledger owns the connection at a time. Every
/// successful deposit/withdraw is durable before it returns: the record and
/// the new balance are committed together, and in-memory state is only
/// updated after the commit.
pub struct AccountLedger<'s> {
    store: &'s mut Store,
    account: Account,
    log: Vec<TransactionRecord>,
}

impl<'s> AccountLedger<'s> {
    pub fn new(store: &'s mut Store, account: Account) -> Self {
        Self {
            store,
            account,
            log: Vec::new(),
        }
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn balance(&self) -> Money {
        self.account.balance
    }

    pub fn transactions(&self) -> &[TransactionRecord] {
        &self.log
    }

    /// Credits the account. Fails with `InvalidAmount` for non-positive
    /// amounts, leaving balance and log untouched. Returns the new balance.
    pub fn deposit(&mut self, amount: Money) -> Result<Money, LedgerError> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount(amount));
        }
        self.apply(TxAction::Deposit, amount, self.account.balance + amount)
    }

    /// Debits the account. Fails with `InvalidAmount` for non-positive
    /// amounts and `InsufficientFunds` when the amount exceeds the balance;
    /// neither failure mutates any state. Returns the new balance.
    pub fn withdraw(&mut self, amount: Money) -> Result<Money, LedgerError> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount(amount));
        }
        if amount > self.account.balance {
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available: self.account.balance,
            });
        }
        self.apply(TxAction::Withdraw, amount, self.account.balance - amount)
    }

    fn apply(
        &mut self,
        action: TxAction,
        amount: Money,
        new_balance: Money,
    ) -> Result<Money, LedgerError> {
        let record = TransactionRecord::new(
            tag::generate_unique_tag(),
            Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            action,
            amount,
            self.account.id.clone(),
        );
        let mut updated = self.account.clone();
        updated.balance = new_balance;

        // Commit first; a storage failure leaves in-memory state unchanged.
        self.store.record_transaction(&updated, &record)?;

        self.account = updated;
        self.log.push(record);
        Ok(new_balance)
    }

    /// Upserts id/owner/kind/balance keyed by the account id.
    pub fn save(&mut self) -> Result<(), LedgerError> {
        self.store.upsert_account(&self.account)
    }

    /// Replaces in-memory state with the stored account and its full log.
    /// A missing id fails with `AccountNotFound` and leaves state untouched.
    pub fn load(&mut self, id: &str) -> Result<(), LedgerError> {
        let stored = self
            .store
            .fetch_account(id)?
            .ok_or_else(|| LedgerError::AccountNotFound(id.to_string()))?;
        let log = self.store.transactions_for(id)?;
        self.account = stored;
        self.log = log;
        Ok(())
    }

    /// Human-readable listing of the in-memory log, one line per record in
    /// insertion order.
    pub fn show_transactions(&self) -> String {
        self.log
            .iter()
            .map(|t| format!("{}: {} {} {}", t.tag, t.date, t.action, t.amount))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::AccountKind;

    fn store() -> Store {
        let store = Store::open_in_memory().unwrap();
        store.create_tables().unwrap();
        store
    }

    fn savings(id: &str, balance: i64) -> Account {
        Account::new(id, "user_01", AccountKind::Savings, Money::from_major(balance))
    }

    #[test]
    fn deposit_increases_balance_and_appends_one_record() {
        let mut store = store();
        let mut ledger = AccountLedger::new(&mut store, savings("ET1", 200));

        let balance = ledger.deposit(Money::from_major(50)).unwrap();

        assert_eq!(balance, Money::from_major(250));
        assert_eq!(ledger.balance(), Money::from_major(250));
        assert_eq!(ledger.transactions().len(), 1);

        let rec = &ledger.transactions()[0];
        assert_eq!(rec.action, TxAction::Deposit);
        assert_eq!(rec.amount, Money::from_major(50));
        assert_eq!(rec.account_id, "ET1");
    }

    #[test]
    fn deposit_rejects_non_positive_amount() {
        let mut store = store();
        let mut ledger = AccountLedger::new(&mut store, savings("ET1", 200));

        let err = ledger.deposit(Money::from_major(-10)).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount(_)));

        let err = ledger.deposit(Money::zero()).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount(_)));

        assert_eq!(ledger.balance(), Money::from_major(200));
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn withdraw_decreases_balance_and_appends_one_record() {
        let mut store = store();
        let mut ledger = AccountLedger::new(&mut store, savings("ET1", 200));

        let balance = ledger.withdraw(Money::from_major(30)).unwrap();

        assert_eq!(balance, Money::from_major(170));
        assert_eq!(ledger.transactions().len(), 1);
        assert_eq!(ledger.transactions()[0].action, TxAction::Withdraw);
        assert_eq!(ledger.transactions()[0].amount, Money::from_major(30));
    }

    #[test]
    fn withdraw_beyond_balance_fails_and_changes_nothing() {
        let mut store = store();
        let mut ledger = AccountLedger::new(&mut store, savings("RT01", 120));

        let err = ledger.withdraw(Money::from_major(500)).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientFunds { requested, available }
                if requested == Money::from_major(500) && available == Money::from_major(120)
        ));

        assert_eq!(ledger.balance(), Money::from_major(120));
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn withdraw_rejects_non_positive_amount() {
        let mut store = store();
        let mut ledger = AccountLedger::new(&mut store, savings("ET1", 200));

        let err = ledger.withdraw(Money::from_major(-5)).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
        assert_eq!(ledger.balance(), Money::from_major(200));
    }

    #[test]
    fn deposit_then_withdraw_scenario_lists_two_entries_in_order() {
        let mut store = store();
        let mut ledger = AccountLedger::new(&mut store, savings("ET1", 200));

        ledger.deposit(Money::from_major(50)).unwrap();
        assert_eq!(ledger.balance(), Money::from_major(250));
        ledger.withdraw(Money::from_major(30)).unwrap();
        assert_eq!(ledger.balance(), Money::from_major(220));

        let txs = ledger.transactions();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].action, TxAction::Deposit);
        assert_eq!(txs[1].action, TxAction::Withdraw);
        assert_ne!(txs[0].tag, txs[1].tag);

        let listing = ledger.show_transactions();
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(&format!("{}: ", txs[0].tag)));
        assert!(lines[0].ends_with("deposit 50.0000"));
        assert!(lines[1].starts_with(&format!("{}: ", txs[1].tag)));
        assert!(lines[1].ends_with("withdraw 30.0000"));
    }

    #[test]
    fn save_then_load_reproduces_account_and_log() {
        let mut store = store();
        {
            let mut ledger = AccountLedger::new(&mut store, savings("ET1", 200));
            ledger.save().unwrap();
            ledger.deposit(Money::from_major(50)).unwrap();
            ledger.withdraw(Money::from_major(30)).unwrap();
        }

        let mut reloaded =
            AccountLedger::new(&mut store, savings("ET1", 0));
        reloaded.load("ET1").unwrap();

        assert_eq!(reloaded.balance(), Money::from_major(220));
        assert_eq!(reloaded.account().user_id, "user_01");
        assert_eq!(reloaded.account().kind, AccountKind::Savings);
        assert_eq!(reloaded.transactions().len(), 2);
    }

    #[test]
    fn load_missing_id_fails_and_leaves_state_untouched() {
        let mut store = store();
        let mut ledger = AccountLedger::new(&mut store, savings("ET1", 200));

        let err = ledger.load("ghost").unwrap_err();
        assert!(matches!(err, LedgerError::AccountNotFound(id) if id == "ghost"));

        assert_eq!(ledger.account().id, "ET1");
        assert_eq!(ledger.balance(), Money::from_major(200));
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn show_transactions_is_empty_for_fresh_ledger() {
        let mut store = store();
        let ledger = AccountLedger::new(&mut store, savings("ET1", 200));
        assert_eq!(ledger.show_transactions(), "");
    }
}
